// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

//! Reader for `.tbl` files.
//!
//! The first line holds the column names, the second their type names, and
//! every further line one row. Fields are separated by `|`.

use std::{fs, path::Path, sync::Arc};

use tessera_core::Table;
use tessera_type::{Error, Type, Value};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("cannot read table file: {0}")]
	Io(#[from] std::io::Error),

	#[error("line {line}: {message}")]
	Parse {
		line: usize,
		message: String,
	},

	#[error(transparent)]
	Storage(#[from] Error),
}

pub fn load_table(path: impl AsRef<Path>, chunk_size: u32) -> Result<Arc<Table>, LoadError> {
	let text = fs::read_to_string(path)?;
	parse_table(&text, chunk_size)
}

pub fn parse_table(text: &str, chunk_size: u32) -> Result<Arc<Table>, LoadError> {
	let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));

	let (_, names) = lines.next().ok_or_else(|| parse_error(1, "missing column names"))?;
	let (_, types) = lines.next().ok_or_else(|| parse_error(2, "missing column types"))?;

	let names: Vec<&str> = names.split('|').collect();
	let types = types
		.split('|')
		.map(|name| name.parse::<Type>().map_err(|err| parse_error(2, err)))
		.collect::<Result<Vec<_>, _>>()?;
	if names.len() != types.len() {
		return Err(parse_error(2, format!("{} column names but {} types", names.len(), types.len())));
	}

	let table = Table::with_chunk_size(chunk_size);
	for (name, ty) in names.iter().zip(&types) {
		table.add_column_of_type(name, *ty)?;
	}

	for (line, row) in lines {
		if row.is_empty() {
			continue;
		}

		let fields: Vec<&str> = row.split('|').collect();
		if fields.len() != types.len() {
			return Err(parse_error(line, format!("expected {} fields, found {}", types.len(), fields.len())));
		}

		let values = types
			.iter()
			.zip(fields)
			.map(|(ty, field)| Value::parse(*ty, field).map_err(|err| parse_error(line, err)))
			.collect::<Result<Vec<_>, _>>()?;
		table.append(&values)?;
	}

	Ok(Arc::new(table))
}

fn parse_error(line: usize, message: impl ToString) -> LoadError {
	LoadError::Parse {
		line,
		message: message.to_string(),
	}
}

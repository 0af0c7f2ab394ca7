// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{
	collections::BTreeMap,
	fmt::{self, Display, Formatter},
	sync::Arc,
};

use parking_lot::RwLock;
use tessera_core::Table;
use tessera_type::{Error, Result};
use tracing::instrument;

const RULE: &str = "-----------------------------------------------";

/// Maps table names to tables.
///
/// There is no global instance; whoever needs to look tables up by name is
/// handed a catalog.
#[derive(Debug, Default)]
pub struct Catalog {
	tables: RwLock<BTreeMap<String, Arc<Table>>>,
}

impl Catalog {
	pub fn new() -> Self {
		Self::default()
	}

	#[instrument(name = "catalog::add_table", level = "debug", skip(self, table))]
	pub fn add_table(&self, name: &str, table: Arc<Table>) -> Result<()> {
		let mut tables = self.tables.write();
		if tables.contains_key(name) {
			return Err(Error::TableExists(name.to_string()));
		}
		tables.insert(name.to_string(), table);
		Ok(())
	}

	#[instrument(name = "catalog::drop_table", level = "debug", skip(self))]
	pub fn drop_table(&self, name: &str) -> Result<Arc<Table>> {
		self.tables.write().remove(name).ok_or_else(|| Error::TableNotFound(name.to_string()))
	}

	#[instrument(name = "catalog::get_table", level = "trace", skip(self))]
	pub fn get_table(&self, name: &str) -> Result<Arc<Table>> {
		self.tables.read().get(name).cloned().ok_or_else(|| Error::TableNotFound(name.to_string()))
	}

	pub fn has_table(&self, name: &str) -> bool {
		self.tables.read().contains_key(name)
	}

	/// Names of all tables, sorted.
	pub fn table_names(&self) -> Vec<String> {
		self.tables.read().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.tables.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.read().is_empty()
	}

	/// Removes every table.
	#[instrument(name = "catalog::clear", level = "debug", skip(self))]
	pub fn clear(&self) {
		self.tables.write().clear();
	}
}

/// One line per table with its column, row and chunk counts.
impl Display for Catalog {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		writeln!(f, "{RULE}")?;
		writeln!(f, "| Name | #Columns | #Rows | #Chunks |")?;
		writeln!(f, "{RULE}")?;
		for (name, table) in self.tables.read().iter() {
			writeln!(
				f,
				"| {} | {} | {} | {} |",
				name,
				table.column_count(),
				table.row_count(),
				table.chunk_count()
			)?;
		}
		writeln!(f, "{RULE}")
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::{
	fmt,
	io::{self, Stdout, Write},
	sync::Arc,
};

use parking_lot::{Mutex, MutexGuard};
use tessera_core::{Chunk, ColumnDef, Table};
use tessera_type::{ColumnId, Error, Result, Value};

use crate::operator::{Operator, OperatorState};

const MIN_WIDTH: usize = 8;
const MAX_WIDTH: usize = 20;

/// Writes its input table to a writer and passes the table through unchanged.
pub struct Print<W = Stdout> {
	state: OperatorState,
	writer: Mutex<W>,
}

impl Print<Stdout> {
	pub fn new(input: Arc<dyn Operator>) -> Self {
		Self::with_writer(input, io::stdout())
	}
}

impl<W: Write + Send> Print<W> {
	pub fn with_writer(input: Arc<dyn Operator>, writer: W) -> Self {
		Self {
			state: OperatorState::unary(input),
			writer: Mutex::new(writer),
		}
	}

	pub fn writer(&self) -> MutexGuard<'_, W> {
		self.writer.lock()
	}

	pub fn into_writer(self) -> W {
		self.writer.into_inner()
	}
}

impl<W: Write + Send> Operator for Print<W> {
	fn name(&self) -> &'static str {
		"print"
	}

	fn state(&self) -> &OperatorState {
		&self.state
	}

	fn on_execute(&self) -> Result<Arc<Table>> {
		let table = self.state.input_table_left()?;
		let text = render(&table)?;

		let mut writer = self.writer.lock();
		writer.write_all(text.as_bytes()).and_then(|_| writer.flush()).map_err(|err| Error::Output(err.to_string()))?;
		Ok(table)
	}
}

/// Renders the schema and every chunk of `table` as aligned, `|`-separated rows.
///
/// Columns are at least as wide as their name and at least 8 characters;
/// values widen a column up to 20 characters, longer values are not cut.
pub fn render(table: &Table) -> Result<String> {
	let columns = table.columns();
	let widths = column_widths(table)?;
	let chunks = table.chunks().iter().map(|chunk| chunk_rows(chunk)).collect::<Result<Vec<_>>>()?;

	let mut out = String::new();
	write_table(&mut out, &columns, &widths, &chunks).map_err(|err| Error::Output(err.to_string()))?;
	Ok(out)
}

fn chunk_rows(chunk: &Chunk) -> Result<Vec<Vec<Value>>> {
	let size = chunk.size() as usize;
	let segments = chunk.segments();
	(0..size).map(|offset| segments.iter().map(|segment| segment.get(offset)).collect()).collect()
}

fn write_table(
	out: &mut impl fmt::Write,
	columns: &[ColumnDef],
	widths: &[usize],
	chunks: &[Vec<Vec<Value>>],
) -> fmt::Result {
	writeln!(out, "=== Columns")?;
	for (def, width) in columns.iter().zip(widths.iter().copied()) {
		write!(out, "|{:>width$}", def.name)?;
	}
	writeln!(out, "|")?;
	for (def, width) in columns.iter().zip(widths.iter().copied()) {
		write!(out, "|{:>width$}", def.ty.name())?;
	}
	writeln!(out, "|")?;

	for (chunk_id, rows) in chunks.iter().enumerate() {
		writeln!(out, "=== Chunk {chunk_id} ===")?;
		if rows.is_empty() {
			writeln!(out, "Empty chunk.")?;
			continue;
		}

		for row in rows {
			write!(out, "|")?;
			for (value, width) in row.iter().zip(widths.iter().copied()) {
				write!(out, "{value:>width$}|")?;
			}
			writeln!(out)?;
		}
	}
	Ok(())
}

fn column_widths(table: &Table) -> Result<Vec<usize>> {
	let mut widths: Vec<usize> =
		table.column_names().iter().map(|name| MIN_WIDTH.max(name.chars().count())).collect();

	for chunk in table.chunks() {
		for (column, width) in widths.iter_mut().enumerate() {
			let segment = chunk.get_segment(ColumnId(column as u16))?;
			for offset in 0..segment.len() {
				let cell = segment.get(offset)?.to_string().chars().count();
				*width = (*width).max(cell.min(MAX_WIDTH));
			}
		}
	}
	Ok(widths)
}

#[cfg(test)]
mod tests {
	use tessera_type::{ChunkId, Value};

	use super::*;
	use crate::TableWrapper;

	fn table() -> Arc<Table> {
		let table = Table::with_chunk_size(2);
		table.add_column("column_1", "int32").unwrap();
		table.add_column("column_2", "string").unwrap();
		table.append(&[Value::Int4(1), Value::utf8("Hello,")]).unwrap();
		table.append(&[Value::Int4(2), Value::utf8("world")]).unwrap();
		table.append(&[Value::Int4(3), Value::utf8("!")]).unwrap();
		Arc::new(table)
	}

	#[test]
	fn test_render() {
		let expected = "\
=== Columns
|column_1|column_2|
|   int32|  string|
=== Chunk 0 ===
|       1|  Hello,|
|       2|   world|
=== Chunk 1 ===
|       3|       !|
";
		assert_eq!(render(&table()).unwrap(), expected);
	}

	#[test]
	fn test_render_empty_chunk() {
		let table = Table::default();
		table.add_column("a", "float64").unwrap();
		assert_eq!(render(&table).unwrap(), "=== Columns\n|       a|\n| float64|\n=== Chunk 0 ===\nEmpty chunk.\n");
	}

	#[test]
	fn test_width_limits() {
		let table = Table::default();
		table.add_column("a_rather_long_column_name", "string").unwrap();
		table.add_column("b", "string").unwrap();
		table.append(&[Value::utf8("x"), Value::utf8("a value that is longer than twenty")]).unwrap();
		table.append(&[Value::utf8("y"), Value::utf8("short")]).unwrap();

		let rendered = render(&table).unwrap();
		let lines: Vec<&str> = rendered.lines().collect();
		assert_eq!(lines[1], format!("|{}|{}b|", "a_rather_long_column_name", " ".repeat(19)));
		assert_eq!(lines[4], format!("|{}x|a value that is longer than twenty|", " ".repeat(24)));
		assert_eq!(lines[5], format!("|{}y|{}short|", " ".repeat(24), " ".repeat(15)));
		assert_eq!(table.get_chunk(ChunkId(0)).unwrap().size(), 2);
	}

	#[test]
	fn test_print_passes_table_through() {
		let table = table();
		let wrapper = Arc::new(TableWrapper::new(Arc::clone(&table)));
		wrapper.execute().unwrap();

		let print = Print::with_writer(wrapper, Vec::new());
		print.execute().unwrap();

		assert!(Arc::ptr_eq(&print.output().unwrap(), &table));
		let written = String::from_utf8(print.into_writer()).unwrap();
		assert!(written.starts_with("=== Columns\n|column_1|column_2|\n"));
	}

	struct Full;

	impl fmt::Write for Full {
		fn write_str(&mut self, _: &str) -> fmt::Result {
			Err(fmt::Error)
		}
	}

	#[test]
	fn test_write_errors_propagate() {
		let table = table();
		let chunks = table.chunks().iter().map(|chunk| chunk_rows(chunk)).collect::<Result<Vec<_>>>().unwrap();
		assert_eq!(write_table(&mut Full, &table.columns(), &[8, 8], &chunks), Err(fmt::Error));
	}
}

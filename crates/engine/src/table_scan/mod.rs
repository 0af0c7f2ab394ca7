// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

mod scan_type;
mod scanner;

use std::{collections::HashMap, sync::Arc};

pub use scan_type::ScanType;
use scanner::{ScanFactory, SegmentScan};
use tessera_core::{Chunk, ReferenceSegment, Segment, Table, resolve};
use tessera_type::{ChunkId, ChunkOffset, ColumnId, PosList, Result, RowId, Value};
use tracing::{instrument, trace};

use crate::operator::{Operator, OperatorState};

/// Selects the rows of its input whose value in one column compares to a
/// search value, producing a table of reference segments.
pub struct TableScan {
	state: OperatorState,
	column_id: ColumnId,
	scan_type: ScanType,
	search_value: Value,
}

impl TableScan {
	pub fn new(input: Arc<dyn Operator>, column_id: ColumnId, scan_type: ScanType, search_value: Value) -> Self {
		Self {
			state: OperatorState::unary(input),
			column_id,
			scan_type,
			search_value,
		}
	}

	pub fn column_id(&self) -> ColumnId {
		self.column_id
	}

	pub fn scan_type(&self) -> ScanType {
		self.scan_type
	}

	pub fn search_value(&self) -> &Value {
		&self.search_value
	}
}

impl Operator for TableScan {
	fn name(&self) -> &'static str {
		"table_scan"
	}

	fn state(&self) -> &OperatorState {
		&self.state
	}

	fn on_execute(&self) -> Result<Arc<Table>> {
		let input = self.state.input_table_left()?;
		scan(&input, self.column_id, self.scan_type, &self.search_value)
	}
}

/// Scans `table` and returns a table with the same columns whose chunks are
/// reference segments naming the matching rows.
///
/// Rows are always referenced in a table holding actual data: scanning a
/// table of reference segments yields positions in the table those segments
/// point at. The output has one chunk per input chunk.
#[instrument(name = "engine::table_scan", level = "debug", skip(table, search_value), fields(value = %search_value))]
pub fn scan(table: &Arc<Table>, column_id: ColumnId, scan_type: ScanType, search_value: &Value) -> Result<Arc<Table>> {
	let ty = table.column_type(column_id)?;
	let scanner = resolve(
		ty,
		ScanFactory {
			scan_type,
			search_value,
		},
	)?;

	let output = Table::default();
	for def in table.columns() {
		output.add_column_definition(&def.name, def.ty);
	}

	for (index, chunk) in table.chunks().iter().enumerate() {
		let chunk_id = ChunkId(index as u32);
		let offsets = {
			let segment = chunk.get_segment(column_id)?;
			scanner.scan(&segment)?
		};
		trace!(chunk = %chunk_id, rows = chunk.size(), matches = offsets.len(), "scanned chunk");

		output.emplace_chunk(reference_chunk(table, chunk_id, chunk, &offsets)?);
	}

	Ok(Arc::new(output))
}

/// Builds one reference segment per column for the rows at `offsets`.
///
/// Columns stored in `chunk` reference `table`; columns that are themselves
/// reference segments reference their target table, with the positions
/// translated. Columns sharing a position list share the translated one.
fn reference_chunk(table: &Arc<Table>, chunk_id: ChunkId, chunk: &Chunk, offsets: &[ChunkOffset]) -> Result<Chunk> {
	let mut direct: Option<Arc<PosList>> = None;
	let mut translated: HashMap<*const PosList, Arc<PosList>> = HashMap::new();

	let output = Chunk::new();
	for (column, segment) in chunk.segments().iter().enumerate() {
		let segment = match segment {
			Segment::Reference(reference) => {
				let key = Arc::as_ptr(reference.pos_list());
				let pos_list = match translated.get(&key) {
					Some(pos_list) => Arc::clone(pos_list),
					None => {
						let pos_list = Arc::new(
							offsets
								.iter()
								.map(|offset| reference.row_id(*offset as usize))
								.collect::<Result<PosList>>()?,
						);
						translated.insert(key, Arc::clone(&pos_list));
						pos_list
					}
				};
				ReferenceSegment::new(
					Arc::clone(reference.referenced_table()),
					reference.referenced_column_id(),
					pos_list,
				)?
			}
			_ => {
				let pos_list = direct
					.get_or_insert_with(|| {
						Arc::new(offsets.iter().map(|offset| RowId::new(chunk_id.0, *offset)).collect())
					})
					.clone();
				ReferenceSegment::new(Arc::clone(table), ColumnId(column as u16), pos_list)?
			}
		};
		output.add_segment(Segment::Reference(segment));
	}
	Ok(output)
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::sync::Arc;

use tessera_type::{ColumnId, Error, Extent, PosList, Result, RowId, Type, Value};

use crate::table::Table;

/// A view on one column of another table through a position list.
#[derive(Debug, Clone)]
pub struct ReferenceSegment {
	referenced_table: Arc<Table>,
	referenced_column_id: ColumnId,
	r#type: Type,
	pos_list: Arc<PosList>,
}

impl ReferenceSegment {
	/// Fails if `referenced_column_id` is not a column of `referenced_table`.
	pub fn new(referenced_table: Arc<Table>, referenced_column_id: ColumnId, pos_list: Arc<PosList>) -> Result<Self> {
		let r#type = referenced_table.column_type(referenced_column_id)?;
		Ok(Self {
			referenced_table,
			referenced_column_id,
			r#type,
			pos_list,
		})
	}

	pub fn referenced_table(&self) -> &Arc<Table> {
		&self.referenced_table
	}

	pub fn referenced_column_id(&self) -> ColumnId {
		self.referenced_column_id
	}

	pub fn pos_list(&self) -> &Arc<PosList> {
		&self.pos_list
	}

	pub fn get_type(&self) -> Type {
		self.r#type
	}

	pub fn row_id(&self, offset: usize) -> Result<RowId> {
		self.pos_list.get(offset).copied().ok_or(Error::OutOfBounds {
			what: Extent::Row,
			index: offset as u64,
			len: self.pos_list.len() as u64,
		})
	}

	pub fn get(&self, offset: usize) -> Result<Value> {
		let row = self.row_id(offset)?;
		let chunk = self.referenced_table.get_chunk(row.chunk_id)?;
		let segment = chunk.get_segment(self.referenced_column_id)?;
		segment.get(row.chunk_offset as usize)
	}

	pub fn len(&self) -> usize {
		self.pos_list.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pos_list.is_empty()
	}
}

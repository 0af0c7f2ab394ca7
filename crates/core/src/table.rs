// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tessera_type::{ChunkId, ColumnId, Error, Extent, Result, Type, Value};
use tracing::{debug, instrument};

use crate::{
	chunk::Chunk,
	config::TableConfig,
	resolve::check_convertible,
	segment::{DictionaryData, Segment},
};

/// Name and type of one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
}

/// An ordered sequence of chunks sharing one schema.
///
/// Appends always target the last chunk; once it holds `chunk_size` rows a new
/// chunk is started. Every chunk but the last is therefore full, unless the
/// chunk was emplaced as a precomputed result.
pub struct Table {
	config: TableConfig,
	columns: RwLock<Vec<ColumnDef>>,
	chunks: RwLock<Vec<Arc<Chunk>>>,
	compression: Mutex<()>,
}

impl Table {
	pub fn new(config: TableConfig) -> Self {
		Self {
			config,
			columns: RwLock::new(Vec::new()),
			chunks: RwLock::new(vec![Arc::new(Chunk::new())]),
			compression: Mutex::new(()),
		}
	}

	pub fn with_chunk_size(chunk_size: u32) -> Self {
		Self::new(TableConfig::new(chunk_size))
	}

	/// Adds a column of the type registered as `type_name`. Only allowed
	/// before the first row is appended.
	#[instrument(name = "table::add_column", level = "debug", skip(self))]
	pub fn add_column(&self, name: &str, type_name: &str) -> Result<()> {
		let ty: Type = type_name.parse()?;
		self.add_column_of_type(name, ty)
	}

	pub fn add_column_of_type(&self, name: &str, ty: Type) -> Result<()> {
		let mut columns = self.columns.write();
		let chunks = self.chunks.read();

		let rows = chunks.iter().map(|chunk| chunk.size() as u64).sum::<u64>();
		if rows > 0 || chunks.len() != 1 {
			return Err(Error::ColumnAfterRows {
				name: name.to_string(),
				rows,
			});
		}

		chunks[0].add_segment(Segment::values(ty));
		columns.push(ColumnDef {
			name: name.to_string(),
			ty,
		});
		Ok(())
	}

	/// Records a column without touching any chunk. Used for tables whose
	/// chunks are built elsewhere and emplaced.
	pub fn add_column_definition(&self, name: &str, ty: Type) {
		self.columns.write().push(ColumnDef {
			name: name.to_string(),
			ty,
		});
	}

	/// Appends a row to the last chunk, starting a new chunk when it is full.
	pub fn append(&self, row: &[Value]) -> Result<()> {
		let types = self.column_types();
		if types.is_empty() {
			return Err(Error::NoColumns);
		}
		if row.len() != types.len() {
			return Err(Error::ArityMismatch {
				expected: types.len(),
				actual: row.len(),
			});
		}
		for (ty, value) in types.iter().zip(row) {
			check_convertible(*ty, value)?;
		}

		let capacity = self.config.capacity();
		loop {
			let chunk = {
				let mut chunks = self.chunks.write();
				match chunks.last() {
					Some(last) if last.size() < capacity => Arc::clone(last),
					_ => {
						let chunk = Arc::new(Chunk::with_types(&types));
						chunks.push(Arc::clone(&chunk));
						debug!(chunk = chunks.len() - 1, "started new chunk");
						chunk
					}
				}
			};

			// another appender may have filled the chunk after the lock was released
			if chunk.append_within(row, capacity)? {
				return Ok(());
			}
		}
	}

	/// Replaces the value segments of a full chunk with dictionary segments.
	#[instrument(name = "table::compress_chunk", level = "debug", skip(self))]
	pub fn compress_chunk(&self, chunk_id: ChunkId) -> Result<()> {
		let _guard = self.compression.lock();
		let chunk = self.get_chunk(chunk_id)?;

		let size = chunk.size();
		let capacity = self.config.capacity();
		if size < capacity {
			return Err(Error::ChunkNotFull {
				chunk: chunk_id.0,
				size,
				capacity,
			});
		}
		if chunk.is_compression_started() {
			return Err(Error::CompressionStarted(chunk_id.0));
		}

		let compressed = chunk
			.segments()
			.iter()
			.map(|segment| match segment {
				Segment::Value(data) => Ok(Segment::Dictionary(DictionaryData::compress(data))),
				other => Err(Error::UnsupportedSegment {
					segment: other.kind(),
					reason: "only value segments can be compressed".to_string(),
				}),
			})
			.collect::<Result<Vec<_>>>()?;

		if !chunk.mark_compression_started() {
			return Err(Error::CompressionStarted(chunk_id.0));
		}
		chunk.replace_segments(compressed);
		debug!(chunk = chunk_id.0, rows = size, "compressed chunk");
		Ok(())
	}

	/// Adds a prebuilt chunk. A table holding a single empty chunk has it replaced.
	#[instrument(name = "table::emplace_chunk", level = "debug", skip(self, chunk), fields(rows = chunk.size()))]
	pub fn emplace_chunk(&self, chunk: Chunk) {
		let mut chunks = self.chunks.write();
		if chunks.len() == 1 && chunks[0].is_empty() {
			chunks[0] = Arc::new(chunk);
		} else {
			chunks.push(Arc::new(chunk));
		}
	}

	pub fn column_count(&self) -> u16 {
		self.columns.read().len() as u16
	}

	pub fn row_count(&self) -> u64 {
		self.chunks.read().iter().map(|chunk| chunk.size() as u64).sum()
	}

	pub fn chunk_count(&self) -> u32 {
		self.chunks.read().len() as u32
	}

	pub fn chunk_size(&self) -> u32 {
		self.config.chunk_size
	}

	pub fn column_name(&self, column: ColumnId) -> Result<String> {
		self.column(column).map(|def| def.name)
	}

	pub fn column_type(&self, column: ColumnId) -> Result<Type> {
		self.column(column).map(|def| def.ty)
	}

	pub fn column_names(&self) -> Vec<String> {
		self.columns.read().iter().map(|def| def.name.clone()).collect()
	}

	pub fn column_types(&self) -> Vec<Type> {
		self.columns.read().iter().map(|def| def.ty).collect()
	}

	pub fn columns(&self) -> Vec<ColumnDef> {
		self.columns.read().clone()
	}

	pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId> {
		self.columns
			.read()
			.iter()
			.position(|def| def.name == name)
			.map(|index| ColumnId(index as u16))
			.ok_or_else(|| Error::ColumnNotFound(name.to_string()))
	}

	pub fn get_chunk(&self, chunk_id: ChunkId) -> Result<Arc<Chunk>> {
		let chunks = self.chunks.read();
		chunks.get(chunk_id.index()).cloned().ok_or(Error::OutOfBounds {
			what: Extent::Chunk,
			index: chunk_id.0 as u64,
			len: chunks.len() as u64,
		})
	}

	/// A snapshot of the current chunk list.
	pub fn chunks(&self) -> Vec<Arc<Chunk>> {
		self.chunks.read().clone()
	}

	fn column(&self, column: ColumnId) -> Result<ColumnDef> {
		let columns = self.columns.read();
		columns.get(column.index()).cloned().ok_or(Error::OutOfBounds {
			what: Extent::Column,
			index: column.0 as u64,
			len: columns.len() as u64,
		})
	}
}

impl Default for Table {
	fn default() -> Self {
		Self::new(TableConfig::default())
	}
}

impl Debug for Table {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Table")
			.field("columns", &*self.columns.read())
			.field("chunk_size", &self.config.chunk_size)
			.field("chunks", &self.chunk_count())
			.field("rows", &self.row_count())
			.finish()
	}
}

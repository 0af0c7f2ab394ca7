// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera Contributors

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Offset of a row inside its chunk.
pub type ChunkOffset = u32;

/// Ordered sequence of row locations into one table.
pub type PosList = Vec<RowId>;

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ChunkId(pub u32);

impl ChunkId {
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl From<u32> for ChunkId {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

impl Display for ChunkId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ColumnId(pub u16);

impl ColumnId {
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl From<u16> for ColumnId {
	fn from(value: u16) -> Self {
		Self(value)
	}
}

impl Display for ColumnId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Index of a value inside a dictionary segment's sorted dictionary.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ValueId(pub u64);

impl ValueId {
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

impl From<u64> for ValueId {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

impl Display for ValueId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Location of a single row: the chunk it lives in and its offset inside that chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId {
	pub chunk_id: ChunkId,
	pub chunk_offset: ChunkOffset,
}

impl RowId {
	pub fn new(chunk_id: u32, chunk_offset: ChunkOffset) -> Self {
		Self {
			chunk_id: ChunkId(chunk_id),
			chunk_offset,
		}
	}
}

impl Display for RowId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "({}, {})", self.chunk_id, self.chunk_offset)
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use serde::{Deserialize, Serialize};

/// Chunk capacity used when none is configured; effectively a single unbounded chunk.
pub const DEFAULT_CHUNK_SIZE: u32 = u32::MAX - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
	/// Maximum number of rows per chunk. Zero is treated as one.
	pub chunk_size: u32,
}

impl TableConfig {
	pub fn new(chunk_size: u32) -> Self {
		Self {
			chunk_size,
		}
	}

	/// The capacity every chunk of the table is filled to.
	pub fn capacity(&self) -> u32 {
		self.chunk_size.max(1)
	}
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			chunk_size: DEFAULT_CHUNK_SIZE,
		}
	}
}

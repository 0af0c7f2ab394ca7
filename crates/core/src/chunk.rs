// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tessera_type::{ChunkOffset, ColumnId, Error, Extent, Result, Type, Value};

use crate::segment::Segment;

/// A horizontal slice of a table holding one segment per column.
///
/// All segments of a chunk have the same length, which is the chunk's size.
#[derive(Debug, Default)]
pub struct Chunk {
	segments: RwLock<Vec<Segment>>,
	compression_started: AtomicBool,
}

impl Chunk {
	pub fn new() -> Self {
		Self::default()
	}

	/// A chunk with one empty value segment per type.
	pub fn with_types(types: &[Type]) -> Self {
		Self::from_segments(types.iter().copied().map(Segment::values).collect())
	}

	pub fn from_segments(segments: Vec<Segment>) -> Self {
		let chunk = Self {
			segments: RwLock::new(segments),
			compression_started: AtomicBool::new(false),
		};
		chunk.debug_assert_equal_lengths();
		chunk
	}

	pub fn add_segment(&self, segment: Segment) {
		self.segments.write().push(segment);
		self.debug_assert_equal_lengths();
	}

	/// Appends one value per column. Every value is checked before any segment
	/// is touched, so a failed append leaves the chunk unchanged.
	pub fn append(&self, row: &[Value]) -> Result<()> {
		let mut segments = self.segments.write();
		append_row(&mut segments, row)
	}

	/// Appends the row unless the chunk already holds `capacity` rows.
	pub(crate) fn append_within(&self, row: &[Value], capacity: u32) -> Result<bool> {
		let mut segments = self.segments.write();
		if rows_in(&segments) >= capacity {
			return Ok(false);
		}
		append_row(&mut segments, row)?;
		Ok(true)
	}

	pub fn get_segment(&self, column: ColumnId) -> Result<MappedRwLockReadGuard<'_, Segment>> {
		let segments = self.segments.read();
		let len = segments.len();
		RwLockReadGuard::try_map(segments, |segments| segments.get(column.index())).map_err(|_| Error::OutOfBounds {
			what: Extent::Column,
			index: column.0 as u64,
			len: len as u64,
		})
	}

	pub fn segments(&self) -> RwLockReadGuard<'_, Vec<Segment>> {
		self.segments.read()
	}

	pub fn column_count(&self) -> u16 {
		self.segments.read().len() as u16
	}

	pub fn size(&self) -> ChunkOffset {
		rows_in(&self.segments.read())
	}

	pub fn is_empty(&self) -> bool {
		self.size() == 0
	}

	pub fn is_compression_started(&self) -> bool {
		self.compression_started.load(Ordering::Acquire)
	}

	/// Flags the chunk for compression. Returns `false` if it was already flagged.
	pub fn mark_compression_started(&self) -> bool {
		self.compression_started.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_ok()
	}

	pub(crate) fn replace_segments(&self, segments: Vec<Segment>) {
		*self.segments.write() = segments;
		self.debug_assert_equal_lengths();
	}

	fn debug_assert_equal_lengths(&self) {
		if cfg!(debug_assertions) {
			let segments = self.segments.read();
			if let Some(first) = segments.first() {
				debug_assert!(
					segments.iter().all(|segment| segment.len() == first.len()),
					"segments of a chunk must have equal length"
				);
			}
		}
	}
}

fn rows_in(segments: &[Segment]) -> ChunkOffset {
	segments.first().map_or(0, |segment| segment.len() as ChunkOffset)
}

fn append_row(segments: &mut [Segment], row: &[Value]) -> Result<()> {
	if segments.is_empty() {
		return Err(Error::NoColumns);
	}
	if row.len() != segments.len() {
		return Err(Error::ArityMismatch {
			expected: segments.len(),
			actual: row.len(),
		});
	}

	for (segment, value) in segments.iter().zip(row) {
		segment.accepts(value)?;
	}
	for (segment, value) in segments.iter_mut().zip(row) {
		segment.append(value)?;
	}
	Ok(())
}

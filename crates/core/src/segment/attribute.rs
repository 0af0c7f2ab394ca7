// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use tessera_type::{Error, Extent, Result, ValueId};

/// Storage width of the ids in an [`AttributeVector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeVectorWidth {
	U8,
	U16,
	U32,
	U64,
}

impl AttributeVectorWidth {
	/// The narrowest width that can address `distinct` ids while keeping its
	/// maximum free as the invalid sentinel.
	pub fn fitting(distinct: usize) -> Self {
		let distinct = distinct as u64;
		if distinct <= u8::MAX as u64 {
			AttributeVectorWidth::U8
		} else if distinct <= u16::MAX as u64 {
			AttributeVectorWidth::U16
		} else if distinct <= u32::MAX as u64 {
			AttributeVectorWidth::U32
		} else {
			AttributeVectorWidth::U64
		}
	}

	pub fn invalid_value_id(self) -> ValueId {
		match self {
			AttributeVectorWidth::U8 => ValueId(u8::MAX as u64),
			AttributeVectorWidth::U16 => ValueId(u16::MAX as u64),
			AttributeVectorWidth::U32 => ValueId(u32::MAX as u64),
			AttributeVectorWidth::U64 => ValueId(u64::MAX),
		}
	}
}

/// Fixed-width ids, one per row of a dictionary segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeVector {
	U8(Vec<u8>),
	U16(Vec<u16>),
	U32(Vec<u32>),
	U64(Vec<u64>),
}

impl AttributeVector {
	pub fn new(width: AttributeVectorWidth) -> Self {
		Self::with_capacity(width, 0)
	}

	pub fn with_capacity(width: AttributeVectorWidth, capacity: usize) -> Self {
		match width {
			AttributeVectorWidth::U8 => AttributeVector::U8(Vec::with_capacity(capacity)),
			AttributeVectorWidth::U16 => AttributeVector::U16(Vec::with_capacity(capacity)),
			AttributeVectorWidth::U32 => AttributeVector::U32(Vec::with_capacity(capacity)),
			AttributeVectorWidth::U64 => AttributeVector::U64(Vec::with_capacity(capacity)),
		}
	}

	pub fn width(&self) -> AttributeVectorWidth {
		match self {
			AttributeVector::U8(_) => AttributeVectorWidth::U8,
			AttributeVector::U16(_) => AttributeVectorWidth::U16,
			AttributeVector::U32(_) => AttributeVectorWidth::U32,
			AttributeVector::U64(_) => AttributeVectorWidth::U64,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			AttributeVector::U8(ids) => ids.len(),
			AttributeVector::U16(ids) => ids.len(),
			AttributeVector::U32(ids) => ids.len(),
			AttributeVector::U64(ids) => ids.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, offset: usize) -> Option<ValueId> {
		let id = match self {
			AttributeVector::U8(ids) => *ids.get(offset)? as u64,
			AttributeVector::U16(ids) => *ids.get(offset)? as u64,
			AttributeVector::U32(ids) => *ids.get(offset)? as u64,
			AttributeVector::U64(ids) => *ids.get(offset)?,
		};
		Some(ValueId(id))
	}

	/// Appends an id; ids at or above the width's sentinel are rejected.
	pub fn push(&mut self, id: ValueId) -> Result<()> {
		self.check(id)?;
		match self {
			AttributeVector::U8(ids) => ids.push(id.0 as u8),
			AttributeVector::U16(ids) => ids.push(id.0 as u16),
			AttributeVector::U32(ids) => ids.push(id.0 as u32),
			AttributeVector::U64(ids) => ids.push(id.0),
		}
		Ok(())
	}

	/// Appends an id already known to fit below the sentinel.
	pub(crate) fn push_fitted(&mut self, id: usize) {
		debug_assert!((id as u64) < self.width().invalid_value_id().0);
		match self {
			AttributeVector::U8(ids) => ids.push(id as u8),
			AttributeVector::U16(ids) => ids.push(id as u16),
			AttributeVector::U32(ids) => ids.push(id as u32),
			AttributeVector::U64(ids) => ids.push(id as u64),
		}
	}

	pub fn set(&mut self, offset: usize, id: ValueId) -> Result<()> {
		self.check(id)?;
		let len = self.len();
		let out_of_bounds = || Error::OutOfBounds {
			what: Extent::Row,
			index: offset as u64,
			len: len as u64,
		};
		match self {
			AttributeVector::U8(ids) => *ids.get_mut(offset).ok_or_else(out_of_bounds)? = id.0 as u8,
			AttributeVector::U16(ids) => *ids.get_mut(offset).ok_or_else(out_of_bounds)? = id.0 as u16,
			AttributeVector::U32(ids) => *ids.get_mut(offset).ok_or_else(out_of_bounds)? = id.0 as u32,
			AttributeVector::U64(ids) => *ids.get_mut(offset).ok_or_else(out_of_bounds)? = id.0,
		}
		Ok(())
	}

	pub fn iter(&self) -> impl Iterator<Item = ValueId> + '_ {
		(0..self.len()).filter_map(|offset| self.get(offset))
	}

	fn check(&self, id: ValueId) -> Result<()> {
		let invalid = self.width().invalid_value_id();
		if id >= invalid {
			return Err(Error::OutOfBounds {
				what: Extent::ValueId,
				index: id.0,
				len: invalid.0,
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_fitting_width() {
		assert_eq!(AttributeVectorWidth::fitting(0), AttributeVectorWidth::U8);
		assert_eq!(AttributeVectorWidth::fitting(255), AttributeVectorWidth::U8);
		assert_eq!(AttributeVectorWidth::fitting(256), AttributeVectorWidth::U16);
		assert_eq!(AttributeVectorWidth::fitting(65_535), AttributeVectorWidth::U16);
		assert_eq!(AttributeVectorWidth::fitting(65_536), AttributeVectorWidth::U32);
		assert_eq!(AttributeVectorWidth::fitting(u32::MAX as usize + 1), AttributeVectorWidth::U64);
	}

	#[test]
	fn test_sentinel_is_width_max() {
		assert_eq!(AttributeVectorWidth::U8.invalid_value_id(), ValueId(255));
		assert_eq!(AttributeVectorWidth::U16.invalid_value_id(), ValueId(65_535));
	}

	#[test]
	fn test_push_get_set() {
		let mut ids = AttributeVector::new(AttributeVectorWidth::U16);
		ids.push(ValueId(3)).unwrap();
		ids.push(ValueId(300)).unwrap();

		assert_eq!(ids.len(), 2);
		assert_eq!(ids.get(1), Some(ValueId(300)));
		assert_eq!(ids.get(2), None);

		ids.set(0, ValueId(7)).unwrap();
		assert_eq!(ids.iter().collect::<Vec<_>>(), vec![ValueId(7), ValueId(300)]);
		assert!(ids.set(5, ValueId(1)).is_err());
	}

	#[test]
	fn test_rejects_sentinel() {
		let mut ids = AttributeVector::new(AttributeVectorWidth::U8);
		let err = ids.push(ValueId(255)).unwrap_err();
		assert!(matches!(
			err,
			Error::OutOfBounds {
				what: Extent::ValueId,
				..
			}
		));
		assert!(ids.is_empty());
	}
}

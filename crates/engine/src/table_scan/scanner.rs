// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::sync::Arc;

use tessera_core::{Chunk, ColumnType, DictionarySegment, ReferenceSegment, Segment, TypeVisitor, ValueData};
use tessera_type::{ChunkId, ChunkOffset, Error, Extent, Result, Type, Value, ValueId};

use super::ScanType;

/// Finds the offsets of the rows of one segment that satisfy a scan predicate.
pub(crate) trait SegmentScan: Send + Sync {
	fn scan(&self, segment: &Segment) -> Result<Vec<ChunkOffset>>;
}

/// Instantiates the typed scan for the scanned column's type.
pub(crate) struct ScanFactory<'a> {
	pub scan_type: ScanType,
	pub search_value: &'a Value,
}

impl TypeVisitor for ScanFactory<'_> {
	type Output = Result<Box<dyn SegmentScan>>;

	fn visit<T: ColumnType>(self) -> Self::Output {
		let search_value = T::try_from_value(self.search_value)?;
		Ok(Box::new(TypedScan {
			scan_type: self.scan_type,
			compare: self.scan_type.comparator::<T>(),
			search_value,
		}))
	}
}

struct TypedScan<T> {
	scan_type: ScanType,
	compare: fn(&T, &T) -> bool,
	search_value: T,
}

impl<T: ColumnType> SegmentScan for TypedScan<T> {
	fn scan(&self, segment: &Segment) -> Result<Vec<ChunkOffset>> {
		match segment {
			Segment::Value(data) => self.scan_values(data),
			Segment::Dictionary(data) => {
				let dictionary = data.typed::<T>().ok_or_else(|| self.wrong_type(segment.kind(), data.get_type()))?;
				Ok(self.scan_dictionary(dictionary))
			}
			Segment::Reference(reference) => self.scan_reference(reference),
		}
	}
}

impl<T: ColumnType> TypedScan<T> {
	fn scan_values(&self, data: &ValueData) -> Result<Vec<ChunkOffset>> {
		let values = data.typed::<T>().ok_or_else(|| self.wrong_type("value", data.get_type()))?;
		Ok(values
			.values()
			.iter()
			.enumerate()
			.filter(|(_, value)| (self.compare)(value, &self.search_value))
			.map(|(offset, _)| offset as ChunkOffset)
			.collect())
	}

	/// Compares value ids instead of values; the dictionary is sorted, so every
	/// predicate maps to a contiguous id range or its complement.
	fn scan_dictionary(&self, segment: &DictionarySegment<T>) -> Vec<ChunkOffset> {
		let predicate = self.id_predicate(segment);
		segment
			.attribute_vector()
			.iter()
			.enumerate()
			.filter(|(_, id)| predicate.matches(*id))
			.map(|(offset, _)| offset as ChunkOffset)
			.collect()
	}

	fn id_predicate(&self, segment: &DictionarySegment<T>) -> IdPredicate {
		let invalid = segment.invalid_value_id();
		let lower = segment.lower_bound(&self.search_value);
		let upper = segment.upper_bound(&self.search_value);
		let exact = lower != invalid && segment.value_by_value_id(lower).is_ok_and(|value| *value == self.search_value);

		match self.scan_type {
			ScanType::Equals if exact => IdPredicate::Equals(lower),
			ScanType::Equals => IdPredicate::None,
			ScanType::NotEquals if exact => IdPredicate::NotEquals(lower),
			ScanType::NotEquals => IdPredicate::All,
			ScanType::LessThan if lower == invalid => IdPredicate::All,
			ScanType::LessThan => IdPredicate::Below(lower),
			ScanType::LessThanEquals if upper == invalid => IdPredicate::All,
			ScanType::LessThanEquals => IdPredicate::Below(upper),
			ScanType::GreaterThan if upper == invalid => IdPredicate::None,
			ScanType::GreaterThan => IdPredicate::From(upper),
			ScanType::GreaterThanEquals if lower == invalid => IdPredicate::None,
			ScanType::GreaterThanEquals => IdPredicate::From(lower),
		}
	}

	/// Follows every position into the referenced table. Offsets refer to the
	/// reference segment itself.
	fn scan_reference(&self, reference: &ReferenceSegment) -> Result<Vec<ChunkOffset>> {
		let table = reference.referenced_table();
		let column = reference.referenced_column_id();

		let mut current: Option<(ChunkId, Arc<Chunk>)> = None;
		let mut offsets = Vec::new();
		for (offset, row) in reference.pos_list().iter().enumerate() {
			let chunk = match &current {
				Some((id, chunk)) if *id == row.chunk_id => Arc::clone(chunk),
				_ => {
					let chunk = table.get_chunk(row.chunk_id)?;
					current = Some((row.chunk_id, Arc::clone(&chunk)));
					chunk
				}
			};

			let segment = chunk.get_segment(column)?;
			let row_offset = row.chunk_offset as usize;
			let value = match &*segment {
				Segment::Value(data) => {
					data.typed::<T>().ok_or_else(|| self.wrong_type("value", data.get_type()))?.get(row_offset)
				}
				Segment::Dictionary(data) => {
					data.typed::<T>().ok_or_else(|| self.wrong_type("dictionary", data.get_type()))?.get(row_offset)
				}
				Segment::Reference(_) => {
					return Err(Error::UnsupportedSegment {
						segment: segment.kind(),
						reason: "a reference segment may not point at another reference segment".to_string(),
					});
				}
			};
			let value = value.ok_or_else(|| Error::OutOfBounds {
				what: Extent::Row,
				index: row_offset as u64,
				len: segment.len() as u64,
			})?;

			if (self.compare)(value, &self.search_value) {
				offsets.push(offset as ChunkOffset);
			}
		}
		Ok(offsets)
	}

	fn wrong_type(&self, segment: &'static str, found: Type) -> Error {
		Error::UnsupportedSegment {
			segment,
			reason: format!("expected {} values, found {}", T::TYPE, found),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdPredicate {
	All,
	None,
	Equals(ValueId),
	NotEquals(ValueId),
	Below(ValueId),
	From(ValueId),
}

impl IdPredicate {
	fn matches(self, id: ValueId) -> bool {
		match self {
			IdPredicate::All => true,
			IdPredicate::None => false,
			IdPredicate::Equals(expected) => id == expected,
			IdPredicate::NotEquals(expected) => id != expected,
			IdPredicate::Below(bound) => id < bound,
			IdPredicate::From(bound) => id >= bound,
		}
	}
}

#[cfg(test)]
mod tests {
	use tessera_core::{DictionaryData, resolve};

	use super::*;

	fn dictionary(values: &[i32]) -> Segment {
		let mut data = ValueData::new(Type::Int4);
		for value in values {
			data.append(&Value::Int4(*value)).unwrap();
		}
		Segment::Dictionary(DictionaryData::compress(&data))
	}

	fn brute_force(values: &[i32], scan_type: ScanType, search: i32) -> Vec<ChunkOffset> {
		let compare = scan_type.comparator::<i32>();
		values
			.iter()
			.enumerate()
			.filter(|(_, value)| compare(value, &search))
			.map(|(offset, _)| offset as ChunkOffset)
			.collect()
	}

	#[test]
	fn test_dictionary_scan_matches_brute_force() {
		let values = [4, 8, 8, 15, 16, 23, 42, 4, 15, 42];
		let segment = dictionary(&values);

		for scan_type in ScanType::ALL {
			for search in [0, 4, 5, 8, 15, 20, 42, 50] {
				let search_value = Value::Int4(search);
				let scan = resolve(
					Type::Int4,
					ScanFactory {
						scan_type,
						search_value: &search_value,
					},
				)
				.unwrap();
				assert_eq!(
					scan.scan(&segment).unwrap(),
					brute_force(&values, scan_type, search),
					"{scan_type} {search}"
				);
			}
		}
	}

	#[test]
	fn test_search_value_must_convert() {
		let search_value = Value::utf8("4");
		let result = resolve(
			Type::Int4,
			ScanFactory {
				scan_type: ScanType::Equals,
				search_value: &search_value,
			},
		);
		assert!(matches!(result, Err(Error::TypeMismatch { .. })));
	}

	#[test]
	fn test_wrong_segment_type() {
		let search_value = Value::Int8(4);
		let scan = resolve(
			Type::Int8,
			ScanFactory {
				scan_type: ScanType::Equals,
				search_value: &search_value,
			},
		)
		.unwrap();

		let err = scan.scan(&dictionary(&[4])).unwrap_err();
		assert!(matches!(
			err,
			Error::UnsupportedSegment {
				segment: "dictionary",
				..
			}
		));
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use tessera_type::{Error, Extent, NativeType, OrderedF32, OrderedF64, Result, Type, Value, ValueId};

use super::{
	attribute::{AttributeVector, AttributeVectorWidth},
	value::{ValueData, ValueSegment},
};
use crate::resolve::ColumnType;

/// Immutable dictionary encoding of a value segment: a sorted set of the
/// distinct values plus one id per row pointing into it.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionarySegment<T> {
	dictionary: Vec<T>,
	attribute_vector: AttributeVector,
}

impl<T: NativeType> DictionarySegment<T> {
	pub fn from_values(segment: &ValueSegment<T>) -> Self {
		let mut dictionary = segment.values().to_vec();
		dictionary.sort_unstable();
		dictionary.dedup();

		let width = AttributeVectorWidth::fitting(dictionary.len());
		let mut attribute_vector = AttributeVector::with_capacity(width, segment.len());
		for value in segment.values() {
			// every value is present in the dictionary
			let (Ok(id) | Err(id)) = dictionary.binary_search(value);
			attribute_vector.push_fitted(id);
		}

		Self {
			dictionary,
			attribute_vector,
		}
	}

	pub fn dictionary(&self) -> &[T] {
		&self.dictionary
	}

	pub fn attribute_vector(&self) -> &AttributeVector {
		&self.attribute_vector
	}

	pub fn get(&self, offset: usize) -> Option<&T> {
		let id = self.attribute_vector.get(offset)?;
		self.dictionary.get(id.index())
	}

	pub fn value_by_value_id(&self, id: ValueId) -> Result<&T> {
		self.dictionary.get(id.index()).ok_or(Error::OutOfBounds {
			what: Extent::ValueId,
			index: id.0,
			len: self.dictionary.len() as u64,
		})
	}

	/// First id whose value is not less than `value`, or the invalid id.
	pub fn lower_bound(&self, value: &T) -> ValueId {
		self.bound(self.dictionary.partition_point(|v| v < value))
	}

	/// First id whose value is greater than `value`, or the invalid id.
	pub fn upper_bound(&self, value: &T) -> ValueId {
		self.bound(self.dictionary.partition_point(|v| v <= value))
	}

	pub fn lower_bound_value(&self, value: &Value) -> Result<ValueId> {
		Ok(self.lower_bound(&T::try_from_value(value)?))
	}

	pub fn upper_bound_value(&self, value: &Value) -> Result<ValueId> {
		Ok(self.upper_bound(&T::try_from_value(value)?))
	}

	pub fn invalid_value_id(&self) -> ValueId {
		self.attribute_vector.width().invalid_value_id()
	}

	pub fn unique_values_count(&self) -> usize {
		self.dictionary.len()
	}

	pub fn len(&self) -> usize {
		self.attribute_vector.len()
	}

	pub fn is_empty(&self) -> bool {
		self.attribute_vector.is_empty()
	}

	fn bound(&self, index: usize) -> ValueId {
		if index == self.dictionary.len() {
			self.invalid_value_id()
		} else {
			ValueId(index as u64)
		}
	}
}

/// A dictionary segment of any registered type.
#[derive(Debug, Clone, PartialEq)]
pub enum DictionaryData {
	Int4(DictionarySegment<i32>),
	Int8(DictionarySegment<i64>),
	Float4(DictionarySegment<OrderedF32>),
	Float8(DictionarySegment<OrderedF64>),
	Utf8(DictionarySegment<String>),
}

impl DictionaryData {
	pub fn compress(data: &ValueData) -> Self {
		match data {
			ValueData::Int4(segment) => DictionaryData::Int4(DictionarySegment::from_values(segment)),
			ValueData::Int8(segment) => DictionaryData::Int8(DictionarySegment::from_values(segment)),
			ValueData::Float4(segment) => DictionaryData::Float4(DictionarySegment::from_values(segment)),
			ValueData::Float8(segment) => DictionaryData::Float8(DictionarySegment::from_values(segment)),
			ValueData::Utf8(segment) => DictionaryData::Utf8(DictionarySegment::from_values(segment)),
		}
	}

	pub fn get_type(&self) -> Type {
		match self {
			DictionaryData::Int4(_) => Type::Int4,
			DictionaryData::Int8(_) => Type::Int8,
			DictionaryData::Float4(_) => Type::Float4,
			DictionaryData::Float8(_) => Type::Float8,
			DictionaryData::Utf8(_) => Type::Utf8,
		}
	}

	pub fn len(&self) -> usize {
		with_typed!(DictionaryData, self, segment => segment.len())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, offset: usize) -> Result<Value> {
		let len = self.len();
		with_typed!(DictionaryData, self, segment => segment.get(offset).cloned().map(NativeType::into_value))
			.ok_or(Error::OutOfBounds {
				what: Extent::Row,
				index: offset as u64,
				len: len as u64,
			})
	}

	pub fn unique_values_count(&self) -> usize {
		with_typed!(DictionaryData, self, segment => segment.unique_values_count())
	}

	pub fn attribute_vector(&self) -> &AttributeVector {
		with_typed!(DictionaryData, self, segment => segment.attribute_vector())
	}

	pub fn typed<T: ColumnType>(&self) -> Option<&DictionarySegment<T>> {
		T::dictionary_segment(self)
	}
}

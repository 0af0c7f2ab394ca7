// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

mod attribute;
mod dictionary;
mod reference;
mod value;

pub use attribute::{AttributeVector, AttributeVectorWidth};
pub use dictionary::{DictionaryData, DictionarySegment};
pub use reference::ReferenceSegment;
use tessera_type::{Error, Result, Type, Value};
pub use value::{ValueData, ValueSegment};

/// Storage of one column inside one chunk.
#[derive(Debug, Clone)]
pub enum Segment {
	Value(ValueData),
	Dictionary(DictionaryData),
	Reference(ReferenceSegment),
}

impl Segment {
	/// An empty value segment of `ty`.
	pub fn values(ty: Type) -> Self {
		Segment::Value(ValueData::new(ty))
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Segment::Value(_) => "value",
			Segment::Dictionary(_) => "dictionary",
			Segment::Reference(_) => "reference",
		}
	}

	pub fn get_type(&self) -> Type {
		match self {
			Segment::Value(data) => data.get_type(),
			Segment::Dictionary(data) => data.get_type(),
			Segment::Reference(segment) => segment.get_type(),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Segment::Value(data) => data.len(),
			Segment::Dictionary(data) => data.len(),
			Segment::Reference(segment) => segment.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, offset: usize) -> Result<Value> {
		match self {
			Segment::Value(data) => data.get(offset),
			Segment::Dictionary(data) => data.get(offset),
			Segment::Reference(segment) => segment.get(offset),
		}
	}

	/// Fails if `value` could not be appended, without appending it.
	pub fn accepts(&self, value: &Value) -> Result<()> {
		match self {
			Segment::Value(data) => data.accepts(value),
			_ => Err(Error::Immutable {
				segment: self.kind(),
			}),
		}
	}

	pub fn append(&mut self, value: &Value) -> Result<()> {
		match self {
			Segment::Value(data) => data.append(value),
			_ => Err(Error::Immutable {
				segment: self.kind(),
			}),
		}
	}
}

impl From<ValueData> for Segment {
	fn from(data: ValueData) -> Self {
		Segment::Value(data)
	}
}

impl From<DictionaryData> for Segment {
	fn from(data: DictionaryData) -> Self {
		Segment::Dictionary(data)
	}
}

impl From<ReferenceSegment> for Segment {
	fn from(segment: ReferenceSegment) -> Self {
		Segment::Reference(segment)
	}
}

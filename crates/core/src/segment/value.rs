// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use tessera_type::{Error, Extent, NativeType, OrderedF32, OrderedF64, Result, Type, Value};

use crate::resolve::{ColumnType, TypeVisitor, check_convertible, resolve};

/// Dense, appendable storage of one native type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSegment<T> {
	values: Vec<T>,
}

impl<T: NativeType> ValueSegment<T> {
	pub fn new() -> Self {
		Self {
			values: Vec::new(),
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			values: Vec::with_capacity(capacity),
		}
	}

	pub fn values(&self) -> &[T] {
		&self.values
	}

	pub fn get(&self, offset: usize) -> Option<&T> {
		self.values.get(offset)
	}

	pub fn push(&mut self, value: T) {
		self.values.push(value);
	}

	/// Converts `value` to `T` and appends it.
	pub fn append(&mut self, value: &Value) -> Result<()> {
		self.values.push(T::try_from_value(value)?);
		Ok(())
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl<T: NativeType> Default for ValueSegment<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: NativeType> From<Vec<T>> for ValueSegment<T> {
	fn from(values: Vec<T>) -> Self {
		Self {
			values,
		}
	}
}

/// A value segment of any registered type.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
	Int4(ValueSegment<i32>),
	Int8(ValueSegment<i64>),
	Float4(ValueSegment<OrderedF32>),
	Float8(ValueSegment<OrderedF64>),
	Utf8(ValueSegment<String>),
}

impl ValueData {
	pub fn new(ty: Type) -> Self {
		struct Empty;

		impl TypeVisitor for Empty {
			type Output = ValueData;

			fn visit<T: ColumnType>(self) -> ValueData {
				T::wrap_values(ValueSegment::new())
			}
		}

		resolve(ty, Empty)
	}

	pub fn get_type(&self) -> Type {
		match self {
			ValueData::Int4(_) => Type::Int4,
			ValueData::Int8(_) => Type::Int8,
			ValueData::Float4(_) => Type::Float4,
			ValueData::Float8(_) => Type::Float8,
			ValueData::Utf8(_) => Type::Utf8,
		}
	}

	pub fn len(&self) -> usize {
		with_typed!(ValueData, self, segment => segment.len())
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get(&self, offset: usize) -> Result<Value> {
		let len = self.len();
		with_typed!(ValueData, self, segment => segment.get(offset).cloned().map(NativeType::into_value))
			.ok_or(Error::OutOfBounds {
				what: Extent::Row,
				index: offset as u64,
				len: len as u64,
			})
	}

	/// Fails if `value` could not be appended to this segment.
	pub fn accepts(&self, value: &Value) -> Result<()> {
		check_convertible(self.get_type(), value)
	}

	pub fn append(&mut self, value: &Value) -> Result<()> {
		with_typed!(ValueData, self, segment => segment.append(value))
	}

	/// The typed segment, if this segment stores `T`.
	pub fn typed<T: ColumnType>(&self) -> Option<&ValueSegment<T>> {
		T::value_segment(self)
	}
}

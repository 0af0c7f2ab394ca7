// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

//! Runtime-to-compile-time type dispatch.
//!
//! Every column stores one [`Type`] at runtime while segments are generic over
//! their native representation. [`resolve`] is the only place that bridges the
//! two: it maps a [`Type`] to the matching [`ColumnType`] and hands it to a
//! [`TypeVisitor`]. A visitor whose output is a `Box<dyn Trait>` yields a
//! type-erased instance of generic code.

use tessera_type::{NativeType, OrderedF32, OrderedF64, Result, Type, Value};

use crate::segment::{DictionaryData, DictionarySegment, ValueData, ValueSegment};

/// A native scalar that can be stored in a column.
pub trait ColumnType: NativeType {
	fn value_segment(data: &ValueData) -> Option<&ValueSegment<Self>>;

	fn value_segment_mut(data: &mut ValueData) -> Option<&mut ValueSegment<Self>>;

	fn dictionary_segment(data: &DictionaryData) -> Option<&DictionarySegment<Self>>;

	fn wrap_values(segment: ValueSegment<Self>) -> ValueData;

	fn wrap_dictionary(segment: DictionarySegment<Self>) -> DictionaryData;
}

macro_rules! impl_column_type {
	($native:ty, $variant:ident) => {
		impl ColumnType for $native {
			fn value_segment(data: &ValueData) -> Option<&ValueSegment<Self>> {
				match data {
					ValueData::$variant(segment) => Some(segment),
					_ => None,
				}
			}

			fn value_segment_mut(data: &mut ValueData) -> Option<&mut ValueSegment<Self>> {
				match data {
					ValueData::$variant(segment) => Some(segment),
					_ => None,
				}
			}

			fn dictionary_segment(data: &DictionaryData) -> Option<&DictionarySegment<Self>> {
				match data {
					DictionaryData::$variant(segment) => Some(segment),
					_ => None,
				}
			}

			fn wrap_values(segment: ValueSegment<Self>) -> ValueData {
				ValueData::$variant(segment)
			}

			fn wrap_dictionary(segment: DictionarySegment<Self>) -> DictionaryData {
				DictionaryData::$variant(segment)
			}
		}
	};
}

impl_column_type!(i32, Int4);
impl_column_type!(i64, Int8);
impl_column_type!(OrderedF32, Float4);
impl_column_type!(OrderedF64, Float8);
impl_column_type!(String, Utf8);

pub trait TypeVisitor {
	type Output;

	fn visit<T: ColumnType>(self) -> Self::Output;
}

pub fn resolve<V: TypeVisitor>(ty: Type, visitor: V) -> V::Output {
	match ty {
		Type::Int4 => visitor.visit::<i32>(),
		Type::Int8 => visitor.visit::<i64>(),
		Type::Float4 => visitor.visit::<OrderedF32>(),
		Type::Float8 => visitor.visit::<OrderedF64>(),
		Type::Utf8 => visitor.visit::<String>(),
	}
}

/// Like [`resolve`], but looks the type up by its registered name first.
pub fn resolve_name<V: TypeVisitor>(name: &str, visitor: V) -> Result<V::Output> {
	let ty: Type = name.parse()?;
	Ok(resolve(ty, visitor))
}

/// Checks that `value` converts to `ty` without materialising the result.
pub fn check_convertible(ty: Type, value: &Value) -> Result<()> {
	struct Check<'a>(&'a Value);

	impl TypeVisitor for Check<'_> {
		type Output = Result<()>;

		fn visit<T: ColumnType>(self) -> Self::Output {
			if self.0.get_type() == T::TYPE {
				return Ok(());
			}
			T::try_from_value(self.0).map(|_| ())
		}
	}

	resolve(ty, Check(value))
}

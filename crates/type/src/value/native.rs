// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera Contributors

use std::{
	fmt::{Debug, Display},
	hash::Hash,
};

use super::{OrderedF32, OrderedF64, Type, Value};
use crate::{Error, Result};

/// A Rust type that backs one registered scalar [`Type`].
///
/// Conversions from [`Value`] follow one rule set: integers convert to
/// integers when in range, floats convert to integers only when finite,
/// integral and in range, any number converts to a float (rounding allowed,
/// but a finite value must not overflow to infinity), and text never converts
/// to or from a number.
pub trait NativeType: Clone + Debug + Display + Ord + Hash + Send + Sync + 'static {
	const TYPE: Type;

	fn try_from_value(value: &Value) -> Result<Self>;

	fn into_value(self) -> Value;
}

fn mismatch(value: &Value, to: Type) -> Error {
	Error::TypeMismatch {
		value: value.to_string(),
		from: value.get_type(),
		to,
	}
}

fn integral(value: &Value, to: Type) -> Result<i128> {
	let float = match value {
		Value::Int4(v) => return Ok(*v as i128),
		Value::Int8(v) => return Ok(*v as i128),
		Value::Float4(v) => v.value() as f64,
		Value::Float8(v) => v.value(),
		Value::Utf8(_) => return Err(mismatch(value, to)),
	};

	if float.is_finite() && float.fract() == 0.0 {
		Ok(float as i128)
	} else {
		Err(mismatch(value, to))
	}
}

fn float(value: &Value, to: Type) -> Result<f64> {
	match value {
		Value::Int4(v) => Ok(*v as f64),
		Value::Int8(v) => Ok(*v as f64),
		Value::Float4(v) => Ok(v.value() as f64),
		Value::Float8(v) => Ok(v.value()),
		Value::Utf8(_) => Err(mismatch(value, to)),
	}
}

impl NativeType for i32 {
	const TYPE: Type = Type::Int4;

	fn try_from_value(value: &Value) -> Result<Self> {
		match value {
			Value::Int4(v) => Ok(*v),
			_ => i32::try_from(integral(value, Self::TYPE)?).map_err(|_| mismatch(value, Self::TYPE)),
		}
	}

	fn into_value(self) -> Value {
		Value::Int4(self)
	}
}

impl NativeType for i64 {
	const TYPE: Type = Type::Int8;

	fn try_from_value(value: &Value) -> Result<Self> {
		match value {
			Value::Int8(v) => Ok(*v),
			_ => i64::try_from(integral(value, Self::TYPE)?).map_err(|_| mismatch(value, Self::TYPE)),
		}
	}

	fn into_value(self) -> Value {
		Value::Int8(self)
	}
}

impl NativeType for OrderedF32 {
	const TYPE: Type = Type::Float4;

	fn try_from_value(value: &Value) -> Result<Self> {
		match value {
			Value::Float4(v) => Ok(*v),
			_ => {
				let wide = float(value, Self::TYPE)?;
				let narrow = wide as f32;
				if wide.is_finite() && narrow.is_infinite() {
					return Err(mismatch(value, Self::TYPE));
				}
				Ok(OrderedF32::from(narrow))
			}
		}
	}

	fn into_value(self) -> Value {
		Value::Float4(self)
	}
}

impl NativeType for OrderedF64 {
	const TYPE: Type = Type::Float8;

	fn try_from_value(value: &Value) -> Result<Self> {
		match value {
			Value::Float8(v) => Ok(*v),
			_ => Ok(OrderedF64::from(float(value, Self::TYPE)?)),
		}
	}

	fn into_value(self) -> Value {
		Value::Float8(self)
	}
}

impl NativeType for String {
	const TYPE: Type = Type::Utf8;

	fn try_from_value(value: &Value) -> Result<Self> {
		match value {
			Value::Utf8(v) => Ok(v.clone()),
			_ => Err(mismatch(value, Self::TYPE)),
		}
	}

	fn into_value(self) -> Value {
		Value::Utf8(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_identity() {
		assert_eq!(Value::Int4(7).cast::<i32>().unwrap(), 7);
		assert_eq!(Value::utf8("two").cast::<String>().unwrap(), "two");
		assert_eq!(Value::float8(1.25).cast::<OrderedF64>().unwrap().value(), 1.25);
	}

	#[test]
	fn test_integer_widening_and_narrowing() {
		assert_eq!(Value::Int4(-3).cast::<i64>().unwrap(), -3);
		assert_eq!(Value::Int8(1234).cast::<i32>().unwrap(), 1234);

		let err = Value::Int8(i64::MAX).cast::<i32>().unwrap_err();
		assert!(matches!(err, Error::TypeMismatch { to: Type::Int4, .. }));
	}

	#[test]
	fn test_float_to_integer_requires_integral_value() {
		assert_eq!(Value::float8(4.0).cast::<i32>().unwrap(), 4);
		assert_eq!(Value::float4(-8.0f32).cast::<i64>().unwrap(), -8);

		assert!(Value::float8(457.9).cast::<i32>().is_err());
		assert!(Value::float8(f64::NAN).cast::<i64>().is_err());
		assert!(Value::float8(1e300).cast::<i64>().is_err());
	}

	#[test]
	fn test_integer_to_float() {
		assert_eq!(Value::Int4(3).cast::<OrderedF32>().unwrap().value(), 3.0);
		assert_eq!(Value::Int8(1 << 40).cast::<OrderedF64>().unwrap().value(), (1u64 << 40) as f64);
	}

	#[test]
	fn test_float_narrowing() {
		assert_eq!(Value::float8(2.2).cast::<OrderedF32>().unwrap().value(), 2.2f32);
		assert!(Value::float8(1e300).cast::<OrderedF32>().is_err());
		assert!(Value::float8(f64::INFINITY).cast::<OrderedF32>().unwrap().is_infinite());
	}

	#[test]
	fn test_text_never_converts() {
		assert!(Value::utf8("1").cast::<i32>().is_err());
		assert!(Value::utf8("1.5").cast::<OrderedF64>().is_err());
		assert!(Value::Int4(1).cast::<String>().is_err());
	}
}

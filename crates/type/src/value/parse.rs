// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera Contributors

use super::{Type, Value};
use crate::{Error, Result};

impl Value {
	/// Parses a textual literal into a value of the given type.
	///
	/// Numbers are trimmed before parsing; text is taken verbatim.
	pub fn parse(ty: Type, text: &str) -> Result<Value> {
		let invalid = || Error::InvalidLiteral {
			text: text.to_string(),
			ty,
		};

		let trimmed = text.trim();
		match ty {
			Type::Int4 => trimmed.parse::<i32>().map(Value::Int4).map_err(|_| invalid()),
			Type::Int8 => trimmed.parse::<i64>().map(Value::Int8).map_err(|_| invalid()),
			Type::Float4 => trimmed.parse::<f32>().map(Value::float4).map_err(|_| invalid()),
			Type::Float8 => trimmed.parse::<f64>().map(Value::float8).map_err(|_| invalid()),
			Type::Utf8 => Ok(Value::utf8(text)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_numbers() {
		assert_eq!(Value::parse(Type::Int4, "12345").unwrap(), Value::Int4(12345));
		assert_eq!(Value::parse(Type::Int8, " -7 ").unwrap(), Value::Int8(-7));
		assert_eq!(Value::parse(Type::Float4, "458.7").unwrap(), Value::float4(458.7f32));
		assert_eq!(Value::parse(Type::Float8, "1e3").unwrap(), Value::float8(1000.0));
	}

	#[test]
	fn test_parse_text_is_verbatim() {
		assert_eq!(Value::parse(Type::Utf8, " Hello, ").unwrap(), Value::utf8(" Hello, "));
	}

	#[test]
	fn test_parse_invalid() {
		let err = Value::parse(Type::Int4, "4.5").unwrap_err();
		assert_eq!(
			err,
			Error::InvalidLiteral {
				text: "4.5".to_string(),
				ty: Type::Int4
			}
		);
		assert!(Value::parse(Type::Int4, "99999999999").is_err());
		assert!(Value::parse(Type::Float8, "abc").is_err());
	}
}

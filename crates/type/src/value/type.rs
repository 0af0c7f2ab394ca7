// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera Contributors

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The closed set of scalar types a column can hold.
///
/// Each type has exactly one canonical name; schemas and table files refer to
/// columns by these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Type {
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text
	Utf8,
}

impl Type {
	pub const ALL: [Type; 5] = [Type::Int4, Type::Int8, Type::Float4, Type::Float8, Type::Utf8];

	pub fn name(self) -> &'static str {
		match self {
			Type::Int4 => "int32",
			Type::Int8 => "int64",
			Type::Float4 => "float32",
			Type::Float8 => "float64",
			Type::Utf8 => "string",
		}
	}

	pub fn is_integer(self) -> bool {
		matches!(self, Type::Int4 | Type::Int8)
	}

	pub fn is_float(self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_number(self) -> bool {
		self.is_integer() || self.is_float()
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Type {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Type::ALL.into_iter().find(|ty| ty.name() == s).ok_or_else(|| Error::UnknownType(s.to_string()))
	}
}

impl From<Type> for &'static str {
	fn from(ty: Type) -> Self {
		ty.name()
	}
}

impl TryFrom<String> for Type {
	type Error = Error;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

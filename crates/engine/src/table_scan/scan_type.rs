// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use tessera_type::Error;

/// Comparison a table scan applies between each stored value and the search value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
	Equals,
	NotEquals,
	LessThan,
	LessThanEquals,
	GreaterThan,
	GreaterThanEquals,
}

impl ScanType {
	pub const ALL: [ScanType; 6] = [
		ScanType::Equals,
		ScanType::NotEquals,
		ScanType::LessThan,
		ScanType::LessThanEquals,
		ScanType::GreaterThan,
		ScanType::GreaterThanEquals,
	];

	pub fn symbol(self) -> &'static str {
		match self {
			ScanType::Equals => "=",
			ScanType::NotEquals => "!=",
			ScanType::LessThan => "<",
			ScanType::LessThanEquals => "<=",
			ScanType::GreaterThan => ">",
			ScanType::GreaterThanEquals => ">=",
		}
	}

	/// `stored <op> search` for this scan type.
	pub fn comparator<T: Ord>(self) -> fn(&T, &T) -> bool {
		match self {
			ScanType::Equals => |value, search| value == search,
			ScanType::NotEquals => |value, search| value != search,
			ScanType::LessThan => |value, search| value < search,
			ScanType::LessThanEquals => |value, search| value <= search,
			ScanType::GreaterThan => |value, search| value > search,
			ScanType::GreaterThanEquals => |value, search| value >= search,
		}
	}
}

impl Display for ScanType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.symbol())
	}
}

impl FromStr for ScanType {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ScanType::ALL
			.into_iter()
			.find(|scan_type| scan_type.symbol() == s)
			.ok_or_else(|| Error::UnknownScanType(s.to_string()))
	}
}

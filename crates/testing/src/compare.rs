// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::cmp::Ordering;

use tessera_core::Table;
use tessera_type::Value;

/// All rows of `table`, chunk by chunk, as values.
pub fn table_to_matrix(table: &Table) -> Vec<Vec<Value>> {
	let mut matrix = Vec::new();
	for chunk in table.chunks() {
		let size = chunk.size() as usize;
		let segments = chunk.segments();
		for offset in 0..size {
			let row = segments
				.iter()
				.map(|segment| segment.get(offset).unwrap_or_else(|err| panic!("row {offset}: {err}")))
				.collect();
			matrix.push(row);
		}
	}
	matrix
}

/// Asserts both tables have the same columns and rows. Row order only
/// matters if `order_sensitive` is set.
#[track_caller]
pub fn assert_table_eq(actual: &Table, expected: &Table, order_sensitive: bool) {
	assert_eq!(actual.columns(), expected.columns(), "columns differ");

	let mut actual_rows = table_to_matrix(actual);
	let mut expected_rows = table_to_matrix(expected);
	if !order_sensitive {
		actual_rows.sort_by(|left, right| left.partial_cmp(right).unwrap_or(Ordering::Equal));
		expected_rows.sort_by(|left, right| left.partial_cmp(right).unwrap_or(Ordering::Equal));
	}
	assert_eq!(actual_rows, expected_rows, "rows differ");
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::parse_table;

	#[test]
	fn test_table_to_matrix() {
		let table = parse_table("a|b\nint32|string\n1|x\n2|y\n3|z\n", 2).unwrap();
		assert_eq!(
			table_to_matrix(&table),
			vec![
				vec![Value::Int4(1), Value::utf8("x")],
				vec![Value::Int4(2), Value::utf8("y")],
				vec![Value::Int4(3), Value::utf8("z")],
			]
		);
	}

	#[test]
	fn test_order_insensitive() {
		let left = parse_table("a\nint32\n1\n2\n3\n", 2).unwrap();
		let right = parse_table("a\nint32\n3\n1\n2\n", 5).unwrap();
		assert_table_eq(&left, &right, false);
	}

	#[test]
	#[should_panic(expected = "rows differ")]
	fn test_order_sensitive() {
		let left = parse_table("a\nint32\n1\n2\n", 2).unwrap();
		let right = parse_table("a\nint32\n2\n1\n", 2).unwrap();
		assert_table_eq(&left, &right, true);
	}

	#[test]
	#[should_panic(expected = "columns differ")]
	fn test_column_types_must_match() {
		let left = parse_table("a\nint32\n1\n", 2).unwrap();
		let right = parse_table("a\nint64\n1\n", 2).unwrap();
		assert_table_eq(&left, &right, false);
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

//! Operator pipelines over tables registered in a catalog

use std::sync::Arc;

use tessera_catalog::Catalog;
use tessera_core::{Chunk, ReferenceSegment, Segment, Table};
use tessera_engine::{GetTable, Operator, Print, ScanType, TableScan, TableWrapper, scan};
use tessera_testing::{assert_table_eq, init_tracing, parse_table, table_to_matrix};
use tessera_type::{ChunkId, ColumnId, Error, RowId, Type, Value};

fn numbers() -> Arc<Table> {
	parse_table("a|b\nint32|float32\n12345|458.7\n123|456.7\n1234|457.7\n5|1.5\n", 2).unwrap()
}

#[test]
fn test_get_table_scan_print() {
	init_tracing();

	let catalog = Arc::new(Catalog::new());
	catalog.add_table("numbers", numbers()).unwrap();

	let get_table = Arc::new(GetTable::new(Arc::clone(&catalog), "numbers"));
	get_table.execute().unwrap();

	let first = Arc::new(TableScan::new(get_table, ColumnId(0), ScanType::GreaterThan, Value::Int4(100)));
	first.execute().unwrap();

	let second = Arc::new(TableScan::new(first, ColumnId(1), ScanType::LessThanEquals, Value::float4(457.7f32)));
	second.execute().unwrap();

	let print = Print::with_writer(second, Vec::new());
	print.execute().unwrap();

	let expected = "\
=== Columns
|       a|       b|
|   int32| float32|
=== Chunk 0 ===
|     123|   456.7|
=== Chunk 1 ===
|    1234|   457.7|
";
	let output = print.output().unwrap();
	assert_eq!(String::from_utf8(print.into_writer()).unwrap(), expected);
	assert_eq!(output.row_count(), 2);
}

#[test]
fn test_scan_result_matches_expected_table() {
	let input = Arc::new(TableWrapper::new(numbers()));
	input.execute().unwrap();

	let scan = TableScan::new(input, ColumnId(0), ScanType::NotEquals, Value::Int4(123));
	scan.execute().unwrap();

	let expected = parse_table("a|b\nint32|float32\n5|1.5\n12345|458.7\n1234|457.7\n", 10).unwrap();
	assert_table_eq(&scan.output().unwrap(), &expected, false);
}

#[test]
fn test_scan_of_compressed_and_open_chunks() {
	let table = numbers();
	table.compress_chunk(ChunkId(0)).unwrap();
	table.append(&[Value::Int4(7), Value::float4(0.5f32)]).unwrap();

	let input = Arc::new(TableWrapper::new(Arc::clone(&table)));
	input.execute().unwrap();
	let scan = TableScan::new(input, ColumnId(0), ScanType::LessThan, Value::Int8(1234));
	scan.execute().unwrap();

	assert_eq!(
		table_to_matrix(&scan.output().unwrap()),
		vec![
			vec![Value::Int4(123), Value::float4(456.7f32)],
			vec![Value::Int4(5), Value::float4(1.5f32)],
			vec![Value::Int4(7), Value::float4(0.5f32)],
		]
	);
}

#[test]
fn test_scan_output_keeps_schema() {
	let input = Arc::new(TableWrapper::new(numbers()));
	input.execute().unwrap();
	let scan = TableScan::new(input, ColumnId(1), ScanType::Equals, Value::float4(1.5f32));
	scan.execute().unwrap();

	let output = scan.output().unwrap();
	assert_eq!(output.column_names(), vec!["a", "b"]);
	assert_eq!(output.column_types(), vec![Type::Int4, Type::Float4]);
}

#[test]
fn test_search_value_must_fit_column() {
	let input = Arc::new(TableWrapper::new(numbers()));
	input.execute().unwrap();

	let scan = TableScan::new(input.clone(), ColumnId(0), ScanType::Equals, Value::utf8("123"));
	assert!(matches!(scan.execute().unwrap_err(), Error::TypeMismatch { .. }));

	let scan = TableScan::new(input, ColumnId(0), ScanType::Equals, Value::float8(12.5));
	assert!(matches!(scan.execute().unwrap_err(), Error::TypeMismatch { .. }));
	assert!(scan.output().is_none());
}

#[test]
fn test_nested_reference_segments_are_rejected() {
	let base = numbers();
	let input = Arc::new(TableWrapper::new(Arc::clone(&base)));
	input.execute().unwrap();
	let first = Arc::new(TableScan::new(input, ColumnId(0), ScanType::GreaterThan, Value::Int4(0)));
	first.execute().unwrap();

	// a reference table pointing at a reference table, which scans never produce
	let references = first.output().unwrap();
	let nested = Table::default();
	for def in references.columns() {
		nested.add_column_definition(&def.name, def.ty);
	}
	let chunk = Chunk::new();
	for column in 0..2u16 {
		let pos_list = Arc::new(vec![RowId::new(0, 0)]);
		let segment = ReferenceSegment::new(Arc::clone(&references), ColumnId(column), pos_list).unwrap();
		chunk.add_segment(Segment::Reference(segment));
	}
	nested.emplace_chunk(chunk);

	let err = scan(&Arc::new(nested), ColumnId(0), ScanType::Equals, &Value::Int4(1)).unwrap_err();
	assert!(matches!(
		err,
		Error::UnsupportedSegment {
			segment: "reference",
			..
		}
	));
}

#[test]
fn test_dropped_table_stays_alive_while_referenced() {
	let catalog = Arc::new(Catalog::new());
	catalog.add_table("numbers", numbers()).unwrap();

	let get_table = Arc::new(GetTable::new(Arc::clone(&catalog), "numbers"));
	get_table.execute().unwrap();
	let scan = TableScan::new(get_table, ColumnId(0), ScanType::Equals, Value::Int4(5));
	scan.execute().unwrap();

	catalog.drop_table("numbers").unwrap();
	assert_eq!(
		table_to_matrix(&scan.output().unwrap()),
		vec![vec![Value::Int4(5), Value::float4(1.5f32)]]
	);
}

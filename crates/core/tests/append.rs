// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

//! Row appends, chunk rollover and concurrent appenders

use std::sync::Arc;

use tessera_core::{Table, TableConfig};
use tessera_type::{ChunkId, Error, Value};

#[test]
fn test_chunks_fill_to_capacity() {
	let table = Table::new(TableConfig::new(3));
	table.add_column("a", "int32").unwrap();
	for i in 0..10 {
		table.append(&[Value::Int4(i)]).unwrap();
	}

	assert_eq!(table.chunk_count(), 4);
	let sizes: Vec<u32> = table.chunks().iter().map(|chunk| chunk.size()).collect();
	assert_eq!(sizes, vec![3, 3, 3, 1]);
	assert_eq!(table.row_count(), 10);
}

#[test]
fn test_values_are_converted_to_column_type() {
	let table = Table::default();
	table.add_column("a", "int64").unwrap();
	table.add_column("b", "float64").unwrap();
	table.append(&[Value::Int4(7), Value::Int4(2)]).unwrap();

	let chunk = table.get_chunk(ChunkId(0)).unwrap();
	let row: Vec<Value> = chunk.segments().iter().map(|segment| segment.get(0).unwrap()).collect();
	assert_eq!(row, vec![Value::Int8(7), Value::float8(2.0)]);
}

#[test]
fn test_rejected_row_does_not_start_a_chunk() {
	let table = Table::with_chunk_size(1);
	table.add_column("a", "string").unwrap();
	table.append(&[Value::utf8("x")]).unwrap();

	assert!(matches!(table.append(&[Value::Int4(1)]).unwrap_err(), Error::TypeMismatch { .. }));
	assert_eq!(table.chunk_count(), 1);
}

#[test]
fn test_zero_chunk_size_holds_one_row_per_chunk() {
	let table = Table::with_chunk_size(0);
	table.add_column("a", "int32").unwrap();
	table.append(&[Value::Int4(1)]).unwrap();
	table.append(&[Value::Int4(2)]).unwrap();

	assert_eq!(table.chunk_count(), 2);
}

#[test]
fn test_concurrent_appends_never_overfill_chunks() {
	let table = Arc::new(Table::with_chunk_size(16));
	table.add_column("thread", "int32").unwrap();
	table.add_column("i", "int64").unwrap();

	std::thread::scope(|scope| {
		for thread in 0..8 {
			let table = Arc::clone(&table);
			scope.spawn(move || {
				for i in 0..250i64 {
					table.append(&[Value::Int4(thread), Value::Int8(i)]).unwrap();
				}
			});
		}
	});

	assert_eq!(table.row_count(), 2000);
	let chunks = table.chunks();
	assert_eq!(chunks.len(), 125);
	for chunk in &chunks {
		assert_eq!(chunk.size(), 16);
	}
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera Contributors

use std::fmt::{self, Display, Formatter};

use crate::value::Type;

pub type Result<T> = std::result::Result<T, Error>;

/// The dimension an out-of-bounds access was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
	Row,
	Column,
	Chunk,
	ValueId,
}

impl Display for Extent {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Extent::Row => f.write_str("row"),
			Extent::Column => f.write_str("column"),
			Extent::Chunk => f.write_str("chunk"),
			Extent::ValueId => f.write_str("value id"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("cannot add column '{name}': the table already holds {rows} rows")]
	ColumnAfterRows {
		name: String,
		rows: u64,
	},

	#[error("row has {actual} values but the chunk has {expected} columns")]
	ArityMismatch {
		expected: usize,
		actual: usize,
	},

	#[error("cannot store a row without columns")]
	NoColumns,

	#[error("cannot convert {value} ({from}) to {to}")]
	TypeMismatch {
		value: String,
		from: Type,
		to: Type,
	},

	#[error("unknown type '{0}'")]
	UnknownType(String),

	#[error("cannot parse '{text}' as {ty}")]
	InvalidLiteral {
		text: String,
		ty: Type,
	},

	#[error("{what} index {index} out of bounds (len {len})")]
	OutOfBounds {
		what: Extent,
		index: u64,
		len: u64,
	},

	#[error("column '{0}' does not exist")]
	ColumnNotFound(String),

	#[error("{segment} segments are immutable")]
	Immutable {
		segment: &'static str,
	},

	#[error("chunk {chunk} is not full ({size} of {capacity} rows)")]
	ChunkNotFull {
		chunk: u32,
		size: u32,
		capacity: u32,
	},

	#[error("compression of chunk {0} has already been started")]
	CompressionStarted(u32),

	#[error("cannot scan {segment} segment: {reason}")]
	UnsupportedSegment {
		segment: &'static str,
		reason: String,
	},

	#[error("unknown scan type '{0}'")]
	UnknownScanType(String),

	#[error("table '{0}' does not exist")]
	TableNotFound(String),

	#[error("table '{0}' already exists")]
	TableExists(String),

	#[error("operator input '{0}' has not been executed")]
	NotExecuted(&'static str),

	#[error("cannot write output: {0}")]
	Output(String),
}

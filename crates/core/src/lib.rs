// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

#[macro_use]
mod macros;

pub mod chunk;
pub mod config;
pub mod resolve;
pub mod segment;
pub mod table;

pub use chunk::Chunk;
pub use config::TableConfig;
pub use resolve::{ColumnType, TypeVisitor, resolve, resolve_name};
pub use segment::{
	AttributeVector, AttributeVectorWidth, DictionaryData, DictionarySegment, ReferenceSegment, Segment, ValueData,
	ValueSegment,
};
pub use table::{ColumnDef, Table};
pub use tessera_type::{Error, Result};

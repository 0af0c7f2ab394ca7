// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Tessera Contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod id;
pub mod value;

pub use error::{Error, Extent, Result};
pub use id::{ChunkId, ChunkOffset, ColumnId, PosList, RowId, ValueId};
pub use value::{NativeType, OrderedF32, OrderedF64, Type, Value};

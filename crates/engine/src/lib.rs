// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod get_table;
mod operator;
pub mod print;
mod table_scan;
mod table_wrapper;

pub use get_table::GetTable;
pub use operator::{Operator, OperatorState};
pub use print::Print;
pub use table_scan::{ScanType, TableScan, scan};
pub use table_wrapper::TableWrapper;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

mod compare;
mod loader;
mod logging;

pub use compare::{assert_table_eq, table_to_matrix};
pub use loader::{LoadError, load_table, parse_table};
pub use logging::init_tracing;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::sync::Arc;

use tessera_catalog::Catalog;
use tessera_core::Table;
use tessera_type::Result;

use crate::operator::{Operator, OperatorState};

/// Outputs a table looked up by name in a catalog.
pub struct GetTable {
	state: OperatorState,
	catalog: Arc<Catalog>,
	table_name: String,
}

impl GetTable {
	pub fn new(catalog: Arc<Catalog>, table_name: impl Into<String>) -> Self {
		Self {
			state: OperatorState::new(),
			catalog,
			table_name: table_name.into(),
		}
	}

	pub fn table_name(&self) -> &str {
		&self.table_name
	}
}

impl Operator for GetTable {
	fn name(&self) -> &'static str {
		"get_table"
	}

	fn state(&self) -> &OperatorState {
		&self.state
	}

	fn on_execute(&self) -> Result<Arc<Table>> {
		self.catalog.get_table(&self.table_name)
	}
}

#[cfg(test)]
mod tests {
	use tessera_type::Error;

	use super::*;

	#[test]
	fn test_gets_table() {
		let catalog = Arc::new(Catalog::new());
		let table = Arc::new(Table::with_chunk_size(2));
		catalog.add_table("aNiceTestTable", Arc::clone(&table)).unwrap();

		let get_table = GetTable::new(Arc::clone(&catalog), "aNiceTestTable");
		assert_eq!(get_table.table_name(), "aNiceTestTable");
		get_table.execute().unwrap();
		assert!(Arc::ptr_eq(&get_table.output().unwrap(), &table));
	}

	#[test]
	fn test_unknown_table() {
		let get_table = GetTable::new(Arc::new(Catalog::new()), "anUglyTestTable");
		assert_eq!(get_table.execute().unwrap_err(), Error::TableNotFound("anUglyTestTable".to_string()));
		assert!(get_table.output().is_none());
	}
}

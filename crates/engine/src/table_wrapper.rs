// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::sync::Arc;

use tessera_core::Table;
use tessera_type::Result;

use crate::operator::{Operator, OperatorState};

/// Makes an existing table the output of an operator.
pub struct TableWrapper {
	state: OperatorState,
	table: Arc<Table>,
}

impl TableWrapper {
	pub fn new(table: Arc<Table>) -> Self {
		Self {
			state: OperatorState::new(),
			table,
		}
	}
}

impl Operator for TableWrapper {
	fn name(&self) -> &'static str {
		"table_wrapper"
	}

	fn state(&self) -> &OperatorState {
		&self.state
	}

	fn on_execute(&self) -> Result<Arc<Table>> {
		Ok(Arc::clone(&self.table))
	}
}

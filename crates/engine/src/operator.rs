// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera Contributors

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tessera_core::Table;
use tessera_type::{Error, Result};
use tracing::{debug_span, warn};

/// A node of an operator pipeline. Each operator computes one output table
/// from the outputs of up to two input operators, once, and keeps it.
pub trait Operator: Send + Sync {
	fn name(&self) -> &'static str;

	fn state(&self) -> &OperatorState;

	/// Computes the output table; called at most once by [`Operator::execute`].
	fn on_execute(&self) -> Result<Arc<Table>>;

	fn execute(&self) -> Result<()> {
		let state = self.state();
		let _running = state.running.lock();
		if state.output.read().is_some() {
			return Ok(());
		}

		let _span = debug_span!("operator::execute", operator = self.name()).entered();
		let output = self.on_execute()?;
		*state.output.write() = Some(output);
		Ok(())
	}

	/// The output table, or `None` before [`Operator::execute`] succeeded.
	fn output(&self) -> Option<Arc<Table>> {
		let output = self.state().output.read().clone();
		if output.is_none() {
			warn!(operator = self.name(), "output requested before execution");
		}
		output
	}
}

/// Inputs and cached output shared by every operator.
#[derive(Default)]
pub struct OperatorState {
	left: Option<Arc<dyn Operator>>,
	right: Option<Arc<dyn Operator>>,
	output: RwLock<Option<Arc<Table>>>,
	running: Mutex<()>,
}

impl OperatorState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn unary(left: Arc<dyn Operator>) -> Self {
		Self {
			left: Some(left),
			..Self::default()
		}
	}

	pub fn binary(left: Arc<dyn Operator>, right: Arc<dyn Operator>) -> Self {
		Self {
			left: Some(left),
			right: Some(right),
			..Self::default()
		}
	}

	pub fn input_left(&self) -> Option<&Arc<dyn Operator>> {
		self.left.as_ref()
	}

	pub fn input_right(&self) -> Option<&Arc<dyn Operator>> {
		self.right.as_ref()
	}

	pub fn input_table_left(&self) -> Result<Arc<Table>> {
		self.left.as_ref().and_then(|input| input.output()).ok_or(Error::NotExecuted("left"))
	}

	pub fn input_table_right(&self) -> Result<Arc<Table>> {
		self.right.as_ref().and_then(|input| input.output()).ok_or(Error::NotExecuted("right"))
	}
}

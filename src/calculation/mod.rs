//! Calculation logic for the Salary Engine.
//!
//! This module contains the per-call symbol table, template validation,
//! evaluation ordering, the two-pass component calculation, and the
//! aggregation of component values into breakdown totals.

mod aggregator;
mod context;
mod orchestrator;
mod ordering;
mod validator;

pub use aggregator::summarize;
pub use context::{CTC_VARIABLE, CalculationContext, RESERVED_VARIABLES};
pub use orchestrator::{calculate, calculate_components};
pub use ordering::{FormulaNode, resolve_order};
pub use validator::{check_formulas, validate_template};

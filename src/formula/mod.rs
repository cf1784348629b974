//! Formula parsing and evaluation.
//!
//! Formulas are Excel-like arithmetic expressions such as `=CTC*0.5` or
//! `=(Basic + HRA) * 0.12`. They are tokenized, parsed into an [`Expr`] tree by
//! a recursive-descent parser, and evaluated by walking the tree against a
//! [`CalculationContext`](crate::calculation::CalculationContext). Nothing is
//! ever executed as code.
//!
//! # Example
//!
//! ```
//! use salary_engine::calculation::CalculationContext;
//! use salary_engine::formula::evaluate;
//! use rust_decimal::Decimal;
//!
//! let mut context = CalculationContext::new(Decimal::new(100000, 0));
//! context.insert("Basic", Decimal::new(50000, 0));
//!
//! let hra = evaluate("=Basic*0.4", &context).unwrap();
//! assert_eq!(hra, Decimal::new(20000, 0));
//! ```

mod evaluator;
mod lexer;
mod parser;

use thiserror::Error;

pub use evaluator::{RESULT_DECIMAL_PLACES, evaluate, evaluate_expr, evaluate_with, round_money};
pub use parser::{BinaryOp, Expr, parse_formula, parse_formula_with, referenced_variables};

/// Errors raised while parsing or evaluating a single formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The formula is syntactically invalid or produced a non-finite result.
    #[error("invalid formula '{formula}': {message}")]
    InvalidFormula {
        /// The formula as written.
        formula: String,
        /// What went wrong.
        message: String,
    },

    /// A name in the formula has no value and unresolved names are rejected.
    #[error("unresolved variable '{name}'")]
    UnresolvedVariable {
        /// The unresolved identifier.
        name: String,
    },
}

impl EvalError {
    pub(crate) fn invalid(formula: &str, message: impl Into<String>) -> Self {
        EvalError::InvalidFormula {
            formula: formula.to_string(),
            message: message.into(),
        }
    }

    /// Replaces the formula text carried by an `InvalidFormula` error.
    pub(crate) fn for_formula(self, formula: &str) -> Self {
        match self {
            EvalError::InvalidFormula { message, .. } => EvalError::invalid(formula, message),
            other => other,
        }
    }
}

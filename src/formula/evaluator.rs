//! Tree-walking formula evaluation.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::calculation::CalculationContext;
use crate::config::UnresolvedVariablePolicy;

use super::EvalError;
use super::parser::{BinaryOp, Expr, parse_formula_with};

/// Number of decimal places every resolved value is rounded to.
pub const RESULT_DECIMAL_PLACES: u32 = 2;

/// Rounds a value to [`RESULT_DECIMAL_PLACES`], halves away from zero.
///
/// # Example
///
/// ```
/// use salary_engine::formula::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("2.345").unwrap()), Decimal::from_str("2.35").unwrap());
/// assert_eq!(round_money(Decimal::from_str("-2.345").unwrap()), Decimal::from_str("-2.35").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RESULT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Evaluates a formula against a context, defaulting unknown names to zero.
///
/// This is [`evaluate_with`] using [`UnresolvedVariablePolicy::Zero`].
///
/// # Example
///
/// ```
/// use salary_engine::calculation::CalculationContext;
/// use salary_engine::formula::evaluate;
/// use rust_decimal::Decimal;
///
/// let context = CalculationContext::new(Decimal::new(100000, 0));
/// assert_eq!(evaluate("=CTC*0.3", &context).unwrap(), Decimal::new(30000, 0));
/// ```
pub fn evaluate(formula: &str, context: &CalculationContext) -> Result<Decimal, EvalError> {
    evaluate_with(formula, context, UnresolvedVariablePolicy::Zero)
}

/// Evaluates a formula against a context.
///
/// An empty formula (or a bare `=`) evaluates to zero. Anything else is
/// parsed, with the context's names known to the lexer, and evaluated as an
/// arithmetic expression; a numeric literal is just the simplest one. The
/// result is rounded to two decimal places.
///
/// # Errors
///
/// - [`EvalError::InvalidFormula`] if the formula does not parse, or if an
///   operation overflows or divides by zero.
/// - [`EvalError::UnresolvedVariable`] if a name has no value and `policy`
///   is [`UnresolvedVariablePolicy::Reject`].
pub fn evaluate_with(
    formula: &str,
    context: &CalculationContext,
    policy: UnresolvedVariablePolicy,
) -> Result<Decimal, EvalError> {
    let names: Vec<&str> = context.names().collect();
    match parse_formula_with(formula, &names)? {
        Some(expr) => evaluate_expr(&expr, context, policy)
            .map(round_money)
            .map_err(|e| e.for_formula(formula)),
        None => Ok(Decimal::ZERO),
    }
}

/// Evaluates an already parsed expression without rounding the result.
///
/// Errors raised here carry an empty formula; [`evaluate_with`] fills it in.
pub fn evaluate_expr(
    expr: &Expr,
    context: &CalculationContext,
    policy: UnresolvedVariablePolicy,
) -> Result<Decimal, EvalError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Variable(name) => match context.resolve(name) {
            Some(value) => Ok(value),
            None => match policy {
                UnresolvedVariablePolicy::Zero => {
                    warn!(variable = %name, "Unresolved formula variable defaulted to zero");
                    Ok(Decimal::ZERO)
                }
                UnresolvedVariablePolicy::Reject => Err(EvalError::UnresolvedVariable {
                    name: name.clone(),
                }),
            },
        },
        Expr::Negate(inner) => Ok(-evaluate_expr(inner, context, policy)?),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = evaluate_expr(lhs, context, policy)?;
            let rhs = evaluate_expr(rhs, context, policy)?;
            apply(*op, lhs, rhs)
        }
    }
}

fn apply(op: BinaryOp, lhs: Decimal, rhs: Decimal) -> Result<Decimal, EvalError> {
    let result = match op {
        BinaryOp::Add => lhs.checked_add(rhs),
        BinaryOp::Subtract => lhs.checked_sub(rhs),
        BinaryOp::Multiply => lhs.checked_mul(rhs),
        BinaryOp::Divide => {
            if rhs.is_zero() {
                return Err(EvalError::invalid("", "division by zero"));
            }
            lhs.checked_div(rhs)
        }
    };

    result.ok_or_else(|| {
        EvalError::invalid("", format!("arithmetic overflow in {} {} {}", lhs, op, rhs))
    })
}

//! Template calculation.
//!
//! Resolves every active component of a template for one CTC figure in two
//! passes: fixed values first, then formulas.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineOptions;
use crate::error::{EngineError, EngineResult};
use crate::formula::{
    EvalError, Expr, evaluate_expr, parse_formula_with, referenced_variables, round_money,
};
use crate::models::{CalculatedComponent, SalaryBreakdown, SalaryComponent, SalaryTemplate};

use super::aggregator::summarize;
use super::context::CalculationContext;
use super::ordering::{FormulaNode, resolve_order};
use super::validator::validate_template;

/// Calculates a full salary breakdown for a template.
///
/// The template is validated first, then its components are resolved with
/// [`calculate_components`] and totalled with [`summarize`].
///
/// # Errors
///
/// - [`EngineError::InvalidCtc`] if `ctc` is negative.
/// - Any error from [`validate_template`].
/// - Any error from [`calculate_components`].
/// - [`EngineError::TotalOverflow`] from [`summarize`].
///
/// No partial breakdown is ever returned.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::calculate;
/// use salary_engine::config::EngineOptions;
/// use salary_engine::models::{ComponentKind, SalaryComponent, SalaryTemplate};
/// use rust_decimal::Decimal;
///
/// let template = SalaryTemplate::new(
///     "tpl_001",
///     "Standard",
///     vec![
///         SalaryComponent::formula("Basic", ComponentKind::Earning, "=CTC*0.5"),
///         SalaryComponent::formula("HRA", ComponentKind::Earning, "=Basic*0.4"),
///     ],
/// );
///
/// let breakdown = calculate(&template, Decimal::new(100000, 0), &EngineOptions::default()).unwrap();
/// assert_eq!(breakdown.value_of("HRA"), Some(Decimal::new(20000, 0)));
/// assert_eq!(breakdown.summary.gross_salary, Decimal::new(70000, 0));
/// ```
pub fn calculate(
    template: &SalaryTemplate,
    ctc: Decimal,
    options: &EngineOptions,
) -> EngineResult<SalaryBreakdown> {
    if ctc < Decimal::ZERO {
        return Err(EngineError::InvalidCtc { ctc });
    }

    validate_template(template)?;

    let components = calculate_components(&template.components, ctc, options)?;
    let summary = summarize(&components)?;

    Ok(SalaryBreakdown {
        template_id: template.id.clone(),
        template_name: template.name.clone(),
        ctc,
        components,
        summary,
    })
}

/// Resolves the value of every active component.
///
/// 1. The context is seeded with `CTC`.
/// 2. Active components without a formula take their fixed value (zero if
///    absent), and are added to the context.
/// 3. Active formula components are evaluated in the order given by
///    `options.evaluation_order`, each result added to the context before
///    the next formula runs.
///
/// Inactive components are skipped entirely. The returned list keeps the
/// declaration order of the active components.
///
/// # Errors
///
/// - [`EngineError::InvalidFormula`] naming the first component whose formula
///   fails to parse or evaluate.
/// - [`EngineError::UnresolvedVariable`] when unresolved names are rejected.
/// - [`EngineError::CircularDependency`] in dependency order.
pub fn calculate_components(
    components: &[SalaryComponent],
    ctc: Decimal,
    options: &EngineOptions,
) -> EngineResult<Vec<CalculatedComponent>> {
    let active: Vec<&SalaryComponent> = components.iter().filter(|c| c.is_active).collect();
    let mut values: Vec<Option<Decimal>> = vec![None; active.len()];
    let mut context = CalculationContext::new(ctc);

    for (slot, component) in active.iter().enumerate() {
        if component.has_formula() {
            continue;
        }
        let value = round_money(component.fixed_value());
        debug!(component = %component.name, value = %value, "Resolved fixed component");
        context.insert(component.name.clone(), value);
        values[slot] = Some(value);
    }

    let names: Vec<&str> = components.iter().map(|c| c.name.as_str()).collect();
    let mut formulas: Vec<(usize, Option<Expr>)> = Vec::new();
    for (slot, component) in active.iter().enumerate() {
        if let Some(formula) = component.formula_text() {
            let expr = parse_formula_with(formula, &names)
                .map_err(|e| formula_error(component, formula, e))?;
            formulas.push((slot, expr));
        }
    }

    let nodes: Vec<FormulaNode> = formulas
        .iter()
        .map(|(slot, expr)| {
            let references = expr.as_ref().map(referenced_variables).unwrap_or_default();
            FormulaNode::new(active[*slot].name.clone(), references)
        })
        .collect();

    for index in resolve_order(&nodes, options.evaluation_order)? {
        let (slot, expr) = &formulas[index];
        let component = active[*slot];

        let value = match expr {
            Some(expr) => evaluate_expr(expr, &context, options.unresolved_variables)
                .map(round_money)
                .map_err(|e| formula_error(component, component.formula_text().unwrap_or(""), e))?,
            None => Decimal::ZERO,
        };

        debug!(
            component = %component.name,
            formula = component.formula_text().unwrap_or(""),
            value = %value,
            "Resolved formula component"
        );
        context.insert(component.name.clone(), value);
        values[*slot] = Some(value);
    }

    Ok(active
        .into_iter()
        .zip(values)
        .map(|(component, value)| CalculatedComponent {
            component: component.clone(),
            calculated_value: value.unwrap_or(Decimal::ZERO),
        })
        .collect())
}

fn formula_error(component: &SalaryComponent, formula: &str, error: EvalError) -> EngineError {
    match error {
        EvalError::InvalidFormula { message, .. } => EngineError::InvalidFormula {
            component: component.name.clone(),
            formula: formula.to_string(),
            message,
        },
        EvalError::UnresolvedVariable { name } => EngineError::UnresolvedVariable {
            component: component.name.clone(),
            variable: name,
        },
    }
}

//! Template validation.
//!
//! Structural checks that run before any component is evaluated.

use std::collections::HashSet;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::formula::{EvalError, parse_formula_with};
use crate::models::SalaryTemplate;

/// Checks that a template can be calculated.
///
/// # Errors
///
/// - [`EngineError::TemplateInactive`] if the template is disabled.
/// - [`EngineError::EmptyTemplate`] if it has no components, or no active ones.
/// - [`EngineError::DuplicateComponentName`] if two components share a name
///   (case-sensitive, inactive components included).
///
/// # Example
///
/// ```
/// use salary_engine::calculation::validate_template;
/// use salary_engine::models::SalaryTemplate;
///
/// let template = SalaryTemplate::new("tpl_empty", "Empty", vec![]);
/// assert!(validate_template(&template).is_err());
/// ```
pub fn validate_template(template: &SalaryTemplate) -> EngineResult<()> {
    if !template.is_active {
        warn!(template_id = %template.id, "Rejected inactive template");
        return Err(EngineError::TemplateInactive {
            id: template.id.clone(),
        });
    }

    if template.active_components().next().is_none() {
        warn!(template_id = %template.id, "Rejected template without active components");
        return Err(EngineError::EmptyTemplate {
            id: template.id.clone(),
        });
    }

    let mut seen = HashSet::new();
    for component in &template.components {
        if !seen.insert(component.name.as_str()) {
            warn!(
                template_id = %template.id,
                component = %component.name,
                "Rejected template with duplicate component name"
            );
            return Err(EngineError::DuplicateComponentName {
                name: component.name.clone(),
            });
        }
    }

    Ok(())
}

/// Parses every active formula without evaluating anything.
///
/// Lets a host reject a malformed template when it is saved instead of
/// when it is first calculated.
///
/// # Errors
///
/// Returns [`EngineError::InvalidFormula`] for the first active component, in
/// declaration order, whose formula does not parse.
pub fn check_formulas(template: &SalaryTemplate) -> EngineResult<()> {
    let names: Vec<&str> = template.components.iter().map(|c| c.name.as_str()).collect();
    for component in template.active_components() {
        if let Some(formula) = component.formula_text() {
            parse_formula_with(formula, &names).map_err(|e| {
                let message = match e {
                    EvalError::InvalidFormula { message, .. } => message,
                    other => other.to_string(),
                };
                EngineError::InvalidFormula {
                    component: component.name.clone(),
                    formula: formula.to_string(),
                    message,
                }
            })?;
        }
    }
    Ok(())
}

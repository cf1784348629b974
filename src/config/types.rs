//! Configuration types for the salary engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `engine.yaml`.

use serde::{Deserialize, Serialize};

/// What happens when a formula names a variable that has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedVariablePolicy {
    /// Treat the variable as zero and log a warning.
    #[default]
    Zero,
    /// Fail the calculation with an unresolved-variable error.
    Reject,
}

/// The order in which formula components are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOrder {
    /// Template list order. A formula only sees formula components declared
    /// before it; later ones resolve as unknown names.
    #[default]
    Declaration,
    /// Dependencies first, using list order to break ties. Cycles are errors.
    Dependency,
}

/// Options that change how the engine resolves templates.
///
/// Both fields are optional in YAML; the defaults reproduce the lenient,
/// list-ordered behaviour.
///
/// # Example
///
/// ```
/// use salary_engine::config::{EngineOptions, EvaluationOrder, UnresolvedVariablePolicy};
///
/// let options: EngineOptions = serde_yaml::from_str("unresolved_variables: reject").unwrap();
/// assert_eq!(options.unresolved_variables, UnresolvedVariablePolicy::Reject);
/// assert_eq!(options.evaluation_order, EvaluationOrder::Declaration);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// How unknown formula variables are handled.
    pub unresolved_variables: UnresolvedVariablePolicy,
    /// How formula components are ordered.
    pub evaluation_order: EvaluationOrder,
}

impl EngineOptions {
    /// Options that reject unknown variables and order by dependency.
    pub fn strict() -> Self {
        Self {
            unresolved_variables: UnresolvedVariablePolicy::Reject,
            evaluation_order: EvaluationOrder::Dependency,
        }
    }
}

//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving a salary template.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// Every error aborts the whole calculation; a partial breakdown is never
/// returned alongside one of these.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::TemplateNotFound {
///     id: "tpl_missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Salary template not found: tpl_missing");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The template identifier does not resolve to a known template.
    #[error("Salary template not found: {id}")]
    TemplateNotFound {
        /// The identifier that was requested.
        id: String,
    },

    /// The template exists but is disabled.
    #[error("Salary template '{id}' is inactive")]
    TemplateInactive {
        /// The identifier of the inactive template.
        id: String,
    },

    /// The template has no components, or none of them are active.
    #[error("Salary template '{id}' has no active components")]
    EmptyTemplate {
        /// The identifier of the empty template.
        id: String,
    },

    /// Two components in one template share a name.
    #[error("Duplicate component name: {name}")]
    DuplicateComponentName {
        /// The repeated component name.
        name: String,
    },

    /// A component's formula failed to parse or evaluate.
    #[error("Invalid formula for component '{component}': {formula} ({message})")]
    InvalidFormula {
        /// The name of the offending component.
        component: String,
        /// The formula as written in the template.
        formula: String,
        /// What went wrong.
        message: String,
    },

    /// A formula referenced a name with no value while running in strict mode.
    #[error("Unresolved variable '{variable}' in formula for component '{component}'")]
    UnresolvedVariable {
        /// The name of the component whose formula was being evaluated.
        component: String,
        /// The identifier that could not be resolved.
        variable: String,
    },

    /// Formula components reference each other in a cycle.
    #[error("Circular dependency between components: {}", .components.join(" -> "))]
    CircularDependency {
        /// The components that take part in the cycle.
        components: Vec<String>,
    },

    /// A breakdown total does not fit in a decimal.
    #[error("Breakdown total '{total}' overflowed")]
    TotalOverflow {
        /// The name of the total that overflowed, e.g. `totalEarnings`.
        total: String,
    },

    /// The supplied cost-to-company figure cannot be used.
    #[error("Invalid CTC: {ctc} (must not be negative)")]
    InvalidCtc {
        /// The rejected CTC.
        ctc: Decimal,
    },
}

impl EngineError {
    /// Returns true for errors caused by the caller's template or input rather
    /// than by the engine's own configuration.
    ///
    /// A host service would map these to a bad-request response.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::TemplateNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

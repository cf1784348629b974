//! Salary component model and related types.
//!
//! This module defines the [`SalaryComponent`] struct together with the
//! [`ComponentKind`] and [`TaxableStatus`] enums.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a salary component, which decides the total it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Paid to the employee; counts towards gross and net salary.
    #[serde(alias = "Earning")]
    Earning,
    /// Withheld from the employee; reduces net salary.
    #[serde(alias = "Deduction")]
    Deduction,
    /// Paid by the employer on the employee's behalf; informational only.
    #[serde(alias = "Contribution")]
    Contribution,
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Earning => write!(f, "earning"),
            ComponentKind::Deduction => write!(f, "deduction"),
            ComponentKind::Contribution => write!(f, "contribution"),
        }
    }
}

/// Tax treatment of a component. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxableStatus {
    /// Fully taxable.
    #[default]
    #[serde(alias = "Yes")]
    Yes,
    /// Not taxable.
    #[serde(alias = "No")]
    No,
    /// Partially taxable.
    #[serde(alias = "Partial")]
    Partial,
}

fn default_active() -> bool {
    true
}

/// A single named line item within a salary template.
///
/// The `name` doubles as a formula variable, so it must be unique within its
/// template. A component is either formula-driven (`formula` present) or a
/// fixed value (`value`, defaulting to zero when absent).
///
/// # Example
///
/// ```
/// use salary_engine::models::{ComponentKind, SalaryComponent};
///
/// let basic = SalaryComponent::formula("Basic", ComponentKind::Earning, "=CTC*0.5");
/// assert_eq!(basic.formula_text(), Some("=CTC*0.5"));
/// assert!(basic.is_active);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryComponent {
    /// Identifier of the component, also usable as a formula variable.
    pub name: String,
    /// Whether this component is an earning, deduction or contribution.
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Formula producing the component's value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    /// Fixed value used when no formula is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    /// Tax treatment.
    #[serde(default)]
    pub is_taxable: TaxableStatus,
    /// Inactive components are left out of the calculation and its totals.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SalaryComponent {
    /// Creates an active, taxable component with a fixed value.
    pub fn fixed(name: impl Into<String>, kind: ComponentKind, value: Decimal) -> Self {
        Self {
            name: name.into(),
            kind,
            formula: None,
            value: Some(value),
            is_taxable: TaxableStatus::default(),
            is_active: true,
        }
    }

    /// Creates an active, taxable component driven by a formula.
    pub fn formula(
        name: impl Into<String>,
        kind: ComponentKind,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            formula: Some(formula.into()),
            value: None,
            is_taxable: TaxableStatus::default(),
            is_active: true,
        }
    }

    /// Returns a copy of this component marked inactive.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns the formula text, treating a blank formula as absent.
    pub fn formula_text(&self) -> Option<&str> {
        self.formula
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }

    /// Returns true if the component's value comes from a formula.
    pub fn has_formula(&self) -> bool {
        self.formula_text().is_some()
    }

    /// The fixed value of this component, zero when none was given.
    pub fn fixed_value(&self) -> Decimal {
        self.value.unwrap_or(Decimal::ZERO)
    }
}

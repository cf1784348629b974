//! Calculation output models.
//!
//! This module contains the [`SalaryBreakdown`] type and its associated
//! structures that capture the resolved value of every component together with
//! the aggregated totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryComponent;

/// A component together with its resolved value.
///
/// The component's own fields are flattened into the JSON object, so a
/// calculated component serializes as the component plus `calculatedValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedComponent {
    /// The component as declared in the template.
    #[serde(flatten)]
    pub component: SalaryComponent,
    /// The resolved value, rounded to 2 decimal places.
    pub calculated_value: Decimal,
}

/// Aggregated totals for a breakdown.
///
/// # Example
///
/// ```
/// use salary_engine::models::BreakdownSummary;
/// use rust_decimal::Decimal;
///
/// let summary = BreakdownSummary {
///     total_earnings: Decimal::new(70000, 0),
///     total_deductions: Decimal::new(2000, 0),
///     total_contributions: Decimal::new(1800, 0),
///     net_salary: Decimal::new(68000, 0),
///     gross_salary: Decimal::new(70000, 0),
/// };
/// assert_eq!(summary.net_salary, summary.total_earnings - summary.total_deductions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSummary {
    /// Sum of all earning components.
    pub total_earnings: Decimal,
    /// Sum of all deduction components.
    pub total_deductions: Decimal,
    /// Sum of all contribution components.
    pub total_contributions: Decimal,
    /// Earnings minus deductions. Contributions are not included.
    pub net_salary: Decimal,
    /// Equal to total earnings.
    pub gross_salary: Decimal,
}

/// The complete result of resolving a salary template for one CTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    /// Identifier of the template that was calculated.
    pub template_id: String,
    /// Name of the template that was calculated.
    pub template_name: String,
    /// The cost-to-company figure the breakdown was computed for.
    pub ctc: Decimal,
    /// Active components in declaration order, each with its resolved value.
    pub components: Vec<CalculatedComponent>,
    /// Aggregated totals.
    pub summary: BreakdownSummary,
}

impl SalaryBreakdown {
    /// Looks up the resolved value of a component by name.
    pub fn value_of(&self, name: &str) -> Option<Decimal> {
        self.components
            .iter()
            .find(|c| c.component.name == name)
            .map(|c| c.calculated_value)
    }
}

//! Breakdown totals.

use rust_decimal::Decimal;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakdownSummary, CalculatedComponent, ComponentKind};

/// Sums calculated components by kind.
///
/// Net salary is earnings minus deductions; contributions are reported but
/// do not affect it. No rounding beyond what each component already carries.
///
/// # Errors
///
/// Returns [`EngineError::TotalOverflow`] if a total does not fit in a
/// `Decimal`.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::summarize;
/// use salary_engine::models::{CalculatedComponent, ComponentKind, SalaryComponent};
/// use rust_decimal::Decimal;
///
/// let components = vec![
///     CalculatedComponent {
///         component: SalaryComponent::fixed("Basic", ComponentKind::Earning, Decimal::new(500, 0)),
///         calculated_value: Decimal::new(500, 0),
///     },
///     CalculatedComponent {
///         component: SalaryComponent::fixed("Tax", ComponentKind::Deduction, Decimal::new(50, 0)),
///         calculated_value: Decimal::new(50, 0),
///     },
/// ];
///
/// let summary = summarize(&components).unwrap();
/// assert_eq!(summary.net_salary, Decimal::new(450, 0));
/// ```
pub fn summarize(components: &[CalculatedComponent]) -> EngineResult<BreakdownSummary> {
    let mut total_earnings = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;
    let mut total_contributions = Decimal::ZERO;

    for calculated in components {
        let (total, label) = match calculated.component.kind {
            ComponentKind::Earning => (&mut total_earnings, "totalEarnings"),
            ComponentKind::Deduction => (&mut total_deductions, "totalDeductions"),
            ComponentKind::Contribution => (&mut total_contributions, "totalContributions"),
        };
        *total = total
            .checked_add(calculated.calculated_value)
            .ok_or_else(|| overflow(label))?;
    }

    let net_salary = total_earnings
        .checked_sub(total_deductions)
        .ok_or_else(|| overflow("netSalary"))?;

    Ok(BreakdownSummary {
        total_earnings,
        total_deductions,
        total_contributions,
        net_salary,
        gross_salary: total_earnings,
    })
}

fn overflow(total: &str) -> EngineError {
    warn!(total = %total, "Breakdown total overflowed");
    EngineError::TotalOverflow {
        total: total.to_string(),
    }
}

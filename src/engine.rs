//! The salary engine facade.
//!
//! [`SalaryEngine`] bundles the engine options with the template catalog and
//! is what a host service holds on to. It is cheap to clone and safe to share
//! across threads: every calculation builds its own context and only reads
//! the shared configuration.

use std::sync::Arc;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate, check_formulas};
use crate::config::{ConfigLoader, EngineOptions};
use crate::error::EngineResult;
use crate::models::{SalaryBreakdown, SalaryTemplate};

/// Entry point for calculating salary breakdowns.
///
/// # Example
///
/// ```
/// use salary_engine::config::{ConfigLoader, EngineOptions};
/// use salary_engine::engine::SalaryEngine;
/// use salary_engine::models::{ComponentKind, SalaryComponent, SalaryTemplate};
/// use rust_decimal::Decimal;
///
/// let template = SalaryTemplate::new(
///     "tpl_001",
///     "Standard",
///     vec![SalaryComponent::formula("Basic", ComponentKind::Earning, "=CTC*0.5")],
/// );
/// let engine = SalaryEngine::new(ConfigLoader::from_parts(EngineOptions::default(), vec![template]));
///
/// let breakdown = engine.calculate("tpl_001", Decimal::new(100000, 0)).unwrap();
/// assert_eq!(breakdown.summary.gross_salary, Decimal::new(50000, 0));
/// ```
#[derive(Debug, Clone)]
pub struct SalaryEngine {
    config: Arc<ConfigLoader>,
}

impl SalaryEngine {
    /// Creates an engine over the given configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the engine options.
    pub fn options(&self) -> &EngineOptions {
        self.config.options()
    }

    /// Returns all catalog templates in id order.
    pub fn templates(&self) -> Vec<&SalaryTemplate> {
        self.config.templates().collect()
    }

    /// Calculates the breakdown of a catalog template for `ctc`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if `template_id` is not in the catalog, and
    /// otherwise any error from [`SalaryEngine::calculate_template`].
    pub fn calculate(&self, template_id: &str, ctc: Decimal) -> EngineResult<SalaryBreakdown> {
        let template = self.config.get_template(template_id).inspect_err(|err| {
            warn!(template_id = %template_id, error = %err, "Template lookup failed");
        })?;
        self.calculate_template(template, ctc)
    }

    /// Calculates the breakdown of a template supplied by the caller.
    ///
    /// # Errors
    ///
    /// Any error from [`calculate`](crate::calculation::calculate); the whole
    /// calculation is aborted and nothing partial is returned.
    pub fn calculate_template(
        &self,
        template: &SalaryTemplate,
        ctc: Decimal,
    ) -> EngineResult<SalaryBreakdown> {
        let calculation_id = Uuid::new_v4();
        info!(
            calculation_id = %calculation_id,
            template_id = %template.id,
            ctc = %ctc,
            "Processing salary calculation"
        );

        let start_time = Instant::now();
        match calculate(template, ctc, self.config.options()) {
            Ok(breakdown) => {
                info!(
                    calculation_id = %calculation_id,
                    template_id = %template.id,
                    components = breakdown.components.len(),
                    net_salary = %breakdown.summary.net_salary,
                    duration_us = start_time.elapsed().as_micros(),
                    "Calculation completed successfully"
                );
                Ok(breakdown)
            }
            Err(err) => {
                warn!(
                    calculation_id = %calculation_id,
                    template_id = %template.id,
                    error = %err,
                    "Calculation failed"
                );
                Err(err)
            }
        }
    }

    /// Parses every active formula of a catalog template without calculating.
    pub fn check_template(&self, template_id: &str) -> EngineResult<()> {
        check_formulas(self.config.get_template(template_id)?)
    }
}

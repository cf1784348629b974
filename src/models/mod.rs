//! Core data models for the Salary Engine.
//!
//! This module contains the template definitions the engine consumes and the
//! breakdown structures it produces.

mod breakdown;
mod component;
mod template;

pub use breakdown::{BreakdownSummary, CalculatedComponent, SalaryBreakdown};
pub use component::{ComponentKind, SalaryComponent, TaxableStatus};
pub use template::SalaryTemplate;

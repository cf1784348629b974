//! Salary template model.

use serde::{Deserialize, Serialize};

use super::SalaryComponent;

fn default_active() -> bool {
    true
}

/// A named, ordered set of salary components.
///
/// Templates are owned by the host service and treated as immutable input:
/// the engine only ever borrows them.
///
/// # Example
///
/// ```
/// use salary_engine::models::{ComponentKind, SalaryComponent, SalaryTemplate};
///
/// let template = SalaryTemplate::new(
///     "tpl_001",
///     "Standard",
///     vec![SalaryComponent::formula("Basic", ComponentKind::Earning, "=CTC*0.5")],
/// );
/// assert_eq!(template.active_components().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTemplate {
    /// Unique identifier of the template.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Short business code, e.g. "STD-IND".
    #[serde(default)]
    pub code: String,
    /// Free-form template category, e.g. "monthly".
    #[serde(default, rename = "type")]
    pub template_type: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// Components in declaration order.
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
    /// Inactive templates cannot be calculated.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl SalaryTemplate {
    /// Creates an active template with the given components and empty metadata.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        components: Vec<SalaryComponent>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: String::new(),
            template_type: String::new(),
            description: String::new(),
            components,
            is_active: true,
        }
    }

    /// Iterates over the active components in declaration order.
    pub fn active_components(&self) -> impl Iterator<Item = &SalaryComponent> {
        self.components.iter().filter(|c| c.is_active)
    }
}

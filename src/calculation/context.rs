//! The per-calculation symbol table.

use std::collections::HashMap;

use rust_decimal::Decimal;

/// Name under which the cost-to-company figure is seeded.
pub const CTC_VARIABLE: &str = "CTC";

/// Names that formulas may write in any letter case.
pub const RESERVED_VARIABLES: [&str; 6] = ["CTC", "Basic", "HRA", "Conveyance", "LTA", "Medical"];

/// Maps variable names to resolved values for one calculation.
///
/// Seeded with `CTC` and only ever grown: values are appended as components
/// resolve and never removed.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::CalculationContext;
/// use rust_decimal::Decimal;
///
/// let mut context = CalculationContext::new(Decimal::new(100000, 0));
/// context.insert("Basic", Decimal::new(50000, 0));
///
/// assert_eq!(context.resolve("ctc"), Some(Decimal::new(100000, 0)));
/// assert_eq!(context.resolve("BASIC"), Some(Decimal::new(50000, 0)));
/// assert_eq!(context.resolve("Bonus"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationContext {
    values: HashMap<String, Decimal>,
}

impl CalculationContext {
    /// Creates a context seeded with `CTC`.
    pub fn new(ctc: Decimal) -> Self {
        let mut values = HashMap::new();
        values.insert(CTC_VARIABLE.to_string(), ctc);
        Self { values }
    }

    /// Records a resolved value under `name`.
    ///
    /// Names are unique within a validated template, so this only ever adds.
    pub fn insert(&mut self, name: impl Into<String>, value: Decimal) {
        self.values.insert(name.into(), value);
    }

    /// Looks up a variable.
    ///
    /// An exact match always wins. Failing that, a reserved name is matched
    /// ignoring ASCII case; all other names are case-sensitive.
    pub fn resolve(&self, name: &str) -> Option<Decimal> {
        if let Some(value) = self.values.get(name) {
            return Some(*value);
        }

        let reserved = RESERVED_VARIABLES
            .iter()
            .find(|r| r.eq_ignore_ascii_case(name))?;

        // Several keys can fold to the same reserved name; pick the
        // lexicographically smallest so the result does not depend on
        // hash iteration order.
        self.values
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(reserved))
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(_, value)| *value)
    }

    /// Returns true if `name` resolves to a value.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Iterates over the known variable names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of variables currently known, including `CTC`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: a context holds at least `CTC`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

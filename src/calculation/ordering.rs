//! Evaluation order for formula components.
//!
//! In declaration order a formula sees fixed values and any formula declared
//! before it. Dependency order instead sorts formula components so that every
//! referenced formula component comes first, keeping list order wherever the
//! references allow it.

use crate::config::EvaluationOrder;
use crate::error::{EngineError, EngineResult};

use super::context::RESERVED_VARIABLES;

/// A formula component reduced to what ordering needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaNode {
    /// Component name.
    pub name: String,
    /// Identifiers referenced by the component's formula.
    pub references: Vec<String>,
}

impl FormulaNode {
    /// Creates a node.
    pub fn new(name: impl Into<String>, references: Vec<String>) -> Self {
        Self {
            name: name.into(),
            references,
        }
    }

    fn depends_on(&self, other: &FormulaNode) -> bool {
        self.references.iter().any(|r| refers_to(r, &other.name))
    }
}

/// True if the formula identifier `reference` would resolve to `name`.
fn refers_to(reference: &str, name: &str) -> bool {
    reference == name
        || (RESERVED_VARIABLES
            .iter()
            .any(|r| r.eq_ignore_ascii_case(reference))
            && name.eq_ignore_ascii_case(reference))
}

/// Returns the indices of `nodes` in the order they should be evaluated.
///
/// # Errors
///
/// With [`EvaluationOrder::Dependency`], returns
/// [`EngineError::CircularDependency`] naming the components of one cycle,
/// starting and ending with the same name. A formula that references its own
/// component is a cycle of one.
///
/// # Example
///
/// ```
/// use salary_engine::calculation::{resolve_order, FormulaNode};
/// use salary_engine::config::EvaluationOrder;
///
/// let nodes = vec![
///     FormulaNode::new("HRA", vec!["Basic".to_string()]),
///     FormulaNode::new("Basic", vec!["CTC".to_string()]),
/// ];
///
/// assert_eq!(resolve_order(&nodes, EvaluationOrder::Declaration).unwrap(), vec![0, 1]);
/// assert_eq!(resolve_order(&nodes, EvaluationOrder::Dependency).unwrap(), vec![1, 0]);
/// ```
pub fn resolve_order(nodes: &[FormulaNode], order: EvaluationOrder) -> EngineResult<Vec<usize>> {
    match order {
        EvaluationOrder::Declaration => Ok((0..nodes.len()).collect()),
        EvaluationOrder::Dependency => dependency_order(nodes),
    }
}

fn dependency_order(nodes: &[FormulaNode]) -> EngineResult<Vec<usize>> {
    // deps[i] holds the nodes that node i must wait for.
    let deps: Vec<Vec<usize>> = nodes
        .iter()
        .map(|node| {
            (0..nodes.len())
                .filter(|&j| node.depends_on(&nodes[j]))
                .collect()
        })
        .collect();

    let mut done = vec![false; nodes.len()];
    let mut ordered = Vec::with_capacity(nodes.len());

    while ordered.len() < nodes.len() {
        let ready = (0..nodes.len()).find(|&i| !done[i] && deps[i].iter().all(|&d| done[d]));
        match ready {
            Some(i) => {
                done[i] = true;
                ordered.push(i);
            }
            None => {
                return Err(EngineError::CircularDependency {
                    components: find_cycle(nodes, &deps, &done),
                });
            }
        }
    }

    Ok(ordered)
}

/// Walks unresolved dependencies until a node repeats.
///
/// Only called when every pending node waits on another pending node, so the
/// walk always finds a cycle.
fn find_cycle(nodes: &[FormulaNode], deps: &[Vec<usize>], done: &[bool]) -> Vec<String> {
    let mut path: Vec<usize> = Vec::new();
    let mut current = done.iter().position(|d| !d);

    while let Some(i) = current {
        if let Some(start) = path.iter().position(|&p| p == i) {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|&p| nodes[p].name.clone())
                .collect();
            cycle.push(nodes[i].name.clone());
            return cycle;
        }
        path.push(i);
        current = deps[i].iter().copied().find(|&d| !done[d]);
    }

    path.into_iter().map(|p| nodes[p].name.clone()).collect()
}

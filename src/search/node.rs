//! Branch-and-bound node representation.

use crate::model::{Direction, Problem};

/// A node of the branch-and-bound tree.
///
/// Topology is shared with the single [`Problem`]; a node owns only the
/// bound vectors tightened along its path from the root, the relaxation
/// objective of its parent, and its depth. Cloning a node therefore
/// copies two `f64` vectors, not the problem.
#[derive(Debug, Clone)]
pub struct BbNode {
    /// Depth in the tree, 0 for the root.
    pub depth: usize,

    /// Relaxation objective of the parent node, for diagnostics.
    pub bound: f64,

    /// Per-variable lower bounds in effect for this subtree.
    pub lower: Vec<f64>,

    /// Per-variable upper bounds in effect for this subtree.
    pub upper: Vec<f64>,
}

impl BbNode {
    /// Root node: bounds copied from the problem's variables, bound set
    /// to the weakest value for the direction.
    pub fn root(problem: &Problem) -> Self {
        let bound = match problem.direction() {
            Direction::Minimize => f64::NEG_INFINITY,
            Direction::Maximize => f64::INFINITY,
        };
        Self {
            depth: 0,
            bound,
            lower: problem.variables().iter().map(|v| v.lower()).collect(),
            upper: problem.variables().iter().map(|v| v.upper()).collect(),
        }
    }

    /// Down child: `upper[var]` tightened to `floor(value)`, intersected
    /// with the current bound.
    pub fn down_child(&self, var: usize, value: f64, relaxation_objective: f64) -> Self {
        let mut child = self.child(relaxation_objective);
        child.upper[var] = self.upper[var].min(value.floor());
        child
    }

    /// Up child: `lower[var]` tightened to `ceil(value)`, intersected
    /// with the current bound.
    pub fn up_child(&self, var: usize, value: f64, relaxation_objective: f64) -> Self {
        let mut child = self.child(relaxation_objective);
        child.lower[var] = self.lower[var].max(value.ceil());
        child
    }

    fn child(&self, relaxation_objective: f64) -> Self {
        let mut child = self.clone();
        child.depth = self.depth + 1;
        child.bound = relaxation_objective;
        child
    }
}

//! Relaxation backend trait and result types.

use crate::model::Problem;

/// Status of a relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// A feasible point was found; values and objective are set.
    Optimal,

    /// No feasible point exists under the node's bounds.
    Infeasible,

    /// The relaxation is unbounded. Only backends that can certify
    /// unboundedness report this; the shipped repair backend never does.
    Unbounded,
}

/// Result of solving a node's LP relaxation.
#[derive(Debug, Clone)]
pub struct LpSolution {
    /// Solve status.
    pub status: LpStatus,

    /// Variable values, one per problem variable. Empty on infeasibility.
    pub values: Vec<f64>,

    /// Objective at `values`, raw (never sign-flipped).
    pub objective_value: f64,

    /// Passes (or iterations) the backend performed.
    pub iterations: usize,
}

impl LpSolution {
    /// An infeasible result.
    pub fn infeasible() -> Self {
        Self {
            status: LpStatus::Infeasible,
            values: Vec::new(),
            objective_value: f64::INFINITY,
            iterations: 0,
        }
    }
}

/// Solves the continuous relaxation of a node's problem.
///
/// Integrality of variable kinds is ignored. The node's overlay bounds
/// replace the variables' own bounds; topology, objective, and
/// constraints come from the shared [`Problem`]. Implementations hold no
/// per-problem state, so one backend value serves the whole search.
pub trait RelaxationBackend {
    /// Solve the relaxation of `problem` under `lower`/`upper`, each of
    /// length `problem.num_variables()`.
    fn solve_relaxation(&self, problem: &Problem, lower: &[f64], upper: &[f64]) -> LpSolution;
}

//! Branch-and-bound driver.

use std::time::Instant;

use log::{debug, info};

use super::{BbNode, NodeStack};
use crate::model::{Incumbent, Problem, Solution, Status};
use crate::relax::{BoundRepair, LpStatus, RelaxationBackend};
use crate::settings::{SolverSettings, INT_TOL};

/// Branch-and-bound driver.
///
/// Owns the node stack, the incumbent, and the termination logic for one
/// solve at a time; the driver itself carries only configuration, so a
/// value may be reused across problems. Traversal is depth-first with the
/// down branch explored before the up branch, making the search
/// deterministic for a fixed problem and configuration.
pub struct BranchAndBound<B = BoundRepair> {
    backend: B,
    settings: SolverSettings,
}

impl BranchAndBound<BoundRepair> {
    /// Driver with the shipped repair backend and default settings.
    pub fn new() -> Self {
        Self::with_backend(BoundRepair)
    }
}

impl Default for BranchAndBound<BoundRepair> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: RelaxationBackend> BranchAndBound<B> {
    /// Driver with a caller-supplied relaxation backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            settings: SolverSettings::default(),
        }
    }

    /// Replace the settings wholesale.
    pub fn with_settings(mut self, settings: SolverSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Enable or disable progress logging.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.settings.verbose = verbose;
    }

    /// Cap the number of nodes processed.
    pub fn set_iteration_limit(&mut self, limit: usize) {
        self.settings.iteration_limit = limit;
    }

    /// Solve `problem` to proven integer optimality or a resource limit.
    pub fn solve(&self, problem: &Problem) -> Solution {
        let start = Instant::now();
        let limit = self.settings.iteration_limit;

        let mut incumbent = Incumbent::new(problem.direction(), problem.num_variables());
        let mut stack = NodeStack::new();
        stack.push(BbNode::root(problem));

        let mut nodes_processed = 0usize;
        let mut nodes_pruned = 0usize;
        let mut unbounded = false;

        while nodes_processed < limit {
            let Some(node) = stack.pop() else {
                break;
            };
            nodes_processed += 1;

            if self.settings.verbose && nodes_processed % self.settings.log_freq.max(1) == 0 {
                info!(
                    "processed {} nodes, {} open, best {:.6}",
                    nodes_processed,
                    stack.len(),
                    incumbent.objective()
                );
            }

            let lp = self
                .backend
                .solve_relaxation(problem, &node.lower, &node.upper);
            match lp.status {
                LpStatus::Infeasible => {
                    nodes_pruned += 1;
                    if self.settings.verbose {
                        debug!(
                            "node {nodes_processed} depth {}: relaxation infeasible, pruned",
                            node.depth
                        );
                    }
                    continue;
                }
                LpStatus::Unbounded => {
                    unbounded = true;
                    break;
                }
                LpStatus::Optimal => {}
            }

            if incumbent.dominates(lp.objective_value) {
                nodes_pruned += 1;
                if self.settings.verbose {
                    debug!(
                        "node {nodes_processed} depth {}: bound {:.6} pruned against {:.6}",
                        node.depth,
                        lp.objective_value,
                        incumbent.objective()
                    );
                }
                continue;
            }

            if problem.is_integer_feasible(&lp.values, INT_TOL) {
                // The relaxation objective bounds every integer point in
                // this subtree, so nothing below can beat it: record and
                // fathom.
                if incumbent.try_update(&lp.values, lp.objective_value) && self.settings.verbose {
                    info!(
                        "node {nodes_processed}: new incumbent, objective {:.6}",
                        lp.objective_value
                    );
                }
                continue;
            }

            let Some((var, value)) = branch_variable(problem, &lp.values) else {
                // Integrality failed but no candidate cleared the
                // branching tolerance; drop the node rather than loop.
                continue;
            };

            if self.settings.verbose {
                debug!(
                    "node {nodes_processed} depth {}: branching on x{var} = {value:.6}",
                    node.depth
                );
            }

            stack.push(node.up_child(var, value, lp.objective_value));
            stack.push(node.down_child(var, value, lp.objective_value));
        }

        let status = if unbounded {
            Status::Unbounded
        } else if stack.is_empty() {
            if incumbent.exists() {
                Status::Optimal
            } else {
                Status::Infeasible
            }
        } else {
            Status::IterationLimit
        };

        if self.settings.verbose {
            info!(
                "search finished: {status:?}, {nodes_processed} nodes processed, {nodes_pruned} pruned, {} incumbent updates",
                incumbent.update_count()
            );
        }

        Solution {
            status,
            values: incumbent.values().to_vec(),
            objective_value: incumbent.objective(),
            iterations: nodes_processed,
            solve_time: start.elapsed().as_millis() as f64 / 1000.0,
        }
    }
}

/// Integer-kind variable with the largest fractional part, lowest index
/// on ties. `None` when every candidate is within tolerance.
fn branch_variable(problem: &Problem, x: &[f64]) -> Option<(usize, f64)> {
    let mut branch = None;
    let mut max_fractional = 0.0;

    for (i, var) in problem.variables().iter().enumerate() {
        if !var.kind().is_integral() {
            continue;
        }
        let value = x[i];
        let fractional = (value - value.round()).abs();
        if fractional > INT_TOL && fractional > max_fractional {
            max_fractional = fractional;
            branch = Some((i, value));
        }
    }

    branch
}

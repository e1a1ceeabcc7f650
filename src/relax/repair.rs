//! Bound-driven feasibility-repair relaxation backend.
//!
//! This is not a simplex method. It starts each variable at the bound
//! that favors the objective, then sweeps the constraints, spreading each
//! violation across the variables that can still move in the required
//! direction, proportionally to coefficient magnitude. The sweep repeats
//! until every constraint holds or the pass budget runs out; a small
//! residual violation is accepted at the end.
//!
//! Known limitations, inherent to the scheme: problems whose optimum lies
//! strictly inside the feasible box are under-optimized, and
//! unboundedness cannot be certified, so open bounds are substituted with
//! finite stand-ins. Callers that need either property must plug in a
//! full LP backend through [`RelaxationBackend`].

use log::debug;

use super::backend::{LpSolution, LpStatus, RelaxationBackend};
use crate::model::{Constraint, Direction, Problem, Sense};
use crate::settings::{
    FEAS_TOL, MAX_REPAIR_PASSES, REPAIR_ACCEPT_TOTAL, REPAIR_BAILOUT_PASS,
    REPAIR_BAILOUT_VIOLATION, REPAIR_TOL, UNBOUNDED_NEG, UNBOUNDED_POS,
};

/// The shipped relaxation backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoundRepair;

enum Repair {
    /// All constraints hold after this many passes.
    Satisfied(usize),
    /// A violation above the bailout threshold persisted.
    Stuck,
    /// Pass budget exhausted; residual violation undecided.
    Exhausted,
}

impl RelaxationBackend for BoundRepair {
    fn solve_relaxation(&self, problem: &Problem, lower: &[f64], upper: &[f64]) -> LpSolution {
        // Branching can cross bounds; an empty box is the node's
        // infeasibility signal.
        for i in 0..problem.num_variables() {
            if lower[i] > upper[i] + FEAS_TOL {
                return LpSolution::infeasible();
            }
        }

        let mut values = initial_point(problem, lower, upper);

        let (accepted, iterations) = match repair(problem, lower, upper, &mut values) {
            Repair::Satisfied(passes) => (true, passes),
            Repair::Stuck => (false, MAX_REPAIR_PASSES),
            Repair::Exhausted => {
                let total: f64 = problem
                    .constraints()
                    .iter()
                    .map(|c| c.violation(&values))
                    .sum();
                debug!("repair exhausted, residual violation {total:.6}");
                (total < REPAIR_ACCEPT_TOTAL, MAX_REPAIR_PASSES)
            }
        };

        if !accepted {
            return LpSolution::infeasible();
        }

        let objective_value = problem.calculate_objective(&values);
        LpSolution {
            status: LpStatus::Optimal,
            values,
            objective_value,
            iterations,
        }
    }
}

/// Starting point: fixed variables at their value, free variables at the
/// bound that favors the objective, open bounds replaced by finite
/// stand-ins.
fn initial_point(problem: &Problem, lower: &[f64], upper: &[f64]) -> Vec<f64> {
    let maximize = problem.direction() == Direction::Maximize;

    problem
        .variables()
        .iter()
        .enumerate()
        .map(|(i, var)| {
            let (lo, hi) = (lower[i], upper[i]);
            let chosen = if (hi - lo).abs() < FEAS_TOL {
                lo
            } else if maximize == (var.objective() > 0.0) {
                hi
            } else {
                lo
            };
            if chosen.is_infinite() {
                if chosen > 0.0 {
                    UNBOUNDED_POS
                } else {
                    UNBOUNDED_NEG
                }
            } else {
                chosen
            }
        })
        .collect()
}

/// Sweep the constraints until all hold or the pass budget runs out.
///
/// Each pass fixes constraints in order against the current point, so a
/// repair made for one constraint is visible to the next within the same
/// pass.
fn repair(problem: &Problem, lower: &[f64], upper: &[f64], x: &mut [f64]) -> Repair {
    for pass in 0..MAX_REPAIR_PASSES {
        let mut all_satisfied = true;
        let mut max_violation = 0.0_f64;

        for constraint in problem.constraints() {
            let lhs = constraint.lhs(x);
            let violation = constraint.violation_of(lhs);
            if violation <= REPAIR_TOL {
                continue;
            }
            all_satisfied = false;
            max_violation = max_violation.max(violation);
            redistribute(constraint, lhs, x, lower, upper);
        }

        if all_satisfied {
            return Repair::Satisfied(pass + 1);
        }
        if pass > REPAIR_BAILOUT_PASS && max_violation > REPAIR_BAILOUT_VIOLATION {
            debug!("repair stuck at pass {pass}, max violation {max_violation:.6}");
            return Repair::Stuck;
        }
    }
    Repair::Exhausted
}

/// Spread one constraint's violation across its movable variables,
/// proportionally to coefficient magnitude, clamped to the node bounds.
fn redistribute(constraint: &Constraint, lhs: f64, x: &mut [f64], lower: &[f64], upper: &[f64]) {
    let rhs = constraint.rhs();
    let target = match constraint.sense() {
        Sense::LessEqual => {
            if lhs > rhs {
                rhs - lhs
            } else {
                0.0
            }
        }
        Sense::GreaterEqual => {
            if lhs < rhs {
                rhs - lhs
            } else {
                0.0
            }
        }
        Sense::Equal => rhs - lhs,
    };
    if target.abs() < FEAS_TOL {
        return;
    }

    // A variable is movable when it still has slack on the side the
    // target change needs: upward when its coefficient and the target
    // agree in sign, downward otherwise.
    let mut total_weight = 0.0;
    let movable: Vec<(usize, f64)> = constraint
        .coefficients()
        .iter()
        .copied()
        .filter(|&(var, coeff)| {
            if var >= x.len() || coeff.abs() < FEAS_TOL {
                return false;
            }
            let ok = if target * coeff > 0.0 {
                x[var] < upper[var] - FEAS_TOL
            } else {
                x[var] > lower[var] + FEAS_TOL
            };
            if ok {
                total_weight += coeff.abs();
            }
            ok
        })
        .collect();

    if movable.is_empty() || total_weight < FEAS_TOL {
        return;
    }

    for (var, coeff) in movable {
        let weight = coeff.abs() / total_weight;
        let step = target * weight / coeff;
        x[var] = (x[var] + step).min(upper[var]).max(lower[var]);
    }
}

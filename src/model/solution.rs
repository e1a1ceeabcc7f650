//! Solve status, solution record, and incumbent tracking.

use crate::model::problem::Direction;
use crate::settings::INT_TOL;

/// Outcome of a solve.
///
/// Discriminants are fixed; they travel verbatim across the C boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Proven optimal integer-feasible solution.
    Optimal = 2,

    /// No integer-feasible point exists.
    Infeasible = 3,

    /// The relaxation is unbounded in the optimization direction.
    Unbounded = 4,

    /// Reserved for hosts that enforce a wall-clock cutoff; the driver
    /// itself never produces it.
    TimeLimit = 5,

    /// Node budget exhausted with the tree not fully explored.
    IterationLimit = 6,

    /// Solve aborted without a classification.
    Unknown = 7,
}

impl Status {
    /// True when the solution vector may hold a usable incumbent. At a
    /// limit status the incumbent is the best found so far and may be
    /// absent; check [`Solution::objective_value`] for finiteness.
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            Status::Optimal | Status::IterationLimit | Status::TimeLimit
        )
    }

    /// True when optimality was proven.
    pub fn is_optimal(&self) -> bool {
        matches!(self, Status::Optimal)
    }
}

/// Result of a branch-and-bound solve.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solve status.
    pub status: Status,

    /// Variable values, one per problem variable. Zero-filled until an
    /// incumbent is found.
    pub values: Vec<f64>,

    /// Objective at `values`; meaningful only when `status` is
    /// [`Status::Optimal`].
    pub objective_value: f64,

    /// Branch-and-bound nodes processed.
    pub iterations: usize,

    /// Wall-clock solve time in seconds, millisecond resolution.
    pub solve_time: f64,
}

/// Best integer-feasible solution found so far.
///
/// Acceptance is strict improvement with a fixed tolerance; the same
/// tolerance drives bound pruning so that an incumbent and the node that
/// produced it agree on dominance.
#[derive(Debug, Clone)]
pub struct Incumbent {
    direction: Direction,
    objective: f64,
    values: Vec<f64>,
    updates: u64,
}

impl Incumbent {
    /// Empty incumbent: `+inf` objective for minimization, `-inf` for
    /// maximization, zero-filled values.
    pub fn new(direction: Direction, num_variables: usize) -> Self {
        let objective = match direction {
            Direction::Minimize => f64::INFINITY,
            Direction::Maximize => f64::NEG_INFINITY,
        };
        Self {
            direction,
            objective,
            values: vec![0.0; num_variables],
            updates: 0,
        }
    }

    /// Whether a solution has been accepted.
    pub fn exists(&self) -> bool {
        self.objective.is_finite()
    }

    /// Objective of the incumbent, `±inf` when none exists.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Values of the incumbent, zero-filled when none exists.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of accepted updates.
    pub fn update_count(&self) -> u64 {
        self.updates
    }

    /// Accept `x` if its objective strictly improves on the incumbent.
    pub fn try_update(&mut self, x: &[f64], objective: f64) -> bool {
        let improved = match self.direction {
            Direction::Minimize => objective < self.objective - INT_TOL,
            Direction::Maximize => objective > self.objective + INT_TOL,
        };
        if improved {
            self.values = x.to_vec();
            self.objective = objective;
            self.updates += 1;
        }
        improved
    }

    /// Dominance test for pruning: a node whose relaxation objective
    /// cannot beat the incumbent is fathomed.
    pub fn dominates(&self, relaxation_objective: f64) -> bool {
        match self.direction {
            Direction::Minimize => relaxation_objective >= self.objective - INT_TOL,
            Direction::Maximize => relaxation_objective <= self.objective + INT_TOL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incumbent_minimize() {
        let mut inc = Incumbent::new(Direction::Minimize, 2);
        assert!(!inc.exists());
        assert_eq!(inc.values(), &[0.0, 0.0]);

        assert!(inc.try_update(&[1.0, 2.0], 10.0));
        assert!(inc.exists());
        assert_eq!(inc.objective(), 10.0);
        assert_eq!(inc.update_count(), 1);

        // Worse and equal rejected
        assert!(!inc.try_update(&[2.0, 3.0], 15.0));
        assert!(!inc.try_update(&[2.0, 3.0], 10.0));
        assert_eq!(inc.update_count(), 1);

        assert!(inc.try_update(&[0.0, 5.0], 5.0));
        assert_eq!(inc.values(), &[0.0, 5.0]);
        assert_eq!(inc.update_count(), 2);
    }

    #[test]
    fn test_incumbent_maximize() {
        let mut inc = Incumbent::new(Direction::Maximize, 1);
        assert_eq!(inc.objective(), f64::NEG_INFINITY);

        assert!(inc.try_update(&[1.0], 3.0));
        assert!(!inc.try_update(&[2.0], 2.0));
        assert!(inc.try_update(&[3.0], 7.0));
        assert_eq!(inc.objective(), 7.0);
    }

    #[test]
    fn test_dominance() {
        let mut inc = Incumbent::new(Direction::Minimize, 1);

        // Empty incumbent dominates nothing
        assert!(!inc.dominates(1e12));

        inc.try_update(&[0.0], 10.0);
        assert!(inc.dominates(10.0));
        assert!(inc.dominates(12.0));
        assert!(!inc.dominates(9.0));

        let mut inc = Incumbent::new(Direction::Maximize, 1);
        inc.try_update(&[0.0], 10.0);
        assert!(inc.dominates(10.0));
        assert!(inc.dominates(8.0));
        assert!(!inc.dominates(11.0));
    }

    #[test]
    fn test_status_helpers() {
        assert!(Status::Optimal.has_solution());
        assert!(Status::IterationLimit.has_solution());
        assert!(!Status::Infeasible.has_solution());
        assert!(!Status::Unbounded.has_solution());

        assert!(Status::Optimal.is_optimal());
        assert!(!Status::IterationLimit.is_optimal());
    }

    #[test]
    fn test_status_encoding() {
        assert_eq!(Status::Optimal as i32, 2);
        assert_eq!(Status::Infeasible as i32, 3);
        assert_eq!(Status::Unbounded as i32, 4);
        assert_eq!(Status::TimeLimit as i32, 5);
        assert_eq!(Status::IterationLimit as i32, 6);
        assert_eq!(Status::Unknown as i32, 7);
    }
}

//! Linear constraints and their evaluation.

use crate::settings::FEAS_TOL;

/// Relational sense of a linear constraint.
///
/// Discriminants are fixed; they travel verbatim across the C boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Left-hand side at most the right-hand side.
    LessEqual = 1,

    /// Left-hand side at least the right-hand side.
    GreaterEqual = 2,

    /// Left-hand side equal to the right-hand side.
    Equal = 3,
}

/// A linear constraint `Σ aᵢ·xᵢ  (sense)  rhs`.
///
/// Coefficients are stored sparsely as `(variable index, coefficient)`
/// pairs; an absent entry is a zero coefficient. Setting the coefficient
/// of an index twice keeps the last value.
#[derive(Debug, Clone)]
pub struct Constraint {
    name: String,
    sense: Sense,
    rhs: f64,
    coefficients: Vec<(usize, f64)>,
}

impl Constraint {
    pub(crate) fn new(name: impl Into<String>, sense: Sense, rhs: f64) -> Self {
        Self {
            name: name.into(),
            sense,
            rhs,
            coefficients: Vec::new(),
        }
    }

    pub(crate) fn set_coefficient(&mut self, var: usize, coeff: f64) {
        if let Some(entry) = self.coefficients.iter_mut().find(|(v, _)| *v == var) {
            entry.1 = coeff;
        } else {
            self.coefficients.push((var, coeff));
        }
    }

    /// Constraint name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relational sense.
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Right-hand side.
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Stored coefficient entries, in insertion order.
    pub fn coefficients(&self) -> &[(usize, f64)] {
        &self.coefficients
    }

    /// Compute `Σ aᵢ·xᵢ` over the stored entries.
    ///
    /// Indices outside `x` contribute nothing; they cannot arise for
    /// constraints built through [`Problem`](crate::Problem).
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .filter(|(v, _)| *v < x.len())
            .map(|(v, a)| a * x[*v])
            .sum()
    }

    /// Violation amount for a precomputed left-hand side.
    ///
    /// Positive when the constraint is violated, zero when it holds
    /// exactly or with slack.
    pub fn violation_of(&self, lhs: f64) -> f64 {
        match self.sense {
            Sense::LessEqual => (lhs - self.rhs).max(0.0),
            Sense::GreaterEqual => (self.rhs - lhs).max(0.0),
            Sense::Equal => (lhs - self.rhs).abs(),
        }
    }

    /// Positive amount by which `x` violates the constraint.
    pub fn violation(&self, x: &[f64]) -> f64 {
        self.violation_of(self.lhs(x))
    }

    /// Check satisfaction at `x` within `tol`.
    pub fn is_satisfied_within(&self, x: &[f64], tol: f64) -> bool {
        self.violation(x) <= tol
    }

    /// Check satisfaction at `x` within the fixed feasibility tolerance.
    pub fn is_satisfied(&self, x: &[f64]) -> bool {
        self.is_satisfied_within(x, FEAS_TOL)
    }
}

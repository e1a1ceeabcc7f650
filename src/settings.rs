//! Solver settings and the fixed numeric tolerances.
//!
//! The tolerances are deliberately constants rather than settings fields:
//! every comparison in the crate reads them from this one site, and the
//! documented solver behavior assumes exactly these values.

/// Feasibility tolerance for constraint satisfaction and variable bounds.
pub(crate) const FEAS_TOL: f64 = 1e-9;

/// Tolerance for integrality tests, bound pruning, and incumbent
/// comparison.
pub(crate) const INT_TOL: f64 = 1e-6;

/// Violation threshold for the repair loop to treat a constraint as
/// violated.
pub(crate) const REPAIR_TOL: f64 = 1e-6;

/// Maximum repair passes over the constraint set per relaxation solve.
pub(crate) const MAX_REPAIR_PASSES: usize = 20;

/// Pass index after which a large residual violation aborts the repair.
pub(crate) const REPAIR_BAILOUT_PASS: usize = 5;

/// Single-constraint violation that triggers the abort above.
pub(crate) const REPAIR_BAILOUT_VIOLATION: f64 = 1.0;

/// Total residual violation accepted when the repair loop exhausts its
/// passes.
pub(crate) const REPAIR_ACCEPT_TOTAL: f64 = 0.1;

/// Stand-in for `+inf` when an initial assignment lands on an open bound.
pub(crate) const UNBOUNDED_POS: f64 = 100.0;

/// Stand-in for `-inf` when an initial assignment lands on an open bound.
pub(crate) const UNBOUNDED_NEG: f64 = 0.0;

/// Branch-and-bound solver settings.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Emit progress information through the `log` facade.
    pub verbose: bool,

    /// Maximum number of branch-and-bound nodes to process.
    pub iteration_limit: usize,

    /// Emit a progress line every `log_freq` nodes (verbose only).
    pub log_freq: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            iteration_limit: 5000,
            log_freq: 10,
        }
    }
}

impl SolverSettings {
    /// Settings with progress logging on every node.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set the node limit.
    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }

    /// Set the progress-line frequency.
    pub fn with_log_freq(mut self, freq: usize) -> Self {
        self.log_freq = freq.max(1);
        self
    }
}

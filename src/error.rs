//! Error types for model construction.

use thiserror::Error;

/// Errors from model-building operations.
///
/// These cover misuse of the construction API only. Solver outcomes such
/// as infeasibility or unboundedness are reported through
/// [`Status`](crate::Status), never as errors. A failed operation leaves
/// the model unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Variable index out of range
    #[error("variable index {index} out of range ({len} variables)")]
    VariableIndex {
        /// Offending index.
        index: usize,
        /// Number of variables in the problem.
        len: usize,
    },

    /// Constraint index out of range
    #[error("constraint index {index} out of range ({len} constraints)")]
    ConstraintIndex {
        /// Offending index.
        index: usize,
        /// Number of constraints in the problem.
        len: usize,
    },

    /// Lower bound above upper bound
    #[error("invalid bounds [{lower}, {upper}] for variable {index}")]
    InvalidBounds {
        /// Variable the bounds were set on.
        index: usize,
        /// Rejected lower bound.
        lower: f64,
        /// Rejected upper bound.
        upper: f64,
    },
}

/// Result type for model-building operations.
pub type ModelResult<T> = Result<T, ModelError>;

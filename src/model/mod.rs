//! Problem, constraint, and solution types.

mod constraint;
mod problem;
mod solution;

pub use constraint::{Constraint, Sense};
pub use problem::{Direction, Problem, VarKind, Variable};
pub use solution::{Incumbent, Solution, Status};

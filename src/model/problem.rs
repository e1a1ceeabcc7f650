//! Problem representation: variables, bounds, objective, constraints.

use crate::error::{ModelError, ModelResult};
use crate::model::constraint::{Constraint, Sense};
use crate::settings::FEAS_TOL;

/// Kind of a decision variable.
///
/// Discriminants are fixed; they travel verbatim across the C boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Any real value within bounds.
    Continuous = 0,

    /// Integer values within bounds.
    Integer = 1,

    /// Integer variable whose bounds the caller is expected to set to
    /// `[0, 1]`. The model does not clamp them.
    Binary = 2,
}

impl VarKind {
    /// Integer and binary variables are subject to the integrality test.
    pub fn is_integral(self) -> bool {
        matches!(self, VarKind::Integer | VarKind::Binary)
    }
}

/// Optimization direction.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Maximize the objective.
    Maximize = 0,

    /// Minimize the objective.
    Minimize = 1,
}

/// A decision variable.
///
/// Bounds default to `(-inf, +inf)` and the objective coefficient to
/// zero; both are set through [`Problem`].
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    kind: VarKind,
    lower: f64,
    upper: f64,
    objective: f64,
}

impl Variable {
    fn new(name: impl Into<String>, kind: VarKind) -> Self {
        Self {
            name: name.into(),
            kind,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            objective: 0.0,
        }
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable kind.
    pub fn kind(&self) -> VarKind {
        self.kind
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Coefficient in the objective function.
    pub fn objective(&self) -> f64 {
        self.objective
    }
}

/// A mixed-integer linear program.
///
/// Variables and constraints are identified by their insertion index,
/// which is stable for the lifetime of the problem. The topology is
/// append-only; bounds and coefficients may be rewritten in place.
#[derive(Debug, Clone)]
pub struct Problem {
    name: String,
    direction: Direction,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
}

impl Problem {
    /// Create an empty problem.
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            variables: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Problem name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optimization direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Change the optimization direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Append a variable with default bounds `(-inf, +inf)` and objective
    /// coefficient zero. Returns its index.
    pub fn add_variable(&mut self, name: impl Into<String>, kind: VarKind) -> usize {
        self.variables.push(Variable::new(name, kind));
        self.variables.len() - 1
    }

    /// Set the bounds of a variable.
    ///
    /// Rejects `lower > upper`; an infeasible box is never a valid model
    /// state at this level (the search tightens bounds through its own
    /// per-node overlay, not through this method).
    pub fn set_bounds(&mut self, index: usize, lower: f64, upper: f64) -> ModelResult<()> {
        self.check_variable(index)?;
        if lower > upper {
            return Err(ModelError::InvalidBounds { index, lower, upper });
        }
        self.variables[index].lower = lower;
        self.variables[index].upper = upper;
        Ok(())
    }

    /// Set the objective coefficient of a variable.
    pub fn set_objective_coefficient(&mut self, index: usize, coeff: f64) -> ModelResult<()> {
        self.check_variable(index)?;
        self.variables[index].objective = coeff;
        Ok(())
    }

    /// Append a constraint with an empty coefficient set. Returns its
    /// index.
    pub fn add_constraint(&mut self, name: impl Into<String>, sense: Sense, rhs: f64) -> usize {
        self.constraints.push(Constraint::new(name, sense, rhs));
        self.constraints.len() - 1
    }

    /// Set the coefficient of `variable` in `constraint`. Writing the
    /// same variable twice keeps the last value.
    pub fn add_constraint_coefficient(
        &mut self,
        constraint: usize,
        variable: usize,
        coeff: f64,
    ) -> ModelResult<()> {
        if constraint >= self.constraints.len() {
            return Err(ModelError::ConstraintIndex {
                index: constraint,
                len: self.constraints.len(),
            });
        }
        self.check_variable(variable)?;
        self.constraints[constraint].set_coefficient(variable, coeff);
        Ok(())
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Variable by index.
    pub fn variable(&self, index: usize) -> Option<&Variable> {
        self.variables.get(index)
    }

    /// All variables, in index order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Constraint by index.
    pub fn constraint(&self, index: usize) -> Option<&Constraint> {
        self.constraints.get(index)
    }

    /// All constraints, in index order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Inner product of `values` with the objective coefficients.
    ///
    /// The raw value is returned; maximization problems are not
    /// sign-flipped.
    pub fn calculate_objective(&self, values: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .map(|(v, x)| v.objective * x)
            .sum()
    }

    /// Check `values` against variable bounds and every constraint,
    /// within the feasibility tolerance.
    pub fn is_feasible(&self, values: &[f64]) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        for (v, &x) in self.variables.iter().zip(values) {
            if x < v.lower - FEAS_TOL || x > v.upper + FEAS_TOL {
                return false;
            }
        }
        self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    /// Check that every integer-kind variable is within `tol` of an
    /// integer.
    pub fn is_integer_feasible(&self, values: &[f64], tol: f64) -> bool {
        self.variables
            .iter()
            .zip(values)
            .filter(|(v, _)| v.kind.is_integral())
            .all(|(_, &x)| (x - x.round()).abs() <= tol)
    }

    fn check_variable(&self, index: usize) -> ModelResult<()> {
        if index >= self.variables.len() {
            return Err(ModelError::VariableIndex {
                index,
                len: self.variables.len(),
            });
        }
        Ok(())
    }
}

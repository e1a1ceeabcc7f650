//! End-to-end MILP scenarios for the branch-and-bound solver.

use mipsolver::{
    solve, BranchAndBound, Direction, Problem, Sense, SolverSettings, Status, VarKind,
};

/// max 5 x0 + 8 x1  s.t.  2 x0 + 4 x1 <= 10,  x0, x1 binary.
fn binary_knapsack() -> Problem {
    let mut p = Problem::new("knapsack", Direction::Maximize);
    let x0 = p.add_variable("x0", VarKind::Binary);
    let x1 = p.add_variable("x1", VarKind::Binary);
    p.set_bounds(x0, 0.0, 1.0).unwrap();
    p.set_bounds(x1, 0.0, 1.0).unwrap();
    p.set_objective_coefficient(x0, 5.0).unwrap();
    p.set_objective_coefficient(x1, 8.0).unwrap();
    let c = p.add_constraint("capacity", Sense::LessEqual, 10.0);
    p.add_constraint_coefficient(c, x0, 2.0).unwrap();
    p.add_constraint_coefficient(c, x1, 4.0).unwrap();
    p
}

/// max x0  s.t.  x0 <= 3.5,  x0 integer, x0 >= 0.
fn fractional_cap() -> Problem {
    let mut p = Problem::new("cap", Direction::Maximize);
    let x = p.add_variable("x0", VarKind::Integer);
    p.set_bounds(x, 0.0, f64::INFINITY).unwrap();
    p.set_objective_coefficient(x, 1.0).unwrap();
    let c = p.add_constraint("cap", Sense::LessEqual, 3.5);
    p.add_constraint_coefficient(c, x, 1.0).unwrap();
    p
}

/// min x0 + x1  s.t.  x0 + x1 >= 5,  x0, x1 integer, >= 0.
fn covering_pair() -> Problem {
    let mut p = Problem::new("cover", Direction::Minimize);
    for name in ["x0", "x1"] {
        let i = p.add_variable(name, VarKind::Integer);
        p.set_bounds(i, 0.0, f64::INFINITY).unwrap();
        p.set_objective_coefficient(i, 1.0).unwrap();
    }
    let c = p.add_constraint("cover", Sense::GreaterEqual, 5.0);
    p.add_constraint_coefficient(c, 0, 1.0).unwrap();
    p.add_constraint_coefficient(c, 1, 1.0).unwrap();
    p
}

/// max 2 x0 + 3 x1  s.t.  x0 + x1 <= 4,  x0 + 2 x1 <= 6,  integers >= 0.
fn two_resource() -> Problem {
    let mut p = Problem::new("two-resource", Direction::Maximize);
    for (name, obj) in [("x0", 2.0), ("x1", 3.0)] {
        let i = p.add_variable(name, VarKind::Integer);
        p.set_bounds(i, 0.0, f64::INFINITY).unwrap();
        p.set_objective_coefficient(i, obj).unwrap();
    }
    let c1 = p.add_constraint("r1", Sense::LessEqual, 4.0);
    p.add_constraint_coefficient(c1, 0, 1.0).unwrap();
    p.add_constraint_coefficient(c1, 1, 1.0).unwrap();
    let c2 = p.add_constraint("r2", Sense::LessEqual, 6.0);
    p.add_constraint_coefficient(c2, 0, 1.0).unwrap();
    p.add_constraint_coefficient(c2, 1, 2.0).unwrap();
    p
}

fn assert_optimal_and_consistent(problem: &Problem, solution: &mipsolver::Solution) {
    assert_eq!(
        solution.status,
        Status::Optimal,
        "expected optimal, got {:?}",
        solution.status
    );
    assert_eq!(solution.values.len(), problem.num_variables());
    assert!(
        problem.is_feasible(&solution.values),
        "optimal point violates the problem: {:?}",
        solution.values
    );
    assert!(
        problem.is_integer_feasible(&solution.values, 1e-6),
        "optimal point not integral: {:?}",
        solution.values
    );
    let recomputed = problem.calculate_objective(&solution.values);
    assert!(
        (recomputed - solution.objective_value).abs() <= 1e-6,
        "objective mismatch: reported {}, recomputed {}",
        solution.objective_value,
        recomputed
    );
}

#[test]
fn test_binary_knapsack_takes_both_items() {
    let problem = binary_knapsack();
    let solution = solve(&problem);

    assert_optimal_and_consistent(&problem, &solution);
    assert!((solution.objective_value - 13.0).abs() < 1e-6);
    assert!((solution.values[0] - 1.0).abs() < 1e-6);
    assert!((solution.values[1] - 1.0).abs() < 1e-6);
}

#[test]
fn test_fractional_cap_rounds_down() {
    let problem = fractional_cap();
    let solution = solve(&problem);

    assert_optimal_and_consistent(&problem, &solution);
    assert!((solution.objective_value - 3.0).abs() < 1e-6);
    assert!((solution.values[0] - 3.0).abs() < 1e-6);
}

#[test]
fn test_covering_pair_sums_to_five() {
    let problem = covering_pair();
    let solution = solve(&problem);

    assert_optimal_and_consistent(&problem, &solution);
    assert!((solution.objective_value - 5.0).abs() < 1e-6);
    // Multiple optima: any non-negative integer pair summing to 5
    let sum: f64 = solution.values.iter().sum();
    assert!((sum - 5.0).abs() < 1e-6);
    assert!(solution.values.iter().all(|&v| v >= -1e-6));
}

#[test]
fn test_contradictory_bound_and_constraint_is_infeasible() {
    // max x0 s.t. x0 <= -1, x0 >= 0
    let mut p = Problem::new("conflict", Direction::Maximize);
    let x = p.add_variable("x0", VarKind::Continuous);
    p.set_bounds(x, 0.0, f64::INFINITY).unwrap();
    p.set_objective_coefficient(x, 1.0).unwrap();
    let c = p.add_constraint("neg", Sense::LessEqual, -1.0);
    p.add_constraint_coefficient(c, x, 1.0).unwrap();

    let solution = solve(&p);
    assert_eq!(solution.status, Status::Infeasible);
}

#[test]
fn test_two_resource_optimum() {
    let problem = two_resource();
    let solution = solve(&problem);

    assert_optimal_and_consistent(&problem, &solution);
    // Integer optimum is 10, attained at (2, 2); ties on the point are
    // fine as long as the objective matches
    assert!(
        (solution.objective_value - 10.0).abs() < 1e-6,
        "expected objective 10, got {}",
        solution.objective_value
    );
}

#[test]
fn test_unconstrained_continuous_box() {
    let mut p = Problem::new("box", Direction::Maximize);
    let x = p.add_variable("x0", VarKind::Continuous);
    p.set_bounds(x, 0.0, 10.0).unwrap();
    p.set_objective_coefficient(x, 1.0).unwrap();

    let solution = solve(&p);
    assert_eq!(solution.status, Status::Optimal);
    assert!((solution.objective_value - 10.0).abs() < 1e-6);
    assert!((solution.values[0] - 10.0).abs() < 1e-6);
}

#[test]
fn test_equality_pins_integer() {
    let mut p = Problem::new("pin", Direction::Minimize);
    let x = p.add_variable("x0", VarKind::Integer);
    p.set_bounds(x, 0.0, 10.0).unwrap();
    p.set_objective_coefficient(x, 1.0).unwrap();
    let c = p.add_constraint("fix", Sense::Equal, 3.0);
    p.add_constraint_coefficient(c, x, 1.0).unwrap();

    let solution = solve(&p);
    assert_optimal_and_consistent(&p, &solution);
    assert!((solution.values[0] - 3.0).abs() < 1e-6);
}

#[test]
fn test_iteration_limit_zero() {
    let driver =
        BranchAndBound::new().with_settings(SolverSettings::default().with_iteration_limit(0));
    let solution = driver.solve(&binary_knapsack());

    assert_eq!(solution.status, Status::IterationLimit);
    assert_eq!(solution.iterations, 0);
}

#[test]
fn test_iterations_respect_limit() {
    for limit in [1, 2, 5, 100] {
        let driver = BranchAndBound::new()
            .with_settings(SolverSettings::default().with_iteration_limit(limit));
        let solution = driver.solve(&two_resource());
        assert!(
            solution.iterations <= limit,
            "limit {limit} exceeded: {}",
            solution.iterations
        );
    }
}

#[test]
fn test_empty_problem_is_trivially_optimal() {
    let p = Problem::new("empty", Direction::Minimize);
    let solution = solve(&p);

    assert_eq!(solution.status, Status::Optimal);
    assert_eq!(solution.objective_value, 0.0);
    assert!(solution.values.is_empty());
}

#[test]
fn test_solve_is_deterministic() {
    let problem = two_resource();
    let first = solve(&problem);
    let second = solve(&problem);

    assert_eq!(first.status, second.status);
    assert_eq!(first.values, second.values);
    assert_eq!(
        first.objective_value.to_bits(),
        second.objective_value.to_bits()
    );
    assert_eq!(first.iterations, second.iterations);
}

#[test]
fn test_cloned_problem_solves_identically() {
    let problem = binary_knapsack();
    let copy = problem.clone();

    let original = solve(&problem);
    let cloned = solve(&copy);

    assert_eq!(original.status, cloned.status);
    assert_eq!(original.values, cloned.values);
    assert_eq!(original.iterations, cloned.iterations);
}

#[test]
fn test_extra_constraint_never_improves_objective() {
    let base = binary_knapsack();
    let base_solution = solve(&base);

    // Same problem plus a cardinality cut
    let mut tightened = base.clone();
    let c = tightened.add_constraint("cardinality", Sense::LessEqual, 1.0);
    tightened.add_constraint_coefficient(c, 0, 1.0).unwrap();
    tightened.add_constraint_coefficient(c, 1, 1.0).unwrap();
    let tight_solution = solve(&tightened);

    assert_eq!(base_solution.status, Status::Optimal);
    assert_eq!(tight_solution.status, Status::Optimal);
    assert!(
        tight_solution.objective_value <= base_solution.objective_value + 1e-6,
        "restriction improved a maximization objective: {} > {}",
        tight_solution.objective_value,
        base_solution.objective_value
    );
    assert!((tight_solution.objective_value - 8.0).abs() < 1e-6);
}

#[test]
fn test_solution_vector_length_matches_problem() {
    for problem in [
        binary_knapsack(),
        fractional_cap(),
        covering_pair(),
        two_resource(),
    ] {
        let solution = solve(&problem);
        assert_eq!(solution.values.len(), problem.num_variables());
        assert!(solution.iterations <= 5000);
        assert!(solution.solve_time >= 0.0);
    }
}

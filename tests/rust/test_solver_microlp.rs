use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-6, "{a} != {b}");
}

#[test]
fn test_minimises_absolute_difference() {
    // x - y - j <= -5 ; y - x - j <= 5 ; y fixed by y >= 10 ; min j
    let mut m = LayoutModel::new();
    m.add_constraint("pos", Bound::Max(-5.0));
    m.add_constraint("neg", Bound::Max(5.0));
    m.add_constraint("floor", Bound::Min(10.0));
    m.add_constraint("cap", Bound::Max(10.0));
    m.add_coefficient("x", "pos", 1.0);
    m.add_coefficient("y", "pos", -1.0);
    m.add_coefficient("j", "pos", -1.0);
    m.add_coefficient("y", "neg", 1.0);
    m.add_coefficient("x", "neg", -1.0);
    m.add_coefficient("j", "neg", -1.0);
    m.add_coefficient("y", "floor", 1.0);
    m.add_coefficient("y", "cap", 1.0);
    m.add_objective_term("j", 1.0);

    let s = MicroLpSolver.solve(&m).unwrap();
    assert_eq!(s.status, SolveStatus::Optimal);
    assert_close(s.value("j").unwrap(), 0.0);
    assert_close(s.value("y").unwrap(), 10.0);
    assert_close(s.value("x").unwrap(), 5.0);
}

#[test]
fn test_variables_non_negative() {
    let mut m = LayoutModel::new();
    m.add_constraint("c", Bound::Max(3.0));
    m.add_coefficient("x", "c", 1.0);
    m.add_objective_term("x", 1.0);
    let s = MicroLpSolver.solve(&m).unwrap();
    assert_close(s.value("x").unwrap(), 0.0);
}

#[test]
fn test_infeasible() {
    let mut m = LayoutModel::new();
    m.add_constraint("c", Bound::Max(-1.0));
    m.add_coefficient("x", "c", 1.0);
    m.add_objective_term("x", 1.0);
    let s = MicroLpSolver.solve(&m).unwrap();
    assert_eq!(s.status, SolveStatus::Infeasible);
    assert!(s.values.is_empty());
}

#[test]
fn test_constant_row_violated() {
    let mut m = LayoutModel::new();
    m.add_constraint("c", Bound::Max(-1.0));
    m.add_objective_term("x", 1.0);
    let s = MicroLpSolver.solve(&m).unwrap();
    assert_eq!(s.status, SolveStatus::Infeasible);
}

#[test]
fn test_constant_row_satisfied() {
    let mut m = LayoutModel::new();
    m.add_constraint("c", Bound::Max(1.0));
    m.add_objective_term("x", 1.0);
    let s = MicroLpSolver.solve(&m).unwrap();
    assert_eq!(s.status, SolveStatus::Optimal);
}

#[test]
fn test_maximise_unbounded() {
    let mut m = LayoutModel::new();
    m.op_type = Direction::Max;
    m.add_constraint("c", Bound::Min(0.0));
    m.add_coefficient("x", "c", 1.0);
    m.add_objective_term("x", 1.0);
    let s = MicroLpSolver.solve(&m).unwrap();
    assert_eq!(s.status, SolveStatus::Unbounded);
}

use super::*;

#[test]
fn test_new_model_is_empty_minimisation() {
    let m = LayoutModel::new();
    assert!(m.is_empty());
    assert_eq!(m.optimize, OBJECTIVE);
    assert_eq!(m.op_type, Direction::Min);
}

#[test]
fn test_add_coefficient_accumulates() {
    let mut m = LayoutModel::new();
    m.add_coefficient("x", "r", 1.0);
    m.add_coefficient("x", "r", 2.5);
    assert_eq!(m.coefficient("x", "r"), Some(3.5));
    assert_eq!(m.coefficient("x", "other"), None);
    assert!(m.has_variable("x"));
}

#[test]
fn test_row_and_objective_value() {
    let mut m = LayoutModel::new();
    m.add_objective_term("a", 2.0);
    m.add_objective_term("b", 1.0);
    m.add_coefficient("b", "r", -1.0);
    assert_eq!(m.row("r"), vec![("b", -1.0)]);
    let values = HashMap::from([("a".to_string(), 3.0)]);
    assert_eq!(m.objective_value(&values), 6.0);
}

#[test]
fn test_bound_admits() {
    assert!(Bound::Max(1.0).admits(1.0));
    assert!(!Bound::Max(1.0).admits(1.5));
    assert!(Bound::Min(1.0).admits(2.0));
    assert_eq!(Bound::Min(-3.0).value(), -3.0);
}

#[test]
fn test_wire_format() {
    let mut m = LayoutModel::new();
    m.add_constraint("c", Bound::Max(4.0));
    m.add_coefficient("x", "c", 1.0);
    m.add_objective_term("x", 1.0);
    m.mark_integer("x");
    let json: serde_json::Value = serde_json::to_value(&m).unwrap();
    assert_eq!(json["optimize"], "objective");
    assert_eq!(json["opType"], "min");
    assert_eq!(json["constraints"]["c"]["max"], 4.0);
    assert_eq!(json["variables"]["x"]["c"], 1.0);
    assert_eq!(json["variables"]["x"]["objective"], 1.0);
    assert_eq!(json["ints"][0], "x");
}

#[test]
fn test_wire_format_parses() {
    let m: LayoutModel = serde_json::from_str(
        r#"{"optimize": "objective", "opType": "max",
            "constraints": {"c": {"min": 1.0}},
            "variables": {"y": {"c": 2.0}}}"#,
    )
    .unwrap();
    assert_eq!(m.op_type, Direction::Max);
    assert_eq!(m.constraints["c"], Bound::Min(1.0));
    assert!(m.ints.is_empty());
}

use tf_expr::{ConstantTable, ExprError, LoopVariable, Value, evaluate, substitute};

fn run(expr: &str, constants: &ConstantTable) -> Result<Value, ExprError> {
    evaluate(&substitute(expr, constants), &LoopVariable::default())
}

#[test]
fn substituted_terms_evaluate_to_scalars() {
    let constants = ConstantTable::from_pairs([("Kp", 2.0), ("Ti", 0.5), ("m", 1.2)]).unwrap();
    assert_eq!(run("Kp", &constants).unwrap(), Value::Scalar(2.0));
    assert_eq!(run("Kp / Ti", &constants).unwrap(), Value::Scalar(4.0));
    assert_eq!(run("m * 9.8", &constants).unwrap().as_scalar(), Some(1.2 * 9.8));
}

#[test]
fn negative_constant_in_power_keeps_its_sign() {
    let constants = ConstantTable::from_pairs([("n", -1.0)]).unwrap();
    assert_eq!(run("2^n", &constants).unwrap(), Value::Scalar(0.5));
    assert_eq!(run("-n^2", &constants).unwrap(), Value::Scalar(-1.0));
}

#[test]
fn missing_constant_is_unresolved() {
    let constants = ConstantTable::from_pairs([("Kp", 2.0)]).unwrap();
    assert_eq!(
        run("Kp * Kd", &constants),
        Err(ExprError::UnresolvedReference {
            name: "Kd".to_string()
        })
    );
}

#[test]
fn update_changes_next_evaluation() {
    let mut constants = ConstantTable::from_pairs([("Kp", 2.0)]).unwrap();
    assert_eq!(run("Kp + 1", &constants).unwrap(), Value::Scalar(3.0));
    constants.set("Kp", 5.0).unwrap();
    assert_eq!(run("Kp + 1", &constants).unwrap(), Value::Scalar(6.0));
}

#[test]
fn loop_variable_survives_substitution() {
    let constants = ConstantTable::from_pairs([("T", 0.1)]).unwrap();
    let value = run("T*s + 1", &constants).unwrap();
    assert!(value.is_symbolic());
    assert_eq!(value.into_polynomial().coeffs(), &[0.1, 1.0]);
}

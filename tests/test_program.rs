//! Integration tests for loading and running programs

use hellsharp::program::demos;
use hellsharp::{EvalError, Node, Program, ProgramError, Value};
use std::io::Write;

#[test]
fn test_run_inline_json() {
    let value = hellsharp::run(r#"{"operands": [["a", 3], ["b", 4]], "root": "simple"}"#);
    assert_eq!(value.unwrap(), 7);
}

#[test]
fn test_run_keeps_error_kind() {
    let err = hellsharp::run(r#"{"operands": [["a", 3]], "root": "simple"}"#).unwrap_err();
    assert!(matches!(
        err,
        ProgramError::Eval(EvalError::EmptyStack { needed: 2, available: 1 })
    ));
    assert!(err.to_string().contains("empty stack"));

    let err = hellsharp::run(r#"{"operands": [["a", 1], ["b", "x"]], "root": "simple"}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ProgramError::Eval(EvalError::NonIntegerOperand { got: "text", .. })
    ));
}

#[test]
fn test_nested_json_tree() {
    let source = r#"{
        "operands": [["a", 1], ["b", 2], ["c", 3], ["d", 4], ["e", 5], ["f", 6]],
        "root": {"composite": {
            "first": {"composite": {"first": "simple", "second": "simple"}},
            "second": "simple"
        }}
    }"#;
    let program = Program::from_json(source).unwrap();
    assert_eq!(program.root.depth(), 3);
    let outcome = program.run(20).unwrap();
    assert_eq!(outcome.value, 21);
    assert!(outcome.remaining.is_empty());
}

#[test]
fn test_mixed_operand_types_load() {
    let program = Program::from_json(
        r#"{"operands": [["i", 1], ["t", "x"], ["b", true], ["n", null]], "root": "simple"}"#,
    )
    .unwrap();
    let values: Vec<&Value> = program.operands.iter().map(|(_, v)| v).collect();
    assert_eq!(
        values,
        vec![&Value::Int(1), &Value::from("x"), &Value::Bool(true), &Value::Nil]
    );
    // Top is nil, so the add fails on it
    assert!(matches!(
        program.run(20),
        Err(ProgramError::Eval(EvalError::NonIntegerOperand { got: "nil", .. }))
    ));
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(matches!(Program::from_json("{"), Err(ProgramError::Json(_))));
    assert!(matches!(
        Program::from_json(r#"{"root": "multiply"}"#),
        Err(ProgramError::Json(_))
    ));
    assert!(matches!(
        Program::from_json(r#"{"operands": [["a", 1.5]], "root": "simple"}"#),
        Err(ProgramError::Json(_))
    ));
}

#[test]
fn test_duplicate_operand() {
    let program = Program::from_json(
        r#"{"operands": [["a", 1], ["a", 2]], "root": "simple"}"#,
    )
    .unwrap();
    assert!(matches!(program.run(20), Err(ProgramError::DuplicateOperand(k)) if k == "a"));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"operands": [["a", 40], ["b", 2]], "root": "simple"}}"#).unwrap();
    let program = Program::from_file(file.path()).unwrap();
    assert_eq!(program.run(20).unwrap().value, 42);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Program::from_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ProgramError::Io(_)));
}

#[test]
fn test_json_roundtrip_of_built_program() {
    let program = Program::new(Node::composite(Node::simple(), Node::simple()))
        .with_operand("a", 1)
        .with_operand("b", "two");
    let back = Program::from_json(&program.to_json().unwrap()).unwrap();
    assert_eq!(back, program);
}

#[test]
fn test_composite_demo() {
    let program = demos::load("composite").unwrap().unwrap();
    let outcome = program.run(20).unwrap();
    assert_eq!(outcome.value, 22);
}

//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorStage, ErrorTip};

#[test]
fn test_lex_error_creation() {
    let error = Error::lex(ErrorImpl::UnterminatedLiteral, 10);

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
    assert_eq!(error.get_stage(), ErrorStage::Lex);
    assert_eq!(error.get_position().map(|position| position.0), Some(10));
}

#[test]
fn test_parse_error_position() {
    let error = Error::parse(
        ErrorImpl::UnexpectedToken {
            token: String::from(";"),
            expected: String::from("an expression"),
        },
        42,
    );

    assert_eq!(error.get_stage(), ErrorStage::Parse);
    assert_eq!(error.get_position().map(|position| position.0), Some(42));
}

#[test]
fn test_semantic_errors_have_no_position() {
    let analysis = Error::analysis(ErrorImpl::MissingMain);
    let runtime = Error::runtime(ErrorImpl::DivisionByZero);

    assert!(analysis.get_position().is_none());
    assert!(runtime.get_position().is_none());
    assert_eq!(analysis.get_stage(), ErrorStage::Analysis);
    assert_eq!(runtime.get_stage(), ErrorStage::Runtime);
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::analysis(ErrorImpl::TypeMatchError {
        expected: String::from("Integer"),
        received: String::from("String"),
    });

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(
        error.to_string(),
        "type error: types do not match: expected Integer, received String"
    );
}

#[test]
fn test_function_not_declared_mentions_arity() {
    let error = Error::analysis(ErrorImpl::FunctionNotDeclared {
        function: String::from("add"),
        arity: 3,
    });

    assert_eq!(error.get_error_name(), "FunctionNotDeclared");
    assert_eq!(
        error.get_tip().to_string(),
        "No function `add` taking 3 arguments"
    );
}

#[test]
fn test_runtime_error_display() {
    let error = Error::runtime(ErrorImpl::IndexOutOfRange {
        index: String::from("5"),
        length: 3,
    });

    assert_eq!(
        error.to_string(),
        "runtime error: index 5 out of range for length 3"
    );
}

#[test]
fn test_error_tip_none() {
    let error = Error::runtime(ErrorImpl::DivisionByZero);

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::parse(ErrorImpl::TrailingComma, 0);

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_kind_exposes_reason() {
    let error = Error::runtime(ErrorImpl::ImmutableAssignment {
        variable: String::from("x"),
    });

    assert_eq!(
        error.kind(),
        &ErrorImpl::ImmutableAssignment {
            variable: String::from("x")
        }
    );
}

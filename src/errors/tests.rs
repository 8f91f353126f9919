//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::{Position, EVAL_SOURCE};
use std::rc::Rc;

fn error_in(error_impl: ErrorImpl, file: &str) -> Error {
    Error::new(error_impl, Position::new(3, 7), Rc::new(file.to_string()))
}

#[test]
fn test_error_message_for_file() {
    let error = error_in(ErrorImpl::UnparsedInput, "main.cyas");

    assert_eq!(
        error.to_string(),
        "[Error] Unparsed input \" in 'main.cyas' at (3, 7)"
    );
    assert!(!error.is_eval());
}

#[test]
fn test_error_message_during_evaluation() {
    let error = error_in(ErrorImpl::MissingFunctionName, EVAL_SOURCE);

    assert_eq!(
        error.to_string(),
        "[Error] Missing function name in definition \" during evaluation at (3, 7)"
    );
    assert!(error.is_eval());
}

#[test]
fn test_incomplete_reason() {
    let error = error_in(
        ErrorImpl::Incomplete {
            construct: "additive expression",
        },
        "test.cyas",
    );

    assert_eq!(error.get_reason(), "Incomplete additive expression");
    assert_eq!(error.get_error_name(), "Incomplete");
}

#[test]
fn test_error_position() {
    let error = error_in(ErrorImpl::MissingMethodName, "test.cyas");

    assert_eq!(*error.get_position(), Position::new(3, 7));
    assert_eq!(error.get_file(), "test.cyas");
    assert_eq!(error.get_impl(), &ErrorImpl::MissingMethodName);
}

#[test]
fn test_separator_errors_have_names() {
    let definitions = error_in(ErrorImpl::DefinitionsMissingSeparator, "test.cyas");
    let expressions = error_in(ErrorImpl::ExpressionsMissingSeparator, "test.cyas");

    assert_eq!(definitions.get_error_name(), "DefinitionsMissingSeparator");
    assert_eq!(
        definitions.get_reason(),
        "Two function definitions missing line separator"
    );
    assert_eq!(expressions.get_error_name(), "ExpressionsMissingSeparator");
    assert_eq!(
        expressions.get_reason(),
        "Two expressions missing line separator"
    );
}

#[test]
fn test_unclosed_literal_reasons() {
    assert_eq!(ErrorImpl::UnclosedString.to_string(), "Unclosed quoted string");
    assert_eq!(
        ErrorImpl::UnclosedSingleQuotedString.to_string(),
        "Unclosed single-quoted string"
    );
}

#[test]
fn test_error_tip_none() {
    let error = error_in(ErrorImpl::MissingFunctionName, "test.cyas");

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = error_in(ErrorImpl::ExpressionsMissingSeparator, "test.cyas");

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("newline")),
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

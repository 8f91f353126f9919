use std::{fmt::Display, rc::Rc};

use thiserror::Error;

use crate::{Position, EVAL_SOURCE};

/// A hard parse error: the reason, the point where it was detected and the
/// name of the source it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    file: Rc<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, file: Rc<String>) -> Self {
        Error {
            internal_error: error_impl,
            position,
            file,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_file(&self) -> &str {
        &self.file
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The human readable reason, without location.
    pub fn get_reason(&self) -> String {
        self.internal_error.to_string()
    }

    /// Whether the failing text was evaluated inline rather than read from a file.
    pub fn is_eval(&self) -> bool {
        self.file.as_str() == EVAL_SOURCE
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::MissingFunctionName => "MissingFunctionName",
            ErrorImpl::MissingMethodName => "MissingMethodName",
            ErrorImpl::DefinitionsMissingSeparator => "DefinitionsMissingSeparator",
            ErrorImpl::ExpressionsMissingSeparator => "ExpressionsMissingSeparator",
            ErrorImpl::UnparsedInput => "UnparsedInput",
            ErrorImpl::Incomplete { .. } => "Incomplete",
            ErrorImpl::UnexpectedParameter => "UnexpectedParameter",
            ErrorImpl::UnclosedString => "UnclosedString",
            ErrorImpl::UnclosedSingleQuotedString => "UnclosedSingleQuotedString",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::DefinitionsMissingSeparator | ErrorImpl::ExpressionsMissingSeparator => {
                ErrorTip::Suggestion(String::from(
                    "put a newline or ';' between the two statements",
                ))
            }
            ErrorImpl::UnparsedInput => ErrorTip::Suggestion(String::from(
                "the text from here on does not start a statement",
            )),
            ErrorImpl::UnexpectedParameter => ErrorTip::Suggestion(String::from(
                "parameters are plain identifiers separated by ','",
            )),
            _ => ErrorTip::None,
        }
    }

    fn context(&self) -> String {
        if self.is_eval() {
            String::from("during evaluation")
        } else {
            format!("in '{}'", self.file)
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Error] {} \" {} at ({}, {})",
            self.internal_error,
            self.context(),
            self.position.line,
            self.position.column
        )
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("Missing function name in definition")]
    MissingFunctionName,
    #[error("Missing method name in definition")]
    MissingMethodName,
    #[error("Two function definitions missing line separator")]
    DefinitionsMissingSeparator,
    #[error("Two expressions missing line separator")]
    ExpressionsMissingSeparator,
    #[error("Unparsed input")]
    UnparsedInput,
    #[error("Incomplete {construct}")]
    Incomplete { construct: &'static str },
    #[error("Unexpected value in parameter list")]
    UnexpectedParameter,
    #[error("Unclosed quoted string")]
    UnclosedString,
    #[error("Unclosed single-quoted string")]
    UnclosedSingleQuotedString,
}

use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// The pipeline stage that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
    Lex,
    Parse,
    Analysis,
    Runtime,
}

impl Display for ErrorStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorStage::Lex => write!(f, "lex"),
            ErrorStage::Parse => write!(f, "parse"),
            ErrorStage::Analysis => write!(f, "type"),
            ErrorStage::Runtime => write!(f, "runtime"),
        }
    }
}

#[derive(Error, Debug, Clone)]
#[error("{stage} error: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    stage: ErrorStage,
    position: Option<Position>,
}

impl Error {
    pub fn lex(error_impl: ErrorImpl, offset: usize) -> Self {
        Error {
            internal_error: error_impl,
            stage: ErrorStage::Lex,
            position: Some(Position(offset)),
        }
    }

    pub fn parse(error_impl: ErrorImpl, offset: usize) -> Self {
        Error {
            internal_error: error_impl,
            stage: ErrorStage::Parse,
            position: Some(Position(offset)),
        }
    }

    pub fn analysis(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            stage: ErrorStage::Analysis,
            position: None,
        }
    }

    pub fn runtime(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            stage: ErrorStage::Runtime,
            position: None,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_stage(&self) -> ErrorStage {
        self.stage
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::UnterminatedLiteral => "UnterminatedLiteral",
            ErrorImpl::InvalidCharacterLiteral => "InvalidCharacterLiteral",
            ErrorImpl::InvalidNumber { .. } => "InvalidNumber",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEnd { .. } => "UnexpectedEnd",
            ErrorImpl::TrailingComma => "TrailingComma",
            ErrorImpl::MisplacedDefault => "MisplacedDefault",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::InvalidGroup => "InvalidGroup",
            ErrorImpl::ValueOutOfRange { .. } => "ValueOutOfRange",
            ErrorImpl::ImmutableAssignment { .. } => "ImmutableAssignment",
            ErrorImpl::ImmutableWithoutValue { .. } => "ImmutableWithoutValue",
            ErrorImpl::MissingDeclarationType { .. } => "MissingDeclarationType",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::NotAList { .. } => "NotAList",
            ErrorImpl::EmptyBlock { .. } => "EmptyBlock",
            ErrorImpl::MissingMain => "MissingMain",
            ErrorImpl::DivisionByZero => "DivisionByZero",
            ErrorImpl::IndexOutOfRange { .. } => "IndexOutOfRange",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidEscape { escape } => ErrorTip::Suggestion(format!(
                "`\\{}` is not an escape, expected one of \\b \\n \\r \\t \\' \\\" \\\\",
                escape
            )),
            ErrorImpl::UnterminatedLiteral => {
                ErrorTip::Suggestion(String::from("Literal is missing its closing quote"))
            }
            ErrorImpl::InvalidCharacterLiteral => ErrorTip::Suggestion(String::from(
                "Character literals hold exactly one character or escape",
            )),
            ErrorImpl::InvalidNumber { literal } => ErrorTip::Suggestion(format!(
                "Invalid number `{}`, numbers may not have leading zeros or a bare trailing `.`",
                literal
            )),
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::UnexpectedEnd { expected } => {
                ErrorTip::Suggestion(format!("Source ended early, expected {}", expected))
            }
            ErrorImpl::TrailingComma => {
                ErrorTip::Suggestion(String::from("Remove the comma before the closing bracket"))
            }
            ErrorImpl::MisplacedDefault => ErrorTip::Suggestion(String::from(
                "A SWITCH needs exactly one DEFAULT, placed after every CASE",
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function, arity } => ErrorTip::Suggestion(format!(
                "No function `{}` taking {} arguments",
                function, arity
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::FunctionAlreadyDeclared { function, arity } => ErrorTip::Suggestion(
                format!("Function `{}/{}` already declared", function, arity),
            ),
            ErrorImpl::InvalidGroup => ErrorTip::Suggestion(String::from(
                "Parentheses may only surround a binary expression",
            )),
            ErrorImpl::ValueOutOfRange { literal } => {
                ErrorTip::Suggestion(format!("Literal `{}` does not fit its type", literal))
            }
            ErrorImpl::ImmutableAssignment { variable } => ErrorTip::Suggestion(format!(
                "`{}` is immutable, declare it with VAR or LET",
                variable
            )),
            ErrorImpl::ImmutableWithoutValue { variable } => ErrorTip::Suggestion(format!(
                "VAL `{}` must be given a value",
                variable
            )),
            ErrorImpl::MissingDeclarationType { variable } => ErrorTip::Suggestion(format!(
                "Give `{}` a type or a value",
                variable
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only variables and list elements can be assigned",
            )),
            ErrorImpl::NotAList { variable } => {
                ErrorTip::Suggestion(format!("`{}` cannot be indexed", variable))
            }
            ErrorImpl::EmptyBlock { statement } => {
                ErrorTip::Suggestion(format!("{} body must not be empty", statement))
            }
            ErrorImpl::MissingMain => ErrorTip::Suggestion(String::from(
                "Define `FUN main(): Integer DO ... END`",
            )),
            ErrorImpl::DivisionByZero => ErrorTip::None,
            ErrorImpl::IndexOutOfRange { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is outside a list of length {}",
                index, length
            )),
        }
    }
}

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

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("invalid escape sequence \\{escape}")]
    InvalidEscape { escape: String },
    #[error("unterminated literal")]
    UnterminatedLiteral,
    #[error("invalid character literal")]
    InvalidCharacterLiteral,
    #[error("invalid number: {literal:?}")]
    InvalidNumber { literal: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },
    #[error("trailing comma")]
    TrailingComma,
    #[error("switch must end with exactly one default")]
    MisplacedDefault,
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} with {arity} arguments not declared")]
    FunctionNotDeclared { function: String, arity: usize },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("function {function:?} with {arity} arguments already declared")]
    FunctionAlreadyDeclared { function: String, arity: usize },
    #[error("group must contain a binary expression")]
    InvalidGroup,
    #[error("literal {literal} out of range")]
    ValueOutOfRange { literal: String },
    #[error("cannot assign to immutable variable {variable:?}")]
    ImmutableAssignment { variable: String },
    #[error("immutable variable {variable:?} has no value")]
    ImmutableWithoutValue { variable: String },
    #[error("variable {variable:?} has neither a type nor a value")]
    MissingDeclarationType { variable: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("variable {variable:?} is not a list")]
    NotAList { variable: String },
    #[error("{statement} statement has an empty body")]
    EmptyBlock { statement: String },
    #[error("missing function main(): Integer")]
    MissingMain,
    #[error("division by zero")]
    DivisionByZero,
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange { index: String, length: usize },
}

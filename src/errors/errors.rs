use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A failure that stops (or, for syntax errors, is recorded by) the front end.
///
/// Lexical, scope and source errors abort the pipeline. Syntax errors use the
/// same type but are collected by the parser, which keeps going.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_stage(&self) -> Stage {
        match &self.internal_error {
            ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedChar
            | ErrorImpl::UnterminatedComment
            | ErrorImpl::EmptyCharLiteral
            | ErrorImpl::NonAsciiCharLiteral { .. }
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::InvalidNumberFormat { .. }
            | ErrorImpl::UnexpectedCharacter { .. } => Stage::Lexical,
            ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::ExpectedExpression { .. }
            | ErrorImpl::ExpectedType { .. }
            | ErrorImpl::ExpectedIdentifier { .. }
            | ErrorImpl::NumberParseError { .. } => Stage::Syntax,
            ErrorImpl::UndeclaredVariableAccessed { .. }
            | ErrorImpl::UndefinedFunctionCalled { .. }
            | ErrorImpl::VariableRedefinition { .. }
            | ErrorImpl::FunctionPrototypeRedefinition { .. } => Stage::Scope,
            ErrorImpl::SourceUnreadable { .. } => Stage::Source,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedChar => "UnterminatedChar",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::EmptyCharLiteral => "EmptyCharLiteral",
            ErrorImpl::NonAsciiCharLiteral { .. } => "NonAsciiCharLiteral",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::InvalidNumberFormat { .. } => "InvalidNumberFormat",
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedType { .. } => "ExpectedType",
            ErrorImpl::ExpectedIdentifier { .. } => "ExpectedIdentifier",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UndeclaredVariableAccessed { .. } => "UndeclaredVariableAccessed",
            ErrorImpl::UndefinedFunctionCalled { .. } => "UndefinedFunctionCalled",
            ErrorImpl::VariableRedefinition { .. } => "VariableRedefinition",
            ErrorImpl::FunctionPrototypeRedefinition { .. } => "FunctionPrototypeRedefinition",
            ErrorImpl::SourceUnreadable { .. } => "SourceUnreadable",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add the closing `\"` on the same line"))
            }
            ErrorImpl::UnterminatedChar => {
                ErrorTip::Suggestion(String::from("character literals hold exactly one character"))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("close the block comment with `*/`"))
            }
            ErrorImpl::InvalidEscape { .. } => ErrorTip::Suggestion(String::from(
                "supported escapes are \\n \\t \\r \\\\ \\\" \\' and \\0",
            )),
            ErrorImpl::InvalidNumberFormat { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, a number may contain at most one `.`",
                token
            )),
            ErrorImpl::UnexpectedCharacter { .. } => ErrorTip::Suggestion(String::from(
                "numbers must be separated from operators by whitespace",
            )),
            ErrorImpl::ExpectedToken { found, .. } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                found
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UndeclaredVariableAccessed { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` must be declared before use", name))
            }
            ErrorImpl::UndefinedFunctionCalled { name } => {
                ErrorTip::Suggestion(format!("Function `{}` must be declared before it is called", name))
            }
            ErrorImpl::VariableRedefinition { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared in this scope", name))
            }
            ErrorImpl::FunctionPrototypeRedefinition { name } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared in this scope", name))
            }
            _ => ErrorTip::None,
        }
    }
}

/// Which pipeline stage produced an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Source,
    Lexical,
    Syntax,
    Scope,
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
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("empty character sequence")]
    EmptyCharLiteral,
    #[error("non-ASCII character literal {ch:?}")]
    NonAsciiCharLiteral { ch: char },
    #[error("invalid escape sequence in {context} literal: \\{ch}")]
    InvalidEscape { ch: char, context: &'static str },
    #[error("invalid number format: {token:?}")]
    InvalidNumberFormat { token: String },
    #[error("unexpected character {ch:?}")]
    UnexpectedCharacter { ch: char },
    #[error("expected {expected}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("expected expression, found {found:?}")]
    ExpectedExpression { found: String },
    #[error("expected {context} type, found {found:?}")]
    ExpectedType { context: &'static str, found: String },
    #[error("expected {context}, found {found:?}")]
    ExpectedIdentifier { context: &'static str, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("use of undeclared variable {name:?}")]
    UndeclaredVariableAccessed { name: String },
    #[error("call to undefined function {name:?}")]
    UndefinedFunctionCalled { name: String },
    #[error("variable {name:?} already declared")]
    VariableRedefinition { name: String },
    #[error("function {name:?} already declared")]
    FunctionPrototypeRedefinition { name: String },
    #[error("could not read {path:?}: {message}")]
    SourceUnreadable { path: String, message: String },
}

//! The scalar type system of the language.
//!
//! There are exactly six types and no composites. `void` is only meaningful
//! as a function return type.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Int,
    Float,
    String,
    Char,
    Bool,
    Void,
}

impl ScalarType {
    /// Maps a type keyword to its scalar type.
    pub fn from_token(kind: TokenKind) -> Option<ScalarType> {
        match kind {
            TokenKind::Int => Some(ScalarType::Int),
            TokenKind::Float => Some(ScalarType::Float),
            TokenKind::String => Some(ScalarType::String),
            TokenKind::Char => Some(ScalarType::Char),
            TokenKind::Bool => Some(ScalarType::Bool),
            TokenKind::Void => Some(ScalarType::Void),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ScalarType::Int | ScalarType::Float)
    }

    /// Whether a value of type `value` may be stored where `self` is declared.
    ///
    /// Identical types are always accepted, and `int` widens to `float`.
    pub fn accepts(&self, value: ScalarType) -> bool {
        *self == value || (*self == ScalarType::Float && value == ScalarType::Int)
    }
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::String => "string",
            ScalarType::Char => "char",
            ScalarType::Bool => "bool",
            ScalarType::Void => "void",
        };
        write!(f, "{}", name)
    }
}

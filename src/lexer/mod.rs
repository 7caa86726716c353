//! Lexical analysis module for the front end.
//!
//! This module contains the lexer that converts source text into tokens on
//! demand for the parser. It handles:
//!
//! - Keywords, identifiers and literal classes (int, float, string, char, bool)
//! - String and character escape sequences
//! - Greedy longest-match operators (up to three characters)
//! - Line and block comments, returned as `Comment` tokens
//! - Line/column tracking for diagnostics
//!
//! Every lexical error is fatal and returned as an `Err`.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;

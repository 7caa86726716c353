//! Error types and error handling for the front end.
//!
//! This module defines the structured error used by the lexer, parser and
//! scope resolver. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for each pipeline stage
//! - Helpful suggestions attached to the common failures
//!
//! Type errors are not represented here: the type checker accumulates its own
//! diagnostics and never aborts.

pub mod errors;

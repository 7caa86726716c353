//! Lexical scopes and the symbol resolver.
//!
//! The resolver walks the AST once, building a tree of scopes that the type
//! checker later reads. Undeclared names and same-scope redefinitions are
//! fatal.

pub mod resolver;
pub mod scope;

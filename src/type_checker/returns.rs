//! Audit of a function's `return` statements against its declared type.
//!
//! The main pass types each returned expression once and hands the results
//! over keyed by the statement's position, so a faulty expression is never
//! reported twice.

use std::collections::HashMap;

use crate::{
    ast::{
        statements::{FnDeclStmt, Stmt, StmtKind},
        types::ScalarType,
    },
    Position,
};

use super::diagnostics::{TypeDiagnostic, TypeErrorKind};

/// Types of the returned expressions of one function body.
pub type ReturnTypes = HashMap<Position, ScalarType>;

/// Walks `decl`'s body, including nested blocks and control flow but not
/// nested function declarations, and reports every `return` that does not
/// fit the declared return type.
pub fn check_function_returns(decl: &FnDeclStmt, typed: &ReturnTypes) -> Vec<TypeDiagnostic> {
    let mut diagnostics = vec![];
    for stmt in decl.body.iter() {
        walk(decl, stmt, typed, &mut diagnostics);
    }
    diagnostics
}

fn walk(decl: &FnDeclStmt, stmt: &Stmt, typed: &ReturnTypes, out: &mut Vec<TypeDiagnostic>) {
    match &stmt.kind {
        StmtKind::Return(Some(_)) => {
            // Untyped means the expression already produced a diagnostic.
            let Some(&returned) = typed.get(&stmt.position) else {
                return;
            };
            if !decl.return_type.accepts(returned) {
                out.push(TypeDiagnostic::new(
                    TypeErrorKind::ErroneousReturnType,
                    stmt.position.line,
                    format!(
                        "return type mismatch: function '{}' declared '{}' but returned '{}'",
                        decl.name, decl.return_type, returned
                    ),
                ));
            }
        }
        StmtKind::Return(None) => {
            if decl.return_type != ScalarType::Void {
                out.push(TypeDiagnostic::new(
                    TypeErrorKind::ErroneousReturnType,
                    stmt.position.line,
                    format!(
                        "return without value in function '{}' declared '{}'",
                        decl.name, decl.return_type
                    ),
                ));
            }
        }
        StmtKind::Block(block) => {
            for stmt in block.iter() {
                walk(decl, stmt, typed, out);
            }
        }
        StmtKind::If {
            then, otherwise, ..
        } => {
            walk(decl, then, typed, out);
            if let Some(otherwise) = otherwise {
                walk(decl, otherwise, typed, out);
            }
        }
        StmtKind::While { body, .. } | StmtKind::For { body, .. } => {
            walk(decl, body, typed, out)
        }
        StmtKind::VarDecl { .. } | StmtKind::FnDecl(_) | StmtKind::Print(_) | StmtKind::Expr(_) => {}
    }
}

//! Single pre-order pass that builds the scope tree and checks that every
//! name is declared before use.

use crate::{
    ast::{
        expressions::{Expr, ExprKind},
        statements::{BlockStmt, FnDeclStmt, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::scope::{ScopeId, ScopeTree, Symbol, SymbolKind};

struct Resolver<'a> {
    tree: ScopeTree<'a>,
    current: ScopeId,
}

impl<'a> Resolver<'a> {
    fn with_scope<F>(&mut self, scope: ScopeId, f: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Error>,
    {
        let previous = self.current;
        self.current = scope;
        let result = f(self);
        self.current = previous;
        result
    }

    fn resolve_block(&mut self, block: &'a BlockStmt) -> Result<(), Error> {
        for stmt in block.iter() {
            self.resolve_stmt(stmt)?;
        }
        Ok(())
    }

    fn resolve_nested_block(&mut self, block: &'a BlockStmt) -> Result<(), Error> {
        let scope = self.tree.push_scope(self.current);
        self.with_scope(scope, |resolver| resolver.resolve_block(block))
    }

    /// Registers the function before its body so it may call itself. The
    /// body gets its own scope below the parameter scope.
    fn resolve_fn(&mut self, decl: &'a FnDeclStmt) -> Result<(), Error> {
        let enclosing = self.current;
        self.tree.declare(enclosing, Symbol::function(decl))?;

        let fn_scope = self.tree.push_scope(enclosing);
        self.tree.set_function_scope(enclosing, &decl.name, fn_scope);

        for param in &decl.params {
            self.tree
                .declare(fn_scope, Symbol::variable(&param.name, param.ty, param.position))?;
        }

        self.with_scope(fn_scope, |resolver| resolver.resolve_nested_block(&decl.body))
    }

    fn resolve_stmt(&mut self, stmt: &'a Stmt) -> Result<(), Error> {
        match &stmt.kind {
            StmtKind::Block(block) => self.resolve_nested_block(block),
            StmtKind::VarDecl {
                type_name,
                name,
                init,
            } => {
                self.tree
                    .declare(self.current, Symbol::variable(name, *type_name, stmt.position))?;
                match init {
                    Some(init) => self.resolve_expr(init),
                    None => Ok(()),
                }
            }
            StmtKind::FnDecl(decl) => self.resolve_fn(decl),
            StmtKind::Return(value) | StmtKind::Print(value) => match value {
                Some(value) => self.resolve_expr(value),
                None => Ok(()),
            },
            StmtKind::If {
                cond,
                then,
                otherwise,
            } => {
                self.resolve_expr(cond)?;
                self.resolve_stmt(then)?;
                match otherwise {
                    Some(otherwise) => self.resolve_stmt(otherwise),
                    None => Ok(()),
                }
            }
            StmtKind::While { cond, body } => {
                self.resolve_expr(cond)?;
                self.resolve_stmt(body)
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                let scope = self.tree.push_scope(self.current);
                self.with_scope(scope, |resolver| {
                    if let Some(init) = init {
                        resolver.resolve_stmt(init)?;
                    }
                    if let Some(cond) = cond {
                        resolver.resolve_expr(cond)?;
                    }
                    if let Some(update) = update {
                        resolver.resolve_expr(update)?;
                    }
                    resolver.resolve_stmt(body)
                })
            }
            StmtKind::Expr(expr) => self.resolve_expr(expr),
        }
    }

    fn resolve_expr(&mut self, expr: &'a Expr) -> Result<(), Error> {
        match &expr.kind {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::String(_)
            | ExprKind::Char(_)
            | ExprKind::Bool(_) => Ok(()),
            ExprKind::Identifier(name) => {
                if self.tree.lookup(self.current, name, SymbolKind::Var).is_none() {
                    return Err(Error::new(
                        ErrorImpl::UndeclaredVariableAccessed { name: name.clone() },
                        expr.position,
                    ));
                }
                Ok(())
            }
            ExprKind::Call { callee, args } => {
                if self.tree.lookup(self.current, callee, SymbolKind::Fn).is_none() {
                    return Err(Error::new(
                        ErrorImpl::UndefinedFunctionCalled {
                            name: callee.clone(),
                        },
                        expr.position,
                    ));
                }
                for arg in args {
                    self.resolve_expr(arg)?;
                }
                Ok(())
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Binary { left, right, .. } | ExprKind::Assign { left, right, .. } => {
                self.resolve_expr(left)?;
                self.resolve_expr(right)
            }
        }
    }
}

/// Resolves a whole program. The program's own statements live directly in
/// the global scope. The first undeclared use or redefinition aborts.
pub fn resolve(program: &BlockStmt) -> Result<ScopeTree<'_>, Error> {
    let mut resolver = Resolver {
        tree: ScopeTree::new(),
        current: ScopeId::GLOBAL,
    };
    resolver.resolve_block(program)?;

    tracing::debug!(
        scopes = resolver.tree.len(),
        globals = resolver.tree.global().len(),
        "resolved scopes"
    );
    Ok(resolver.tree)
}

use std::collections::HashMap;

use crate::{
    ast::{statements::FnDeclStmt, types::ScalarType},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Index of a scope inside its [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Fn,
}

#[derive(Debug, Clone)]
pub struct Symbol<'a> {
    pub name: String,
    pub kind: SymbolKind,
    /// Variable type, or return type for functions.
    pub declared_type: ScalarType,
    /// Parameter types, in order. Empty for variables.
    pub params: Vec<ScalarType>,
    pub decl: Option<&'a FnDeclStmt>,
    /// The parameter scope of a function.
    pub scope: Option<ScopeId>,
    pub position: Position,
}

impl<'a> Symbol<'a> {
    pub fn variable(name: &str, declared_type: ScalarType, position: Position) -> Self {
        Symbol {
            name: String::from(name),
            kind: SymbolKind::Var,
            declared_type,
            params: vec![],
            decl: None,
            scope: None,
            position,
        }
    }

    pub fn function(decl: &'a FnDeclStmt) -> Self {
        Symbol {
            name: decl.name.clone(),
            kind: SymbolKind::Fn,
            declared_type: decl.return_type,
            params: decl.param_types(),
            decl: Some(decl),
            scope: None,
            position: decl.position,
        }
    }
}

#[derive(Debug, Default)]
pub struct Scope<'a> {
    pub parent: Option<ScopeId>,
    symbols: HashMap<String, Symbol<'a>>,
    /// Declaration order of `symbols`.
    order: Vec<String>,
}

impl<'a> Scope<'a> {
    pub fn get(&self, name: &str) -> Option<&Symbol<'a>> {
        self.symbols.get(name)
    }

    /// Symbols in the order they were declared.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol<'a>> {
        self.order.iter().filter_map(|name| self.symbols.get(name))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Every scope of a program, rooted at the global scope.
///
/// Scopes are never removed, so ids stay valid for the lifetime of the tree
/// and the type checker can re-enter any function's parameter scope.
#[derive(Debug)]
pub struct ScopeTree<'a> {
    scopes: Vec<Scope<'a>>,
}

impl<'a> Default for ScopeTree<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ScopeTree<'a> {
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![Scope::default()],
        }
    }

    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        ScopeId(self.scopes.len() - 1)
    }

    pub fn get(&self, id: ScopeId) -> &Scope<'a> {
        &self.scopes[id.0]
    }

    pub fn global(&self) -> &Scope<'a> {
        self.get(ScopeId::GLOBAL)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Adds `symbol` to `scope`, rejecting a name already declared there.
    /// Names in enclosing scopes may be shadowed.
    pub fn declare(&mut self, scope: ScopeId, symbol: Symbol<'a>) -> Result<(), Error> {
        let target = &mut self.scopes[scope.0];

        if target.symbols.contains_key(&symbol.name) {
            let name = symbol.name.clone();
            let error = match symbol.kind {
                SymbolKind::Var => ErrorImpl::VariableRedefinition { name },
                SymbolKind::Fn => ErrorImpl::FunctionPrototypeRedefinition { name },
            };
            return Err(Error::new(error, symbol.position));
        }

        target.order.push(symbol.name.clone());
        target.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    /// Records the parameter scope of a function declared in `scope`.
    pub fn set_function_scope(&mut self, scope: ScopeId, name: &str, fn_scope: ScopeId) {
        if let Some(symbol) = self.scopes[scope.0].symbols.get_mut(name) {
            symbol.scope = Some(fn_scope);
        }
    }

    /// Finds `name` as a `kind` symbol, nearest enclosing scope first.
    pub fn lookup(&self, scope: ScopeId, name: &str, kind: SymbolKind) -> Option<&Symbol<'a>> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.get(id);
            if let Some(symbol) = scope.get(name).filter(|symbol| symbol.kind == kind) {
                return Some(symbol);
            }
            current = scope.parent;
        }

        None
    }

    /// Ids from `scope` up to the global scope.
    pub fn scope_path(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut path = vec![];
        let mut current = Some(scope);
        while let Some(id) = current {
            path.push(id);
            current = self.get(id).parent;
        }
        path
    }
}

use std::slice::Iter;

use crate::Position;

use super::{expressions::Expr, types::ScalarType};

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub position: Position,
}

impl Stmt {
    pub fn new(kind: StmtKind, position: Position) -> Self {
        Stmt { kind, position }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Block(BlockStmt),
    VarDecl {
        type_name: ScalarType,
        name: String,
        init: Option<Expr>,
    },
    FnDecl(FnDeclStmt),
    Return(Option<Expr>),
    If {
        cond: Expr,
        then: Box<Stmt>,
        otherwise: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    Print(Option<Expr>),
    Expr(Expr),
}

/// An ordered statement sequence. The program root is also a block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub position: Position,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: ScalarType,
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub return_type: ScalarType,
    pub name: String,
    pub params: Vec<Param>,
    pub body: BlockStmt,
    pub position: Position,
}

impl FnDeclStmt {
    pub fn param_types(&self) -> Vec<ScalarType> {
        self.params.iter().map(|param| param.ty).collect()
    }
}

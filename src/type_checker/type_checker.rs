use std::collections::HashMap;

use crate::{
    ast::{
        expressions::{AssignOp, BinaryOp, Expr, ExprKind, UnaryOp},
        statements::{BlockStmt, FnDeclStmt, Stmt, StmtKind},
        types::ScalarType,
    },
    scope::scope::{ScopeId, ScopeTree, SymbolKind},
};

use super::{
    diagnostics::{TypeDiagnostic, TypeErrorKind, TypeReport},
    returns::{check_function_returns, ReturnTypes},
};

/// A name bound while walking a function body or nested block.
#[derive(Debug, Clone, Copy)]
enum Binding<'a> {
    Var(ScalarType),
    Fn(&'a FnDeclStmt),
}

/// What a call needs to know about its callee.
struct Signature {
    return_type: ScalarType,
    params: Vec<ScalarType>,
}

/// Checker context. Local bindings live in `frames`, innermost last; names
/// not found there are looked up in the global scope built by the resolver.
pub struct TypeChecker<'s, 'a> {
    scopes: &'s ScopeTree<'a>,
    frames: Vec<HashMap<String, Binding<'a>>>,
    /// One map per function currently being checked.
    returns: Vec<ReturnTypes>,
    diagnostics: Vec<TypeDiagnostic>,
}

/// Result type of an operator applied to two operand types.
fn binary_result(
    op: BinaryOp,
    left: ScalarType,
    right: ScalarType,
) -> Result<ScalarType, (TypeErrorKind, String)> {
    match op {
        BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide => {
            if !left.is_numeric() || !right.is_numeric() {
                return Err((
                    TypeErrorKind::AttemptedAddOpOnNonNumeric,
                    format!("arithmetic operator '{}' on '{}' and '{}'", op, left, right),
                ));
            }
            if left == ScalarType::Float || right == ScalarType::Float {
                Ok(ScalarType::Float)
            } else {
                Ok(ScalarType::Int)
            }
        }
        BinaryOp::Modulo => {
            if left == ScalarType::Int && right == ScalarType::Int {
                Ok(ScalarType::Int)
            } else {
                Err((
                    TypeErrorKind::AttemptedAddOpOnNonNumeric,
                    format!("operator '%' requires int operands, got '{}' and '{}'", left, right),
                ))
            }
        }
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight => {
            if left == ScalarType::Int && right == ScalarType::Int {
                Ok(ScalarType::Int)
            } else {
                Err((
                    TypeErrorKind::AttemptedShiftOnNonInt,
                    format!("shift '{}' on '{}' and '{}'", op, left, right),
                ))
            }
        }
        BinaryOp::BitAnd | BinaryOp::BitXor | BinaryOp::BitOr => {
            if left == ScalarType::Int && right == ScalarType::Int {
                Ok(ScalarType::Int)
            } else {
                Err((
                    TypeErrorKind::AttemptedBitOpOnNonNumeric,
                    format!("bitwise operator '{}' on '{}' and '{}'", op, left, right),
                ))
            }
        }
        BinaryOp::And | BinaryOp::Or => {
            if left == ScalarType::Bool && right == ScalarType::Bool {
                Ok(ScalarType::Bool)
            } else {
                Err((
                    TypeErrorKind::AttemptedBoolOpOnNonBools,
                    format!("logical operator '{}' on '{}' and '{}'", op, left, right),
                ))
            }
        }
        BinaryOp::Less
        | BinaryOp::LessEquals
        | BinaryOp::Greater
        | BinaryOp::GreaterEquals
        | BinaryOp::Equals
        | BinaryOp::NotEquals => {
            if (left.is_numeric() && right.is_numeric()) || left == right {
                Ok(ScalarType::Bool)
            } else {
                Err((
                    TypeErrorKind::ExpressionTypeMismatch,
                    format!("comparison between incompatible types '{}' and '{}'", left, right),
                ))
            }
        }
    }
}

impl<'s, 'a> TypeChecker<'s, 'a> {
    pub fn new(scopes: &'s ScopeTree<'a>) -> Self {
        TypeChecker {
            scopes,
            frames: vec![],
            returns: vec![],
            diagnostics: vec![],
        }
    }

    fn report(&mut self, kind: TypeErrorKind, line: u32, message: impl Into<String>) {
        let diagnostic = TypeDiagnostic::new(kind, line, message);
        tracing::trace!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn declare(&mut self, name: &str, binding: Binding<'a>) {
        // At the top level the resolver's global scope already holds the name.
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(String::from(name), binding);
        }
    }

    fn lookup_var(&self, name: &str) -> Option<ScalarType> {
        for frame in self.frames.iter().rev() {
            if let Some(Binding::Var(ty)) = frame.get(name) {
                return Some(*ty);
            }
        }

        self.scopes
            .lookup(ScopeId::GLOBAL, name, SymbolKind::Var)
            .map(|symbol| symbol.declared_type)
    }

    fn lookup_fn(&self, name: &str) -> Option<Signature> {
        for frame in self.frames.iter().rev() {
            if let Some(Binding::Fn(decl)) = frame.get(name) {
                return Some(Signature {
                    return_type: decl.return_type,
                    params: decl.param_types(),
                });
            }
        }

        self.scopes
            .lookup(ScopeId::GLOBAL, name, SymbolKind::Fn)
            .map(|symbol| Signature {
                return_type: symbol.declared_type,
                params: symbol.params.clone(),
            })
    }

    /// Types `expr`, reporting what is wrong with it. `None` means a
    /// diagnostic was already produced for this expression or a child.
    pub fn type_expr(&mut self, expr: &Expr) -> Option<ScalarType> {
        let line = expr.position.line;

        match &expr.kind {
            ExprKind::Int(_) => Some(ScalarType::Int),
            ExprKind::Float(_) => Some(ScalarType::Float),
            ExprKind::String(_) => Some(ScalarType::String),
            ExprKind::Char(_) => Some(ScalarType::Char),
            ExprKind::Bool(_) => Some(ScalarType::Bool),
            ExprKind::Identifier(name) => {
                let ty = self.lookup_var(name);
                if ty.is_none() {
                    self.report(
                        TypeErrorKind::ErroneousVarDecl,
                        line,
                        format!("use of undeclared variable '{}'", name),
                    );
                }
                ty
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.type_expr(operand)?;
                self.type_unary(*op, operand, line)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.type_expr(left);
                let right = self.type_expr(right);
                let (left, right) = (left?, right?);

                match binary_result(*op, left, right) {
                    Ok(ty) => Some(ty),
                    Err((kind, message)) => {
                        self.report(kind, line, message);
                        None
                    }
                }
            }
            ExprKind::Assign { op, left, right } => self.type_assign(*op, left, right, line),
            ExprKind::Call { callee, args } => self.type_call(callee, args, line),
        }
    }

    fn type_unary(&mut self, op: UnaryOp, operand: ScalarType, line: u32) -> Option<ScalarType> {
        match op {
            UnaryOp::Negate | UnaryOp::Plus | UnaryOp::PostIncrement | UnaryOp::PostDecrement => {
                if operand.is_numeric() {
                    return Some(operand);
                }
                self.report(
                    TypeErrorKind::AttemptedAddOpOnNonNumeric,
                    line,
                    format!("operator '{}' on non-numeric '{}'", op, operand),
                );
            }
            UnaryOp::Not => {
                if operand == ScalarType::Bool {
                    return Some(ScalarType::Bool);
                }
                self.report(
                    TypeErrorKind::ExpectedBooleanExpression,
                    line,
                    format!("operator '!' expects 'bool', got '{}'", operand),
                );
            }
            UnaryOp::BitNot => {
                if operand == ScalarType::Int {
                    return Some(ScalarType::Int);
                }
                self.report(
                    TypeErrorKind::AttemptedBitOpOnNonNumeric,
                    line,
                    format!("operator '~' expects 'int', got '{}'", operand),
                );
            }
        }

        None
    }

    fn type_assign(&mut self, op: AssignOp, left: &Expr, right: &Expr, line: u32) -> Option<ScalarType> {
        let ExprKind::Identifier(name) = &left.kind else {
            self.report(
                TypeErrorKind::ExpressionTypeMismatch,
                line,
                "left-hand side of assignment must be an identifier",
            );
            self.type_expr(right);
            return None;
        };

        let Some(declared) = self.lookup_var(name) else {
            self.report(
                TypeErrorKind::ErroneousVarDecl,
                line,
                format!("assignment to undeclared variable '{}'", name),
            );
            return None;
        };

        let value = self.type_expr(right)?;
        let value = match op {
            AssignOp::Assign => value,
            AssignOp::Compound(op) => match binary_result(op, declared, value) {
                Ok(ty) => ty,
                Err((kind, message)) => {
                    self.report(kind, line, message);
                    return None;
                }
            },
        };

        if declared.accepts(value) {
            return Some(declared);
        }

        self.report(
            TypeErrorKind::ExpressionTypeMismatch,
            line,
            format!(
                "type mismatch in assignment: '{}' {} '{}'",
                declared, op, value
            ),
        );
        None
    }

    /// Arity mismatches are reported, then every argument is still typed.
    fn type_call(&mut self, callee: &str, args: &[Expr], line: u32) -> Option<ScalarType> {
        let Some(signature) = self.lookup_fn(callee) else {
            self.report(
                TypeErrorKind::FnCallParamCount,
                line,
                format!("call to undefined function '{}'", callee),
            );
            return None;
        };

        if signature.params.len() != args.len() {
            self.report(
                TypeErrorKind::FnCallParamCount,
                line,
                format!(
                    "function '{}' expects {} params but {} were passed",
                    callee,
                    signature.params.len(),
                    args.len()
                ),
            );
        }

        for (index, arg) in args.iter().enumerate() {
            let Some(actual) = self.type_expr(arg) else {
                continue;
            };
            let Some(&expected) = signature.params.get(index) else {
                continue;
            };
            if !expected.accepts(actual) {
                self.report(
                    TypeErrorKind::FnCallParamType,
                    arg.position.line,
                    format!(
                        "parameter {} of '{}' expects '{}' but got '{}'",
                        index + 1,
                        callee,
                        expected,
                        actual
                    ),
                );
            }
        }

        Some(signature.return_type)
    }

    fn check_condition(&mut self, cond: &Expr, statement: &str, line: u32) {
        if let Some(ty) = self.type_expr(cond) {
            if ty != ScalarType::Bool {
                self.report(
                    TypeErrorKind::NonBooleanCondStmt,
                    line,
                    format!("{} condition must be boolean, got '{}'", statement, ty),
                );
            }
        }
    }

    fn check_frame(&mut self, stmts: &'a [Stmt]) {
        self.frames.push(HashMap::new());
        for stmt in stmts {
            self.check_stmt(stmt);
        }
        self.frames.pop();
    }

    pub fn check_stmt(&mut self, stmt: &'a Stmt) {
        let line = stmt.position.line;

        match &stmt.kind {
            StmtKind::Block(block) => self.check_frame(&block.body),
            StmtKind::VarDecl {
                type_name,
                name,
                init,
            } => {
                self.declare(name, Binding::Var(*type_name));

                if *type_name == ScalarType::Void {
                    self.report(
                        TypeErrorKind::ErroneousVarDecl,
                        line,
                        format!("variable '{}' cannot have type 'void'", name),
                    );
                }

                let Some(init) = init else {
                    return;
                };
                if let Some(value) = self.type_expr(init) {
                    if *type_name != ScalarType::Void && !type_name.accepts(value) {
                        self.report(
                            TypeErrorKind::ErroneousVarDecl,
                            line,
                            format!(
                                "variable declaration '{}' type '{}' incompatible with initializer type '{}'",
                                name, type_name, value
                            ),
                        );
                    }
                }
            }
            StmtKind::FnDecl(decl) => {
                // Global functions are checked after the top-level statements.
                if !self.frames.is_empty() {
                    self.declare(&decl.name, Binding::Fn(decl));
                    self.check_function(decl);
                }
            }
            StmtKind::Return(value) => {
                let Some(value) = value else {
                    return;
                };
                if let Some(ty) = self.type_expr(value) {
                    if let Some(returns) = self.returns.last_mut() {
                        returns.insert(stmt.position, ty);
                    }
                }
            }
            StmtKind::If {
                cond,
                then,
                otherwise,
            } => {
                self.check_condition(cond, "if", line);
                self.check_stmt(then);
                if let Some(otherwise) = otherwise {
                    self.check_stmt(otherwise);
                }
            }
            StmtKind::While { cond, body } => {
                self.check_condition(cond, "while", line);
                self.check_stmt(body);
            }
            StmtKind::For {
                init,
                cond,
                update,
                body,
            } => {
                self.frames.push(HashMap::new());
                if let Some(init) = init {
                    self.check_stmt(init);
                }
                if let Some(cond) = cond {
                    self.check_condition(cond, "for", line);
                }
                if let Some(update) = update {
                    self.type_expr(update);
                }
                self.check_stmt(body);
                self.frames.pop();
            }
            StmtKind::Print(value) => match value {
                Some(value) => {
                    self.type_expr(value);
                }
                None => self.report(
                    TypeErrorKind::EmptyExpression,
                    line,
                    "print without an expression",
                ),
            },
            StmtKind::Expr(expr) => {
                self.type_expr(expr);
            }
        }
    }

    /// Checks a function body in its own frame below one holding the
    /// parameters, then audits its `return` statements.
    pub fn check_function(&mut self, decl: &'a FnDeclStmt) {
        let params = decl
            .params
            .iter()
            .map(|param| (param.name.clone(), Binding::Var(param.ty)))
            .collect::<HashMap<_, _>>();

        self.frames.push(params);
        self.returns.push(ReturnTypes::new());
        self.check_frame(&decl.body.body);
        let typed = self.returns.pop().unwrap_or_default();
        self.frames.pop();

        let audit = check_function_returns(decl, &typed);
        for diagnostic in audit {
            tracing::trace!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn into_report(self) -> TypeReport {
        TypeReport {
            error_count: self.diagnostics.len(),
            diagnostics: self.diagnostics,
        }
    }
}

/// Type-checks a resolved program.
///
/// Top-level statements other than function declarations are checked first,
/// in order. Then every function of the global scope is checked in
/// declaration order. Errors are collected, never fatal.
pub fn type_check<'a>(program: &'a BlockStmt, scopes: &ScopeTree<'a>) -> TypeReport {
    let mut checker = TypeChecker::new(scopes);

    for stmt in program.iter() {
        if !matches!(stmt.kind, StmtKind::FnDecl(_)) {
            checker.check_stmt(stmt);
        }
    }

    let functions = scopes
        .global()
        .symbols()
        .filter(|symbol| symbol.kind == SymbolKind::Fn)
        .filter_map(|symbol| symbol.decl)
        .collect::<Vec<_>>();
    for decl in functions {
        checker.check_function(decl);
    }

    let report = checker.into_report();
    tracing::debug!(errors = report.error_count, "type checked program");
    report
}

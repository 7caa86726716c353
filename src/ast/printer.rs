//! Indented textual dump of a parsed program, used by `--dump-ast`.

use std::fmt::Write;

use super::{
    expressions::{Expr, ExprKind},
    statements::{BlockStmt, Stmt, StmtKind},
};

const INDENT: &str = "  ";

pub fn dump(program: &BlockStmt) -> String {
    let mut out = String::new();
    dump_block(&mut out, program, 0);
    out
}

fn line(out: &mut String, depth: usize, text: impl AsRef<str>) {
    let _ = writeln!(out, "{}{}", INDENT.repeat(depth), text.as_ref());
}

fn dump_block(out: &mut String, block: &BlockStmt, depth: usize) {
    line(
        out,
        depth,
        format!("Block ({}:{})", block.position.line, block.position.col),
    );
    for stmt in block.iter() {
        dump_stmt(out, stmt, depth + 1);
    }
}

fn dump_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match &stmt.kind {
        StmtKind::Block(block) => dump_block(out, block, depth),
        StmtKind::VarDecl {
            type_name,
            name,
            init,
        } => {
            line(out, depth, format!("VarDecl {} {}", type_name, name));
            if let Some(init) = init {
                dump_expr(out, init, depth + 1);
            }
        }
        StmtKind::FnDecl(decl) => {
            let params = decl
                .params
                .iter()
                .map(|param| format!("{} {}", param.ty, param.name))
                .collect::<Vec<_>>()
                .join(", ");
            line(
                out,
                depth,
                format!("FnDecl {} {}({})", decl.return_type, decl.name, params),
            );
            dump_block(out, &decl.body, depth + 1);
        }
        StmtKind::Return(value) => {
            line(out, depth, "Return");
            if let Some(value) = value {
                dump_expr(out, value, depth + 1);
            }
        }
        StmtKind::If {
            cond,
            then,
            otherwise,
        } => {
            line(out, depth, "If");
            dump_expr(out, cond, depth + 1);
            dump_stmt(out, then, depth + 1);
            if let Some(otherwise) = otherwise {
                line(out, depth, "Else");
                dump_stmt(out, otherwise, depth + 1);
            }
        }
        StmtKind::While { cond, body } => {
            line(out, depth, "While");
            dump_expr(out, cond, depth + 1);
            dump_stmt(out, body, depth + 1);
        }
        StmtKind::For {
            init,
            cond,
            update,
            body,
        } => {
            line(out, depth, "For");
            match init {
                Some(init) => dump_stmt(out, init, depth + 1),
                None => line(out, depth + 1, "<no init>"),
            }
            match cond {
                Some(cond) => dump_expr(out, cond, depth + 1),
                None => line(out, depth + 1, "<no cond>"),
            }
            match update {
                Some(update) => dump_expr(out, update, depth + 1),
                None => line(out, depth + 1, "<no update>"),
            }
            dump_stmt(out, body, depth + 1);
        }
        StmtKind::Print(value) => {
            line(out, depth, "Print");
            if let Some(value) = value {
                dump_expr(out, value, depth + 1);
            }
        }
        StmtKind::Expr(expr) => {
            line(out, depth, "ExprStmt");
            dump_expr(out, expr, depth + 1);
        }
    }
}

fn dump_expr(out: &mut String, expr: &Expr, depth: usize) {
    match &expr.kind {
        ExprKind::Int(value) => line(out, depth, format!("Int {}", value)),
        ExprKind::Float(value) => line(out, depth, format!("Float {}", value)),
        ExprKind::String(value) => line(out, depth, format!("String {:?}", value)),
        ExprKind::Char(value) => line(out, depth, format!("Char {:?}", *value as char)),
        ExprKind::Bool(value) => line(out, depth, format!("Bool {}", value)),
        ExprKind::Identifier(name) => line(out, depth, format!("Identifier {}", name)),
        ExprKind::Unary { op, operand } => {
            line(out, depth, format!("Unary {}", op));
            dump_expr(out, operand, depth + 1);
        }
        ExprKind::Binary { op, left, right } => {
            line(out, depth, format!("Binary {}", op));
            dump_expr(out, left, depth + 1);
            dump_expr(out, right, depth + 1);
        }
        ExprKind::Call { callee, args } => {
            line(out, depth, format!("Call {}", callee));
            for arg in args {
                dump_expr(out, arg, depth + 1);
            }
        }
        ExprKind::Assign { op, left, right } => {
            line(out, depth, format!("Assign {}", op));
            dump_expr(out, left, depth + 1);
            dump_expr(out, right, depth + 1);
        }
    }
}

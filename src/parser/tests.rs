//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Variable and function declarations
//! - Operator precedence and associativity
//! - Control flow statements
//! - Error recovery

use pretty_assertions::assert_eq;

use super::parser::{parse, ParseError};
use crate::{
    ast::{
        expressions::{ExprKind, UnaryOp},
        printer::dump,
        statements::StmtKind,
        types::ScalarType,
    },
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    Position,
};

fn dump_source(source: &str) -> String {
    let result = parse(source).unwrap();
    assert!(result.is_ok(), "unexpected diagnostics: {:?}", result.diagnostics);
    dump(&result.ast)
}

#[test]
fn test_parse_variable_declaration() {
    let result = parse("int x = 5;").unwrap();

    assert_eq!(result.error, ParseError::Ok);
    assert_eq!(result.ast.len(), 1);

    let stmt = &result.ast.body[0];
    assert_eq!(stmt.position, Position::new(1, 1));
    match &stmt.kind {
        StmtKind::VarDecl {
            type_name,
            name,
            init,
        } => {
            assert_eq!(*type_name, ScalarType::Int);
            assert_eq!(name, "x");
            assert_eq!(init.as_ref().map(|expr| &expr.kind), Some(&ExprKind::Int(5)));
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_declaration_without_initializer() {
    let output = dump_source("string s; char c = 'a'; bool b = true; float f = 2.5;");

    assert_eq!(
        output,
        "Block (1:1)
  VarDecl string s
  VarDecl char c
    Char 'a'
  VarDecl bool b
    Bool true
  VarDecl float f
    Float 2.5
"
    );
}

#[test]
fn test_string_literal_loses_quotes() {
    let result = parse("string s = \"hi\";").unwrap();

    match &result.ast.body[0].kind {
        StmtKind::VarDecl { init: Some(init), .. } => {
            assert_eq!(init.kind, ExprKind::String(String::from("hi")));
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    let output = dump_source("x = 1 + 2 * 3;");

    assert_eq!(
        output,
        "Block (1:1)
  ExprStmt
    Assign =
      Identifier x
      Binary +
        Int 1
        Binary *
          Int 2
          Int 3
"
    );
}

#[test]
fn test_parse_logical_and_comparison() {
    let output = dump_source("a < b && c == d || e;");

    assert_eq!(
        output,
        "Block (1:1)
  ExprStmt
    Binary ||
      Binary &&
        Binary <
          Identifier a
          Identifier b
        Binary ==
          Identifier c
          Identifier d
      Identifier e
"
    );
}

#[test]
fn test_binary_is_left_associative() {
    let output = dump_source("a - b - c;");

    assert_eq!(
        output,
        "Block (1:1)
  ExprStmt
    Binary -
      Binary -
        Identifier a
        Identifier b
      Identifier c
"
    );
}

#[test]
fn test_assignment_is_right_associative() {
    let output = dump_source("a = b += c;");

    assert_eq!(
        output,
        "Block (1:1)
  ExprStmt
    Assign =
      Identifier a
      Assign +=
        Identifier b
        Identifier c
"
    );
}

#[test]
fn test_parse_unary_and_grouping() {
    let output = dump_source("-a * (b + c);");

    assert_eq!(
        output,
        "Block (1:1)
  ExprStmt
    Binary *
      Unary -
        Identifier a
      Binary +
        Identifier b
        Identifier c
"
    );
}

#[test]
fn test_parse_postfix_increment() {
    let result = parse("i++;").unwrap();

    match &result.ast.body[0].kind {
        StmtKind::Expr(expr) => match &expr.kind {
            ExprKind::Unary { op, operand } => {
                assert_eq!(*op, UnaryOp::PostIncrement);
                assert_eq!(operand.kind, ExprKind::Identifier(String::from("i")));
            }
            other => panic!("expected a unary expression, got {:?}", other),
        },
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_call() {
    let output = dump_source("print(add(1, x));");

    assert_eq!(
        output,
        "Block (1:1)
  Print
    Call add
      Int 1
      Identifier x
"
    );
}

#[test]
fn test_parse_function_declaration() {
    let output = dump_source("fn int add(int a, int b) { return a + b; }");

    assert_eq!(
        output,
        "Block (1:1)
  FnDecl int add(int a, int b)
    Block (1:26)
      Return
        Binary +
          Identifier a
          Identifier b
"
    );
}

#[test]
fn test_parse_void_function_without_params() {
    let output = dump_source("fn void hello() { print; return; }");

    assert_eq!(
        output,
        "Block (1:1)
  FnDecl void hello()
    Block (1:17)
      Print
      Return
"
    );
}

#[test]
fn test_parse_if_else() {
    let output = dump_source("if (x > 0) print(x); else { x = 0; }");

    assert_eq!(
        output,
        "Block (1:1)
  If
    Binary >
      Identifier x
      Int 0
    Print
      Identifier x
  Else
    Block (1:27)
      ExprStmt
        Assign =
          Identifier x
          Int 0
"
    );
}

#[test]
fn test_parse_while() {
    let output = dump_source("while (i < 10) { i += 1; }");

    assert_eq!(
        output,
        "Block (1:1)
  While
    Binary <
      Identifier i
      Int 10
    Block (1:16)
      ExprStmt
        Assign +=
          Identifier i
          Int 1
"
    );
}

#[test]
fn test_parse_for_with_declaration() {
    let output = dump_source("for (int i = 0; i < 3; i++) print(i);");

    assert_eq!(
        output,
        "Block (1:1)
  For
    VarDecl int i
      Int 0
    Binary <
      Identifier i
      Int 3
    Unary ++
      Identifier i
    Print
      Identifier i
"
    );
}

#[test]
fn test_parse_for_with_empty_clauses() {
    let output = dump_source("for (;;) { }");

    assert_eq!(
        output,
        "Block (1:1)
  For
    <no init>
    <no cond>
    <no update>
    Block (1:10)
"
    );
}

#[test]
fn test_comments_are_skipped() {
    let output = dump_source("// leading\nint /* inline */ x = 1; // trailing");

    assert_eq!(
        output,
        "Block (1:1)
  VarDecl int x
    Int 1
"
    );
}

#[test]
fn test_recover_at_program_level() {
    let result = parse("int = 5; int y = 2;").unwrap();

    assert_eq!(result.error, ParseError::ExpectedIdentifier);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].get_position(), &Position::new(1, 5));
    assert_eq!(
        dump(&result.ast),
        "Block (1:1)
  VarDecl int y
    Int 2
"
    );
}

#[test]
fn test_recover_inside_block() {
    let result = parse("{ int = 1; int y = 2; } int z;").unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        dump(&result.ast),
        "Block (1:1)
  Block (1:1)
    VarDecl int y
      Int 2
  VarDecl int z
"
    );
}

#[test]
fn test_missing_paren_is_recorded() {
    let result = parse("print(1;").unwrap();

    assert_eq!(result.error, ParseError::FailedToFindToken);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.ast.len(), 1);
    assert!(matches!(
        result.diagnostics[0].get_kind(),
        ErrorImpl::ExpectedToken { .. }
    ));
}

#[test]
fn test_missing_semicolon_is_recorded() {
    let result = parse("int x = 1 int y = 2;").unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.ast.len(), 2);
}

#[test]
fn test_expected_expression() {
    let result = parse("int x = ;").unwrap();

    assert_eq!(result.error, ParseError::ExpectedExpr);
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(dump(&result.ast), "Block (1:1)\n  VarDecl int x\n");
}

#[test]
fn test_broken_initializer_keeps_declaration() {
    let result = parse("int a = 1 +;\nint b = a;").unwrap();

    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        dump(&result.ast),
        "Block (1:1)
  VarDecl int a
  VarDecl int b
    Identifier a
"
    );
}

#[test]
fn test_unexpected_eof() {
    let result = parse("int x =").unwrap();

    assert_eq!(result.error, ParseError::UnexpectedEOF);
    assert_eq!(result.ast.len(), 1);
}

#[test]
fn test_bad_return_type() {
    let result = parse("fn add() { }").unwrap();

    assert_eq!(result.error, ParseError::ExpectedTypeToken);
}

#[test]
fn test_tokens_are_kept() {
    let source = "int x = 1; // count\nprint(x);";
    let result = parse(source).unwrap();

    assert_eq!(result.tokens, tokenize(source).unwrap());
    assert_eq!(result.tokens.len(), 12);
}

#[test]
fn test_lexical_error_aborts() {
    let error = parse("int x = @;").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnexpectedCharacter { ch: '@' });
}

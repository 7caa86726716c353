//! End-to-end tests running source text through every stage.

use std::path::PathBuf;

use cfront::{
    ast::{
        expressions::ExprKind,
        statements::StmtKind,
        types::ScalarType,
    },
    check_source,
    errors::errors::{ErrorImpl, Stage},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parser::parser::parse,
    read_source,
    scope::resolver::resolve,
    type_checker::{diagnostics::TypeErrorKind, type_checker::type_check},
};
use pretty_assertions::assert_eq;

#[test]
fn test_single_declaration() {
    let parsed = parse("int x = 5;").unwrap();
    assert!(parsed.is_ok());
    assert_eq!(parsed.ast.len(), 1);

    let StmtKind::VarDecl {
        type_name,
        name,
        init,
    } = &parsed.ast.body[0].kind
    else {
        panic!("expected a variable declaration, got {:?}", parsed.ast.body[0]);
    };
    assert_eq!(*type_name, ScalarType::Int);
    assert_eq!(name, "x");
    assert_eq!(init.as_ref().map(|init| &init.kind), Some(&ExprKind::Int(5)));

    let scopes = resolve(&parsed.ast).unwrap();
    let report = type_check(&parsed.ast, &scopes);
    assert_eq!(report.error_count, 0);
}

#[test]
fn test_redefinition_is_fatal() {
    let error = check_source("int x = 5;\nint x = 6;", "main.c").unwrap_err();

    assert_eq!(error.get_stage(), Stage::Scope);
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::VariableRedefinition {
            name: String::from("x")
        }
    );
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_function_call_pipeline() {
    let report = check_source(
        "fn int add(int a, int b) { return a + b; } int r = add(2,3);",
        "main.c",
    )
    .unwrap();

    assert!(report.is_ok(), "{:?}", report.types.diagnostics);
    assert_eq!(report.scope_count, 3);
}

#[test]
fn test_wrong_arity_reports_once() {
    let report = check_source(
        "fn int add(int a, int b) { return a + b; } int r = add(2);",
        "main.c",
    )
    .unwrap();

    assert_eq!(report.types.error_count, 1);
    assert_eq!(report.types.count(TypeErrorKind::FnCallParamCount), 1);
}

#[test]
fn test_initializer_widening() {
    let report = check_source("float f = 1; ", "main.c").unwrap();
    assert_eq!(report.types.error_count, 0);

    let report = check_source("int n = 1.5;", "main.c").unwrap();
    assert_eq!(report.types.error_count, 1);
    assert_eq!(report.types.count(TypeErrorKind::ErroneousVarDecl), 1);
}

#[test]
fn test_non_boolean_condition() {
    let report = check_source("if (1 + 2) { print(1); }", "main.c").unwrap();

    assert_eq!(report.types.error_count, 1);
    assert_eq!(report.types.count(TypeErrorKind::NonBooleanCondStmt), 1);
}

#[test]
fn test_unterminated_string_is_fatal() {
    let error = check_source("\"abc", "main.c").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_stage(), Stage::Lexical);
}

#[test]
fn test_number_followed_by_operator_is_fatal() {
    let error = check_source("int x = 1+2;", "main.c").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnexpectedCharacter { ch: '1' });

    let report = check_source("int x = 1 + 2;", "main.c").unwrap();
    assert!(report.is_ok());
}

#[test]
fn test_relexing_is_deterministic() {
    let source = "fn int add(int a, int b) { return a + b; } int r = add(2,3);";
    let first = tokenize(source).unwrap();
    let second = tokenize(source).unwrap();
    assert_eq!(first, second);

    let joined = first
        .iter()
        .filter(|token| token.kind != TokenKind::EOF)
        .map(|token| token.lexeme.as_str())
        .collect::<String>();
    let stripped = source
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    assert_eq!(joined, stripped);
}

#[test]
fn test_syntax_errors_are_collected() {
    let report = check_source("int a = ;\nint b = (1;\nint c = 3;", "main.c").unwrap();

    assert_eq!(report.parse.diagnostics.len(), 2);
    assert!(report
        .parse
        .diagnostics
        .iter()
        .all(|error| error.get_stage() == Stage::Syntax));
    assert!(!report.is_ok());
}

#[test]
fn test_sample_program() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/sample.c");
    let source = read_source(&path).unwrap();
    let report = check_source(&source, "sample.c").unwrap();

    assert!(report.is_ok(), "{:?}", report.types.diagnostics);
    assert_eq!(report.parse.ast.len(), 7);
}

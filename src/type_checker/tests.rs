use pretty_assertions::assert_eq;

use super::{
    diagnostics::{TypeErrorKind, TypeReport},
    type_checker::type_check,
};
use crate::{parser::parser::parse, scope::resolver::resolve};

fn check(source: &str) -> TypeReport {
    let parsed = parse(source).unwrap();
    assert!(parsed.is_ok(), "unexpected diagnostics: {:?}", parsed.diagnostics);
    let scopes = resolve(&parsed.ast).unwrap();
    type_check(&parsed.ast, &scopes)
}

fn kinds(report: &TypeReport) -> Vec<TypeErrorKind> {
    report
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.kind)
        .collect()
}

#[test]
fn test_well_typed_declarations() {
    let report = check("int x = 5; float f = 1; bool b = x < 2; string s = \"hi\"; char c = 'c';");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
    assert_eq!(report.error_count, 0);
}

#[test]
fn test_narrowing_initializer() {
    let report = check("int n = 1.5;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::ErroneousVarDecl]);
    assert_eq!(report.diagnostics[0].line, 1);
}

#[test]
fn test_void_variable() {
    let report = check("void v;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::ErroneousVarDecl]);
}

#[test]
fn test_function_call() {
    let report = check("fn int add(int a, int b) { return a + b; } int r = add(1, 2);");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
}

#[test]
fn test_call_param_count() {
    let report = check("fn int add(int a, int b) { return a + b; }\nint r = add(2);");

    assert_eq!(report.error_count, 1);
    assert_eq!(report.count(TypeErrorKind::FnCallParamCount), 1);
    assert_eq!(
        report.diagnostics[0].message,
        "function 'add' expects 2 params but 1 were passed"
    );
    assert_eq!(report.diagnostics[0].line, 2);
}

#[test]
fn test_call_param_type() {
    let report = check("fn int sq(int a) { return a * a; } int r = sq(\"s\");");

    assert_eq!(kinds(&report), vec![TypeErrorKind::FnCallParamType]);
}

#[test]
fn test_int_argument_widens_to_float() {
    let report = check("fn float half(float a) { return a / 2; } float h = half(3);");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
}

#[test]
fn test_arity_mismatch_still_types_arguments() {
    let report = check("fn int f(int a) { return a; } int r = f(1, \"x\" + 1);");

    assert_eq!(report.error_count, 2);
    assert_eq!(report.count(TypeErrorKind::FnCallParamCount), 1);
    assert_eq!(report.count(TypeErrorKind::AttemptedAddOpOnNonNumeric), 1);
}

#[test]
fn test_return_type_mismatch() {
    let report = check("fn int f() { return \"x\"; }\nfn void g() { return 1; }\nfn int h() { return; }");

    assert_eq!(report.count(TypeErrorKind::ErroneousReturnType), 3);
    let lines = report
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.line)
        .collect::<Vec<_>>();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_nested_returns_are_audited() {
    let report = check("fn int f(int a) { if (a > 0) { return 1; } else { return true; } }");

    assert_eq!(kinds(&report), vec![TypeErrorKind::ErroneousReturnType]);
}

#[test]
fn test_non_boolean_conditions() {
    let report = check(
        "if (1 + 2) { print(1); }\nwhile (1) { }\nfor (int i = 0; i; i++) { }",
    );

    assert_eq!(report.count(TypeErrorKind::NonBooleanCondStmt), 3);
    assert_eq!(report.error_count, 3);
}

#[test]
fn test_boolean_conditions() {
    let report = check("int i = 0; while (i < 3 && true) { i++; } if (!(i == 3)) print(i);");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
}

#[test]
fn test_not_on_non_bool_does_not_cascade() {
    let report = check("bool b = !5;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::ExpectedBooleanExpression]);
}

#[test]
fn test_arithmetic_on_string() {
    let report = check("int x = \"a\" + 1;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::AttemptedAddOpOnNonNumeric]);
}

#[test]
fn test_integer_only_operators() {
    let report = check(
        "int a = 1.5 % 2;\nint b = 1.0 << 1;\nint c = 1.0 & 1;\nint d = ~2.5;",
    );

    assert_eq!(
        kinds(&report),
        vec![
            TypeErrorKind::AttemptedAddOpOnNonNumeric,
            TypeErrorKind::AttemptedShiftOnNonInt,
            TypeErrorKind::AttemptedBitOpOnNonNumeric,
            TypeErrorKind::AttemptedBitOpOnNonNumeric,
        ]
    );
}

#[test]
fn test_logical_operators_need_bools() {
    let report = check("bool c = 1 && true;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::AttemptedBoolOpOnNonBools]);
}

#[test]
fn test_comparison_of_incompatible_types() {
    let report = check("bool b = \"a\" < 1; bool ok = 1 < 2.5;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::ExpressionTypeMismatch]);
}

#[test]
fn test_unary_minus_on_bool() {
    let report = check("bool t = true; int x = -t;");

    assert_eq!(kinds(&report), vec![TypeErrorKind::AttemptedAddOpOnNonNumeric]);
}

#[test]
fn test_assignments() {
    let report = check("int x = 1; x = \"s\"; float f = 1.0; f += 1; int i = 0; i += 1.5;");

    assert_eq!(
        kinds(&report),
        vec![
            TypeErrorKind::ExpressionTypeMismatch,
            TypeErrorKind::ExpressionTypeMismatch,
        ]
    );
    assert_eq!(
        report.diagnostics[0].message,
        "type mismatch in assignment: 'int' = 'string'"
    );
}

#[test]
fn test_print_without_value() {
    let report = check("print();");

    assert_eq!(kinds(&report), vec![TypeErrorKind::EmptyExpression]);
}

#[test]
fn test_block_locals_shadow_globals() {
    let report = check("int x = 1; { float x = 2.5; x = 3.5; } x = 4;");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
}

#[test]
fn test_function_locals() {
    let report = check("fn float f(int a) { float b = a; { int c = a * 2; b = b + c; } return b; }");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
}

#[test]
fn test_body_local_shadows_parameter() {
    let report = check("fn float f(int a) { float a = 1.5; return a; }");

    assert!(report.is_ok(), "{:?}", report.diagnostics);
}

#[test]
fn test_nested_function_declaration() {
    let report = check("fn int outer() { fn int inner(int v) { return v; } return inner(1); }");

    assert!(report.is_ok(), "{:?}", report.diagnostics);

    let report = check("fn int outer() { fn bool inner() { return 1; } return 2; }");
    assert_eq!(kinds(&report), vec![TypeErrorKind::ErroneousReturnType]);
    assert!(report.diagnostics[0].message.contains("'inner'"));
}

#[test]
fn test_top_level_statements_before_functions() {
    let report = check("int n = 1.5;\nfn int f() { return true; }\nbool b = 1;");

    let lines = report
        .diagnostics
        .iter()
        .map(|diagnostic| diagnostic.line)
        .collect::<Vec<_>>();
    assert_eq!(lines, vec![1, 3, 2]);
}

#[test]
fn test_diagnostic_display() {
    let report = check("int x = 1;\nbool b = x;");

    assert_eq!(
        report.diagnostics[0].to_string(),
        "[ErroneousVarDecl] (2): variable declaration 'b' type 'bool' incompatible with initializer type 'int'"
    );
}

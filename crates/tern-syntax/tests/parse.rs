//! End-to-end parser tests over whole source strings.

use pretty_assertions::assert_eq;
use tern_mem::MemPool;
use tern_syntax::ast::{BinaryOp, Expr, ExprKind, StmtKind, Type};
use tern_syntax::{Emitter, Lexer, Parser, PrettyPrinter, Span, SyntaxError, parse_ast};

fn parse_expr<'a>(pool: &'a MemPool, source: &'a str) -> &'a Expr<'a> {
    Parser::new(Lexer::new(source), source, pool)
        .parse_expression()
        .unwrap()
}

fn print_expr(source: &str) -> String {
    let pool = MemPool::new();
    let expr = parse_expr(&pool, source);
    PrettyPrinter::new(source).print_expr(expr)
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(print_expr("1 + 2 * 3"), "(+ 1 (* 2 3))");
    assert_eq!(print_expr("1 * 2 + 3"), "(+ (* 1 2) 3)");
}

#[test]
fn test_comparison_binds_loosest() {
    assert_eq!(print_expr("a + 1 < b * 2"), "(< (+ a 1) (* b 2))");
    assert_eq!(print_expr("a == b != c"), "(!= (== a b) c)");
}

#[test]
fn test_subtraction_is_left_associative() {
    let pool = MemPool::new();
    let source = "a - b - c";
    let expr = parse_expr(&pool, source);

    let ExprKind::Binary { op, left, right } = &expr.kind else {
        panic!("expected binary, got {expr:?}");
    };
    assert_eq!(*op, BinaryOp::Sub);
    assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::Sub, .. }));
    assert_eq!(right.span.text(source), "c");
    assert_eq!(expr.span, Span::new(0, 9));
    assert_eq!(print_expr(source), "(- (- a b) c)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(print_expr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
    assert_eq!(print_expr("a - (b - c)"), "(- a (- b c))");
}

#[test]
fn test_call_arguments_in_order() {
    let pool = MemPool::new();
    let source = "f(1, 2)";
    let expr = parse_expr(&pool, source);

    let ExprKind::Call { callee, args } = &expr.kind else {
        panic!("expected call, got {expr:?}");
    };
    assert_eq!(callee.text(source), "f");
    let values: Vec<u64> = args
        .iter()
        .map(|arg| match arg.kind {
            ExprKind::IntLiteral { value, .. } => value,
            _ => panic!("expected literal argument"),
        })
        .collect();
    assert_eq!(values, vec![1, 2]);
    assert_eq!(expr.span, Span::new(0, 7));
}

#[test]
fn test_call_without_arguments() {
    let pool = MemPool::new();
    let expr = parse_expr(&pool, "f()");

    let ExprKind::Call { args, .. } = &expr.kind else {
        panic!("expected call, got {expr:?}");
    };
    assert!(args.is_empty());
}

#[test]
fn test_call_arguments_may_span_lines() {
    assert_eq!(print_expr("f(a,\n  b + 1,\n  g(c))"), "(call f a (+ b 1) (call g c))");
}

#[test]
fn test_literal_span_ignores_surrounding_whitespace() {
    let pool = MemPool::new();
    let source = " \t 9001u16 \n";
    let expr = parse_expr(&pool, source);

    assert_eq!(expr.span, Span::new(3, 7));
    assert_eq!(expr.span.text(source), "9001u16");
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_main_with_let_and_return() {
    let pool = MemPool::new();
    let source = "main() { let x = 1\n return x\n }";
    let ast = parse_ast(&pool, source).unwrap();

    assert_eq!(ast.functions.len(), 1);
    let main = &ast.functions[0];
    assert_eq!(main.name.text(source), "main");
    assert_eq!(main.ret_type, Type::Void);
    assert!(main.params.is_empty());
    assert_eq!(main.body.stmts.len(), 2);
    assert!(matches!(main.body.stmts[0].kind, StmtKind::Let { init: Some(_), .. }));
    assert!(matches!(main.body.stmts[1].kind, StmtKind::Return(Some(_))));
}

#[test]
fn test_multiple_functions() {
    let pool = MemPool::new();
    let source = "\
// helpers
square(n: i64) i64 {
  return n * n
}

main() {
  mut total: i64 = square(3) + square(4)
  return
}
";
    let ast = parse_ast(&pool, source).unwrap();

    assert_eq!(ast.functions.len(), 2);
    let square = ast.function("square").unwrap();
    assert_eq!(square.params[0].ty, Type::I64);
    assert_eq!(ast.source_text(square.params[0].name), "n");
    assert!(ast.function("cube").is_none());

    assert_eq!(
        PrettyPrinter::new(source).print_ast(&ast),
        "square(n: i64) i64 {\n  (return (* n n))\n}\n\n\
         main() void {\n  (mut total: i64 = (+ (call square 3) (call square 4)))\n  (return)\n}"
    );
}

#[test]
fn test_empty_unit() {
    let pool = MemPool::new();
    let ast = parse_ast(&pool, "  // nothing here\n\n").unwrap();
    assert!(ast.functions.is_empty());
}

#[test]
fn test_value_numbers_are_per_unit() {
    let pool = MemPool::new();
    let first = parse_ast(&pool, "a() { }").unwrap();
    let second = parse_ast(&pool, "b() { }").unwrap();

    assert_eq!(first.next_value_number(), 1);
    assert_eq!(first.next_value_number(), 2);
    assert_eq!(second.next_value_number(), 1);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_malformed_param_list_is_fatal() {
    let pool = MemPool::new();
    let source = "main( { }";
    let error = parse_ast(&pool, source).unwrap_err();

    assert!(error.is_source());
    assert_eq!(error.message(), "expected param name");
    assert_eq!(error.span(), Some(Span::new(6, 1)));
    assert_eq!(
        Emitter::new(false).render(&error, source),
        "error: expected param name\n | main( { }\n |       ^\n"
    );
}

#[test]
fn test_error_rendering_picks_the_offending_line() {
    let pool = MemPool::new();
    let source = "main() {\n  let x = 1\n  let = 2\n}\n";
    let error = parse_ast(&pool, source).unwrap_err();

    assert_eq!(error.message(), "expected variable name");
    let rendered = Emitter::new(false).render(&error, source);
    assert!(rendered.contains(" |   let = 2\n"));
    assert!(!rendered.contains("let x"));
}

#[test]
fn test_lexer_errors_surface_through_parse() {
    let pool = MemPool::new();
    let error = parse_ast(&pool, "main() {\n  return 3 % 2\n}").unwrap_err();
    assert_eq!(error.message(), "unexpected character '%'");

    let error = parse_ast(&pool, "main() {\n  return 3u7\n}").unwrap_err();
    assert_eq!(error.message(), "invalid integer suffix");
}

#[test]
fn test_literal_overflow() {
    let pool = MemPool::new();
    let source = "main() {\n  return 18446744073709551616\n}";
    let error = parse_ast(&pool, source).unwrap_err();

    assert_eq!(error.message(), "overflow on '18446744073709551616'");
    assert!(matches!(error, SyntaxError::Source { .. }));
}

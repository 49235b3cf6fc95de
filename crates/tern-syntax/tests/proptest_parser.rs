//! Property-based tests for the lexer and parser.

use proptest::prelude::*;
use tern_mem::MemPool;
use tern_syntax::ast::ExprKind;
use tern_syntax::{Lexer, Parser, Span, TokenKind, parse_ast};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Strategy for identifiers that are not keywords
fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,10}".prop_filter("keyword", |s| TokenKind::keyword(s).is_none())
}

/// Strategy for integer literals, with and without suffixes
fn arb_int() -> impl Strategy<Value = (u64, String)> {
    prop_oneof![
        any::<u64>().prop_map(|n| (n, n.to_string())),
        any::<u8>().prop_map(|n| (u64::from(n), format!("{n}u8"))),
        any::<u32>().prop_map(|n| (u64::from(n), format!("{n}u32"))),
        (0u64..1000).prop_map(|n| (n, format!("{n}i16"))),
    ]
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    "[ \t\n]{0,4}"
}

fn arb_binop() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("+"),
        Just("-"),
        Just("*"),
        Just("/"),
        Just("=="),
        Just("!="),
        Just("<"),
        Just(">"),
        Just("<="),
        Just(">="),
    ]
}

/// Strategy for nested expressions
fn arb_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![arb_ident(), arb_int().prop_map(|(_, text)| text)];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), arb_binop(), inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            (arb_ident(), prop::collection::vec(inner, 0..4))
                .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
        ]
    })
}

/// Strategy for function units
fn arb_unit() -> impl Strategy<Value = String> {
    let stmt = prop_oneof![
        (arb_ident(), arb_expr()).prop_map(|(name, e)| format!("let {name} = {e}")),
        (arb_ident(), arb_expr()).prop_map(|(name, e)| format!("mut {name}: u32 = {e}")),
        arb_expr().prop_map(|e| format!("return {e}")),
    ];
    let func = (arb_ident(), prop::collection::vec(stmt, 0..6))
        .prop_map(|(name, stmts)| format!("{name}() {{\n  {}\n}}\n", stmts.join("\n  ")));
    prop::collection::vec(func, 0..4).prop_map(|funcs| funcs.concat())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_combine_starts_left_and_covers_both(
        start in 0usize..10_000,
        left_len in 0usize..100,
        gap in 0usize..150,
        right_len in 0usize..100,
    ) {
        // `gap` below `left_len` puts `right` inside or overlapping `left`.
        let left = Span::new(start, left_len);
        let right = Span::new(start + gap, right_len);
        let combined = Span::combine(left, right);

        prop_assert_eq!(combined.start, left.start);
        prop_assert!(combined.contains(left));
        prop_assert!(combined.contains(right));
        prop_assert_eq!(combined.end(), left.end().max(right.end()));
    }

    #[test]
    fn test_literal_span_matches_source(
        (value, text) in arb_int(),
        before in arb_whitespace(),
        after in arb_whitespace(),
    ) {
        let source = format!("{before}{text}{after}");
        let pool = MemPool::new();
        let expr = Parser::new(Lexer::new(&source), &source, &pool)
            .parse_expression()
            .unwrap();

        prop_assert_eq!(expr.span, Span::new(before.len(), text.len()));
        let is_expected_literal =
            matches!(expr.kind, ExprKind::IntLiteral { value: v, .. } if v == value);
        prop_assert!(is_expected_literal);
    }

    #[test]
    fn test_expressions_parse(expr in arb_expr()) {
        let pool = MemPool::new();
        let parsed = Parser::new(Lexer::new(&expr), &expr, &pool).parse_expression();
        prop_assert!(parsed.is_ok(), "failed to parse {:?}: {:?}", expr, parsed.err());
    }

    #[test]
    fn test_parsing_is_deterministic(source in arb_unit()) {
        let first_pool = MemPool::new();
        let second_pool = MemPool::new();
        let first = parse_ast(&first_pool, &source).unwrap();
        let second = parse_ast(&second_pool, &source).unwrap();

        prop_assert_eq!(
            format!("{:?}", first.functions),
            format!("{:?}", second.functions)
        );
    }

    #[test]
    fn test_lexer_never_panics(source in "\\PC{0,64}") {
        let _ = Lexer::new(&source).lex();
    }
}

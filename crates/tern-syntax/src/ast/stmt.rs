//! Statement nodes in the tern AST.

use crate::ast::expr::Expr;
use crate::ast::ty::Type;
use crate::span::{Span, Spanned};
use tern_mem::ArenaVec;

/// A statement with the span of the whole statement, terminator included.
#[derive(Debug)]
pub struct Stmt<'arena> {
    /// What the statement is
    pub kind: StmtKind<'arena>,
    /// Source location
    pub span: Span,
}

impl<'arena> Stmt<'arena> {
    /// Creates a statement.
    #[must_use]
    pub const fn new(kind: StmtKind<'arena>, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Spanned for Stmt<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

/// The statement variants.
#[derive(Debug)]
pub enum StmtKind<'arena> {
    /// Binding: `let x = expr`, `mut x: u8`, `let x: i32 = expr`
    Let {
        /// Span of the variable name
        name: Span,
        /// Optional type annotation
        ty: Option<Type>,
        /// Optional initializer
        init: Option<&'arena Expr<'arena>>,
        /// `true` for `mut`, `false` for `let`
        mutable: bool,
    },

    /// Expression evaluated for its effect: `f(x)`
    Expr(&'arena Expr<'arena>),

    /// Return statement: `return expr` or `return`
    Return(Option<&'arena Expr<'arena>>),
}

/// A braced sequence of statements in source order.
#[derive(Debug)]
pub struct Block<'arena> {
    /// Statements in source order
    pub stmts: ArenaVec<'arena, Stmt<'arena>>,
    /// Source location, braces included
    pub span: Span,
}

impl Spanned for Block<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

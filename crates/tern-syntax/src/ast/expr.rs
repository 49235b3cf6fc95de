//! Expression nodes in the tern AST.
//!
//! # Arena Allocation
//!
//! Expression nodes are allocated in a [`MemPool`](tern_mem::MemPool) and
//! referenced via `&'arena Expr<'arena>`. Call arguments live in an
//! [`ArenaVec`] from the same pool.

use crate::ast::ty::Type;
use crate::span::{Span, Spanned};
use crate::token::IntLitKind;
use std::cell::Cell;
use std::fmt;
use tern_mem::ArenaVec;

/// An expression together with its source range and type slot.
///
/// The type slot starts empty; the parser never fills it.
///
/// # Examples
///
/// ```
/// use tern_syntax::ast::expr::{Expr, ExprKind};
/// use tern_syntax::span::{Span, Spanned};
/// use tern_syntax::token::IntLitKind;
///
/// let lit = Expr::new(
///     ExprKind::IntLiteral { value: 42, kind: IntLitKind::Unsuffixed },
///     Span::new(0, 2),
/// );
/// assert_eq!(lit.span(), Span::new(0, 2));
/// assert_eq!(lit.ty(), None);
/// ```
#[derive(Debug)]
pub struct Expr<'arena> {
    /// What the expression is
    pub kind: ExprKind<'arena>,
    /// Source location
    pub span: Span,
    ty: Cell<Option<Type>>,
}

impl<'arena> Expr<'arena> {
    /// Creates an expression with an empty type slot.
    #[must_use]
    pub const fn new(kind: ExprKind<'arena>, span: Span) -> Self {
        Self {
            kind,
            span,
            ty: Cell::new(None),
        }
    }

    /// The type recorded by a later phase, if any.
    #[must_use]
    pub fn ty(&self) -> Option<Type> {
        self.ty.get()
    }

    /// Records the expression's type.
    pub fn set_ty(&self, ty: Type) {
        self.ty.set(Some(ty));
    }
}

impl Spanned for Expr<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

/// The expression variants.
#[derive(Debug)]
pub enum ExprKind<'arena> {
    /// Integer literal: `42`, `7u8`
    IntLiteral {
        /// The folded decimal value
        value: u64,
        /// Width and signedness from the suffix
        kind: IntLitKind,
    },

    /// Variable reference: `x`
    Variable {
        /// Span of the name in source
        name: Span,
    },

    /// Binary operator expression: `a + b`, `x == y`
    Binary {
        /// The operator
        op: BinaryOp,
        /// Left operand
        left: &'arena Expr<'arena>,
        /// Right operand
        right: &'arena Expr<'arena>,
    },

    /// Function call: `f(a, b)`
    Call {
        /// Span of the callee name in source
        callee: Span,
        /// Arguments in source order
        args: ArenaVec<'arena, &'arena Expr<'arena>>,
    },
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition: `+`
    Add,
    /// Subtraction: `-`
    Sub,
    /// Multiplication: `*`
    Mul,
    /// Division: `/`
    Div,
    /// Equality: `==`
    Eq,
    /// Inequality: `!=`
    Neq,
    /// Less than: `<`
    Lt,
    /// Greater than: `>`
    Gt,
    /// Less than or equal: `<=`
    Lte,
    /// Greater than or equal: `>=`
    Gte,
}

impl BinaryOp {
    /// Returns `true` for the comparison operators, which produce `bool`.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Neq | Self::Lt | Self::Gt | Self::Lte | Self::Gte
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
            Self::Eq => write!(f, "=="),
            Self::Neq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::Lte => write!(f, "<="),
            Self::Gte => write!(f, ">="),
        }
    }
}

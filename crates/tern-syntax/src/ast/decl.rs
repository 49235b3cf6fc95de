//! Declaration nodes in the tern AST.
//!
//! A program is a sequence of functions. [`Ast`] is the compilation-unit root
//! that owns them together with a reference to the source they came from.

use crate::ast::stmt::Block;
use crate::ast::ty::Type;
use crate::span::{Span, Spanned};
use std::cell::Cell;
use tern_mem::{ArenaVec, MemPool};

/// A function parameter: `name: type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Param {
    /// Span of the parameter name
    pub name: Span,
    /// Declared type
    pub ty: Type,
}

impl Spanned for Param {
    fn span(&self) -> Span {
        self.name
    }
}

/// A function declaration: `name(params) [ret] { body }`.
#[derive(Debug)]
pub struct Function<'arena> {
    /// Span of the function name
    pub name: Span,
    /// Parameters in source order
    pub params: ArenaVec<'arena, Param>,
    /// Return type; [`Type::Void`] when omitted
    pub ret_type: Type,
    /// Function body
    pub body: Block<'arena>,
    /// Source location, from the name to the closing brace
    pub span: Span,
}

impl Spanned for Function<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

/// Generator of value numbers for later lowering phases.
///
/// Numbers start at 1 and increase by one per call. Each compilation unit
/// owns its own generator.
#[derive(Debug)]
pub struct ValueNumbers {
    next: Cell<u64>,
}

impl ValueNumbers {
    /// Creates a generator whose first number is 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Returns a fresh value number.
    pub fn fresh(&self) -> u64 {
        let number = self.next.get();
        self.next.set(number + 1);
        number
    }
}

impl Default for ValueNumbers {
    fn default() -> Self {
        Self::new()
    }
}

/// The root of a compilation unit.
///
/// All nodes live in `pool`, which the caller created and which outlives the
/// tree.
#[derive(Debug)]
pub struct Ast<'arena> {
    pool: &'arena MemPool,
    source: &'arena str,
    /// Functions in source order
    pub functions: ArenaVec<'arena, Function<'arena>>,
    value_numbers: ValueNumbers,
}

impl<'arena> Ast<'arena> {
    /// Creates an empty unit over `source`.
    #[must_use]
    pub const fn new(
        pool: &'arena MemPool,
        source: &'arena str,
        functions: ArenaVec<'arena, Function<'arena>>,
    ) -> Self {
        Self {
            pool,
            source,
            functions,
            value_numbers: ValueNumbers::new(),
        }
    }

    /// The pool every node of this tree lives in.
    #[must_use]
    pub const fn pool(&self) -> &'arena MemPool {
        self.pool
    }

    /// The source buffer the tree was parsed from.
    #[must_use]
    pub const fn source(&self) -> &'arena str {
        self.source
    }

    /// Slices the source text covered by `span`.
    #[must_use]
    pub fn source_text(&self, span: Span) -> &'arena str {
        span.text(self.source)
    }

    /// Finds the first function named `name`.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function<'arena>> {
        self.functions
            .iter()
            .find(|func| self.source_text(func.name) == name)
    }

    /// Returns a fresh value number from this unit's generator.
    pub fn next_value_number(&self) -> u64 {
        self.value_numbers.fresh()
    }
}

//! Abstract Syntax Tree (AST) for the tern language.
//!
//! Every node records the [`Span`](crate::span::Span) of the source it was
//! built from, and every node lives in the [`MemPool`](tern_mem::MemPool) the
//! unit was parsed into. Children are plain `&'arena` references; sequences
//! are [`ArenaVec`](tern_mem::ArenaVec)s from the same pool. Nothing is freed
//! until the pool is.
//!
//! # Modules
//!
//! - [`expr`] - Expression nodes (literals, variables, operators, calls)
//! - [`stmt`] - Statement nodes and blocks
//! - [`decl`] - Functions, parameters and the compilation-unit root
//! - [`ty`] - Built-in types

pub mod decl;
pub mod expr;
pub mod stmt;
pub mod ty;

// Re-exports for convenience
pub use decl::{Ast, Function, Param, ValueNumbers};
pub use expr::{BinaryOp, Expr, ExprKind};
pub use stmt::{Block, Stmt, StmtKind};
pub use ty::Type;

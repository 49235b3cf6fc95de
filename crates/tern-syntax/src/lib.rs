//! tern syntax: lexer, parser and AST
//!
//! This crate provides the language frontend for tern:
//! - Lexical analysis with newline-sensitive statement terminators
//! - Recursive descent parsing into a pool-allocated AST
//! - Source location tracking and diagnostic rendering
//!
//! # Modules
//!
//! - [`span`] - Source location tracking
//! - [`token`] - Token types and definitions
//! - [`lexer`] - Tokenization and the [`TokenStream`] trait
//! - [`parser`] - Recursive descent parser
//! - [`ast`] - AST node definitions
//! - [`error`] - Source and internal error types
//! - [`diagnostic`] - Error rendering
//! - [`pretty`] - AST pretty-printer
//!
//! # Examples
//!
//! ```
//! use tern_mem::MemPool;
//! use tern_syntax::ast::StmtKind;
//! use tern_syntax::parse_ast;
//!
//! let pool = MemPool::new();
//! let source = "main() {\n  let x = 1\n  return x\n}\n";
//! let ast = parse_ast(&pool, source).unwrap();
//!
//! let main = ast.function("main").unwrap();
//! assert!(matches!(main.body.stmts[0].kind, StmtKind::Let { .. }));
//! assert!(matches!(main.body.stmts[1].kind, StmtKind::Return(Some(_))));
//! ```

#![warn(missing_docs)]

// Public modules
pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;

// Re-exports for convenience
pub use diagnostic::Emitter;
pub use error::{SyntaxError, SyntaxResult};
pub use lexer::{Lexer, TokenBuffer, TokenStream};
pub use parser::{Parser, parse_ast};
pub use pretty::PrettyPrinter;
pub use span::{LineCol, Span, Spanned};
pub use token::{IntLitKind, Token, TokenKind};

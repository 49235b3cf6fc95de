//! Pretty-printer for the tern AST.
//!
//! Expressions and statements print as parenthesised prefix trees, which
//! makes grouping explicit:
//!
//! ```text
//! main() void {
//!   (let x = (+ 1 (* 2 3)))
//!   (return (call f x))
//! }
//! ```
//!
//! Names are printed from the source text their spans cover.

use crate::ast::{Ast, Block, Expr, ExprKind, Function, Stmt, StmtKind};
use crate::token::IntLitKind;
use std::fmt::Write;

/// Configuration for pretty-printing.
#[derive(Debug, Clone)]
pub struct PrettyConfig {
    /// Indentation string (e.g., "  " or "\t")
    pub indent: String,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}

/// Pretty-printer for the tern AST.
pub struct PrettyPrinter<'src> {
    /// Source the spans point into
    source: &'src str,
    /// Configuration
    config: PrettyConfig,
}

impl<'src> PrettyPrinter<'src> {
    /// Creates a new pretty-printer over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            config: PrettyConfig::default(),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PrettyConfig) -> Self {
        self.config = config;
        self
    }

    /// Pretty-prints an expression.
    #[must_use]
    pub fn print_expr(&self, expr: &Expr<'_>) -> String {
        match &expr.kind {
            ExprKind::IntLiteral { value, kind } => match kind {
                IntLitKind::Unsuffixed => value.to_string(),
                _ => format!("{value}{}", kind.ty()),
            },

            ExprKind::Variable { name } => name.text(self.source).to_string(),

            ExprKind::Binary { op, left, right } => {
                let left_str = self.print_expr(left);
                let right_str = self.print_expr(right);
                format!("({op} {left_str} {right_str})")
            }

            ExprKind::Call { callee, args } => {
                let mut result = format!("(call {}", callee.text(self.source));
                for arg in args {
                    result.push(' ');
                    result.push_str(&self.print_expr(arg));
                }
                result.push(')');
                result
            }
        }
    }

    /// Pretty-prints a statement.
    #[must_use]
    pub fn print_stmt(&self, stmt: &Stmt<'_>) -> String {
        match &stmt.kind {
            StmtKind::Let {
                name,
                ty,
                init,
                mutable,
            } => {
                let keyword = if *mutable { "mut" } else { "let" };
                let mut result = format!("({keyword} {}", name.text(self.source));
                if let Some(ty) = ty {
                    let _ = write!(result, ": {ty}");
                }
                if let Some(init) = init {
                    let _ = write!(result, " = {}", self.print_expr(init));
                }
                result.push(')');
                result
            }

            StmtKind::Expr(expr) => self.print_expr(expr),

            StmtKind::Return(Some(value)) => format!("(return {})", self.print_expr(value)),
            StmtKind::Return(None) => "(return)".to_string(),
        }
    }

    /// Pretty-prints a block, one statement per line, at `depth` levels of
    /// indentation.
    #[must_use]
    pub fn print_block(&self, block: &Block<'_>, depth: usize) -> String {
        let mut result = "{\n".to_string();
        let inner = self.config.indent.repeat(depth + 1);

        for stmt in &block.stmts {
            result.push_str(&inner);
            result.push_str(&self.print_stmt(stmt));
            result.push('\n');
        }

        result.push_str(&self.config.indent.repeat(depth));
        result.push('}');
        result
    }

    /// Pretty-prints a function signature and body.
    #[must_use]
    pub fn print_function(&self, func: &Function<'_>) -> String {
        let params = func
            .params
            .iter()
            .map(|param| format!("{}: {}", param.name.text(self.source), param.ty))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "{}({params}) {} {}",
            func.name.text(self.source),
            func.ret_type,
            self.print_block(&func.body, 0)
        )
    }

    /// Pretty-prints every function of a unit, separated by blank lines.
    #[must_use]
    pub fn print_ast(&self, ast: &Ast<'_>) -> String {
        ast.functions
            .iter()
            .map(|func| self.print_function(func))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

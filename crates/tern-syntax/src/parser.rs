//! Recursive descent parser for the tern language.
//!
//! The grammar, lowest precedence first:
//!
//! ```text
//! unit       = function* EOF
//! function   = IDENT "(" (IDENT ":" type ","?)* ")" type? block
//! block      = "{" stmt* "}"
//! stmt       = ("let" | "mut") IDENT ("=" expr | ":" type ("=" expr)?) TERM
//!            | "return" expr? TERM
//!            | expr TERM
//! expr       = comparison
//! comparison = term (("==" | "!=" | ">" | "<" | ">=" | "<=") term)*
//! term       = factor (("+" | "-") factor)*
//! factor     = primary (("*" | "/") primary)*
//! primary    = INT | IDENT | IDENT "(" (expr ("," expr)*)? ")" | "(" expr ")"
//! ```
//!
//! Parsing stops at the first error. Every node is allocated in the
//! [`MemPool`] handed to the parser, and every sequence is an [`ArenaVec`]
//! from the same pool.

use crate::ast::{
    Ast, BinaryOp, Block, Expr, ExprKind, Function, Param, Stmt, StmtKind, Type,
};
use crate::error::{SyntaxError, SyntaxResult};
use crate::lexer::{Lexer, TokenStream};
use crate::span::{Span, Spanned};
use crate::token::{IntLitKind, Token, TokenKind};
use tern_log::debug;
use tern_mem::{ArenaVec, MemPool};

/// Parses a whole compilation unit from source text.
///
/// The pool is created by the caller and must outlive the returned tree.
///
/// # Errors
///
/// Returns the first lexical or syntax error, or an internal error if the
/// pool is exhausted.
///
/// # Examples
///
/// ```
/// use tern_mem::MemPool;
/// use tern_syntax::ast::Type;
/// use tern_syntax::parser::parse_ast;
///
/// let pool = MemPool::new();
/// let ast = parse_ast(&pool, "add(a: u32, b: u32) u32 {\n  return a + b\n}\n").unwrap();
///
/// let add = ast.function("add").unwrap();
/// assert_eq!(add.params.len(), 2);
/// assert_eq!(add.ret_type, Type::U32);
/// ```
pub fn parse_ast<'arena>(pool: &'arena MemPool, source: &'arena str) -> SyntaxResult<Ast<'arena>> {
    Parser::new(Lexer::new(source), source, pool).parse_unit()
}

/// Parser for the tern language.
///
/// # Type Parameters
///
/// - `'arena`: Lifetime of the pool and of the source buffer
/// - `S`: Where tokens come from
pub struct Parser<'arena, S> {
    /// Token stream
    tokens: S,
    /// Source code the token spans point into
    source: &'arena str,
    /// Pool for AST node allocation
    pool: &'arena MemPool,
}

impl<'arena, S: TokenStream> Parser<'arena, S> {
    /// Creates a new parser.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token stream over `source`
    /// * `source` - Source code the token spans point into
    /// * `pool` - Pool for AST node allocation
    #[must_use]
    pub const fn new(tokens: S, source: &'arena str, pool: &'arena MemPool) -> Self {
        Self {
            tokens,
            source,
            pool,
        }
    }

    fn peek(&mut self) -> SyntaxResult<Token> {
        self.tokens.peek_token()
    }

    fn next(&mut self) -> SyntaxResult<Token> {
        self.tokens.next_token()
    }

    fn check(&mut self, kind: TokenKind) -> SyntaxResult<bool> {
        Ok(self.peek()?.kind == kind)
    }

    /// Consumes the next token, failing with `message` unless it has kind
    /// `kind`.
    fn expect(&mut self, kind: TokenKind, message: &str) -> SyntaxResult<Token> {
        let token = self.next()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(SyntaxError::source(message, token.span))
        }
    }

    /// Allocates an expression in the pool.
    fn alloc_expr(&self, kind: ExprKind<'arena>, span: Span) -> SyntaxResult<&'arena Expr<'arena>> {
        let expr: &'arena Expr<'arena> = self.pool.try_alloc(Expr::new(kind, span))?;
        Ok(expr)
    }

    fn vec<T>(&self) -> SyntaxResult<ArenaVec<'arena, T>> {
        Ok(ArenaVec::new_in(self.pool)?)
    }

    // ===== Expressions =====

    /// Parses an expression (entry point).
    ///
    /// # Errors
    ///
    /// Returns the first syntax error.
    pub fn parse_expression(&mut self) -> SyntaxResult<&'arena Expr<'arena>> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> SyntaxResult<&'arena Expr<'arena>> {
        self.parse_binary_level(
            &[
                TokenKind::EqEq,
                TokenKind::BangEq,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::GtEq,
                TokenKind::LtEq,
            ],
            Self::parse_term,
        )
    }

    fn parse_term(&mut self) -> SyntaxResult<&'arena Expr<'arena>> {
        self.parse_binary_level(&[TokenKind::Plus, TokenKind::Minus], Self::parse_factor)
    }

    fn parse_factor(&mut self) -> SyntaxResult<&'arena Expr<'arena>> {
        self.parse_binary_level(&[TokenKind::Star, TokenKind::Slash], Self::parse_primary)
    }

    /// Left-associative fold of `operand` over the operators in `ops`.
    fn parse_binary_level(
        &mut self,
        ops: &[TokenKind],
        operand: fn(&mut Self) -> SyntaxResult<&'arena Expr<'arena>>,
    ) -> SyntaxResult<&'arena Expr<'arena>> {
        let mut left = operand(self)?;

        while ops.contains(&self.peek()?.kind) {
            let op = self.parse_binary_op()?;
            let right = operand(self)?;
            let span = Span::combine(left.span(), right.span());
            left = self.alloc_expr(ExprKind::Binary { op, left, right }, span)?;
        }

        Ok(left)
    }

    fn parse_binary_op(&mut self) -> SyntaxResult<BinaryOp> {
        let token = self.next()?;
        let op = match token.kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::BangEq => BinaryOp::Neq,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::GtEq => BinaryOp::Gte,
            TokenKind::LtEq => BinaryOp::Lte,
            other => {
                return Err(SyntaxError::internal(format!(
                    "impossible binary op token '{other}'"
                )));
            }
        };
        Ok(op)
    }

    fn parse_primary(&mut self) -> SyntaxResult<&'arena Expr<'arena>> {
        let token = self.next()?;
        match token.kind {
            TokenKind::IntLiteral(kind) => self.parse_int_literal(token.span, kind),
            TokenKind::Ident => {
                if self.check(TokenKind::LParen)? {
                    self.parse_call(token.span)
                } else {
                    self.alloc_expr(ExprKind::Variable { name: token.span }, token.span)
                }
            }
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen, "expected ')'")?;
                Ok(inner)
            }
            _ => Err(SyntaxError::source("expected expression", token.span)),
        }
    }

    /// Folds the literal's decimal digits into a `u64`.
    ///
    /// The span covers the suffix too; it is stripped before folding.
    fn parse_int_literal(
        &self,
        span: Span,
        kind: IntLitKind,
    ) -> SyntaxResult<&'arena Expr<'arena>> {
        let text = span.text(self.source);
        let digits = text
            .len()
            .checked_sub(kind.suffix_len())
            .and_then(|end| text.get(..end))
            .filter(|digits| !digits.is_empty())
            .ok_or_else(|| SyntaxError::internal(format!("malformed integer token '{text}'")))?;

        let mut value = 0u64;
        for ch in digits.chars() {
            let digit = ch.to_digit(10).ok_or_else(|| {
                SyntaxError::internal(format!("malformed integer token '{text}'"))
            })?;
            value = value
                .checked_mul(10)
                .and_then(|acc| acc.checked_add(u64::from(digit)))
                .ok_or_else(|| SyntaxError::source(format!("overflow on '{text}'"), span))?;
        }

        self.alloc_expr(ExprKind::IntLiteral { value, kind }, span)
    }

    fn parse_call(&mut self, callee: Span) -> SyntaxResult<&'arena Expr<'arena>> {
        self.next()?; // '('
        let mut args = self.vec()?;

        while !self.check(TokenKind::RParen)? {
            args.push(self.parse_expression()?)?;
            if !self.check(TokenKind::Comma)? {
                break;
            }
            self.next()?;
        }

        let close = self.expect(TokenKind::RParen, "expected ')'")?;
        self.alloc_expr(ExprKind::Call { callee, args }, Span::combine(callee, close.span))
    }

    // ===== Types =====

    /// Parses a built-in type name.
    ///
    /// # Errors
    ///
    /// Fails with "expected type name" on any other token.
    pub fn parse_type(&mut self) -> SyntaxResult<Type> {
        let token = self.next()?;
        match token.kind {
            TokenKind::TypeName(ty) => Ok(ty),
            _ => Err(SyntaxError::source("expected type name", token.span)),
        }
    }

    // ===== Statements =====

    /// Skips newline terminators; an explicit `;` is not skipped.
    fn skip_terminators(&mut self) -> SyntaxResult<()> {
        loop {
            let token = self.peek()?;
            if token.kind != TokenKind::Terminator || token.span.text(self.source) == ";" {
                return Ok(());
            }
            self.next()?;
        }
    }

    fn expect_terminator(&mut self) -> SyntaxResult<Token> {
        self.expect(TokenKind::Terminator, "expected newline or ';'")
    }

    fn parse_let(&mut self, mutable: bool) -> SyntaxResult<Stmt<'arena>> {
        let first = self.next()?; // 'let' or 'mut'
        let name = self.expect(TokenKind::Ident, "expected variable name")?;

        let middle = self.next()?;
        let (ty, init, last) = match middle.kind {
            TokenKind::Eq => {
                let init = self.parse_expression()?;
                (None, Some(init), self.expect_terminator()?)
            }
            TokenKind::Colon => {
                let ty = self.parse_type()?;
                let after = self.next()?;
                match after.kind {
                    TokenKind::Eq => {
                        let init = self.parse_expression()?;
                        (Some(ty), Some(init), self.expect_terminator()?)
                    }
                    TokenKind::Terminator => (Some(ty), None, after),
                    _ => return Err(SyntaxError::source("expected '=' or ';'", after.span)),
                }
            }
            _ => return Err(SyntaxError::source("expected '=' or ':'", middle.span)),
        };

        Ok(Stmt::new(
            StmtKind::Let {
                name: name.span,
                ty,
                init,
                mutable,
            },
            Span::combine(first.span, last.span),
        ))
    }

    fn parse_return(&mut self) -> SyntaxResult<Stmt<'arena>> {
        let first = self.next()?; // 'return'

        let (value, last) = if self.check(TokenKind::Terminator)? {
            (None, self.next()?)
        } else {
            let value = self.parse_expression()?;
            (Some(value), self.expect_terminator()?)
        };

        Ok(Stmt::new(
            StmtKind::Return(value),
            Span::combine(first.span, last.span),
        ))
    }

    fn parse_expr_stmt(&mut self) -> SyntaxResult<Stmt<'arena>> {
        let expr = self.parse_expression()?;
        let last = self.expect_terminator()?;
        Ok(Stmt::new(
            StmtKind::Expr(expr),
            Span::combine(expr.span(), last.span),
        ))
    }

    /// Parses one statement, dispatching on its first token.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error.
    pub fn parse_statement(&mut self) -> SyntaxResult<Stmt<'arena>> {
        match self.peek()?.kind {
            TokenKind::Let => self.parse_let(false),
            TokenKind::Mut => self.parse_let(true),
            TokenKind::Return => self.parse_return(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// Parses a braced block.
    ///
    /// Statements are read until `}`; running into the end of input fails
    /// inside statement parsing.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error.
    pub fn parse_block(&mut self) -> SyntaxResult<Block<'arena>> {
        let open = self.expect(TokenKind::LBrace, "expected '{'")?;
        let mut stmts = self.vec()?;

        loop {
            if self.check(TokenKind::RBrace)? {
                let close = self.next()?;
                return Ok(Block {
                    stmts,
                    span: Span::combine(open.span, close.span),
                });
            }
            stmts.push(self.parse_statement()?)?;
        }
    }

    // ===== Declarations =====

    /// Parses a function declaration.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error.
    pub fn parse_function(&mut self) -> SyntaxResult<Function<'arena>> {
        let name = self.expect(TokenKind::Ident, "expected function name")?;
        self.expect(TokenKind::LParen, "expected '('")?;

        let mut params: ArenaVec<'arena, Param> = self.vec()?;
        while !self.check(TokenKind::RParen)? {
            let param_name = self.expect(TokenKind::Ident, "expected param name")?;
            self.expect(TokenKind::Colon, "expected ':'")?;
            let ty = self.parse_type()?;

            let param = params.alloc_slot()?;
            param.name = param_name.span;
            param.ty = ty;

            if self.check(TokenKind::Comma)? {
                self.next()?;
            }
        }
        self.next()?; // ')'

        // The header may end a line before its `{`.
        self.skip_terminators()?;
        let ret_type = if self.check(TokenKind::LBrace)? {
            Type::Void
        } else {
            let ty = self.parse_type()?;
            self.skip_terminators()?;
            ty
        };

        let body = self.parse_block()?;
        let span = Span::combine(name.span, body.span);

        debug!(
            "parsed function '{}' ({} params, {} statements)",
            name.span.text(self.source),
            params.len(),
            body.stmts.len()
        );

        Ok(Function {
            name: name.span,
            params,
            ret_type,
            body,
            span,
        })
    }

    /// Parses functions until the end of input.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error.
    pub fn parse_unit(mut self) -> SyntaxResult<Ast<'arena>> {
        let mut functions = self.vec()?;
        while !self.check(TokenKind::Eof)? {
            functions.push(self.parse_function()?)?;
        }
        Ok(Ast::new(self.pool, self.source, functions))
    }
}

//! Lexical analysis (tokenization) for the tern language.
//!
//! The lexer turns source text into [`Token`]s on demand. The parser pulls
//! tokens through the [`TokenStream`] trait, which both the lazy [`Lexer`]
//! and the pre-lexed [`TokenBuffer`] implement.
//!
//! Lexical elements:
//!
//! - Keywords `let`, `mut`, `return` and the built-in type names
//! - Identifiers `[A-Za-z_][A-Za-z0-9_]*`
//! - Decimal integer literals with an optional width suffix (`7u8`)
//! - Operators, delimiters and `//` line comments
//!
//! # Statement terminators
//!
//! `;` is always a terminator. A newline is a terminator only when the token
//! before it can end a statement (see [`TokenKind::ends_statement`]) and it
//! is not nested inside parentheses; every other newline is whitespace. End
//! of input after such a token also terminates the statement.
//!
//! # Examples
//!
//! ```
//! use tern_syntax::lexer::Lexer;
//! use tern_syntax::token::TokenKind;
//!
//! let tokens = Lexer::new("let x = 42\n").lex().unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//!
//! assert_eq!(kinds.len(), 6); // let, x, =, 42, terminator, EOF
//! assert_eq!(kinds[4], TokenKind::Terminator);
//! ```

use crate::error::{SyntaxError, SyntaxResult};
use crate::span::Span;
use crate::token::{IntLitKind, Token, TokenKind};
use std::iter::Peekable;
use std::str::Chars;

/// A source of tokens for the parser.
///
/// Once the end of input is reached, every further call yields
/// [`TokenKind::Eof`].
pub trait TokenStream {
    /// Consumes and returns the next token.
    ///
    /// # Errors
    ///
    /// Returns a source error for malformed input.
    fn next_token(&mut self) -> SyntaxResult<Token>;

    /// Returns the next token without consuming it.
    ///
    /// # Errors
    ///
    /// Returns a source error for malformed input.
    fn peek_token(&mut self) -> SyntaxResult<Token>;
}

/// Lexical analyzer for tern source code.
///
/// Tokens are produced lazily, one per [`TokenStream::next_token`] call.
///
/// # Fields
///
/// * `input` - The source code being tokenized
/// * `chars` - Iterator over characters with lookahead capability
/// * `position` - Current byte offset in the source
/// * `last` - Kind of the previously scanned token
/// * `paren_depth` - Number of unclosed `(`
/// * `peeked` - Token scanned ahead by `peek_token`
pub struct Lexer<'input> {
    input: &'input str,
    chars: Peekable<Chars<'input>>,
    position: usize,
    last: Option<TokenKind>,
    paren_depth: usize,
    peeked: Option<Token>,
}

impl<'input> Lexer<'input> {
    /// Creates a new lexer for the given source code.
    ///
    /// # Examples
    ///
    /// ```
    /// use tern_syntax::lexer::Lexer;
    ///
    /// let lexer = Lexer::new("main() { }");
    /// assert_eq!(lexer.source(), "main() { }");
    /// ```
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
            last: None,
            paren_depth: 0,
            peeked: None,
        }
    }

    /// The source being tokenized.
    #[must_use]
    pub const fn source(&self) -> &'input str {
        self.input
    }

    /// Tokenizes the entire input, ending with a [`TokenKind::Eof`] token.
    ///
    /// # Errors
    ///
    /// Returns the first source error encountered.
    pub fn lex(mut self) -> SyntaxResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                return Ok(tokens);
            }
        }
    }

    /// Peeks at the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consumes and returns the next character.
    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    fn newline_terminates(&self) -> bool {
        self.paren_depth == 0 && self.last.is_some_and(|kind| kind.ends_statement())
    }

    /// Skips whitespace and comments.
    ///
    /// Returns the span of a newline that terminates a statement, if one was
    /// reached.
    fn skip_trivia(&mut self) -> Option<Span> {
        while let Some(ch) = self.peek() {
            match ch {
                '\n' => {
                    if self.newline_terminates() {
                        let span = Span::new(self.position, 1);
                        self.bump();
                        return Some(span);
                    }
                    self.bump();
                }
                '/' if self.input[self.position..].starts_with("//") => {
                    self.bump_while(|ch| ch != '\n');
                }
                ch if ch.is_whitespace() => {
                    self.bump();
                }
                _ => break,
            }
        }
        None
    }

    /// Reads the next token from the source.
    fn scan(&mut self) -> SyntaxResult<Token> {
        if let Some(span) = self.skip_trivia() {
            return Ok(self.finish(TokenKind::Terminator, span));
        }

        let start = self.position;
        let Some(ch) = self.bump() else {
            let kind = if self.newline_terminates() {
                TokenKind::Terminator
            } else {
                TokenKind::Eof
            };
            return Ok(self.finish(kind, Span::point(start)));
        };

        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => self.read_identifier(start),
            '0'..='9' => self.read_number(start)?,

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => self.with_eq(TokenKind::EqEq, TokenKind::Eq),
            '<' => self.with_eq(TokenKind::LtEq, TokenKind::Lt),
            '>' => self.with_eq(TokenKind::GtEq, TokenKind::Gt),
            '!' if self.peek() == Some('=') => {
                self.bump();
                TokenKind::BangEq
            }

            '(' => {
                self.paren_depth += 1;
                TokenKind::LParen
            }
            ')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                TokenKind::RParen
            }
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Terminator,

            _ => {
                return Err(SyntaxError::source(
                    format!("unexpected character '{ch}'"),
                    Span::new(start, ch.len_utf8()),
                ));
            }
        };

        Ok(self.finish(kind, Span::new(start, self.position - start)))
    }

    fn finish(&mut self, kind: TokenKind, span: Span) -> Token {
        self.last = Some(kind);
        Token::new(kind, span)
    }

    /// Consumes a trailing `=` if present.
    fn with_eq(&mut self, with: TokenKind, without: TokenKind) -> TokenKind {
        if self.peek() == Some('=') {
            self.bump();
            with
        } else {
            without
        }
    }

    /// Reads an identifier or keyword whose first character is consumed.
    fn read_identifier(&mut self, start: usize) -> TokenKind {
        self.bump_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');
        TokenKind::keyword(&self.input[start..self.position]).unwrap_or(TokenKind::Ident)
    }

    /// Reads an integer literal whose first digit is consumed.
    fn read_number(&mut self, start: usize) -> SyntaxResult<TokenKind> {
        self.bump_while(|ch| ch.is_ascii_digit());
        let digits_end = self.position;
        self.bump_while(|ch| ch.is_ascii_alphanumeric() || ch == '_');

        let suffix = &self.input[digits_end..self.position];
        IntLitKind::from_suffix(suffix)
            .map(TokenKind::IntLiteral)
            .ok_or_else(|| {
                SyntaxError::source(
                    "invalid integer suffix",
                    Span::new(start, self.position - start),
                )
            })
    }
}

impl TokenStream for Lexer<'_> {
    fn next_token(&mut self) -> SyntaxResult<Token> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.scan(),
        }
    }

    fn peek_token(&mut self) -> SyntaxResult<Token> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.scan()?;
        self.peeked = Some(token);
        Ok(token)
    }
}

/// A pre-lexed token sequence.
///
/// Useful when the same tokens are parsed more than once, or when tokens
/// come from somewhere other than [`Lexer`].
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenBuffer {
    /// Wraps `tokens`, appending an [`TokenKind::Eof`] if missing.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|token| token.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |token| token.span.end());
            tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Lexes all of `source` up front.
    ///
    /// # Errors
    ///
    /// Returns the first source error encountered.
    pub fn lex(source: &str) -> SyntaxResult<Self> {
        Lexer::new(source).lex().map(Self::new)
    }

    /// All tokens, including the trailing EOF.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Rewinds to the first token.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    fn current(&self) -> Token {
        // `new` guarantees a trailing EOF, and `position` never passes it.
        self.tokens[self.position.min(self.tokens.len() - 1)]
    }
}

impl TokenStream for TokenBuffer {
    fn next_token(&mut self) -> SyntaxResult<Token> {
        let token = self.current();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        Ok(token)
    }

    fn peek_token(&mut self) -> SyntaxResult<Token> {
        Ok(self.current())
    }
}

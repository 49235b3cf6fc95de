//! Token types and lexical tokens for the tern language.
//!
//! Tokens carry no text of their own. Identifiers and literals are recovered
//! by slicing the source buffer with the token's [`Span`].
//!
//! # Examples
//!
//! ```
//! use tern_syntax::span::Span;
//! use tern_syntax::token::{IntLitKind, Token, TokenKind};
//!
//! // `42u8`
//! let token = Token::new(TokenKind::IntLiteral(IntLitKind::U8), Span::new(0, 4));
//! assert!(token.kind.ends_statement());
//! ```

use crate::ast::Type;
use crate::span::{Span, Spanned};
use std::fmt;

/// Width and signedness carried by an integer literal's suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum IntLitKind {
    /// No suffix; the literal defaults to `i64`
    #[default]
    Unsuffixed,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
}

impl IntLitKind {
    /// Parses a literal suffix such as `"u16"`.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        let kind = match suffix {
            "" => Self::Unsuffixed,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            _ => return None,
        };
        Some(kind)
    }

    /// Length of the suffix in bytes, stripped before the digits are folded.
    #[must_use]
    pub const fn suffix_len(self) -> usize {
        match self {
            Self::Unsuffixed => 0,
            Self::U8 | Self::I8 => 2,
            Self::U16 | Self::U32 | Self::U64 | Self::I16 | Self::I32 | Self::I64 => 3,
        }
    }

    /// The type a literal of this kind has.
    #[must_use]
    pub const fn ty(self) -> Type {
        match self {
            Self::U8 => Type::U8,
            Self::U16 => Type::U16,
            Self::U32 => Type::U32,
            Self::U64 => Type::U64,
            Self::I8 => Type::I8,
            Self::I16 => Type::I16,
            Self::I32 => Type::I32,
            Self::Unsuffixed | Self::I64 => Type::I64,
        }
    }
}

/// Represents the kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ===== Keywords =====
    /// Variable declaration (immutable)
    Let,

    /// Variable declaration (mutable)
    Mut,

    /// Return statement
    Return,

    /// Built-in type name: `u8` through `i64`, `bool`
    TypeName(Type),

    // ===== Literals =====
    /// Identifier; the name is the token's source text
    Ident,

    /// Decimal integer literal with optional width suffix
    ///
    /// Examples: `42`, `7u8`, `100i32`
    IntLiteral(IntLitKind),

    // ===== Operators =====
    /// Addition: `+`
    Plus,

    /// Subtraction: `-`
    Minus,

    /// Multiplication: `*`
    Star,

    /// Division: `/`
    Slash,

    /// Equality comparison: `==`
    EqEq,

    /// Inequality comparison: `!=`
    BangEq,

    /// Less than: `<`
    Lt,

    /// Greater than: `>`
    Gt,

    /// Less than or equal: `<=`
    LtEq,

    /// Greater than or equal: `>=`
    GtEq,

    /// Assignment in declarations: `=`
    Eq,

    // ===== Delimiters =====
    /// `(`
    LParen,

    /// `)`
    RParen,

    /// `{`
    LBrace,

    /// `}`
    RBrace,

    /// `:`
    Colon,

    /// `,`
    Comma,

    // ===== Special =====
    /// Statement terminator: `;` or a significant newline
    Terminator,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is a keyword, including type names.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Let | Self::Mut | Self::Return | Self::TypeName(_)
        )
    }

    /// Returns `true` if this token is a binary operator.
    #[must_use]
    pub const fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            Self::Plus
                | Self::Minus
                | Self::Star
                | Self::Slash
                | Self::EqEq
                | Self::BangEq
                | Self::Lt
                | Self::Gt
                | Self::LtEq
                | Self::GtEq
        )
    }

    /// Returns `true` if a newline directly after this token terminates a
    /// statement.
    #[must_use]
    pub const fn ends_statement(&self) -> bool {
        matches!(
            self,
            Self::Ident | Self::IntLiteral(_) | Self::RParen | Self::Return | Self::TypeName(_)
        )
    }

    /// Looks up a keyword by its text.
    #[must_use]
    pub fn keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "let" => Self::Let,
            "mut" => Self::Mut,
            "return" => Self::Return,
            "u8" => Self::TypeName(Type::U8),
            "u16" => Self::TypeName(Type::U16),
            "u32" => Self::TypeName(Type::U32),
            "u64" => Self::TypeName(Type::U64),
            "i8" => Self::TypeName(Type::I8),
            "i16" => Self::TypeName(Type::I16),
            "i32" => Self::TypeName(Type::I32),
            "i64" => Self::TypeName(Type::I64),
            "bool" => Self::TypeName(Type::Bool),
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Keywords
            Self::Let => write!(f, "let"),
            Self::Mut => write!(f, "mut"),
            Self::Return => write!(f, "return"),
            Self::TypeName(ty) => write!(f, "{ty}"),

            // Literals
            Self::Ident => write!(f, "identifier"),
            Self::IntLiteral(_) => write!(f, "integer literal"),

            // Operators
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::EqEq => write!(f, "=="),
            Self::BangEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Gt => write!(f, ">"),
            Self::LtEq => write!(f, "<="),
            Self::GtEq => write!(f, ">="),
            Self::Eq => write!(f, "="),

            // Delimiters
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Colon => write!(f, ":"),
            Self::Comma => write!(f, ","),

            // Special
            Self::Terminator => write!(f, "newline or ';'"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A lexical token combining a token kind with its source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,

    /// The source location of the token
    pub span: Span,
}

impl Token {
    /// Creates a new token from a kind and span.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` if this token has kind `kind`.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_lit_suffix_len() {
        assert_eq!(IntLitKind::Unsuffixed.suffix_len(), 0);
        assert_eq!(IntLitKind::U8.suffix_len(), 2);
        assert_eq!(IntLitKind::I8.suffix_len(), 2);
        assert_eq!(IntLitKind::U16.suffix_len(), 3);
        assert_eq!(IntLitKind::I64.suffix_len(), 3);
    }

    #[test]
    fn test_int_lit_from_suffix() {
        assert_eq!(IntLitKind::from_suffix(""), Some(IntLitKind::Unsuffixed));
        assert_eq!(IntLitKind::from_suffix("u32"), Some(IntLitKind::U32));
        assert_eq!(IntLitKind::from_suffix("i8"), Some(IntLitKind::I8));
        assert_eq!(IntLitKind::from_suffix("u128"), None);
        assert_eq!(IntLitKind::from_suffix("abc"), None);
    }

    #[test]
    fn test_int_lit_type() {
        assert_eq!(IntLitKind::Unsuffixed.ty(), Type::I64);
        assert_eq!(IntLitKind::U8.ty(), Type::U8);
        assert_eq!(IntLitKind::I32.ty(), Type::I32);
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("let"), Some(TokenKind::Let));
        assert_eq!(TokenKind::keyword("mut"), Some(TokenKind::Mut));
        assert_eq!(TokenKind::keyword("bool"), Some(TokenKind::TypeName(Type::Bool)));
        assert_eq!(TokenKind::keyword("u64"), Some(TokenKind::TypeName(Type::U64)));
        assert_eq!(TokenKind::keyword("void"), None);
        assert_eq!(TokenKind::keyword("main"), None);
    }

    #[test]
    fn test_token_kind_classes() {
        assert!(TokenKind::Let.is_keyword());
        assert!(TokenKind::TypeName(Type::I8).is_keyword());
        assert!(!TokenKind::Ident.is_keyword());

        assert!(TokenKind::Star.is_binary_operator());
        assert!(TokenKind::GtEq.is_binary_operator());
        assert!(!TokenKind::Eq.is_binary_operator());
    }

    #[test]
    fn test_ends_statement() {
        assert!(TokenKind::Ident.ends_statement());
        assert!(TokenKind::IntLiteral(IntLitKind::Unsuffixed).ends_statement());
        assert!(TokenKind::RParen.ends_statement());
        assert!(TokenKind::Return.ends_statement());
        assert!(!TokenKind::LBrace.ends_statement());
        assert!(!TokenKind::Plus.ends_statement());
        assert!(!TokenKind::Comma.ends_statement());
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(format!("{}", TokenKind::Let), "let");
        assert_eq!(format!("{}", TokenKind::Plus), "+");
        assert_eq!(format!("{}", TokenKind::LBrace), "{");
        assert_eq!(format!("{}", TokenKind::TypeName(Type::U16)), "u16");
        assert_eq!(format!("{}", TokenKind::Terminator), "newline or ';'");
    }

    #[test]
    fn test_token_new() {
        let span = Span::new(0, 3);
        let token = Token::new(TokenKind::Let, span);

        assert!(token.is(TokenKind::Let));
        assert_eq!(token.span(), span);
    }
}

//! Source location tracking for tokens and AST nodes.
//!
//! Every token and AST node carries a [`Span`]: a byte offset into the
//! source buffer plus a length. Line and column numbers are not stored; they
//! are recovered from the source on demand when a diagnostic is rendered.
//!
//! # Examples
//!
//! ```
//! use tern_syntax::span::Span;
//!
//! // `1` and `3` in "1 + 3"
//! let left = Span::new(0, 1);
//! let right = Span::new(4, 1);
//! let whole = Span::combine(left, right);
//!
//! assert_eq!(whole.start, 0);
//! assert_eq!(whole.len, 5);
//! ```

use std::fmt;

/// A contiguous slice of the source buffer.
///
/// `[start, start + len)` always lies inside the buffer the span was
/// produced from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first byte (0-indexed)
    pub start: usize,

    /// Length in bytes
    pub len: usize,
}

impl Span {
    /// Creates a span from a start offset and a length.
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Creates a zero-length span at `offset`.
    ///
    /// Used for end of input.
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            len: 0,
        }
    }

    /// Byte offset one past the last byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns `true` if the span has zero length.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Combines two spans into the smallest span covering both.
    ///
    /// `right` must start at or after `left` in the same buffer. The result
    /// starts at `left.start` and ends at the later of the two ends, so a
    /// `right` nested inside `left` yields `left`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tern_syntax::span::Span;
    ///
    /// let combined = Span::combine(Span::new(2, 3), Span::new(10, 4));
    /// assert_eq!(combined, Span::new(2, 12));
    /// ```
    #[must_use]
    pub const fn combine(left: Span, right: Span) -> Self {
        let end = if right.end() > left.end() {
            right.end()
        } else {
            left.end()
        };
        Self {
            start: left.start,
            len: end - left.start,
        }
    }

    /// Returns `true` if `other` lies entirely inside this span.
    #[must_use]
    pub const fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Slices the covered text out of `source`.
    ///
    /// Returns an empty string if the span does not fit the buffer.
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.start..self.end()).unwrap_or("")
    }

    /// Computes the 1-indexed line and byte column of the span start.
    ///
    /// # Examples
    ///
    /// ```
    /// use tern_syntax::span::{LineCol, Span};
    ///
    /// let source = "main() {\n  return x\n}";
    /// assert_eq!(Span::new(18, 1).line_col(source), LineCol::new(2, 10));
    /// ```
    #[must_use]
    pub fn line_col(&self, source: &str) -> LineCol {
        let bytes = source.as_bytes();
        let offset = self.start.min(bytes.len());
        let before = &bytes[..offset];

        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |newline| newline + 1);

        LineCol::new(line, offset - line_start + 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A line and column position in source code.
///
/// # Fields
///
/// - `line`: Line number (1-indexed)
/// - `col`: Column number in bytes (1-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineCol {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number in bytes (1-indexed)
    pub col: usize,
}

impl LineCol {
    /// Creates a new line/column position.
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Trait for types that have a source span.
///
/// Implemented by tokens and every AST node.
///
/// # Examples
///
/// ```
/// use tern_syntax::span::{Span, Spanned};
///
/// struct MyNode {
///     span: Span,
/// }
///
/// impl Spanned for MyNode {
///     fn span(&self) -> Span {
///         self.span
///     }
/// }
/// ```
pub trait Spanned {
    /// Returns the source span of this item.
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl<T: Spanned + ?Sized> Spanned for &T {
    fn span(&self) -> Span {
        (**self).span()
    }
}

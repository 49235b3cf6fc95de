//! Error types for the lexer and parser.
//!
//! There are exactly two kinds of failure:
//!
//! - [`SyntaxError::Source`]: the input is malformed. Carries the span of the
//!   offending text so the line can be underlined.
//! - [`SyntaxError::Internal`]: an invariant inside the compiler broke, such
//!   as the memory pool running out. Carries the file and line of the check
//!   that failed.
//!
//! Neither kind is ever turned into the other.

use crate::span::Span;
use std::panic::Location;
use tern_mem::MemError;
use thiserror::Error;

/// Errors produced while lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// Malformed input.
    ///
    /// # Examples
    ///
    /// ```text
    /// error: expected ')'
    ///  | main( { }
    ///  | ^^^^^^^^^
    /// ```
    #[error("{message}")]
    Source {
        /// Human-readable description
        message: String,

        /// Location in source
        span: Span,
    },

    /// A violated implementation invariant.
    #[error("internal error: {file}:{line}: {message}")]
    Internal {
        /// Human-readable description
        message: String,

        /// Source file of the failed check
        file: &'static str,

        /// Line of the failed check
        line: u32,
    },
}

impl SyntaxError {
    /// Creates a source error over `span`.
    #[must_use]
    pub fn source(message: impl Into<String>, span: Span) -> Self {
        Self::Source {
            message: message.into(),
            span,
        }
    }

    /// Creates an internal error located at the caller.
    #[must_use]
    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        let location = Location::caller();
        Self::Internal {
            message: message.into(),
            file: location.file(),
            line: location.line(),
        }
    }

    /// Returns the source span for source errors.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        match self {
            Self::Source { span, .. } => Some(*span),
            Self::Internal { .. } => None,
        }
    }

    /// Returns the message without location decoration.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Source { message, .. } | Self::Internal { message, .. } => message,
        }
    }

    /// Returns `true` for malformed-input errors.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        matches!(self, Self::Source { .. })
    }
}

impl From<MemError> for SyntaxError {
    #[track_caller]
    fn from(err: MemError) -> Self {
        Self::internal(err.to_string())
    }
}

/// Result type for lexing and parsing.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        let err = SyntaxError::source("expected expression", Span::new(4, 1));
        assert_eq!(err.to_string(), "expected expression");
        assert_eq!(err.span(), Some(Span::new(4, 1)));
        assert!(err.is_source());
    }

    #[test]
    fn test_internal_error_location() {
        let err = SyntaxError::internal("impossible binary op token");
        let SyntaxError::Internal { file, line, .. } = &err else {
            panic!("expected internal error, got {err:?}");
        };

        assert!(file.ends_with("error.rs"));
        assert!(*line > 0);
        assert_eq!(err.span(), None);
        assert_eq!(err.message(), "impossible binary op token");
        assert!(err.to_string().starts_with("internal error: "));
        assert!(err.to_string().ends_with(": impossible binary op token"));
    }

    #[test]
    fn test_mem_error_becomes_internal() {
        fn fails() -> SyntaxResult<()> {
            Err(MemError::CapacityOverflow)?
        }

        let err = fails().unwrap_err();
        assert!(!err.is_source());
        assert_eq!(err.message(), "array capacity overflow");
    }
}

//! Error types for pool allocation.

use thiserror::Error;

/// Errors produced by [`MemPool`](crate::MemPool) and
/// [`ArenaVec`](crate::ArenaVec).
///
/// None of these are caused by user input: they signal either a bad pool
/// configuration or resource exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemError {
    /// The pool configuration violates a sizing rule.
    #[error("invalid pool configuration: {reason}")]
    InvalidConfig {
        /// Which rule was violated
        reason: &'static str,
    },

    /// The system allocator refused to back a new commit.
    #[error("unable to commit {size} bytes in memory pool")]
    CommitFailed {
        /// Bytes that were being committed
        size: usize,
    },

    /// Committing enough memory would cross the reservation ceiling.
    #[error(
        "out of memory in pool: requested {requested} bytes with {committed} of {reservation} bytes committed"
    )]
    Exhausted {
        /// Bytes requested by the failing allocation
        requested: usize,
        /// Bytes committed at the time of the request
        committed: usize,
        /// The reservation ceiling
        reservation: usize,
    },

    /// An array capacity computation overflowed `usize`.
    #[error("array capacity overflow")]
    CapacityOverflow,
}

/// Result type for pool operations.
pub type MemResult<T> = Result<T, MemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MemError::Exhausted {
            requested: 100,
            committed: 4096,
            reservation: 8192,
        };
        assert_eq!(
            err.to_string(),
            "out of memory in pool: requested 100 bytes with 4096 of 8192 bytes committed"
        );
        assert_eq!(
            MemError::CommitFailed { size: 4096 }.to_string(),
            "unable to commit 4096 bytes in memory pool"
        );
        assert_eq!(
            MemError::InvalidConfig { reason: "chunk size must be non-zero" }.to_string(),
            "invalid pool configuration: chunk size must be non-zero"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(MemError::CapacityOverflow, MemError::CapacityOverflow);
        assert_ne!(
            MemError::CommitFailed { size: 1 },
            MemError::CommitFailed { size: 2 }
        );
    }
}

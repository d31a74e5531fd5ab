//! Error types for chain operations.

use crate::segment::SegmentKind;
use thiserror::Error;

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Errors that can occur during chain operations.
///
/// These are programming-contract violations, not transient faults.
/// There are no retries and no partial-failure recovery; errors
/// propagate immediately to the caller.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Structural access on the null chain sentinel.
    #[error("invalid access on NullChain: {message}")]
    InvalidOperation {
        /// Description of the rejected access.
        message: String,
    },

    /// Index-based access or mutation outside the valid range.
    #[error("index out of bounds: index {index}, len {len}")]
    OutOfBounds {
        /// The requested index.
        index: usize,
        /// The chain length at the time of access.
        len: usize,
    },

    /// An append would violate the singleton-only placement rule.
    #[error("singleton-only message of kind {kind:?} cannot follow another message")]
    ConstraintViolation {
        /// The kind of the rejected segment.
        kind: SegmentKind,
    },

    /// Typed lookup found no matching segment.
    #[error("no segment of kind {kind:?} in chain")]
    NotFound {
        /// The kind that was searched for.
        kind: SegmentKind,
    },
}

impl ChainError {
    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates an out of bounds error.
    #[must_use]
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::OutOfBounds { index, len }
    }

    /// Creates a constraint violation error.
    #[must_use]
    pub fn constraint_violation(kind: SegmentKind) -> Self {
        Self::ConstraintViolation { kind }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(kind: SegmentKind) -> Self {
        Self::NotFound { kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_operation_names_the_sentinel() {
        let err = ChainError::invalid_operation("get");
        assert!(err.to_string().contains("NullChain"));
    }

    #[test]
    fn out_of_bounds_reports_index_and_len() {
        let err = ChainError::out_of_bounds(7, 3);
        assert_eq!(err.to_string(), "index out of bounds: index 7, len 3");
    }

    #[test]
    fn constraint_violation_mentions_the_rule() {
        let err = ChainError::constraint_violation(SegmentKind::Source);
        assert!(err.to_string().contains("cannot follow another message"));
    }
}

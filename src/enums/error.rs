//! # Error Module - Custom *Slabcache* Error Type
//!
//! Defines the unified error type for the hyperslab cache.
//!
//! ## Features
//! - Covers dimensionality and element type mismatches, count inconsistencies
//! between the source and the enumerated hyperslab, out-of-range index tuples,
//! invalid constraints and misuse of the cache before it is configured.
//! - Implements `Display` for readable output and `Error` for integration
//! with standard Rust error handling.
//!
//! All variants are fail-fast: nothing in the crate retries or swallows them.

use std::error::Error;
use std::fmt;

/// Catch all error type for `slabcache`
#[derive(Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Rank of injected data or an index tuple differs from the cache's rank.
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
    /// Injected values are not of the cache's element type.
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A source pull or hyperslab enumeration yielded an unexpected count.
    ConsistencyError {
        expected: usize,
        found: usize,
        message: Option<String>,
    },
    /// A validated index lookup fell outside the unconstrained space.
    OutOfRange {
        index: usize,
        bound: usize,
        message: Option<String>,
    },
    /// The operation was called in a state that does not support it.
    PreconditionViolation {
        message: String,
    },
    /// A requested (start, stride, stop) does not fit its dimension.
    InvalidConstraint {
        dim: usize,
        start: usize,
        stride: usize,
        stop: usize,
        size: usize,
    },
    /// A literal value token could not be parsed as the target element kind.
    ParseError {
        token: String,
        kind: &'static str,
    },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::DimensionMismatch { expected, found } => {
                write!(
                    f,
                    "Dimension mismatch: expected {} dimensions, found {}.",
                    expected, found
                )
            }
            CacheError::TypeMismatch { expected, found } => {
                write!(
                    f,
                    "Type mismatch: values of type '{}' cannot be stored in an array of '{}'.",
                    found, expected
                )
            }
            CacheError::ConsistencyError { expected, found, message } => {
                if let Some(msg) = message {
                    write!(f, "Consistency error: expected {} values, got {}: {}", expected, found, msg)
                } else {
                    write!(f, "Consistency error: expected {} values, got {}.", expected, found)
                }
            }
            CacheError::OutOfRange { index, bound, message } => {
                if let Some(msg) = message {
                    write!(f, "Out of range: {} is not below {}: {}", index, bound, msg)
                } else {
                    write!(f, "Out of range: {} is not below {}.", index, bound)
                }
            }
            CacheError::PreconditionViolation { message } => {
                write!(f, "Precondition violation: {}", message)
            }
            CacheError::InvalidConstraint { dim, start, stride, stop, size } => {
                write!(
                    f,
                    "Invalid constraint on dimension {}: [{}:{}:{}] does not fit size {}.",
                    dim, start, stride, stop, size
                )
            }
            CacheError::ParseError { token, kind } => {
                write!(f, "Parse error: '{}' is not a valid {} value.", token, kind)
            }
        }
    }
}

impl Error for CacheError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_consistency_with_message() {
        let err = CacheError::ConsistencyError {
            expected: 12,
            found: 2,
            message: Some("source pull".into()),
        };
        assert_eq!(
            err.to_string(),
            "Consistency error: expected 12 values, got 2: source pull"
        );
    }

    #[test]
    fn test_display_type_mismatch() {
        let err = CacheError::TypeMismatch { expected: "Int32", found: "Float64" };
        assert!(err.to_string().contains("'Float64'"));
        assert!(err.to_string().contains("'Int32'"));
    }
}

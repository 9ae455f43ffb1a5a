//! Error types shared by dense and sparse arrays
//!
//! Every failure in ndspace is synchronous and reported to the caller; nothing
//! is retried and no operation leaves partial state behind.
//!
//! # Design
//!
//! - **`InvalidArgument`**: malformed coordinates, bad vector/element on `put`,
//!   backward cursor movement, too many index expressions, invalid shapes
//! - **`IndexOutOfRange`**: a coordinate component outside `[0, size)`
//! - **`ReadOnly`**: writes on populated sparse arrays and on windows
//!
//! # Examples
//!
//! ```
//! use ndspace_core::error::{NdError, NdResult};
//!
//! fn check(index: usize, size: usize) -> NdResult<()> {
//!     if index >= size {
//!         return Err(NdError::IndexOutOfRange { dim: 0, index, size });
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 4).is_ok());
//! assert!(matches!(check(4, 4), Err(NdError::IndexOutOfRange { .. })));
//! ```

use thiserror::Error;

/// Top-level error type for array addressing, storage and hydration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NdError {
    /// An argument does not satisfy the contract of the operation
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A coordinate component lies outside its dimension
    #[error("Index {index} out of range for dimension {dim} of size {size}")]
    IndexOutOfRange { dim: usize, index: usize, size: usize },

    /// A write was attempted on a read-only array or view
    #[error("Read-only: {reason}")]
    ReadOnly { reason: String },
}

/// Result type alias for ndspace operations
pub type NdResult<T> = Result<T, NdError>;

// Convenience constructors for common error patterns
impl NdError {
    /// Create an invalid argument error with a message
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        NdError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a read-only error with a message
    pub fn read_only(reason: impl Into<String>) -> Self {
        NdError::ReadOnly {
            reason: reason.into(),
        }
    }

    /// Create an error for a coordinate tuple of the wrong length
    pub fn rank_mismatch(expected: usize, got: usize) -> Self {
        NdError::invalid_argument(format!(
            "expected {} coordinates, got {}",
            expected, got
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = NdError::IndexOutOfRange {
            dim: 1,
            index: 5,
            size: 4,
        };
        assert_eq!(
            err.to_string(),
            "Index 5 out of range for dimension 1 of size 4"
        );
    }

    #[test]
    fn test_convenience_constructors() {
        assert!(matches!(
            NdError::read_only("window"),
            NdError::ReadOnly { .. }
        ));
        assert_eq!(
            NdError::rank_mismatch(2, 3).to_string(),
            "Invalid argument: expected 2 coordinates, got 3"
        );
    }
}

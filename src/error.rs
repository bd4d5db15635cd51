//! Error types for configuration and batch operations.
//!
//! Distance evaluation itself never fails: absent inputs propagate as `None`
//! and degenerate lengths have defined values. Errors only arise from
//! caller-supplied shapes and parameters.

use thiserror::Error;

/// Errors returned by constructors and the pairwise engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Output matrix shape does not match the input collections
    #[error("Dimension mismatch: expected a {}x{} matrix, got {}x{}", expected.0, expected.1, actual.0, actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// A parameter is outside its valid range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch {
            expected: (3, 4),
            actual: (3, 5),
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected a 3x4 matrix, got 3x5"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = Error::InvalidParameter {
            name: "q",
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'q': must be at least 1");
    }
}

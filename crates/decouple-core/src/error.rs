//! Error types for U-statistic decoupling
//!
//! Provides a unified error type for all decouple-stats crates.

use thiserror::Error;

/// Core error type for decoupling operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: sample size must be at least {expected}, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Two observations are not structurally comparable
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Null distribution has zero spread; significance is undefined
    #[error("Degenerate null distribution: {0}")]
    DegenerateDistribution(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Feature not available
    #[error("Feature not available: {0}")]
    FeatureNotAvailable(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a sample that is too small for pairwise work
    pub fn insufficient_pairs(actual: usize) -> Self {
        Self::InsufficientData {
            expected: 2,
            actual,
        }
    }

    /// Create an error for paired observations of unequal length
    pub fn unequal_lengths(left: usize, right: usize) -> Self {
        Self::ShapeMismatch(format!(
            "paired observations must be of equal length, got {left} and {right}"
        ))
    }

    /// Create an error for size mismatch between two samples
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::Computation(format!("{context} is NaN or infinite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidParameter("resamples must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid parameter: resamples must be positive"
        );

        let err = Error::InsufficientData {
            expected: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient data: sample size must be at least 2, got 1"
        );

        let err = Error::DegenerateDistribution("null sd is zero".to_string());
        assert_eq!(
            err.to_string(),
            "Degenerate null distribution: null sd is zero"
        );

        let err = Error::Execution("thread pool exhausted".to_string());
        assert_eq!(err.to_string(), "Execution error: thread pool exhausted");
    }

    #[test]
    fn test_error_helper_functions() {
        let err = Error::insufficient_pairs(1);
        match err {
            Error::InsufficientData { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            _ => panic!("Wrong error type"),
        }

        let err = Error::unequal_lengths(3, 5);
        assert_eq!(
            err.to_string(),
            "Shape mismatch: paired observations must be of equal length, got 3 and 5"
        );

        let err = Error::size_mismatch(10, 7, "independent copy");
        assert_eq!(
            err.to_string(),
            "Invalid input: Size mismatch in independent copy: expected 10, got 7"
        );

        let err = Error::non_finite("kernel value");
        assert_eq!(
            err.to_string(),
            "Computation error: kernel value is NaN or infinite"
        );
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("custom error message");
        let err: Error = anyhow_err.into();

        match err {
            Error::Other(_) => {
                assert!(err.to_string().contains("custom error message"));
            }
            _ => panic!("Wrong error type"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn test_function(succeed: bool) -> Result<i32> {
            if succeed {
                Ok(42)
            } else {
                Err(Error::Computation("test failure".to_string()))
            }
        }

        assert_eq!(test_function(true).unwrap(), 42);
        assert!(test_function(false).is_err());
    }
}

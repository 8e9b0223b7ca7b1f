//! Error type shared by the GA operators and the evolution driver.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;

/// Errors raised by configuration validation and operator input checks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GaError {
    /// A run parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An operator received an argument it cannot act on
    /// (out-of-range point, mismatched lengths, non-binary gene).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GaError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        GaError::InvalidConfiguration(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        GaError::InvalidInput(msg.into())
    }
}

//! Error types for the validation library.
//!
//! Conformance findings are carried by [`ConformanceViolation`]; everything else
//! in this module describes input the validator could not make sense of.

use crate::compliance::ConformanceViolation;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or validating a structure tree.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document violates a PDF/UA rule
    #[error("PDF/UA conformance violation: {0}")]
    Conformance(#[from] ConformanceViolation),

    /// The structure tree handed to the validator is malformed
    #[error("Invalid structure tree: {0}")]
    InvalidStructure(String),

    /// Invalid validator configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON decoding error (configuration files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Return the conformance violation if this error is one.
    pub fn as_violation(&self) -> Option<&ConformanceViolation> {
        match self {
            Error::Conformance(v) => Some(v),
            _ => None,
        }
    }
}

//! Error handling for the KDC crypto library
//!
//! This module provides error types and utilities for key wrapping,
//! key distribution and RSA signatures.

use thiserror::Error;

/// Type alias for Results with KDC crypto errors
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the KDC crypto library
///
/// Signature verification has no variant here: a mismatching signature is
/// reported as `false` by [`crate::crypto::verify`].
#[derive(Error, Debug)]
pub enum Error {
    /// Key does not have a size the cipher accepts
    #[error("Invalid key length: expected {expected}, got {actual} bytes")]
    InvalidKeyLength {
        /// Human readable description of the accepted sizes
        expected: String,
        /// Length of the key that was supplied
        actual: usize,
    },

    /// Asymmetric key generation failed or was asked for an unsafe size
    #[error("Key generation error: {0}")]
    KeyGeneration(String),

    /// Signing failed, usually because of malformed key material
    #[error("Signing error: {0}")]
    Signing(String),

    /// Key export or hex decoding failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Party is not registered with the key distribution center
    #[error("Unknown party: {0}")]
    UnknownParty(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error related to invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::Encoding(e.to_string())
    }
}

use thiserror::Error;

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum Error {
    /// Failure inside the crypto library
    #[error(transparent)]
    Crypto(#[from] kdc_crypto::Error),

    /// Report could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad command-line input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

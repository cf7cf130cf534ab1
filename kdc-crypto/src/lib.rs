//! Key distribution and signature toolkit
//!
//! This crate provides the pieces of two small cryptography demonstrations:
//! a key distribution center (KDC) that hands a session key to several
//! parties by wrapping it under each party's key encryption key, and RSA
//! signatures that prove a message came from the holder of a private key.
//!
//! All operations are synchronous and stateless apart from the KDC's
//! in-memory party registry. Randomness is always supplied by the caller.

/// Configuration
pub mod config;

/// Cryptographic primitives
pub mod crypto;

/// Error types
pub mod error;

/// Key distribution center simulation
pub mod kdc;

/// Symmetric key material
pub mod keys;

// Re-export key types for convenience
pub use config::CryptoConfig;
pub use crypto::{KeyPair, MessageDigest, Signature, WrappedKey};
pub use error::{Error, Result};
pub use kdc::{KeyDistributionCenter, Party, SessionKeyIssue};
pub use keys::{Iv, SymmetricKey};

/// Version of the KDC crypto library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! SHA-256 message digests
//!
//! Signer and verifier each compute the digest from the message bytes they
//! hold. A digest is never accepted in place of the message on the verifying
//! side.

use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 output length in bytes
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest of a message
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageDigest([u8; DIGEST_LEN]);

impl MessageDigest {
    /// Hash a message
    pub fn compute(message: &[u8]) -> Self {
        Self(Sha256::digest(message).into())
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for MessageDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageDigest({})", self.to_hex())
    }
}

impl fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

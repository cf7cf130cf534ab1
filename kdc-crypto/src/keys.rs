//! Symmetric key material
//!
//! [`SymmetricKey`] is used both for key encryption keys (KEKs) that a party
//! shares with the key distribution center and for the session keys the KDC
//! hands out. [`Iv`] is the initial counter block for the AES-CTR key wrap.

use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};
use std::fmt;
use zeroize::Zeroize;

/// AES-128 key length in bytes
pub const AES_128_KEY_LEN: usize = 16;

/// AES-192 key length in bytes
pub const AES_192_KEY_LEN: usize = 24;

/// AES-256 key length in bytes
pub const AES_256_KEY_LEN: usize = 32;

/// Key lengths accepted by the AES-CTR key wrap
pub const SUPPORTED_KEY_LENGTHS: [usize; 3] = [AES_128_KEY_LEN, AES_192_KEY_LEN, AES_256_KEY_LEN];

/// Length of the initial counter block (one AES block)
pub const IV_LEN: usize = 16;

/// Check that `len` is a key size the AES-CTR key wrap accepts
pub(crate) fn check_key_len(len: usize) -> Result<()> {
    if SUPPORTED_KEY_LENGTHS.contains(&len) {
        Ok(())
    } else {
        Err(invalid_key_length(len))
    }
}

pub(crate) fn invalid_key_length(actual: usize) -> Error {
    Error::InvalidKeyLength {
        expected: "16, 24 or 32 bytes".to_string(),
        actual,
    }
}

/// A fixed-length symmetric key
///
/// The bytes are wiped when the key is dropped and never show up in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    /// Generate a random key of `len` bytes
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyLength`] unless `len` is 16, 24 or 32.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Self> {
        check_key_len(len)?;
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        Ok(Self { bytes })
    }

    /// Generate a random 128-bit key
    pub fn generate_aes128<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = vec![0u8; AES_128_KEY_LEN];
        rng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Create a key from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        check_key_len(bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Create a key from a hex string
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let mut bytes = hex::decode(encoded)?;
        let key = Self::from_slice(&bytes);
        bytes.zeroize();
        key
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; keys have one of the supported lengths
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase hex encoding of the key bytes
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl AsRef<[u8]> for SymmetricKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Initial counter block for AES-CTR
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Iv([u8; IV_LEN]);

impl Iv {
    /// The all-zero counter block
    ///
    /// Safe only while every key wraps a single payload. Reusing a key with
    /// this IV for a second payload reuses the keystream.
    pub const ZERO: Iv = Iv([0u8; IV_LEN]);

    /// Create an IV from raw bytes
    pub const fn new(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }

    /// Generate a random IV
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; IV_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Raw IV bytes
    pub fn as_bytes(&self) -> &[u8; IV_LEN] {
        &self.0
    }
}

impl From<[u8; IV_LEN]> for Iv {
    fn from(bytes: [u8; IV_LEN]) -> Self {
        Self(bytes)
    }
}

//! AES-CTR key wrap
//!
//! Wraps a key under a key encryption key (KEK) by XOR-ing it with an AES
//! counter-mode keystream. The output has the same length as the input and
//! carries no integrity check.
//!
//! Unwrapping runs the exact same keystream transform, so the two directions
//! cannot drift apart.
//!
//! # Limitations
//! The default initial counter block is all zeros. That is only acceptable
//! while each KEK wraps exactly one payload per session: wrapping two payloads
//! under the same KEK and IV reuses the keystream, and the XOR of the two
//! wrapped values equals the XOR of the two plaintexts.

use crate::error::Result;
use crate::keys::{invalid_key_length, Iv};
use aes::{Aes128, Aes192, Aes256};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use std::fmt;

type Aes128Ctr = Ctr128BE<Aes128>;
type Aes192Ctr = Ctr128BE<Aes192>;
type Aes256Ctr = Ctr128BE<Aes256>;

/// A key encrypted under a KEK
#[derive(Clone, PartialEq, Eq)]
pub struct WrappedKey(Vec<u8>);

impl WrappedKey {
    /// Wrapped bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes (equal to the wrapped payload's length)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the wrapped payload was empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a wrapped key from hex
    pub fn from_hex(encoded: &str) -> Result<Self> {
        Ok(Self(hex::decode(encoded)?))
    }

    /// Consume into the raw bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for WrappedKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for WrappedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WrappedKey({})", self.to_hex())
    }
}

/// Wrap a key using AES-CTR with the all-zero IV
///
/// # Arguments
/// * `wrapping_key` - The KEK (16, 24 or 32 bytes selects AES-128/192/256)
/// * `payload` - The key to wrap
///
/// # Returns
/// The wrapped key, the same length as `payload`
///
/// # Errors
/// [`crate::Error::InvalidKeyLength`] if the KEK has an unsupported size.
pub fn wrap_key_aes_ctr(wrapping_key: &[u8], payload: &[u8]) -> Result<WrappedKey> {
    wrap_key_aes_ctr_with_iv(wrapping_key, payload, &Iv::ZERO)
}

/// Wrap a key using AES-CTR with an explicit initial counter block
pub fn wrap_key_aes_ctr_with_iv(wrapping_key: &[u8], payload: &[u8], iv: &Iv) -> Result<WrappedKey> {
    let wrapped = apply_keystream(wrapping_key, iv, payload)?;
    tracing::trace!(len = wrapped.len(), "wrapped key with AES-CTR");
    Ok(WrappedKey(wrapped))
}

/// Unwrap a key using AES-CTR with the all-zero IV
///
/// # Errors
/// [`crate::Error::InvalidKeyLength`] if the KEK has an unsupported size.
/// A wrong but well-sized KEK is not detected; it yields garbage.
pub fn unwrap_key_aes_ctr(wrapping_key: &[u8], wrapped: &WrappedKey) -> Result<Vec<u8>> {
    unwrap_key_aes_ctr_with_iv(wrapping_key, wrapped, &Iv::ZERO)
}

/// Unwrap a key using AES-CTR with an explicit initial counter block
pub fn unwrap_key_aes_ctr_with_iv(
    wrapping_key: &[u8],
    wrapped: &WrappedKey,
    iv: &Iv,
) -> Result<Vec<u8>> {
    // CTR is its own inverse
    apply_keystream(wrapping_key, iv, wrapped.as_bytes())
}

/// XOR `input` with the AES-CTR keystream for `key` and `iv`
fn apply_keystream(key: &[u8], iv: &Iv, input: &[u8]) -> Result<Vec<u8>> {
    let mut buffer = input.to_vec();
    match key.len() {
        16 => xor_in_place::<Aes128Ctr>(key, iv, &mut buffer)?,
        24 => xor_in_place::<Aes192Ctr>(key, iv, &mut buffer)?,
        32 => xor_in_place::<Aes256Ctr>(key, iv, &mut buffer)?,
        len => return Err(invalid_key_length(len)),
    }
    Ok(buffer)
}

fn xor_in_place<C: KeyIvInit + StreamCipher>(key: &[u8], iv: &Iv, data: &mut [u8]) -> Result<()> {
    let mut cipher =
        C::new_from_slices(key, iv.as_bytes()).map_err(|_| invalid_key_length(key.len()))?;
    cipher.apply_keystream(data);
    Ok(())
}

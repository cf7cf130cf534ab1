//! RSA digital signatures
//!
//! Key pairs are generated from a caller-supplied CSPRNG. Messages are hashed
//! with SHA-256 and signed with deterministic PKCS#1 v1.5 padding, so signing
//! the same message with the same key always yields the same signature.
//!
//! Verification recomputes the digest from the message and returns `false`
//! for any mismatch. A bad signature is an expected outcome for untrusted
//! input and never aborts the caller.

use super::digest::MessageDigest;
use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::Serialize;
use sha2::Sha256;
use std::fmt;

/// Smallest modulus size, in bits, that [`generate_key_pair`] accepts
pub const MIN_MODULUS_BITS: usize = 2048;

/// Modulus size, in bits, used when none is configured
pub const DEFAULT_MODULUS_BITS: usize = 2048;

/// An RSA signature
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Signature bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes (the modulus size)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the signature is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parse a signature from hex
    pub fn from_hex(encoded: &str) -> Result<Self> {
        Ok(Self(hex::decode(encoded)?))
    }
}

impl From<Vec<u8>> for Signature {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Public key components as decimal strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyInfo {
    /// Modulus
    pub n: String,
    /// Public exponent
    pub e: String,
}

impl From<&RsaPublicKey> for PublicKeyInfo {
    fn from(key: &RsaPublicKey) -> Self {
        Self {
            n: key.n().to_string(),
            e: key.e().to_string(),
        }
    }
}

/// Private key components as decimal strings
///
/// Only meant for demonstrations; this exposes the private exponent.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PrivateKeyInfo {
    /// Private exponent
    pub d: String,
    /// Public exponent
    pub e: String,
}

impl fmt::Debug for PrivateKeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyInfo")
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

/// An RSA key pair
///
/// The two halves are always generated together.
#[derive(Clone)]
pub struct KeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl KeyPair {
    /// The private half
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// The public half
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Modulus size in bits
    pub fn modulus_bits(&self) -> usize {
        self.public_key.size() * 8
    }

    /// Public modulus and exponent
    pub fn public_components(&self) -> PublicKeyInfo {
        PublicKeyInfo::from(&self.public_key)
    }

    /// Private and public exponent
    pub fn private_components(&self) -> PrivateKeyInfo {
        PrivateKeyInfo {
            d: self.private_key.d().to_string(),
            e: self.private_key.e().to_string(),
        }
    }

    /// Export the public key to SPKI PEM format
    pub fn public_key_pem(&self) -> Result<String> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| Error::Encoding(format!("Failed to export public key: {}", e)))
    }

    /// Sign a message with this pair's private key
    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        sign(message, &self.private_key)
    }

    /// Verify a signature with this pair's public key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        verify(message, signature, &self.public_key)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("modulus_bits", &self.modulus_bits())
            .finish_non_exhaustive()
    }
}

/// Generate an RSA key pair
///
/// # Arguments
/// * `rng` - Cryptographically secure random source
/// * `modulus_bits` - Modulus size in **bits** (2048, 3072, 4096, ...)
///
/// # Errors
/// [`Error::KeyGeneration`] if `modulus_bits` is below [`MIN_MODULUS_BITS`]
/// or the underlying generator fails.
pub fn generate_key_pair<R: CryptoRng + RngCore>(
    rng: &mut R,
    modulus_bits: usize,
) -> Result<KeyPair> {
    if modulus_bits < MIN_MODULUS_BITS {
        return Err(Error::KeyGeneration(format!(
            "Modulus of {} bits is below the minimum of {} bits",
            modulus_bits, MIN_MODULUS_BITS
        )));
    }

    let private_key = RsaPrivateKey::new(rng, modulus_bits)
        .map_err(|e| Error::KeyGeneration(format!("Failed to generate RSA key: {}", e)))?;
    let public_key = private_key.to_public_key();

    tracing::debug!(modulus_bits, "generated RSA key pair");
    Ok(KeyPair {
        private_key,
        public_key,
    })
}

/// Sign a message using PKCS#1 v1.5 with SHA-256
pub fn sign(message: &[u8], private_key: &RsaPrivateKey) -> Result<Signature> {
    sign_digest(&MessageDigest::compute(message), private_key)
}

/// Sign an already computed SHA-256 digest using PKCS#1 v1.5
pub fn sign_digest(digest: &MessageDigest, private_key: &RsaPrivateKey) -> Result<Signature> {
    let signature = private_key
        .sign(Pkcs1v15Sign::new::<Sha256>(), digest.as_bytes())
        .map_err(|e| Error::Signing(format!("RSA signing failed: {}", e)))?;
    Ok(Signature(signature))
}

/// Verify a PKCS#1 v1.5 / SHA-256 signature over a message
///
/// Returns `true` only if the padding and the recomputed digest match.
pub fn verify(message: &[u8], signature: &Signature, public_key: &RsaPublicKey) -> bool {
    verify_digest(&MessageDigest::compute(message), signature, public_key)
}

/// Verify a PKCS#1 v1.5 signature over a SHA-256 digest the caller computed
pub fn verify_digest(
    digest: &MessageDigest,
    signature: &Signature,
    public_key: &RsaPublicKey,
) -> bool {
    match public_key.verify(
        Pkcs1v15Sign::new::<Sha256>(),
        digest.as_bytes(),
        signature.as_bytes(),
    ) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "signature rejected");
            false
        }
    }
}

/// Import a public key from SPKI PEM format
pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .map_err(|e| Error::Encoding(format!("Failed to import public key: {}", e)))
}

//! Cryptographic primitives for the key distribution center
//!
//! This module provides:
//! - AES-CTR key wrap for handing session keys to parties
//! - SHA-256 message digests
//! - RSA PKCS#1 v1.5 signatures over SHA-256 digests
//!
//! The key wrap and the signature code do not depend on each other.

mod digest;
mod key_wrap;
mod signature;

pub use digest::{MessageDigest, DIGEST_LEN};
pub use key_wrap::{
    unwrap_key_aes_ctr, unwrap_key_aes_ctr_with_iv, wrap_key_aes_ctr, wrap_key_aes_ctr_with_iv,
    WrappedKey,
};
pub use signature::{
    generate_key_pair, public_key_from_pem, sign, sign_digest, verify, verify_digest, KeyPair,
    PrivateKeyInfo, PublicKeyInfo, Signature, DEFAULT_MODULUS_BITS, MIN_MODULUS_BITS,
};

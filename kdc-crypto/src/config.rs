//! Configuration for key distribution and signing

use crate::crypto::{DEFAULT_MODULUS_BITS, MIN_MODULUS_BITS};
use crate::error::{Error, Result};
use crate::keys::{Iv, AES_128_KEY_LEN, SUPPORTED_KEY_LENGTHS};

/// Configuration options for the key distribution center and signer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoConfig {
    /// Length in bytes of KEKs and session keys
    pub symmetric_key_len: usize,

    /// RSA modulus size in bits
    pub rsa_modulus_bits: usize,

    /// Initial counter block for the AES-CTR key wrap
    pub iv: Iv,
}

impl CryptoConfig {
    /// Creates a config with 128-bit keys, 2048-bit RSA and the zero IV
    pub fn new() -> Self {
        Self {
            symmetric_key_len: AES_128_KEY_LEN,
            rsa_modulus_bits: DEFAULT_MODULUS_BITS,
            iv: Iv::ZERO,
        }
    }

    /// Sets the symmetric key length in bytes
    pub fn with_symmetric_key_len(mut self, len: usize) -> Self {
        self.symmetric_key_len = len;
        self
    }

    /// Sets the RSA modulus size in bits
    pub fn with_rsa_modulus_bits(mut self, bits: usize) -> Self {
        self.rsa_modulus_bits = bits;
        self
    }

    /// Sets the key wrap IV
    pub fn with_iv(mut self, iv: Iv) -> Self {
        self.iv = iv;
        self
    }
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates a configuration before it is used
pub fn validate(config: &CryptoConfig) -> Result<()> {
    if !SUPPORTED_KEY_LENGTHS.contains(&config.symmetric_key_len) {
        return Err(Error::Config(format!(
            "Unsupported symmetric key length {} (use 16, 24 or 32 bytes)",
            config.symmetric_key_len
        )));
    }
    if config.rsa_modulus_bits < MIN_MODULUS_BITS {
        return Err(Error::Config(format!(
            "RSA modulus of {} bits is below the minimum of {}",
            config.rsa_modulus_bits, MIN_MODULUS_BITS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_default_config_is_valid() {
        let config = CryptoConfig::default();
        assert_eq!(config.symmetric_key_len, 16);
        assert_eq!(config.rsa_modulus_bits, 2048);
        assert_eq!(config.iv, Iv::ZERO);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let iv = Iv::new([9u8; 16]);
        let config = CryptoConfig::new()
            .with_symmetric_key_len(32)
            .with_rsa_modulus_bits(3072)
            .with_iv(iv);
        assert_eq!(config.symmetric_key_len, 32);
        assert_eq!(config.rsa_modulus_bits, 3072);
        assert_eq!(config.iv, iv);
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_key = CryptoConfig::new().with_symmetric_key_len(20);
        assert_matches!(validate(&bad_key), Err(Error::Config(_)));

        let bad_bits = CryptoConfig::new().with_rsa_modulus_bits(256);
        assert_matches!(validate(&bad_bits), Err(Error::Config(_)));
    }
}

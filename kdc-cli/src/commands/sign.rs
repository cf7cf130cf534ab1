use crate::demo_rng;
use crate::error::Result;
use crate::output::{print_success, OutputFormat};
use clap::Args;
use kdc_crypto::config::{self, CryptoConfig};
use kdc_crypto::crypto::{
    generate_key_pair, sign_digest, verify, MessageDigest, PrivateKeyInfo, PublicKeyInfo,
};
use serde::Serialize;
use tracing::info;

/// Message signed when none is given
pub const DEFAULT_MESSAGE: &str = "OwO Digital Signature (with RSA)!";

#[derive(Args, Debug, Clone)]
pub struct SignArgs {
    /// Message to sign
    #[arg(short, long, default_value = DEFAULT_MESSAGE)]
    pub message: String,

    /// RSA modulus size in bits
    #[arg(short, long, env = "KDC_RSA_BITS", default_value_t = 2048)]
    pub bits: usize,

    /// Verify the signature against this message instead of the signed one
    #[arg(long)]
    pub verify_message: Option<String>,

    /// Seed for a reproducible key pair
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include the public key in SPKI PEM format
    #[arg(long)]
    pub pem: bool,
}

#[derive(Debug, Serialize)]
pub struct SignReport {
    pub message: String,
    pub modulus_bits: usize,
    pub private_key: PrivateKeyInfo,
    pub public_key: PublicKeyInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_pem: Option<String>,
    pub signer_digest: String,
    pub signature: String,
    pub verified_message: String,
    pub verifier_digest: String,
    pub valid: bool,
}

/// Run the signature demonstration
///
/// The signer hashes and signs the message; the verifier hashes the message
/// it received on its own and checks the signature with the public key.
pub fn run(args: &SignArgs) -> Result<SignReport> {
    let config = CryptoConfig::new().with_rsa_modulus_bits(args.bits);
    config::validate(&config)?;

    let mut rng = demo_rng(args.seed);
    let key_pair = generate_key_pair(&mut rng, config.rsa_modulus_bits)?;

    let message = args.message.as_bytes();
    let signer_digest = MessageDigest::compute(message);
    let signature = sign_digest(&signer_digest, key_pair.private_key())?;

    let received = args.verify_message.as_deref().unwrap_or(&args.message);
    let verifier_digest = MessageDigest::compute(received.as_bytes());
    let valid = verify(received.as_bytes(), &signature, key_pair.public_key());
    info!(valid, "signature checked");

    let public_key_pem = if args.pem {
        Some(key_pair.public_key_pem()?)
    } else {
        None
    };

    Ok(SignReport {
        message: args.message.clone(),
        modulus_bits: key_pair.modulus_bits(),
        private_key: key_pair.private_components(),
        public_key: key_pair.public_components(),
        public_key_pem,
        signer_digest: signer_digest.to_hex(),
        signature: signature.to_hex(),
        verified_message: received.to_string(),
        verifier_digest: verifier_digest.to_hex(),
        valid,
    })
}

pub fn handle(args: &SignArgs, format: OutputFormat) -> Result<()> {
    let report = run(args)?;
    print_success(format, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;

    fn args() -> SignArgs {
        SignArgs {
            message: DEFAULT_MESSAGE.to_string(),
            bits: 2048,
            verify_message: None,
            seed: Some(7),
            pem: false,
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let report = run(&args()).unwrap();

        assert!(report.valid);
        assert_eq!(report.modulus_bits, 2048);
        assert_eq!(report.signer_digest, report.verifier_digest);
        assert_eq!(report.signature.len(), 512);
        assert!(report.public_key_pem.is_none());
    }

    #[test]
    fn test_different_message_is_rejected() {
        let mut tampered = args();
        tampered.verify_message = Some("OwO Digital Signature (with RSA)?".to_string());
        tampered.pem = true;

        let report = run(&tampered).unwrap();
        assert!(!report.valid);
        assert_ne!(report.signer_digest, report.verifier_digest);
        assert!(report
            .public_key_pem
            .unwrap()
            .starts_with("-----BEGIN PUBLIC KEY-----"));
    }

    #[test]
    fn test_small_modulus_rejected() {
        let mut small = args();
        small.bits = 256;
        assert_matches!(run(&small), Err(Error::Crypto(kdc_crypto::Error::Config(_))));
    }
}

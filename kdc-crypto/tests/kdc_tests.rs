//! Key distribution scenarios
//!
//! Keys come from a seeded ChaCha20 generator so every run sees the same
//! KEKs and session key.

use kdc_crypto::crypto::{unwrap_key_aes_ctr, wrap_key_aes_ctr};
use kdc_crypto::{CryptoConfig, KeyDistributionCenter, Party, SymmetricKey};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Both users recover the same session key from their own wrapped copy
#[test]
fn test_two_party_distribution_with_primitives() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    let kek_a = SymmetricKey::generate_aes128(&mut rng);
    let kek_b = SymmetricKey::generate_aes128(&mut rng);
    let session_key = SymmetricKey::generate_aes128(&mut rng);

    let for_a = wrap_key_aes_ctr(kek_a.as_bytes(), session_key.as_bytes()).unwrap();
    let for_b = wrap_key_aes_ctr(kek_b.as_bytes(), session_key.as_bytes()).unwrap();

    let recovered_a = unwrap_key_aes_ctr(kek_a.as_bytes(), &for_a).unwrap();
    let recovered_b = unwrap_key_aes_ctr(kek_b.as_bytes(), &for_b).unwrap();

    assert_eq!(recovered_a, recovered_b);
    assert_eq!(&recovered_a[..], session_key.as_bytes());
}

/// The same flow through the KDC and party types
#[test]
fn test_two_party_distribution_with_kdc() {
    let mut rng = ChaCha20Rng::seed_from_u64(2024);

    let user_a = Party::new("UserA", SymmetricKey::generate_aes128(&mut rng));
    let user_b = Party::new("UserB", SymmetricKey::generate_aes128(&mut rng));

    let mut kdc = KeyDistributionCenter::new(CryptoConfig::default()).unwrap();
    kdc.register(user_a.id(), user_a.kek().clone()).unwrap();
    kdc.register(user_b.id(), user_b.kek().clone()).unwrap();

    let issue = kdc
        .issue_session_key(&mut rng, &["UserA", "UserB"])
        .unwrap();

    let key_a = user_a.receive(issue.wrapped_for("UserA").unwrap()).unwrap();
    let key_b = user_b.receive(issue.wrapped_for("UserB").unwrap()).unwrap();

    assert_eq!(key_a, key_b);
    assert_eq!(&key_a, issue.session_key());
}

/// A seeded run always produces the same wrapped values
#[test]
fn test_seeded_distribution_is_reproducible() {
    let run = || {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        let kek = SymmetricKey::generate_aes128(&mut rng);
        let mut kdc = KeyDistributionCenter::new(CryptoConfig::default()).unwrap();
        kdc.register("UserA", kek).unwrap();
        let issue = kdc.issue_session_key(&mut rng, &["UserA"]).unwrap();
        (
            issue.session_key().to_hex(),
            issue.wrapped_for("UserA").unwrap().to_hex(),
        )
    };

    assert_eq!(run(), run());
}

/// Every session gets a fresh key
#[test]
fn test_sessions_get_distinct_keys() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let user = Party::new("UserA", SymmetricKey::generate_aes128(&mut rng));

    let mut kdc = KeyDistributionCenter::new(CryptoConfig::default()).unwrap();
    kdc.register(user.id(), user.kek().clone()).unwrap();

    let first = kdc.issue_session_key(&mut rng, &["UserA"]).unwrap();
    let second = kdc.issue_session_key(&mut rng, &["UserA"]).unwrap();

    assert_ne!(first.session_key(), second.session_key());
    assert_eq!(
        &user.receive(second.wrapped_for("UserA").unwrap()).unwrap(),
        second.session_key()
    );
}

//! Key distribution center simulation
//!
//! The [`KeyDistributionCenter`] knows every registered party's key
//! encryption key (KEK). On request it generates a fresh session key and
//! wraps it under the KEK of each participating [`Party`]. Each party
//! recovers the session key with its own KEK. Distribution succeeded when
//! every party holds the key the KDC generated.
//!
//! Nothing here touches a network or disk; wrapped keys are handed over as
//! plain values.

use crate::config::{self, CryptoConfig};
use crate::crypto::{unwrap_key_aes_ctr_with_iv, wrap_key_aes_ctr_with_iv, WrappedKey};
use crate::error::{Error, Result};
use crate::keys::{Iv, SymmetricKey};
use rand::{CryptoRng, RngCore};
use std::collections::HashMap;
use tracing::{debug, warn};
use zeroize::Zeroize;

#[derive(Debug)]
struct Registration {
    kek: SymmetricKey,
    wraps: u64,
}

/// Trusted third party holding each party's KEK
#[derive(Debug)]
pub struct KeyDistributionCenter {
    config: CryptoConfig,
    registrations: HashMap<String, Registration>,
}

impl KeyDistributionCenter {
    /// Create a KDC with the given configuration
    ///
    /// # Errors
    /// [`Error::Config`] if the configuration is invalid.
    pub fn new(config: CryptoConfig) -> Result<Self> {
        config::validate(&config)?;
        Ok(Self {
            config,
            registrations: HashMap::new(),
        })
    }

    /// The configuration this KDC was created with
    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    /// Register a party's pre-shared KEK
    ///
    /// # Errors
    /// * [`Error::Validation`] for an empty or already registered id
    /// * [`Error::InvalidKeyLength`] if the KEK does not match the configured length
    pub fn register(&mut self, party_id: &str, kek: SymmetricKey) -> Result<()> {
        if party_id.is_empty() {
            return Err(Error::Validation("Party id must not be empty".to_string()));
        }
        if self.registrations.contains_key(party_id) {
            return Err(Error::Validation(format!(
                "Party {} is already registered",
                party_id
            )));
        }
        if kek.len() != self.config.symmetric_key_len {
            return Err(Error::InvalidKeyLength {
                expected: format!("{} bytes", self.config.symmetric_key_len),
                actual: kek.len(),
            });
        }

        debug!(party = party_id, "registered party with KDC");
        self.registrations
            .insert(party_id.to_string(), Registration { kek, wraps: 0 });
        Ok(())
    }

    /// Whether a party is registered
    pub fn is_registered(&self, party_id: &str) -> bool {
        self.registrations.contains_key(party_id)
    }

    /// Number of registered parties
    pub fn party_count(&self) -> usize {
        self.registrations.len()
    }

    /// Generate a session key and wrap it for each listed party
    ///
    /// Each KEK wraps exactly one payload per call. With the zero IV, a KEK
    /// that wraps keys across several sessions reuses its keystream; this is
    /// logged as a warning.
    ///
    /// # Errors
    /// * [`Error::Validation`] if `party_ids` is empty or has duplicates
    /// * [`Error::UnknownParty`] if a party is not registered
    pub fn issue_session_key<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
        party_ids: &[&str],
    ) -> Result<SessionKeyIssue> {
        if party_ids.is_empty() {
            return Err(Error::Validation(
                "At least one party is required".to_string(),
            ));
        }
        for (i, id) in party_ids.iter().enumerate() {
            if party_ids[..i].contains(id) {
                return Err(Error::Validation(format!(
                    "Party {} listed more than once",
                    id
                )));
            }
            if !self.registrations.contains_key(*id) {
                return Err(Error::UnknownParty(id.to_string()));
            }
        }

        let session_key = SymmetricKey::generate(rng, self.config.symmetric_key_len)?;
        let iv = self.config.iv;

        let mut wrapped = Vec::with_capacity(party_ids.len());
        for id in party_ids {
            let registration = self
                .registrations
                .get_mut(*id)
                .ok_or_else(|| Error::UnknownParty(id.to_string()))?;

            if registration.wraps > 0 && iv == Iv::ZERO {
                warn!(
                    party = *id,
                    wraps = registration.wraps,
                    "KEK reused with the zero IV; keystream is repeated"
                );
            }

            let key = wrap_key_aes_ctr_with_iv(
                registration.kek.as_bytes(),
                session_key.as_bytes(),
                &iv,
            )?;
            registration.wraps += 1;
            wrapped.push((id.to_string(), key));
        }

        debug!(parties = party_ids.len(), "issued session key");
        Ok(SessionKeyIssue {
            session_key,
            wrapped,
        })
    }
}

/// Result of one session key issue
#[derive(Debug, Clone)]
pub struct SessionKeyIssue {
    session_key: SymmetricKey,
    wrapped: Vec<(String, WrappedKey)>,
}

impl SessionKeyIssue {
    /// The session key as the KDC generated it
    pub fn session_key(&self) -> &SymmetricKey {
        &self.session_key
    }

    /// Wrapped session key for a party
    pub fn wrapped_for(&self, party_id: &str) -> Option<&WrappedKey> {
        self.wrapped
            .iter()
            .find(|(id, _)| id == party_id)
            .map(|(_, key)| key)
    }

    /// All wrapped keys, in the order the parties were requested
    pub fn wrapped_keys(&self) -> &[(String, WrappedKey)] {
        &self.wrapped
    }
}

/// A party that shares a KEK with the KDC
#[derive(Debug, Clone)]
pub struct Party {
    id: String,
    kek: SymmetricKey,
    iv: Iv,
}

impl Party {
    /// Create a party holding `kek`, using the zero IV
    pub fn new(id: impl Into<String>, kek: SymmetricKey) -> Self {
        Self {
            id: id.into(),
            kek,
            iv: Iv::ZERO,
        }
    }

    /// Use a non-default IV; it must match the KDC's
    pub fn with_iv(mut self, iv: Iv) -> Self {
        self.iv = iv;
        self
    }

    /// Party identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The party's KEK
    pub fn kek(&self) -> &SymmetricKey {
        &self.kek
    }

    /// Recover a session key wrapped under this party's KEK
    ///
    /// # Errors
    /// [`Error::InvalidKeyLength`] if the recovered key has an unsupported
    /// length.
    pub fn receive(&self, wrapped: &WrappedKey) -> Result<SymmetricKey> {
        let mut bytes = unwrap_key_aes_ctr_with_iv(self.kek.as_bytes(), wrapped, &self.iv)?;
        let key = SymmetricKey::from_slice(&bytes);
        bytes.zeroize();
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::OsRng;

    fn kdc_with_parties(ids: &[&str]) -> (KeyDistributionCenter, Vec<Party>) {
        let mut kdc = KeyDistributionCenter::new(CryptoConfig::default()).unwrap();
        let parties: Vec<Party> = ids
            .iter()
            .map(|id| Party::new(*id, SymmetricKey::generate_aes128(&mut OsRng)))
            .collect();
        for party in &parties {
            kdc.register(party.id(), party.kek().clone()).unwrap();
        }
        (kdc, parties)
    }

    #[test]
    fn test_distribution_succeeds() {
        let (mut kdc, parties) = kdc_with_parties(&["UserA", "UserB"]);

        let issue = kdc
            .issue_session_key(&mut OsRng, &["UserA", "UserB"])
            .unwrap();

        for party in &parties {
            let wrapped = issue.wrapped_for(party.id()).unwrap();
            assert_eq!(&party.receive(wrapped).unwrap(), issue.session_key());
        }
    }

    #[test]
    fn test_wrapped_keys_differ_per_party() {
        let (mut kdc, _) = kdc_with_parties(&["UserA", "UserB"]);
        let issue = kdc
            .issue_session_key(&mut OsRng, &["UserA", "UserB"])
            .unwrap();

        let wrapped = issue.wrapped_keys();
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[0].0, "UserA");
        assert_eq!(wrapped[1].0, "UserB");
        assert_ne!(wrapped[0].1, wrapped[1].1);
        assert_ne!(wrapped[0].1.as_bytes(), issue.session_key().as_bytes());
    }

    #[test]
    fn test_other_party_cannot_recover_key() {
        let (mut kdc, parties) = kdc_with_parties(&["UserA", "UserB"]);
        let issue = kdc
            .issue_session_key(&mut OsRng, &["UserA", "UserB"])
            .unwrap();

        let for_a = issue.wrapped_for("UserA").unwrap();
        let recovered_by_b = parties[1].receive(for_a).unwrap();
        assert_ne!(&recovered_by_b, issue.session_key());
    }

    #[test]
    fn test_unknown_party_rejected() {
        let (mut kdc, _) = kdc_with_parties(&["UserA"]);
        assert_matches!(
            kdc.issue_session_key(&mut OsRng, &["UserA", "Mallory"]),
            Err(Error::UnknownParty(id)) if id == "Mallory"
        );
    }

    #[test]
    fn test_invalid_requests_rejected() {
        let (mut kdc, _) = kdc_with_parties(&["UserA"]);
        assert_matches!(
            kdc.issue_session_key(&mut OsRng, &[]),
            Err(Error::Validation(_))
        );
        assert_matches!(
            kdc.issue_session_key(&mut OsRng, &["UserA", "UserA"]),
            Err(Error::Validation(_))
        );
    }

    #[test]
    fn test_register_validation() {
        let mut kdc = KeyDistributionCenter::new(CryptoConfig::default()).unwrap();
        let kek = SymmetricKey::generate_aes128(&mut OsRng);

        assert_matches!(kdc.register("", kek.clone()), Err(Error::Validation(_)));
        kdc.register("UserA", kek.clone()).unwrap();
        assert_matches!(kdc.register("UserA", kek), Err(Error::Validation(_)));

        let long_kek = SymmetricKey::generate(&mut OsRng, 32).unwrap();
        assert_matches!(
            kdc.register("UserB", long_kek),
            Err(Error::InvalidKeyLength { actual: 32, .. })
        );

        assert!(kdc.is_registered("UserA"));
        assert!(!kdc.is_registered("UserB"));
        assert_eq!(kdc.party_count(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CryptoConfig::new().with_symmetric_key_len(7);
        assert_matches!(KeyDistributionCenter::new(config), Err(Error::Config(_)));
    }

    #[test]
    fn test_custom_iv_must_match() {
        let iv = Iv::new([0x11u8; 16]);
        let mut kdc = KeyDistributionCenter::new(CryptoConfig::new().with_iv(iv)).unwrap();
        let kek = SymmetricKey::generate_aes128(&mut OsRng);
        kdc.register("UserA", kek.clone()).unwrap();

        let issue = kdc.issue_session_key(&mut OsRng, &["UserA"]).unwrap();
        let wrapped = issue.wrapped_for("UserA").unwrap();

        let matching = Party::new("UserA", kek.clone()).with_iv(iv);
        assert_eq!(&matching.receive(wrapped).unwrap(), issue.session_key());

        let zero_iv = Party::new("UserA", kek);
        assert_ne!(&zero_iv.receive(wrapped).unwrap(), issue.session_key());
    }

    #[test]
    fn test_aes256_session_keys() {
        let mut kdc =
            KeyDistributionCenter::new(CryptoConfig::new().with_symmetric_key_len(32)).unwrap();
        let party = Party::new("UserA", SymmetricKey::generate(&mut OsRng, 32).unwrap());
        kdc.register(party.id(), party.kek().clone()).unwrap();

        let issue = kdc.issue_session_key(&mut OsRng, &["UserA"]).unwrap();
        assert_eq!(issue.session_key().len(), 32);
        let recovered = party.receive(issue.wrapped_for("UserA").unwrap()).unwrap();
        assert_eq!(&recovered, issue.session_key());
    }
}

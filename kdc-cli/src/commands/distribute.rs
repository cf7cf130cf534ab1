use crate::demo_rng;
use crate::error::{Error, Result};
use crate::output::{print_success, OutputFormat};
use clap::Args;
use kdc_crypto::config::{self, CryptoConfig};
use kdc_crypto::{KeyDistributionCenter, Party, SymmetricKey};
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct DistributeArgs {
    /// Key length in bytes for KEKs and the session key (16, 24 or 32)
    #[arg(short = 'k', long, env = "KDC_KEY_LEN", default_value_t = 16)]
    pub key_len: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Parties receiving the session key
    #[arg(short, long = "party", default_values_t = vec!["UserA".to_string(), "UserB".to_string()])]
    pub parties: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PartyReport {
    pub party: String,
    pub kek: String,
    pub wrapped_session_key: String,
    pub recovered_session_key: String,
    pub matches: bool,
}

#[derive(Debug, Serialize)]
pub struct DistributionReport {
    pub key_bits: usize,
    pub session_key: String,
    pub parties: Vec<PartyReport>,
    pub distributed: bool,
}

/// Run the key distribution demonstration
///
/// Every party gets a random KEK registered with a fresh KDC, the KDC issues
/// one session key wrapped for all of them, and each party unwraps its copy.
pub fn run(args: &DistributeArgs) -> Result<DistributionReport> {
    if args.parties.len() < 2 {
        return Err(Error::InvalidArgument(
            "Key distribution needs at least two parties".to_string(),
        ));
    }

    let config = CryptoConfig::new().with_symmetric_key_len(args.key_len);
    config::validate(&config)?;

    let mut rng = demo_rng(args.seed);
    let mut kdc = KeyDistributionCenter::new(config)?;

    let mut parties = Vec::with_capacity(args.parties.len());
    for id in &args.parties {
        let kek = SymmetricKey::generate(&mut rng, args.key_len)?;
        kdc.register(id, kek.clone())?;
        parties.push(Party::new(id.as_str(), kek));
    }

    let ids: Vec<&str> = args.parties.iter().map(String::as_str).collect();
    let issue = kdc.issue_session_key(&mut rng, &ids)?;

    let mut reports = Vec::with_capacity(parties.len());
    for party in &parties {
        let wrapped = issue
            .wrapped_for(party.id())
            .ok_or_else(|| kdc_crypto::Error::UnknownParty(party.id().to_string()))?;
        let recovered = party.receive(wrapped)?;
        reports.push(PartyReport {
            party: party.id().to_string(),
            kek: party.kek().to_hex(),
            wrapped_session_key: wrapped.to_hex(),
            recovered_session_key: recovered.to_hex(),
            matches: &recovered == issue.session_key(),
        });
    }

    let distributed = reports.iter().all(|r| r.matches);
    info!(parties = reports.len(), distributed, "key distribution finished");

    Ok(DistributionReport {
        key_bits: args.key_len * 8,
        session_key: issue.session_key().to_hex(),
        parties: reports,
        distributed,
    })
}

pub fn handle(args: &DistributeArgs, format: OutputFormat) -> Result<()> {
    let report = run(args)?;
    print_success(format, &report)
}

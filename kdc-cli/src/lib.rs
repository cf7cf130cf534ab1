//! Demo driver for the KDC crypto library
//!
//! Each subcommand runs one demonstration and returns a serializable report
//! of every intermediate value, which the binary prints as JSON or text.

pub mod commands;
pub mod error;
pub mod output;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Random source for a demo run
///
/// A seed makes the run reproducible; without one the generator is seeded
/// from the operating system.
pub fn demo_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    }
}

//! Seeded random number generation.
//!
//! Every random decision of a search flows from one [`StdRng`] seeded
//! once at controller construction, so seeded runs are reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    create_rng(seed.unwrap_or_else(rand::random))
}

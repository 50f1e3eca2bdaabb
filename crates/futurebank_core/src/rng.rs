//! Path-indexed random streams.
//!
//! Every monthly draw is seeded from `(base_seed, path, month)` alone, so a
//! path produces the same returns regardless of how many other paths run or
//! in which order threads pick them up.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::Distribution;

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer; a bijective 64-bit mixer
#[must_use]
#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(GOLDEN_GAMMA);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Deterministic sub-seed for one month of one path
#[must_use]
#[inline]
pub fn seed_for(base_seed: u64, path_index: u64, month_index: u64) -> u64 {
    let path_key = splitmix64(base_seed ^ splitmix64(path_index));
    splitmix64(path_key ^ month_index.wrapping_mul(GOLDEN_GAMMA))
}

/// Draw one sample for `(path, month)` from `dist`
#[inline]
pub fn draw<D: Distribution<f64>>(dist: &D, base_seed: u64, path: usize, month: usize) -> f64 {
    let mut rng = SmallRng::seed_from_u64(seed_for(base_seed, path as u64, month as u64));
    dist.sample(&mut rng)
}

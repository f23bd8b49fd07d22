//! Hashing and probe-offset helpers for `ProbeTable`

use log::trace;
use rand::{Rng, seq::SliceRandom};

/// Multiplier of the polynomial string hash
const HASH_MULTIPLIER: u64 = 31;

/// Polynomial hash of the key bytes: `h = h * 31 + b`, wrapping on overflow.
#[must_use]
pub fn polynomial_hash(key: &str) -> u64 {
    key.bytes()
        .fold(0, |hash, byte| hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(byte)))
}

/// Reduces the hash of `key` to a slot index of a table with `capacity` slots.
///
/// A zero capacity maps every key to index 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
pub fn home_index(key: &str, capacity: usize) -> usize {
    let modulus = capacity.max(1) as u64;
    // The remainder is below `capacity`, so it always fits back into `usize`.
    (polynomial_hash(key) % modulus) as usize
}

/// Builds the offsets `1..capacity` in a uniformly random order.
pub fn shuffled_offsets_with<R: Rng + ?Sized>(capacity: usize, rng: &mut R) -> Vec<usize> {
    let mut offsets: Vec<usize> = (1..capacity).collect();
    offsets.shuffle(rng);
    trace!("generated {} probe offsets for capacity {capacity}", offsets.len());
    offsets
}

/// Builds the offsets `1..capacity` shuffled with a freshly seeded thread-local generator.
#[must_use]
pub fn shuffled_offsets(capacity: usize) -> Vec<usize> {
    shuffled_offsets_with(capacity, &mut rand::rng())
}

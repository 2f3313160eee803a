//! Utility functions.

use std::hash::Hash;
use seedable_hash::BuildSeededHasher;

/// Returns the smallest power of two that is greater than or equal to `n`.
///
/// `next_pow2(0)` is `1`, so every table sized by this function has at least one entry
/// and `len - 1` is always a valid mask.
#[inline]
pub const fn next_pow2(n: usize) -> usize {
    if n <= 1 { 1 } else { n.next_power_of_two() }
}

/// Returns 32-bit hash of `key`, calculated by `hasher` initialized with `seed`.
///
/// Both halves of the 64-bit hash produced by `hasher` contribute to the result.
#[inline(always)]
pub fn hash32<K: Hash + ?Sized, S: BuildSeededHasher>(hasher: &S, key: &K, seed: u32) -> u32 {
    let h = hasher.hash_one(key, u64::from(seed));
    (h ^ (h >> 32)) as u32
}

use std::hash::Hash;

use bitm::{BitAccess, BitVec};
use rayon::prelude::*;
use seedable_hash::BuildSeededHasher;

use crate::stats::BuildStatsCollector;
use crate::utils::{hash32, next_pow2};
use crate::{BuildConf, BuildError, MAX_KEYS};

/// Non-empty level-0 bucket: its index and the range of its keys in [`Buckets::members`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bucket {
    pub(crate) index: u32,
    pub(crate) begin: u32,
    pub(crate) len: u32,
}

/// Keys split into level-0 buckets.
pub(crate) struct Buckets {
    /// Indices of the keys, grouped by buckets. Indices inside each bucket are increasing.
    pub(crate) members: Box<[u32]>,
    /// Non-empty buckets, from the largest one. Buckets of equal sizes are ordered by index.
    pub(crate) order: Vec<Bucket>,
}

impl Buckets {
    /// Splits `keys` into `level0_size` buckets by their level-0 hashes.
    pub(crate) fn new<K, S>(keys: &[K], hasher: &S, level0_size: usize, use_multiple_threads: bool) -> Self
        where K: Hash + Sync, S: BuildSeededHasher + Sync
    {
        let mask = (level0_size - 1) as u32;
        let bucket_of: Vec<u32> = if use_multiple_threads {
            keys.par_iter().with_min_len(1024).map(|k| hash32(hasher, k, 0) & mask).collect()
        } else {
            keys.iter().map(|k| hash32(hasher, k, 0) & mask).collect()
        };
        let mut begins = vec![0u32; level0_size + 1];
        for &b in &bucket_of { begins[b as usize + 1] += 1; }
        for i in 1..begins.len() { begins[i] += begins[i - 1]; }
        let mut order: Vec<Bucket> = begins.windows(2).enumerate()
            .filter(|(_, w)| w[0] != w[1])
            .map(|(index, w)| Bucket { index: index as u32, begin: w[0], len: w[1] - w[0] })
            .collect();
        let mut members = vec![0u32; keys.len()].into_boxed_slice();
        for (key_index, &b) in bucket_of.iter().enumerate() {
            let dst = &mut begins[b as usize];
            members[*dst as usize] = key_index as u32;
            *dst += 1;
        }
        order.sort_by(|a, b| b.len.cmp(&a.len));  // stable
        Self { members, order }
    }

    #[inline] pub(crate) fn keys_of(&self, bucket: &Bucket) -> &[u32] {
        &self.members[bucket.begin as usize..(bucket.begin + bucket.len) as usize]
    }

    /// Returns the pair of indices of equal keys with the smallest first index, if any exists.
    ///
    /// Equal keys always share a bucket, so only keys inside the same bucket are compared.
    pub(crate) fn find_duplicate<K: Eq>(&self, keys: &[K]) -> Option<(usize, usize)> {
        let mut result: Option<(usize, usize)> = None;
        for bucket in &self.order {
            let members = self.keys_of(bucket);
            for (i, &first) in members.iter().enumerate() {
                if result.map_or(false, |(f, _)| f <= first as usize) { break; }
                if let Some(&second) = members[i+1..].iter().find(|&&second| keys[first as usize] == keys[second as usize]) {
                    result = Some((first as usize, second as usize));
                    break;
                }
            }
        }
        result
    }
}

/// Places buckets into the level-1 table, bucket by bucket.
pub(crate) struct Displacer<'k, K, S> {
    keys: &'k [K],
    hasher: &'k S,
    /// Slots of level-1 taken by buckets placed so far.
    claimed: Box<[u64]>,
    /// Slots tentatively claimed by the current trial.
    trial: Vec<u32>,
    pub(crate) level0: Box<[u32]>,
    pub(crate) level1: Box<[u32]>,
    level1_mask: u32,
}

impl<'k, K: Hash, S: BuildSeededHasher> Displacer<'k, K, S> {
    pub(crate) fn new(keys: &'k [K], hasher: &'k S, level0_size: usize, level1_size: usize) -> Self {
        Self {
            keys,
            hasher,
            claimed: Box::<[u64]>::with_zeroed_bits(level1_size),
            trial: Vec::new(),
            level0: vec![0u32; level0_size].into_boxed_slice(),
            level1: vec![0u32; level1_size].into_boxed_slice(),
            level1_mask: (level1_size - 1) as u32,
        }
    }

    /// Tries to place `members` with `seed`. On success, claims their slots and records them in level-1.
    /// On failure, leaves claimed slots unchanged.
    fn try_seed(&mut self, members: &[u32], seed: u32) -> bool {
        self.trial.clear();
        for &key_index in members {
            let slot = hash32(self.hasher, &self.keys[key_index as usize], seed) & self.level1_mask;
            if self.claimed.get_bit(slot as usize) {
                for &s in &self.trial { self.claimed.clear_bit(s as usize); }
                return false;
            }
            self.claimed.set_bit(slot as usize);
            self.trial.push(slot);
        }
        for (&slot, &key_index) in self.trial.iter().zip(members) {
            self.level1[slot as usize] = key_index;
        }
        true
    }

    /// Finds the smallest seed in `0..=max_seed` that places `members` of the bucket with given `index`,
    /// and records it in level-0.
    pub(crate) fn place(&mut self, index: u32, members: &[u32], max_seed: u32) -> Option<u32> {
        let seed = (0..=max_seed).find(|&seed| self.try_seed(members, seed))?;
        self.level0[index as usize] = seed;
        Some(seed)
    }
}

/// Builds level-0 and level-1 tables for `keys`.
pub(crate) fn build<K, S, BS>(keys: &[K], conf: &BuildConf<S>, stats: &mut BS) -> Result<(Box<[u32]>, Box<[u32]>), BuildError>
    where K: Hash + Eq + Sync, S: BuildSeededHasher + Sync, BS: BuildStatsCollector
{
    if keys.len() > MAX_KEYS { return Err(BuildError::TooManyKeys(keys.len())); }
    let level0_size = next_pow2(keys.len() / 3);
    let level1_size = next_pow2(keys.len());
    let use_multiple_threads = conf.use_multiple_threads && rayon::current_num_threads() > 1;
    let buckets = Buckets::new(keys, &conf.hash_builder, level0_size, use_multiple_threads);
    stats.partitioned(keys.len(), level0_size, level1_size, buckets.order.len());
    if conf.check_duplicates {
        if let Some((first, second)) = buckets.find_duplicate(keys) {
            return Err(BuildError::DuplicateKey { first, second });
        }
    }
    let mut displacer = Displacer::new(keys, &conf.hash_builder, level0_size, level1_size);
    for bucket in &buckets.order {
        let members = buckets.keys_of(bucket);
        match displacer.place(bucket.index, members, conf.max_seed) {
            Some(seed) => stats.bucket_solved(bucket.index as usize, members.len(), seed),
            None => {
                stats.bucket_failed(bucket.index as usize, members.len());
                return Err(BuildError::DisplacementExhausted {
                    bucket: bucket.index as usize,
                    bucket_size: members.len(),
                    max_seed: conf.max_seed
                });
            }
        }
    }
    stats.end();
    Ok((displacer.level0, displacer.level1))
}

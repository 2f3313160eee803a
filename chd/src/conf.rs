use seedable_hash::BuildDefaultSeededHasher;

/// Build configuration that is accepted by [`Function`](crate::Function) constructors.
///
/// See field descriptions for details.
#[derive(Clone)]
pub struct BuildConf<S = BuildDefaultSeededHasher> {
    /// The family of hash functions used by the constructed function. (default: [`BuildDefaultSeededHasher`])
    ///
    /// The same family must be used to evaluate the function, also after reading it back.
    pub hash_builder: S,

    /// The largest seed (inclusive) tried for each bucket. (default: [`BuildConf::DEFAULT_MAX_SEED`])
    ///
    /// If no seed in `0..=max_seed` places all keys of some bucket into free slots,
    /// the construction fails with [`BuildError::DisplacementExhausted`](crate::BuildError::DisplacementExhausted).
    /// Note that when the number of keys is a power of two, the last buckets are placed
    /// in an almost full table and may need many seeds.
    pub max_seed: u32,

    /// Whether to reject the input that contains equal keys. (default: `true`)
    ///
    /// If `false`, duplicates are not detected directly, but the construction cannot succeed for them
    /// and fails with [`BuildError::DisplacementExhausted`](crate::BuildError::DisplacementExhausted)
    /// only after trying all seeds in `0..=max_seed`. With the default [`max_seed`](BuildConf::max_seed)
    /// this takes billions of trials, so disabling the check should go with a smaller bound,
    /// as [`BuildConf::max_seed_unchecked`] requires.
    pub check_duplicates: bool,

    /// Whether to use multiple threads to hash keys into buckets. (default: `true`)
    ///
    /// If `true`, the hashing is performed using the default [rayon] thread pool.
    /// Placing buckets is always sequential and the result does not depend on this setting.
    pub use_multiple_threads: bool,
}

impl<S: Default> Default for BuildConf<S> {
    fn default() -> Self {
        Self::hash(Default::default())
    }
}

impl BuildConf {
    /// Returns configuration that potentially uses [multiple threads](BuildConf::use_multiple_threads) to build [`Function`](crate::Function).
    pub fn mt(use_multiple_threads: bool) -> Self {
        Self { use_multiple_threads, ..Default::default() }
    }

    /// Returns configuration that tries seeds up to [`max_seed`](BuildConf::max_seed) for each bucket.
    pub fn max_seed(max_seed: u32) -> Self {
        Self { max_seed, ..Default::default() }
    }

    /// Returns configuration that tries seeds up to [`max_seed`](BuildConf::max_seed) for each bucket
    /// and does not [check for duplicates](BuildConf::check_duplicates).
    pub fn max_seed_unchecked(max_seed: u32) -> Self {
        Self { max_seed, check_duplicates: false, ..Default::default() }
    }
}

impl<S> BuildConf<S> {
    /// The default value for [`max_seed`](BuildConf::max_seed), which permits any seed the level-0 table can store.
    pub const DEFAULT_MAX_SEED: u32 = u32::MAX;

    /// Returns configuration that uses custom [`hash_builder`](BuildConf::hash_builder).
    pub fn hash(hash_builder: S) -> Self {
        Self { hash_builder, max_seed: Self::DEFAULT_MAX_SEED, check_duplicates: true, use_multiple_threads: true }
    }

    /// Returns configuration that uses custom [`hash_builder`](BuildConf::hash_builder) and [`max_seed`](BuildConf::max_seed).
    pub fn hash_max_seed(hash_builder: S, max_seed: u32) -> Self {
        Self { max_seed, ..Self::hash(hash_builder) }
    }

    /// Returns configuration that uses custom [`hash_builder`](BuildConf::hash_builder), [`max_seed`](BuildConf::max_seed)
    /// and potentially uses [multiple threads](BuildConf::use_multiple_threads) to build [`Function`](crate::Function).
    pub fn hash_max_seed_mt(hash_builder: S, max_seed: u32, use_multiple_threads: bool) -> Self {
        Self { max_seed, use_multiple_threads, ..Self::hash(hash_builder) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let conf: BuildConf = BuildConf::default();
        assert_eq!(conf.max_seed, u32::MAX);
        assert!(conf.check_duplicates);
        assert!(conf.use_multiple_threads);
        let conf = BuildConf::max_seed_unchecked(10);
        assert_eq!(conf.max_seed, 10);
        assert!(!conf.check_duplicates);
        assert!(!BuildConf::mt(false).use_multiple_threads);
    }
}

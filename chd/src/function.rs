use std::hash::Hash;
use std::io;

use binout::{AsIs, Serializer, VByte};
use dyn_size_of::GetSize;
use seedable_hash::{BuildDefaultSeededHasher, BuildSeededHasher};

use crate::stats::BuildStatsCollector;
use crate::utils::{hash32, next_pow2};
use crate::{builder, BuildConf, BuildError, MAX_KEYS};

fn invalid_data(msg: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Minimal perfect hash function built with the CHD (*Hash, Displace, and Compress*) algorithm.
///
/// Keys are split into buckets by their first hash. For each bucket (from the largest one),
/// the smallest seed that places all its keys into free slots of level-1 is searched for and
/// stored in level-0. Evaluation costs two hash calculations and a single level-0 access.
///
/// Values are in the range `[0, output_range())`, where [`output_range`](Function::output_range)
/// is the smallest power of two not less than the number of keys.
///
/// See: D. Belazzougui, F.C. Botelho, M. Dietzfelbinger, *Hash, displace, and compress*, ESA 2009
#[derive(Clone)]
pub struct Function<S = BuildDefaultSeededHasher> {
    level0: Box<[u32]>,
    level1: Box<[u32]>,
    level0_mask: u32,
    level1_mask: u32,
    len: u32,
    hash_builder: S,
}

impl<S> GetSize for Function<S> {
    fn size_bytes_dyn(&self) -> usize { self.level0.size_bytes_dyn() + self.level1.size_bytes_dyn() }
    fn size_bytes_content_dyn(&self) -> usize { self.level0.size_bytes_content_dyn() + self.level1.size_bytes_content_dyn() }
    const USES_DYN_MEM: bool = true;
}

impl<S> Function<S> {
    fn from_tables(level0: Box<[u32]>, level1: Box<[u32]>, len: usize, hash_builder: S) -> Self {
        Self {
            level0_mask: (level0.len() - 1) as u32,
            level1_mask: (level1.len() - 1) as u32,
            level0,
            level1,
            len: len as u32,
            hash_builder,
        }
    }

    /// Returns the number of keys in the input collection given during construction.
    #[inline] pub fn len(&self) -> usize { self.len as usize }

    /// Returns `true` if the function was built for an empty collection of keys.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the number of values the function can return, equal to the size of level-1.
    #[inline] pub fn output_range(&self) -> usize { self.level1.len() }

    /// Returns level-0: the seed of each bucket (`0` for empty buckets).
    #[inline] pub fn level0(&self) -> &[u32] { &self.level0 }

    /// Returns level-1: index (in the input) of the key assigned to each slot.
    /// Slots not assigned to any key contain `0`.
    #[inline] pub fn level1(&self) -> &[u32] { &self.level1 }

    #[inline] pub fn level0_mask(&self) -> u32 { self.level0_mask }

    #[inline] pub fn level1_mask(&self) -> u32 { self.level1_mask }

    /// Returns the hash family used by `self`.
    #[inline] pub fn hash_builder(&self) -> &S { &self.hash_builder }

    /// Returns number of bytes which `write` will write.
    pub fn write_bytes(&self) -> usize {
        VByte::size(self.len as usize) + AsIs::array_content_size(&self.level0) + AsIs::array_content_size(&self.level1)
    }

    /// Writes `self` to the `output`. The hash family is not written.
    pub fn write(&self, output: &mut dyn io::Write) -> io::Result<()> {
        VByte::write(output, self.len as usize)?;
        AsIs::write_all(output, self.level0.iter())?;
        AsIs::write_all(output, self.level1.iter())
    }

    /// Reads `Self` from the `input`. `hasher` must be the same as the one used to write.
    pub fn read_with_hasher(input: &mut dyn io::Read, hasher: S) -> io::Result<Self> {
        let len: usize = VByte::read(input)?;
        if len > MAX_KEYS { return Err(invalid_data("too many keys")); }
        let level0: Box<[u32]> = AsIs::read_n(input, next_pow2(len / 3))?;
        let level1: Box<[u32]> = AsIs::read_n(input, next_pow2(len))?;
        if level1.iter().any(|&i| i as usize >= len.max(1)) {
            return Err(invalid_data("level-1 contains index of a key outside the input"));
        }
        Ok(Self::from_tables(level0, level1, len, hasher))
    }
}

impl<S: BuildSeededHasher> Function<S> {
    /// Returns the value assigned to the given `key`, in the range `[0, output_range())`.
    ///
    /// If the `key` was not in the input key collection given during construction,
    /// an undetermined value from this range is returned.
    #[inline]
    pub fn get<K: Hash + ?Sized>(&self, key: &K) -> u32 {
        let bucket = hash32(&self.hash_builder, key, 0) & self.level0_mask;
        let seed = self.level0[bucket as usize];
        hash32(&self.hash_builder, key, seed) & self.level1_mask
    }

    /// Returns index of the `key` in the input key collection given during construction.
    ///
    /// If the `key` was not in the collection, an undetermined index is returned
    /// (from `[0, len())` if the collection was not empty).
    /// The caller can detect this case by comparing the `key` with the key stored under the index.
    #[inline]
    pub fn index<K: Hash + ?Sized>(&self, key: &K) -> u32 {
        self.level1[self.get(key) as usize]
    }
}

impl<S: BuildSeededHasher + Sync> Function<S> {
    /// Constructs [`Function`] for given `keys`, using the build configuration `conf` and reporting statistics with `stats`.
    ///
    /// Fails if the `keys` contain duplicates or some bucket cannot be placed with any allowed seed.
    pub fn try_with_conf_stats<K, BS>(keys: &[K], conf: BuildConf<S>, stats: &mut BS) -> Result<Self, BuildError>
        where K: Hash + Eq + Sync, BS: BuildStatsCollector
    {
        let (level0, level1) = builder::build(keys, &conf, stats)?;
        Ok(Self::from_tables(level0, level1, keys.len(), conf.hash_builder))
    }

    /// Constructs [`Function`] for given `keys`, using the build configuration `conf`.
    #[inline] pub fn try_with_conf<K>(keys: &[K], conf: BuildConf<S>) -> Result<Self, BuildError>
        where K: Hash + Eq + Sync
    {
        Self::try_with_conf_stats(keys, conf, &mut ())
    }

    /// Constructs [`Function`] for given `keys`, using the build configuration `conf` and reporting statistics with `stats`.
    ///
    /// Panics if the construction fails.
    pub fn with_conf_stats<K, BS>(keys: &[K], conf: BuildConf<S>, stats: &mut BS) -> Self
        where K: Hash + Eq + Sync, BS: BuildStatsCollector
    {
        match Self::try_with_conf_stats(keys, conf, stats) {
            Ok(f) => f,
            Err(e) => panic!("Constructing chd::Function failed: {}", e)
        }
    }

    /// Constructs [`Function`] for given `keys`, using the build configuration `conf`.
    ///
    /// Panics if the construction fails.
    #[inline] pub fn with_conf<K>(keys: &[K], conf: BuildConf<S>) -> Self
        where K: Hash + Eq + Sync
    {
        Self::with_conf_stats(keys, conf, &mut ())
    }
}

impl Function {
    /// Reads `Self` from the `input`.
    /// Only [`Function`]s that use default hasher can be read by this method.
    pub fn read(input: &mut dyn io::Read) -> io::Result<Self> {
        Self::read_with_hasher(input, Default::default())
    }

    /// Constructs [`Function`] for given `keys`, using the default configuration.
    pub fn try_new<K: Hash + Eq + Sync>(keys: &[K]) -> Result<Self, BuildError> {
        Self::try_with_conf_stats(keys, Default::default(), &mut ())
    }

    /// Builds [`Function`] for given `keys`, reporting statistics with `stats`.
    ///
    /// Panics if the construction fails.
    pub fn with_stats<K, BS>(keys: &[K], stats: &mut BS) -> Self
        where K: Hash + Eq + Sync, BS: BuildStatsCollector
    {
        Self::with_conf_stats(keys, Default::default(), stats)
    }

    /// Builds [`Function`] for given `keys`.
    ///
    /// Panics if the construction fails, which happens if the `keys` contain duplicates.
    pub fn new<K: Hash + Eq + Sync>(keys: &[K]) -> Self {
        Self::with_conf_stats(keys, Default::default(), &mut ())
    }
}

impl<K: Hash + Eq + Sync> From<&[K]> for Function {
    fn from(keys: &[K]) -> Self {
        Self::new(keys)
    }
}

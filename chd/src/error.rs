use thiserror::Error;

/// The maximum number of keys for which [`Function`](crate::Function) can be built.
///
/// Level-1 table, of size being the smallest power of two not less than the number of keys,
/// must be indexable by 32-bit values.
pub const MAX_KEYS: usize = 1 << 31;

/// Reasons why constructing [`Function`](crate::Function) fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No seed in `0..=max_seed` places the keys of the bucket into free slots.
    /// Either the hash family is unsuitable for the keys, or they contain duplicates that were not checked.
    #[error("no seed in 0..={max_seed} places the {bucket_size} keys of bucket {bucket} without collisions")]
    DisplacementExhausted { bucket: usize, bucket_size: usize, max_seed: u32 },

    /// Keys at the given indices of the input are equal.
    #[error("keys at indices {first} and {second} are equal")]
    DuplicateKey { first: usize, second: usize },

    /// The input consists of more than [`MAX_KEYS`] keys.
    #[error("{0} keys given, but at most {max} are supported", max = MAX_KEYS)]
    TooManyKeys(usize),

    /// Numbers of keys and values given to [`Map`](crate::Map) constructor differ.
    #[error("{keys} keys and {values} values given")]
    LengthMismatch { keys: usize, values: usize },
}

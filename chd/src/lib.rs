#![doc = include_str!("../README.md")]

pub mod utils;
pub mod stats;

mod conf;
pub use conf::BuildConf;

mod error;
pub use error::{BuildError, MAX_KEYS};

mod builder;

mod function;
pub use function::Function;

mod map;
pub use map::Map;

pub use seedable_hash::{BuildSeededHasher, Seedable, BuildDefaultSeededHasher};
pub use dyn_size_of::GetSize;

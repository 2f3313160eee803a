use std::fmt::{Display, Formatter};

use chd::stats::SeedStats;

/// Average (per key) lookup time in seconds.
pub struct SearchStats {
    pub avg_lookup_time: f64,
}

impl SearchStats {
    pub fn nan() -> Self {
        Self { avg_lookup_time: f64::NAN }
    }
}

/// Building statistics
pub struct BuildStats {
    /// Construction time in seconds
    pub time: f64,
    /// Whether multiple threads were allowed
    pub multiple_threads: bool,
    pub seeds: SeedStats,
}

impl Display for BuildStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "build time [ms] {}: {:.0}", if self.multiple_threads { "MT" } else { "ST" }, self.time * 1_000.0)?;
        write!(f, "\tseeds tried per bucket: {:.2}\tlargest seed: {}\tlargest bucket: {}",
            self.seeds.avg_trials(), self.seeds.largest_seed, self.seeds.largest_bucket)
    }
}

/// All statistics/results.
pub struct BenchmarkResult {
    pub included: SearchStats,
    pub absent: SearchStats,
    pub size_bytes: usize,
    pub bits_per_value: f64,
    /// Fraction of the range of values assigned to keys
    pub load_factor: f64,
    pub build: BuildStats,
}

impl Display for BenchmarkResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "size [bits/key]: {:.2}\tload factor: {:.3}", self.bits_per_value, self.load_factor)?;
        if !self.included.avg_lookup_time.is_nan() {
            write!(f, "\tlookup time [ns]: {:.0}", self.included.avg_lookup_time * 1_000_000_000.0)?;
        }
        if !self.absent.avg_lookup_time.is_nan() {
            write!(f, "\tforeign lookup time [ns]: {:.0}", self.absent.avg_lookup_time * 1_000_000_000.0)?;
        }
        write!(f, "\n{}", self.build)
    }
}

/// Describes number of keys and their average size, or returns [`None`] if there are no keys.
pub fn input_stats<K: AsRef<[u8]>>(name: &str, keys: &[K]) -> Option<String> {
    if keys.is_empty() { return None; }
    let total: usize = keys.iter().map(|k| k.as_ref().len()).sum();
    Some(format!("{} consists of {} keys of average size {:.1} bytes", name, keys.len(), total as f64 / keys.len() as f64))
}

/// Prints number of keys and their average size. Prints nothing for empty `keys`.
pub fn print_input_stats<K: AsRef<[u8]>>(name: &str, keys: &[K]) {
    if let Some(line) = input_stats(name, keys) { println!("{}", line); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_stats() {
        assert_eq!(input_stats("foreign key set", &Vec::<Vec<u8>>::new()), None);
        assert_eq!(input_stats("key set", &[b"ab".to_vec(), b"abcd".to_vec()]).as_deref(),
            Some("key set consists of 2 keys of average size 3.0 bytes"));
    }
}

//! Collecting statistics during construction.

use std::io::Write;

/// Trait for collecting (and summarizing or reporting) events during construction of [`Function`](crate::Function).
pub trait BuildStatsCollector {
    /// Called once the keys are split into buckets.
    #[inline(always)] fn partitioned(&mut self, _keys: usize, _level0_size: usize, _level1_size: usize, _non_empty_buckets: usize) {}

    /// Called when keys of the bucket with given index and size are placed using `seed`.
    #[inline(always)] fn bucket_solved(&mut self, _bucket: usize, _bucket_size: usize, _seed: u32) {}

    /// Called when no allowed seed places the keys of the bucket. The construction is aborted just after.
    #[inline(always)] fn bucket_failed(&mut self, _bucket: usize, _bucket_size: usize) {}

    /// Called when all buckets are placed.
    #[inline(always)] fn end(&mut self) {}
}

impl BuildStatsCollector for () {}

impl<BS: BuildStatsCollector + ?Sized> BuildStatsCollector for &mut BS {
    #[inline] fn partitioned(&mut self, keys: usize, level0_size: usize, level1_size: usize, non_empty_buckets: usize) {
        (**self).partitioned(keys, level0_size, level1_size, non_empty_buckets)
    }
    #[inline] fn bucket_solved(&mut self, bucket: usize, bucket_size: usize, seed: u32) {
        (**self).bucket_solved(bucket, bucket_size, seed)
    }
    #[inline] fn bucket_failed(&mut self, bucket: usize, bucket_size: usize) {
        (**self).bucket_failed(bucket, bucket_size)
    }
    #[inline] fn end(&mut self) { (**self).end() }
}

/// Reports each event to both collectors.
impl<A: BuildStatsCollector, B: BuildStatsCollector> BuildStatsCollector for (A, B) {
    #[inline] fn partitioned(&mut self, keys: usize, level0_size: usize, level1_size: usize, non_empty_buckets: usize) {
        self.0.partitioned(keys, level0_size, level1_size, non_empty_buckets);
        self.1.partitioned(keys, level0_size, level1_size, non_empty_buckets);
    }
    #[inline] fn bucket_solved(&mut self, bucket: usize, bucket_size: usize, seed: u32) {
        self.0.bucket_solved(bucket, bucket_size, seed);
        self.1.bucket_solved(bucket, bucket_size, seed);
    }
    #[inline] fn bucket_failed(&mut self, bucket: usize, bucket_size: usize) {
        self.0.bucket_failed(bucket, bucket_size);
        self.1.bucket_failed(bucket, bucket_size);
    }
    #[inline] fn end(&mut self) {
        self.0.end();
        self.1.end();
    }
}

/// Writes one line to the given writer for each construction event.
///
/// Panics if writing fails.
pub struct BuildStatsPrinter<W: Write = std::io::Stdout> {
    writer: W,
}

impl BuildStatsPrinter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self { writer: std::io::stdout() }
    }
}

impl<W: Write> BuildStatsPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write> BuildStatsCollector for BuildStatsPrinter<W> {
    fn partitioned(&mut self, keys: usize, level0_size: usize, level1_size: usize, non_empty_buckets: usize) {
        writeln!(self.writer, "partitioned {} {} {} {}", keys, level0_size, level1_size, non_empty_buckets).unwrap();
    }

    fn bucket_solved(&mut self, bucket: usize, bucket_size: usize, seed: u32) {
        writeln!(self.writer, "solved {} {} {}", bucket, bucket_size, seed).unwrap();
    }

    fn bucket_failed(&mut self, bucket: usize, bucket_size: usize) {
        writeln!(self.writer, "failed {} {}", bucket, bucket_size).unwrap();
    }

    fn end(&mut self) {
        writeln!(self.writer, "end").unwrap();
    }
}

/// Summarizes the seed search.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedStats {
    /// Number of placed buckets.
    pub buckets: usize,
    /// Number of keys in placed buckets.
    pub keys: usize,
    /// Total number of seeds tried by placed buckets.
    pub trials: u64,
    /// The largest seed chosen.
    pub largest_seed: u32,
    /// Size of the largest bucket.
    pub largest_bucket: usize,
}

impl SeedStats {
    /// Returns average number of seeds tried per bucket.
    pub fn avg_trials(&self) -> f64 {
        self.trials as f64 / self.buckets as f64
    }
}

impl BuildStatsCollector for SeedStats {
    fn bucket_solved(&mut self, _bucket: usize, bucket_size: usize, seed: u32) {
        self.buckets += 1;
        self.keys += bucket_size;
        self.trials += seed as u64 + 1;
        self.largest_seed = self.largest_seed.max(seed);
        self.largest_bucket = self.largest_bucket.max(bucket_size);
    }
}

/// Reports construction events with [`tracing`].
#[cfg(feature = "tracing")]
#[derive(Default, Clone, Copy)]
pub struct BuildStatsTracer;

#[cfg(feature = "tracing")]
impl BuildStatsCollector for BuildStatsTracer {
    fn partitioned(&mut self, keys: usize, level0_size: usize, level1_size: usize, non_empty_buckets: usize) {
        tracing::info!(keys, level0_size, level1_size, non_empty_buckets, "keys partitioned into buckets");
    }

    fn bucket_solved(&mut self, bucket: usize, bucket_size: usize, seed: u32) {
        tracing::debug!(bucket, bucket_size, seed, "bucket placed");
    }

    fn bucket_failed(&mut self, bucket: usize, bucket_size: usize) {
        tracing::warn!(bucket, bucket_size, "no seed places the bucket");
    }

    fn end(&mut self) {
        tracing::info!("all buckets placed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printer() {
        let mut p = BuildStatsPrinter::new(Vec::new());
        p.partitioned(3, 1, 4, 1);
        p.bucket_solved(0, 3, 2);
        p.end();
        assert_eq!(String::from_utf8(p.into_inner()).unwrap(), "partitioned 3 1 4 1\nsolved 0 3 2\nend\n");
    }

    #[test]
    fn test_pair() {
        let mut s = SeedStats::default();
        let mut pair = (&mut s, BuildStatsPrinter::new(Vec::new()));
        pair.bucket_solved(1, 2, 3);
        assert_eq!(String::from_utf8(pair.1.into_inner()).unwrap(), "solved 1 2 3\n");
        assert_eq!(s.buckets, 1);
    }

    #[test]
    fn test_seed_stats() {
        let mut s = SeedStats::default();
        s.bucket_solved(5, 3, 0);
        s.bucket_solved(1, 1, 9);
        assert_eq!(s, SeedStats { buckets: 2, keys: 4, trials: 11, largest_seed: 9, largest_bucket: 3 });
        assert_eq!(s.avg_trials(), 5.5);
    }

    #[test]
    fn test_printer_failed() {
        let mut p = BuildStatsPrinter::new(Vec::new());
        p.bucket_failed(7, 2);
        assert_eq!(String::from_utf8(p.into_inner()).unwrap(), "failed 7 2\n");
    }

    #[test]
    #[should_panic]
    fn test_printer_write_error() {
        let mut buff = [0u8; 4];
        let mut p = BuildStatsPrinter::new(&mut buff[..]);
        p.partitioned(1000, 512, 1024, 400);
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_tracer() {
        let keys = (0..500u32).collect::<Vec<_>>();
        let mut stats = (SeedStats::default(), BuildStatsTracer);
        let f = crate::Function::with_stats(&keys, &mut stats);
        assert_eq!(stats.0.keys, keys.len());
        assert_eq!(stats.0.largest_seed, *f.level0().iter().max().unwrap());
    }
}

use std::{fmt::Debug, hash::Hash, hint::black_box, time::Instant};

use bitm::{BitAccess, BitVec};
use chd::{stats::SeedStats, BuildConf, BuildError, Function, GetSize};
use cpu_time::{ProcessTime, ThreadTime};

use crate::{BenchmarkResult, BuildStats, Conf, SearchStats};

#[inline(never)]
fn check_key<K: Debug>(f: &Function, seen: &mut [u64], key: &K, value: u32, index: usize) {
    assert!((value as usize) < f.output_range(), "CHD assigns too large value to {:?}: {}>={}.", key, value, f.output_range());
    assert!(!seen.get_bit(value as usize), "CHD assigns {} to {:?} and some other key of the input.", value, key);
    assert_eq!(f.level1()[value as usize] as usize, index, "CHD does not recover the index of {:?}.", key);
    seen.set_bit(value as usize);
}

/// Builds the function `conf.build_runs` times and measures the average time of building.
pub fn benchmark_build<K>(keys: &[K], conf: &Conf) -> Result<(Function, BuildStats), BuildError>
    where K: Hash + Eq + Sync
{
    let build_conf = || BuildConf { max_seed: conf.max_seed, ..BuildConf::mt(conf.multiple_threads) };
    let mut seeds = SeedStats::default();
    #[cfg(feature = "tracing")] let mut stats = (&mut seeds, chd::stats::BuildStatsTracer);
    #[cfg(not(feature = "tracing"))] let mut stats = &mut seeds;
    let (f, time) = if conf.multiple_threads {
        let start_moment = Instant::now();
        for _ in 1..conf.build_runs { Function::try_with_conf(keys, build_conf())?; }
        let f = Function::try_with_conf_stats(keys, build_conf(), &mut stats)?;
        (f, start_moment.elapsed().as_secs_f64())
    } else {
        let start_moment = ThreadTime::now();
        for _ in 1..conf.build_runs { Function::try_with_conf(keys, build_conf())?; }
        let f = Function::try_with_conf_stats(keys, build_conf(), &mut stats)?;
        (f, start_moment.elapsed().as_secs_f64())
    };
    Ok((f, BuildStats { time: time / conf.build_runs as f64, multiple_threads: conf.multiple_threads, seeds }))
}

/// Looks up all `keys` `lookup_runs` times and returns search statistics.
/// If `verify` is `true`, checks whether `f` is valid for `keys`.
pub fn benchmark_lookup<K: Hash + Debug>(f: &Function, keys: &[K], verify: bool, lookup_runs: u32) -> SearchStats {
    if verify {
        let mut seen = Box::<[u64]>::with_zeroed_bits(f.output_range());
        for (index, key) in keys.iter().enumerate() {
            check_key(f, &mut seen, key, f.get(key), index);
        }
    }
    if keys.is_empty() || lookup_runs == 0 { return SearchStats::nan(); }
    let start_process_moment = ProcessTime::now();
    for _ in 0..lookup_runs {
        for key in keys { black_box(f.get(key)); }
    }
    let seconds = start_process_moment.elapsed().as_secs_f64();
    SearchStats { avg_lookup_time: seconds / (keys.len() as f64 * lookup_runs as f64) }
}

/// Builds and tests the function.
pub fn benchmark<K>(i: &(Vec<K>, Vec<K>), conf: &Conf) -> Result<BenchmarkResult, BuildError>
    where K: Hash + Eq + Sync + Debug
{
    let (f, build) = benchmark_build(&i.0, conf)?;
    let size_bytes = f.size_bytes();
    let included = benchmark_lookup(&f, &i.0, conf.verify, conf.lookup_runs);
    let absent = benchmark_lookup(&f, &i.1, false, conf.lookup_runs);
    Ok(BenchmarkResult {
        included,
        absent,
        size_bytes,
        bits_per_value: 8.0 * size_bytes as f64 / i.0.len() as f64,
        load_factor: i.0.len() as f64 / f.output_range() as f64,
        build
    })
}

#![doc = include_str!("../README.md")]

mod benchmark;
use benchmark::benchmark;

mod stats;
pub use stats::{SearchStats, BuildStats, BenchmarkResult, print_input_stats};

mod inout;
use inout::{RawLines, gen_data};

use butils::{XorShift32, XorShift64};
use clap::{Parser, ValueEnum};
use std::hash::Hash;
use std::fmt::Debug;

#[allow(non_camel_case_types)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum KeySource {
    /// Generate 32 bit keys with xor-shift 32
    xs32,
    /// Generate 64 bit keys with xor-shift 64
    xs64,
    /// Standard input, separated by newlines (0xA or 0xD, 0xA bytes)
    stdin,
    /// Standard input, zero-separated
    stdinz
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// CHD minimal perfect hashing benchmark.
pub struct Conf {
    /// Number of times to perform the lookup test
    #[arg(short='l', long, default_value_t = 1)]
    pub lookup_runs: u32,

    /// Number of times to perform the construction
    #[arg(short='b', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub build_runs: u32,

    /// Whether to check the validity of built function
    #[arg(short='v', long, default_value_t = false)]
    pub verify: bool,

    #[arg(short='s', long, value_enum, default_value_t = KeySource::stdin)]
    pub key_source: KeySource,

    /// The number of random keys to use or maximum number of keys to read from stdin
    #[arg(short='n', long)]
    pub keys_num: Option<usize>,

    /// Number of foreign keys (to generate or read) used to test lookup of keys outside the input
    #[arg(short='f', long, default_value_t = 0)]
    pub foreign_keys_num: usize,

    /// The largest seed tried for each bucket
    #[arg(short='m', long, default_value_t = u32::MAX)]
    pub max_seed: u32,

    /// Whether to hash keys into buckets using multiple threads
    #[arg(short='t', long, default_value_t = false)]
    pub multiple_threads: bool,
}

fn run<K: Hash + Eq + Sync + Debug>(conf: &Conf, i: &(Vec<K>, Vec<K>)) {
    println!("CHD: results...");
    match benchmark(i, conf) {
        Ok(result) => println!("{}", result),
        Err(e) => eprintln!("Constructing CHD failed: {}", e)
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    #[cfg(feature = "tracing")] init_tracing();
    let conf: Conf = Conf::parse();
    if conf.multiple_threads {
        println!("multi-threaded hashing uses {} threads (to set by the RAYON_NUM_THREADS environment variable)", rayon::current_num_threads());
    }
    println!("build and lookup times are averaged over {} and {} runs, respectively", conf.build_runs, conf.lookup_runs);
    match conf.key_source {
        KeySource::xs32 | KeySource::xs64 => {
            let Some(keys_num) = conf.keys_num else {
                eprintln!("The number of keys (-n) must be given for generated keys.");
                std::process::exit(1);
            };
            if conf.key_source == KeySource::xs32 {
                run(&conf, &gen_data(keys_num, conf.foreign_keys_num, XorShift32(1234)));
            } else {
                run(&conf, &gen_data(keys_num, conf.foreign_keys_num, XorShift64(1234)));
            }
        },
        KeySource::stdin|KeySource::stdinz => {
            let lines = if conf.key_source == KeySource::stdin {
                RawLines::separated_by_newlines(std::io::stdin().lock())
            } else {
                RawLines::separated_by_zeros(std::io::stdin().lock())
            };
            let lines = match lines.collect::<std::io::Result<Vec<_>>>() {
                Ok(lines) => lines,
                Err(e) => {
                    eprintln!("Reading keys failed: {}", e);
                    std::process::exit(1);
                }
            };
            let i = if let Some(keys_num) = conf.keys_num {
                gen_data(keys_num, conf.foreign_keys_num, lines.into_iter())
            } else {
                (lines, Vec::new())
            };
            print_input_stats("key set", &i.0);
            print_input_stats("foreign key set", &i.1);
            run(&conf, &i);
        }
    };
}

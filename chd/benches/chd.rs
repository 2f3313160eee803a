use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use chd::{BuildConf, Function};

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("benchmark key {}", i)).collect()
}

pub fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for n in [1_000, 100_000] {
        let keys = keys(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| Function::with_conf(keys, BuildConf::mt(false)))
        });
    }
    group.finish();
}

pub fn get(c: &mut Criterion) {
    let keys = keys(100_000);
    let f = Function::new(&keys);
    let mut group = c.benchmark_group("get");
    for key in [&keys[0], &keys[5_000], &keys[99_999]] {
        group.bench_with_input(BenchmarkId::from_parameter(key), key, |b, key| {
            b.iter(|| f.get(key))
        });
    }
    group.finish();
}

criterion_group!(benches, build, get);
criterion_main!(benches);

use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    apply_runtime_config_for, default_rng, keys_with_duplicates, nearly_sorted_keys, tag_positions,
};
use blockmerge::{all_strategies, budget_for, merge_by, sort_by_key, strategy_name};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

const BENCH_SIZES: [usize; 4] = [4096, 16384, 65536, 262144];

#[derive(Clone, Copy)]
enum Distribution {
    RandomUniform,
    HalfDuplicates,
    NearlySorted1pctSwaps,
}

impl Distribution {
    fn label(self) -> &'static str {
        match self {
            Self::RandomUniform => "random_uniform",
            Self::HalfDuplicates => "half_duplicates",
            Self::NearlySorted1pctSwaps => "nearly_sorted_1pct_swaps",
        }
    }
}

const DISTRIBUTIONS: [Distribution; 3] = [
    Distribution::RandomUniform,
    Distribution::HalfDuplicates,
    Distribution::NearlySorted1pctSwaps,
];

fn generate_dataset(dist: Distribution, size: usize) -> Vec<(u32, u32)> {
    let mut rng = default_rng();
    let keys = match dist {
        Distribution::RandomUniform => keys_with_duplicates(&mut rng, size, 0.0),
        Distribution::HalfDuplicates => keys_with_duplicates(&mut rng, size, 0.5),
        Distribution::NearlySorted1pctSwaps => {
            nearly_sorted_keys(&mut rng, size, (size / 100).max(1))
        }
    };
    tag_positions(&keys)
}

fn time_iters(
    iters: u64,
    base: &[(u32, u32)],
    mut run: impl FnMut(&mut [(u32, u32)]),
) -> Duration {
    let mut total = Duration::ZERO;
    for _ in 0..iters {
        let mut data = base.to_vec();
        let start = Instant::now();
        run(&mut data);
        total += start.elapsed();
        black_box(&data);
    }
    total
}

fn bench_sort(c: &mut Criterion) {
    for &dist in &DISTRIBUTIONS {
        let mut group = c.benchmark_group(format!("blockmerge/sort/{}", dist.label()));

        for &size in &BENCH_SIZES {
            apply_runtime_config_for(&mut group, size);
            let base = generate_dataset(dist, size);

            for &strategy in all_strategies() {
                let Some(budget) = budget_for(size, strategy) else {
                    continue;
                };
                group.bench_function(BenchmarkId::new(strategy_name(strategy), size), |bencher| {
                    bencher.iter_custom(|iters| {
                        time_iters(iters, &base, |data| sort_by_key(data, budget, |p| p.0))
                    });
                });
            }

            group.bench_function(BenchmarkId::new("std_stable", size), |bencher| {
                bencher.iter_custom(|iters| {
                    time_iters(iters, &base, |data| data.sort_by_key(|p| p.0))
                });
            });
        }

        group.finish();
    }
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("blockmerge/merge/half_duplicates");

    for &size in &BENCH_SIZES {
        apply_runtime_config_for(&mut group, size);
        let mut base = generate_dataset(Distribution::HalfDuplicates, size);
        let mid = size / 2;
        base[..mid].sort_by_key(|p| p.0);
        base[mid..].sort_by_key(|p| p.0);

        for &strategy in all_strategies() {
            let Some(budget) = budget_for(size, strategy) else {
                continue;
            };
            group.bench_function(BenchmarkId::new(strategy_name(strategy), size), |bencher| {
                bencher.iter_custom(|iters| {
                    time_iters(iters, &base, |data| {
                        merge_by(data, mid, budget, |a, b| a.0.cmp(&b.0))
                    })
                });
            });
        }
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("blockmerge/par_sort/half_duplicates");

    for &size in &BENCH_SIZES[2..] {
        apply_runtime_config_for(&mut group, size);
        let base = generate_dataset(Distribution::HalfDuplicates, size);

        for &strategy in all_strategies() {
            let Some(budget) = budget_for(size, strategy) else {
                continue;
            };
            group.bench_function(BenchmarkId::new(strategy_name(strategy), size), |bencher| {
                bencher.iter_custom(|iters| {
                    time_iters(iters, &base, |data| {
                        blockmerge::par_sort_by(data, budget, |a, b| a.0.cmp(&b.0))
                    })
                });
            });
        }
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_parallel(_c: &mut Criterion) {}

criterion_group!(benches, bench_sort, bench_merge, bench_parallel);
criterion_main!(benches);

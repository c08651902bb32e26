use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const LARGE_RUNTIME_SAMPLE_SIZE: usize = 10;
const LARGE_RUNTIME_WARM_UP_MS: u64 = 800;
const LARGE_RUNTIME_MEASURE_MS: u64 = 1500;
const RNG_SEED: u64 = 0x5EED_2026;

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

pub fn apply_large_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(LARGE_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(LARGE_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(LARGE_RUNTIME_MEASURE_MS));
}

pub fn apply_runtime_config_for<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, size: usize) {
    if size <= 1 << 14 {
        apply_small_runtime_config(group);
    } else if size <= 1 << 16 {
        apply_medium_runtime_config(group);
    } else {
        apply_large_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// `len` keys where each position repeats an earlier key with probability `duplicate_rate`.
pub fn keys_with_duplicates<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    duplicate_rate: f64,
) -> Vec<u32> {
    let mut keys = Vec::with_capacity(len);
    for i in 0..len {
        let key = if i > 0 && rng.random_bool(duplicate_rate) {
            keys[rng.random_range(0..i)]
        } else {
            rng.random::<u32>()
        };
        keys.push(key);
    }
    keys
}

pub fn nearly_sorted_keys<R: Rng + ?Sized>(rng: &mut R, len: usize, swaps: usize) -> Vec<u32> {
    let mut keys: Vec<u32> = (0..len as u32).collect();
    if len > 0 {
        for _ in 0..swaps {
            let a = rng.random_range(0..len);
            let b = rng.random_range(0..len);
            keys.swap(a, b);
        }
    }
    keys
}

/// Pair every key with its position, so stability can be checked after sorting by key.
pub fn tag_positions(keys: &[u32]) -> Vec<(u32, u32)> {
    keys.iter()
        .enumerate()
        .map(|(i, &k)| (k, i as u32))
        .collect()
}

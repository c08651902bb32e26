//! Stable block-merge sorting with a caller-chosen bound on extra memory.

pub mod bit_array;
pub mod blocks;
mod engine;
pub mod merge;
pub mod observe;
#[cfg(feature = "parallel")]
mod parallel;
mod params;
mod plan;
pub mod rotate;
mod runs;
pub mod scratch;
pub mod search;

use std::cmp::Ordering;

pub use observe::{NoopObserver, Observer, OpCounts};
#[cfg(feature = "parallel")]
pub use parallel::{par_sort, par_sort_by};
pub use params::{DEFAULT_PARAMS, MAX_RUN_LEN, ParamsError, SortParams};
pub use plan::{ALL_STRATEGIES, Plan, Strategy, block_len_for, budget_for, plan, strategy_name};

use observe::Access;

pub fn all_strategies() -> &'static [Strategy] {
    &ALL_STRATEGIES
}

pub fn sort<T: Ord>(v: &mut [T], budget: usize) {
    sort_by(v, budget, T::cmp);
}

pub fn sort_by<T, F>(v: &mut [T], budget: usize, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut acc = Access::new(
        |a: &T, b: &T| compare(a, b) == Ordering::Less,
        NoopObserver,
    );
    engine::sort(v, budget, &DEFAULT_PARAMS, &mut acc);
}

pub fn sort_by_key<T, K, F>(v: &mut [T], budget: usize, mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_by(v, budget, |a, b| key(a).cmp(&key(b)));
}

/// Sort with explicit tuning and an observer that sees every comparison and element move.
pub fn sort_with<T, F, O>(
    v: &mut [T],
    budget: usize,
    params: &SortParams,
    is_less: F,
    observer: O,
) -> Result<O, ParamsError>
where
    F: FnMut(&T, &T) -> bool,
    O: Observer,
{
    params.validate()?;
    let mut acc = Access::new(is_less, observer);
    engine::sort(v, budget, params, &mut acc);
    Ok(acc.into_observer())
}

/// Merge the sorted runs `v[..mid]` and `v[mid..]` in place, stably, within `budget`.
///
/// # Panics
///
/// Panics if `mid > v.len()`.
pub fn merge_by<T, F>(v: &mut [T], mid: usize, budget: usize, mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut acc = Access::new(
        |a: &T, b: &T| compare(a, b) == Ordering::Less,
        NoopObserver,
    );
    engine::merge(v, mid, budget, &DEFAULT_PARAMS, &mut acc);
}

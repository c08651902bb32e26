use std::cmp::Ordering;

use rayon::prelude::*;

use crate::engine;
use crate::observe::{Access, NoopObserver};
use crate::params::DEFAULT_PARAMS;

const MIN_CHUNK_LEN: usize = 1 << 12;

/// Stable sort on the rayon pool.
pub fn par_sort_by<T, F>(v: &mut [T], budget: usize, compare: F)
where
    T: Send,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    let n = v.len();
    let chunk_len = n
        .div_ceil(rayon::current_num_threads())
        .max(MIN_CHUNK_LEN);
    let less = |a: &T, b: &T| compare(a, b) == Ordering::Less;

    if chunk_len >= n {
        engine::sort(v, budget, &DEFAULT_PARAMS, &mut Access::new(less, NoopObserver));
        return;
    }

    v.par_chunks_mut(chunk_len).for_each(|chunk| {
        engine::sort(chunk, budget, &DEFAULT_PARAMS, &mut Access::new(less, NoopObserver));
    });

    let mut width = chunk_len;
    while width < n {
        v.par_chunks_mut(2 * width).for_each(|pair| {
            if pair.len() > width {
                let mut acc = Access::new(less, NoopObserver);
                engine::merge(pair, width, budget, &DEFAULT_PARAMS, &mut acc);
            }
        });
        width *= 2;
    }
}

pub fn par_sort<T: Ord + Send>(v: &mut [T], budget: usize) {
    par_sort_by(v, budget, T::cmp);
}

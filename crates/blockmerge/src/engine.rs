use std::mem;

use log::{debug, trace};

use crate::bit_array::{BitArray, bits_for};
use crate::blocks::block_merge;
use crate::merge::{merge_buffered, merge_in_place};
use crate::observe::{Access, Less, Observer};
use crate::params::SortParams;
use crate::plan::{Plan, Strategy, block_len_for, plan, strategy_name};
use crate::rotate::rotate;
use crate::runs::{Presorted, build_runs, scan};
use crate::scratch::Scratch;
use crate::search::lower_bound;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MergeContext {
    pub strategy: Strategy,
    pub run_len: usize,
    pub block_len: usize,
    pub buffer_len: usize,
    pub key_len: usize,
    pub lazy_merge_len: usize,
    pub min_tagged_blocks: usize,
}

impl MergeContext {
    pub fn new(plan: &Plan, params: &SortParams) -> Self {
        Self {
            strategy: plan.strategy,
            run_len: params.run_len,
            block_len: plan.block_len,
            buffer_len: plan.buffer_len,
            key_len: plan.key_len,
            lazy_merge_len: params.lazy_merge_len,
            min_tagged_blocks: params.min_tagged_blocks,
        }
    }
}

pub struct Workspace<T> {
    scratch: Scratch<T>,
    keys: Vec<usize>,
}

impl<T> Workspace<T> {
    pub fn new(ctx: &MergeContext) -> Self {
        Self {
            scratch: Scratch::with_capacity(ctx.buffer_len),
            keys: vec![0; ctx.key_len],
        }
    }
}

fn prepare<T>(n: usize, budget: usize, params: &SortParams) -> (MergeContext, Workspace<T>) {
    let plan = plan(n, budget);
    debug!(
        "planned {n} elements with budget {budget}: {} tier, block length {}, buffer {}, keys {}",
        strategy_name(plan.strategy),
        plan.block_len,
        plan.buffer_len,
        plan.key_len,
    );

    let ctx = MergeContext::new(&plan, params);
    let work = Workspace::new(&ctx);
    (ctx, work)
}

pub fn sort<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    budget: usize,
    params: &SortParams,
    acc: &mut Access<F, O>,
) {
    let n = v.len();
    if n < 2 || mem::size_of::<T>() == 0 {
        return;
    }

    let presorted = scan(v, acc);
    if presorted == Presorted::Sorted {
        trace!("{n} elements already sorted");
        return;
    }

    let (ctx, mut work) = prepare(n, budget, params);
    if let Presorted::TwoRuns(mid) = presorted {
        trace!("{n} elements form two runs split at {mid}");
        merge_pair(v, mid, &ctx, &mut work, acc);
        return;
    }

    build_runs(v, ctx.run_len, acc);
    merge_runs(v, &ctx, &mut work, acc);
}

pub fn merge<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    budget: usize,
    params: &SortParams,
    acc: &mut Access<F, O>,
) {
    assert!(mid <= v.len());
    if mid == 0 || mid == v.len() || mem::size_of::<T>() == 0 {
        return;
    }

    let (ctx, mut work) = prepare(v.len(), budget, params);
    merge_pair(v, mid, &ctx, &mut work, acc);
}

fn merge_runs<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    ctx: &MergeContext,
    work: &mut Workspace<T>,
    acc: &mut Access<F, O>,
) {
    let n = v.len();
    let mut width = ctx.run_len;

    while width < n {
        for pair in v.chunks_mut(2 * width) {
            if pair.len() > width {
                merge_pair(pair, width, ctx, work, acc);
            }
        }
        trace!("merged level of {width}-element runs");
        acc.observer().level(width);
        width *= 2;
    }
}

/// Smallest power of two at least `block_len_for(len)` that cuts `len` elements into no more
/// than `slots` blocks.
fn keyed_block_len(len: usize, slots: usize) -> usize {
    let mut block_len = block_len_for(len);
    while len / block_len > slots {
        block_len *= 2;
    }
    block_len
}

pub fn merge_pair<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    ctx: &MergeContext,
    work: &mut Workspace<T>,
    acc: &mut Access<F, O>,
) {
    let len = v.len();
    if mid == 0 || mid == len || !acc.less(&v[mid], &v[mid - 1]) {
        return;
    }
    if acc.less(&v[len - 1], &v[0]) {
        rotate(v, 0, mid, len, acc);
        return;
    }

    let short = mid.min(len - mid);
    match ctx.strategy {
        _ if short <= ctx.buffer_len => merge_buffered(v, mid, &mut work.scratch, acc),
        Strategy::OutOfPlace | Strategy::Rotation => {
            merge_in_place(v, mid, &mut work.scratch, acc, ctx.lazy_merge_len)
        }
        Strategy::KeyTable => {
            let (tags, origins) = work.keys.split_at_mut(ctx.key_len / 2);
            let block_len = keyed_block_len(len, tags.len());
            debug_assert!(block_len <= ctx.buffer_len);
            block_merge(v, mid, block_len, tags, origins, &mut work.scratch, acc);
        }
        Strategy::BitTags => split_merge(v, mid, ctx, work, acc),
    }
}

/// Split the merge into two independent halves around the median of the left run, then merge
/// each half with tags borrowed from the other.
fn split_merge<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    ctx: &MergeContext,
    work: &mut Workspace<T>,
    acc: &mut Access<F, O>,
) {
    let len = v.len();
    let m1 = mid / 2;
    let m2 = lower_bound(v, mid, len, &v[m1], acc);
    rotate(v, m1, mid, m2, acc);
    let m3 = m1 + (m2 - mid);

    // v[m3..] is still two sorted pieces; lend the longer one to the left half.
    let (left, right) = v.split_at_mut(m3);
    let rest = mid - m1;
    let region = if rest >= right.len() - rest {
        &mut right[..rest]
    } else {
        &mut right[rest..]
    };
    merge_half(left, m1, region, ctx, work, acc);

    let (left, right) = v.split_at_mut(m3);
    merge_half(right, rest, left, ctx, work, acc);
}

fn merge_half<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    region: &mut [T],
    ctx: &MergeContext,
    work: &mut Workspace<T>,
    acc: &mut Access<F, O>,
) {
    let len = v.len();
    if mid == 0 || mid == len || !acc.less(&v[mid], &v[mid - 1]) {
        return;
    }
    if mid.min(len - mid) <= ctx.buffer_len {
        merge_buffered(v, mid, &mut work.scratch, acc);
        return;
    }

    let block_len = block_len_for(len);
    let count = mid / block_len + (len - mid) / block_len;
    let width = bits_for(count);
    let carved = if count >= ctx.min_tagged_blocks {
        BitArray::carve_pair(region, (count, width), (count, 1), acc)
    } else {
        None
    };

    match carved {
        Some((mut tags, mut origins)) => {
            block_merge(
                v,
                mid,
                block_len,
                &mut tags,
                &mut origins,
                &mut work.scratch,
                acc,
            );
            tags.free(acc);
            origins.free(acc);
        }
        None => {
            trace!("no room for {count} bit-packed tags, merging {len} elements by rotation");
            merge_in_place(v, mid, &mut work.scratch, acc, ctx.lazy_merge_len);
        }
    }
}

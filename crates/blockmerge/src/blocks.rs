use std::ptr;

use crate::bit_array::BitArray;
use crate::merge::{Tail, merge_hi, merge_lo};
use crate::observe::{Access, Less, Observer};
use crate::scratch::{Hole, Scratch};

pub trait Tags<T> {
    fn get<F: Less<T>, O: Observer>(&self, i: usize, acc: &mut Access<F, O>) -> usize;

    fn set<F: Less<T>, O: Observer>(&mut self, i: usize, value: usize, acc: &mut Access<F, O>);
}

impl<T> Tags<T> for [usize] {
    #[inline]
    fn get<F: Less<T>, O: Observer>(&self, i: usize, _acc: &mut Access<F, O>) -> usize {
        self[i]
    }

    #[inline]
    fn set<F: Less<T>, O: Observer>(&mut self, i: usize, value: usize, _acc: &mut Access<F, O>) {
        self[i] = value;
    }
}

impl<T> Tags<T> for BitArray<'_, T> {
    #[inline]
    fn get<F: Less<T>, O: Observer>(&self, i: usize, acc: &mut Access<F, O>) -> usize {
        BitArray::get(self, i, acc)
    }

    #[inline]
    fn set<F: Less<T>, O: Observer>(&mut self, i: usize, value: usize, acc: &mut Access<F, O>) {
        BitArray::set(self, i, value, acc);
    }
}

/// Blocks are merged by their first element; a right block goes first only when its head is
/// strictly smaller. Afterwards `tags[o]` is the block that belongs at position `o` and
/// `origins[o]` is 1 when that block came from the right run.
pub fn order_blocks<T, K, F, O>(
    v: &[T],
    block_len: usize,
    left: usize,
    right: usize,
    tags: &mut K,
    origins: &mut K,
    acc: &mut Access<F, O>,
) where
    K: Tags<T> + ?Sized,
    F: Less<T>,
    O: Observer,
{
    debug_assert!((left + right) * block_len <= v.len());
    let count = left + right;
    let (mut a, mut b) = (0, left);

    for o in 0..count {
        let take_b = a == left || (b < count && acc.less(&v[b * block_len], &v[a * block_len]));
        if take_b {
            tags.set(o, b, acc);
            origins.set(o, 1, acc);
            b += 1;
        } else {
            tags.set(o, a, acc);
            origins.set(o, 0, acc);
            a += 1;
        }
    }
}

/// Rearrange the first `count` blocks of `v` so that position `o` receives block `tags[o]`.
pub fn permute_blocks<T, K, F, O>(
    v: &mut [T],
    block_len: usize,
    count: usize,
    tags: &mut K,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
) where
    K: Tags<T> + ?Sized,
    F: Less<T>,
    O: Observer,
{
    assert!(count * block_len <= v.len());
    assert!(block_len <= scratch.capacity());

    for start in 0..count {
        if tags.get(start, acc) == start {
            continue;
        }
        acc.observer().read(block_len);

        // SAFETY: blocks are disjoint, every source lies inside `v`, and the hole always points
        // at the one vacated block while the cycle is chased.
        unsafe {
            let base = v.as_mut_ptr();
            let buf = scratch.as_mut_ptr();
            ptr::copy_nonoverlapping(base.add(start * block_len), buf, block_len);

            let mut hole = Hole {
                start: buf,
                end: buf.add(block_len),
                dest: base.add(start * block_len),
            };
            let mut slot = start;

            loop {
                let src = tags.get(slot, acc);
                debug_assert!(src < count, "tag {src} out of range");
                tags.set(slot, slot, acc);
                if src == start {
                    break;
                }

                let from = base.add(src * block_len);
                ptr::copy_nonoverlapping(from, hole.dest, block_len);
                acc.observer().write(block_len);
                hole.dest = from;
                slot = src;
            }

            acc.observer().write(block_len);
        }
    }
}

pub fn merge_blocks<T, K, F, O>(
    v: &mut [T],
    block_len: usize,
    count: usize,
    origins: &K,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
) where
    K: Tags<T> + ?Sized,
    F: Less<T>,
    O: Observer,
{
    if count == 0 {
        return;
    }

    let mut frag_start = 0;
    let mut frag_b = origins.get(0, acc) == 1;

    for k in 1..count {
        let pos = k * block_len;
        let block_b = origins.get(k, acc) == 1;
        if block_b == frag_b {
            frag_start = pos;
            continue;
        }

        // A right-run fragment followed by a left-run block must stay strictly below it.
        let ordered = if frag_b {
            acc.less(&v[pos - 1], &v[pos])
        } else {
            !acc.less(&v[pos], &v[pos - 1])
        };
        if ordered {
            frag_start = pos;
            frag_b = block_b;
            continue;
        }

        let end = pos + block_len;
        match merge_lo(&mut v[frag_start..end], pos - frag_start, scratch, acc, frag_b) {
            Tail::Left(n) => frag_start = end - n,
            Tail::Right(n) => {
                frag_start = end - n;
                frag_b = block_b;
            }
        }
    }
}

/// Merge `v[..mid]` and `v[mid..]` with blocks of `block_len`.
pub fn block_merge<T, K, F, O>(
    v: &mut [T],
    mid: usize,
    block_len: usize,
    tags: &mut K,
    origins: &mut K,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
) where
    K: Tags<T> + ?Sized,
    F: Less<T>,
    O: Observer,
{
    let len = v.len();
    let lead = mid % block_len;
    let trail = (len - mid) % block_len;
    let left = mid / block_len;
    let right = (len - mid) / block_len;

    let body = &mut v[lead..len - trail];
    order_blocks(body, block_len, left, right, tags, origins, acc);
    permute_blocks(body, block_len, left + right, tags, scratch, acc);
    merge_blocks(body, block_len, left + right, origins, scratch, acc);

    if lead > 0 {
        merge_lo(&mut v[..len - trail], lead, scratch, acc, false);
    }
    if trail > 0 {
        merge_hi(v, len - trail, scratch, acc);
    }
}

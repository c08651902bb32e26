use std::{mem, ptr};

use crate::observe::{Access, Less, Observer};
use crate::rotate::rotate;
use crate::scratch::{Hole, Scratch};
use crate::search::{gallop_lower, gallop_upper, lower_bound, upper_bound};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Tail {
    Left(usize),
    Right(usize),
}

/// Ties go to the left run unless `right_wins_ties`, which is how a block merge keeps order when
/// the left fragment came from the right run of the pair.
pub fn merge_lo<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
    right_wins_ties: bool,
) -> Tail {
    let len = v.len();
    assert!(mid <= len && mid <= scratch.capacity());
    acc.observer().read(mid);

    // SAFETY: the left run is parked in scratch and the hole fills the gap between the merged
    // output and the unread right run, whatever happens in `is_less`.
    unsafe {
        let v = v.as_mut_ptr();
        let buf = scratch.as_mut_ptr();
        ptr::copy_nonoverlapping(v, buf, mid);

        let mut hole = Hole {
            start: buf,
            end: buf.add(mid),
            dest: v,
        };
        let mut right = v.add(mid);
        let right_end = v.add(len);

        while hole.start < hole.end && right < right_end {
            let take_right = if right_wins_ties {
                !acc.less(&*hole.start, &*right)
            } else {
                acc.less(&*right, &*hole.start)
            };

            if take_right {
                ptr::copy_nonoverlapping(right, hole.dest, 1);
                right = right.add(1);
            } else {
                ptr::copy_nonoverlapping(hole.start, hole.dest, 1);
                hole.start = hole.start.add(1);
            }
            hole.dest = hole.dest.add(1);
            acc.observer().write(1);
        }

        let left = hole.len();
        acc.observer().write(left);
        if left > 0 {
            Tail::Left(left)
        } else {
            Tail::Right(right_end.offset_from(right) as usize)
        }
    }
}

pub fn merge_hi<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
) {
    let len = v.len();
    assert!(mid <= len && len - mid <= scratch.capacity());
    acc.observer().read(len - mid);

    // SAFETY: mirror image of `merge_lo`; the gap always sits right after the unread left run.
    unsafe {
        let v = v.as_mut_ptr();
        let buf = scratch.as_mut_ptr();
        ptr::copy_nonoverlapping(v.add(mid), buf, len - mid);

        let mut hole = Hole {
            start: buf,
            end: buf.add(len - mid),
            dest: v.add(mid),
        };
        let mut out = v.add(len);

        while v < hole.dest && hole.start < hole.end {
            let left = hole.dest.sub(1);
            let right = hole.end.sub(1);
            out = out.sub(1);

            if acc.less(&*right, &*left) {
                ptr::copy_nonoverlapping(left, out, 1);
                hole.dest = left;
            } else {
                ptr::copy_nonoverlapping(right, out, 1);
                hole.end = right;
            }
            acc.observer().write(1);
        }

        acc.observer().write(hole.len());
    }
}

pub fn merge_buffered<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
) {
    if mid <= v.len() - mid {
        merge_lo(v, mid, scratch, acc, false);
    } else {
        merge_hi(v, mid, scratch, acc);
    }
}

pub fn merge_lazy<T, F: Less<T>, O: Observer>(v: &mut [T], mid: usize, acc: &mut Access<F, O>) {
    let (mut a, mut m, mut b) = (0, mid, v.len());

    while a < m && m < b {
        if m - a <= b - m {
            let p = gallop_lower(v, m, b, m, &v[a], acc);
            rotate(v, a, m, p, acc);
            a += p - m + 1;
            m = p;
        } else {
            let p = gallop_upper(v, a, m, m, &v[b - 1], acc);
            rotate(v, p, m, b, acc);
            b = p + (b - m) - 1;
            m = p;
        }
    }
}

/// Merge `v[..mid]` and `v[mid..]` with rotations, using `scratch` only once a subproblem's
/// shorter run fits in it.
pub fn merge_in_place<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    mid: usize,
    scratch: &mut Scratch<T>,
    acc: &mut Access<F, O>,
    lazy_len: usize,
) {
    let mut v = v;
    let mut mid = mid;

    loop {
        let len = v.len();
        if mid == 0 || mid == len || !acc.less(&v[mid], &v[mid - 1]) {
            return;
        }
        let short = mid.min(len - mid);
        if short <= scratch.capacity() {
            merge_buffered(v, mid, scratch, acc);
            return;
        }
        if short <= lazy_len {
            merge_lazy(v, mid, acc);
            return;
        }

        let (pivot, left_mid, right_mid) = if mid >= len - mid {
            let i = mid / 2;
            let j = lower_bound(v, mid, len, &v[i], acc);
            rotate(v, i, mid, j, acc);
            let p = i + (j - mid);
            (p, i, j - p - 1)
        } else {
            let q = mid + (len - mid) / 2;
            let i = upper_bound(v, 0, mid, &v[q], acc);
            rotate(v, i, mid, q + 1, acc);
            (i + (q - mid), i, mid - i)
        };

        let (left, right) = mem::take(&mut v).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() <= right.len() {
            merge_in_place(left, left_mid, scratch, acc, lazy_len);
            v = right;
            mid = right_mid;
        } else {
            merge_in_place(right, right_mid, scratch, acc, lazy_len);
            v = left;
            mid = left_mid;
        }
    }
}

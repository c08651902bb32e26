use crate::observe::{Access, Less, Observer};

/// Return the first index `i` in `a..=b` such that `pred` is false for `v[i]`, assuming `pred` is
/// true on a prefix of `v[a..b]` and false on the rest.
fn partition_point<T>(v: &[T], a: usize, b: usize, mut pred: impl FnMut(&T) -> bool) -> usize {
    let mut base = a;
    let mut size = b - a;

    while size > 0 {
        let half = size / 2;
        if pred(&v[base + half]) {
            base += half + 1;
            size -= half + 1;
        } else {
            size = half;
        }
    }

    base
}

fn gallop<T>(v: &[T], a: usize, b: usize, hint: usize, mut pred: impl FnMut(&T) -> bool) -> usize {
    debug_assert!(a <= hint && hint <= b);

    if hint < b && pred(&v[hint]) {
        let mut lo = hint + 1;
        let mut step = 1;
        let hi = loop {
            let at = hint + step;
            if at >= b {
                break b;
            }
            if pred(&v[at]) {
                lo = at + 1;
                step *= 2;
            } else {
                break at;
            }
        };
        partition_point(v, lo, hi, pred)
    } else {
        let mut hi = hint;
        let mut step = 1;
        let lo = loop {
            if step > hint - a {
                break a;
            }
            let at = hint - step;
            if pred(&v[at]) {
                break at + 1;
            }
            hi = at;
            step *= 2;
        };
        partition_point(v, lo, hi, pred)
    }
}

pub fn lower_bound<T, F: Less<T>, O: Observer>(
    v: &[T],
    a: usize,
    b: usize,
    key: &T,
    acc: &mut Access<F, O>,
) -> usize {
    partition_point(v, a, b, |x| acc.less(x, key))
}

pub fn upper_bound<T, F: Less<T>, O: Observer>(
    v: &[T],
    a: usize,
    b: usize,
    key: &T,
    acc: &mut Access<F, O>,
) -> usize {
    partition_point(v, a, b, |x| !acc.less(key, x))
}

pub fn search<T, F: Less<T>, O: Observer>(
    v: &[T],
    a: usize,
    b: usize,
    key: &T,
    left: bool,
    acc: &mut Access<F, O>,
) -> usize {
    if left {
        lower_bound(v, a, b, key, acc)
    } else {
        upper_bound(v, a, b, key, acc)
    }
}

pub fn gallop_lower<T, F: Less<T>, O: Observer>(
    v: &[T],
    a: usize,
    b: usize,
    hint: usize,
    key: &T,
    acc: &mut Access<F, O>,
) -> usize {
    gallop(v, a, b, hint, |x| acc.less(x, key))
}

pub fn gallop_upper<T, F: Less<T>, O: Observer>(
    v: &[T],
    a: usize,
    b: usize,
    hint: usize,
    key: &T,
    acc: &mut Access<F, O>,
) -> usize {
    gallop(v, a, b, hint, |x| !acc.less(key, x))
}

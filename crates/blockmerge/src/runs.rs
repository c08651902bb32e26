use crate::observe::{Access, Less, Observer};
use crate::search::upper_bound;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Presorted {
    Sorted,
    TwoRuns(usize),
    Unsorted,
}

pub fn scan<T, F: Less<T>, O: Observer>(v: &[T], acc: &mut Access<F, O>) -> Presorted {
    let mut descents = (1..v.len()).filter(|&i| acc.less(&v[i], &v[i - 1]));

    match (descents.next(), descents.next()) {
        (None, _) => Presorted::Sorted,
        (Some(mid), None) => Presorted::TwoRuns(mid),
        (Some(_), Some(_)) => Presorted::Unsorted,
    }
}

/// Sort every chunk of `run_len` elements.
pub fn build_runs<T, F: Less<T>, O: Observer>(v: &mut [T], run_len: usize, acc: &mut Access<F, O>) {
    for chunk in v.chunks_mut(run_len) {
        let sorted = natural_prefix(chunk, acc);
        binary_insertion_sort(chunk, sorted, acc);
    }
}

fn natural_prefix<T, F: Less<T>, O: Observer>(v: &mut [T], acc: &mut Access<F, O>) -> usize {
    let len = v.len();
    if len < 2 {
        return len;
    }

    let mut end = 2;
    if acc.less(&v[1], &v[0]) {
        while end < len && acc.less(&v[end], &v[end - 1]) {
            end += 1;
        }
        acc.reverse(&mut v[..end]);
    } else {
        while end < len && !acc.less(&v[end], &v[end - 1]) {
            end += 1;
        }
    }
    end
}

pub fn binary_insertion_sort<T, F: Less<T>, O: Observer>(
    v: &mut [T],
    sorted: usize,
    acc: &mut Access<F, O>,
) {
    for i in sorted.max(1)..v.len() {
        let pos = upper_bound(v, 0, i, &v[i], acc);
        if pos < i {
            acc.observer().write(i + 1 - pos);
            v[pos..=i].rotate_right(1);
        }
    }
}

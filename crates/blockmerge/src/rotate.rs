use crate::observe::{Access, Observer};

const BLOCK_SWAP_RATIO: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Rotation {
    Shift,
    Reversal,
    BlockSwap,
    CycleReverse,
}

pub const ALL_ROTATIONS: [Rotation; 4] = [
    Rotation::Shift,
    Rotation::Reversal,
    Rotation::BlockSwap,
    Rotation::CycleReverse,
];

impl Rotation {
    pub fn select(left: usize, right: usize) -> Self {
        let (short, long) = if left < right {
            (left, right)
        } else {
            (right, left)
        };

        if short == 1 {
            Self::Shift
        } else if short == long || short * BLOCK_SWAP_RATIO <= long {
            Self::BlockSwap
        } else {
            Self::CycleReverse
        }
    }
}

/// Exchange `v[a..m]` and `v[m..b]`, producing `v[m..b] ++ v[a..m]` in `v[a..b]`.
pub fn rotate<T, F, O: Observer>(v: &mut [T], a: usize, m: usize, b: usize, acc: &mut Access<F, O>) {
    if a == m || m == b {
        return;
    }
    rotate_with(Rotation::select(m - a, b - m), v, a, m, b, acc);
}

pub fn rotate_with<T, F, O: Observer>(
    rotation: Rotation,
    v: &mut [T],
    a: usize,
    m: usize,
    b: usize,
    acc: &mut Access<F, O>,
) {
    debug_assert!(a <= m && m <= b && b <= v.len());
    if a == m || m == b {
        return;
    }

    match rotation {
        Rotation::Shift => shift_rotate(v, a, m, b, acc),
        Rotation::Reversal => reversal_rotate(v, a, m, b, acc),
        Rotation::BlockSwap => block_swap_rotate(v, a, m, b, acc),
        Rotation::CycleReverse => cycle_reverse_rotate(v, a, m, b, acc),
    }
}

fn shift_rotate<T, F, O: Observer>(v: &mut [T], a: usize, m: usize, b: usize, acc: &mut Access<F, O>) {
    // Each element of the range is written exactly once.
    acc.observer().write(b - a);
    if m - a <= b - m {
        v[a..b].rotate_left(m - a);
    } else {
        v[a..b].rotate_right(b - m);
    }
}

fn reversal_rotate<T, F, O: Observer>(
    v: &mut [T],
    a: usize,
    m: usize,
    b: usize,
    acc: &mut Access<F, O>,
) {
    acc.reverse(&mut v[a..m]);
    acc.reverse(&mut v[m..b]);
    acc.reverse(&mut v[a..b]);
}

fn block_swap_rotate<T, F, O: Observer>(
    v: &mut [T],
    mut a: usize,
    m: usize,
    b: usize,
    acc: &mut Access<F, O>,
) {
    let mut left = m - a;
    let mut right = b - m;

    while left > 0 && right > 0 {
        if left <= right {
            acc.swap_ranges(v, a, a + left, left);
            a += left;
            right -= left;
        } else {
            acc.swap_ranges(v, a + left - right, a + left, right);
            left -= right;
        }
    }
}

fn cycle_reverse_rotate<T, F, O: Observer>(
    v: &mut [T],
    a: usize,
    m: usize,
    e: usize,
    acc: &mut Access<F, O>,
) {
    let (mut a, mut b, mut c, mut d) = (a, m - 1, m, e - 1);

    // Four-way cycles a <- c <- d <- b <- a reverse both sides at once.
    while a < b && c < d {
        acc.swap(v, a, b);
        acc.swap(v, a, c);
        acc.swap(v, c, d);
        a += 1;
        b -= 1;
        c += 1;
        d -= 1;
    }

    while a < b {
        acc.swap(v, a, b);
        acc.swap(v, a, d);
        a += 1;
        b -= 1;
        d -= 1;
    }

    while c < d {
        acc.swap(v, c, d);
        acc.swap(v, d, a);
        a += 1;
        c += 1;
        d -= 1;
    }

    if a < d {
        acc.reverse(&mut v[a..d + 1]);
    }
}

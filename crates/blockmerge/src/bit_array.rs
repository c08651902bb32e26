//! Small integers stored in the relative order of element pairs.

use std::mem;

use crate::observe::{Access, Less, Observer};

pub struct BitArray<'a, T> {
    lo: &'a mut [T],
    hi: &'a mut [T],
    size: usize,
    width: usize,
}

pub fn bits_for(count: usize) -> usize {
    (usize::BITS - count.saturating_sub(1).leading_zeros()).max(1) as usize
}

impl<'a, T> BitArray<'a, T> {
    /// Every pair must compare strictly `lo[k] < hi[k]`; equal elements cannot carry a bit.
    pub fn new(lo: &'a mut [T], hi: &'a mut [T], size: usize, width: usize) -> Self {
        assert!(width > 0 && width < usize::BITS as usize);
        assert_eq!(lo.len(), hi.len());
        assert!(lo.len() >= size * width);

        Self {
            lo,
            hi,
            size,
            width,
        }
    }

    pub fn carve<F: Less<T>, O: Observer>(
        region: &'a mut [T],
        size: usize,
        width: usize,
        acc: &mut Access<F, O>,
    ) -> Option<Self> {
        let (lo, hi) = split_ends(region, size * width, acc)?;
        Some(Self::new(lo, hi, size, width))
    }

    pub fn carve_pair<F: Less<T>, O: Observer>(
        region: &'a mut [T],
        first: (usize, usize),
        second: (usize, usize),
        acc: &mut Access<F, O>,
    ) -> Option<(Self, Self)> {
        let split = first.0 * first.1;
        let (lo, hi) = split_ends(region, split + second.0 * second.1, acc)?;
        let (lo1, lo2) = lo.split_at_mut(split);
        let (hi1, hi2) = hi.split_at_mut(split);

        Some((
            Self::new(lo1, hi1, first.0, first.1),
            Self::new(lo2, hi2, second.0, second.1),
        ))
    }

    #[inline]
    fn bit<F: Less<T>, O: Observer>(&self, k: usize, acc: &mut Access<F, O>) -> bool {
        acc.less(&self.hi[k], &self.lo[k])
    }

    #[inline]
    fn flip<F, O: Observer>(&mut self, k: usize, acc: &mut Access<F, O>) {
        acc.observer().swap(1);
        mem::swap(&mut self.lo[k], &mut self.hi[k]);
    }

    #[inline]
    fn put<F: Less<T>, O: Observer>(&mut self, k: usize, bit: bool, acc: &mut Access<F, O>) {
        if self.bit(k, acc) != bit {
            self.flip(k, acc);
        }
    }

    pub fn get<F: Less<T>, O: Observer>(&self, i: usize, acc: &mut Access<F, O>) -> usize {
        debug_assert!(i < self.size);
        let start = i * self.width;

        (0..self.width).fold(0, |word, k| {
            word | (usize::from(self.bit(start + k, acc)) << k)
        })
    }

    pub fn set<F: Less<T>, O: Observer>(&mut self, i: usize, value: usize, acc: &mut Access<F, O>) {
        debug_assert!(i < self.size);
        debug_assert!(
            value >> self.width == 0,
            "{value} does not fit in {} bits",
            self.width
        );
        let start = i * self.width;

        for k in 0..self.width {
            self.put(start + k, (value >> k) & 1 == 1, acc);
        }
    }

    pub fn set_xor<F, O: Observer>(&mut self, i: usize, value: usize, acc: &mut Access<F, O>) {
        debug_assert!(i < self.size);
        debug_assert!(
            value >> self.width == 0,
            "{value} does not fit in {} bits",
            self.width
        );
        let start = i * self.width;

        for k in 0..self.width {
            if (value >> k) & 1 == 1 {
                self.flip(start + k, acc);
            }
        }
    }

    pub fn incr<F: Less<T>, O: Observer>(&mut self, i: usize, acc: &mut Access<F, O>) {
        debug_assert!(i < self.size);
        let start = i * self.width;
        let mut carry = true;

        for k in start..start + self.width {
            self.flip(k, acc);
            if self.bit(k, acc) {
                carry = false;
                break;
            }
        }

        debug_assert!(!carry, "word {i} overflowed {} bits", self.width);
    }

    pub fn decr<F: Less<T>, O: Observer>(&mut self, i: usize, acc: &mut Access<F, O>) {
        debug_assert!(i < self.size);
        let start = i * self.width;
        let mut borrow = true;

        for k in start..start + self.width {
            self.flip(k, acc);
            if !self.bit(k, acc) {
                borrow = false;
                break;
            }
        }

        debug_assert!(!borrow, "word {i} underflowed");
    }

    pub fn swap<F: Less<T>, O: Observer>(&mut self, i: usize, j: usize, acc: &mut Access<F, O>) {
        let tmp = self.get(i, acc);
        let other = self.get(j, acc);
        self.set(i, other, acc);
        self.set(j, tmp, acc);
    }

    /// Clear every bit, returning both regions to their original order.
    pub fn free<F: Less<T>, O: Observer>(mut self, acc: &mut Access<F, O>) {
        for k in 0..self.size * self.width {
            self.put(k, false, acc);
        }
    }
}

fn split_ends<'a, T, F: Less<T>, O: Observer>(
    region: &'a mut [T],
    pairs: usize,
    acc: &mut Access<F, O>,
) -> Option<(&'a mut [T], &'a mut [T])> {
    let len = region.len();
    if pairs == 0 || 2 * pairs > len || !acc.less(&region[pairs - 1], &region[len - pairs]) {
        return None;
    }

    let (lo, rest) = region.split_at_mut(pairs);
    let hi_start = rest.len() - pairs;
    Some((lo, &mut rest[hi_start..]))
}

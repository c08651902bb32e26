pub trait Less<T>: FnMut(&T, &T) -> bool {}
impl<T, F: FnMut(&T, &T) -> bool> Less<T> for F {}

/// Hook fired on every element access the engine performs.
pub trait Observer {
    fn compare(&mut self) {}

    fn read(&mut self, _count: usize) {}

    fn write(&mut self, _count: usize) {}

    fn swap(&mut self, _count: usize) {}

    /// A merge level with runs of `run_len` elements finished; every run of length `2 * run_len`
    /// is now sorted.
    fn level(&mut self, _run_len: usize) {}
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn compare(&mut self) {
        (**self).compare();
    }

    fn read(&mut self, count: usize) {
        (**self).read(count);
    }

    fn write(&mut self, count: usize) {
        (**self).write(count);
    }

    fn swap(&mut self, count: usize) {
        (**self).swap(count);
    }

    fn level(&mut self, run_len: usize) {
        (**self).level(run_len);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub compares: u64,
    pub reads: u64,
    pub writes: u64,
    pub swaps: u64,
    pub levels: u64,
}

impl OpCounts {
    /// Total element movement: writes plus both halves of every swap.
    pub fn moves(&self) -> u64 {
        self.writes + 2 * self.swaps
    }
}

impl Observer for OpCounts {
    fn compare(&mut self) {
        self.compares += 1;
    }

    fn read(&mut self, count: usize) {
        self.reads += count as u64;
    }

    fn write(&mut self, count: usize) {
        self.writes += count as u64;
    }

    fn swap(&mut self, count: usize) {
        self.swaps += count as u64;
    }

    fn level(&mut self, _run_len: usize) {
        self.levels += 1;
    }
}

pub struct Access<F, O> {
    is_less: F,
    observer: O,
}

impl<F, O: Observer> Access<F, O> {
    pub fn new(is_less: F, observer: O) -> Self {
        Self { is_less, observer }
    }

    #[inline]
    pub fn less<T>(&mut self, a: &T, b: &T) -> bool
    where
        F: Less<T>,
    {
        self.observer.compare();
        (self.is_less)(a, b)
    }

    #[inline]
    pub fn swap<T>(&mut self, v: &mut [T], i: usize, j: usize) {
        self.observer.swap(1);
        v.swap(i, j);
    }

    /// Exchange `v[a..a + len]` with `v[b..b + len]`. The ranges must not overlap and `a < b`.
    #[inline]
    pub fn swap_ranges<T>(&mut self, v: &mut [T], a: usize, b: usize, len: usize) {
        debug_assert!(a + len <= b);
        self.observer.swap(len);
        let (left, right) = v.split_at_mut(b);
        left[a..a + len].swap_with_slice(&mut right[..len]);
    }

    #[inline]
    pub fn reverse<T>(&mut self, v: &mut [T]) {
        self.observer.swap(v.len() / 2);
        v.reverse();
    }

    #[inline]
    pub fn observer(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

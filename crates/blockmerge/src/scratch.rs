use std::ptr;

/// Uninitialized element storage borrowed by the buffered merges.
///
/// The backing vector never holds initialized elements (its length stays zero), so dropping it
/// never drops a `T`. Every copy into it is paired with a [`Hole`] that moves the elements back.
pub struct Scratch<T> {
    buf: Vec<T>,
    cap: usize,
}

impl<T> Scratch<T> {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
            cap,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }
}

/// Elements `[start, end)` parked outside the sequence, owed to the gap starting at `dest`.
///
/// Dropping the hole copies them back, so a panicking comparator can never lose or duplicate an
/// element.
pub(crate) struct Hole<T> {
    pub start: *mut T,
    pub end: *mut T,
    pub dest: *mut T,
}

impl<T> Hole<T> {
    #[inline]
    pub fn len(&self) -> usize {
        // SAFETY: both pointers come from the same allocation and `start <= end`.
        unsafe { self.end.offset_from(self.start) as usize }
    }
}

impl<T> Drop for Hole<T> {
    fn drop(&mut self) {
        // SAFETY: `dest` points to a gap of exactly `len()` vacated slots that does not overlap
        // the parked elements.
        unsafe {
            ptr::copy_nonoverlapping(self.start, self.dest, self.len());
        }
    }
}

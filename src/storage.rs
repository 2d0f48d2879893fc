use crate::utils::ranges;
use std::collections::TryReserveError;

/// Heap-allocated storage of a ring buffer.
///
/// All slots are always initialized, vacant ones hold stale or default items.
#[derive(Clone)]
pub struct Heap<T> {
    items: Box<[T]>,
}

impl<T> Heap<T> {
    /// Storage of zero length, what remains after the contents were taken out.
    pub fn empty() -> Self {
        Self { items: Box::new([]) }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pair of slices covering `len` items starting at `start` and wrapping around the end of storage.
    ///
    /// The second slice is empty if no wrapping occurred.
    pub fn slices(&self, start: usize, len: usize) -> (&[T], &[T]) {
        let (first, second) = ranges(self.len(), start, len);
        let (head, tail) = self.items.split_at(first.start);
        (&tail[..first.len()], &head[second])
    }

    /// Mutable version of [`Self::slices`].
    pub fn slices_mut(&mut self, start: usize, len: usize) -> (&mut [T], &mut [T]) {
        let (first, second) = ranges(self.len(), start, len);
        let (head, tail) = self.items.split_at_mut(first.start);
        (&mut tail[..first.len()], &mut head[second])
    }

    #[inline]
    pub fn get(&self, index: usize) -> &T {
        &self.items[index]
    }
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<T: Copy + Default> Heap<T> {
    /// Allocates storage of `len` default items reporting allocation failure instead of aborting.
    pub fn try_new(len: usize) -> Result<Self, TryReserveError> {
        let mut vec = Vec::new();
        vec.try_reserve_exact(len)?;
        vec.resize(len, T::default());
        Ok(Self {
            items: vec.into_boxed_slice(),
        })
    }

    /// Deep copy reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, TryReserveError> {
        let mut vec = Vec::new();
        vec.try_reserve_exact(self.len())?;
        vec.extend_from_slice(&self.items);
        Ok(Self {
            items: vec.into_boxed_slice(),
        })
    }
}

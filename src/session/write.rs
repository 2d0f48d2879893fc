use crate::{
    snapshot::Snapshot,
    state::State,
    traits::{Based, DelegateObserver, Observer},
};
use core::sync::atomic::{AtomicBool, Ordering};
use parking_lot::MutexGuard;
use std::io::{self, Read};

/// Producer session of a ring buffer.
///
/// Holds the gate until dropped, so written items become visible to readers only after that.
pub struct WriteSession<'a, T> {
    state: MutexGuard<'a, State<T>>,
    finished: &'a AtomicBool,
}

impl<'a, T> WriteSession<'a, T> {
    pub(crate) fn new(state: MutexGuard<'a, State<T>>, finished: &'a AtomicBool) -> Self {
        Self { state, finished }
    }

    /// Tells readers that no more data will be written to the buffer.
    ///
    /// Cannot be undone.
    pub fn finish(&mut self) {
        self.finished.store(true, Ordering::Release);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(None)
    }

    /// Pair of slices of vacant memory to be filled with `count` items, the second one may be empty.
    ///
    /// *Must be followed by [`Self::advance`] call with the number of items being put.*
    pub(crate) fn vacant_slices_mut(&mut self, count: usize) -> (&mut [T], &mut [T]) {
        assert!(
            count <= self.vacant_len(),
            "cannot put {} items, only {} places are free",
            count,
            self.vacant_len()
        );
        let state = &mut *self.state;
        state.storage.slices_mut(state.head, count)
    }

    #[inline]
    pub(crate) fn advance(&mut self, count: usize) {
        self.state.advance_head(count);
    }
}

impl<'a, T: Copy + Default> WriteSession<'a, T> {
    /// Appends an item to the ring buffer.
    ///
    /// If buffer is full returns an `Err` containing the item that hasn't been appended.
    pub fn try_push(&mut self, item: T) -> Result<(), T> {
        if self.is_full() {
            return Err(item);
        }
        let state = &mut *self.state;
        *state.storage.get_mut(state.head) = item;
        state.advance_head(1);
        Ok(())
    }

    /// Appends all items from slice to the ring buffer.
    ///
    /// *Panics if slice is longer than the free space.*
    pub fn push_slice(&mut self, elems: &[T]) {
        let (left, right) = self.vacant_slices_mut(elems.len());
        let (left_elems, right_elems) = elems.split_at(left.len());
        left.copy_from_slice(left_elems);
        right.copy_from_slice(right_elems);
        self.advance(elems.len());
    }

    /// Appends items from an iterator until either the iterator ends or the buffer is full.
    ///
    /// Returns count of items been appended.
    pub fn push_iter<I: Iterator<Item = T>>(&mut self, iter: I) -> usize {
        let count = self.vacant_len();
        let (left, right) = self.vacant_slices_mut(count);
        let mut pushed = 0;
        for (place, item) in left.iter_mut().chain(right.iter_mut()).zip(iter) {
            *place = item;
            pushed += 1;
        }
        self.advance(pushed);
        pushed
    }

    /// Appends `count` default items.
    ///
    /// *Panics if `count` exceeds the free space.*
    pub fn push_zeros(&mut self, count: usize) {
        let (left, right) = self.vacant_slices_mut(count);
        left.fill(T::default());
        right.fill(T::default());
        self.advance(count);
    }
}

impl<'a> WriteSession<'a, u8> {
    /// Reads at most `count` bytes from `Read` instance and appends them to the ring buffer.
    /// If `count` is `None` then as much as possible bytes will be read.
    ///
    /// Reading stops when the free space is filled or `reader` reports end of data.
    /// Returns the number of bytes appended.
    ///
    /// If `read` fails then the original error is returned. Bytes obtained before the failure stay in the buffer.
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R, count: Option<usize>) -> io::Result<usize> {
        let count = usize::min(count.unwrap_or(usize::MAX), self.vacant_len());
        let (left, right) = self.vacant_slices_mut(count);

        let mut total = 0;
        let result = match fill_from(reader, left, &mut total) {
            Ok(true) => fill_from(reader, right, &mut total).map(|_| ()),
            Ok(false) => Ok(()),
            Err(e) => Err(e),
        };
        self.advance(total);
        result.map(|()| total)
    }
}

/// Reads into `buf` until it is full or `reader` is exhausted, adding the number of bytes read to `total`.
///
/// Returns whether `buf` was filled.
fn fill_from<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8], total: &mut usize) -> io::Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                *total += n;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled == buf.len())
}

impl<'a, T> Based for WriteSession<'a, T> {
    type Base = State<T>;
    fn base(&self) -> &Self::Base {
        &self.state
    }
}
impl<'a, T> DelegateObserver for WriteSession<'a, T> {}

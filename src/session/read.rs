use crate::{
    error::{Error, Result},
    readers::ReaderToken,
    snapshot::Snapshot,
    state::State,
    traits::{Based, DelegateObserver, Observer},
};
use parking_lot::MutexGuard;
use std::io::Write;

/// Session of a single registered reader.
///
/// Holds the gate until released or dropped.
/// Cursor movements persist across sessions, but only [`Self::release`] and its shorthands
/// report the reader's progress for the current release round.
pub struct ReadSession<'a, T> {
    state: MutexGuard<'a, State<T>>,
    reader: ReaderToken,
}

impl<'a, T> ReadSession<'a, T> {
    pub(crate) fn new(state: MutexGuard<'a, State<T>>, reader: ReaderToken) -> Self {
        state.readers.check(reader);
        Self { state, reader }
    }

    #[inline]
    pub fn reader(&self) -> ReaderToken {
        self.reader
    }

    /// Storage index of the reader cursor.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.state.cursor(self.reader)
    }

    /// The number of items the reader has not read yet.
    #[inline]
    pub fn ahead(&self) -> usize {
        self.state.ahead(self.reader)
    }

    /// The number of retained items behind the cursor, i.e. the largest amount the reader may release.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.state.readers.offset(self.reader)
    }

    /// Whether the reader has already reported in the current release round.
    pub fn has_reported(&self) -> bool {
        self.state.readers.has_reported(self.reader)
    }

    /// Number of registered readers.
    pub fn readers(&self) -> usize {
        self.state.readers.len()
    }

    /// Moves the cursor by `amount` items without reading them.
    ///
    /// Negative `amount` moves the cursor backward, but not behind the tail.
    ///
    /// *Panics if the cursor leaves the retained area.*
    pub fn shift(&mut self, amount: isize) {
        self.state.shift_cursor(self.reader, amount);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(Some(self.reader))
    }

    /// Pair of slices containing first `count` items ahead of the cursor, the second one may be empty.
    ///
    /// *Must be followed by [`Self::advance`] call if items are treated as read.*
    pub(crate) fn ahead_slices(&self, count: usize) -> (&[T], &[T]) {
        assert!(
            count <= self.ahead(),
            "cannot read {} items, only {} are ahead of the cursor",
            count,
            self.ahead()
        );
        self.state.storage.slices(self.cursor(), count)
    }

    #[inline]
    pub(crate) fn advance(&mut self, count: usize) {
        self.state.advance_cursor(self.reader, count);
    }

    /// Ends the session telling that the reader no longer needs first `amount` items counted from the tail.
    ///
    /// Items are discarded only when every registered reader has reported since the last discard,
    /// and then the smallest reported amount is discarded.
    /// Returns the number of items discarded by this call.
    ///
    /// *Panics if `amount` is greater than [`Self::consumed`].*
    pub fn release(mut self, amount: usize) -> usize {
        let reader = self.reader;
        self.state.release(reader, amount)
    }

    /// Ends the session releasing every item behind the cursor.
    pub fn release_consumed(self) -> usize {
        let amount = self.consumed();
        self.release(amount)
    }

    /// Ends the session releasing everything in the buffer.
    ///
    /// *Panics if the reader has not read all the items, i.e. [`Self::ahead`] is not zero.*
    pub fn release_all(self) -> usize {
        let amount = self.occupied_len();
        self.release(amount)
    }
}

impl<'a, T: Copy> ReadSession<'a, T> {
    /// Item at `distance` from the cursor, the cursor stays in place.
    ///
    /// Negative `distance` looks back at the items already read but not discarded yet.
    ///
    /// *Panics if there is no retained item at that position.*
    pub fn peek(&self, distance: isize) -> T {
        *self.state.storage.get(self.state.item_index(self.reader, distance))
    }

    /// Reads an item and moves the cursor past it.
    ///
    /// Returns `None` if the reader has read everything.
    pub fn try_pop(&mut self) -> Option<T> {
        if self.ahead() == 0 {
            return None;
        }
        let item = *self.state.storage.get(self.cursor());
        self.advance(1);
        Some(item)
    }

    /// Reads items filling the whole slice.
    ///
    /// *Panics if slice is longer than [`Self::ahead`].*
    pub fn pop_slice(&mut self, elems: &mut [T]) {
        let count = elems.len();
        let (left, right) = self.ahead_slices(count);
        let (left_elems, right_elems) = elems.split_at_mut(left.len());
        left_elems.copy_from_slice(left);
        right_elems.copy_from_slice(right);
        self.advance(count);
    }

    /// Reads all the items ahead of the cursor appending them to `elems`.
    ///
    /// Returns the number of items read.
    pub fn pop_all(&mut self, elems: &mut Vec<T>) -> usize {
        let count = self.ahead();
        let (left, right) = self.ahead_slices(count);
        elems.reserve(count);
        elems.extend_from_slice(left);
        elems.extend_from_slice(right);
        self.advance(count);
        count
    }
}

impl<'a> ReadSession<'a, u8> {
    /// Writes `count` bytes ahead of the cursor into a [`Write`] instance and moves the cursor past them.
    ///
    /// Bytes are written in at most two contiguous chunks.
    /// If `writer` does not accept a chunk completely then [`ErrorKind::Write`](crate::ErrorKind::Write) error is returned
    /// and the cursor is moved past the chunks written before.
    ///
    /// *Panics if `count` is greater than [`Self::ahead`].*
    pub fn write_into<W: Write + ?Sized>(&mut self, writer: &mut W, count: usize) -> Result<()> {
        let (left, right) = self.ahead_slices(count);
        let mut written = 0;
        let mut result = Ok(());
        for chunk in [left, right] {
            if let Err(e) = writer.write_all(chunk) {
                result = Err(Error::write(e));
                break;
            }
            written += chunk.len();
        }
        self.advance(written);
        result
    }

    /// Writes all the bytes ahead of the cursor into a [`Write`] instance.
    ///
    /// Returns the number of bytes written.
    pub fn write_all_into<W: Write + ?Sized>(&mut self, writer: &mut W) -> Result<usize> {
        let count = self.ahead();
        self.write_into(writer, count).map(|()| count)
    }
}

impl<'a, T> Based for ReadSession<'a, T> {
    type Base = State<T>;
    fn base(&self) -> &Self::Base {
        &self.state
    }
}
impl<'a, T> DelegateObserver for ReadSession<'a, T> {}

use crate::{
    readers::{ReaderToken, Readers},
    snapshot::Snapshot,
    storage::Heap,
    traits::Observer,
};

/// Ring buffer contents guarded by the gate.
///
/// Reader cursors are kept as distances from `tail`, so a cursor is always inside `tail..=head`
/// and a reader that consumed a whole full buffer is distinguishable from one that consumed nothing.
#[derive(Clone)]
pub struct State<T> {
    pub storage: Heap<T>,
    pub head: usize,
    pub tail: usize,
    pub free: usize,
    pub readers: Readers,
    pub name: String,
}

impl<T> State<T> {
    pub fn new(storage: Heap<T>) -> Self {
        Self {
            free: storage.len(),
            storage,
            head: 0,
            tail: 0,
            readers: Readers::default(),
            name: String::new(),
        }
    }

    /// State with zero capacity.
    pub fn empty() -> Self {
        Self::new(Heap::empty())
    }

    /// Same state over another copy of storage.
    pub fn with_storage(&self, storage: Heap<T>) -> Self {
        debug_assert_eq!(storage.len(), self.storage.len());
        Self {
            storage,
            head: self.head,
            tail: self.tail,
            free: self.free,
            readers: self.readers.clone(),
            name: self.name.clone(),
        }
    }

    #[inline]
    fn mask(&self) -> usize {
        self.capacity().wrapping_sub(1)
    }

    #[inline]
    pub fn wrap(&self, index: usize) -> usize {
        index & self.mask()
    }

    /// Commits `count` items written at `head`.
    pub fn advance_head(&mut self, count: usize) {
        debug_assert!(count <= self.free);
        self.head = self.wrap(self.head + count);
        self.free -= count;
    }

    /// Storage index of the reader cursor.
    #[inline]
    pub fn cursor(&self, reader: ReaderToken) -> usize {
        self.wrap(self.tail + self.readers.offset(reader))
    }

    /// The number of items between the reader cursor and `head`.
    #[inline]
    pub fn ahead(&self, reader: ReaderToken) -> usize {
        self.occupied_len() - self.readers.offset(reader)
    }

    /// Distance of the reader cursor after moving it by `amount`, if it stays inside the used area.
    fn moved_offset(&self, reader: ReaderToken, amount: isize) -> Option<usize> {
        self.readers
            .offset(reader)
            .checked_add_signed(amount)
            .filter(|offset| *offset <= self.occupied_len())
    }

    /// Storage index of the item at `distance` from the reader cursor.
    ///
    /// *Panics if there is no retained item at that position.*
    pub fn item_index(&self, reader: ReaderToken, distance: isize) -> usize {
        match self.moved_offset(reader, distance) {
            Some(offset) if offset < self.occupied_len() => self.wrap(self.tail + offset),
            _ => panic!(
                "item at distance {} from the cursor is out of the retained area (consumed {}, ahead {})",
                distance,
                self.readers.offset(reader),
                self.ahead(reader)
            ),
        }
    }

    /// Moves the reader cursor by `amount` items, forward or backward.
    ///
    /// *Panics if the cursor leaves the used area.*
    pub fn shift_cursor(&mut self, reader: ReaderToken, amount: isize) {
        match self.moved_offset(reader, amount) {
            Some(offset) => self.readers.set_offset(reader, offset),
            None => panic!(
                "cannot shift cursor by {} (consumed {}, ahead {})",
                amount,
                self.readers.offset(reader),
                self.ahead(reader)
            ),
        }
    }

    #[inline]
    pub fn advance_cursor(&mut self, reader: ReaderToken, count: usize) {
        debug_assert!(count <= self.ahead(reader));
        let offset = self.readers.offset(reader);
        self.readers.set_offset(reader, offset + count);
    }

    /// Reports that `reader` no longer needs first `amount` items counted from `tail`.
    ///
    /// When every registered reader has reported, the smallest reported amount is discarded.
    /// Returns the number of items discarded.
    pub fn release(&mut self, reader: ReaderToken, amount: usize) -> usize {
        let consumed = self.readers.offset(reader);
        assert!(
            amount <= consumed,
            "reader {} releases {} items but its cursor is only {} items past the tail",
            reader.index(),
            amount,
            consumed
        );

        let watermark = match self.readers.report(reader, amount) {
            Some(watermark) => watermark,
            None => return 0,
        };
        // Never discard items behind a cursor even if its reader went back after reporting.
        let watermark = watermark.min(self.readers.min_offset().unwrap_or(watermark));

        self.free += watermark;
        if self.free == self.capacity() {
            self.head = 0;
            self.tail = 0;
            self.readers.rewind();
        } else {
            self.tail = self.wrap(self.tail + watermark);
            self.readers.retreat(watermark);
        }
        watermark
    }

    pub fn snapshot(&self, reader: Option<ReaderToken>) -> Snapshot {
        Snapshot {
            name: self.name.clone(),
            tail: self.tail,
            cursor: reader.map(|r| self.cursor(r)),
            head: self.head,
            ahead: reader.map(|r| self.ahead(r)),
            free: self.free,
        }
    }
}

impl<T> Observer for State<T> {
    type Item = T;

    #[inline]
    fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    fn head(&self) -> usize {
        self.head
    }
    #[inline]
    fn tail(&self) -> usize {
        self.tail
    }

    #[inline]
    fn vacant_len(&self) -> usize {
        self.free
    }
}

use crate::{
    error::{Error, Operation, Result},
    readers::ReaderToken,
    session::{ReadSession, WriteSession},
    snapshot::Snapshot,
    state::State,
    storage::Heap,
};
use core::{
    fmt, mem,
    sync::atomic::{AtomicBool, Ordering},
};
use crossbeam_utils::CachePadded;
use parking_lot::Mutex;

/// Binary logarithm of the capacity used when nothing else is known.
pub const DEFAULT_SIZE_EXPONENT: u32 = 16;

/// Ring buffer written by a single producer and read independently by up to [`MAX_READERS`](crate::MAX_READERS) readers.
///
/// Every reader has its own cursor. Items are discarded only after all readers have reported that they don't need them.
///
/// All access goes through sessions which hold a single gate, so at most one actor (the producer or one of the readers)
/// is working with the buffer at a time.
///
/// ```
/// use ringbuf_fanout::{traits::*, FanoutRb};
///
/// let rb = FanoutRb::<i32>::new(3).unwrap();
/// let left = rb.register().unwrap();
/// let right = rb.register().unwrap();
///
/// rb.write().push_slice(&[1, 2, 3]);
///
/// let mut session = rb.read(left);
/// assert_eq!(session.try_pop(), Some(1));
/// assert_eq!(session.release_consumed(), 0);
///
/// let mut session = rb.read(right);
/// assert_eq!(session.ahead(), 3);
/// session.shift(2);
/// assert_eq!(session.release_consumed(), 1);
///
/// assert_eq!(rb.write().vacant_len(), 6);
/// ```
pub struct FanoutRb<T> {
    state: Mutex<State<T>>,
    capacity: usize,
    finished: CachePadded<AtomicBool>,
}

impl<T> FanoutRb<T> {
    fn from_state(state: State<T>, finished: bool) -> Self {
        Self {
            capacity: state.storage.len(),
            state: Mutex::new(state),
            finished: CachePadded::new(AtomicBool::new(finished)),
        }
    }

    /// Capacity of the ring buffer.
    ///
    /// Zero only for a buffer whose contents were moved out with [`Self::take`].
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the producer has told that no more data will be written.
    ///
    /// Items already in the buffer may still be unread.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    pub fn name(&self) -> String {
        self.state.lock().name.clone()
    }
    /// Sets the name shown in snapshots.
    pub fn set_name<S: Into<String>>(&self, name: S) {
        self.state.lock().name = name.into();
    }

    /// Registers a new reader with its cursor at the oldest retained item.
    ///
    /// The reader takes part in the release round that is currently in progress.
    pub fn register(&self) -> Result<ReaderToken> {
        self.state.lock().readers.register()
    }

    /// Removes `count` most recently registered readers, or all of them if `count` is zero.
    ///
    /// Remaining readers have to report again to close the current release round,
    /// the smallest amount reported in it so far still limits the release. Buffer contents stay untouched.
    ///
    /// *Panics if `count` is greater than the number of registered readers.*
    pub fn unregister(&self, count: usize) {
        self.state.lock().readers.unregister(count);
    }

    /// Number of registered readers.
    pub fn readers(&self) -> usize {
        self.state.lock().readers.len()
    }

    /// Starts a producer session, blocking until the gate is free.
    pub fn write(&self) -> WriteSession<'_, T> {
        WriteSession::new(self.state.lock(), &self.finished)
    }

    /// Starts a session of the `reader`, blocking until the gate is free.
    ///
    /// *Panics if `reader` is not registered.*
    pub fn read(&self, reader: ReaderToken) -> ReadSession<'_, T> {
        ReadSession::new(self.state.lock(), reader)
    }

    /// State of the buffer, blocking until the gate is free.
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().snapshot(None)
    }

    /// Moves the storage, indices, cursors and release round out of `self`, leaving a buffer of zero capacity.
    pub fn take(&mut self) -> Self {
        let state = mem::replace(self.state.get_mut(), State::empty());
        let finished = mem::replace(self.finished.get_mut(), false);
        self.capacity = 0;
        Self::from_state(state, finished)
    }
}

impl<T: Copy + Default> FanoutRb<T> {
    /// Creates a new ring buffer of capacity `2^size_exponent`.
    ///
    /// Returns an error if the storage cannot be allocated.
    ///
    /// *Panics if `size_exponent` does not fit into `usize`.*
    pub fn new(size_exponent: u32) -> Result<Self> {
        assert!(
            size_exponent < usize::BITS,
            "size exponent {} is too large",
            size_exponent
        );
        let storage = Heap::try_new(1 << size_exponent).map_err(|e| Error::alloc(Operation::New, e))?;
        Ok(Self::from_state(State::new(storage), false))
    }

    /// Deep copy of the buffer including all cursors, returning an error if the storage cannot be allocated.
    ///
    /// Blocks until the gate is free.
    pub fn try_clone(&self) -> Result<Self> {
        let state = self.state.lock();
        let storage = state
            .storage
            .try_clone()
            .map_err(|e| Error::alloc(Operation::Clone, e))?;
        Ok(Self::from_state(state.with_storage(storage), self.is_finished()))
    }
}

impl<T: Clone> Clone for FanoutRb<T> {
    /// Deep copy of the buffer including all cursors.
    ///
    /// Blocks until the gate is free.
    fn clone(&self) -> Self {
        let state = self.state.lock().clone();
        Self::from_state(state, self.is_finished())
    }
}

impl<T> fmt::Debug for FanoutRb<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("FanoutRb");
        s.field("capacity", &self.capacity).field("finished", &self.is_finished());
        match self.state.try_lock() {
            Some(state) => s.field("state", &format_args!("{}", state.snapshot(None))),
            None => s.field("state", &format_args!("<locked>")),
        };
        s.finish()
    }
}

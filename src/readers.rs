use crate::{
    error::{Action, Error, Operation, Result},
    utils::low_bits,
};

/// Maximum number of readers registered at the same ring buffer.
pub const MAX_READERS: usize = 8;

const _: () = assert!(MAX_READERS < u32::BITS as usize);

/// Reader handle returned by [`FanoutRb::register`](crate::FanoutRb::register).
///
/// Tokens are registry slot numbers, so after [`FanoutRb::unregister`](crate::FanoutRb::unregister)
/// the tokens of removed readers must not be used anymore.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ReaderToken(u8);

impl ReaderToken {
    /// Registry slot number of the reader, starting from zero.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Reader cursors and the state of the current release round.
#[derive(Clone, Debug, Default)]
pub struct Readers {
    /// Distance of each reader cursor from the ring buffer tail.
    offsets: Vec<usize>,
    /// Bit is set when the reader reported since the last collective release.
    reported: u32,
    /// Minimal amount reported during the current round.
    pending: Option<usize>,
}

impl Readers {
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    fn mask(&self) -> u32 {
        low_bits(self.len())
    }

    /// Adds a reader with its cursor at the tail.
    pub fn register(&mut self) -> Result<ReaderToken> {
        let index = self.len();
        if index == MAX_READERS {
            return Err(Error::too_many_readers());
        }
        self.offsets
            .try_reserve(1)
            .map_err(|e| Error::container(Operation::Register, Action::ReaderCursor, e))?;
        self.offsets.push(0);
        Ok(ReaderToken(index as u8))
    }

    /// Removes `count` most recently registered readers, all of them if `count` is zero.
    ///
    /// Reports of the remaining readers are forgotten, the minimal amount reported so far is kept.
    pub fn unregister(&mut self, count: usize) {
        assert!(
            count <= self.len(),
            "cannot unregister {} readers out of {}",
            count,
            self.len()
        );
        if count == 0 {
            self.offsets.clear();
        } else {
            self.offsets.truncate(self.len() - count);
        }
        self.reported = 0;
    }

    pub fn check(&self, reader: ReaderToken) {
        assert!(
            reader.index() < self.len(),
            "reader {} is not registered ({} readers)",
            reader.index(),
            self.len()
        );
    }

    #[inline]
    pub fn offset(&self, reader: ReaderToken) -> usize {
        self.offsets[reader.index()]
    }
    #[inline]
    pub fn set_offset(&mut self, reader: ReaderToken, offset: usize) {
        self.offsets[reader.index()] = offset;
    }

    pub fn has_reported(&self, reader: ReaderToken) -> bool {
        self.reported & (1 << reader.index()) != 0
    }

    /// Records that `reader` no longer needs first `amount` items.
    ///
    /// Returns the round watermark if every registered reader has reported.
    pub fn report(&mut self, reader: ReaderToken, amount: usize) -> Option<usize> {
        self.pending = Some(self.pending.map_or(amount, |pending| pending.min(amount)));
        self.reported |= 1 << reader.index();

        if self.reported == self.mask() {
            let watermark = self.pending.unwrap_or(0);
            self.reset_round();
            Some(watermark)
        } else {
            None
        }
    }

    fn reset_round(&mut self) {
        self.reported = 0;
        self.pending = None;
    }

    /// Smallest cursor distance from the tail among all readers.
    pub fn min_offset(&self) -> Option<usize> {
        self.offsets.iter().copied().min()
    }

    /// Moves all cursors back by `count` after the tail moved forward by the same amount.
    pub fn retreat(&mut self, count: usize) {
        for offset in self.offsets.iter_mut() {
            debug_assert!(*offset >= count);
            *offset -= count;
        }
    }

    /// Puts all cursors at the tail.
    pub fn rewind(&mut self) {
        self.offsets.fill(0);
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }
}

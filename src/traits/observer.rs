use super::Based;

/// Ring buffer observer.
///
/// Can observe ring buffer state but cannot access its data.
pub trait Observer {
    type Item: Sized;

    /// Capacity of the ring buffer.
    ///
    /// It is constant during the whole ring buffer lifetime and is always a power of two
    /// (or zero for a buffer whose contents were taken out).
    fn capacity(&self) -> usize;

    /// Index of the position immediately after the used area.
    ///
    /// Index value is in range `0..capacity`.
    fn head(&self) -> usize;
    /// Index of the oldest item still retained.
    ///
    /// Index value is in range `0..capacity`.
    fn tail(&self) -> usize;

    /// The number of free places in the buffer.
    fn vacant_len(&self) -> usize;

    /// The number of items retained in the buffer, from `tail` to `head`.
    #[inline]
    fn occupied_len(&self) -> usize {
        self.capacity() - self.vacant_len()
    }

    /// Checks if the ring buffer is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.vacant_len() == self.capacity()
    }

    /// Checks if the ring buffer is full.
    #[inline]
    fn is_full(&self) -> bool {
        self.vacant_len() == 0
    }
}

/// Trait used for delegating observer methods.
pub trait DelegateObserver: Based
where
    Self::Base: Observer,
{
}

impl<D: DelegateObserver> Observer for D
where
    D::Base: Observer,
{
    type Item = <D::Base as Observer>::Item;

    #[inline]
    fn capacity(&self) -> usize {
        self.base().capacity()
    }

    #[inline]
    fn head(&self) -> usize {
        self.base().head()
    }
    #[inline]
    fn tail(&self) -> usize {
        self.base().tail()
    }

    #[inline]
    fn vacant_len(&self) -> usize {
        self.base().vacant_len()
    }

    #[inline]
    fn occupied_len(&self) -> usize {
        self.base().occupied_len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.base().is_empty()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.base().is_full()
    }
}

use core::ops::Range;

/// Returns a pair of ranges covering `len` items from `start` in a ring buffer with specific `capacity`.
///
/// `start` must be less than `capacity` (or zero for zero capacity) and `len` must not exceed `capacity`.
///
/// The first range starts from `start` and ends either at `start + len` or at the end of storage, whichever comes first.
/// The second range continues from index zero and is empty if no wrapping occurred.
pub fn ranges(capacity: usize, start: usize, len: usize) -> (Range<usize>, Range<usize>) {
    debug_assert!(start < capacity || (start == 0 && len == 0));
    debug_assert!(len <= capacity);

    let end = start + len;
    if end <= capacity {
        (start..end, 0..0)
    } else {
        (start..capacity, 0..(end - capacity))
    }
}

/// Bit mask with the lowest `count` bits set.
#[inline]
pub fn low_bits(count: usize) -> u32 {
    debug_assert!(count < u32::BITS as usize);
    (1 << count) - 1
}

#[cfg(test)]
mod tests {
    use super::ranges;

    #[test]
    fn contiguous() {
        assert_eq!(ranges(8, 2, 4), (2..6, 0..0));
        assert_eq!(ranges(8, 2, 6), (2..8, 0..0));
        assert_eq!(ranges(8, 0, 8), (0..8, 0..0));
        assert_eq!(ranges(0, 0, 0), (0..0, 0..0));
    }

    #[test]
    fn wrapped() {
        assert_eq!(ranges(8, 6, 4), (6..8, 0..2));
        assert_eq!(ranges(8, 7, 8), (7..8, 0..7));
    }
}

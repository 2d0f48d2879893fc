use crate::{
    session::{ReadSession, WriteSession},
    traits::Observer,
};

/// Moves at most `count` items from the `src` reader session of one ring buffer to the `dst` producer session of another.
/// If `count` is `None` then as much as possible items will be moved.
///
/// The source cursor moves past the moved items; nothing is released in the source buffer.
///
/// Returns number of items been moved.
pub fn transfer<T: Copy>(src: &mut ReadSession<'_, T>, dst: &mut WriteSession<'_, T>, count: Option<usize>) -> usize {
    let available = usize::min(src.ahead(), dst.vacant_len());
    let count = count.map_or(available, |count| usize::min(count, available));

    let (src_left, src_right) = src.ahead_slices(count);
    let (dst_left, dst_right) = dst.vacant_slices_mut(count);
    for (place, item) in dst_left
        .iter_mut()
        .chain(dst_right.iter_mut())
        .zip(src_left.iter().chain(src_right.iter()))
    {
        *place = *item;
    }

    src.advance(count);
    dst.advance(count);
    count
}

use super::Rb;
use crate::traits::*;

#[test]
fn single_reader_then_late_reader() {
    let rb = Rb::<i32>::new(3).unwrap();
    let first = rb.register().unwrap();

    let mut prod = rb.write();
    prod.push_slice(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(prod.head(), 6);
    assert_eq!(prod.vacant_len(), 2);
    drop(prod);

    let mut cons = rb.read(first);
    assert_eq!(cons.ahead(), 6);
    let mut buf = [0; 4];
    cons.pop_slice(&mut buf);
    assert_eq!(buf, [1, 2, 3, 4]);
    assert_eq!(cons.cursor(), 4);
    assert_eq!(cons.release(4), 4);

    let prod = rb.write();
    assert_eq!(prod.vacant_len(), 6);
    assert_eq!(prod.tail(), 4);
    drop(prod);

    let second = rb.register().unwrap();
    let mut cons = rb.read(second);
    assert_eq!(cons.cursor(), 4);
    assert_eq!(cons.ahead(), 2);
    assert_eq!(cons.try_pop(), Some(5));
    assert_eq!(cons.try_pop(), Some(6));
    assert_eq!(cons.ahead(), 0);
}

#[test]
fn full_buffer_ahead() {
    let rb = Rb::<i32>::new(3).unwrap();
    let a = rb.register().unwrap();
    let b = rb.register().unwrap();

    rb.write().push_iter(0..8);
    let mut cons = rb.read(a);
    assert_eq!(cons.ahead(), 8);
    cons.shift(8);
    // Cursor is back at the tail position but nothing is ahead.
    assert_eq!(cons.cursor(), cons.tail());
    assert_eq!(cons.ahead(), 0);
    assert_eq!(cons.release_all(), 0);

    let cons = rb.read(b);
    assert_eq!(cons.cursor(), cons.tail());
    assert_eq!(cons.ahead(), 8);
}

#[test]
fn stream_through_small_buffer() {
    let rb = Rb::<u8>::new(2).unwrap();
    let a = rb.register().unwrap();
    let b = rb.register().unwrap();

    let mut src: &[u8] = b"0123456789";
    let mut outs = [Vec::new(), Vec::new()];
    while !src.is_empty() || rb.write().occupied_len() > 0 {
        rb.write().read_from(&mut src, None).unwrap();
        for (reader, out) in [a, b].into_iter().zip(outs.iter_mut()) {
            let mut cons = rb.read(reader);
            cons.write_all_into(out).unwrap();
            cons.release_all();
        }
    }
    assert_eq!(outs[0], b"0123456789");
    assert_eq!(outs[1], b"0123456789");
}

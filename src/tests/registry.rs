use super::Rb;
use crate::{traits::*, ErrorKind, MAX_READERS};

#[test]
fn limit() {
    let rb = Rb::<i32>::new(2).unwrap();
    for i in 0..MAX_READERS {
        assert_eq!(rb.register().unwrap().index(), i);
    }
    assert_eq!(rb.readers(), MAX_READERS);
    assert_eq!(rb.register().unwrap_err().kind(), ErrorKind::TooManyReaders);

    rb.unregister(1);
    assert_eq!(rb.readers(), MAX_READERS - 1);
    assert_eq!(rb.register().unwrap().index(), MAX_READERS - 1);
}

#[test]
fn unregister_all() {
    let rb = Rb::<i32>::new(2).unwrap();
    rb.register().unwrap();
    rb.register().unwrap();
    rb.write().push_slice(&[1, 2]);

    rb.unregister(0);
    assert_eq!(rb.readers(), 0);
    // Contents are kept.
    assert_eq!(rb.write().occupied_len(), 2);
}

#[test]
#[should_panic]
fn unregister_too_many() {
    let rb = Rb::<i32>::new(2).unwrap();
    rb.register().unwrap();
    rb.unregister(2);
}

#[test]
fn new_reader_starts_at_tail() {
    let rb = Rb::<i32>::new(3).unwrap();
    let a = rb.register().unwrap();
    rb.write().push_slice(&[1, 2, 3, 4, 5]);

    let mut cons = rb.read(a);
    cons.shift(3);
    assert_eq!(cons.release(2), 2);

    let b = rb.register().unwrap();
    let cons = rb.read(b);
    assert_eq!(cons.cursor(), 2);
    assert_eq!(cons.ahead(), 3);
    assert_eq!(cons.peek(0), 3);
    assert_eq!(cons.readers(), 2);
}

#[test]
fn new_reader_joins_round() {
    let rb = Rb::<i32>::new(3).unwrap();
    let a = rb.register().unwrap();
    rb.write().push_slice(&[1, 2, 3, 4]);

    let b = rb.register().unwrap();
    let mut cons = rb.read(a);
    cons.shift(4);
    assert_eq!(cons.release_all(), 0);

    let mut cons = rb.read(b);
    cons.shift(1);
    assert_eq!(cons.release_consumed(), 1);
}

#[test]
fn unregister_keeps_smallest_report() {
    let rb = Rb::<i32>::new(3).unwrap();
    let a = rb.register().unwrap();
    let _b = rb.register().unwrap();
    rb.write().push_slice(&[1, 2, 3, 4]);

    let mut cons = rb.read(a);
    cons.shift(2);
    assert_eq!(cons.release(1), 0);

    rb.unregister(1);
    let cons = rb.read(a);
    assert!(!cons.has_reported());
    assert_eq!(cons.release(2), 1);

    let prod = rb.write();
    assert_eq!(prod.tail(), 1);
    assert_eq!(prod.vacant_len(), 5);
}

#[test]
fn unregister_lagging_reader() {
    let rb = Rb::<i32>::new(2).unwrap();
    let a = rb.register().unwrap();
    let _b = rb.register().unwrap();
    rb.write().push_slice(&[1, 2]);

    let mut cons = rb.read(a);
    cons.shift(2);
    assert_eq!(cons.release(2), 0);

    rb.unregister(1);
    let cons = rb.read(a);
    assert_eq!(cons.release_all(), 2);
    assert!(rb.write().is_empty());
}

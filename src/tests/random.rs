use super::Rb;
use crate::{traits::*, ReaderToken};

const READERS: usize = 3;

/// Checks buffer invariants on random sequences of pushes, reads and releases.
#[test]
fn invariants() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let rb = Rb::<u32>::new(5).unwrap();
    let readers: Vec<ReaderToken> = (0..READERS).map(|_| rb.register().unwrap()).collect();

    let mut written = 0u32;
    let mut discarded = 0u32;
    let mut expected = [0u32; READERS];

    for _ in 0..10_000 {
        if rng.bool() {
            let mut prod = rb.write();
            let count = rng.usize(..=prod.vacant_len());
            assert_eq!(prod.push_iter(written..written + count as u32), count);
            written += count as u32;
            assert_eq!(prod.occupied_len() as u32, written - discarded);
            continue;
        }

        let i = rng.usize(..READERS);
        let mut cons = rb.read(readers[i]);
        assert_eq!(cons.vacant_len() + cons.occupied_len(), cons.capacity());
        assert!(cons.ahead() <= cons.occupied_len());
        assert_eq!(cons.consumed() + cons.ahead(), cons.occupied_len());

        let count = rng.usize(..=cons.ahead());
        for _ in 0..count {
            assert_eq!(cons.try_pop(), Some(expected[i]));
            expected[i] += 1;
        }
        if cons.consumed() > 0 {
            assert_eq!(cons.peek(-(cons.consumed() as isize)), discarded);
        }

        if rng.bool() {
            let amount = rng.usize(..=cons.consumed());
            let released = cons.release(amount);
            assert!(released <= amount);
            discarded += released as u32;
        }
    }

    for (i, reader) in readers.iter().enumerate() {
        let cons = rb.read(*reader);
        assert_eq!(cons.consumed() as u32, expected[i] - discarded);
    }
}

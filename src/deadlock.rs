//! Detection of wedged sessions, available with the `deadlock-detection` feature.

use parking_lot::deadlock;
use std::{thread, time::Duration};

/// Number of deadlock cycles found among threads blocked on ring buffer gates or any other
/// `parking_lot` primitive since the last check.
pub fn check() -> usize {
    deadlock::check_deadlock().len()
}

/// Spawns a thread that checks for deadlocks every `period` and calls `report` with a description
/// of each cycle found.
pub fn spawn_watchdog<F>(period: Duration, mut report: F) -> thread::JoinHandle<()>
where
    F: FnMut(String) + Send + 'static,
{
    thread::spawn(move || loop {
        thread::sleep(period);
        for (i, threads) in deadlock::check_deadlock().iter().enumerate() {
            let ids: Vec<String> = threads.iter().map(|t| format!("{:?}", t.thread_id())).collect();
            report(format!("deadlock #{}: threads {}", i, ids.join(", ")));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::check;
    use crate::FanoutRb;

    #[test]
    fn no_deadlock() {
        let rb = FanoutRb::<u8>::new(2).unwrap();
        let reader = rb.register().unwrap();
        rb.write().push_slice(&[1, 2]);
        rb.read(reader).release_consumed();
        assert_eq!(check(), 0);
    }
}

//! Fixed-capacity ring buffer with a single producer and several independent readers.
//!
//! Capacity is a power of two. Each reader keeps its own cursor, and retained items are discarded
//! only when every registered reader has reported that it has passed them ("collective release").
//! The amount discarded in a release round is the minimum of what the readers reported.
//!
//! Producer and readers work in sessions ([`WriteSession`], [`ReadSession`]) which hold a single
//! gate for their whole lifetime, so no two sessions overlap.

#[cfg(feature = "deadlock-detection")]
pub mod deadlock;
mod error;
mod fanout;
mod readers;
mod session;
mod snapshot;
mod state;
pub mod storage;
mod transfer;
pub mod traits;
mod utils;

#[cfg(test)]
mod tests;

pub use error::{Action, Error, ErrorKind, Operation, Result};
pub use fanout::{FanoutRb, DEFAULT_SIZE_EXPONENT};
pub use readers::{ReaderToken, MAX_READERS};
pub use session::{ReadSession, WriteSession};
pub use snapshot::Snapshot;
pub use transfer::transfer;

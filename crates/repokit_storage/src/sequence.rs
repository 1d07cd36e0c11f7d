//! Monotonic identity issuance.

use std::sync::atomic::{AtomicI64, Ordering};

/// Issues strictly increasing identities.
///
/// `next` and `reserve` are each a single atomic operation, so concurrent
/// mints never observe the same value.
#[derive(Debug, Default)]
pub struct Sequencer {
    counter: AtomicI64,
}

impl Sequencer {
    /// Creates a sequencer whose first minted identity is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates a sequencer whose first minted identity is `current + 1`.
    #[must_use]
    pub fn starting_at(current: i64) -> Self {
        Self {
            counter: AtomicI64::new(current),
        }
    }

    /// Mints the next identity.
    pub fn next(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Raises the counter to at least `candidate`, so it is never minted.
    ///
    /// Returns the counter value after the reservation.
    pub fn reserve(&self, candidate: i64) -> i64 {
        self.counter.fetch_max(candidate, Ordering::SeqCst).max(candidate)
    }

    /// Returns the largest identity minted or reserved so far.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.counter.load(Ordering::SeqCst)
    }
}

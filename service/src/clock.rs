//! Time source for the economy.
//!
//! Operations stamp rentals with a timestamp from this clock. The manual
//! variant gives tests deterministic, programmatically-advanced time.

use pedal_types::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// A time source: the system clock, or a manually-advanced test clock.
pub enum Clock {
    System,
    Manual(AtomicU64),
}

impl Clock {
    /// A deterministic clock starting at `initial_secs`.
    pub fn manual(initial_secs: u64) -> Self {
        Self::Manual(AtomicU64::new(initial_secs))
    }

    /// The current time.
    pub fn now(&self) -> Timestamp {
        match self {
            Self::System => Timestamp::now(),
            Self::Manual(secs) => Timestamp::new(secs.load(Ordering::SeqCst)),
        }
    }

    /// Advance a manual clock by `secs`. No-op on the system clock.
    pub fn advance(&self, secs: u64) {
        if let Self::Manual(current) = self {
            current.fetch_add(secs, Ordering::SeqCst);
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::System
    }
}

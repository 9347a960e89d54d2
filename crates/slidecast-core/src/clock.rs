//! Wall-clock abstraction used to timestamp sequencer events.

use chrono::{DateTime, Utc};

/// Source of wall-clock time for event metadata.
///
/// Scheduling never reads this clock; timers run on the async runtime's
/// monotonic clock. It only stamps journal entries, so tests can pin it.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

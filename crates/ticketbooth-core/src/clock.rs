//! Wall-clock port, so event timestamps can be pinned in tests.

use chrono::{DateTime, Utc};

/// Source of the `occurred_at` timestamp stamped on booking events.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the host's system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

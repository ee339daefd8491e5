//! Test clock.

use chrono::{DateTime, TimeZone, Utc};
use ticketbooth_core::clock::Clock;

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    /// 2026-01-15T10:00:00Z, the instant used across the test suites.
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_the_shared_test_instant() {
        let clock = FixedClock::default();

        assert_eq!(clock.now().to_rfc3339(), "2026-01-15T10:00:00+00:00");
        assert_eq!(clock.now(), FixedClock::default().now());
    }
}

//! Time source injected into the store.
//!
//! The store never reads the wall clock directly; it asks a [`Clock`]. Production code
//! uses [`SystemClock`], tests use [`FixedClock`] to get predictable timestamps.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant as a stored timestamp string.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Formats an instant the way book timestamps are stored: RFC 3339, UTC, milliseconds,
/// `Z` suffix (e.g. `2024-05-01T09:30:00.000Z`).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    /// Creates a clock frozen at `at`.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(at.timestamp_millis()),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_millisecond_precision() {
        let at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        assert_eq!(format_timestamp(at), "2023-11-14T22:13:20.123Z");
    }

    #[test]
    fn fixed_clock_advances_on_request() {
        let clock = FixedClock::default();
        assert_eq!(clock.timestamp(), "1970-01-01T00:00:00.000Z");

        clock.advance(Duration::seconds(90));
        assert_eq!(clock.timestamp(), "1970-01-01T00:01:30.000Z");
    }
}

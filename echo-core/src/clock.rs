//! Timestamp provider.
//!
//! Every timestamp in the echo model and the log records is RFC3339 in UTC
//! with millisecond precision and a `Z` suffix. The width is fixed, so two
//! timestamps compare the same way as strings and as instants.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current instant in the fixed textual format.
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format an instant the way every echo timestamp is written.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

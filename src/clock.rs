//! Time source used by the refund policy.
//!
//! The engine never reads the system time directly; it asks an injected
//! [`Clock`], so tests can pin the exact day boundaries of the refund tiers.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current instant as a naive UTC timestamp.
    fn now_naive(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
///
/// # Example
///
/// ```
/// use flight_booking_engine::clock::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let clock = FixedClock::at(at);
/// assert_eq!(clock.now_naive(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock fixed at `time`.
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }

    /// Creates a clock fixed at a naive UTC timestamp.
    pub fn at(time: NaiveDateTime) -> Self {
        Self::new(time.and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

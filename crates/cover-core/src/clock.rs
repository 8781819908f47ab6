//! Injected time source.
//!
//! All status math is a pure function of "today"; nothing in the core reads
//! the system clock directly. Callers hand in a [`Clock`] (the real one in
//! the CLI, a fixed one in tests).

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local date and time.
pub trait Clock {
    /// The current local calendar date.
    fn today(&self) -> NaiveDate;

    /// The current local date-time (used only for scheduling math).
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock implementation backed by the OS local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant. Every date-sensitive test uses this.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// Freeze at midnight on the given date.
    #[must_use]
    pub fn at_midnight(date: NaiveDate) -> Self {
        Self {
            now: date.and_hms_opt(0, 0, 0).unwrap_or_default(),
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.now.date()
    }

    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

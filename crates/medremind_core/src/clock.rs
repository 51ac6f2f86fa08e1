//! Wall-clock abstraction for reminder matching.
//!
//! # Responsibility
//! - Provide the current local time to the reminder matcher.
//! - Allow tests and replays to inject synthetic times.
//!
//! # Invariants
//! - Matching compares hour and minute of day in local time only.
//! - Seconds and calendar date never participate in a match.

use chrono::{DateTime, Local, Timelike, Utc};
use std::sync::Mutex;

/// Source of "now" for time-of-day comparisons.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Settable clock for tests and deterministic replays.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Local>>,
}

impl ManualClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: DateTime<Local>) {
        match self.current.lock() {
            Ok(mut guard) => *guard = at,
            Err(poisoned) => *poisoned.into_inner() = at,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        match self.current.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Local> {
        (**self).now()
    }
}

/// Returns whether `scheduled` falls on the same local hour and minute as `now`.
pub fn is_same_minute(scheduled: DateTime<Utc>, now: DateTime<Local>) -> bool {
    let scheduled = scheduled.with_timezone(&Local);
    scheduled.hour() == now.hour() && scheduled.minute() == now.minute()
}

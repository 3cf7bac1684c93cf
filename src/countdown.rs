//! "Time tolerated" counter: elapsed time since a fixed reference instant.
//!
//! The value is recomputed from the wall clock on each tick rather than
//! incremented, so sleep/suspend or clock corrections never accumulate
//! drift.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::schedule::Interval;
use crate::types::{Elapsed, Now};

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// Recompute cadence while the countdown is mounted.
pub const TICK: Duration = Duration::from_secs(1);

impl Elapsed {
    /// Decompose a whole-second duration with moduli 24/60/60.
    pub fn from_seconds(total: u64) -> Self {
        Elapsed {
            days: total / SECS_PER_DAY,
            hours: (total / SECS_PER_HOUR) % 24,
            minutes: (total / SECS_PER_MINUTE) % 60,
            seconds: total % 60,
        }
    }

    /// Total whole seconds represented.
    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

/// Elapsed time from `reference` to `now`, truncated to whole seconds.
///
/// A `now` before `reference` counts as zero.
pub fn elapsed_between(reference: DateTime<Utc>, now: DateTime<Utc>) -> Elapsed {
    let secs = (now - reference).num_seconds().max(0) as u64;
    Elapsed::from_seconds(secs)
}

/// Live countdown owned by the Home view.
///
/// Holds the periodic timer; dropping the countdown releases it.
#[derive(Debug, Clone)]
pub struct Countdown {
    reference: DateTime<Utc>,
    value: Elapsed,
    ticker: Interval,
}

impl Countdown {
    /// Mount: compute the current value and arm the 1-second timer.
    pub fn start(reference: DateTime<Utc>, now: Now) -> Self {
        Countdown {
            reference,
            value: elapsed_between(reference, now.wall),
            ticker: Interval::new(TICK, now.instant),
        }
    }

    pub fn value(&self) -> Elapsed {
        self.value
    }

    /// When the event loop must next call [`Countdown::poll`].
    pub fn next_due(&self) -> std::time::Instant {
        self.ticker.next_due()
    }

    /// Recompute if the timer is due. Returns true if a tick fired.
    pub fn poll(&mut self, now: Now) -> bool {
        if !self.ticker.poll(now.instant) {
            return false;
        }
        self.value = elapsed_between(self.reference, now.wall);
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================

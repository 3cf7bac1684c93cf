//! Cooperative timers for a single-threaded event loop.
//!
//! Nothing here spawns threads or sleeps. Each timer is a value that
//! answers "is something due?" and "when should the loop wake me?".
//! Its owner drops it to cancel it.

use std::time::{Duration, Instant};

/// Repeating timer with a fixed period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    /// First tick fires one `period` after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        Interval {
            period,
            next_due: start + period,
        }
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Fire if due. Missed ticks (e.g. after the process was suspended)
    /// are coalesced into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        while self.next_due <= now {
            self.next_due += self.period;
        }
        true
    }
}

/// Frame-paced task bounded by a wall-clock duration.
///
/// The first frame is due immediately. After that, one frame is due every
/// `frame` until `duration` has elapsed since the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    end: Instant,
    frame: Duration,
    next_frame: Instant,
}

impl Burst {
    pub fn new(start: Instant, duration: Duration, frame: Duration) -> Self {
        Burst {
            end: start + duration,
            frame,
            next_frame: start,
        }
    }

    /// True once the duration has elapsed. No further frames will fire.
    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.end
    }

    /// Fire a frame if one is due and the burst is still running.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_finished(now) || now < self.next_frame {
            return false;
        }
        while self.next_frame <= now {
            self.next_frame += self.frame;
        }
        true
    }

    /// Next frame instant, or `None` once finished.
    pub fn next_due(&self, now: Instant) -> Option<Instant> {
        if self.is_finished(now) {
            None
        } else {
            Some(self.next_frame.min(self.end))
        }
    }
}

/// Earliest of two optional deadlines.
pub fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn interval_not_due_before_first_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(SEC, t0);
        assert!(!iv.poll(t0));
        assert!(!iv.poll(t0 + Duration::from_millis(999)));
        assert!(iv.poll(t0 + SEC));
    }

    #[test]
    fn interval_fires_once_per_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(SEC, t0);
        assert!(iv.poll(t0 + SEC));
        assert!(!iv.poll(t0 + SEC));
        assert!(iv.poll(t0 + SEC * 2));
        assert_eq!(iv.next_due(), t0 + SEC * 3);
    }

    #[test]
    fn interval_coalesces_missed_ticks() {
        let t0 = Instant::now();
        let mut iv = Interval::new(SEC, t0);
        assert!(iv.poll(t0 + Duration::from_millis(5_500)));
        assert!(!iv.poll(t0 + Duration::from_millis(5_600)));
        assert_eq!(iv.next_due(), t0 + SEC * 6);
    }

    #[test]
    fn burst_fires_immediately_then_per_frame() {
        let t0 = Instant::now();
        let frame = Duration::from_millis(30);
        let mut burst = Burst::new(t0, SEC * 2, frame);
        assert!(burst.poll(t0));
        assert!(!burst.poll(t0 + Duration::from_millis(10)));
        assert!(burst.poll(t0 + frame));
    }

    #[test]
    fn burst_stops_after_duration() {
        let t0 = Instant::now();
        let mut burst = Burst::new(t0, SEC * 2, Duration::from_millis(30));
        let end = t0 + SEC * 2;
        assert!(burst.is_finished(end));
        assert!(!burst.poll(end));
        assert_eq!(burst.next_due(end), None);
        assert!(burst.next_due(t0).is_some());
    }

    #[test]
    fn earliest_picks_minimum() {
        let t0 = Instant::now();
        let t1 = t0 + SEC;
        assert_eq!(earliest(Some(t1), Some(t0)), Some(t0));
        assert_eq!(earliest(None, Some(t1)), Some(t1));
        assert_eq!(earliest(Some(t0), None), Some(t0));
        assert_eq!(earliest(None, None), None);
    }
}

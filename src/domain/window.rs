use crate::domain::clock::{self, MINUTES_PER_DAY, Minute};
use crate::infrastructure::error::EngineError;

/// The active scheduling interval of a single day, bounded by wake and sleep
/// times on the minute axis. A sleep time numerically at or before the wake
/// time means the window crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    wake: Minute,
    sleep: Minute,
}

impl DayWindow {
    /// Builds a window from minute values. A sleep time of `00:00` means
    /// "end of day" and is normalized to 1440 before any comparison.
    pub fn new(wake: Minute, sleep: Minute) -> Result<Self, EngineError> {
        if wake == sleep {
            return Err(EngineError::EmptyWindow);
        }
        let sleep = if sleep == 0 { MINUTES_PER_DAY } else { sleep };
        Ok(Self { wake, sleep })
    }

    pub fn parse(wake: &str, sleep: &str) -> Result<Self, EngineError> {
        Self::new(clock::to_minutes(wake)?, clock::to_minutes(sleep)?)
    }

    pub fn wake(&self) -> Minute {
        self.wake
    }

    pub fn sleep(&self) -> Minute {
        self.sleep
    }

    pub fn is_overnight(&self) -> bool {
        self.sleep <= self.wake
    }

    /// Whether the candidate range lies inside the window. For an overnight
    /// window a range is acceptable when it sits entirely in the pre-midnight
    /// tail, entirely in the post-midnight head, or wraps the seam (its stored
    /// end is numerically smaller than its start).
    pub fn contains(&self, start: Minute, end: Minute) -> bool {
        if self.is_overnight() {
            let valid_same_day = start >= self.wake && end <= MINUTES_PER_DAY;
            let valid_next_day = end <= self.sleep && end > 0;
            let spans_midnight = start >= self.wake && end <= self.sleep && start > end;
            valid_same_day || valid_next_day || spans_midnight
        } else {
            start >= self.wake && end <= self.sleep
        }
    }

    /// Total schedulable minutes in the window, crossing midnight if needed.
    pub fn total_minutes(&self) -> Minute {
        if self.sleep > self.wake {
            self.sleep - self.wake
        } else {
            self.sleep + MINUTES_PER_DAY - self.wake
        }
    }
}

use serde::{Deserialize, Serialize};

/// Length of one in-world day in time-of-day units.
pub const HOURS_PER_DAY: f32 = 24.0;

/// A window of the day, `start` inclusive and `end` exclusive, in hours.
///
/// A window whose start is after its end wraps past midnight, so
/// `TimeWindow::new(22.0, 5.0)` covers 22:00 through 04:59.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First hour inside the window.
    pub start: f32,
    /// First hour after the window.
    pub end: f32,
}

impl TimeWindow {
    /// Create a window.
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Check if a given hour falls within this window.
    pub fn contains(&self, hour: f32) -> bool {
        if self.start <= self.end {
            hour >= self.start && hour < self.end
        } else {
            // Wraps past midnight
            hour >= self.start || hour < self.end
        }
    }

    /// Like [`contains`](Self::contains) but with `end` inside the window.
    pub fn contains_inclusive(&self, hour: f32) -> bool {
        self.contains(hour) || hour == self.end
    }

    /// `true` when both ends are inside `0.0..=24.0`.
    pub fn is_valid(&self) -> bool {
        (0.0..=HOURS_PER_DAY).contains(&self.start) && (0.0..=HOURS_PER_DAY).contains(&self.end)
    }
}

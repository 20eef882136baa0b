// Boundary clamping
// Keeps drag candidates inside the visible hour window and same-day rules.
//
// Everything operates on minutes of day relative to one day anchor; the
// caller translates back to instants. No candidate may roll into the next
// day: ends clamp to `max_hour` of the entity's own day.

use crate::config::GridConfig;
use crate::models::time_range::TimeRange;

/// Per-action boundary rules for the configured hour window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryClamp {
    min_minutes: i64,
    max_minutes: i64,
    step_minutes: i64,
    min_duration_minutes: i64,
}

impl BoundaryClamp {
    pub fn from_config(config: &GridConfig) -> Self {
        let (min_minutes, max_minutes) = config.window_minutes();
        Self {
            min_minutes,
            max_minutes,
            step_minutes: config.step_minutes,
            min_duration_minutes: config.min_event_duration_minutes,
        }
    }

    /// Clamp a CREATE edge into the visible window.
    pub fn clamp_create_edge(&self, minutes: i64) -> i64 {
        minutes.clamp(self.min_minutes, self.max_minutes)
    }

    /// Clamp a MOVE start so the whole duration stays inside the window.
    /// Duration is preserved exactly: both edges shift together, the span is
    /// never truncated.
    pub fn clamp_move_start(&self, start_minutes: i64, duration_minutes: i64) -> i64 {
        let max_start = (self.max_minutes - duration_minutes).max(self.min_minutes);
        start_minutes.clamp(self.min_minutes, max_start)
    }

    /// Clamp a CHANGE_START candidate: at or after `min_hour`, and at least
    /// one step before the fixed end.
    pub fn clamp_change_start(&self, start_minutes: i64, end_minutes: i64) -> i64 {
        let max_start = (end_minutes - self.step_minutes).max(self.min_minutes);
        start_minutes.clamp(self.min_minutes, max_start)
    }

    /// Clamp a CHANGE_END candidate: at least one step after the fixed start,
    /// and never past `max_hour` of the same day.
    pub fn clamp_change_end(&self, end_minutes: i64, start_minutes: i64) -> i64 {
        let min_end = (start_minutes + self.step_minutes).min(self.max_minutes);
        end_minutes.clamp(min_end, self.max_minutes)
    }

    /// Duration floor applied to every action.
    pub fn meets_duration_floor(&self, range: &TimeRange) -> bool {
        range.duration_minutes() >= self.min_duration_minutes
    }

    pub fn min_duration_minutes(&self) -> i64 {
        self.min_duration_minutes
    }
}

// Slot models
// Bookable availability windows: dated slots and weekly-recurring slots.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::models::time_range::TimeRange;
use crate::utils::date::{day_add_minutes, start_of_day};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A dated, bookable availability window. Same grid semantics as an event but
/// no summary and a disjoint collision set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Option<i64>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, GridError> {
        if end <= start {
            return Err(GridError::InvertedRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { id: None, start, end })
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.end <= self.start {
            return Err(GridError::InvertedRange {
                start: self.start.to_rfc3339(),
                end: self.end.to_rfc3339(),
            });
        }
        Ok(())
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn with_range(&self, range: TimeRange) -> Slot {
        Slot {
            id: self.id,
            start: range.start,
            end: range.end,
        }
    }
}

/// A weekly-recurring availability window anchored to a day of week
/// (0 = Sunday, matching the week column order) rather than a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSlot {
    pub id: Option<i64>,
    pub day_of_week: u8,
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl RecurringSlot {
    pub fn new(day_of_week: u8, start_minutes: u32, end_minutes: u32) -> Result<Self, GridError> {
        let slot = Self {
            id: None,
            day_of_week,
            start_minutes,
            end_minutes,
        };
        slot.validate()?;
        Ok(slot)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.day_of_week > 6 {
            return Err(GridError::DayOfWeekOutOfRange(self.day_of_week));
        }
        if self.start_minutes >= self.end_minutes || self.end_minutes > MINUTES_PER_DAY {
            return Err(GridError::InvalidSlotMinutes {
                start: self.start_minutes,
                end: self.end_minutes,
            });
        }
        Ok(())
    }

    /// Materialize this slot against a reference week (Sunday-first midnights)
    /// for display, geometry, and collision purposes only.
    pub fn materialize(&self, week: &[DateTime<Utc>; 7]) -> TimeRange {
        let day_start = week[usize::from(self.day_of_week.min(6))];
        TimeRange {
            start: day_add_minutes(day_start, i64::from(self.start_minutes)),
            end: day_add_minutes(day_start, i64::from(self.end_minutes)),
        }
    }

    /// Translate a materialized range back into day-of-week plus minute
    /// offsets. The weekday comes from the target column, not the range.
    /// Both edges are measured from the start's day anchor, so a range ending
    /// at the next local midnight translates to minute 1440, not 0.
    pub fn from_range(
        id: Option<i64>,
        range: &TimeRange,
        day_of_week: u8,
        tz: Tz,
    ) -> RecurringSlot {
        let day_start = start_of_day(range.start, tz);
        let clamp_minutes = |minutes: i64| minutes.clamp(0, i64::from(MINUTES_PER_DAY)) as u32;
        RecurringSlot {
            id,
            day_of_week,
            start_minutes: clamp_minutes((range.start - day_start).num_minutes()),
            end_minutes: clamp_minutes((range.end - day_start).num_minutes()),
        }
    }
}

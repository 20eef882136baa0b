// Event model
// Timed calendar entry exchanged with the host as an immutable snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::models::time_range::TimeRange;

/// A timed calendar event.
///
/// All-day events are carried for the host's benefit but are excluded from
/// grid placement and collision checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl Event {
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, GridError> {
        let event = Self {
            id: None,
            summary: summary.into(),
            start,
            end,
            all_day: false,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Validate the event snapshot.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.end <= self.start {
            return Err(GridError::InvertedRange {
                start: self.start.to_rfc3339(),
                end: self.end.to_rfc3339(),
            });
        }
        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err(GridError::InvalidColor(color.clone()));
            }
        }
        Ok(())
    }

    pub fn range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Copy of this event with a new time span.
    pub fn with_range(&self, range: TimeRange) -> Event {
        Event {
            start: range.start,
            end: range.end,
            ..self.clone()
        }
    }
}

// Time range model
// Half-open [start, end) span shared by all grid entities.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// An immutable time span with the invariant `end > start`.
///
/// Duration is always derived from the endpoints, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, GridError> {
        if end <= start {
            return Err(GridError::InvertedRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Half-open intersection test: touching endpoints do not intersect, so
    /// back-to-back entities are permitted.
    pub fn intersects(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The same span re-anchored to a new start, preserving duration exactly.
    pub fn shifted_to(&self, start: DateTime<Utc>) -> TimeRange {
        TimeRange {
            start,
            end: start + self.duration(),
        }
    }

    pub fn with_start(&self, start: DateTime<Utc>) -> TimeRange {
        TimeRange { start, end: self.end }
    }

    pub fn with_end(&self, end: DateTime<Utc>) -> TimeRange {
        TimeRange { start: self.start, end }
    }
}

// Error types for the grid engine
// Host-supplied data is validated fail-fast; drag-time rejections are silent.

use thiserror::Error;

/// Errors produced when validating host-supplied entities or configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("end time {end} is not after start time {start}")]
    InvertedRange { start: String, end: String },

    #[error("day of week {0} is out of range (expected 0..=6, 0 = Sunday)")]
    DayOfWeekOutOfRange(u8),

    #[error("recurring slot minutes {start}..{end} are invalid (expected 0 <= start < end <= 1440)")]
    InvalidSlotMinutes { start: u32, end: u32 },

    #[error("color must be in hex format (#RRGGBB or #RGB), got {0:?}")]
    InvalidColor(String),

    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),
}

// Grid configuration
// All knobs the host can set, with the defaults the widget ships with.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Configuration for the time grid and its drag behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// First visible hour of each day column.
    pub min_hour: u32,
    /// Last visible hour (exclusive upper bound of the window, up to 24).
    pub max_hour: u32,
    /// Vertical pixel density of the time axis.
    pub pixels_per_hour: f32,
    /// Snap granularity in minutes.
    pub step_minutes: i64,
    /// Duration floor enforced on every drag action.
    pub min_event_duration_minutes: i64,
    /// Duration of a freshly created entity before the pointer moves.
    pub default_duration_minutes: i64,
    /// Entities rendered shorter than this cannot show distinct handles.
    pub min_event_height: f32,
    /// Height of the top resize hit zone, straddling the entity's top edge.
    pub top_handle_height: f32,
    /// Height of the bottom resize hit zone, straddling the bottom edge.
    pub bottom_handle_height: f32,
    /// Day columns never shrink below this width.
    pub day_min_width: f32,
    /// Width of the hour-label gutter left of the day columns.
    pub gutter_left: f32,
    /// Width of the scrollbar gutter right of the day columns.
    pub gutter_right: f32,
    /// Zone used for day boundaries and minute-of-day math.
    pub time_zone: Tz,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_hour: 0,
            max_hour: 24,
            pixels_per_hour: 48.0,
            step_minutes: 15,
            min_event_duration_minutes: 15,
            default_duration_minutes: 30,
            min_event_height: 20.0,
            top_handle_height: 5.0,
            bottom_handle_height: 5.0,
            day_min_width: 60.0,
            gutter_left: 40.0,
            gutter_right: 22.0,
            time_zone: chrono_tz::UTC,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<(), GridError> {
        if self.min_hour >= self.max_hour || self.max_hour > 24 {
            return Err(GridError::InvalidConfig(format!(
                "hour window {}..{} is invalid (expected min < max <= 24)",
                self.min_hour, self.max_hour
            )));
        }
        if !(self.pixels_per_hour.is_finite() && self.pixels_per_hour > 0.0) {
            return Err(GridError::InvalidConfig(format!(
                "pixels_per_hour must be positive, got {}",
                self.pixels_per_hour
            )));
        }
        if self.step_minutes <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "step_minutes must be positive, got {}",
                self.step_minutes
            )));
        }
        if self.min_event_duration_minutes <= 0 {
            return Err(GridError::InvalidConfig(format!(
                "min_event_duration_minutes must be positive, got {}",
                self.min_event_duration_minutes
            )));
        }
        if self.default_duration_minutes < self.min_event_duration_minutes {
            return Err(GridError::InvalidConfig(format!(
                "default_duration_minutes {} is below the duration floor {}",
                self.default_duration_minutes, self.min_event_duration_minutes
            )));
        }
        Ok(())
    }

    /// The visible window expressed in minutes of day.
    pub fn window_minutes(&self) -> (i64, i64) {
        (i64::from(self.min_hour) * 60, i64::from(self.max_hour) * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_hours() {
        let config = GridConfig {
            min_hour: 18,
            max_hour: 8,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_step() {
        let config = GridConfig {
            step_minutes: 0,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_default_below_floor() {
        let config = GridConfig {
            default_duration_minutes: 10,
            min_event_duration_minutes: 15,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_defaults() {
        let config: GridConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GridConfig::default());
        let config: GridConfig =
            serde_json::from_str(r#"{"max_hour": 18, "time_zone": "Europe/Paris"}"#).unwrap();
        assert_eq!(config.max_hour, 18);
        assert_eq!(config.time_zone, "Europe/Paris".parse().unwrap());
    }
}

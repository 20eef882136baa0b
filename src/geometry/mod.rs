// Time grid geometry
// Pure pixel/time coordinate transforms for the configured hour window.
//
// Everything here is linear arithmetic over elapsed-minutes-of-day; calendar
// correctness (DST, day length) stays with the zone-aware helpers in
// `utils::date` that produce the day anchors.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use egui::{Pos2, Rect, Vec2};

use crate::config::GridConfig;
use crate::models::time_range::TimeRange;
use crate::utils::date::{is_same_day, minutes_of_day};

/// Pixel/time transform for one day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGridGeometry {
    pixels_per_hour: f32,
    min_hour: u32,
    max_hour: u32,
    tz: Tz,
}

impl TimeGridGeometry {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            pixels_per_hour: config.pixels_per_hour,
            min_hour: config.min_hour,
            max_hour: config.max_hour,
            tz: config.time_zone,
        }
    }

    pub fn minutes_to_pixels(&self, minutes: f32) -> f32 {
        self.pixels_per_hour * minutes / 60.0
    }

    pub fn hours_to_pixels(&self, hours: f32) -> f32 {
        self.minutes_to_pixels(hours * 60.0)
    }

    /// Total height of the visible window.
    pub fn grid_height(&self) -> f32 {
        self.hours_to_pixels((self.max_hour - self.min_hour) as f32)
    }

    /// Inverse scale: pixel offset to whole minutes past `min_hour`.
    pub fn offset_to_minutes(&self, pixels: f32) -> i64 {
        (f64::from(pixels) / f64::from(self.pixels_per_hour) * 60.0).floor() as i64
    }

    /// Pixel offset to minutes of day (pointer coordinate to time-of-day).
    pub fn offset_to_minutes_of_day(&self, pixels: f32) -> i64 {
        i64::from(self.min_hour) * 60 + self.offset_to_minutes(pixels)
    }

    /// Vertical offset of an instant within its own day column. Times before
    /// `min_hour` clamp to the top of the window.
    pub fn time_to_offset(&self, time: DateTime<Utc>) -> f32 {
        let minutes = minutes_of_day(time, self.tz).max(i64::from(self.min_hour) * 60);
        self.minutes_to_pixels((minutes - i64::from(self.min_hour) * 60) as f32)
    }

    /// Rendered height of a range on its first day. Ends on a later calendar
    /// day truncate at the bottom of the window, so an entity is never drawn
    /// taller than the visible window.
    pub fn range_height(&self, range: &TimeRange) -> f32 {
        let min_minutes = i64::from(self.min_hour) * 60;
        let max_minutes = i64::from(self.max_hour) * 60;
        let start = minutes_of_day(range.start, self.tz).clamp(min_minutes, max_minutes);
        let end = if is_same_day(range.start, range.end, self.tz) {
            minutes_of_day(range.end, self.tz).clamp(min_minutes, max_minutes)
        } else {
            max_minutes
        };
        self.minutes_to_pixels((end - start).max(0) as f32)
    }

    /// Offset of the current-time marker, or `None` while `now` is above the
    /// visible window. Recomputed by the host on a periodic (~1 s) timer.
    pub fn now_offset(&self, now: DateTime<Utc>) -> Option<f32> {
        if minutes_of_day(now, self.tz) < i64::from(self.min_hour) * 60 {
            None
        } else {
            Some(self.time_to_offset(now))
        }
    }
}

/// Horizontal layout of the day columns inside a host container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    day_width: f32,
    gutter_left: f32,
    days: usize,
}

impl GridLayout {
    /// Fit seven day columns into `container_width`, never narrower than the
    /// configured minimum.
    pub fn new(config: &GridConfig, container_width: f32) -> Self {
        let available = container_width - config.gutter_left - config.gutter_right;
        Self {
            day_width: (available / 7.0).max(config.day_min_width),
            gutter_left: config.gutter_left,
            days: 7,
        }
    }

    pub fn day_width(&self) -> f32 {
        self.day_width
    }

    /// Day column under an x coordinate, or `None` outside the columns.
    pub fn column_at(&self, x: f32) -> Option<usize> {
        let left = x - self.gutter_left;
        if left < 0.0 || left >= self.day_width * self.days as f32 {
            return None;
        }
        Some(((left / self.day_width) as usize).min(self.days - 1))
    }

    pub fn column_left(&self, column: usize) -> f32 {
        self.gutter_left + self.day_width * column as f32
    }

    /// On-screen rectangle of a range rendered in a day column, in the same
    /// coordinate space the pointer entry points use.
    pub fn entity_rect(
        &self,
        geometry: &TimeGridGeometry,
        column: usize,
        range: &TimeRange,
    ) -> Rect {
        Rect::from_min_size(
            Pos2::new(self.column_left(column), geometry.time_to_offset(range.start)),
            Vec2::new(self.day_width, geometry.range_height(range)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn geometry() -> TimeGridGeometry {
        TimeGridGeometry::from_config(&GridConfig::default())
    }

    fn dt(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_time_to_offset() {
        assert_eq!(geometry().time_to_offset(dt(0, 0)), 0.0);
        assert_eq!(geometry().time_to_offset(dt(9, 30)), 9.5 * 48.0);
    }

    #[test]
    fn test_time_to_offset_clamps_before_min_hour() {
        let config = GridConfig {
            min_hour: 8,
            ..GridConfig::default()
        };
        let geometry = TimeGridGeometry::from_config(&config);
        assert_eq!(geometry.time_to_offset(dt(6, 0)), 0.0);
        assert_eq!(geometry.time_to_offset(dt(9, 0)), 48.0);
    }

    #[test]
    fn test_offset_to_minutes_inverse() {
        let geometry = geometry();
        for minutes in [0i64, 1, 15, 59, 60, 570, 1439] {
            let px = geometry.minutes_to_pixels(minutes as f32);
            assert_eq!(geometry.offset_to_minutes(px), minutes);
        }
    }

    #[test]
    fn test_range_height_same_day() {
        let range = TimeRange::new(dt(9, 0), dt(10, 30)).unwrap();
        assert_eq!(geometry().range_height(&range), 1.5 * 48.0);
    }

    #[test]
    fn test_range_height_truncates_multi_day() {
        let range = TimeRange::new(dt(22, 0), dt(22, 0) + chrono::Duration::hours(8)).unwrap();
        // Truncates at the bottom of the window: 22:00..24:00
        assert_eq!(geometry().range_height(&range), 2.0 * 48.0);
    }

    #[test]
    fn test_range_height_clamps_to_max_hour() {
        let config = GridConfig {
            max_hour: 18,
            ..GridConfig::default()
        };
        let geometry = TimeGridGeometry::from_config(&config);
        let range = TimeRange::new(dt(16, 0), dt(20, 0)).unwrap();
        assert_eq!(geometry.range_height(&range), 2.0 * 48.0);
    }

    #[test]
    fn test_now_offset_hidden_above_window() {
        let config = GridConfig {
            min_hour: 8,
            ..GridConfig::default()
        };
        let geometry = TimeGridGeometry::from_config(&config);
        assert_eq!(geometry.now_offset(dt(6, 30)), None);
        assert_eq!(geometry.now_offset(dt(8, 30)), Some(24.0));
    }

    #[test]
    fn test_layout_column_resolution() {
        let layout = GridLayout::new(&GridConfig::default(), 600.0);
        let day_width = (600.0 - 62.0) / 7.0;
        assert_eq!(layout.day_width(), day_width);
        assert_eq!(layout.column_at(10.0), None);
        assert_eq!(layout.column_at(40.0), Some(0));
        assert_eq!(layout.column_at(40.0 + 3.5 * day_width), Some(3));
        assert_eq!(layout.column_at(40.0 + 7.0 * day_width), None);
    }

    #[test]
    fn test_layout_enforces_min_day_width() {
        let layout = GridLayout::new(&GridConfig::default(), 200.0);
        assert_eq!(layout.day_width(), 60.0);
    }

    #[test]
    fn test_entity_rect() {
        let config = GridConfig::default();
        let layout = GridLayout::new(&config, 600.0);
        let geometry = TimeGridGeometry::from_config(&config);
        let range = TimeRange::new(dt(9, 0), dt(10, 0)).unwrap();
        let rect = layout.entity_rect(&geometry, 3, &range);
        assert_eq!(rect.top(), 9.0 * 48.0);
        assert_eq!(rect.height(), 48.0);
        assert_eq!(rect.left(), layout.column_left(3));
        assert_eq!(rect.width(), layout.day_width());
    }
}

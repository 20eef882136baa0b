// Test fixtures - reusable test data
// Shared grid setups and entity builders for the integration tests.
#![allow(dead_code)] // not every test target uses every helper

use chrono::{DateTime, TimeZone, Utc};
use egui::Pos2;
use timegrid::engine::{CalendarType, EditionMode, GridView};
use timegrid::geometry::GridLayout;
use timegrid::models::event::Event;
use timegrid::models::slot::{RecurringSlot, Slot};
use timegrid::GridConfig;

/// Capture log output in test failures.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reference instants on Wednesday 2025-01-15 (column 3 of its week).
pub fn wed(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, h, m, 0).unwrap()
}

/// Default config, 600 px container.
pub fn config() -> GridConfig {
    GridConfig::default()
}

pub fn layout() -> GridLayout {
    GridLayout::new(&config(), 600.0)
}

/// Pointer position at `column` and wall-clock time, for the default config.
pub fn pointer(column: usize, h: u32, m: u32) -> Pos2 {
    let layout = layout();
    Pos2::new(
        layout.column_left(column) + layout.day_width() / 2.0,
        config().pixels_per_hour * (h as f32 * 60.0 + m as f32) / 60.0,
    )
}

pub fn event(summary: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
    Event::new(summary, start, end).unwrap()
}

pub fn slot(start: DateTime<Utc>, end: DateTime<Utc>) -> Slot {
    Slot {
        id: None,
        start,
        end,
    }
}

pub fn recurring(day_of_week: u8, start_minutes: u32, end_minutes: u32) -> RecurringSlot {
    RecurringSlot::new(day_of_week, start_minutes, end_minutes).unwrap()
}

/// Event-edition view over the fixture week.
pub fn events_view(events: &[Event]) -> GridView<'_> {
    GridView {
        current_date: wed(12, 0),
        container_width: 600.0,
        events,
        slots: &[],
        recurring_slots: &[],
        edition_mode: EditionMode::Events,
        calendar_type: CalendarType::Specific,
    }
}

/// Slot-edition view over a weekly template.
pub fn recurring_view(recurring_slots: &[RecurringSlot]) -> GridView<'_> {
    GridView {
        current_date: wed(12, 0),
        container_width: 600.0,
        events: &[],
        slots: &[],
        recurring_slots,
        edition_mode: EditionMode::Slots,
        calendar_type: CalendarType::Generic,
    }
}

/// Slot-edition view over dated slots.
pub fn slots_view(slots: &[Slot]) -> GridView<'_> {
    GridView {
        current_date: wed(12, 0),
        container_width: 600.0,
        events: &[],
        slots,
        recurring_slots: &[],
        edition_mode: EditionMode::Slots,
        calendar_type: CalendarType::Specific,
    }
}

// Drag targets
// The capability interface each entity kind exposes to the generic drag
// algorithm, plus the three adapters: events, dated slots, recurring slots.
//
// Targets are rebuilt per pointer event from the host's borrowed collections;
// the engine never holds entities longer than one drag session. Malformed
// entities (and all-day events) are excluded from the working set here, with
// a warning, so the rest of the engine only ever sees well-formed ranges.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::models::event::Event;
use crate::models::slot::{RecurringSlot, Slot};
use crate::models::time_range::TimeRange;
use crate::models::{EntityKind, GridEntity};
use crate::utils::date::{day_add_minutes, start_of_day};

/// Default summary for events minted by a CREATE drag.
pub const NEW_EVENT_SUMMARY: &str = "new event";

/// Capability interface over one entity kind's collection. The drag
/// controller runs the same TimeRange algorithm against any implementation.
pub trait DragTarget {
    fn kind(&self) -> EntityKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialized range of entity `index`.
    fn range(&self, index: usize) -> TimeRange;

    /// Snapshot of entity `index` for the `on_change` original argument.
    fn entity(&self, index: usize) -> GridEntity;

    /// All materialized ranges, index-aligned, for collision queries.
    fn ranges(&self) -> Vec<TimeRange> {
        (0..self.len()).map(|index| self.range(index)).collect()
    }

    /// Whether MOVE may carry the entity to a different day column.
    fn column_mobile(&self) -> bool {
        false
    }

    /// Re-anchor a candidate to `column`, preserving its time of day. The
    /// default keeps the candidate on its own day (SPECIFIC entities drag
    /// vertically only).
    fn rebase(&self, range: TimeRange, _column: usize) -> TimeRange {
        range
    }

    /// Build the committed entity from a final range. `original` is `None`
    /// for CREATE; `column` is the day column the pointer ended in.
    fn build(&self, original: Option<usize>, range: TimeRange, column: usize) -> GridEntity;
}

fn warn_skipped(kind: &str, err: &crate::error::GridError) {
    log::warn!("excluding malformed {} from drag working set: {}", kind, err);
}

/// Adapter over the host's event collection.
pub struct EventTarget<'a> {
    items: Vec<&'a Event>,
}

impl<'a> EventTarget<'a> {
    pub fn new(events: &'a [Event]) -> Self {
        let items = events
            .iter()
            .filter(|event| !event.all_day)
            .filter(|event| match event.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn_skipped("event", &err);
                    false
                }
            })
            .collect();
        Self { items }
    }
}

impl DragTarget for EventTarget<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::Event
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn range(&self, index: usize) -> TimeRange {
        self.items[index].range()
    }

    fn entity(&self, index: usize) -> GridEntity {
        GridEntity::Event(self.items[index].clone())
    }

    fn build(&self, original: Option<usize>, range: TimeRange, _column: usize) -> GridEntity {
        match original {
            Some(index) => GridEntity::Event(self.items[index].with_range(range)),
            None => GridEntity::Event(Event {
                id: None,
                summary: NEW_EVENT_SUMMARY.to_string(),
                start: range.start,
                end: range.end,
                all_day: false,
                color: None,
            }),
        }
    }
}

/// Adapter over the host's dated slot collection.
pub struct SlotTarget<'a> {
    items: Vec<&'a Slot>,
}

impl<'a> SlotTarget<'a> {
    pub fn new(slots: &'a [Slot]) -> Self {
        let items = slots
            .iter()
            .filter(|slot| match slot.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn_skipped("slot", &err);
                    false
                }
            })
            .collect();
        Self { items }
    }
}

impl DragTarget for SlotTarget<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::Slot
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn range(&self, index: usize) -> TimeRange {
        self.items[index].range()
    }

    fn entity(&self, index: usize) -> GridEntity {
        GridEntity::Slot(*self.items[index])
    }

    fn build(&self, original: Option<usize>, range: TimeRange, _column: usize) -> GridEntity {
        match original {
            Some(index) => GridEntity::Slot(self.items[index].with_range(range)),
            None => GridEntity::Slot(Slot {
                id: None,
                start: range.start,
                end: range.end,
            }),
        }
    }
}

/// Adapter over the host's weekly-recurring slots, materialized against a
/// reference week. Commits translate back to day-of-week plus minute offsets;
/// the committed weekday comes from the day column the pointer ends in, so a
/// recurring slot can be dragged to a different weekday.
pub struct RecurringSlotTarget<'a> {
    items: Vec<&'a RecurringSlot>,
    ranges: Vec<TimeRange>,
    week: [DateTime<Utc>; 7],
    tz: Tz,
}

impl<'a> RecurringSlotTarget<'a> {
    pub fn new(slots: &'a [RecurringSlot], week: [DateTime<Utc>; 7], tz: Tz) -> Self {
        let mut items = Vec::with_capacity(slots.len());
        let mut ranges = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot.validate() {
                Ok(()) => {
                    items.push(slot);
                    ranges.push(slot.materialize(&week));
                }
                Err(err) => warn_skipped("recurring slot", &err),
            }
        }
        Self {
            items,
            ranges,
            week,
            tz,
        }
    }
}

impl DragTarget for RecurringSlotTarget<'_> {
    fn kind(&self) -> EntityKind {
        EntityKind::RecurringSlot
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn range(&self, index: usize) -> TimeRange {
        self.ranges[index]
    }

    fn entity(&self, index: usize) -> GridEntity {
        GridEntity::RecurringSlot(*self.items[index])
    }

    fn column_mobile(&self) -> bool {
        true
    }

    fn rebase(&self, range: TimeRange, column: usize) -> TimeRange {
        let day_start = start_of_day(range.start, self.tz);
        let target_day = self.week[column.min(6)];
        TimeRange {
            start: day_add_minutes(target_day, (range.start - day_start).num_minutes()),
            end: day_add_minutes(target_day, (range.end - day_start).num_minutes()),
        }
    }

    fn build(&self, original: Option<usize>, range: TimeRange, column: usize) -> GridEntity {
        let id = original.and_then(|index| self.items[index].id);
        let day_of_week = column.min(6) as u8;
        GridEntity::RecurringSlot(RecurringSlot::from_range(id, &range, day_of_week, self.tz))
    }
}

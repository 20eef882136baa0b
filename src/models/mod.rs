// Module exports for models

pub mod event;
pub mod slot;
pub mod time_range;

use serde::{Deserialize, Serialize};

use event::Event;
use slot::{RecurringSlot, Slot};

/// Which host collection (and collision set) an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Event,
    Slot,
    RecurringSlot,
}

/// Tagged union over the three draggable entity kinds. This is the currency
/// of commits: the engine proposes `GridEntity` values, the host owns the
/// collections they come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridEntity {
    Event(Event),
    Slot(Slot),
    RecurringSlot(RecurringSlot),
}

impl GridEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            GridEntity::Event(_) => EntityKind::Event,
            GridEntity::Slot(_) => EntityKind::Slot,
            GridEntity::RecurringSlot(_) => EntityKind::RecurringSlot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_grid_entity_kind() {
        let start = chrono::Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let end = start + chrono::Duration::hours(1);
        let event = Event::new("Meeting", start, end).unwrap();
        assert_eq!(GridEntity::Event(event).kind(), EntityKind::Event);
        let slot = Slot::new(start, end).unwrap();
        assert_eq!(GridEntity::Slot(slot).kind(), EntityKind::Slot);
        let recurring = RecurringSlot::new(0, 540, 600).unwrap();
        assert_eq!(
            GridEntity::RecurringSlot(recurring).kind(),
            EntityKind::RecurringSlot
        );
    }
}

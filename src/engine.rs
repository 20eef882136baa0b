// Engine facade
// Ties the drag controller to the host: picks the active entity kind from the
// edition mode and calendar type, routes pointer entry points through the
// matching drag target, and fires the host's callbacks on commit.
//
// The host owns the authoritative collections and passes a fresh `GridView`
// borrow into every entry point; the engine never stores entities across
// calls, only the open drag session.

use chrono::{DateTime, Utc};
use egui::{CursorIcon, PointerButton, Pos2, Rect};

use crate::config::GridConfig;
use crate::drag::target::{DragTarget, EventTarget, RecurringSlotTarget, SlotTarget};
use crate::drag::{DragCommit, DragController, DragSession};
use crate::error::GridError;
use crate::geometry::{GridLayout, TimeGridGeometry};
use crate::hit_test::HitTester;
use crate::models::event::Event;
use crate::models::slot::{RecurringSlot, Slot};
use crate::models::time_range::TimeRange;
use crate::models::{EntityKind, GridEntity};
use crate::utils::date::week_dates;

/// Which entity kind is currently draggable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditionMode {
    /// Read-only grid: pointer input opens no sessions.
    #[default]
    None,
    Events,
    Slots,
}

/// Whether slots carry absolute dates or repeat as a weekly template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarType {
    #[default]
    Specific,
    Generic,
}

/// One frame's view of the host state: borrowed collections plus the
/// selectors that decide what is editable.
pub struct GridView<'a> {
    /// Any instant inside the displayed week.
    pub current_date: DateTime<Utc>,
    /// Width of the host container, gutters included.
    pub container_width: f32,
    pub events: &'a [Event],
    pub slots: &'a [Slot],
    pub recurring_slots: &'a [RecurringSlot],
    pub edition_mode: EditionMode,
    pub calendar_type: CalendarType,
}

impl GridView<'_> {
    /// The entity kind the current selectors make editable.
    pub fn active_kind(&self) -> Option<EntityKind> {
        match (self.edition_mode, self.calendar_type) {
            (EditionMode::None, _) => None,
            (EditionMode::Events, _) => Some(EntityKind::Event),
            (EditionMode::Slots, CalendarType::Specific) => Some(EntityKind::Slot),
            (EditionMode::Slots, CalendarType::Generic) => Some(EntityKind::RecurringSlot),
        }
    }
}

/// Host callbacks, one create/change/delete triple per entity kind. All
/// optional: a missing handler silently drops the mutation.
#[derive(Default)]
pub struct GridCallbacks {
    pub on_create_event: Option<Box<dyn FnMut(&Event)>>,
    pub on_change_event: Option<Box<dyn FnMut(&Event, &Event)>>,
    pub on_delete_event: Option<Box<dyn FnMut(&Event)>>,
    pub on_create_slot: Option<Box<dyn FnMut(&Slot)>>,
    pub on_change_slot: Option<Box<dyn FnMut(&Slot, &Slot)>>,
    pub on_delete_slot: Option<Box<dyn FnMut(&Slot)>>,
    pub on_create_recurring_slot: Option<Box<dyn FnMut(&RecurringSlot)>>,
    pub on_change_recurring_slot: Option<Box<dyn FnMut(&RecurringSlot, &RecurringSlot)>>,
    pub on_delete_recurring_slot: Option<Box<dyn FnMut(&RecurringSlot)>>,
}

/// The widget's interaction core. The host wires pointer events from
/// whatever input source it has into the `handle_pointer_*` entry points and
/// persists mutations from the callbacks.
pub struct TimeGridEngine {
    config: GridConfig,
    geometry: TimeGridGeometry,
    controller: DragController,
    callbacks: GridCallbacks,
}

impl TimeGridEngine {
    pub fn new(config: GridConfig, callbacks: GridCallbacks) -> Result<Self, GridError> {
        config.validate()?;
        Ok(Self {
            geometry: TimeGridGeometry::from_config(&config),
            controller: DragController::new(&config),
            config,
            callbacks,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Column layout for the view's container width.
    pub fn layout(&self, view: &GridView) -> GridLayout {
        GridLayout::new(&self.config, view.container_width)
    }

    /// Midnights of the displayed week, first day of week first.
    pub fn week(&self, view: &GridView) -> [DateTime<Utc>; 7] {
        week_dates(view.current_date, self.config.time_zone)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.controller.session()
    }

    /// The live candidate range while a drag is open.
    pub fn provisional(&self) -> Option<TimeRange> {
        self.controller.session().map(|session| session.provisional)
    }

    /// On-screen rectangle of the provisional entity, for the host to render.
    pub fn provisional_rect(&self, view: &GridView) -> Option<Rect> {
        let session = self.controller.session()?;
        Some(self.layout(view).entity_rect(
            &self.geometry,
            session.column,
            &session.provisional,
        ))
    }

    /// Offset of the current-time marker, or `None` while it sits above the
    /// visible window.
    pub fn now_indicator_offset(&self, now: DateTime<Utc>) -> Option<f32> {
        self.geometry.now_offset(now)
    }

    /// Cursor feedback for a hover position: the open session's cursor while
    /// dragging, otherwise the action a pointer-down there would start.
    pub fn hover_cursor(&self, view: &GridView, pos: Pos2) -> Option<CursorIcon> {
        if let Some(session) = self.controller.session() {
            return Some(session.action.cursor_icon());
        }
        view.active_kind()?;
        let week = self.week(view);
        let layout = self.layout(view);
        let tester = HitTester::new(&self.geometry, &layout, &self.config, &week);
        let ranges = self.with_target(view, |target| target.ranges())?;
        let hit = tester.hit(&ranges, pos)?;
        let action = match hit.entity {
            Some(entity) => crate::drag::DragAction::from_zone(entity.zone),
            None => crate::drag::DragAction::Create,
        };
        Some(action.cursor_icon())
    }

    pub fn handle_pointer_down(&mut self, view: &GridView, pos: Pos2, button: PointerButton) {
        let Some(kind) = view.active_kind() else {
            self.controller.cancel();
            return;
        };
        self.cancel_on_kind_switch(kind);
        let week = self.week(view);
        let layout = self.layout(view);
        match kind {
            EntityKind::Event => self.controller.pointer_down(
                &EventTarget::new(view.events),
                &week,
                &layout,
                pos,
                button,
            ),
            EntityKind::Slot => self.controller.pointer_down(
                &SlotTarget::new(view.slots),
                &week,
                &layout,
                pos,
                button,
            ),
            EntityKind::RecurringSlot => self.controller.pointer_down(
                &RecurringSlotTarget::new(view.recurring_slots, week, self.config.time_zone),
                &week,
                &layout,
                pos,
                button,
            ),
        }
    }

    pub fn handle_pointer_move(&mut self, view: &GridView, pos: Pos2, secondary_down: bool) {
        let Some(kind) = view.active_kind() else {
            self.controller.cancel();
            return;
        };
        self.cancel_on_kind_switch(kind);
        let week = self.week(view);
        let layout = self.layout(view);
        match kind {
            EntityKind::Event => self.controller.pointer_move(
                &EventTarget::new(view.events),
                &layout,
                pos,
                secondary_down,
            ),
            EntityKind::Slot => self.controller.pointer_move(
                &SlotTarget::new(view.slots),
                &layout,
                pos,
                secondary_down,
            ),
            EntityKind::RecurringSlot => self.controller.pointer_move(
                &RecurringSlotTarget::new(view.recurring_slots, week, self.config.time_zone),
                &layout,
                pos,
                secondary_down,
            ),
        }
    }

    /// Close any open session and fire the matching create/change callback.
    pub fn handle_pointer_up(&mut self, view: &GridView, button: PointerButton) {
        let Some(kind) = view.active_kind() else {
            self.controller.cancel();
            return;
        };
        self.cancel_on_kind_switch(kind);
        let week = self.week(view);
        let commit = match kind {
            EntityKind::Event => self
                .controller
                .pointer_up(&EventTarget::new(view.events), button),
            EntityKind::Slot => self
                .controller
                .pointer_up(&SlotTarget::new(view.slots), button),
            EntityKind::RecurringSlot => self.controller.pointer_up(
                &RecurringSlotTarget::new(view.recurring_slots, week, self.config.time_zone),
                button,
            ),
        };
        if let Some(commit) = commit {
            self.dispatch_commit(commit);
        }
    }

    /// Abort any open session without a callback.
    pub fn cancel(&mut self) {
        self.controller.cancel();
    }

    /// Direct deletion, outside the drag state machine: the host's delete
    /// affordance calls this with the entity it was attached to.
    pub fn notify_delete(&mut self, entity: &GridEntity) {
        match entity {
            GridEntity::Event(event) => {
                if let Some(on_delete) = self.callbacks.on_delete_event.as_mut() {
                    on_delete(event);
                }
            }
            GridEntity::Slot(slot) => {
                if let Some(on_delete) = self.callbacks.on_delete_slot.as_mut() {
                    on_delete(slot);
                }
            }
            GridEntity::RecurringSlot(slot) => {
                if let Some(on_delete) = self.callbacks.on_delete_recurring_slot.as_mut() {
                    on_delete(slot);
                }
            }
        }
    }

    fn cancel_on_kind_switch(&mut self, kind: EntityKind) {
        if self
            .controller
            .session()
            .is_some_and(|session| session.kind != kind)
        {
            self.controller.cancel();
        }
    }

    fn with_target<R>(
        &self,
        view: &GridView,
        f: impl FnOnce(&dyn DragTarget) -> R,
    ) -> Option<R> {
        let week = self.week(view);
        Some(match view.active_kind()? {
            EntityKind::Event => f(&EventTarget::new(view.events)),
            EntityKind::Slot => f(&SlotTarget::new(view.slots)),
            EntityKind::RecurringSlot => f(&RecurringSlotTarget::new(
                view.recurring_slots,
                week,
                self.config.time_zone,
            )),
        })
    }

    fn dispatch_commit(&mut self, commit: DragCommit) {
        match commit.updated {
            GridEntity::Event(updated) => match commit.original {
                None => {
                    if let Some(on_create) = self.callbacks.on_create_event.as_mut() {
                        on_create(&updated);
                    }
                }
                Some(GridEntity::Event(original)) => {
                    if let Some(on_change) = self.callbacks.on_change_event.as_mut() {
                        on_change(&original, &updated);
                    }
                }
                Some(ref original) => log::error!("commit pairs event with {original:?}"),
            },
            GridEntity::Slot(updated) => match commit.original {
                None => {
                    if let Some(on_create) = self.callbacks.on_create_slot.as_mut() {
                        on_create(&updated);
                    }
                }
                Some(GridEntity::Slot(original)) => {
                    if let Some(on_change) = self.callbacks.on_change_slot.as_mut() {
                        on_change(&original, &updated);
                    }
                }
                Some(ref original) => log::error!("commit pairs slot with {original:?}"),
            },
            GridEntity::RecurringSlot(updated) => match commit.original {
                None => {
                    if let Some(on_create) = self.callbacks.on_create_recurring_slot.as_mut() {
                        on_create(&updated);
                    }
                }
                Some(GridEntity::RecurringSlot(original)) => {
                    if let Some(on_change) = self.callbacks.on_change_recurring_slot.as_mut() {
                        on_change(&original, &updated);
                    }
                }
                Some(ref original) => log::error!("commit pairs recurring slot with {original:?}"),
            },
        }
    }
}

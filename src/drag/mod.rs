// Drag state machine
// Owns the drag session between pointer-down and pointer-up and drives
// geometry, snapping, clamping, collision, and hit testing to produce one
// committed mutation per completed gesture.
//
// Single-threaded and event-driven: entry points are called from whatever
// input source the host wires up, strictly ordered. Candidates are always
// recomputed from the raw pointer position and the session anchor, never
// incrementally from the previous provisional range, so repeated moves cannot
// accumulate drift.

pub mod target;

use chrono::{DateTime, Utc};
use egui::{CursorIcon, PointerButton, Pos2};

use crate::clamp::BoundaryClamp;
use crate::collision::CollisionIndex;
use crate::config::GridConfig;
use crate::geometry::{GridLayout, TimeGridGeometry};
use crate::hit_test::{HitTester, HitZone};
use crate::models::time_range::TimeRange;
use crate::models::{EntityKind, GridEntity};
use crate::snap::SnapPolicy;
use crate::utils::date::{day_add_minutes, is_same_day, minutes_of_day, start_of_day};
use target::DragTarget;

/// What a drag gesture is doing to its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAction {
    Create,
    Move,
    ChangeStart,
    ChangeEnd,
}

impl DragAction {
    pub fn from_zone(zone: HitZone) -> Self {
        match zone {
            HitZone::TopHandle => DragAction::ChangeStart,
            HitZone::Body => DragAction::Move,
            HitZone::BottomHandle => DragAction::ChangeEnd,
        }
    }

    /// Cursor feedback for this action.
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            DragAction::Create => CursorIcon::Crosshair,
            DragAction::Move => CursorIcon::Move,
            DragAction::ChangeStart | DragAction::ChangeEnd => CursorIcon::ResizeVertical,
        }
    }
}

/// The open drag gesture. One owned value, replaced wholesale on every valid
/// pointer-move; exists only between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub action: DragAction,
    pub kind: EntityKind,
    /// Minutes of day under the pointer at drag start. For CREATE this is
    /// snapped and becomes the fixed anchor edge.
    pub anchor_minutes: i64,
    /// Distance in minutes from the pointer to the entity edge being
    /// manipulated, preserved so grabbing the middle of a handle feels
    /// natural.
    pub offset_minutes: i64,
    /// Day column where the gesture started.
    pub anchor_column: usize,
    /// Day column currently under the pointer (tracked for column-mobile
    /// MOVE gestures; otherwise stays at the anchor).
    pub column: usize,
    /// Local midnight of the anchor day.
    pub day_start: DateTime<Utc>,
    /// Index and range of the entity being dragged; `None` for CREATE.
    pub original: Option<(usize, TimeRange)>,
    /// The live candidate shown while dragging.
    pub provisional: TimeRange,
}

impl DragSession {
    pub fn original_range(&self) -> Option<TimeRange> {
        self.original.map(|(_, range)| range)
    }
}

/// A committed mutation emitted on pointer-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DragCommit {
    /// The entity as it was before the gesture; `None` for CREATE.
    pub original: Option<GridEntity>,
    /// The entity the host should now store.
    pub updated: GridEntity,
}

/// The drag state machine: `IDLE` (no session) or one open session.
pub struct DragController {
    config: GridConfig,
    geometry: TimeGridGeometry,
    snap: SnapPolicy,
    clamp: BoundaryClamp,
    session: Option<DragSession>,
}

impl DragController {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            config: config.clone(),
            geometry: TimeGridGeometry::from_config(config),
            snap: SnapPolicy::new(config.step_minutes),
            clamp: BoundaryClamp::from_config(config),
            session: None,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Discard any open session without emitting a commit (secondary button,
    /// edition-mode switch, unmount).
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            log::debug!("drag session cancelled");
        }
    }

    /// Open a session if the pointer lands inside the grid. No-op for
    /// non-primary buttons or while a session is already open.
    pub fn pointer_down<T: DragTarget>(
        &mut self,
        target: &T,
        week: &[DateTime<Utc>; 7],
        layout: &GridLayout,
        pos: Pos2,
        button: PointerButton,
    ) {
        if button != PointerButton::Primary || self.session.is_some() {
            return;
        }
        let tester = HitTester::new(&self.geometry, layout, &self.config, week);
        let ranges = target.ranges();
        let Some(hit) = tester.hit(&ranges, pos) else {
            return;
        };

        let session = match hit.entity {
            Some(entity_hit) => {
                let range = target.range(entity_hit.index);
                let action = DragAction::from_zone(entity_hit.zone);
                let (top_minutes, bottom_minutes) = self.edge_minutes(&range);
                let edge = match action {
                    DragAction::ChangeEnd => bottom_minutes,
                    _ => top_minutes,
                };
                DragSession {
                    action,
                    kind: target.kind(),
                    anchor_minutes: hit.minutes_of_day,
                    offset_minutes: hit.minutes_of_day - edge,
                    anchor_column: hit.column,
                    column: hit.column,
                    day_start: start_of_day(range.start, self.config.time_zone),
                    original: Some((entity_hit.index, range)),
                    provisional: range,
                }
            }
            None => {
                let anchor = self.clamp.clamp_create_edge(self.snap.snap(hit.minutes_of_day));
                let trailing = self
                    .clamp
                    .clamp_create_edge(anchor + self.config.default_duration_minutes);
                if trailing <= anchor {
                    return;
                }
                let day_start = week[hit.column];
                let candidate = TimeRange {
                    start: day_add_minutes(day_start, anchor),
                    end: day_add_minutes(day_start, trailing),
                };
                // Seat the fresh entity just before the first obstruction so
                // the committed range can never collide.
                let index = CollisionIndex::new(ranges);
                let Some(seated) = index.clip_before_first(&candidate, None) else {
                    return;
                };
                if !self.clamp.meets_duration_floor(&seated) {
                    return;
                }
                DragSession {
                    action: DragAction::Create,
                    kind: target.kind(),
                    anchor_minutes: anchor,
                    offset_minutes: 0,
                    anchor_column: hit.column,
                    column: hit.column,
                    day_start,
                    original: None,
                    provisional: seated,
                }
            }
        };

        log::debug!(
            "drag session opened: {:?} {:?} at column {}",
            session.action,
            session.kind,
            session.column
        );
        self.session = Some(session);
    }

    /// Recompute the provisional range for the current pointer position.
    /// Invalid candidates (clamp, duration floor, collision) are silently
    /// discarded, leaving the last valid provisional in place.
    pub fn pointer_move<T: DragTarget>(
        &mut self,
        target: &T,
        layout: &GridLayout,
        pos: Pos2,
        secondary_down: bool,
    ) {
        let Some(session) = self.session.clone() else {
            return;
        };
        if secondary_down {
            self.cancel();
            return;
        }
        if session.kind != target.kind() {
            self.cancel();
            return;
        }

        let y = pos.y.clamp(0.0, self.geometry.grid_height());
        let pointer_minutes = self.geometry.offset_to_minutes_of_day(y);

        let mut candidate = match session.action {
            DragAction::Create => {
                let moving = self
                    .clamp
                    .clamp_create_edge(self.snap.snap(pointer_minutes));
                let (start, end) = if moving <= session.anchor_minutes {
                    (moving, session.anchor_minutes)
                } else {
                    (session.anchor_minutes, moving)
                };
                if end <= start {
                    return;
                }
                TimeRange {
                    start: day_add_minutes(session.day_start, start),
                    end: day_add_minutes(session.day_start, end),
                }
            }
            DragAction::Move => {
                let Some((_, original)) = session.original else {
                    return;
                };
                let start = self.clamp.clamp_move_start(
                    self.snap.snap(pointer_minutes - session.offset_minutes),
                    original.duration_minutes(),
                );
                // Both edges shift together: duration is carried over exactly
                original.shifted_to(day_add_minutes(session.day_start, start))
            }
            DragAction::ChangeStart => {
                let Some((_, original)) = session.original else {
                    return;
                };
                let (_, bottom_minutes) = self.edge_minutes(&original);
                let start = self.clamp.clamp_change_start(
                    self.snap.snap(pointer_minutes - session.offset_minutes),
                    bottom_minutes,
                );
                original.with_start(day_add_minutes(session.day_start, start))
            }
            DragAction::ChangeEnd => {
                let Some((_, original)) = session.original else {
                    return;
                };
                let start_minutes = minutes_of_day(original.start, self.config.time_zone);
                let end = self.clamp.clamp_change_end(
                    self.snap.snap(pointer_minutes - session.offset_minutes),
                    start_minutes,
                );
                original.with_end(day_add_minutes(session.day_start, end))
            }
        };

        if !self.clamp.meets_duration_floor(&candidate) {
            return;
        }

        let mut column = session.column;
        if target.column_mobile() && session.action == DragAction::Move {
            column = layout.column_at(pos.x).unwrap_or(column);
            candidate = target.rebase(candidate, column);
        }

        let excluding = session.original.map(|(index, _)| index);
        if !CollisionIndex::new(target.ranges()).is_free(&candidate, excluding) {
            return;
        }

        self.session = Some(DragSession {
            provisional: candidate,
            column,
            ..session
        });
    }

    /// Close the session and return the committed mutation, if any. The
    /// session is discarded unconditionally, whether or not a commit fires.
    pub fn pointer_up<T: DragTarget>(
        &mut self,
        target: &T,
        button: PointerButton,
    ) -> Option<DragCommit> {
        if button == PointerButton::Secondary {
            self.cancel();
            return None;
        }
        if button != PointerButton::Primary {
            return None;
        }
        let session = self.session.take()?;
        if session.kind != target.kind() {
            return None;
        }

        match session.original {
            None => {
                let updated = target.build(None, session.provisional, session.column);
                log::debug!("drag commit: create {:?}", session.kind);
                Some(DragCommit {
                    original: None,
                    updated,
                })
            }
            Some((index, original_range)) => {
                if session.provisional == original_range && session.column == session.anchor_column
                {
                    // Unchanged: suppress the no-op mutation
                    return None;
                }
                let updated = target.build(Some(index), session.provisional, session.column);
                log::debug!("drag commit: {:?} {:?}", session.action, session.kind);
                Some(DragCommit {
                    original: Some(target.entity(index)),
                    updated,
                })
            }
        }
    }

    /// Top and bottom edge of a range in minutes of day, clamped the same way
    /// the rendered entity is.
    fn edge_minutes(&self, range: &TimeRange) -> (i64, i64) {
        let tz = self.config.time_zone;
        let (min_minutes, max_minutes) = self.config.window_minutes();
        let top = minutes_of_day(range.start, tz).max(min_minutes);
        let bottom = if is_same_day(range.start, range.end, tz) {
            minutes_of_day(range.end, tz).min(max_minutes)
        } else {
            max_minutes
        };
        (top, bottom)
    }
}

//! Pointer-gesture state machine driving the cabinet layout engine.
//!
//! One continuous pointer interaction is one [`GestureSession`]: created at
//! pointer-down, updated on every pointer-move, consumed at pointer-up or
//! cancel. The transitions are plain methods on [`LayoutController`] so the
//! machine is testable without a live input device.

use tracing::{debug, warn};

use super::{
    move_by, resize_axis_aligned, resize_rotation_aware, rotate_toward, Cabinet, CabinetLayout,
    Corner,
};
use crate::error::EditorError;
use crate::store::{CabinetStore, GeometryPatch};

/// Pointer movement below this many pixels between down and up is a
/// selection click, not a drag.
pub const DRAG_THRESHOLD_PX: f64 = 2.0;

/// Pixel-space rectangle of the layout container, captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A container without positive extent cannot map pixels to unit space.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// What a pointer-down grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// The cabinet body: dragging moves it.
    Move,
    /// The rotate handle above the cabinet.
    Rotate,
    /// One of the four corner resize handles.
    Resize(Corner),
}

/// Ephemeral per-pointer gesture state. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    pub cabinet_id: u64,
    pub pointer_id: u64,
    pub kind: GestureKind,
    /// Pointer position at pointer-down, in container pixels.
    pub start_pointer: (f64, f64),
    /// Cabinet geometry at pointer-down; all deltas apply to this snapshot.
    pub start_geometry: Cabinet,
    pub container: PixelRect,
    /// Set once the pointer crosses [`DRAG_THRESHOLD_PX`]. Until then the
    /// cabinet geometry is left untouched so a click stays a click.
    pub has_moved: bool,
}

/// Result of finishing a gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// The pointer never crossed the drag threshold: the cabinet was
    /// selected, geometry unchanged.
    Selected(u64),
    /// A real drag finished; the patch carries the geometry to persist.
    Moved { cabinet_id: u64, patch: GeometryPatch },
    /// No session matched this pointer, or the target vanished mid-drag.
    Ignored,
}

/// Corner-resize strategy.
///
/// Axis-aligned matches the handles' screen directions only for unrotated
/// cabinets; rotation-aware projects the pointer delta onto the cabinet's
/// local axes and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeStrategy {
    AxisAligned,
    #[default]
    RotationAware,
}

/// Owns one warehouse document's cabinet layout, selection and the single
/// active gesture session.
#[derive(Debug, Default)]
pub struct LayoutController {
    layout: CabinetLayout,
    session: Option<GestureSession>,
    selected_id: Option<u64>,
    edit_mode: bool,
    resize_strategy: ResizeStrategy,
}

impl LayoutController {
    pub fn new(layout: CabinetLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn layout(&self) -> &CabinetLayout {
        &self.layout
    }

    /// Mutable access for the external create/delete/load operations.
    pub fn layout_mut(&mut self) -> &mut CabinetLayout {
        &mut self.layout
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Enables or disables edit mode. Leaving edit mode clears the
    /// selection and drops any active session.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.edit_mode = enabled;
        if !enabled {
            self.selected_id = None;
            self.session = None;
        }
    }

    pub fn resize_strategy(&self) -> ResizeStrategy {
        self.resize_strategy
    }

    pub fn set_resize_strategy(&mut self, strategy: ResizeStrategy) {
        self.resize_strategy = strategy;
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// Selects a cabinet directly (e.g. from a list view).
    pub fn select(&mut self, id: u64) -> bool {
        if self.layout.get(id).is_some() {
            self.selected_id = Some(id);
            true
        } else {
            false
        }
    }

    /// A click on empty canvas clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Starts a gesture session at pointer-down.
    ///
    /// Ignored (returns `false`) outside edit mode, while another session
    /// is active, for unknown cabinets, and for degenerate containers.
    /// Pointer capture on the caller's side ensures subsequent move/up
    /// events route back here with the same pointer id.
    pub fn begin_gesture(
        &mut self,
        cabinet_id: u64,
        pointer_id: u64,
        kind: GestureKind,
        pointer: (f64, f64),
        container: PixelRect,
    ) -> bool {
        if !self.edit_mode || self.session.is_some() || container.is_degenerate() {
            return false;
        }
        let Some(start) = self.layout.get(cabinet_id).copied() else {
            return false;
        };
        debug!(cabinet_id, ?kind, "gesture started");
        self.session = Some(GestureSession {
            cabinet_id,
            pointer_id,
            kind,
            start_pointer: pointer,
            start_geometry: start,
            container,
            has_moved: false,
        });
        true
    }

    /// Applies a pointer-move to the active session.
    ///
    /// Events for other pointer ids are ignored. If the target cabinet was
    /// deleted mid-drag the session is silently abandoned. Geometry is only
    /// mutated once the movement threshold has been crossed; every mutation
    /// is computed fresh from the start snapshot, so sub-threshold jitter
    /// never leaves a trace.
    pub fn update_gesture(&mut self, pointer_id: u64, pointer: (f64, f64)) {
        let Some(mut session) = self.session else {
            return;
        };
        if session.pointer_id != pointer_id {
            return;
        }
        if self.layout.get(session.cabinet_id).is_none() {
            debug!(
                cabinet_id = session.cabinet_id,
                "gesture target vanished, abandoning session"
            );
            self.session = None;
            return;
        }

        let dx_px = pointer.0 - session.start_pointer.0;
        let dy_px = pointer.1 - session.start_pointer.1;
        if dx_px.abs() > DRAG_THRESHOLD_PX || dy_px.abs() > DRAG_THRESHOLD_PX {
            session.has_moved = true;
        }
        let apply = session.has_moved;
        self.session = Some(session);
        if !apply {
            return;
        }

        let start = session.start_geometry;
        let dx = dx_px / session.container.width;
        let dy = dy_px / session.container.height;
        let next = match session.kind {
            GestureKind::Move => move_by(&start, dx, dy),
            GestureKind::Rotate => rotate_toward(&start, &session.container, pointer.0, pointer.1),
            GestureKind::Resize(corner) => match self.resize_strategy {
                ResizeStrategy::AxisAligned => resize_axis_aligned(&start, corner, dx, dy),
                ResizeStrategy::RotationAware => resize_rotation_aware(&start, corner, dx, dy),
            },
        };
        if let Some(cabinet) = self.layout.get_mut(session.cabinet_id) {
            *cabinet = next;
        }
    }

    /// Finishes a gesture at pointer-up.
    ///
    /// Below the drag threshold the gesture is a selection click; otherwise
    /// the caller receives the full geometry patch to hand to the
    /// persistence collaborator (see [`LayoutController::commit`]).
    pub fn end_gesture(&mut self, pointer_id: u64) -> GestureOutcome {
        let Some(session) = self.session else {
            return GestureOutcome::Ignored;
        };
        if session.pointer_id != pointer_id {
            return GestureOutcome::Ignored;
        }
        self.session = None;

        let Some(cabinet) = self.layout.get(session.cabinet_id) else {
            return GestureOutcome::Ignored;
        };
        if !session.has_moved {
            self.selected_id = Some(session.cabinet_id);
            return GestureOutcome::Selected(session.cabinet_id);
        }
        debug!(cabinet_id = session.cabinet_id, "gesture finished");
        GestureOutcome::Moved {
            cabinet_id: session.cabinet_id,
            patch: GeometryPatch::full(cabinet),
        }
    }

    /// Aborts the active gesture without committing (pointer-cancel).
    /// Whatever optimistic geometry is already applied stays as-is.
    pub fn cancel_gesture(&mut self, pointer_id: u64) {
        if let Some(session) = self.session {
            if session.pointer_id == pointer_id {
                debug!(cabinet_id = session.cabinet_id, "gesture cancelled");
                self.session = None;
            }
        }
    }

    /// Persists a finished gesture through the collaborator.
    ///
    /// On success the returned cabinet is merged back into local state. On
    /// failure the optimistic local geometry is kept and a non-fatal
    /// [`EditorError::Persistence`] is surfaced; no retry, no rollback.
    pub fn commit(
        &mut self,
        store: &dyn CabinetStore,
        cabinet_id: u64,
        patch: &GeometryPatch,
    ) -> Result<(), EditorError> {
        match store.update_geometry(cabinet_id, patch) {
            Ok(updated) => {
                self.layout.apply_update(updated);
                Ok(())
            }
            Err(source) => {
                warn!(
                    cabinet_id,
                    error = %source,
                    "cabinet geometry save failed, keeping optimistic local state"
                );
                Err(EditorError::Persistence { source })
            }
        }
    }
}

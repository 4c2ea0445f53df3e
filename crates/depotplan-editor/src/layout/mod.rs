//! Rectangle layout engine for cabinet footprints.
//!
//! A cabinet is an axis-aligned rectangle, rotated around its own center
//! for display. Position and size live in unit-square coordinates; the
//! containment invariant (`pos + size <= 1`) is measured on the unrotated
//! bounding box. All mutation flows through the pure transition functions
//! below, driven by the gesture controller in [`gesture`].

mod gesture;

pub use gesture::{
    GestureKind, GestureOutcome, GestureSession, LayoutController, PixelRect, ResizeStrategy,
    DRAG_THRESHOLD_PX,
};

use depotplan_geometry::{clamp01, rotate_vector, Point};
use serde::{Deserialize, Serialize};

/// Smallest allowed cabinet extent on either axis.
pub const MIN_CABINET_EXTENT: f64 = 0.01;
/// Default footprint for cabinets persisted without explicit dimensions.
pub const DEFAULT_CABINET_WIDTH: f64 = 0.12;
pub const DEFAULT_CABINET_HEIGHT: f64 = 0.18;

/// A cabinet footprint inside a warehouse floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cabinet {
    pub id: u64,
    pub pos_x: f64,
    pub pos_y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, unbounded, applied around the cabinet center.
    pub rotation: f64,
}

impl Cabinet {
    /// Creates a cabinet with the default footprint at the given position.
    pub fn new(id: u64, pos_x: f64, pos_y: f64) -> Self {
        Self {
            id,
            pos_x,
            pos_y,
            width: DEFAULT_CABINET_WIDTH,
            height: DEFAULT_CABINET_HEIGHT,
            rotation: 0.0,
        }
        .sanitized()
    }

    /// Repairs geometry loaded from the persistence collaborator.
    ///
    /// Non-finite fields fall back to defaults, sizes are floored at
    /// [`MIN_CABINET_EXTENT`] and clamped into the unit square, and the
    /// position is pulled back so the unrotated box stays inside it.
    pub fn sanitized(mut self) -> Self {
        let width = if self.width.is_finite() {
            self.width
        } else {
            DEFAULT_CABINET_WIDTH
        };
        let height = if self.height.is_finite() {
            self.height
        } else {
            DEFAULT_CABINET_HEIGHT
        };
        self.width = clamp01(width).max(MIN_CABINET_EXTENT);
        self.height = clamp01(height).max(MIN_CABINET_EXTENT);

        let pos_x = if self.pos_x.is_finite() { self.pos_x } else { 0.0 };
        let pos_y = if self.pos_y.is_finite() { self.pos_y } else { 0.0 };
        self.pos_x = clamp01(pos_x.min(1.0 - self.width));
        self.pos_y = clamp01(pos_y.min(1.0 - self.height));

        if !self.rotation.is_finite() {
            self.rotation = 0.0;
        }
        self
    }

    /// Center of the unrotated bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.pos_x + self.width / 2.0, self.pos_y + self.height / 2.0)
    }

    /// Rotation wrapped into `[0, 360)` for display.
    pub fn display_rotation(&self) -> f64 {
        self.rotation.rem_euclid(360.0)
    }
}

/// The in-memory cabinet set of one warehouse document.
#[derive(Debug, Clone, Default)]
pub struct CabinetLayout {
    cabinets: Vec<Cabinet>,
}

impl CabinetLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layout from loaded cabinets, sanitizing each one.
    pub fn from_cabinets(cabinets: Vec<Cabinet>) -> Self {
        Self {
            cabinets: cabinets.into_iter().map(Cabinet::sanitized).collect(),
        }
    }

    /// Replaces the whole set, sanitizing each cabinet.
    pub fn set_cabinets(&mut self, cabinets: Vec<Cabinet>) {
        self.cabinets = cabinets.into_iter().map(Cabinet::sanitized).collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cabinet> {
        self.cabinets.iter()
    }

    pub fn len(&self) -> usize {
        self.cabinets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cabinets.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Cabinet> {
        self.cabinets.iter().find(|c| c.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: u64) -> Option<&mut Cabinet> {
        self.cabinets.iter_mut().find(|c| c.id == id)
    }

    /// Inserts or replaces a cabinet, sanitizing it.
    pub fn insert(&mut self, cabinet: Cabinet) {
        let cabinet = cabinet.sanitized();
        match self.get_mut(cabinet.id) {
            Some(existing) => *existing = cabinet,
            None => self.cabinets.push(cabinet),
        }
    }

    /// Removes a cabinet (the external delete operation).
    pub fn remove(&mut self, id: u64) -> Option<Cabinet> {
        let index = self.cabinets.iter().position(|c| c.id == id)?;
        Some(self.cabinets.remove(index))
    }

    /// Merges a collaborator response back into local state. Unknown ids
    /// are ignored.
    pub fn apply_update(&mut self, updated: Cabinet) {
        if let Some(existing) = self.get_mut(updated.id) {
            *existing = updated.sanitized();
        }
    }
}

/// Corner handles of a cabinet, named by compass direction on the
/// unrotated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    /// Per-axis signs of the handle relative to the center: east and south
    /// are positive.
    fn signs(self) -> (f64, f64) {
        match self {
            Corner::NorthWest => (-1.0, -1.0),
            Corner::NorthEast => (1.0, -1.0),
            Corner::SouthWest => (-1.0, 1.0),
            Corner::SouthEast => (1.0, 1.0),
        }
    }
}

/// Moves a cabinet by a unit-space delta from its gesture-start snapshot.
///
/// The position is clamped so the unrotated box stays inside the unit
/// square; a delta pushing past an edge lands the cabinet flush against it
/// rather than being discarded.
pub fn move_by(start: &Cabinet, dx: f64, dy: f64) -> Cabinet {
    let mut x = clamp01(start.pos_x + dx);
    let mut y = clamp01(start.pos_y + dy);
    if x + start.width > 1.0 {
        x = 1.0 - start.width;
    }
    if y + start.height > 1.0 {
        y = 1.0 - start.height;
    }
    Cabinet {
        pos_x: x,
        pos_y: y,
        ..*start
    }
}

/// Rotates a cabinet toward a pointer position in container-pixel space.
///
/// The center comes from the gesture-start snapshot. The rotate handle sits
/// above the cabinet, so 90 degrees are added to make the handle track the
/// pointer directly instead of its perpendicular. Rotation is unbounded.
pub fn rotate_toward(
    start: &Cabinet,
    container: &PixelRect,
    pointer_x: f64,
    pointer_y: f64,
) -> Cabinet {
    let cx = container.left + (start.pos_x + start.width / 2.0) * container.width;
    let cy = container.top + (start.pos_y + start.height / 2.0) * container.height;
    let angle = (pointer_y - cy).atan2(pointer_x - cx).to_degrees();
    Cabinet {
        rotation: angle + 90.0,
        ..*start
    }
}

fn clamp_box(mut x: f64, mut y: f64, mut w: f64, mut h: f64) -> (f64, f64, f64, f64) {
    // Keep the anchored edge where possible: cap growth at the border
    // first, then floor the size and pull the position back in.
    if x + w > 1.0 {
        w = 1.0 - x;
    }
    if y + h > 1.0 {
        h = 1.0 - y;
    }
    w = w.clamp(MIN_CABINET_EXTENT, 1.0);
    h = h.clamp(MIN_CABINET_EXTENT, 1.0);
    x = clamp01(x).min(1.0 - w);
    y = clamp01(y).min(1.0 - h);
    (x, y, w, h)
}

/// Axis-aligned corner resize, ignoring rotation.
///
/// Dragging a corner adjusts width/height; for corners not on the max-x /
/// max-y side the position shifts so the opposite corner stays fixed.
pub fn resize_axis_aligned(start: &Cabinet, corner: Corner, dx: f64, dy: f64) -> Cabinet {
    let (x, y, w, h) = match corner {
        Corner::SouthEast => (
            start.pos_x,
            start.pos_y,
            clamp01(start.width + dx),
            clamp01(start.height + dy),
        ),
        Corner::SouthWest => (
            clamp01(start.pos_x + dx),
            start.pos_y,
            clamp01(start.width - dx),
            clamp01(start.height + dy),
        ),
        Corner::NorthEast => (
            start.pos_x,
            clamp01(start.pos_y + dy),
            clamp01(start.width + dx),
            clamp01(start.height - dy),
        ),
        Corner::NorthWest => (
            clamp01(start.pos_x + dx),
            clamp01(start.pos_y + dy),
            clamp01(start.width - dx),
            clamp01(start.height - dy),
        ),
    };

    let (x, y, w, h) = clamp_box(x, y, w, h);
    Cabinet {
        pos_x: x,
        pos_y: y,
        width: w,
        height: h,
        ..*start
    }
}

/// Rotation-aware corner resize.
///
/// The pointer delta is projected onto the cabinet's local (pre-rotation)
/// axes, width/height grow with per-corner signs, and the cabinet
/// re-centers so the opposite corner stays fixed in world space. Sizes are
/// floored at [`MIN_CABINET_EXTENT`] and the final unrotated box is clamped
/// into the unit square.
pub fn resize_rotation_aware(start: &Cabinet, corner: Corner, dx: f64, dy: f64) -> Cabinet {
    let (ldx, ldy) = rotate_vector(dx, dy, -start.rotation);
    let (sx, sy) = corner.signs();

    let new_w = (start.width + sx * ldx).clamp(MIN_CABINET_EXTENT, 1.0);
    let new_h = (start.height + sy * ldy).clamp(MIN_CABINET_EXTENT, 1.0);

    // The corner opposite the handle stays put in world space.
    let center = start.center();
    let (fx, fy) = rotate_vector(
        -sx * start.width / 2.0,
        -sy * start.height / 2.0,
        start.rotation,
    );
    let fixed_world = (center.x + fx, center.y + fy);
    let (nfx, nfy) = rotate_vector(-sx * new_w / 2.0, -sy * new_h / 2.0, start.rotation);
    let new_center = (fixed_world.0 - nfx, fixed_world.1 - nfy);

    let (x, y, w, h) = clamp_box(
        new_center.0 - new_w / 2.0,
        new_center.1 - new_h / 2.0,
        new_w,
        new_h,
    );
    Cabinet {
        pos_x: x,
        pos_y: y,
        width: w,
        height: h,
        ..*start
    }
}

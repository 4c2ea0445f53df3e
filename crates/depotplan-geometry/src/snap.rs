//! Angle and guide snapping for the polygon editor's auto-align aid.

use std::f64::consts::PI;

/// Angle grid the auto-align snap rounds to (45 degree steps).
pub const SNAP_ANGLE_STEP: f64 = PI / 4.0;

/// Maximum angular distance at which a vector is pulled onto the grid
/// (about 7.5 degrees).
pub const ANGLE_SNAP_THRESHOLD: f64 = PI / 24.0;

/// Maximum absolute distance, in unit-square units, at which a coordinate
/// snaps to a guide value.
pub const GUIDE_SNAP_DISTANCE: f64 = 0.008;

/// Result of an angle snap attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedVector {
    pub x: f64,
    pub y: f64,
    /// `true` when the vector was rotated onto a 45 degree multiple.
    pub snapped: bool,
}

/// Rounds the angle of `(vx, vy)` to the nearest 45 degree multiple.
///
/// The snap only takes effect when the angular distance between the original
/// and the rounded angle is within [`ANGLE_SNAP_THRESHOLD`]; otherwise the
/// vector comes back unchanged with `snapped == false`. Length is preserved
/// in either case. A zero-length input yields the zero vector, not snapped.
pub fn snap_vector_angle(vx: f64, vy: f64) -> SnappedVector {
    let length = vx.hypot(vy);
    if length == 0.0 {
        return SnappedVector {
            x: 0.0,
            y: 0.0,
            snapped: false,
        };
    }
    let angle = vy.atan2(vx);
    let snapped_angle = (angle / SNAP_ANGLE_STEP).round() * SNAP_ANGLE_STEP;
    // Shortest angular distance, robust across the +/- pi seam.
    let diff = (angle - snapped_angle).sin().atan2((angle - snapped_angle).cos()).abs();
    if diff > ANGLE_SNAP_THRESHOLD {
        return SnappedVector {
            x: vx,
            y: vy,
            snapped: false,
        };
    }
    SnappedVector {
        x: snapped_angle.cos() * length,
        y: snapped_angle.sin() * length,
        snapped: true,
    }
}

/// Snaps `value` to the nearest entry of `guides` when it lies within
/// [`GUIDE_SNAP_DISTANCE`], otherwise returns `value` unchanged.
pub fn snap_to_guides(value: f64, guides: &[f64]) -> f64 {
    let mut best = value;
    let mut best_distance = f64::INFINITY;
    for &guide in guides {
        let distance = (guide - value).abs();
        if distance < best_distance {
            best_distance = distance;
            best = guide;
        }
    }
    if best_distance <= GUIDE_SNAP_DISTANCE {
        best
    } else {
        value
    }
}

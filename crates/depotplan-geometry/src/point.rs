use serde::{Deserialize, Serialize};

/// Represents a 2D point with X and Y coordinates.
///
/// Shape and layout geometry keeps points inside the unit square; the type
/// itself does not enforce that, callers clamp via [`Point::clamped_unit`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Returns `true` when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the point with both coordinates clamped into `[0, 1]`.
    pub fn clamped_unit(&self) -> Point {
        Point::new(clamp01(self.x), clamp01(self.y))
    }
}

/// Clamps a coordinate into the unit range `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Rotates the vector `(vx, vy)` by `angle_deg` degrees counter-clockwise.
pub fn rotate_vector(vx: f64, vy: f64, angle_deg: f64) -> (f64, f64) {
    let angle_rad = angle_deg.to_radians();
    let cos_a = angle_rad.cos();
    let sin_a = angle_rad.sin();
    (vx * cos_a - vy * sin_a, vx * sin_a + vy * cos_a)
}

/// Rotates a point around `center` by `angle_deg` degrees.
pub fn rotate_point(p: Point, center: Point, angle_deg: f64) -> Point {
    if angle_deg.abs() < 1e-6 {
        return p;
    }
    let (dx, dy) = rotate_vector(p.x - center.x, p.y - center.y, angle_deg);
    Point {
        x: center.x + dx,
        y: center.y + dy,
    }
}

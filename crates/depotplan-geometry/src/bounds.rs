//! Axis-aligned bounding boxes over point sets.

use crate::point::Point;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounding box of a point set.
    ///
    /// Returns `None` for an empty slice or when any coordinate is not
    /// finite. A zero-extent box (all points collinear) is still `Some`;
    /// callers decide what degenerate means for them.
    pub fn of_points(points: &[Point]) -> Option<Bounds> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            if !p.is_finite() {
                return None;
            }
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Bounds::new(min_x, min_y, max_x, max_y))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Width over height. Infinite or NaN for zero-height boxes; callers
    /// guard with [`Bounds::height`] first.
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_square() {
        let points = [
            Point::new(0.4, 0.4),
            Point::new(0.6, 0.4),
            Point::new(0.6, 0.6),
            Point::new(0.4, 0.6),
        ];
        let bounds = Bounds::of_points(&points).unwrap();
        assert_eq!(bounds, Bounds::new(0.4, 0.4, 0.6, 0.6));
        assert_eq!(bounds.aspect_ratio(), 1.0);
    }

    #[test]
    fn empty_slice_has_no_bounds() {
        assert_eq!(Bounds::of_points(&[]), None);
    }

    #[test]
    fn non_finite_point_has_no_bounds() {
        let points = [Point::new(0.1, 0.1), Point::new(f64::NAN, 0.5)];
        assert_eq!(Bounds::of_points(&points), None);
    }

    #[test]
    fn collinear_points_yield_zero_extent() {
        let points = [Point::new(0.2, 0.1), Point::new(0.2, 0.9)];
        let bounds = Bounds::of_points(&points).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.8);
    }
}

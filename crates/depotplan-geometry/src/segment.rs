//! Point-to-segment projection.

use crate::point::Point;

/// Clamped projection of a point onto a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// The closest point on the segment.
    pub point: Point,
    /// Projection parameter in `[0, 1]` along `a -> b`.
    pub t: f64,
    /// Distance from the query point to [`SegmentProjection::point`].
    pub distance: f64,
}

/// Projects `p` onto the segment from `a` to `b`, clamping to the endpoints.
///
/// A zero-length segment projects onto `a` with `t == 0`.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let point = Point::new(a.x + dx * t, a.y + dy * t);
    SegmentProjection {
        point,
        t,
        distance: p.distance_to(&point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn projects_onto_segment_interior() {
        let proj = project_onto_segment(
            Point::new(0.5, 0.3),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        );
        assert_abs_diff_eq!(proj.t, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(proj.point.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(proj.distance, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn clamps_to_start_endpoint() {
        let proj = project_onto_segment(
            Point::new(-1.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        );
        assert_eq!(proj.t, 0.0);
        assert_eq!(proj.point, Point::new(0.0, 0.0));
        assert_abs_diff_eq!(proj.distance, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn clamps_to_end_endpoint() {
        let proj = project_onto_segment(
            Point::new(2.0, 1.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
        );
        assert_eq!(proj.t, 1.0);
        assert_eq!(proj.point, Point::new(1.0, 0.0));
    }

    #[test]
    fn degenerate_segment_projects_onto_a() {
        let a = Point::new(0.4, 0.4);
        let proj = project_onto_segment(Point::new(0.4, 0.9), a, a);
        assert_eq!(proj.t, 0.0);
        assert_eq!(proj.point, a);
        assert_abs_diff_eq!(proj.distance, 0.5, epsilon = 1e-12);
    }
}

//! Freehand polygon editor for warehouse floor-plan outlines.
//!
//! The outline is an ordered vertex loop in unit-square coordinates, closed
//! implicitly from the last vertex back to the first. The editor guarantees
//! at least three vertices at all times: any mutation or input that would
//! drop below that resets the outline to a built-in centered square.

use depotplan_geometry::{project_onto_segment, snap_to_guides, snap_vector_angle, Point};
use tracing::{debug, warn};

/// Hard cap on outline vertices accepted from external input.
pub const MAX_VERTICES: usize = 200;

const MIN_VERTICES: usize = 3;
/// Consecutive points closer than this on both axes collapse into one.
const DEDUP_EPSILON: f64 = 0.0005;

/// The built-in default outline: a centered square.
pub fn default_shape() -> Vec<Point> {
    vec![
        Point::new(0.4, 0.4),
        Point::new(0.6, 0.4),
        Point::new(0.6, 0.6),
        Point::new(0.4, 0.6),
    ]
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Sanitizes an externally supplied point list into a valid outline.
///
/// Non-finite points are discarded, the rest are clamped to `[0, 1]` and
/// rounded to four decimals, near-identical consecutive points are
/// deduplicated and the total is capped at [`MAX_VERTICES`]. When fewer than
/// three points survive, the default shape is substituted.
pub fn sanitize_points(input: &[Point]) -> Vec<Point> {
    let cleaned: Vec<Point> = input
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| {
            let c = p.clamped_unit();
            Point::new(round4(c.x), round4(c.y))
        })
        .collect();

    if cleaned.len() < MIN_VERTICES {
        warn!(
            accepted = cleaned.len(),
            supplied = input.len(),
            "too few valid outline points, substituting default shape"
        );
        return default_shape();
    }

    let mut deduped: Vec<Point> = Vec::with_capacity(cleaned.len());
    for point in cleaned {
        if let Some(last) = deduped.last() {
            if (last.x - point.x).abs() < DEDUP_EPSILON && (last.y - point.y).abs() < DEDUP_EPSILON
            {
                continue;
            }
        }
        deduped.push(point);
    }
    deduped.truncate(MAX_VERTICES);

    if deduped.len() >= MIN_VERTICES {
        deduped
    } else {
        warn!("outline collapsed during dedup, substituting default shape");
        default_shape()
    }
}

/// Two-stage auto-align snap for a dragged or inserted vertex.
///
/// Stage one snaps the vectors to the previous and next neighbor onto the
/// 45 degree grid independently; when both produce a candidate, the one
/// closer to the raw point wins. Stage two snaps x and y independently
/// against `{0.5}` plus the guide points' coordinates. The result is clamped
/// to the unit square.
pub fn snap_polygon_vertex(
    raw: Point,
    previous: Option<Point>,
    next: Option<Point>,
    guide_points: &[Point],
) -> Point {
    let mut candidates: Vec<Point> = Vec::with_capacity(2);

    if let Some(prev) = previous {
        let corrected = snap_vector_angle(raw.x - prev.x, raw.y - prev.y);
        if corrected.snapped {
            candidates.push(Point::new(prev.x + corrected.x, prev.y + corrected.y));
        }
    }
    if let Some(next) = next {
        let corrected = snap_vector_angle(next.x - raw.x, next.y - raw.y);
        if corrected.snapped {
            candidates.push(Point::new(next.x - corrected.x, next.y - corrected.y));
        }
    }

    let mut snapped = match candidates.as_slice() {
        [] => raw,
        [only] => *only,
        [first, second, ..] => {
            if second.distance_to(&raw) < first.distance_to(&raw) {
                *second
            } else {
                *first
            }
        }
    };

    let mut x_guides = Vec::with_capacity(guide_points.len() + 1);
    let mut y_guides = Vec::with_capacity(guide_points.len() + 1);
    x_guides.push(0.5);
    y_guides.push(0.5);
    for p in guide_points {
        x_guides.push(p.x);
        y_guides.push(p.y);
    }

    snapped.x = snap_to_guides(snapped.x, &x_guides);
    snapped.y = snap_to_guides(snapped.y, &y_guides);
    snapped.clamped_unit()
}

/// One-shot corner tools. Arming one disarms the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CornerTool {
    #[default]
    None,
    /// Next canvas click inserts a corner on the nearest edge.
    Add,
    /// Clicking a vertex deletes it.
    Delete,
}

/// Stateful polygon editor for a single floor-plan outline.
///
/// Mode flags (corner tools, auto-align, the active vertex drag) live on the
/// editor itself so several documents can be edited independently.
#[derive(Debug, Clone)]
pub struct PolygonEditor {
    points: Vec<Point>,
    drag_index: Option<usize>,
    tool: CornerTool,
    hover_delete: Option<usize>,
    auto_align: bool,
}

impl Default for PolygonEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonEditor {
    /// Creates an editor holding the default centered square.
    pub fn new() -> Self {
        Self {
            points: default_shape(),
            drag_index: None,
            tool: CornerTool::None,
            hover_delete: None,
            auto_align: false,
        }
    }

    /// Creates an editor from externally supplied points, sanitizing them.
    pub fn from_points(points: &[Point]) -> Self {
        let mut editor = Self::new();
        editor.points = sanitize_points(points);
        editor
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Replaces the outline, sanitizing the input. Clears transient state.
    pub fn set_points(&mut self, points: &[Point]) {
        self.points = sanitize_points(points);
        self.drag_index = None;
        self.tool = CornerTool::None;
        self.hover_delete = None;
    }

    pub fn auto_align(&self) -> bool {
        self.auto_align
    }

    pub fn set_auto_align(&mut self, enabled: bool) {
        self.auto_align = enabled;
    }

    pub fn tool(&self) -> CornerTool {
        self.tool
    }

    pub fn drag_index(&self) -> Option<usize> {
        self.drag_index
    }

    pub fn hovered_delete_target(&self) -> Option<usize> {
        self.hover_delete
    }

    fn reset_to_default(&mut self) {
        debug!("resetting outline to default shape");
        self.points = default_shape();
        self.drag_index = None;
        self.hover_delete = None;
    }

    /// Arms the add-corner tool, disarming delete-corner.
    pub fn arm_add_corner(&mut self) {
        if self.points.len() < 2 {
            self.reset_to_default();
            self.tool = CornerTool::None;
            return;
        }
        self.hover_delete = None;
        self.tool = CornerTool::Add;
    }

    /// Toggles the delete-corner tool, disarming add-corner.
    pub fn toggle_delete_corner(&mut self) {
        if self.points.is_empty() {
            self.reset_to_default();
            self.tool = CornerTool::None;
            return;
        }
        self.tool = match self.tool {
            CornerTool::Delete => {
                self.hover_delete = None;
                CornerTool::None
            }
            _ => CornerTool::Delete,
        };
    }

    /// Tracks the vertex under the pointer while delete-corner is armed.
    pub fn hover_vertex(&mut self, index: Option<usize>) {
        if self.tool != CornerTool::Delete {
            return;
        }
        self.hover_delete = index.filter(|&i| i < self.points.len());
    }

    /// Starts dragging a vertex. Refused while a corner tool is armed.
    pub fn begin_vertex_drag(&mut self, index: usize) -> bool {
        if self.tool != CornerTool::None || index >= self.points.len() {
            return false;
        }
        self.drag_index = Some(index);
        true
    }

    /// Moves the dragged vertex to the raw pointer position.
    pub fn drag_vertex_to(&mut self, raw: Point) {
        if let Some(index) = self.drag_index {
            self.move_vertex(index, raw);
        }
    }

    pub fn end_vertex_drag(&mut self) {
        self.drag_index = None;
    }

    /// Relocates a single vertex.
    ///
    /// With auto-align disabled this is a clamped replace. With it enabled
    /// the raw point goes through [`snap_polygon_vertex`] using the loop
    /// neighbors as angular context and every other vertex as a guide. The
    /// snap sees the unclamped pointer position, so an off-canvas drag is
    /// judged at its true angle; only the final result is clamped.
    pub fn move_vertex(&mut self, index: usize, raw: Point) {
        let n = self.points.len();
        if index >= n {
            return;
        }
        let next = if self.auto_align {
            let previous = self.points[(index + n - 1) % n];
            let following = self.points[(index + 1) % n];
            let others: Vec<Point> = self
                .points
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, p)| *p)
                .collect();
            snap_polygon_vertex(raw, Some(previous), Some(following), &others)
        } else {
            raw.clamped_unit()
        };
        self.points[index] = next;
    }

    /// Handles a canvas click: inserts a corner when the add tool is armed.
    pub fn click_canvas(&mut self, point: Point) {
        if self.tool != CornerTool::Add {
            return;
        }
        self.insert_vertex_at(point);
    }

    /// Inserts a vertex on the edge nearest to `click`, splitting that edge
    /// before its second endpoint. Disarms the add-corner tool.
    pub fn insert_vertex_at(&mut self, click: Point) {
        if self.points.len() < 2 {
            self.reset_to_default();
            self.tool = CornerTool::None;
            return;
        }
        let click = click.clamped_unit();
        let n = self.points.len();

        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for i in 0..n {
            let j = (i + 1) % n;
            let projection = project_onto_segment(click, self.points[i], self.points[j]);
            if projection.distance < best_distance {
                best_distance = projection.distance;
                best_index = j;
            }
        }

        let new_point = if self.auto_align {
            let previous = self.points[(best_index + n - 1) % n];
            let following = self.points[best_index];
            snap_polygon_vertex(click, Some(previous), Some(following), &self.points)
        } else {
            click
        };

        self.points.insert(best_index, new_point);
        self.tool = CornerTool::None;
    }

    /// Handles a vertex click: deletes it when the delete tool is armed.
    pub fn click_vertex(&mut self, index: usize) {
        if self.tool != CornerTool::Delete {
            return;
        }
        self.delete_vertex(index);
    }

    /// Removes a vertex. Dropping below three vertices resets the whole
    /// outline to the default shape and disarms the delete tool.
    pub fn delete_vertex(&mut self, index: usize) {
        if index >= self.points.len() {
            return;
        }
        self.points.remove(index);
        if self.points.len() < MIN_VERTICES {
            self.reset_to_default();
            self.tool = CornerTool::None;
            return;
        }
        match self.hover_delete {
            Some(h) if h == index => self.hover_delete = None,
            Some(h) if h > index => self.hover_delete = Some(h - 1),
            _ => {}
        }
    }
}

//! Persisted floor-plan shape codec.
//!
//! A warehouse outline is stored as a string blob in one of two forms:
//!
//! - **Canonical**: JSON `{"points":[{"x":..,"y":..},..],"aspectRatio":n?}`.
//!   The writer always emits the normalized form (points rescaled into the
//!   unit square relative to their bounding box, plus the original aspect
//!   ratio) and falls back to the raw point list when the shape is
//!   degenerate.
//! - **Legacy**: opaque vector markup carrying a `points="x,y x,y ..."`
//!   attribute in either `[0,100]` or `[0,1]` coordinates. Consumed
//!   read-only; the render path passes the markup through untouched.
//!
//! The dynamic shape of the blob is decoded exactly once, into
//! [`ShapeBlob`]; everything downstream works on plain [`Point`] lists.

use anyhow::{Context, Result};
use depotplan_geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shape_editor::{default_shape, sanitize_points};

/// Bounding-box extents below this are degenerate and cannot be normalized.
pub const DEGENERATE_EXTENT: f64 = 1e-4;

/// Fraction of the unit square left free on each side when a normalized
/// shape is fitted back into the editor canvas.
pub const DEFAULT_FIT_MARGIN: f64 = 0.1;

/// Fixed height of the render-data drawing space.
const RENDER_HEIGHT: f64 = 100.0;

/// A polygon rescaled into `[0,1]` on both axes, plus the aspect ratio of
/// its original bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedShape {
    pub points: Vec<Point>,
    /// Width over height of the source bounding box, always positive.
    pub aspect_ratio: f64,
}

/// Rescales a polygon into the unit square relative to its bounding box.
///
/// Returns `None` when the polygon has fewer than three points or its
/// bounding box is degenerate (either extent below [`DEGENERATE_EXTENT`]);
/// callers persist the raw point list in that case.
pub fn normalize(points: &[Point]) -> Option<NormalizedShape> {
    if points.len() < 3 {
        return None;
    }
    let bounds = Bounds::of_points(points)?;
    let width = bounds.width();
    let height = bounds.height();
    if width < DEGENERATE_EXTENT || height < DEGENERATE_EXTENT {
        return None;
    }
    let points = points
        .iter()
        .map(|p| Point::new((p.x - bounds.min_x) / width, (p.y - bounds.min_y) / height))
        .collect();
    Some(NormalizedShape {
        points,
        aspect_ratio: width / height,
    })
}

/// Fits a normalized shape back into the unit-square editor canvas.
///
/// The shape fills a centered box occupying `1 - 2 * margin` of the canvas,
/// shrinking whichever dimension the aspect ratio constrains.
pub fn denormalize(shape: &NormalizedShape, margin: f64) -> Vec<Point> {
    let available = 1.0 - margin * 2.0;
    let (w, h) = if shape.aspect_ratio >= 1.0 {
        (available, available / shape.aspect_ratio)
    } else {
        (available * shape.aspect_ratio, available)
    };
    let offset_x = (1.0 - w) / 2.0;
    let offset_y = (1.0 - h) / 2.0;
    shape
        .points
        .iter()
        .map(|p| Point::new(p.x * w + offset_x, p.y * h + offset_y))
        .collect()
}

/// Decoded persisted blob.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeBlob {
    /// Opaque legacy vector markup, handed to the rendering collaborator
    /// untouched.
    LegacyMarkup(String),
    /// Canonical point list, possibly with a stored aspect ratio.
    PointList {
        points: Vec<Point>,
        aspect_ratio: Option<f64>,
    },
}

/// Tolerant wire form of the canonical JSON payload. Missing or null fields
/// never fail the whole parse; garbage entries are dropped point by point.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlob {
    #[serde(default)]
    points: Option<Vec<RawPoint>>,
    #[serde(default)]
    aspect_ratio: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPoint {
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

/// Decodes a persisted blob into its tagged form.
///
/// Returns `None` for empty or malformed input, and for point lists with
/// fewer than three finite points. A stored aspect ratio is kept only when
/// finite and positive.
pub fn parse_blob(raw: &str) -> Option<ShapeBlob> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("<svg") {
        return Some(ShapeBlob::LegacyMarkup(raw.to_string()));
    }
    let blob: RawBlob = serde_json::from_str(raw).ok()?;
    let points: Vec<Point> = blob
        .points?
        .iter()
        .filter_map(|rp| match (rp.x, rp.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        })
        .collect();
    if points.len() < 3 {
        return None;
    }
    let aspect_ratio = blob.aspect_ratio.filter(|r| r.is_finite() && *r > 0.0);
    Some(ShapeBlob::PointList {
        points,
        aspect_ratio,
    })
}

/// Extracts the value of the `points="..."` attribute from legacy markup.
fn extract_points_attr(markup: &str) -> Option<&str> {
    let lower = markup.to_ascii_lowercase();
    let start = lower.find("points")?;
    let rest = &markup[start + "points".len()..];
    let eq = rest.find('=')?;
    if !rest[..eq].trim().is_empty() {
        return None;
    }
    let after = rest[eq + 1..].trim_start();
    let quoted = after.strip_prefix('"')?;
    let end = quoted.find('"')?;
    Some(&quoted[..end])
}

/// Parses the coordinate pairs of a legacy markup blob.
///
/// Coordinates may be in `[0,100]` or `[0,1]`; any pair with a coordinate
/// above 1 is divided by 100.
fn parse_legacy_points(markup: &str) -> Vec<Point> {
    let Some(attr) = extract_points_attr(markup) else {
        return default_shape();
    };
    let mut points = Vec::new();
    for pair in attr.split_whitespace() {
        let mut parts = pair.split(',');
        let (Some(xs), Some(ys)) = (parts.next(), parts.next()) else {
            continue;
        };
        let (Ok(x), Ok(y)) = (xs.trim().parse::<f64>(), ys.trim().parse::<f64>()) else {
            continue;
        };
        if !x.is_finite() || !y.is_finite() {
            continue;
        }
        if x > 1.0 || y > 1.0 {
            points.push(Point::new(x / 100.0, y / 100.0));
        } else {
            points.push(Point::new(x, y));
        }
    }
    points
}

/// Decodes a persisted blob into editable unit-square points.
///
/// Legacy markup has its point attribute parsed and sanitized; canonical
/// JSON is sanitized and, when an aspect ratio is stored, fitted back into
/// the centered editor box via [`denormalize`]. Anything malformed yields
/// the default shape.
pub fn decode_for_editing(raw: &str) -> Vec<Point> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default_shape();
    }
    if trimmed.starts_with("<svg") {
        return sanitize_points(&parse_legacy_points(trimmed));
    }
    match parse_blob(trimmed) {
        Some(ShapeBlob::PointList {
            points,
            aspect_ratio,
        }) => {
            let sanitized = sanitize_points(&points);
            match aspect_ratio {
                Some(ratio) => denormalize(
                    &NormalizedShape {
                        points: sanitized,
                        aspect_ratio: ratio,
                    },
                    DEFAULT_FIT_MARGIN,
                ),
                None => sanitized,
            }
        }
        _ => default_shape(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PointListPayload {
    points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<f64>,
}

/// Encodes an authored outline into the canonical persisted blob.
///
/// The points are sanitized and normalized; degenerate shapes fall back to
/// the raw sanitized point list without an aspect ratio.
pub fn encode(points: &[Point]) -> Result<String> {
    let sanitized = sanitize_points(points);
    let payload = match normalize(&sanitized) {
        Some(shape) => PointListPayload {
            points: shape.points,
            aspect_ratio: Some(shape.aspect_ratio),
        },
        None => {
            debug!("degenerate outline, persisting raw points without aspect ratio");
            PointListPayload {
                points: sanitized,
                aspect_ratio: None,
            }
        }
    };
    serde_json::to_string(&payload).context("failed to serialize floor-plan shape")
}

/// Shape data prepared for a rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderData {
    /// Legacy markup passed through untouched.
    LegacyMarkup(String),
    /// Points remapped into a fixed-height drawing space of
    /// `100 * aspect_ratio` by `100` units.
    Polygon {
        points: Vec<Point>,
        width: f64,
        height: f64,
    },
}

/// Prepares a persisted blob for rendering at the correct aspect ratio.
///
/// When the stored aspect ratio is missing it is derived from the bounding
/// box. Returns `None` for malformed blobs and degenerate geometry. The
/// render path deliberately skips sanitization; only finite points survive
/// [`parse_blob`] and the original coordinates are preserved.
pub fn render_data(raw: &str) -> Option<RenderData> {
    match parse_blob(raw)? {
        ShapeBlob::LegacyMarkup(markup) => Some(RenderData::LegacyMarkup(markup)),
        ShapeBlob::PointList {
            points,
            aspect_ratio,
        } => {
            let bounds = Bounds::of_points(&points)?;
            let width = bounds.width();
            let height = bounds.height();
            if width <= 0.0 || height <= 0.0 {
                return None;
            }
            let ratio = aspect_ratio.unwrap_or_else(|| bounds.aspect_ratio());
            if !ratio.is_finite() || ratio <= 0.0 {
                return None;
            }
            let target_width = RENDER_HEIGHT * ratio;
            let points = points
                .iter()
                .map(|p| {
                    Point::new(
                        (p.x - bounds.min_x) / width * target_width,
                        (p.y - bounds.min_y) / height * RENDER_HEIGHT,
                    )
                })
                .collect();
            Some(RenderData::Polygon {
                points,
                width: target_width,
                height: RENDER_HEIGHT,
            })
        }
    }
}

/// Aspect ratio of a persisted blob, for container sizing.
///
/// Prefers the stored ratio, falls back to the bounding box. `None` for
/// legacy markup (unknown) and malformed or degenerate blobs.
pub fn aspect_ratio_of(raw: &str) -> Option<f64> {
    match parse_blob(raw)? {
        ShapeBlob::LegacyMarkup(_) => None,
        ShapeBlob::PointList {
            points,
            aspect_ratio,
        } => aspect_ratio.or_else(|| {
            let bounds = Bounds::of_points(&points)?;
            if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
                return None;
            }
            Some(bounds.aspect_ratio())
        }),
    }
}

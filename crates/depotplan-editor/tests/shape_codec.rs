//! Persisted blob decode/encode, legacy markup handling and render data.

use approx::assert_abs_diff_eq;
use depotplan_editor::{
    aspect_ratio_of, decode_for_editing, default_shape, denormalize, encode, normalize, parse_blob,
    render_data, NormalizedShape, RenderData, ShapeBlob,
};
use depotplan_geometry::Point;

const LEGACY_MARKUP: &str =
    r#"<svg viewBox="0 0 100 100"><polygon points="10,10 90,10 90,90 10,90"/></svg>"#;

#[test]
fn parse_blob_tags_legacy_markup() {
    match parse_blob(LEGACY_MARKUP) {
        Some(ShapeBlob::LegacyMarkup(markup)) => assert_eq!(markup, LEGACY_MARKUP),
        other => panic!("expected legacy markup, got {other:?}"),
    }
}

#[test]
fn parse_blob_reads_canonical_json() {
    let raw = r#"{"points":[{"x":0.1,"y":0.2},{"x":0.9,"y":0.2},{"x":0.5,"y":0.8}],"aspectRatio":1.5}"#;
    match parse_blob(raw) {
        Some(ShapeBlob::PointList {
            points,
            aspect_ratio,
        }) => {
            assert_eq!(points.len(), 3);
            assert_eq!(points[0], Point::new(0.1, 0.2));
            assert_eq!(aspect_ratio, Some(1.5));
        }
        other => panic!("expected point list, got {other:?}"),
    }
}

#[test]
fn parse_blob_rejects_garbage_and_short_lists() {
    assert_eq!(parse_blob(""), None);
    assert_eq!(parse_blob("   "), None);
    assert_eq!(parse_blob("not json at all"), None);
    assert_eq!(parse_blob(r#"{"points":[{"x":0.1,"y":0.2}]}"#), None);
    assert_eq!(parse_blob(r#"{"aspectRatio":2.0}"#), None);
}

#[test]
fn parse_blob_drops_malformed_points_and_bad_ratio() {
    let raw = r#"{"points":[{"x":0.1,"y":0.2},{"y":0.5},{"x":0.9,"y":0.2},{"x":null,"y":0.3},{"x":0.5,"y":0.8}],"aspectRatio":-2.0}"#;
    match parse_blob(raw) {
        Some(ShapeBlob::PointList {
            points,
            aspect_ratio,
        }) => {
            assert_eq!(points.len(), 3);
            assert_eq!(aspect_ratio, None);
        }
        other => panic!("expected point list, got {other:?}"),
    }
}

#[test]
fn decode_scales_legacy_percent_coordinates_down() {
    let points = decode_for_editing(LEGACY_MARKUP);
    assert_eq!(
        points,
        vec![
            Point::new(0.1, 0.1),
            Point::new(0.9, 0.1),
            Point::new(0.9, 0.9),
            Point::new(0.1, 0.9),
        ]
    );
}

#[test]
fn decode_keeps_legacy_unit_coordinates() {
    let raw = r#"<svg><polygon points="0.1,0.1 0.9,0.1 0.5,0.9"/></svg>"#;
    let points = decode_for_editing(raw);
    assert_eq!(
        points,
        vec![
            Point::new(0.1, 0.1),
            Point::new(0.9, 0.1),
            Point::new(0.5, 0.9),
        ]
    );
}

#[test]
fn decode_falls_back_to_default_for_markup_without_points() {
    assert_eq!(decode_for_editing("<svg></svg>"), default_shape());
}

#[test]
fn decode_without_stored_ratio_returns_sanitized_points() {
    let raw = r#"{"points":[{"x":0.2,"y":0.2},{"x":0.8,"y":0.2},{"x":0.5,"y":0.8}]}"#;
    let points = decode_for_editing(raw);
    assert_eq!(
        points,
        vec![
            Point::new(0.2, 0.2),
            Point::new(0.8, 0.2),
            Point::new(0.5, 0.8),
        ]
    );
}

#[test]
fn decode_with_stored_ratio_fits_shape_into_margin_box() {
    // Normalized unit square with ratio 2: fitted box is 0.8 wide, 0.4
    // tall, centered.
    let raw = r#"{"points":[{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1},{"x":0,"y":1}],"aspectRatio":2.0}"#;
    let points = decode_for_editing(raw);
    assert_eq!(points.len(), 4);
    assert_abs_diff_eq!(points[0].x, 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(points[0].y, 0.3, epsilon = 1e-9);
    assert_abs_diff_eq!(points[2].x, 0.9, epsilon = 1e-9);
    assert_abs_diff_eq!(points[2].y, 0.7, epsilon = 1e-9);
}

#[test]
fn decode_garbage_yields_default_shape() {
    assert_eq!(decode_for_editing(""), default_shape());
    assert_eq!(decode_for_editing("{broken"), default_shape());
    assert_eq!(decode_for_editing("[1,2,3]"), default_shape());
}

#[test]
fn normalize_rescales_against_bounding_box() {
    let points = vec![
        Point::new(0.2, 0.2),
        Point::new(0.6, 0.2),
        Point::new(0.6, 0.4),
        Point::new(0.2, 0.4),
    ];
    let shape = normalize(&points).unwrap();
    assert_abs_diff_eq!(shape.aspect_ratio, 2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.points[0].x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.points[2].x, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.points[2].y, 1.0, epsilon = 1e-9);
}

#[test]
fn normalize_refuses_degenerate_extents() {
    let flat = vec![
        Point::new(0.1, 0.5),
        Point::new(0.5, 0.5),
        Point::new(0.9, 0.5),
    ];
    assert_eq!(normalize(&flat), None);
    assert_eq!(normalize(&[Point::new(0.1, 0.1), Point::new(0.9, 0.9)]), None);
}

#[test]
fn denormalize_shrinks_the_constrained_axis() {
    let shape = NormalizedShape {
        points: vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ],
        aspect_ratio: 0.5,
    };
    let points = denormalize(&shape, 0.1);
    // ratio < 1: width is the constrained axis, 0.8 * 0.5 = 0.4 wide.
    assert_abs_diff_eq!(points[0].x, 0.3, epsilon = 1e-9);
    assert_abs_diff_eq!(points[1].x, 0.7, epsilon = 1e-9);
    assert_abs_diff_eq!(points[0].y, 0.1, epsilon = 1e-9);
    assert_abs_diff_eq!(points[2].y, 0.9, epsilon = 1e-9);
}

#[test]
fn encode_emits_normalized_points_and_ratio() {
    let points = vec![
        Point::new(0.2, 0.2),
        Point::new(0.6, 0.2),
        Point::new(0.6, 0.4),
        Point::new(0.2, 0.4),
    ];
    let blob = encode(&points).unwrap();
    match parse_blob(&blob) {
        Some(ShapeBlob::PointList {
            points,
            aspect_ratio,
        }) => {
            assert_eq!(points.len(), 4);
            assert_abs_diff_eq!(aspect_ratio.unwrap(), 2.0, epsilon = 1e-9);
            assert_abs_diff_eq!(points[0].x, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(points[2].x, 1.0, epsilon = 1e-9);
        }
        other => panic!("expected point list, got {other:?}"),
    }
}

#[test]
fn encode_degenerate_shape_omits_aspect_ratio() {
    let flat = vec![
        Point::new(0.1, 0.5),
        Point::new(0.5, 0.5),
        Point::new(0.9, 0.5),
    ];
    let blob = encode(&flat).unwrap();
    assert!(!blob.contains("aspectRatio"), "unexpected ratio in {blob}");
    match parse_blob(&blob) {
        Some(ShapeBlob::PointList { points, .. }) => assert_eq!(points.len(), 3),
        other => panic!("expected point list, got {other:?}"),
    }
}

#[test]
fn render_data_remaps_into_fixed_height_space() {
    let raw = r#"{"points":[{"x":0.2,"y":0.2},{"x":0.8,"y":0.2},{"x":0.8,"y":0.6}],"aspectRatio":1.5}"#;
    match render_data(raw) {
        Some(RenderData::Polygon {
            points,
            width,
            height,
        }) => {
            assert_abs_diff_eq!(width, 150.0, epsilon = 1e-9);
            assert_abs_diff_eq!(height, 100.0, epsilon = 1e-9);
            assert_abs_diff_eq!(points[0].x, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(points[0].y, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(points[1].x, 150.0, epsilon = 1e-9);
            assert_abs_diff_eq!(points[2].y, 100.0, epsilon = 1e-9);
        }
        other => panic!("expected polygon render data, got {other:?}"),
    }
}

#[test]
fn render_data_derives_ratio_when_not_stored() {
    let raw = r#"{"points":[{"x":0.0,"y":0.0},{"x":0.5,"y":0.0},{"x":0.5,"y":0.25}]}"#;
    match render_data(raw) {
        Some(RenderData::Polygon { width, height, .. }) => {
            assert_abs_diff_eq!(width, 200.0, epsilon = 1e-9);
            assert_abs_diff_eq!(height, 100.0, epsilon = 1e-9);
        }
        other => panic!("expected polygon render data, got {other:?}"),
    }
}

#[test]
fn render_data_passes_legacy_markup_through() {
    assert_eq!(
        render_data(LEGACY_MARKUP),
        Some(RenderData::LegacyMarkup(LEGACY_MARKUP.to_string()))
    );
}

#[test]
fn render_data_rejects_degenerate_geometry() {
    let flat = r#"{"points":[{"x":0.1,"y":0.5},{"x":0.5,"y":0.5},{"x":0.9,"y":0.5}]}"#;
    assert_eq!(render_data(flat), None);
    assert_eq!(render_data("{broken"), None);
}

#[test]
fn aspect_ratio_prefers_stored_value() {
    let raw = r#"{"points":[{"x":0.2,"y":0.2},{"x":0.8,"y":0.2},{"x":0.8,"y":0.6}],"aspectRatio":1.5}"#;
    assert_eq!(aspect_ratio_of(raw), Some(1.5));
}

#[test]
fn aspect_ratio_falls_back_to_bounding_box() {
    let raw = r#"{"points":[{"x":0.0,"y":0.0},{"x":0.5,"y":0.0},{"x":0.5,"y":0.25}]}"#;
    assert_abs_diff_eq!(aspect_ratio_of(raw).unwrap(), 2.0, epsilon = 1e-9);
}

#[test]
fn aspect_ratio_is_unknown_for_legacy_markup() {
    assert_eq!(aspect_ratio_of(LEGACY_MARKUP), None);
}

//! # DepotPlan Geometry
//!
//! Pure 2D math for the floor-plan layout editor. Everything here operates on
//! plain `f64` coordinates in the unit square and carries no state: the
//! editor crates decide *when* to snap, project or rotate, this crate only
//! decides *how*.
//!
//! ## Components
//!
//! - [`Point`]: the value type all shapes are built from
//! - [`snap_vector_angle`] / [`snap_to_guides`]: the two snapping stages of
//!   the polygon editor's auto-align aid
//! - [`project_onto_segment`]: clamped point-to-segment projection, used to
//!   find the polygon edge nearest a click
//! - [`rotate_vector`] / [`rotate_point`]: 2D rotation transforms
//! - [`Bounds`]: axis-aligned bounding boxes and aspect ratios

pub mod bounds;
pub mod point;
pub mod segment;
pub mod snap;

pub use bounds::Bounds;
pub use point::{clamp01, rotate_point, rotate_vector, Point};
pub use segment::{project_onto_segment, SegmentProjection};
pub use snap::{
    snap_to_guides, snap_vector_angle, SnappedVector, ANGLE_SNAP_THRESHOLD, GUIDE_SNAP_DISTANCE,
    SNAP_ANGLE_STEP,
};

//! # DepotPlan Editor
//!
//! Editing core for warehouse floor plans. A warehouse outline is a closed
//! polygon authored in a unit-square canvas; cabinet footprints are rotated
//! rectangles placed inside that outline. Everything here is decoupled from
//! pixels and rendering: callers feed pointer events in, read geometry out,
//! and talk to a persistence collaborator at the edges.
//!
//! ## Core Components
//!
//! - **Shape editor**: freehand polygon editing with angle/guide snapping
//!   and corner insertion/deletion ([`shape_editor`])
//! - **Shape codec**: normalization to a resolution-independent persisted
//!   form and back, plus legacy markup support ([`shape_codec`])
//! - **Layout engine**: move/resize/rotate of cabinet footprints with
//!   unit-square containment ([`layout`])
//! - **Gesture controller**: the pointer-down/move/up state machine that
//!   drives the layout engine and distinguishes clicks from drags
//!   ([`layout::LayoutController`])
//! - **Store contract**: the abstract persistence collaborator ([`store`])
//!
//! ## Architecture
//!
//! ```text
//! PolygonEditor (outline authoring)
//!   └── shape_codec (normalize / persist / render data)
//!
//! LayoutController (gesture state machine)
//!   ├── CabinetLayout (in-memory rectangle set)
//!   └── CabinetStore (persistence collaborator)
//! ```
//!
//! All mutation is synchronous and single-threaded; each open document gets
//! its own editor/controller instance.

pub mod error;
pub mod layout;
pub mod shape_codec;
pub mod shape_editor;
pub mod store;

pub use error::EditorError;
pub use layout::{
    move_by, resize_axis_aligned, resize_rotation_aware, rotate_toward, Cabinet, CabinetLayout,
    Corner, GestureKind, GestureOutcome, GestureSession, LayoutController, PixelRect,
    ResizeStrategy, DRAG_THRESHOLD_PX, MIN_CABINET_EXTENT,
};
pub use shape_codec::{
    aspect_ratio_of, decode_for_editing, denormalize, encode, normalize, parse_blob, render_data,
    NormalizedShape, RenderData, ShapeBlob,
};
pub use shape_editor::{
    default_shape, sanitize_points, snap_polygon_vertex, CornerTool, PolygonEditor, MAX_VERTICES,
};
pub use store::{CabinetStore, GeometryPatch};

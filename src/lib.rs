//! Scrawl converts raw SVG path geometry into hand-drawn Excalidraw scenes.
//!
//! The engine consumes a vector path-data string plus a small style
//! configuration and emits one self-contained scene document built from a
//! fixed set of sketchy primitives (`ellipse`, `rectangle`, `line`). It knows
//! nothing about where SVGs come from or how scenes are displayed.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: [`PathParser`] tokenizes path data into absolute
//!    [`PathCommand`]s (lazy, single pass)
//! 2. **Flatten**: [`flatten_path`] expands curves into polyline [`Subpath`]s
//!    within a tolerance
//! 3. **Classify**: [`classify_subpaths`] decides circle / rectangle /
//!    freeform per loop and resolves ring-vs-hole nesting
//! 4. **Style**: [`resolve_style`] maps the icon variant and source paint to
//!    sketchy attributes
//! 5. **Build**: [`SceneBuilder`] assembles one [`Scene`] with deterministic
//!    ids and a shared group
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: converting the same input twice yields
//!   byte-identical output.
//! - **Structure-preserving**: subpaths map 1:1, in order, onto output
//!   elements; none is reordered or silently dropped.
//! - **No shared state**: images convert independently, so [`convert_batch`]
//!   runs them on a worker pool with zero coordination.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod flatten;
mod foundation;
mod parse;
mod pipeline;
mod scene;
mod style;

pub use classify::loops::{
    ClassifiedShape, ShapeClassification, ShapeRole, classify_subpath, classify_subpaths,
};
pub use flatten::curves::{FlattenOptions, flatten_path};
pub use foundation::core::{Point, Rect, Subpath, Vec2};
pub use foundation::error::{ScrawlError, ScrawlResult};
pub use parse::path::{PathCommand, PathParser, parse_path};
pub use pipeline::{
    BASE_SCALE, BatchOptions, ConvertOptions, IconOutcome, IconSource, PathSpec,
    TARGET_VIEWBOX_SIZE, convert_batch, convert_icon, scene_to_json, write_scene,
};
pub use scene::build::{SCENE_SOURCE_TAG, SceneBuilder, StyledShape};
pub use scene::element::{AppState, ElementCommon, Roundness, Scene, SceneElement};
pub use style::palette::{PALETTE, nearest_palette_color};
pub use style::spec::{
    DEFAULT_FILL_STYLE, DEFAULT_ROUGHNESS, DEFAULT_STROKE_WIDTH, FILLED_BACKGROUND_COLOR,
    IconVariant, OVERLAY_COLOR, RING_STROKE_WIDTH, STROKE_COLOR, SourcePaint, StyleSpec,
    resolve_style,
};

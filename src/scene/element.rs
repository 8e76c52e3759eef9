//! Serde bindings for the Excalidraw scene schema.
//!
//! Field and `type` names are a compatibility contract with the external
//! format; a generated scene must open unmodified in any Excalidraw-compatible
//! consumer. Do not rename fields here without a schema bump on that side.

/// Roundness descriptor; Excalidraw's adaptive-radius mode is `{"type": 3}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Roundness {
    /// Roundness mode discriminator.
    #[serde(rename = "type")]
    pub kind: u8,
}

impl Roundness {
    /// The adaptive-radius mode used for all generated shapes.
    pub fn adaptive() -> Self {
        Self { kind: 3 }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Fields shared by every generated element.
pub struct ElementCommon {
    /// Monotonic element revision; always 1 for generated scenes.
    pub version: u32,
    /// Revision nonce, derived deterministically from the element id hash.
    pub version_nonce: i32,
    /// Soft-deletion flag; always `false` for generated elements.
    pub is_deleted: bool,
    /// Stable element identifier.
    pub id: String,
    /// Fill pattern (`solid`, `hachure`, ...).
    pub fill_style: String,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Stroke line style.
    pub stroke_style: String,
    /// Sketchiness level.
    pub roughness: u8,
    /// Opacity percentage.
    pub opacity: u8,
    /// Rotation angle in radians.
    pub angle: f64,
    /// Left edge in scene units.
    pub x: f64,
    /// Top edge in scene units.
    pub y: f64,
    /// Stroke color, hex or `transparent`.
    pub stroke_color: String,
    /// Background color, hex or `transparent`.
    pub background_color: String,
    /// Horizontal extent in scene units.
    pub width: f64,
    /// Vertical extent in scene units.
    pub height: f64,
    /// Sketchy-rendering seed, derived deterministically from the id hash.
    pub seed: i32,
    /// Group membership; every element of one image shares one group id.
    pub group_ids: Vec<String>,
    /// Bound element references (arrows, labels); always empty here.
    pub bound_elements: Vec<serde_json::Value>,
    /// Last-modified timestamp; fixed so output is reproducible.
    pub updated: u64,
    /// Optional hyperlink.
    pub link: Option<String>,
    /// Lock flag.
    pub locked: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
/// One output primitive, tagged with its Excalidraw `type`.
pub enum SceneElement {
    /// Circle/ellipse primitive.
    Ellipse {
        /// Shared element fields.
        #[serde(flatten)]
        common: ElementCommon,
        /// Arrow start binding; always `null`.
        start_binding: Option<serde_json::Value>,
        /// Arrow end binding; always `null`.
        end_binding: Option<serde_json::Value>,
    },
    /// Axis-aligned rectangle primitive.
    Rectangle {
        /// Shared element fields.
        #[serde(flatten)]
        common: ElementCommon,
        /// Corner roundness mode.
        roundness: Roundness,
    },
    /// Freeform polyline primitive.
    Line {
        /// Shared element fields.
        #[serde(flatten)]
        common: ElementCommon,
        /// Corner roundness mode.
        roundness: Roundness,
        /// Vertices relative to (x, y).
        points: Vec<[f64; 2]>,
        /// In-progress drawing point; always `null`.
        last_committed_point: Option<serde_json::Value>,
        /// Arrow start binding; always `null`.
        start_binding: Option<serde_json::Value>,
        /// Arrow end binding; always `null`.
        end_binding: Option<serde_json::Value>,
        /// Start arrowhead; always `null`.
        start_arrowhead: Option<serde_json::Value>,
        /// End arrowhead; always `null`.
        end_arrowhead: Option<serde_json::Value>,
    },
}

impl SceneElement {
    /// The fields shared by all element kinds.
    pub fn common(&self) -> &ElementCommon {
        match self {
            Self::Ellipse { common, .. }
            | Self::Rectangle { common, .. }
            | Self::Line { common, .. } => common,
        }
    }

    pub(crate) fn common_mut(&mut self) -> &mut ElementCommon {
        match self {
            Self::Ellipse { common, .. }
            | Self::Rectangle { common, .. }
            | Self::Line { common, .. } => common,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Global view-state defaults embedded in every scene.
pub struct AppState {
    /// Grid spacing; `null` disables the grid.
    pub grid_size: Option<u32>,
    /// Canvas background color.
    pub view_background_color: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            grid_size: None,
            view_background_color: "#ffffff".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete scene document: one per source image.
///
/// Lifecycle is create → populate → serialize; nothing mutates a scene after
/// the builder returns it.
pub struct Scene {
    /// Document discriminator; always `"excalidraw"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Schema version; always 2.
    pub version: u32,
    /// Generator tag.
    pub source: String,
    /// Ordered elements, one (or one group) per source subpath.
    pub elements: Vec<SceneElement>,
    /// View-state defaults.
    #[serde(rename = "appState")]
    pub app_state: AppState,
    /// Embedded binary files; always empty for generated scenes.
    pub files: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/element.rs"]
mod tests;

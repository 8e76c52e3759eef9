use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::style::palette::{is_white, nearest_palette_color, normalize_hex};

/// Default stroke color for sketchy output.
pub const STROKE_COLOR: &str = "#1e1e1e";
/// Background color applied to shapes of `filled` icons.
pub const FILLED_BACKGROUND_COLOR: &str = "#1971c2";
/// Color painted over interior holes so they read as cut-outs.
pub const OVERLAY_COLOR: &str = "#ffffff";
/// Default stroke width in scene units.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
/// Widened stroke used for ring/frame outlines, matching the source's band
/// thickness visually.
pub const RING_STROKE_WIDTH: f64 = 4.0;
/// Default sketchiness level (0 = architect, 1 = artist, 2 = cartoonist).
pub const DEFAULT_ROUGHNESS: u8 = 1;
/// Default fill style for closed shapes.
pub const DEFAULT_FILL_STYLE: &str = "solid";

/// The icon-style variant of a source image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IconVariant {
    /// Outline-only icon: stroke, no background fill.
    #[default]
    Regular,
    /// Solid icon: opaque background in the default fill color.
    Filled,
    /// Full-color icon: per-shape fills approximated against the palette.
    Color,
}

impl IconVariant {
    /// Parse a variant name.
    ///
    /// Fails with [`ScrawlError::UnsupportedStyleVariant`]; the pipeline
    /// recovers by falling back to [`IconVariant::Regular`].
    pub fn parse(name: &str) -> ScrawlResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "regular" | "outline" => Ok(Self::Regular),
            "filled" => Ok(Self::Filled),
            "color" => Ok(Self::Color),
            _ => Err(ScrawlError::UnsupportedStyleVariant(name.to_string())),
        }
    }
}

/// Source fill/stroke metadata for one path, as supplied by the external
/// asset-resolution collaborator.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SourcePaint {
    /// The source `fill` value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// The source `stroke` value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

/// Resolved sketchy-drawing style attributes for one shape.
///
/// Resolved once per (image variant, source paint) and read-only afterwards;
/// the scene builder threads it through as a parameter, never as global
/// state.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleSpec {
    /// Stroke color, hex or `transparent`.
    pub stroke_color: String,
    /// Background fill color, hex or `transparent`.
    pub background_color: String,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Sketchiness level.
    pub roughness: u8,
    /// Excalidraw fill style (`solid`, `hachure`, ...).
    pub fill_style: String,
}

impl StyleSpec {
    fn with_background(background_color: String) -> Self {
        Self {
            stroke_color: STROKE_COLOR.to_string(),
            background_color,
            stroke_width: DEFAULT_STROKE_WIDTH,
            roughness: DEFAULT_ROUGHNESS,
            fill_style: DEFAULT_FILL_STYLE.to_string(),
        }
    }
}

/// Map a variant plus source paint metadata onto sketchy style attributes.
///
/// Pure function; the global defaults (stroke width, roughness, fill style)
/// apply uniformly regardless of variant.
pub fn resolve_style(variant: IconVariant, paint: &SourcePaint) -> StyleSpec {
    match variant {
        IconVariant::Regular => StyleSpec::with_background("transparent".to_string()),
        IconVariant::Filled => {
            let background = match paint.fill.as_deref().map(str::trim) {
                None | Some("") => FILLED_BACKGROUND_COLOR.to_string(),
                Some(raw) => {
                    let lowered = raw.to_ascii_lowercase();
                    if lowered == "none" || lowered == "transparent" {
                        "transparent".to_string()
                    } else if is_white(&lowered) {
                        OVERLAY_COLOR.to_string()
                    } else {
                        FILLED_BACKGROUND_COLOR.to_string()
                    }
                }
            };
            StyleSpec::with_background(background)
        }
        IconVariant::Color => {
            let background = match paint.fill.as_deref() {
                None => "transparent".to_string(),
                Some(raw) => nearest_palette_color(&normalize_hex(raw)).to_string(),
            };
            let mut style = StyleSpec::with_background(background);
            if let Some(stroke) = paint.stroke.as_deref() {
                let mapped = nearest_palette_color(&normalize_hex(stroke));
                if mapped != "transparent" {
                    style.stroke_color = mapped.to_string();
                }
            }
            style
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/spec.rs"]
mod tests;

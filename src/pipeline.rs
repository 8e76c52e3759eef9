use std::path::Path;

use rayon::prelude::*;

use crate::classify::loops::classify_subpaths;
use crate::flatten::curves::{FlattenOptions, flatten_path};
use crate::foundation::core::Subpath;
use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::parse::path::PathParser;
use crate::scene::build::{SceneBuilder, StyledShape};
use crate::scene::element::Scene;
use crate::style::spec::{IconVariant, SourcePaint, resolve_style};

/// Default scale factor from source units to scene units.
pub const BASE_SCALE: f64 = 4.0;
/// Reference view-box size the scale factor is normalized against; icons of
/// other sizes scale so their output footprint matches 24-unit icons.
pub const TARGET_VIEWBOX_SIZE: f64 = 24.0;

/// One path element of a source image: raw path data plus its paint
/// metadata.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PathSpec {
    /// Contents of the `d` attribute.
    pub data: String,
    /// Source fill/stroke metadata.
    #[serde(default)]
    pub paint: SourcePaint,
}

/// One source image, as handed over by the external asset-resolution
/// collaborator.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct IconSource {
    /// Stable image identity; element ids derive from it.
    pub name: String,
    /// Raw style-variant string (`regular`, `filled`, `color`, ...).
    pub variant: String,
    /// Path elements in document order.
    pub paths: Vec<PathSpec>,
    /// View-box (width, height) in source units, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_box: Option<(f64, f64)>,
}

/// Per-image conversion controls.
#[derive(Clone, Copy, Debug)]
pub struct ConvertOptions {
    /// Curve-flattening controls.
    pub flatten: FlattenOptions,
    /// Scale factor applied to a `TARGET_VIEWBOX_SIZE`-unit icon.
    pub base_scale: f64,
    /// Reference view-box size for scale normalization.
    pub target_viewbox_size: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            flatten: FlattenOptions::default(),
            base_scale: BASE_SCALE,
            target_viewbox_size: TARGET_VIEWBOX_SIZE,
        }
    }
}

impl ConvertOptions {
    fn validate(&self) -> ScrawlResult<()> {
        if !(self.base_scale > 0.0) {
            return Err(ScrawlError::validation("base_scale must be > 0"));
        }
        if !(self.target_viewbox_size > 0.0) {
            return Err(ScrawlError::validation("target_viewbox_size must be > 0"));
        }
        Ok(())
    }

    fn scale_for(&self, source: &IconSource) -> f64 {
        let max_dim = source
            .view_box
            .map(|(w, h)| w.max(h))
            .filter(|d| *d > 0.0)
            .unwrap_or(self.target_viewbox_size);
        self.base_scale * (self.target_viewbox_size / max_dim)
    }
}

/// Batch driver controls.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchOptions {
    /// Per-image conversion controls.
    pub convert: ConvertOptions,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Per-image batch result: success with a scene or failure with the reason.
#[derive(Debug)]
pub struct IconOutcome {
    /// Source image identity.
    pub name: String,
    /// The converted scene, or why this image was skipped.
    pub result: ScrawlResult<Scene>,
}

/// Convert one source image into a scene.
///
/// Parse → flatten → classify → style → build, per path element in document
/// order. A malformed path fails the whole image; an unknown style variant
/// falls back to `regular`. The conversion is pure CPU over in-memory data
/// and deterministic for a given input.
#[tracing::instrument(skip(source, options), fields(icon = %source.name))]
pub fn convert_icon(source: &IconSource, options: &ConvertOptions) -> ScrawlResult<Scene> {
    options.validate()?;
    let variant = match IconVariant::parse(&source.variant) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(%err, "unknown style variant, falling back to regular");
            IconVariant::Regular
        }
    };

    let mut shapes = Vec::new();
    for path in &source.paths {
        let subpaths: Vec<Subpath> =
            flatten_path(PathParser::new(&path.data), &options.flatten)?;
        let style = resolve_style(variant, &path.paint);
        // Ring/hole analysis is scoped to one path element: its subpaths
        // share a fill rule, sibling path elements do not.
        for classified in classify_subpaths(&subpaths) {
            shapes.push(StyledShape {
                shape: classified,
                style: style.clone(),
            });
        }
    }
    tracing::debug!(elements = shapes.len(), "classified subpaths");

    let builder = SceneBuilder::new(&source.name, options.scale_for(source))?;
    Ok(builder.build(shapes))
}

/// Convert a batch of images on a worker pool.
///
/// Images are independent, so they parallelize with zero coordination; each
/// failure is isolated into its [`IconOutcome`] and never aborts the batch.
#[tracing::instrument(skip(sources, options), fields(count = sources.len()))]
pub fn convert_batch(sources: &[IconSource], options: &BatchOptions) -> Vec<IconOutcome> {
    let pool = match build_thread_pool(options.threads) {
        Ok(pool) => pool,
        Err(err) => {
            return sources
                .iter()
                .map(|s| IconOutcome {
                    name: s.name.clone(),
                    result: Err(ScrawlError::validation(format!(
                        "batch thread pool unavailable: {err}"
                    ))),
                })
                .collect();
        }
    };
    pool.install(|| {
        sources
            .par_iter()
            .map(|source| IconOutcome {
                name: source.name.clone(),
                result: convert_icon(source, &options.convert),
            })
            .collect()
    })
}

fn build_thread_pool(threads: Option<usize>) -> ScrawlResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ScrawlError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScrawlError::validation(format!("failed to build rayon thread pool: {e}")))
}

/// Serialize a scene to pretty-printed JSON with a trailing newline.
///
/// Field order follows struct declaration order, so identical scenes
/// serialize to identical bytes.
pub fn scene_to_json(scene: &Scene) -> ScrawlResult<String> {
    let mut json = serde_json::to_string_pretty(scene)
        .map_err(|e| ScrawlError::Other(anyhow::Error::new(e)))?;
    json.push('\n');
    Ok(json)
}

/// Write a scene document to disk, creating parent directories as needed.
///
/// The single filesystem touch in the crate; everything upstream is pure.
pub fn write_scene(scene: &Scene, path: &Path) -> ScrawlResult<()> {
    let json = scene_to_json(scene)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| ScrawlError::Other(anyhow::Error::new(e)))?;
    }
    std::fs::write(path, json).map_err(|e| ScrawlError::Other(anyhow::Error::new(e)))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;

use crate::classify::loops::{ClassifiedShape, ShapeClassification, ShapeRole};
use crate::foundation::core::Point;
use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::foundation::math::Fnv1a64;
use crate::scene::element::{AppState, ElementCommon, Roundness, Scene, SceneElement};
use crate::style::spec::{OVERLAY_COLOR, RING_STROKE_WIDTH, StyleSpec};

/// Generator tag written into every scene document.
pub const SCENE_SOURCE_TAG: &str = "scrawl";
/// Fixed `updated` timestamp; a varying timestamp would break byte-identical
/// regeneration.
const ELEMENT_UPDATED: u64 = 1;

/// A classified shape paired with its resolved style, ready for assembly.
#[derive(Clone, Debug)]
pub struct StyledShape {
    /// Classification plus paint role.
    pub shape: ClassifiedShape,
    /// Style attributes for this shape.
    pub style: StyleSpec,
}

/// Assembles one [`Scene`] from an image's ordered, classified, styled
/// shapes.
///
/// Element ids, seeds, and the shared group id are all derived from
/// `(source identity, subpath index)`, so rebuilding from the same input
/// yields byte-identical output. Element order equals input order.
#[derive(Clone, Debug)]
pub struct SceneBuilder<'a> {
    source_id: &'a str,
    scale: f64,
}

impl<'a> SceneBuilder<'a> {
    /// Create a builder for one source image.
    ///
    /// `scale` is the uniform positive factor applied to every coordinate and
    /// dimension.
    pub fn new(source_id: &'a str, scale: f64) -> ScrawlResult<Self> {
        if !(scale > 0.0) {
            return Err(ScrawlError::validation("scene scale must be > 0"));
        }
        Ok(Self { source_id, scale })
    }

    /// Build the scene from shapes in subpath order.
    pub fn build(&self, shapes: Vec<StyledShape>) -> Scene {
        let group_id = self.group_id();
        let mut elements: Vec<SceneElement> = shapes
            .into_iter()
            .enumerate()
            .map(|(index, styled)| self.element(index, styled, &group_id))
            .collect();
        recolor_nested_fills(&mut elements);
        Scene {
            kind: "excalidraw".to_string(),
            version: 2,
            source: SCENE_SOURCE_TAG.to_string(),
            elements,
            app_state: AppState::default(),
            files: serde_json::Map::new(),
        }
    }

    fn element(&self, index: usize, styled: StyledShape, group_id: &str) -> SceneElement {
        let style = apply_role(styled.style, styled.shape.role);
        match styled.shape.shape {
            ShapeClassification::Circle { center, radius } => {
                let common = self.common(
                    index,
                    (center.x - radius) * self.scale,
                    (center.y - radius) * self.scale,
                    radius * 2.0 * self.scale,
                    radius * 2.0 * self.scale,
                    style.background_color.clone(),
                    &style,
                    group_id,
                );
                SceneElement::Ellipse {
                    common,
                    start_binding: None,
                    end_binding: None,
                }
            }
            ShapeClassification::Rectangle {
                x,
                y,
                width,
                height,
            } => {
                let common = self.common(
                    index,
                    x * self.scale,
                    y * self.scale,
                    width * self.scale,
                    height * self.scale,
                    style.background_color.clone(),
                    &style,
                    group_id,
                );
                SceneElement::Rectangle {
                    common,
                    roundness: Roundness::adaptive(),
                }
            }
            ShapeClassification::Freeform { points } => {
                self.line_element(index, points, styled.shape.closed, &style, group_id)
            }
        }
    }

    fn line_element(
        &self,
        index: usize,
        points: Vec<Point>,
        closed: bool,
        style: &StyleSpec,
        group_id: &str,
    ) -> SceneElement {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        for p in &points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &points {
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        let rel_points: Vec<[f64; 2]> = points
            .iter()
            .map(|p| [(p.x - min_x) * self.scale, (p.y - min_y) * self.scale])
            .collect();

        // Open polylines never carry a background fill.
        let background = if closed {
            style.background_color.clone()
        } else {
            "transparent".to_string()
        };
        let common = self.common(
            index,
            min_x * self.scale,
            min_y * self.scale,
            (max_x - min_x) * self.scale,
            (max_y - min_y) * self.scale,
            background,
            style,
            group_id,
        );
        SceneElement::Line {
            common,
            roundness: Roundness::adaptive(),
            points: rel_points,
            last_committed_point: None,
            start_binding: None,
            end_binding: None,
            start_arrowhead: None,
            end_arrowhead: None,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn common(
        &self,
        index: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        background_color: String,
        style: &StyleSpec,
        group_id: &str,
    ) -> ElementCommon {
        let hash = self.element_hash(index);
        ElementCommon {
            version: 1,
            version_nonce: nonzero_i31(hash),
            is_deleted: false,
            id: format!("{hash:016x}{index:08x}"),
            fill_style: style.fill_style.clone(),
            stroke_width: style.stroke_width,
            stroke_style: "solid".to_string(),
            roughness: style.roughness,
            opacity: 100,
            angle: 0.0,
            x,
            y,
            stroke_color: style.stroke_color.clone(),
            background_color,
            width,
            height,
            seed: nonzero_i31(hash.rotate_left(32)),
            group_ids: vec![group_id.to_string()],
            bound_elements: Vec::new(),
            updated: ELEMENT_UPDATED,
            link: None,
            locked: false,
        }
    }

    fn element_hash(&self, index: usize) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(self.source_id.as_bytes());
        h.write_bytes(b"/element/");
        h.write_u64(index as u64);
        h.finish()
    }

    fn group_id(&self) -> String {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(self.source_id.as_bytes());
        h.write_bytes(b"/group");
        format!("{:016x}", h.finish())
    }
}

/// Fold a hash into a positive nonzero i32, the range Excalidraw uses for
/// seeds and nonces.
fn nonzero_i31(hash: u64) -> i32 {
    (((hash >> 33) as u32) & 0x7fff_ffff).max(1) as i32
}

fn apply_role(mut style: StyleSpec, role: ShapeRole) -> StyleSpec {
    match role {
        ShapeRole::Solid => {}
        ShapeRole::Ring => {
            style.background_color = "transparent".to_string();
            style.stroke_width = RING_STROKE_WIDTH;
        }
        ShapeRole::Hole => {
            if style.background_color != "transparent" {
                style.background_color = OVERLAY_COLOR.to_string();
            }
        }
    }
    style
}

/// A filled element fully inside a strictly larger element of the same
/// background color gets the overlay color, so holes and counters stay
/// visible without reordering anything.
fn recolor_nested_fills(elements: &mut [SceneElement]) {
    const MARGIN: f64 = 0.5;
    let info: Vec<(f64, f64, f64, f64, f64, String)> = elements
        .iter()
        .map(|e| {
            let c = e.common();
            (
                c.x,
                c.y,
                c.x + c.width,
                c.y + c.height,
                (c.width * c.height).abs(),
                c.background_color.to_ascii_lowercase(),
            )
        })
        .collect();

    for inner in 0..elements.len() {
        let (ix0, iy0, ix1, iy1, inner_area, ref inner_bg) = info[inner];
        if inner_bg == "transparent" {
            continue;
        }
        let enclosed = info.iter().enumerate().any(|(outer, o)| {
            outer != inner
                && o.5 == *inner_bg
                && o.4 > inner_area
                && ix0 >= o.0 - MARGIN
                && iy0 >= o.1 - MARGIN
                && ix1 <= o.2 + MARGIN
                && iy1 <= o.3 + MARGIN
        });
        if enclosed {
            elements[inner].common_mut().background_color = OVERLAY_COLOR.to_string();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/build.rs"]
mod tests;

use crate::foundation::core::{Point, Rect, Subpath};
use crate::foundation::math::signed_area;

// Calibrated thresholds, tuned against a 24-unit icon/emoji corpus. None of
// these fall out of first principles; adjust only with a regression corpus at
// hand.
/// Maximum coefficient of variation (stddev / mean) of centroid distances for
/// a loop to count as a circle.
pub(crate) const CIRCLE_CV_MAX: f64 = 0.12;
/// A circle candidate must have strictly more vertices than this; regular
/// low-vertex polygons are equidistant from their centroid too.
pub(crate) const CIRCLE_MIN_POINTS: usize = 8;
/// Rectangle edge tolerance as a fraction of the larger bounding dimension.
pub(crate) const RECT_EDGE_TOLERANCE_FRAC: f64 = 0.1;
/// Absolute floor for geometric tolerances, in source units.
pub(crate) const GEOM_POINT_TOLERANCE: f64 = 0.4;
/// Corner regions extend this multiple of the edge tolerance, absorbing
/// rounded-corner approximation segments.
const CORNER_REGION_SCALE: f64 = 2.0;
/// Inner/outer area ratio separating an incidental hole (letterform counter)
/// from a true ring/frame.
pub(crate) const HOLE_AREA_RATIO: f64 = 0.4;
/// Bounding-box containment margin for nesting detection, in source units.
const CONTAINS_MARGIN: f64 = 0.5;

/// The primitive a subpath approximates.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeClassification {
    /// Near-circular loop.
    Circle {
        /// Centroid of the loop.
        center: Point,
        /// Mean distance from the centroid.
        radius: f64,
    },
    /// Axis-aligned rectangular loop (including rounded-corner traces).
    Rectangle {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Horizontal extent.
        width: f64,
        /// Vertical extent.
        height: f64,
    },
    /// Anything else; keeps the full point sequence.
    Freeform {
        /// The subpath's polyline vertices.
        points: Vec<Point>,
    },
}

/// How the scene builder should paint a classified subpath, derived from its
/// nesting relationship with sibling subpaths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeRole {
    /// Ordinary shape; painted per the image's style spec.
    Solid,
    /// Outline of a ring/frame: stroke only, widened stroke, no fill, so
    /// content behind the hole stays visible.
    Ring,
    /// Small interior hole (e.g. a letter counter): painted with the overlay
    /// color so it reads as a cut-out against the filled outer shape.
    Hole,
}

/// One subpath's classification plus paint role.
#[derive(Clone, Debug)]
pub struct ClassifiedShape {
    /// Recognized primitive.
    pub shape: ShapeClassification,
    /// Whether the source subpath was closed.
    pub closed: bool,
    /// Paint role from ring/hole analysis.
    pub role: ShapeRole,
}

/// Classify one subpath in isolation, first match wins: circle, then
/// rectangle, then freeform.
///
/// The circle test runs first on purpose: rounded-square traces can satisfy a
/// loose rectangle test, so the stricter circularity check must get the first
/// look. Open subpaths are always freeform.
pub fn classify_subpath(subpath: &Subpath) -> ShapeClassification {
    if subpath.closed {
        let ring = subpath.ring_points();
        if let Some(shape) = try_circle(ring) {
            return shape;
        }
        match try_rectangle(ring) {
            Ok(Some(shape)) => return shape,
            Ok(None) => {}
            Err(reason) => {
                // Recovered locally: degenerate boxes degrade to freeform.
                tracing::debug!(%reason, "rectangle test degenerate, keeping freeform");
            }
        }
    }
    ShapeClassification::Freeform {
        points: subpath.points.clone(),
    }
}

/// Classify every subpath of one image and resolve ring/hole relationships
/// between nested loops.
///
/// Output order equals input order; no subpath is dropped or reordered.
pub fn classify_subpaths(subpaths: &[Subpath]) -> Vec<ClassifiedShape> {
    let mut shapes: Vec<ClassifiedShape> = subpaths
        .iter()
        .map(|sp| ClassifiedShape {
            shape: classify_subpath(sp),
            closed: sp.closed,
            role: ShapeRole::Solid,
        })
        .collect();

    let metrics: Vec<Option<(Rect, f64)>> = subpaths
        .iter()
        .map(|sp| {
            if !sp.closed {
                return None;
            }
            let bounds = sp.bounds().ok()?;
            let area = signed_area(sp.ring_points()).abs();
            (area > 0.0).then_some((bounds, area))
        })
        .collect();

    for inner in 0..subpaths.len() {
        let Some((inner_bounds, inner_area)) = metrics[inner] else {
            continue;
        };
        // Direct parent: the smallest strictly larger loop containing this one.
        let mut parent: Option<(usize, f64)> = None;
        for outer in 0..subpaths.len() {
            if outer == inner {
                continue;
            }
            let Some((outer_bounds, outer_area)) = metrics[outer] else {
                continue;
            };
            if outer_area <= inner_area || !bounds_contain(outer_bounds, inner_bounds) {
                continue;
            }
            match parent {
                Some((_, best_area)) if best_area <= outer_area => {}
                _ => parent = Some((outer, outer_area)),
            }
        }
        if let Some((outer, outer_area)) = parent {
            let ratio = inner_area / outer_area;
            if ratio < HOLE_AREA_RATIO {
                shapes[inner].role = ShapeRole::Hole;
            } else {
                shapes[outer].role = ShapeRole::Ring;
                shapes[inner].role = ShapeRole::Ring;
            }
        }
    }

    shapes
}

fn bounds_contain(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 - CONTAINS_MARGIN
        && inner.y0 >= outer.y0 - CONTAINS_MARGIN
        && inner.x1 <= outer.x1 + CONTAINS_MARGIN
        && inner.y1 <= outer.y1 + CONTAINS_MARGIN
}

fn try_circle(ring: &[Point]) -> Option<ShapeClassification> {
    if ring.len() <= CIRCLE_MIN_POINTS {
        return None;
    }
    let n = ring.len() as f64;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for p in ring {
        cx += p.x;
        cy += p.y;
    }
    let center = Point::new(cx / n, cy / n);

    let radii: Vec<f64> = ring.iter().map(|p| p.distance(center)).collect();
    let mean = radii.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return None;
    }
    let variance = radii.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let cv = variance.sqrt() / mean;
    (cv < CIRCLE_CV_MAX).then_some(ShapeClassification::Circle {
        center,
        radius: mean,
    })
}

/// `Err` carries the degenerate-geometry reason; `Ok(None)` is a clean
/// "not a rectangle".
fn try_rectangle(ring: &[Point]) -> Result<Option<ShapeClassification>, String> {
    if ring.len() < 4 {
        return Ok(None);
    }
    let mut bounds = Rect::new(ring[0].x, ring[0].y, ring[0].x, ring[0].y);
    for p in &ring[1..] {
        bounds.x0 = bounds.x0.min(p.x);
        bounds.y0 = bounds.y0.min(p.y);
        bounds.x1 = bounds.x1.max(p.x);
        bounds.y1 = bounds.y1.max(p.y);
    }
    let width = bounds.x1 - bounds.x0;
    let height = bounds.y1 - bounds.y0;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!(
            "zero-area bounding box ({width} x {height})"
        ));
    }

    let max_dim = width.max(height);
    let tol = (RECT_EDGE_TOLERANCE_FRAC * max_dim).max(GEOM_POINT_TOLERANCE);
    for p in ring {
        let edge_dist = (p.x - bounds.x0)
            .min(bounds.x1 - p.x)
            .min(p.y - bounds.y0)
            .min(bounds.y1 - p.y);
        if edge_dist > tol {
            return Ok(None);
        }
    }

    let corner_tol = tol * CORNER_REGION_SCALE;
    let corners = [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x1, bounds.y1),
        Point::new(bounds.x0, bounds.y1),
    ];
    let all_corners_visited = corners.iter().all(|corner| {
        ring.iter().any(|p| {
            (p.x - corner.x).abs() <= corner_tol && (p.y - corner.y).abs() <= corner_tol
        })
    });
    if !all_corners_visited {
        return Ok(None);
    }

    Ok(Some(ShapeClassification::Rectangle {
        x: bounds.x0,
        y: bounds.y0,
        width,
        height,
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/classify/loops.rs"]
mod tests;

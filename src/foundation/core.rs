use crate::foundation::error::{ScrawlError, ScrawlResult};

pub use kurbo::{Point, Rect, Vec2};

/// Coordinate tolerance below which two points are considered coincident.
pub(crate) const POINT_EPSILON: f64 = 1e-3;

/// One continuous traced contour, flattened to a polyline in source units.
///
/// Insertion order of subpaths within an image is significant: it determines
/// draw/overlap order in the output scene and is preserved end-to-end.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Subpath {
    /// Polyline vertices in source units.
    pub points: Vec<Point>,
    /// `true` when the contour was closed with a `Z` command (or ends on its
    /// starting point).
    pub closed: bool,
}

impl Subpath {
    /// Axis-aligned bounding box of the polyline.
    ///
    /// Fails with [`ScrawlError::DegenerateGeometry`] on an empty point list.
    pub fn bounds(&self) -> ScrawlResult<Rect> {
        let first = self
            .points
            .first()
            .ok_or_else(|| ScrawlError::degenerate("subpath has no points"))?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for p in &self.points[1..] {
            rect.x0 = rect.x0.min(p.x);
            rect.y0 = rect.y0.min(p.y);
            rect.x1 = rect.x1.max(p.x);
            rect.y1 = rect.y1.max(p.y);
        }
        Ok(rect)
    }

    /// Points with the duplicated closing vertex removed, if present.
    pub(crate) fn ring_points(&self) -> &[Point] {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() > 1 && points_close(*a, *b) => {
                &self.points[..self.points.len() - 1]
            }
            _ => &self.points,
        }
    }
}

/// Whether two points coincide within [`POINT_EPSILON`].
pub(crate) fn points_close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() <= POINT_EPSILON && (a.y - b.y).abs() <= POINT_EPSILON
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

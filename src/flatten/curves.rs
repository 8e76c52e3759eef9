use smallvec::SmallVec;

use crate::foundation::core::{Point, Subpath, Vec2, points_close};
use crate::foundation::error::{ScrawlError, ScrawlResult};
use crate::flatten::simplify::simplify_subpath;
use crate::parse::path::PathCommand;

/// Tolerance and recursion controls for curve flattening.
#[derive(Clone, Copy, Debug)]
pub struct FlattenOptions {
    /// Maximum perpendicular deviation of a chord from the true curve, in
    /// source units.
    pub tolerance: f64,
    /// Hard ceiling on Bézier subdivision depth; bounds work on degenerate
    /// control polygons.
    pub max_depth: u32,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            max_depth: 16,
        }
    }
}

impl FlattenOptions {
    fn validate(&self) -> ScrawlResult<()> {
        if !(self.tolerance > 0.0) {
            return Err(ScrawlError::validation("flatten tolerance must be > 0"));
        }
        if self.max_depth == 0 {
            return Err(ScrawlError::validation("flatten max_depth must be >= 1"));
        }
        Ok(())
    }
}

/// Flatten a command stream into polyline subpaths.
///
/// Consumes the output of [`crate::PathParser`] directly (items are
/// `Result`); the first parse error aborts the whole path. Subpaths with
/// fewer than two distinct points are dropped silently, everything else is
/// emitted in source order and simplified with Ramer–Douglas–Peucker.
pub fn flatten_path<I>(commands: I, options: &FlattenOptions) -> ScrawlResult<Vec<Subpath>>
where
    I: IntoIterator<Item = ScrawlResult<PathCommand>>,
{
    options.validate()?;
    let mut sink = SubpathSink::new(*options);
    for command in commands {
        sink.push(command?);
    }
    Ok(sink.finish())
}

/// Accumulates flattened points and splits them into subpaths.
struct SubpathSink {
    options: FlattenOptions,
    current: Vec<Point>,
    closed: bool,
    out: Vec<Subpath>,
}

impl SubpathSink {
    fn new(options: FlattenOptions) -> Self {
        Self {
            options,
            current: Vec::new(),
            closed: false,
            out: Vec::new(),
        }
    }

    fn cursor(&self) -> Point {
        *self.current.last().unwrap_or(&Point::ZERO)
    }

    fn append(&mut self, p: Point) {
        match self.current.last() {
            Some(last) if points_close(*last, p) => {}
            _ => self.current.push(p),
        }
    }

    fn flush(&mut self) {
        let points = std::mem::take(&mut self.current);
        let closed = self.closed
            || (points.len() > 2 && points_close(points[0], points[points.len() - 1]));
        self.closed = false;
        if points.len() < 2 {
            return;
        }
        let subpath = simplify_subpath(Subpath { points, closed });
        if subpath.points.len() >= 2 {
            self.out.push(subpath);
        }
    }

    fn push(&mut self, command: PathCommand) {
        match command {
            PathCommand::MoveTo { to } => {
                self.flush();
                self.current.push(to);
            }
            PathCommand::LineTo { to } => self.append(to),
            PathCommand::CubicCurveTo { ctrl1, ctrl2, to } => {
                self.flatten_cubic(CubicSeg {
                    p0: self.cursor(),
                    p1: ctrl1,
                    p2: ctrl2,
                    p3: to,
                });
            }
            PathCommand::QuadraticCurveTo { ctrl, to } => {
                // Degree elevation; quadratics share the cubic machinery.
                let p0 = self.cursor();
                let p1 = p0 + (ctrl - p0) * (2.0 / 3.0);
                let p2 = to + (ctrl - to) * (2.0 / 3.0);
                self.flatten_cubic(CubicSeg {
                    p0,
                    p1,
                    p2,
                    p3: to,
                });
            }
            PathCommand::EllipticalArcTo {
                radii,
                x_rotation_deg,
                large_arc,
                sweep,
                to,
            } => self.flatten_arc(radii, x_rotation_deg, large_arc, sweep, to),
            PathCommand::ClosePath => {
                if let Some(&first) = self.current.first() {
                    if !points_close(first, self.cursor()) {
                        self.current.push(first);
                    }
                    self.closed = true;
                }
                self.flush();
            }
        }
    }

    /// Iterative De Casteljau halving with an explicit stack.
    fn flatten_cubic(&mut self, seg: CubicSeg) {
        let tolerance = self.options.tolerance;
        let max_depth = self.options.max_depth;
        let mut stack: SmallVec<[(CubicSeg, u32); 16]> = SmallVec::new();
        stack.push((seg, 0));
        while let Some((seg, depth)) = stack.pop() {
            if depth >= max_depth || seg.is_flat(tolerance) {
                self.append(seg.p3);
                continue;
            }
            let (left, right) = seg.subdivide();
            // Right first: the stack pops left-to-right.
            stack.push((right, depth + 1));
            stack.push((left, depth + 1));
        }
    }

    /// Endpoint-parameterized arc → center parameterization → uniform
    /// angular samples (W3C SVG implementation notes, F.6.5/F.6.6).
    fn flatten_arc(
        &mut self,
        radii: Vec2,
        x_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) {
        let from = self.cursor();
        if points_close(from, to) {
            return;
        }
        let (mut rx, mut ry) = (radii.x, radii.y);
        if rx == 0.0 || ry == 0.0 {
            self.append(to);
            return;
        }

        let phi = x_rotation_deg.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Into the ellipse's own frame, origin at the chord midpoint.
        let dx2 = (from.x - to.x) / 2.0;
        let dy2 = (from.y - to.y) / 2.0;
        let x1p = cos_phi * dx2 + sin_phi * dy2;
        let y1p = -sin_phi * dx2 + cos_phi * dy2;

        // Radii too small to span the endpoints get scaled up (F.6.6.2).
        let lambda = (x1p / rx).powi(2) + (y1p / ry).powi(2);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let x1p2 = x1p * x1p;
        let y1p2 = y1p * y1p;
        let denom = rx2 * y1p2 + ry2 * x1p2;
        if denom == 0.0 {
            self.append(to);
            return;
        }
        let num = (rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2).max(0.0);
        let mut factor = (num / denom).sqrt();
        if large_arc == sweep {
            factor = -factor;
        }
        let cxp = factor * rx * y1p / ry;
        let cyp = -factor * ry * x1p / rx;

        let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
        let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

        let start_angle = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
        let end_angle = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
        let mut delta = end_angle - start_angle;
        if sweep && delta < 0.0 {
            delta += std::f64::consts::TAU;
        } else if !sweep && delta > 0.0 {
            delta -= std::f64::consts::TAU;
        }

        // Sagitta bound: a chord over angle theta deviates ~ r*theta^2/8, so
        // theta = sqrt(8*tol/r) keeps each sample chord within tolerance.
        let r_max = rx.max(ry);
        let max_step = (8.0 * self.options.tolerance / r_max).sqrt();
        let segments = ((delta.abs() / max_step).ceil() as usize).clamp(2, 256);

        for i in 1..=segments {
            let t = i as f64 / segments as f64;
            let angle = start_angle + delta * t;
            let (sin_a, cos_a) = angle.sin_cos();
            let x = cx + rx * cos_a * cos_phi - ry * sin_a * sin_phi;
            let y = cy + rx * cos_a * sin_phi + ry * sin_a * cos_phi;
            self.append(Point::new(x, y));
        }
        // Land exactly on the endpoint regardless of rounding.
        if self.current.last().is_some_and(|last| points_close(*last, to)) {
            if let Some(last) = self.current.last_mut() {
                *last = to;
            }
        } else {
            self.current.push(to);
        }
    }

    fn finish(mut self) -> Vec<Subpath> {
        self.flush();
        self.out
    }
}

#[derive(Clone, Copy, Debug)]
struct CubicSeg {
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
}

impl CubicSeg {
    /// Both control points within `tolerance` of the chord.
    fn is_flat(&self, tolerance: f64) -> bool {
        use crate::foundation::math::perpendicular_distance;
        let chord_len = self.p0.distance(self.p3);
        if chord_len == 0.0 {
            return self.p1.distance(self.p0) <= tolerance
                && self.p2.distance(self.p0) <= tolerance;
        }
        perpendicular_distance(self.p1, self.p0, self.p3) <= tolerance
            && perpendicular_distance(self.p2, self.p0, self.p3) <= tolerance
    }

    fn subdivide(&self) -> (CubicSeg, CubicSeg) {
        let m01 = self.p0.midpoint(self.p1);
        let m12 = self.p1.midpoint(self.p2);
        let m23 = self.p2.midpoint(self.p3);
        let m012 = m01.midpoint(m12);
        let m123 = m12.midpoint(m23);
        let mid = m012.midpoint(m123);
        (
            CubicSeg {
                p0: self.p0,
                p1: m01,
                p2: m012,
                p3: mid,
            },
            CubicSeg {
                p0: mid,
                p1: m123,
                p2: m23,
                p3: self.p3,
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/flatten/curves.rs"]
mod tests;

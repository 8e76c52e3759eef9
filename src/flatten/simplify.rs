use crate::foundation::core::{Point, Subpath, points_close};
use crate::foundation::math::perpendicular_distance;

/// Absolute floor for the simplification epsilon, in source units.
pub(crate) const SIMPLIFY_EPSILON: f64 = 0.2;
/// Relative epsilon as a fraction of the subpath's largest bounding
/// dimension; dominates for large shapes.
pub(crate) const SIMPLIFY_RELATIVE_SCALE: f64 = 0.02;

/// Ramer–Douglas–Peucker simplification of one flattened subpath.
///
/// Closed subpaths keep their duplicated closing vertex through
/// simplification. The epsilon adapts to the subpath's size so densely
/// sampled curves collapse to a stable vertex count regardless of scale.
pub(crate) fn simplify_subpath(subpath: Subpath) -> Subpath {
    if subpath.points.len() < 3 {
        return subpath;
    }
    let closed = subpath.closed
        || points_close(subpath.points[0], subpath.points[subpath.points.len() - 1]);
    let working: &[Point] = if closed {
        &subpath.points[..subpath.points.len() - 1]
    } else {
        &subpath.points
    };
    if working.len() < 3 {
        return subpath;
    }

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (
        f64::INFINITY,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NEG_INFINITY,
    );
    for p in working {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let max_dim = (max_x - min_x).max(max_y - min_y);
    let epsilon = SIMPLIFY_EPSILON.max(max_dim * SIMPLIFY_RELATIVE_SCALE);

    let mut points = rdp(working, epsilon);
    if closed {
        match points.last() {
            Some(last) if points_close(points[0], *last) => {}
            _ => {
                let first = points[0];
                points.push(first);
            }
        }
    }
    Subpath {
        points,
        closed: subpath.closed || closed,
    }
}

/// Iterative Ramer–Douglas–Peucker over index ranges; avoids unbounded
/// recursion on pathological inputs.
fn rdp(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    let mut ranges = vec![(0usize, points.len() - 1)];
    while let Some((first, last)) = ranges.pop() {
        if last <= first + 1 {
            continue;
        }
        let mut max_dist = -1.0;
        let mut index = first;
        for i in (first + 1)..last {
            let dist = perpendicular_distance(points[i], points[first], points[last]);
            if dist > max_dist {
                max_dist = dist;
                index = i;
            }
        }
        if max_dist > epsilon {
            keep[index] = true;
            ranges.push((first, index));
            ranges.push((index, last));
        }
    }

    points
        .iter()
        .zip(&keep)
        .filter_map(|(p, &k)| k.then_some(*p))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/flatten/simplify.rs"]
mod tests;

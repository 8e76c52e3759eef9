use super::*;

fn subpath(points: &[(f64, f64)], closed: bool) -> Subpath {
    Subpath {
        points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        closed,
    }
}

#[test]
fn bounds_cover_all_points() {
    let sp = subpath(&[(4.0, 4.0), (20.0, 4.0), (20.0, 20.0), (4.0, 20.0)], true);
    let b = sp.bounds().unwrap();
    assert_eq!((b.x0, b.y0, b.x1, b.y1), (4.0, 4.0, 20.0, 20.0));
}

#[test]
fn bounds_of_empty_subpath_is_degenerate() {
    let sp = subpath(&[], false);
    assert!(matches!(
        sp.bounds(),
        Err(ScrawlError::DegenerateGeometry(_))
    ));
}

#[test]
fn ring_points_drops_duplicated_closing_vertex() {
    let closed = subpath(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)], true);
    assert_eq!(closed.ring_points().len(), 3);

    let open = subpath(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], false);
    assert_eq!(open.ring_points().len(), 3);
}

use super::*;
use crate::style::spec::{DEFAULT_STROKE_WIDTH, FILLED_BACKGROUND_COLOR, resolve_style};
use crate::style::spec::{IconVariant, SourcePaint};

fn styled(shape: ShapeClassification, role: ShapeRole, variant: IconVariant) -> StyledShape {
    StyledShape {
        shape: ClassifiedShape {
            shape,
            closed: true,
            role,
        },
        style: resolve_style(variant, &SourcePaint::default()),
    }
}

fn circle(cx: f64, cy: f64, r: f64) -> ShapeClassification {
    ShapeClassification::Circle {
        center: Point::new(cx, cy),
        radius: r,
    }
}

#[test]
fn builder_rejects_non_positive_scale() {
    assert!(SceneBuilder::new("icon", 0.0).is_err());
    assert!(SceneBuilder::new("icon", -1.0).is_err());
}

#[test]
fn circle_scales_into_an_ellipse_element() {
    let builder = SceneBuilder::new("icon", 4.0).unwrap();
    let scene = builder.build(vec![styled(
        circle(12.0, 12.0, 10.0),
        ShapeRole::Solid,
        IconVariant::Regular,
    )]);
    assert_eq!(scene.elements.len(), 1);
    let common = scene.elements[0].common();
    assert!(matches!(scene.elements[0], SceneElement::Ellipse { .. }));
    assert_eq!((common.x, common.y), (8.0, 8.0));
    assert_eq!((common.width, common.height), (80.0, 80.0));
}

#[test]
fn rectangle_scales_uniformly() {
    let builder = SceneBuilder::new("icon", 4.0).unwrap();
    let scene = builder.build(vec![styled(
        ShapeClassification::Rectangle {
            x: 4.0,
            y: 4.0,
            width: 16.0,
            height: 16.0,
        },
        ShapeRole::Solid,
        IconVariant::Regular,
    )]);
    let common = scene.elements[0].common();
    assert!(matches!(scene.elements[0], SceneElement::Rectangle { .. }));
    assert_eq!((common.x, common.y), (16.0, 16.0));
    assert_eq!((common.width, common.height), (64.0, 64.0));
}

#[test]
fn freeform_points_are_relative_to_the_element_origin() {
    let builder = SceneBuilder::new("icon", 2.0).unwrap();
    let scene = builder.build(vec![StyledShape {
        shape: ClassifiedShape {
            shape: ShapeClassification::Freeform {
                points: vec![
                    Point::new(3.0, 5.0),
                    Point::new(7.0, 5.0),
                    Point::new(5.0, 9.0),
                ],
            },
            closed: false,
            role: ShapeRole::Solid,
        },
        style: resolve_style(IconVariant::Filled, &SourcePaint::default()),
    }]);
    match &scene.elements[0] {
        SceneElement::Line { common, points, .. } => {
            assert_eq!((common.x, common.y), (6.0, 10.0));
            assert_eq!(points[0], [0.0, 0.0]);
            assert_eq!(points[1], [8.0, 0.0]);
            assert_eq!(points[2], [4.0, 8.0]);
            // Open polylines never get a fill, filled variant or not.
            assert_eq!(common.background_color, "transparent");
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn closed_freeform_keeps_the_fill() {
    let builder = SceneBuilder::new("icon", 1.0).unwrap();
    let scene = builder.build(vec![StyledShape {
        shape: ClassifiedShape {
            shape: ShapeClassification::Freeform {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 0.0),
                    Point::new(5.0, 9.0),
                    Point::new(0.0, 0.0),
                ],
            },
            closed: true,
            role: ShapeRole::Solid,
        },
        style: resolve_style(IconVariant::Filled, &SourcePaint::default()),
    }]);
    assert_eq!(
        scene.elements[0].common().background_color,
        FILLED_BACKGROUND_COLOR
    );
}

#[test]
fn ring_role_strips_fill_and_widens_stroke() {
    let builder = SceneBuilder::new("icon", 4.0).unwrap();
    let scene = builder.build(vec![styled(
        circle(12.0, 12.0, 10.0),
        ShapeRole::Ring,
        IconVariant::Filled,
    )]);
    let common = scene.elements[0].common();
    assert_eq!(common.background_color, "transparent");
    assert_eq!(common.stroke_width, RING_STROKE_WIDTH);
    assert!(common.stroke_width > DEFAULT_STROKE_WIDTH);
}

#[test]
fn hole_role_paints_the_overlay_color() {
    let builder = SceneBuilder::new("icon", 4.0).unwrap();
    let scene = builder.build(vec![
        styled(circle(12.0, 12.0, 10.0), ShapeRole::Solid, IconVariant::Filled),
        styled(circle(12.0, 12.0, 2.0), ShapeRole::Hole, IconVariant::Filled),
    ]);
    assert_eq!(
        scene.elements[0].common().background_color,
        FILLED_BACKGROUND_COLOR
    );
    assert_eq!(scene.elements[1].common().background_color, OVERLAY_COLOR);
}

#[test]
fn nested_same_color_fill_gets_the_overlay_color() {
    // Role analysis is per path element; the builder's recolor pass catches
    // nesting across path elements too.
    let builder = SceneBuilder::new("icon", 1.0).unwrap();
    let scene = builder.build(vec![
        styled(
            ShapeClassification::Rectangle {
                x: 0.0,
                y: 0.0,
                width: 20.0,
                height: 20.0,
            },
            ShapeRole::Solid,
            IconVariant::Filled,
        ),
        styled(
            ShapeClassification::Rectangle {
                x: 6.0,
                y: 6.0,
                width: 4.0,
                height: 4.0,
            },
            ShapeRole::Solid,
            IconVariant::Filled,
        ),
    ]);
    assert_eq!(scene.elements[1].common().background_color, OVERLAY_COLOR);
    // Order is untouched.
    assert_eq!(scene.elements[0].common().width, 20.0);
}

#[test]
fn ids_are_deterministic_and_distinct() {
    let builder = SceneBuilder::new("icon", 4.0).unwrap();
    let shapes = || {
        vec![
            styled(circle(5.0, 5.0, 3.0), ShapeRole::Solid, IconVariant::Regular),
            styled(circle(15.0, 15.0, 3.0), ShapeRole::Solid, IconVariant::Regular),
        ]
    };
    let a = builder.build(shapes());
    let b = builder.build(shapes());
    assert_eq!(a, b);
    assert_ne!(a.elements[0].common().id, a.elements[1].common().id);
    assert!(a.elements[0].common().seed > 0);
    assert!(a.elements[0].common().version_nonce > 0);

    let other = SceneBuilder::new("other-icon", 4.0).unwrap().build(shapes());
    assert_ne!(a.elements[0].common().id, other.elements[0].common().id);
}

#[test]
fn all_elements_share_one_group_id() {
    let builder = SceneBuilder::new("icon", 4.0).unwrap();
    let scene = builder.build(vec![
        styled(circle(5.0, 5.0, 3.0), ShapeRole::Solid, IconVariant::Regular),
        styled(circle(15.0, 15.0, 3.0), ShapeRole::Solid, IconVariant::Regular),
    ]);
    let group = &scene.elements[0].common().group_ids;
    assert_eq!(group.len(), 1);
    assert_eq!(scene.elements[1].common().group_ids, *group);
}

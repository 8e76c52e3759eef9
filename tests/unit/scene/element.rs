use super::*;

fn sample_common() -> ElementCommon {
    ElementCommon {
        version: 1,
        version_nonce: 7,
        is_deleted: false,
        id: "abc123".to_string(),
        fill_style: "solid".to_string(),
        stroke_width: 2.0,
        stroke_style: "solid".to_string(),
        roughness: 1,
        opacity: 100,
        angle: 0.0,
        x: 8.0,
        y: 8.0,
        stroke_color: "#1e1e1e".to_string(),
        background_color: "transparent".to_string(),
        width: 80.0,
        height: 80.0,
        seed: 42,
        group_ids: vec!["g0".to_string()],
        bound_elements: Vec::new(),
        updated: 1,
        link: None,
        locked: false,
    }
}

#[test]
fn ellipse_serializes_with_schema_field_names() {
    let element = SceneElement::Ellipse {
        common: sample_common(),
        start_binding: None,
        end_binding: None,
    };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(value["type"], "ellipse");
    assert_eq!(value["strokeColor"], "#1e1e1e");
    assert_eq!(value["backgroundColor"], "transparent");
    assert_eq!(value["versionNonce"], 7);
    assert_eq!(value["isDeleted"], false);
    assert_eq!(value["groupIds"][0], "g0");
    assert_eq!(value["startBinding"], serde_json::Value::Null);
    assert!(value.get("roundness").is_none());
    assert!(value.get("points").is_none());
}

#[test]
fn rectangle_carries_adaptive_roundness() {
    let element = SceneElement::Rectangle {
        common: sample_common(),
        roundness: Roundness::adaptive(),
    };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(value["type"], "rectangle");
    assert_eq!(value["roundness"]["type"], 3);
}

#[test]
fn line_serializes_points_and_null_bindings() {
    let element = SceneElement::Line {
        common: sample_common(),
        roundness: Roundness::adaptive(),
        points: vec![[0.0, 0.0], [8.0, 4.0]],
        last_committed_point: None,
        start_binding: None,
        end_binding: None,
        start_arrowhead: None,
        end_arrowhead: None,
    };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(value["type"], "line");
    assert_eq!(value["points"][1][0], 8.0);
    assert_eq!(value["lastCommittedPoint"], serde_json::Value::Null);
    assert_eq!(value["endArrowhead"], serde_json::Value::Null);
}

#[test]
fn scene_document_envelope_matches_the_external_format() {
    let scene = Scene {
        kind: "excalidraw".to_string(),
        version: 2,
        source: "scrawl".to_string(),
        elements: Vec::new(),
        app_state: AppState::default(),
        files: serde_json::Map::new(),
    };
    let value = serde_json::to_value(&scene).unwrap();
    assert_eq!(value["type"], "excalidraw");
    assert_eq!(value["version"], 2);
    assert_eq!(value["appState"]["gridSize"], serde_json::Value::Null);
    assert_eq!(value["appState"]["viewBackgroundColor"], "#ffffff");
    assert_eq!(value["files"], serde_json::json!({}));
}

#[test]
fn scene_round_trips_through_json() {
    let scene = Scene {
        kind: "excalidraw".to_string(),
        version: 2,
        source: "scrawl".to_string(),
        elements: vec![SceneElement::Rectangle {
            common: sample_common(),
            roundness: Roundness::adaptive(),
        }],
        app_state: AppState::default(),
        files: serde_json::Map::new(),
    };
    let json = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&json).unwrap();
    assert_eq!(back, scene);
}

use super::*;

fn icon(name: &str, variant: &str, data: &str) -> IconSource {
    IconSource {
        name: name.to_string(),
        variant: variant.to_string(),
        paths: vec![PathSpec {
            data: data.to_string(),
            paint: SourcePaint::default(),
        }],
        view_box: Some((24.0, 24.0)),
    }
}

#[test]
fn scale_normalizes_against_the_view_box() {
    let options = ConvertOptions::default();
    let mut source = icon("i", "regular", "M0 0h1");
    assert_eq!(options.scale_for(&source), 4.0);

    source.view_box = Some((48.0, 48.0));
    assert_eq!(options.scale_for(&source), 2.0);

    source.view_box = None;
    assert_eq!(options.scale_for(&source), 4.0);

    source.view_box = Some((0.0, 0.0));
    assert_eq!(options.scale_for(&source), 4.0);
}

#[test]
fn unknown_variant_falls_back_to_regular() {
    let source = icon("i", "glossy", "M4 4h16v16h-16z");
    let scene = convert_icon(&source, &ConvertOptions::default()).unwrap();
    assert_eq!(scene.elements[0].common().background_color, "transparent");
}

#[test]
fn malformed_path_fails_the_image() {
    let source = icon("i", "regular", "M 4 4 Q");
    let result = convert_icon(&source, &ConvertOptions::default());
    assert!(matches!(result, Err(ScrawlError::MalformedPath { .. })));
}

#[test]
fn invalid_options_are_rejected() {
    let source = icon("i", "regular", "M0 0h1");
    let options = ConvertOptions {
        base_scale: 0.0,
        ..ConvertOptions::default()
    };
    assert!(matches!(
        convert_icon(&source, &options),
        Err(ScrawlError::Validation(_))
    ));
}

#[test]
fn batch_with_zero_threads_fails_every_image_with_a_reason() {
    let sources = vec![icon("a", "regular", "M0 0h1"), icon("b", "regular", "M0 0h1")];
    let outcomes = convert_batch(
        &sources,
        &BatchOptions {
            threads: Some(0),
            ..BatchOptions::default()
        },
    );
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result.is_err()));
}

#[test]
fn scene_json_ends_with_a_newline() {
    let source = icon("i", "regular", "M4 4h16v16h-16z");
    let scene = convert_icon(&source, &ConvertOptions::default()).unwrap();
    let json = scene_to_json(&scene).unwrap();
    assert!(json.ends_with('\n'));
    assert!(json.starts_with('{'));
}

#[test]
fn write_scene_creates_parent_directories() {
    let source = icon("i", "regular", "M4 4h16v16h-16z");
    let scene = convert_icon(&source, &ConvertOptions::default()).unwrap();
    let dir = std::env::temp_dir().join(format!("scrawl-test-{}", std::process::id()));
    let path = dir.join("nested/out.excalidraw");
    write_scene(&scene, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, scene_to_json(&scene).unwrap());
    std::fs::remove_dir_all(&dir).ok();
}

use scrawl::{ConvertOptions, IconSource, PathSpec, SourcePaint, convert_icon, scene_to_json};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let source = IconSource {
        name: "ring".to_string(),
        variant: "filled".to_string(),
        paths: vec![PathSpec {
            data: "M12 2a10 10 0 1 0 0 20 10 10 0 1 0 0-20zM12 5a7 7 0 1 1 0 14 7 7 0 1 1 0-14z"
                .to_string(),
            paint: SourcePaint::default(),
        }],
        view_box: Some((24.0, 24.0)),
    };

    let scene = convert_icon(&source, &ConvertOptions::default())?;
    print!("{}", scene_to_json(&scene)?);

    Ok(())
}

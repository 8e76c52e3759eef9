use super::*;

#[test]
fn variant_names_parse_case_insensitively() {
    assert_eq!(IconVariant::parse("regular").unwrap(), IconVariant::Regular);
    assert_eq!(IconVariant::parse("Outline").unwrap(), IconVariant::Regular);
    assert_eq!(IconVariant::parse("FILLED").unwrap(), IconVariant::Filled);
    assert_eq!(IconVariant::parse("color").unwrap(), IconVariant::Color);
}

#[test]
fn unknown_variant_is_an_error() {
    let err = IconVariant::parse("glossy").unwrap_err();
    assert!(matches!(err, ScrawlError::UnsupportedStyleVariant(v) if v == "glossy"));
}

#[test]
fn regular_variant_has_no_background() {
    let style = resolve_style(IconVariant::Regular, &SourcePaint::default());
    assert_eq!(style.background_color, "transparent");
    assert_eq!(style.stroke_color, STROKE_COLOR);
    assert_eq!(style.stroke_width, DEFAULT_STROKE_WIDTH);
    assert_eq!(style.roughness, DEFAULT_ROUGHNESS);
    assert_eq!(style.fill_style, DEFAULT_FILL_STYLE);
}

#[test]
fn filled_variant_uses_opaque_background() {
    let style = resolve_style(IconVariant::Filled, &SourcePaint::default());
    assert_eq!(style.background_color, FILLED_BACKGROUND_COLOR);

    let explicit = resolve_style(
        IconVariant::Filled,
        &SourcePaint {
            fill: Some("#c92a2a".to_string()),
            stroke: None,
        },
    );
    assert_eq!(explicit.background_color, FILLED_BACKGROUND_COLOR);
}

#[test]
fn filled_variant_respects_none_and_white() {
    let none = resolve_style(
        IconVariant::Filled,
        &SourcePaint {
            fill: Some("none".to_string()),
            stroke: None,
        },
    );
    assert_eq!(none.background_color, "transparent");

    let white = resolve_style(
        IconVariant::Filled,
        &SourcePaint {
            fill: Some("#FFF".to_string()),
            stroke: None,
        },
    );
    assert_eq!(white.background_color, OVERLAY_COLOR);
}

#[test]
fn color_variant_snaps_fill_to_palette() {
    let style = resolve_style(
        IconVariant::Color,
        &SourcePaint {
            fill: Some("#c92b2b".to_string()),
            stroke: None,
        },
    );
    assert_eq!(style.background_color, "#c92a2a");
}

#[test]
fn color_variant_without_fill_is_transparent() {
    let style = resolve_style(IconVariant::Color, &SourcePaint::default());
    assert_eq!(style.background_color, "transparent");
    assert_eq!(style.stroke_color, STROKE_COLOR);
}

#[test]
fn color_variant_maps_stroke_but_keeps_default_on_none() {
    let style = resolve_style(
        IconVariant::Color,
        &SourcePaint {
            fill: None,
            stroke: Some("#1965c0".to_string()),
        },
    );
    assert_eq!(style.stroke_color, "#1971c2");

    let none = resolve_style(
        IconVariant::Color,
        &SourcePaint {
            fill: None,
            stroke: Some("none".to_string()),
        },
    );
    assert_eq!(none.stroke_color, STROKE_COLOR);
}

#[test]
fn defaults_apply_uniformly_across_variants() {
    for variant in [IconVariant::Regular, IconVariant::Filled, IconVariant::Color] {
        let style = resolve_style(variant, &SourcePaint::default());
        assert_eq!(style.stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(style.roughness, DEFAULT_ROUGHNESS);
        assert_eq!(style.fill_style, DEFAULT_FILL_STYLE);
    }
}

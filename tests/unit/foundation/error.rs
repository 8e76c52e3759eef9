use super::*;

#[test]
fn display_prefixes_are_stable() {
    let err = ScrawlError::malformed_path("Q", 6);
    assert_eq!(
        err.to_string(),
        "malformed path data at byte 6: unexpected 'Q'"
    );
    assert!(
        ScrawlError::degenerate("x")
            .to_string()
            .contains("degenerate geometry:")
    );
    assert!(
        ScrawlError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrawlError::UnsupportedStyleVariant("glossy".to_string())
            .to_string()
            .contains("'glossy'")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrawlError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

/// Convenience result type used across Scrawl.
pub type ScrawlResult<T> = Result<T, ScrawlError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`ScrawlError::MalformedPath`] is fatal for an image; the batch driver
/// records it per image and keeps going. The geometry and style variants are
/// recovered inside the pipeline (fall back to freeform / regular style) and
/// surface here only when a caller invokes the lower-level stages directly.
#[derive(thiserror::Error, Debug)]
pub enum ScrawlError {
    /// Unparseable path-data grammar, carrying the offending token and its
    /// byte position in the source string.
    #[error("malformed path data at byte {position}: unexpected '{token}'")]
    MalformedPath {
        /// The token that could not be consumed.
        token: String,
        /// Byte offset of the token within the path-data string.
        position: usize,
    },

    /// Geometry that cannot support the requested classification, e.g. a
    /// zero-area bounding box during rectangle detection.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Unknown icon-style variant string.
    #[error("unsupported style variant: '{0}'")]
    UnsupportedStyleVariant(String),

    /// Invalid user-provided configuration or API misuse.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrawlError {
    /// Build a [`ScrawlError::MalformedPath`] value.
    pub fn malformed_path(token: impl Into<String>, position: usize) -> Self {
        Self::MalformedPath {
            token: token.into(),
            position,
        }
    }

    /// Build a [`ScrawlError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`ScrawlError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

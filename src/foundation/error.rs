/// Result alias used throughout sketchlog.
pub type SketchResult<T> = Result<T, SketchError>;

/// Errors raised while recording or replaying a drawing.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// The caller misused the drawing API (bad arguments, unbalanced state, wrong format, ...).
    #[error("usage error: {0}")]
    Usage(String),

    /// A backend could not produce pixels for a page.
    #[error("render error: {0}")]
    Render(String),

    /// Raster or animation encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other failure, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Usage`].
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`SketchError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SketchError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Return `true` for caller-misuse errors.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

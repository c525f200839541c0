/// The diagram-rendering library could not be fetched or evaluated.
///
/// `Clone` because one load result is broadcast to every widget waiting on the same URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load diagram library from {url}: {message}")]
pub struct LoadError {
    pub url: String,
    pub message: String,
}

/// The library rejected the diagram source (usually a syntax error).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard write failed: {message}")]
pub struct ClipboardError {
    pub message: String,
}

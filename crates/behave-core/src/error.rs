use thiserror::Error;

/// Everything that can stop a point field from coming up (or a frame from
/// reaching the screen).
#[derive(Clone, Debug, Error)]
pub enum FieldError {
    #[error("no graphics adapter available")]
    NoAdapter,
    #[error("device request failed: {0}")]
    Device(String),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("shader rejected: {0}")]
    Shader(String),
    #[error("frame dropped: {0}")]
    Frame(String),
}

impl FieldError {
    /// Errors that end a mount. A render task hitting one mid-loop tears
    /// itself down; a [`FieldError::Frame`] only costs that frame.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FieldError::Frame(_))
    }
}

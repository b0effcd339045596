/// Convenience result type used across stampfx.
pub type StampResult<T> = Result<T, StampError>;

/// Top-level error taxonomy used by the sticker pipeline.
#[derive(thiserror::Error, Debug)]
pub enum StampError {
    /// Canvas dimensions are unusable (zero size, or the top margin swallows the canvas).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A frame handed to the encoder does not match the first frame's dimensions.
    #[error("frame mismatch: frame {index} is {found:?}, expected {expected:?}")]
    FrameMismatch {
        /// Zero-based index of the offending frame.
        index: usize,
        /// `(width, height)` of frame 0.
        expected: (u32, u32),
        /// `(width, height)` of the offending frame.
        found: (u32, u32),
    },

    /// Invalid caller-provided data or a violated precondition.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while writing the animated PNG stream.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Build a [`StampError::InvalidGeometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`StampError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StampError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

impl From<png::EncodingError> for StampError {
    fn from(err: png::EncodingError) -> Self {
        Self::Encode(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

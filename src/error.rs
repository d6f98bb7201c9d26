//! Error types for placement operations.

use thiserror::Error;

/// Errors that can occur while building or committing a placement.
///
/// Invalid interaction transitions are not errors; they surface as
/// [`Transition::Ignored`](crate::placement::Transition) instead.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// Viewport has a zero dimension, so the screen/page scale is undefined
    #[error("degenerate viewport {width}x{height}: surface must be measured before mapping")]
    DegenerateViewport {
        /// Measured viewport width in pixels
        width: f32,
        /// Measured viewport height in pixels
        height: f32,
    },

    /// Commit requested with no placement rectangle selected
    #[error("no placement rectangle selected")]
    NothingSelected,

    /// Commit requested without a signature image
    #[error("signature image missing")]
    MissingAsset,

    /// Signature image bytes could not be decoded
    #[error("signature image unreadable: {0}")]
    UnreadableAsset(#[from] image::ImageError),

    /// Signature image decoded but every pixel is fully transparent
    #[error("signature image is blank")]
    BlankSignature,

    /// Signature data URL is malformed or not an image
    #[error("invalid signature data URL: {message}")]
    InvalidDataUrl {
        /// Description of what was wrong with the URL
        message: String,
    },

    /// Payload metadata failed to serialize
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlacementError {
    /// Create a degenerate-viewport error from the measured dimensions.
    pub fn degenerate_viewport(width: f32, height: f32) -> Self {
        Self::DegenerateViewport { width, height }
    }

    /// Create an invalid data URL error with a message.
    pub fn invalid_data_url(message: impl Into<String>) -> Self {
        Self::InvalidDataUrl {
            message: message.into(),
        }
    }
}

//! Error types for the transform, image source and frame sequencer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the rotate-and-scale transform
#[derive(Debug, Error)]
pub enum TransformError {
    /// The image has no pixels to rotate
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Matrix has no inverse
    #[error("singular transformation matrix")]
    SingularMatrix,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors raised while loading the source image
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("image '{}' is missing or unreadable: {source}", path.display())]
    MissingOrUnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image '{}' has no pixels ({width}x{height})", path.display())]
    EmptyImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },
}

/// Errors raised when building an angle sequence
#[derive(Debug, Error, PartialEq)]
pub enum SequenceError {
    #[error("step must be a positive finite number of degrees, got {0}")]
    InvalidStep(f64),

    #[error("sequence end {end} lies before start {start}")]
    InvalidRange { start: f64, end: f64 },
}

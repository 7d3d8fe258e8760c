//! Error types for densenms.

use thiserror::Error;

/// Result alias for densenms operations.
pub type Result<T> = std::result::Result<T, DenseNmsError>;

/// Errors that can occur when running densenms algorithms.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DenseNmsError {
    /// Boxes and scores have different lengths.
    #[error("boxes and scores differ in length: {boxes} boxes, {scores} scores")]
    InvalidShape { boxes: usize, scores: usize },
    /// The requested cluster count is not positive.
    #[error("n_clusters must be at least 1, got {n_clusters}")]
    InvalidCount { n_clusters: usize },
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    /// Class labels and boxes have different lengths.
    #[error("boxes and labels differ in length: {boxes} boxes, {labels} labels")]
    InvalidLabels { boxes: usize, labels: usize },
    /// A flat coordinate buffer does not hold whole boxes.
    #[error("box buffer length {len} is not a multiple of 4")]
    InvalidBoxesShape { len: usize },
    /// Map dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is too short for the requested view.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Image decoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

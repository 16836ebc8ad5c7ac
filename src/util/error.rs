//! Error types for pixelfind.

use crate::buffer::Rect;
use thiserror::Error;

/// Result alias for pixelfind operations.
pub type FindResult<T> = std::result::Result<T, FindError>;

/// Errors that can occur when building buffers or running a search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FindError {
    /// The search area cannot hold the target even once.
    #[error(
        "area {area_width}x{area_height} is too small for target {target_width}x{target_height}"
    )]
    AreaTooSmall {
        area_width: u32,
        area_height: u32,
        target_width: u32,
        target_height: u32,
    },
    /// A pixel access fell outside the buffer.
    #[error("pixel ({x}, {y}) is outside a {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    /// The search area does not lie inside the source buffer.
    #[error("area {area:?} is outside a {width}x{height} source")]
    AreaOutOfBounds { area: Rect, width: u32, height: u32 },
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A raw pixel vector does not have `width * height` entries.
    #[error("pixel data has {got} entries, expected {needed}")]
    BufferSizeMismatch { needed: usize, got: usize },
    /// A quadrant worker terminated abnormally.
    #[error("worker for quadrant {quadrant} failed: {reason}")]
    WorkerFailed { quadrant: usize, reason: String },
    /// More than one quadrant worker failed; every failure is kept.
    #[error("{} quadrant workers failed", .errors.len())]
    WorkersFailed { errors: Vec<FindError> },
    /// A background search thread could not be started or terminated abnormally.
    #[error("search aborted: {reason}")]
    SearchAborted { reason: String },
    /// Image decoding or encoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

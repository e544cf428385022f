//! Crate-wide error type.
//!
//! Every failure is reported to the immediate caller; there are no retries
//! and no global error state. A successful call always returns a fully
//! populated buffer.

use thiserror::Error;

/// Errors surfaced by raster operations and the codec layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The file extension or requested format id is not recognized.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The container bytes are malformed or truncated.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// The raster could not be encoded to the requested container.
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Underlying file or stream error, surfaced as-is.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A non-positive dimension was requested; rejected before allocation.
    #[error("Invalid geometry: width ({width}) and height ({height}) must be non-zero")]
    InvalidGeometry { width: u32, height: u32 },

    /// A supplied pixel buffer does not match the stated dimensions.
    #[error("Pixel buffer mismatch: expected {expected} bytes (width * height * 4), got {actual}")]
    BufferMismatch { expected: usize, actual: usize },
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for Deep Zoom generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for Deep Zoom operations.
pub type DeepZoomResult<T> = Result<T, DeepZoomError>;

/// Errors that can occur while building a Deep Zoom pyramid.
///
/// Every variant is terminal for the invocation. Output written before the
/// failure is left in place.
#[derive(Debug, Error)]
pub enum DeepZoomError {
    /// The source image path does not exist.
    #[error("input image not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The source image exists but could not be decoded.
    #[error("cannot open image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Tiling options are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tile suffix such as `.jpg[Q=90]` could not be understood.
    #[error("invalid tile suffix '{suffix}': {reason}")]
    InvalidSuffix { suffix: String, reason: String },

    /// Failed to create an output directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Tile encoding failed.
    #[error("failed to encode tile {level}/{col}_{row}: {reason}")]
    Encode {
        level: u32,
        col: u32,
        row: u32,
        reason: String,
    },

    /// Resampling a level failed.
    #[error("failed to resize level to {width}×{height}: {reason}")]
    Resize {
        width: u32,
        height: u32,
        reason: String,
    },

    /// The configuration file could not be read or parsed.
    #[error("failed to load config {}: {reason}", path.display())]
    ConfigFile { path: PathBuf, reason: String },

    /// A descriptor document could not be parsed.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),
}

impl DeepZoomError {
    /// Build an [`InvalidConfig`](Self::InvalidConfig) error.
    pub fn config(msg: impl Into<String>) -> Self {
        DeepZoomError::InvalidConfig(msg.into())
    }
}

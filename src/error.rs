//! Crate-wide error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or validating arguments.
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was not valid JSON for the expected type.
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A file parsed but its contents have the wrong shape or values.
    #[error("malformed data in {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    /// Failed to decode an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Invalid parameter value.
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },
}

impl Error {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for lane_masks operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for imaging operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for imaging operations.
pub type MaskResult<T> = Result<T, MaskError>;

/// Errors that can occur while masking, composing, or encoding frames.
#[derive(Debug, Error)]
pub enum MaskError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("frame {path} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        path: PathBuf,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MaskError {
    /// Create a decode failure error.
    pub fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.into(),
            source,
        }
    }

    /// Create an encode failure error.
    pub fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.into(),
            source,
        }
    }

    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(
        path: impl Into<PathBuf>,
        expected: (u32, u32),
        actual: (u32, u32),
    ) -> Self {
        Self::DimensionMismatch {
            path: path.into(),
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }
}

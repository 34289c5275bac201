//! Header and dimension codec error types.

use thiserror::Error;

/// Result type for header and dimension operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Header and dimension codec error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended inside a field.
    #[error("stream truncated while reading {field}")]
    Truncated { field: &'static str },

    /// Structural or semantic violation of the format.
    #[error("invalid format: {0}")]
    Format(String),

    /// A string field is not valid UTF-8.
    #[error("{field} is not valid UTF-8")]
    InvalidString { field: &'static str },

    /// The header names a format version this codec cannot handle.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u32),

    /// Offset fields are either 4 or 8 bytes wide.
    #[error("invalid offset size: {0}")]
    InvalidOffsetSize(u8),

    /// Core library error.
    #[error("core error: {0}")]
    CoreError(#[from] pixi_core::Error),
}

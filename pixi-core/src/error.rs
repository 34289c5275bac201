//! Error types for pixi-core.

use crate::ChannelKind;
use thiserror::Error;

/// Result type alias for pixi-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for channel kinds and typed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A value is tagged with a different kind than the one required.
    #[error("channel kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        expected: ChannelKind,
        found: ChannelKind,
    },

    /// The base bits of an encoded type tag name no known kind.
    #[error("unknown channel kind: {0:#x}")]
    UnknownChannelKind(u32),

    /// Presence flags on an untyped tag, or reserved bits set.
    #[error("invalid channel type flags: {0:#010x}")]
    InvalidFlags(u32),

    /// Values of kind `unknown` have no representation.
    #[error("cannot encode or decode a value of kind unknown")]
    Untyped,

    /// A byte buffer does not match the width of its kind.
    #[error("buffer for {kind} must be {expected} bytes, got {actual}")]
    BufferSize {
        kind: ChannelKind,
        expected: usize,
        actual: usize,
    },

    /// A channel kind name could not be parsed.
    #[error("unrecognized channel kind name: {0:?}")]
    ParseKind(String),
}

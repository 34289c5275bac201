//! pixi-core: Channel kinds, typed values and axis arithmetic for Pixi files.
//!
//! This crate provides the numeric foundation of the Pixi metadata codec:
//! the closed set of channel kinds and their fixed widths, the 4-byte
//! encoded type tag with its axis presence flags, byte-order-aware value
//! codecs, and the linear `index -> value` axis mapping.
//!
//! # Key Components
//!
//! - [`ChannelKind`] - Numeric kinds and their static width table
//! - [`ChannelType`] - Encoded tag: base kind plus `HasMinimum`/`HasStep` flags
//! - [`ChannelValue`] - Kind-tagged value with `decode`/`encode`
//! - [`axis_value`] / [`axis_maximum`] - Per-kind axis arithmetic

pub mod axis;
pub mod channel;
mod endian;
pub mod error;
mod float128;
pub mod value;

pub use axis::{axis_maximum, axis_value};
pub use channel::{ChannelKind, ChannelType};
pub use endian::Endianness;
pub use error::{Error, Result};
pub use float128::Float128;
pub use value::ChannelValue;

// Re-export the narrow float types used by `ChannelValue`
pub use float8::F8E4M3;
pub use half::{bf16, f16};

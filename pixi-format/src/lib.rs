//! pixi-format: Header and dimension metadata codec for Pixi files.
//!
//! This crate reads and writes the per-dimension section of a Pixi file
//! header: name, size, tile size and the optional axis description.
//!
//! # Key Components
//!
//! - [`Header`] - Byte order, offset width, version, and primitive field codecs
//! - [`Dimension`] - One array axis with optional `minimum`/`step`/`unit`
//! - [`write_dimensions`] / [`read_dimensions`] - Count-prefixed dimension lists
//!
//! # Invariants
//!
//! 1. [`Dimension::header_size`] equals the bytes [`Dimension::write`] emits.
//! 2. [`Dimension::read`] consumes exactly what `write` emitted.
//! 3. `write` validates before the first byte reaches the stream.

mod dimension;
mod error;
pub mod header;

pub use dimension::{dimensions_header_size, read_dimensions, write_dimensions, Dimension};
pub use error::{Error, Result};
pub use header::{Header, OffsetSize, AXIS_VERSION, VERSION};

// Re-export core types for convenience
pub use pixi_core::{ChannelKind, ChannelType, ChannelValue, Endianness};

//! Stream header: byte order, offset width, and primitive field codecs.
//!
//! The header is read before any dimension and decides how every
//! multi-byte field that follows is laid out:
//!
//! ```text
//! friendly string: [2B length][UTF-8 bytes]
//! offset:          [4B or 8B unsigned]
//! type tag:        [4B ChannelType bits]
//! value:           [ChannelKind::byte_width() bytes]
//! ```

use crate::{Error, Result};
use pixi_core::{ChannelKind, ChannelType, ChannelValue, Endianness};
use std::io::{ErrorKind, Read, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current file format version. Dimensions carry the flagged axis layout.
pub const VERSION: u32 = 2;

/// First version whose dimensions carry a type tag and axis fields.
/// Version 1 dimensions hold only name, size and tile size.
pub const AXIS_VERSION: u32 = 2;

const MIN_VERSION: u32 = 1;

/// Width of the size and tile size fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum OffsetSize {
    Four = 4,
    #[default]
    Eight = 8,
}

impl OffsetSize {
    /// Width in bytes.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for OffsetSize {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            4 => Ok(OffsetSize::Four),
            8 => Ok(OffsetSize::Eight),
            other => Err(Error::InvalidOffsetSize(other)),
        }
    }
}

/// Encoding parameters shared by every field of a Pixi file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// File format version.
    pub version: u32,
    /// Byte order of every multi-byte field.
    pub endianness: Endianness,
    /// Width of size and tile size fields.
    pub offset_size: OffsetSize,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: VERSION,
            endianness: Endianness::Little,
            offset_size: OffsetSize::Eight,
        }
    }
}

impl Header {
    /// Creates a header at the current version.
    #[must_use]
    pub fn new(endianness: Endianness, offset_size: OffsetSize) -> Self {
        Self {
            version: VERSION,
            endianness,
            offset_size,
        }
    }

    /// Sets the format version.
    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Sets the byte order.
    #[must_use]
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Sets the offset width.
    #[must_use]
    pub fn with_offset_size(mut self, offset_size: OffsetSize) -> Self {
        self.offset_size = offset_size;
        self
    }

    /// Every byte order and offset width combination at the current version.
    #[must_use]
    pub fn variants() -> Vec<Header> {
        let mut headers = Vec::with_capacity(4);
        for endianness in [Endianness::Little, Endianness::Big] {
            for offset_size in [OffsetSize::Four, OffsetSize::Eight] {
                headers.push(Header::new(endianness, offset_size));
            }
        }
        headers
    }

    /// Checks the version is one this codec reads and writes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`].
    pub fn validate(&self) -> Result<()> {
        if (MIN_VERSION..=VERSION).contains(&self.version) {
            Ok(())
        } else {
            Err(Error::UnsupportedVersion(self.version))
        }
    }

    /// True when dimensions carry a type tag and axis fields.
    #[inline]
    #[must_use]
    pub fn has_axis_fields(&self) -> bool {
        self.version >= AXIS_VERSION
    }

    /// Width of offset fields in bytes.
    #[inline]
    #[must_use]
    pub fn offset_width(&self) -> usize {
        self.offset_size.width()
    }

    /// Bytes a friendly string occupies on disk.
    #[inline]
    #[must_use]
    pub fn friendly_size(value: &str) -> usize {
        2 + value.len()
    }

    /// Checks a string fits the 2-byte length prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for strings longer than `u16::MAX` bytes.
    pub fn check_friendly(field: &str, value: &str) -> Result<u16> {
        u16::try_from(value.len()).map_err(|_| {
            Error::Format(format!(
                "{field} is {} bytes, longer than the {} byte limit",
                value.len(),
                u16::MAX
            ))
        })
    }

    /// Checks a value fits the configured offset width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for values above `u32::MAX` in 4-byte mode.
    pub fn check_offset(&self, field: &str, value: u64) -> Result<()> {
        if self.offset_size == OffsetSize::Four && u32::try_from(value).is_err() {
            return Err(Error::Format(format!(
                "{field} {value} does not fit a 4-byte offset"
            )));
        }
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the string is too long, or the stream error.
    pub fn write_friendly<W: Write>(&self, w: &mut W, value: &str) -> Result<()> {
        let len = Self::check_friendly("string", value)?;
        let mut prefix = [0u8; 2];
        self.endianness.write_u16(&mut prefix, len);
        w.write_all(&prefix)?;
        w.write_all(value.as_bytes())?;
        Ok(())
    }

    /// Reads a length-prefixed UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`], [`Error::InvalidString`] or the stream error.
    pub fn read_friendly<R: Read>(&self, r: &mut R, field: &'static str) -> Result<String> {
        let mut prefix = [0u8; 2];
        read_field(r, &mut prefix, field)?;
        let len = usize::from(self.endianness.read_u16(&prefix));
        let mut bytes = vec![0u8; len];
        read_field(r, &mut bytes, field)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidString { field })
    }

    /// Writes an offset field in the configured width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if the value does not fit, or the stream error.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_offset<W: Write>(&self, w: &mut W, value: u64) -> Result<()> {
        self.check_offset("offset", value)?;
        match self.offset_size {
            OffsetSize::Four => {
                let mut buf = [0u8; 4];
                self.endianness.write_u32(&mut buf, value as u32);
                w.write_all(&buf)?;
            }
            OffsetSize::Eight => {
                let mut buf = [0u8; 8];
                self.endianness.write_u64(&mut buf, value);
                w.write_all(&buf)?;
            }
        }
        Ok(())
    }

    /// Reads an offset field in the configured width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] or the stream error.
    pub fn read_offset<R: Read>(&self, r: &mut R, field: &'static str) -> Result<u64> {
        match self.offset_size {
            OffsetSize::Four => {
                let mut buf = [0u8; 4];
                read_field(r, &mut buf, field)?;
                Ok(u64::from(self.endianness.read_u32(&buf)))
            }
            OffsetSize::Eight => {
                let mut buf = [0u8; 8];
                read_field(r, &mut buf, field)?;
                Ok(self.endianness.read_u64(&buf))
            }
        }
    }

    /// Writes a raw 4-byte type tag.
    ///
    /// # Errors
    ///
    /// Returns the stream error.
    pub fn write_tag<W: Write>(&self, w: &mut W, tag: ChannelType) -> Result<()> {
        let mut buf = [0u8; 4];
        self.endianness.write_u32(&mut buf, tag.bits());
        w.write_all(&buf)?;
        Ok(())
    }

    /// Reads a raw 4-byte type tag. The tag is not validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] or the stream error.
    pub fn read_tag<R: Read>(&self, r: &mut R) -> Result<ChannelType> {
        let mut buf = [0u8; 4];
        read_field(r, &mut buf, "type tag")?;
        Ok(ChannelType::from_bits(self.endianness.read_u32(&buf)))
    }

    /// Writes `value` as exactly `kind.byte_width()` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoreError`] on a kind mismatch, or the stream error.
    pub fn write_value<W: Write>(
        &self,
        w: &mut W,
        kind: ChannelKind,
        value: &ChannelValue,
    ) -> Result<()> {
        let mut buf = vec![0u8; kind.byte_width()];
        value.encode(kind, self.endianness, &mut buf)?;
        w.write_all(&buf)?;
        Ok(())
    }

    /// Reads a value of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`], [`Error::CoreError`] or the stream error.
    pub fn read_value<R: Read>(
        &self,
        r: &mut R,
        kind: ChannelKind,
        field: &'static str,
    ) -> Result<ChannelValue> {
        let mut buf = vec![0u8; kind.byte_width()];
        read_field(r, &mut buf, field)?;
        Ok(ChannelValue::decode(kind, &buf, self.endianness)?)
    }
}

/// Fills `buf`, reporting a short stream as [`Error::Truncated`].
pub(crate) fn read_field<R: Read>(r: &mut R, buf: &mut [u8], field: &'static str) -> Result<()> {
    r.read_exact(buf).map_err(|err| match err.kind() {
        ErrorKind::UnexpectedEof => Error::Truncated { field },
        _ => Error::Io(err),
    })
}

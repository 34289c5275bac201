//! Kind-tagged channel values and their byte codecs.

use crate::{ChannelKind, Endianness, Error, Float128, Result};
use float8::F8E4M3;
use half::{bf16, f16};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single value of one of the typed [`ChannelKind`]s.
///
/// There is no variant for [`ChannelKind::Unknown`]: an untyped value is
/// expressed as `Option::<ChannelValue>::None` by the callers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelValue {
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float8(#[cfg_attr(feature = "serde", serde(with = "fp8_bits"))] F8E4M3),
    Float16(f16),
    BFloat16(bf16),
    Float32(f32),
    Float64(f64),
    Float128(Float128),
    Int128(i128),
    Uint128(u128),
    Bool(bool),
}

impl ChannelValue {
    /// The kind this value is tagged with.
    #[must_use]
    pub const fn kind(&self) -> ChannelKind {
        match self {
            ChannelValue::Int8(_) => ChannelKind::Int8,
            ChannelValue::Uint8(_) => ChannelKind::Uint8,
            ChannelValue::Int16(_) => ChannelKind::Int16,
            ChannelValue::Uint16(_) => ChannelKind::Uint16,
            ChannelValue::Int32(_) => ChannelKind::Int32,
            ChannelValue::Uint32(_) => ChannelKind::Uint32,
            ChannelValue::Int64(_) => ChannelKind::Int64,
            ChannelValue::Uint64(_) => ChannelKind::Uint64,
            ChannelValue::Float8(_) => ChannelKind::Float8,
            ChannelValue::Float16(_) => ChannelKind::Float16,
            ChannelValue::BFloat16(_) => ChannelKind::BFloat16,
            ChannelValue::Float32(_) => ChannelKind::Float32,
            ChannelValue::Float64(_) => ChannelKind::Float64,
            ChannelValue::Float128(_) => ChannelKind::Float128,
            ChannelValue::Int128(_) => ChannelKind::Int128,
            ChannelValue::Uint128(_) => ChannelKind::Uint128,
            ChannelValue::Bool(_) => ChannelKind::Bool,
        }
    }

    /// The zero (or `false`) value of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Untyped`] for [`ChannelKind::Unknown`].
    pub fn zero(kind: ChannelKind) -> Result<Self> {
        let value = match kind {
            ChannelKind::Unknown => return Err(Error::Untyped),
            ChannelKind::Int8 => ChannelValue::Int8(0),
            ChannelKind::Uint8 => ChannelValue::Uint8(0),
            ChannelKind::Int16 => ChannelValue::Int16(0),
            ChannelKind::Uint16 => ChannelValue::Uint16(0),
            ChannelKind::Int32 => ChannelValue::Int32(0),
            ChannelKind::Uint32 => ChannelValue::Uint32(0),
            ChannelKind::Int64 => ChannelValue::Int64(0),
            ChannelKind::Uint64 => ChannelValue::Uint64(0),
            ChannelKind::Float8 => ChannelValue::Float8(F8E4M3::ZERO),
            ChannelKind::Float16 => ChannelValue::Float16(f16::ZERO),
            ChannelKind::BFloat16 => ChannelValue::BFloat16(bf16::ZERO),
            ChannelKind::Float32 => ChannelValue::Float32(0.0),
            ChannelKind::Float64 => ChannelValue::Float64(0.0),
            ChannelKind::Float128 => ChannelValue::Float128(Float128::ZERO),
            ChannelKind::Int128 => ChannelValue::Int128(0),
            ChannelKind::Uint128 => ChannelValue::Uint128(0),
            ChannelKind::Bool => ChannelValue::Bool(false),
        };
        Ok(value)
    }

    /// Checks that this value is tagged with `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] otherwise.
    pub fn expect_kind(&self, kind: ChannelKind) -> Result<()> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(Error::KindMismatch {
                expected: kind,
                found: self.kind(),
            })
        }
    }

    /// Decodes exactly `kind.byte_width()` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Untyped`] for [`ChannelKind::Unknown`] and
    /// [`Error::BufferSize`] if `bytes` has the wrong length.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn decode(kind: ChannelKind, bytes: &[u8], order: Endianness) -> Result<Self> {
        check_width(kind, bytes.len())?;
        let value = match kind {
            ChannelKind::Unknown => return Err(Error::Untyped),
            ChannelKind::Int8 => ChannelValue::Int8(bytes[0] as i8),
            ChannelKind::Uint8 => ChannelValue::Uint8(bytes[0]),
            ChannelKind::Int16 => ChannelValue::Int16(order.read_u16(bytes) as i16),
            ChannelKind::Uint16 => ChannelValue::Uint16(order.read_u16(bytes)),
            ChannelKind::Int32 => ChannelValue::Int32(order.read_u32(bytes) as i32),
            ChannelKind::Uint32 => ChannelValue::Uint32(order.read_u32(bytes)),
            ChannelKind::Int64 => ChannelValue::Int64(order.read_u64(bytes) as i64),
            ChannelKind::Uint64 => ChannelValue::Uint64(order.read_u64(bytes)),
            ChannelKind::Float8 => ChannelValue::Float8(F8E4M3::from_bits(bytes[0])),
            ChannelKind::Float16 => ChannelValue::Float16(f16::from_bits(order.read_u16(bytes))),
            ChannelKind::BFloat16 => {
                ChannelValue::BFloat16(bf16::from_bits(order.read_u16(bytes)))
            }
            ChannelKind::Float32 => ChannelValue::Float32(f32::from_bits(order.read_u32(bytes))),
            ChannelKind::Float64 => ChannelValue::Float64(f64::from_bits(order.read_u64(bytes))),
            ChannelKind::Float128 => {
                ChannelValue::Float128(Float128::from_bits(order.read_u128(bytes)))
            }
            ChannelKind::Int128 => ChannelValue::Int128(order.read_u128(bytes) as i128),
            ChannelKind::Uint128 => ChannelValue::Uint128(order.read_u128(bytes)),
            ChannelKind::Bool => ChannelValue::Bool(bytes[0] != 0),
        };
        Ok(value)
    }

    /// Encodes this value as `kind` into `out`, which must be exactly
    /// `kind.byte_width()` bytes long.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KindMismatch`] if the value is not tagged with `kind`,
    /// and [`Error::BufferSize`] if `out` has the wrong length. Nothing is
    /// written on error.
    pub fn encode(&self, kind: ChannelKind, order: Endianness, out: &mut [u8]) -> Result<()> {
        self.expect_kind(kind)?;
        check_width(kind, out.len())?;
        self.write_bytes(order, out);
        Ok(())
    }

    /// Encodes this value into a freshly allocated buffer of its own width.
    #[must_use]
    pub fn to_bytes(&self, order: Endianness) -> Vec<u8> {
        let mut out = vec![0u8; self.kind().byte_width()];
        self.write_bytes(order, &mut out);
        out
    }

    /// Writes the raw bytes of this value; `out` is exactly its width.
    #[allow(clippy::cast_sign_loss)]
    fn write_bytes(&self, order: Endianness, out: &mut [u8]) {
        match *self {
            ChannelValue::Int8(v) => out[0] = v as u8,
            ChannelValue::Uint8(v) => out[0] = v,
            ChannelValue::Float8(v) => out[0] = v.to_bits(),
            ChannelValue::Int16(v) => order.write_u16(out, v as u16),
            ChannelValue::Uint16(v) => order.write_u16(out, v),
            ChannelValue::Int32(v) => order.write_u32(out, v as u32),
            ChannelValue::Uint32(v) => order.write_u32(out, v),
            ChannelValue::Int64(v) => order.write_u64(out, v as u64),
            ChannelValue::Uint64(v) => order.write_u64(out, v),
            ChannelValue::Float16(v) => order.write_u16(out, v.to_bits()),
            ChannelValue::BFloat16(v) => order.write_u16(out, v.to_bits()),
            ChannelValue::Float32(v) => order.write_u32(out, v.to_bits()),
            ChannelValue::Float64(v) => order.write_u64(out, v.to_bits()),
            ChannelValue::Float128(v) => order.write_u128(out, v.to_bits()),
            ChannelValue::Int128(v) => order.write_u128(out, v as u128),
            ChannelValue::Uint128(v) => order.write_u128(out, v),
            ChannelValue::Bool(v) => out[0] = u8::from(v),
        }
    }
}

#[cfg(feature = "serde")]
mod fp8_bits {
    use float8::F8E4M3;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &F8E4M3, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<F8E4M3, D::Error> {
        u8::deserialize(deserializer).map(F8E4M3::from_bits)
    }
}

fn check_width(kind: ChannelKind, actual: usize) -> Result<()> {
    if kind.is_unknown() {
        return Err(Error::Untyped);
    }
    let expected = kind.byte_width();
    if actual == expected {
        Ok(())
    } else {
        Err(Error::BufferSize {
            kind,
            expected,
            actual,
        })
    }
}

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ChannelValue {
                fn from(value: $ty) -> Self {
                    ChannelValue::$variant(value)
                }
            }
        )*
    };
}

impl_from_native! {
    i8 => Int8,
    u8 => Uint8,
    i16 => Int16,
    u16 => Uint16,
    i32 => Int32,
    u32 => Uint32,
    i64 => Int64,
    u64 => Uint64,
    F8E4M3 => Float8,
    f16 => Float16,
    bf16 => BFloat16,
    f32 => Float32,
    f64 => Float64,
    Float128 => Float128,
    i128 => Int128,
    u128 => Uint128,
    bool => Bool,
}

impl fmt::Display for ChannelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelValue::Int8(v) => write!(f, "{v}"),
            ChannelValue::Uint8(v) => write!(f, "{v}"),
            ChannelValue::Int16(v) => write!(f, "{v}"),
            ChannelValue::Uint16(v) => write!(f, "{v}"),
            ChannelValue::Int32(v) => write!(f, "{v}"),
            ChannelValue::Uint32(v) => write!(f, "{v}"),
            ChannelValue::Int64(v) => write!(f, "{v}"),
            ChannelValue::Uint64(v) => write!(f, "{v}"),
            ChannelValue::Float8(v) => write!(f, "{}", v.to_f32()),
            ChannelValue::Float16(v) => write!(f, "{v}"),
            ChannelValue::BFloat16(v) => write!(f, "{v}"),
            ChannelValue::Float32(v) => write!(f, "{v}"),
            ChannelValue::Float64(v) => write!(f, "{v}"),
            ChannelValue::Float128(v) => write!(f, "{v}"),
            ChannelValue::Int128(v) => write!(f, "{v}"),
            ChannelValue::Uint128(v) => write!(f, "{v}"),
            ChannelValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

//! Channel kinds and the encoded 4-byte type tag.
//!
//! Every grid cell and every axis minimum/step is stored as one of the
//! [`ChannelKind`]s. On disk a kind is written as a [`ChannelType`]: the kind
//! number in the low byte, plus two presence flags that only the axis layer
//! interprets.
//!
//! ```text
//!  31        30          29 ........ 8   7 ........ 0
//! +---------+-----------+--------------+--------------+
//! | HasStep | HasMinimum| reserved (0) | base kind    |
//! +---------+-----------+--------------+--------------+
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of numeric kinds a channel or axis value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum ChannelKind {
    /// No type, and therefore no axis metadata.
    #[default]
    Unknown = 0,
    Int8 = 1,
    Uint8 = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Int64 = 7,
    Uint64 = 8,
    /// OCP FP8 E4M3FN.
    Float8 = 9,
    /// IEEE 754 binary16.
    Float16 = 10,
    /// Truncated float32 (bfloat16).
    BFloat16 = 11,
    Float32 = 12,
    Float64 = 13,
    /// IEEE 754 binary128.
    Float128 = 14,
    Int128 = 15,
    Uint128 = 16,
    /// One byte, zero is false.
    Bool = 17,
}

struct KindInfo {
    name: &'static str,
    width: usize,
}

// Indexed by the kind's wire number.
const KIND_TABLE: [KindInfo; 18] = [
    KindInfo { name: "unknown", width: 0 },
    KindInfo { name: "int8", width: 1 },
    KindInfo { name: "uint8", width: 1 },
    KindInfo { name: "int16", width: 2 },
    KindInfo { name: "uint16", width: 2 },
    KindInfo { name: "int32", width: 4 },
    KindInfo { name: "uint32", width: 4 },
    KindInfo { name: "int64", width: 8 },
    KindInfo { name: "uint64", width: 8 },
    KindInfo { name: "float8", width: 1 },
    KindInfo { name: "float16", width: 2 },
    KindInfo { name: "bfloat16", width: 2 },
    KindInfo { name: "float32", width: 4 },
    KindInfo { name: "float64", width: 8 },
    KindInfo { name: "float128", width: 16 },
    KindInfo { name: "int128", width: 16 },
    KindInfo { name: "uint128", width: 16 },
    KindInfo { name: "bool", width: 1 },
];

impl ChannelKind {
    /// Every kind, in wire order.
    pub const ALL: [ChannelKind; 18] = [
        ChannelKind::Unknown,
        ChannelKind::Int8,
        ChannelKind::Uint8,
        ChannelKind::Int16,
        ChannelKind::Uint16,
        ChannelKind::Int32,
        ChannelKind::Uint32,
        ChannelKind::Int64,
        ChannelKind::Uint64,
        ChannelKind::Float8,
        ChannelKind::Float16,
        ChannelKind::BFloat16,
        ChannelKind::Float32,
        ChannelKind::Float64,
        ChannelKind::Float128,
        ChannelKind::Int128,
        ChannelKind::Uint128,
        ChannelKind::Bool,
    ];

    /// Looks up a kind by its wire number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannelKind`] if no kind has that number.
    pub fn from_raw(raw: u32) -> Result<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or(Error::UnknownChannelKind(raw))
    }

    /// Returns the wire number of this kind.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Fixed storage width in bytes. Zero for [`ChannelKind::Unknown`].
    #[inline]
    #[must_use]
    pub const fn byte_width(self) -> usize {
        KIND_TABLE[self as usize].width
    }

    /// Lowercase name used in text representations.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        KIND_TABLE[self as usize].name
    }

    /// Returns true for [`ChannelKind::Unknown`].
    #[inline]
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, ChannelKind::Unknown)
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::ParseKind(s.to_string()))
    }
}

/// A channel kind as written to disk, with the axis presence flags folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChannelType(u32);

impl ChannelType {
    /// Set when an axis minimum follows the tag.
    pub const HAS_MINIMUM: u32 = 1 << 30;
    /// Set when an axis step follows the tag.
    pub const HAS_STEP: u32 = 1 << 31;
    /// Bits holding the base kind number.
    pub const BASE_MASK: u32 = 0xFF;

    const FLAG_MASK: u32 = Self::HAS_MINIMUM | Self::HAS_STEP;

    /// A plain tag for `kind` with both flags clear.
    #[inline]
    #[must_use]
    pub const fn new(kind: ChannelKind) -> Self {
        Self(kind as u32)
    }

    /// Wraps raw tag bits as read from a stream. Not validated.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw tag bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Extracts the base kind, ignoring the flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownChannelKind`] if the base bits name no kind.
    pub fn base(self) -> Result<ChannelKind> {
        ChannelKind::from_raw(self.0 & Self::BASE_MASK)
    }

    /// Sets or clears the minimum presence flag.
    #[must_use]
    pub const fn with_has_minimum(self, present: bool) -> Self {
        if present {
            Self(self.0 | Self::HAS_MINIMUM)
        } else {
            Self(self.0 & !Self::HAS_MINIMUM)
        }
    }

    /// Sets or clears the step presence flag.
    #[must_use]
    pub const fn with_has_step(self, present: bool) -> Self {
        if present {
            Self(self.0 | Self::HAS_STEP)
        } else {
            Self(self.0 & !Self::HAS_STEP)
        }
    }

    #[inline]
    #[must_use]
    pub const fn has_minimum(self) -> bool {
        self.0 & Self::HAS_MINIMUM != 0
    }

    #[inline]
    #[must_use]
    pub const fn has_step(self) -> bool {
        self.0 & Self::HAS_STEP != 0
    }

    /// Checks the tag is well formed and returns its base kind.
    ///
    /// Reserved bits must be zero, and an `unknown` base must carry no flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFlags`] or [`Error::UnknownChannelKind`].
    pub fn validate(self) -> Result<ChannelKind> {
        if self.0 & !(Self::BASE_MASK | Self::FLAG_MASK) != 0 {
            return Err(Error::InvalidFlags(self.0));
        }
        let kind = self.base()?;
        if kind.is_unknown() && self.0 & Self::FLAG_MASK != 0 {
            return Err(Error::InvalidFlags(self.0));
        }
        Ok(kind)
    }
}

impl From<ChannelKind> for ChannelType {
    fn from(kind: ChannelKind) -> Self {
        Self::new(kind)
    }
}

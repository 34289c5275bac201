//! Runtime byte order selection.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte order used for every multi-byte field of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Endianness {
    Big,
    #[default]
    Little,
}

macro_rules! endian_codec {
    ($($read:ident, $write:ident => $ty:ty;)*) => {
        impl Endianness {
            $(
                #[doc = concat!("Reads a `", stringify!($ty), "` from the front of `buf`.")]
                ///
                /// # Panics
                ///
                /// Panics if `buf` is shorter than the value.
                #[inline]
                #[must_use]
                pub fn $read(self, buf: &[u8]) -> $ty {
                    match self {
                        Endianness::Big => BigEndian::$read(buf),
                        Endianness::Little => LittleEndian::$read(buf),
                    }
                }

                #[doc = concat!("Writes a `", stringify!($ty), "` to the front of `buf`.")]
                ///
                /// # Panics
                ///
                /// Panics if `buf` is shorter than the value.
                #[inline]
                pub fn $write(self, buf: &mut [u8], value: $ty) {
                    match self {
                        Endianness::Big => BigEndian::$write(buf, value),
                        Endianness::Little => LittleEndian::$write(buf, value),
                    }
                }
            )*
        }
    };
}

endian_codec! {
    read_u16, write_u16 => u16;
    read_u32, write_u32 => u32;
    read_u64, write_u64 => u64;
    read_u128, write_u128 => u128;
}

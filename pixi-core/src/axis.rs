//! Linear axis arithmetic: `value(i) = i * step + minimum`.
//!
//! Each kind computes in its own numeric domain:
//!
//! - 8 to 64-bit integers: native multiply-add, wrapping at the kind's width.
//! - 128-bit integers: the index is widened with a zero high word.
//! - `float32`/`float64`: native multiply then add.
//! - `float128`: the index goes through `f64`, then binary128 multiply-add.
//! - `float8`/`float16`/`bfloat16`: computed in `f32`, then narrowed.
//!   `float8` saturates to +-448 on overflow.
//! - `bool`: no interpolation, the minimum is returned for every index.

use crate::{ChannelKind, ChannelValue, Error, Float128, Result};
use float8::F8E4M3;
use half::{bf16, f16};

/// Computes the axis value at `index`.
///
/// Returns `Ok(None)` when the axis is undefined: `kind` is `Unknown` or
/// either the minimum or the step is absent.
///
/// # Errors
///
/// Returns [`Error::KindMismatch`] if `minimum` or `step` is not tagged with
/// `kind`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss
)]
pub fn axis_value(
    kind: ChannelKind,
    index: u64,
    minimum: Option<&ChannelValue>,
    step: Option<&ChannelValue>,
) -> Result<Option<ChannelValue>> {
    if kind.is_unknown() {
        return Ok(None);
    }
    let (Some(minimum), Some(step)) = (minimum, step) else {
        return Ok(None);
    };
    minimum.expect_kind(kind)?;
    step.expect_kind(kind)?;

    // Integer indices are truncated to the kind's width, then wrap.
    let value = match (*minimum, *step) {
        (ChannelValue::Int8(min), ChannelValue::Int8(step)) => {
            ChannelValue::Int8((index as i8).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Uint8(min), ChannelValue::Uint8(step)) => {
            ChannelValue::Uint8((index as u8).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Int16(min), ChannelValue::Int16(step)) => {
            ChannelValue::Int16((index as i16).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Uint16(min), ChannelValue::Uint16(step)) => {
            ChannelValue::Uint16((index as u16).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Int32(min), ChannelValue::Int32(step)) => {
            ChannelValue::Int32((index as i32).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Uint32(min), ChannelValue::Uint32(step)) => {
            ChannelValue::Uint32((index as u32).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Int64(min), ChannelValue::Int64(step)) => {
            ChannelValue::Int64((index as i64).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Uint64(min), ChannelValue::Uint64(step)) => {
            ChannelValue::Uint64(index.wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Int128(min), ChannelValue::Int128(step)) => {
            ChannelValue::Int128(i128::from(index).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Uint128(min), ChannelValue::Uint128(step)) => {
            ChannelValue::Uint128(u128::from(index).wrapping_mul(step).wrapping_add(min))
        }
        (ChannelValue::Float32(min), ChannelValue::Float32(step)) => {
            ChannelValue::Float32(index as f32 * step + min)
        }
        (ChannelValue::Float64(min), ChannelValue::Float64(step)) => {
            ChannelValue::Float64(index as f64 * step + min)
        }
        (ChannelValue::Float128(min), ChannelValue::Float128(step)) => {
            let index = Float128::from_f64(index as f64);
            ChannelValue::Float128(index * step + min)
        }
        (ChannelValue::Float8(min), ChannelValue::Float8(step)) => ChannelValue::Float8(
            F8E4M3::from_f32(index as f32 * step.to_f32() + min.to_f32()),
        ),
        (ChannelValue::Float16(min), ChannelValue::Float16(step)) => ChannelValue::Float16(
            f16::from_f32(index as f32 * step.to_f32() + min.to_f32()),
        ),
        (ChannelValue::BFloat16(min), ChannelValue::BFloat16(step)) => ChannelValue::BFloat16(
            bf16::from_f32(index as f32 * step.to_f32() + min.to_f32()),
        ),
        (ChannelValue::Bool(_), ChannelValue::Bool(_)) => *minimum,
        (_, step) => {
            return Err(Error::KindMismatch {
                expected: minimum.kind(),
                found: step.kind(),
            })
        }
    };
    Ok(Some(value))
}

/// Computes the last axis value of a dimension with `size` elements,
/// `(size - 1) * step + minimum`.
///
/// Returns `Ok(None)` for an empty dimension or an undefined axis.
///
/// # Errors
///
/// Same as [`axis_value`].
pub fn axis_maximum(
    kind: ChannelKind,
    size: u64,
    minimum: Option<&ChannelValue>,
    step: Option<&ChannelValue>,
) -> Result<Option<ChannelValue>> {
    if size == 0 {
        return Ok(None);
    }
    axis_value(kind, size - 1, minimum, step)
}

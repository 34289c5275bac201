//! Dimension descriptions and their optional axis metadata.
//!
//! Per-dimension layout (byte order and offset width from the [`Header`]):
//!
//! ```text
//! [2B length][name bytes]
//! [offset] size
//! [offset] tile size
//! [4B] type tag (base kind | HasMinimum | HasStep)    -- version >= 2
//! [2B length][unit bytes]                             -- kind != unknown
//! [width] minimum                                     -- HasMinimum
//! [width] step                                        -- HasStep
//! ```

use crate::header::{read_field, Header};
use crate::{Error, Result};
use log::{debug, trace};
use pixi_core::{axis_maximum, axis_value, ChannelKind, ChannelType, ChannelValue};
use std::fmt;
use std::io::{Read, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One axis of a tiled array.
///
/// A dimension is never zero-sized when written. If it is not tiled, the tile
/// size equals the total size. The tile size need not divide the size.
///
/// The axis fields map a grid index to a physical coordinate,
/// `index * step + minimum`, in the numeric domain of `kind`. With
/// `kind == Unknown` the dimension has no axis, and `minimum`, `step` and
/// `unit` are not written.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dimension {
    /// Friendly name of the dimension.
    pub name: String,
    /// Total number of elements.
    pub size: u64,
    /// Number of elements per tile.
    pub tile_size: u64,
    /// Kind of the axis values.
    pub kind: ChannelKind,
    /// Axis value at index 0. Must be tagged with `kind`.
    pub minimum: Option<ChannelValue>,
    /// Axis increment per index. Must be tagged with `kind`.
    pub step: Option<ChannelValue>,
    /// Unit of the axis values, e.g. "seconds" or "nm".
    pub unit: String,
}

impl Dimension {
    /// Creates a dimension without axis metadata.
    pub fn new(name: impl Into<String>, size: u64, tile_size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            tile_size,
            ..Self::default()
        }
    }

    /// Attaches a complete axis. The kind is taken from `minimum`.
    #[must_use]
    pub fn with_axis(
        mut self,
        minimum: impl Into<ChannelValue>,
        step: impl Into<ChannelValue>,
    ) -> Self {
        let minimum = minimum.into();
        self.kind = minimum.kind();
        self.minimum = Some(minimum);
        self.step = Some(step.into());
        self
    }

    /// Sets the axis kind without touching minimum or step.
    #[must_use]
    pub fn with_kind(mut self, kind: ChannelKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the axis minimum, adopting its kind.
    #[must_use]
    pub fn with_minimum(mut self, minimum: impl Into<ChannelValue>) -> Self {
        let minimum = minimum.into();
        self.kind = minimum.kind();
        self.minimum = Some(minimum);
        self
    }

    /// Sets the axis step, adopting its kind.
    #[must_use]
    pub fn with_step(mut self, step: impl Into<ChannelValue>) -> Self {
        let step = step.into();
        self.kind = step.kind();
        self.step = Some(step);
        self
    }

    /// Sets the axis unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// True when the dimension carries an axis kind.
    #[inline]
    #[must_use]
    pub fn has_axis(&self) -> bool {
        !self.kind.is_unknown()
    }

    /// The tag written for this dimension.
    ///
    /// Without an axis kind the tag is plain `Unknown`, whatever stray
    /// minimum or step values are set.
    #[must_use]
    pub fn encoded_type(&self) -> ChannelType {
        if !self.has_axis() {
            return ChannelType::new(ChannelKind::Unknown);
        }
        ChannelType::new(self.kind)
            .with_has_minimum(self.minimum.is_some())
            .with_has_step(self.step.is_some())
    }

    /// Size in bytes of this dimension as written under `header`.
    #[must_use]
    pub fn header_size(&self, header: &Header) -> usize {
        let mut size = Header::friendly_size(&self.name) + 2 * header.offset_width();
        if !header.has_axis_fields() {
            return size;
        }
        size += 4;
        if self.has_axis() {
            let width = self.kind.byte_width();
            size += Header::friendly_size(&self.unit);
            if self.minimum.is_some() {
                size += width;
            }
            if self.step.is_some() {
                size += width;
            }
        }
        size
    }

    /// Number of tiles along this dimension, `ceil(size / tile_size)`.
    ///
    /// An empty dimension (or a zero tile size) has no tiles.
    #[must_use]
    pub fn tiles(&self) -> u64 {
        if self.tile_size == 0 {
            return 0;
        }
        let mut tiles = self.size / self.tile_size;
        if self.size % self.tile_size != 0 {
            tiles += 1;
        }
        tiles
    }

    /// Axis value at grid index `index`.
    ///
    /// Returns `Ok(None)` when the axis kind, minimum or step is missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoreError`] if minimum or step is not tagged with `kind`.
    pub fn axis_value(&self, index: u64) -> Result<Option<ChannelValue>> {
        Ok(axis_value(
            self.kind,
            index,
            self.minimum.as_ref(),
            self.step.as_ref(),
        )?)
    }

    /// Axis value at the last index, `(size - 1) * step + minimum`.
    ///
    /// Not stored on disk; always derived from `size`.
    ///
    /// # Errors
    ///
    /// Same as [`Dimension::axis_value`].
    pub fn maximum(&self) -> Result<Option<ChannelValue>> {
        Ok(axis_maximum(
            self.kind,
            self.size,
            self.minimum.as_ref(),
            self.step.as_ref(),
        )?)
    }

    /// Checks that this dimension can be written under `header`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] for size or tile size violations, strings or
    /// offsets that do not fit, and axis metadata under a version without axis
    /// fields. Returns [`Error::CoreError`] if minimum or step is not tagged
    /// with `kind`.
    pub fn validate(&self, header: &Header) -> Result<()> {
        header.validate()?;
        if self.size == 0 || self.tile_size == 0 {
            return Err(Error::Format(format!(
                "dimension {:?}: size and tile size must be greater than 0",
                self.name
            )));
        }
        if self.tile_size > self.size {
            return Err(Error::Format(format!(
                "dimension {:?}: tile size {} is larger than size {}",
                self.name, self.tile_size, self.size
            )));
        }
        Header::check_friendly("dimension name", &self.name)?;
        header.check_offset("dimension size", self.size)?;
        header.check_offset("dimension tile size", self.tile_size)?;

        if !self.has_axis() {
            return Ok(());
        }
        if !header.has_axis_fields() {
            return Err(Error::Format(format!(
                "dimension {:?}: axis metadata requires format version {}",
                self.name,
                crate::header::AXIS_VERSION
            )));
        }
        Header::check_friendly("axis unit", &self.unit)?;
        if let Some(minimum) = &self.minimum {
            minimum.expect_kind(self.kind)?;
        }
        if let Some(step) = &self.step {
            step.expect_kind(self.kind)?;
        }
        Ok(())
    }

    /// Writes this dimension to `w`.
    ///
    /// Validation happens first; nothing is written if it fails.
    ///
    /// # Errors
    ///
    /// Returns the [`Dimension::validate`] error, or the stream error.
    pub fn write<W: Write>(&self, w: &mut W, header: &Header) -> Result<()> {
        self.validate(header)?;

        header.write_friendly(w, &self.name)?;
        header.write_offset(w, self.size)?;
        header.write_offset(w, self.tile_size)?;

        if !header.has_axis_fields() {
            debug!("wrote dimension {self} (version {})", header.version);
            return Ok(());
        }

        let tag = self.encoded_type();
        header.write_tag(w, tag)?;
        debug!("wrote dimension {self} with tag {:#010x}", tag.bits());
        if !self.has_axis() {
            return Ok(());
        }

        header.write_friendly(w, &self.unit)?;
        if let Some(minimum) = &self.minimum {
            trace!("axis minimum {minimum}");
            header.write_value(w, self.kind, minimum)?;
        }
        if let Some(step) = &self.step {
            trace!("axis step {step}");
            header.write_value(w, self.kind, step)?;
        }
        Ok(())
    }

    /// Reads a dimension from `r`.
    ///
    /// Consumes exactly as many bytes as [`Dimension::write`] emits for the
    /// same content. Size and tile size are not validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Truncated`] if the stream ends inside a field,
    /// [`Error::CoreError`] for a malformed type tag, or the stream error.
    pub fn read<R: Read>(r: &mut R, header: &Header) -> Result<Self> {
        header.validate()?;

        let name = header.read_friendly(r, "dimension name")?;
        let size = header.read_offset(r, "dimension size")?;
        let tile_size = header.read_offset(r, "dimension tile size")?;
        let mut dimension = Dimension::new(name, size, tile_size);

        if !header.has_axis_fields() {
            debug!("read dimension {dimension} (version {})", header.version);
            return Ok(dimension);
        }

        let tag = header.read_tag(r)?;
        dimension.kind = tag.validate()?;
        debug!("read dimension {dimension} with tag {:#010x}", tag.bits());
        if !dimension.has_axis() {
            return Ok(dimension);
        }

        dimension.unit = header.read_friendly(r, "axis unit")?;
        if tag.has_minimum() {
            let minimum = header.read_value(r, dimension.kind, "axis minimum")?;
            trace!("axis minimum {minimum}");
            dimension.minimum = Some(minimum);
        }
        if tag.has_step() {
            let step = header.read_value(r, dimension.kind, "axis step")?;
            trace!("axis step {step}");
            dimension.step = Some(step);
        }
        Ok(dimension)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} / {})", self.name, self.size, self.tile_size)
    }
}

/// Size in bytes of a dimension list as written by [`write_dimensions`].
#[must_use]
pub fn dimensions_header_size(dimensions: &[Dimension], header: &Header) -> usize {
    4 + dimensions
        .iter()
        .map(|d| d.header_size(header))
        .sum::<usize>()
}

/// Writes a 4-byte count followed by each dimension.
///
/// Every dimension is validated before the first byte is written.
///
/// # Errors
///
/// Returns [`Error::Format`] for an empty list, any [`Dimension::validate`]
/// error, or the stream error.
pub fn write_dimensions<W: Write>(
    w: &mut W,
    header: &Header,
    dimensions: &[Dimension],
) -> Result<()> {
    if dimensions.is_empty() {
        return Err(Error::Format(
            "a data set must have at least one dimension".to_string(),
        ));
    }
    let count = u32::try_from(dimensions.len())
        .map_err(|_| Error::Format(format!("too many dimensions: {}", dimensions.len())))?;
    for dimension in dimensions {
        dimension.validate(header)?;
    }

    let mut buf = [0u8; 4];
    header.endianness.write_u32(&mut buf, count);
    w.write_all(&buf)?;
    for dimension in dimensions {
        dimension.write(w, header)?;
    }
    Ok(())
}

/// Reads a dimension list written by [`write_dimensions`].
///
/// # Errors
///
/// Returns [`Error::Format`] for a zero count, or any [`Dimension::read`]
/// error.
pub fn read_dimensions<R: Read>(r: &mut R, header: &Header) -> Result<Vec<Dimension>> {
    let mut buf = [0u8; 4];
    read_field(r, &mut buf, "dimension count")?;
    let count = header.endianness.read_u32(&buf);
    if count == 0 {
        return Err(Error::Format(
            "a data set must have at least one dimension".to_string(),
        ));
    }
    let mut dimensions = Vec::new();
    for _ in 0..count {
        dimensions.push(Dimension::read(r, header)?);
    }
    Ok(dimensions)
}

//! Fixed-length pixel buffer
//!
//! Owns the wire-order byte image of one strip. The pixel count is fixed at
//! construction; all writes are range-checked and a rejected write leaves
//! the buffer untouched.

use heapless::Vec;

use crate::color::{LumaFn, Rgb};
use crate::error::StripError;
use crate::timing::ColorOrder;

/// Bytes needed for `pixel_count` pixels (4 per pixel with a white channel)
///
/// Suits const capacity arguments, where const evaluation rejects an
/// overflowing count; [`PixelBuffer::new`] checks its size arithmetic at
/// runtime instead.
pub const fn buffer_size(pixel_count: usize, white: bool) -> usize {
    pixel_count * if white { 4 } else { 3 }
}

/// Byte image of a strip, laid out per the chip's [`ColorOrder`]
#[derive(Debug, Clone)]
pub struct PixelBuffer<const CAP: usize> {
    bytes: Vec<u8, CAP>,
    length: usize,
    order: ColorOrder,
    luma: Option<LumaFn>,
}

impl<const CAP: usize> PixelBuffer<CAP> {
    /// Allocate a zeroed buffer for `length` pixels.
    ///
    /// A `Some` luma function enables the RGBW fourth byte, which it derives
    /// from the written color.
    ///
    /// # Errors
    /// `InvalidArgument` for zero `length`; `OutOfMemory` when the byte image
    /// would overflow `usize` or does not fit `CAP`.
    pub fn new(length: usize, order: ColorOrder, luma: Option<LumaFn>) -> Result<Self, StripError> {
        if length == 0 {
            return Err(StripError::InvalidArgument);
        }
        let bytes_per_pixel = if luma.is_some() { 4 } else { 3 };
        let size = length.checked_mul(bytes_per_pixel).ok_or(StripError::OutOfMemory)?;
        let mut bytes = Vec::new();
        bytes.resize_default(size).map_err(|()| StripError::OutOfMemory)?;
        Ok(Self {
            bytes,
            length,
            order,
            luma,
        })
    }

    /// Pixel count
    pub const fn length(&self) -> usize {
        self.length
    }

    pub const fn order(&self) -> ColorOrder {
        self.order
    }

    pub const fn bytes_per_pixel(&self) -> usize {
        if self.luma.is_some() { 4 } else { 3 }
    }

    /// Wire-order byte image, `length * bytes_per_pixel` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write one pixel. `index` counts from the strip input end.
    pub fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), StripError> {
        if index >= self.length {
            return Err(StripError::OutOfRange);
        }
        self.write(index, color);
        Ok(())
    }

    /// Write a run of pixels starting at `start`.
    ///
    /// The whole range is validated before the first byte changes.
    pub fn set_pixels(&mut self, start: usize, colors: &[Rgb]) -> Result<(), StripError> {
        if colors.is_empty() {
            return Err(StripError::InvalidArgument);
        }
        self.check_range(start, colors.len())?;
        for (offset, color) in colors.iter().enumerate() {
            self.write(start + offset, *color);
        }
        Ok(())
    }

    /// Write `len` copies of `color` starting at `start`.
    pub fn fill(&mut self, start: usize, len: usize, color: Rgb) -> Result<(), StripError> {
        if len == 0 {
            return Err(StripError::InvalidArgument);
        }
        self.check_range(start, len)?;
        for index in start..start + len {
            self.write(index, color);
        }
        Ok(())
    }

    fn check_range(&self, start: usize, len: usize) -> Result<(), StripError> {
        let end = start.checked_add(len).ok_or(StripError::OutOfRange)?;
        if end > self.length {
            return Err(StripError::OutOfRange);
        }
        Ok(())
    }

    fn write(&mut self, index: usize, color: Rgb) {
        let offset = index * self.bytes_per_pixel();
        match self.order {
            ColorOrder::Grb => {
                self.bytes[offset] = color.g;
                self.bytes[offset + 1] = color.r;
                self.bytes[offset + 2] = color.b;
            }
            ColorOrder::Rgb => {
                self.bytes[offset] = color.r;
                self.bytes[offset + 1] = color.g;
                self.bytes[offset + 2] = color.b;
            }
        }
        if let Some(luma) = self.luma {
            self.bytes[offset + 3] = luma(color);
        }
    }
}

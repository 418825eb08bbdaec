//! Pixel color vocabulary

use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Function deriving the white channel of an RGBW pixel from its color
pub type LumaFn = fn(color: Rgb) -> u8;

/// Relative luminance with BT.709 integer weights (sum 256, so full white
/// maps to a full white channel)
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
pub const fn luma8(color: Rgb) -> u8 {
    ((color.r as u16 * 54 + color.g as u16 * 183 + color.b as u16 * 19) >> 8) as u8
}

use vello_cpu::peniko::color::{Srgb, parse_color};

use crate::foundation::error::{StampError, StampResult};

/// Opaque 8-bit RGB color, the only color the raw frame can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque white, the default fill for text and crosshairs.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Opaque black, the default text outline.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in buffer order.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub(crate) fn to_cpu(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

/// Resolve a color string to an RGB triple.
///
/// Accepts hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), CSS named colors and the CSS
/// functional forms (`rgb()`, `hsl()`, ...). Any alpha component is discarded: the target
/// frame has no alpha channel and colors are painted opaque.
pub fn resolve_color(value: &str) -> StampResult<Rgb8> {
    let s = value.trim();
    if s.is_empty() {
        return Err(StampError::color("color string is empty"));
    }

    let parsed = parse_color(s)
        .map_err(|e| StampError::color(format!("unrecognized color \"{value}\": {e}")))?;
    let rgba = parsed.to_alpha_color::<Srgb>().to_rgba8();
    Ok(Rgb8::new(rgba.r, rgba.g, rgba.b))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;

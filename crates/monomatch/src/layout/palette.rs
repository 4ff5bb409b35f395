//! Fixed hue palette keyed by symbol id.
use image::Rgb;

use crate::deck::SymbolId;

/// Default number of palette entries.
pub const DEFAULT_PALETTE_SIZE: usize = 128;
/// Saturation shared by every palette entry.
pub const PALETTE_SATURATION: f32 = 0.5;
/// Value shared by every palette entry.
pub const PALETTE_VALUE: f32 = 1.0;

/// Evenly spaced hues at fixed saturation and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb<u8>>,
}

impl Palette {
    /// Builds a palette of `size` entries spanning hues `0..360°`.
    ///
    /// A `size` of zero is treated as one entry.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let colors = (0..size)
            .map(|i| {
                let hue = i as f32 / size as f32 * 360.0;
                hsv_to_rgb(hue, PALETTE_SATURATION, PALETTE_VALUE)
            })
            .collect();
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of `symbol`: entry `symbol mod len`.
    pub fn color_for(&self, symbol: SymbolId) -> Rgb<u8> {
        self.colors[symbol as usize % self.colors.len()]
    }

    pub fn colors(&self) -> &[Rgb<u8>] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE_SIZE)
    }
}

/// Converts hue in degrees, saturation and value in `[0, 1]` to 8-bit RGB.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb<u8> {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = value - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |v: f32| ((v + m) * 255.0).clamp(0.0, 255.0) as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

use crate::error::{Error, Result};

/// Pixel matrix for a single code point.
///
/// The glyph height is shared by every glyph of a [`FontSet`](crate::FontSet)
/// and is not stored here; `pixels` holds `width * height` bytes in
/// row-major order, one byte per pixel with `1` meaning set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u8,
    pixels: Vec<u8>,
}

impl GlyphBitmap {
    pub fn new(width: u8, height: u8, pixels: Vec<u8>) -> Result<Self> {
        let expected = pixel_count(width, height);
        if pixels.len() != expected {
            return Err(Error::PixelCount {
                expected,
                found: pixels.len(),
            });
        }

        if let Some((index, value)) = pixels.iter().enumerate().find(|(_, p)| **p > 1) {
            return Err(Error::NonBinaryPixel {
                index,
                value: *value,
            });
        }

        Ok(Self { width, pixels })
    }

    /// An all-unset glyph.
    pub fn blank(width: u8, height: u8) -> Self {
        Self {
            width,
            pixels: vec![0; pixel_count(width, height)],
        }
    }

    pub(crate) fn from_raw(width: u8, pixels: Vec<u8>) -> Self {
        Self { width, pixels }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        let width = usize::from(self.width);
        x < width && self.pixels.get(y * width + x).map_or(false, |p| *p != 0)
    }

    /// Positions of every set pixel as `(column, row)`.
    pub fn set_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = usize::from(self.width).max(1);
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != 0)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}

/// 255 * 255 = 65025, so this never overflows.
pub(crate) fn pixel_count(width: u8, height: u8) -> usize {
    usize::from(width) * usize::from(height)
}

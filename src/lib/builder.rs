use log::{debug, warn};

use crate::error::{Error, Result};
use crate::{FontSet, GlyphBitmap, GLYPH_COUNT, SPACE};

/// Binary pixel matrix produced by a [`Rasterizer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterizedGlyph {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` values of 0 or 1.
    pub pixels: Vec<u8>,
}

/// Source of binarized glyph bitmaps for a single font resource.
pub trait Rasterizer {
    /// A pixel is set when its coverage is strictly greater than `threshold`.
    ///
    /// Returns [`Error::RasterizationUnavailable`] when the font has no
    /// glyph for `character`.
    fn rasterize(&self, character: char, point_size: u8, threshold: u8)
        -> Result<RasterizedGlyph>;
}

/// Assembles a [`FontSet`] from a rasterizer, one glyph per ASCII code point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSetBuilder {
    pub point_size: u8,
    pub threshold: u8,
}

impl FontSetBuilder {
    pub fn new(point_size: u8, threshold: u8) -> Self {
        Self {
            point_size,
            threshold,
        }
    }

    /// Code points the rasterizer has no glyph for get a copy of the space
    /// glyph. The shared height is the height of the glyph for code point 127.
    pub fn build<R: Rasterizer + ?Sized>(&self, rasterizer: &R) -> Result<FontSet> {
        let fallback = rasterizer.rasterize(char::from(SPACE), self.point_size, self.threshold)?;
        check_pixels(SPACE, &fallback)?;

        let mut rasterized = Vec::with_capacity(GLYPH_COUNT);
        for code_point in 0..GLYPH_COUNT as u8 {
            let character = char::from(code_point);
            let glyph = match rasterizer.rasterize(character, self.point_size, self.threshold) {
                Ok(glyph) => {
                    check_pixels(code_point, &glyph)?;
                    glyph
                }
                Err(Error::RasterizationUnavailable { .. }) => {
                    debug!("no glyph for code point {code_point}, using space");
                    fallback.clone()
                }
                Err(err) => return Err(err),
            };
            rasterized.push(glyph);
        }

        let last = rasterized.last().map_or(0, |glyph| glyph.height);
        let height = u8::try_from(last).map_err(|_| Error::GlyphTooLarge {
            code_point: (GLYPH_COUNT - 1) as u8,
            width: rasterized[GLYPH_COUNT - 1].width,
            height: last,
        })?;

        let glyphs = rasterized
            .into_iter()
            .enumerate()
            .map(|(code_point, glyph)| to_bitmap(code_point as u8, glyph, height))
            .collect::<Result<Vec<_>>>()?;

        FontSet::new(glyphs, height, self.point_size)
    }
}

fn check_pixels(code_point: u8, glyph: &RasterizedGlyph) -> Result<()> {
    let expected = glyph.width * glyph.height;
    if glyph.pixels.len() != expected {
        return Err(Error::InconsistentGlyph {
            code_point,
            expected,
            found: glyph.pixels.len(),
        });
    }

    if let Some((offset, value)) = glyph.pixels.iter().enumerate().find(|(_, p)| **p > 1) {
        return Err(Error::CorruptPixelData {
            code_point,
            offset,
            value: *value,
        });
    }

    Ok(())
}

fn to_bitmap(code_point: u8, glyph: RasterizedGlyph, height: u8) -> Result<GlyphBitmap> {
    let width = u8::try_from(glyph.width)
        .ok()
        .filter(|_| glyph.height <= usize::from(u8::MAX))
        .ok_or(Error::GlyphTooLarge {
            code_point,
            width: glyph.width,
            height: glyph.height,
        })?;

    let mut pixels = glyph.pixels;
    if glyph.height != usize::from(height) {
        warn!(
            "glyph {code_point} is {} rows tall, fitting it to {height}",
            glyph.height
        );
        // Rows are stored top to bottom, so this crops or pads at the bottom.
        pixels.resize(usize::from(width) * usize::from(height), 0);
    }

    GlyphBitmap::new(width, height, pixels)
}

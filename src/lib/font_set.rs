use crate::error::{Error, Result};
use crate::glyph::{pixel_count, GlyphBitmap};
use crate::GLYPH_COUNT;

/// The 128 ASCII glyphs of one font at one size.
///
/// Glyphs are indexed by code point. Every glyph shares `height`;
/// `font_size` is carried as metadata only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontSet {
    glyphs: Vec<GlyphBitmap>,
    height: u8,
    font_size: u8,
}

impl FontSet {
    pub fn new(glyphs: Vec<GlyphBitmap>, height: u8, font_size: u8) -> Result<Self> {
        if glyphs.len() != GLYPH_COUNT {
            return Err(Error::GlyphCount {
                found: glyphs.len(),
            });
        }

        for (code_point, glyph) in glyphs.iter().enumerate() {
            let expected = pixel_count(glyph.width(), height);
            if glyph.pixels().len() != expected {
                return Err(Error::InconsistentGlyph {
                    code_point: code_point as u8,
                    expected,
                    found: glyph.pixels().len(),
                });
            }
        }

        Ok(Self {
            glyphs,
            height,
            font_size,
        })
    }

    pub fn glyphs(&self) -> &[GlyphBitmap] {
        &self.glyphs
    }

    /// Returns `None` outside 0..128.
    pub fn glyph(&self, code_point: u8) -> Option<&GlyphBitmap> {
        self.glyphs.get(usize::from(code_point))
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn font_size(&self) -> u8 {
        self.font_size
    }

    pub fn widths(&self) -> impl Iterator<Item = u8> + '_ {
        self.glyphs.iter().map(GlyphBitmap::width)
    }
}

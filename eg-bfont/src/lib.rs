#![no_std]

extern crate self as eg_bfont;

use embedded_graphics::{
    iterator::raw::RawDataSlice,
    pixelcolor::raw::{LittleEndian, RawU1},
    prelude::*,
    primitives::Rectangle,
};

pub use eg_bfont_macros::include_bfont;

pub mod text;

/// A `.bfont` font embedded with [`include_bfont!`].
///
/// `glyphs` is indexed by code point. Glyph pixels are packed one bit per
/// pixel, most significant bit first, with no padding between rows or glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BfontFont<'a> {
    pub height: u32,
    pub font_size: u32,
    pub replacement_character: usize,
    pub glyphs: &'a [BfontGlyph],
    pub data: &'a [u8],
}

impl<'a> BfontFont<'a> {
    fn get_glyph(&self, c: char) -> &'a BfontGlyph {
        self.glyphs
            .get(c as usize)
            .unwrap_or_else(|| &self.glyphs[self.replacement_character])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BfontGlyph {
    pub width: u32,
    pub start_index: usize,
}

impl BfontGlyph {
    fn draw<D: DrawTarget>(
        &self,
        top_left: Point,
        height: u32,
        color: D::Color,
        data: &[u8],
        target: &mut D,
    ) -> Result<(), D::Error> {
        let mut data_iter = RawDataSlice::<RawU1, LittleEndian>::new(data).into_iter();

        if self.start_index > 0 {
            data_iter.nth(self.start_index - 1);
        }

        Rectangle::new(top_left, Size::new(self.width, height))
            .points()
            .zip(data_iter)
            .filter(|(_p, c)| *c == RawU1::new(1))
            .map(|(p, _c)| Pixel(p, color))
            .draw(target)
    }
}

//! Reading, writing and laying out `.bfont` bitmap fonts.
//!
//! A `.bfont` file stores 1-bit glyphs for the 128 ASCII code points:
//!
//! ```text
//! offset 0..127   widths, one byte per code point
//! offset 128      shared glyph height
//! offset 129      nominal font size
//! offset 130..    glyph payloads in code point order, width * height
//!                 bytes each, one byte (0 or 1) per pixel, row-major
//! ```

use core::ops::RangeInclusive;

pub mod bfont;
pub mod builder;
pub mod canvas;
pub mod config;
mod error;
pub mod fonts;
mod font_set;
mod glyph;
pub mod layout;
#[cfg(feature = "truetype")]
pub mod truetype;

pub use bfont::{decode, decode_with, encode, DecodeMode};
pub use builder::{FontSetBuilder, RasterizedGlyph, Rasterizer};
pub use canvas::Canvas;
pub use error::{Error, Result};
pub use font_set::FontSet;
pub use glyph::GlyphBitmap;
pub use layout::{layout, render, LayoutEngine, LayoutPlan, Placement};

/// Number of glyphs in a font set, one per ASCII code point.
pub const GLYPH_COUNT: usize = 128;

/// Widths, then height, then font size.
pub const HEADER_LEN: usize = GLYPH_COUNT + 2;

/// Code points drawn by the viewer and the preview, space through tilde.
pub const PRINTABLE: RangeInclusive<u8> = 32..=126;

/// Code point whose glyph replaces any glyph the rasterizer can't produce.
pub const SPACE: u8 = b' ';

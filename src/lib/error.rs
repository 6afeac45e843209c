use thiserror::Error;

use crate::HEADER_LEN;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bfont header truncated: expected {} bytes, found {found}", HEADER_LEN)]
    TruncatedHeader { found: usize },

    #[error("bfont payload for code point {code_point} truncated: expected {expected} bytes, {available} available")]
    TruncatedPayload {
        code_point: u8,
        expected: usize,
        available: usize,
    },

    #[error("{count} trailing bytes after the last glyph payload")]
    TrailingBytes { count: usize },

    #[error("corrupt pixel value {value:#04x} for code point {code_point} at byte {offset}")]
    CorruptPixelData {
        code_point: u8,
        offset: usize,
        value: u8,
    },

    #[error("no glyph available for {character:?}")]
    RasterizationUnavailable { character: char },

    #[error("glyph for code point {code_point} is {width}x{height}, larger than 255x255")]
    GlyphTooLarge {
        code_point: u8,
        width: usize,
        height: usize,
    },

    #[error("a font set holds exactly 128 glyphs, found {found}")]
    GlyphCount { found: usize },

    #[error("pixel value {value:#04x} at index {index} is neither 0 nor 1")]
    NonBinaryPixel { index: usize, value: u8 },

    #[error("glyph bitmap has {found} pixels, expected {expected}")]
    PixelCount { expected: usize, found: usize },

    #[error("glyph {code_point} has {found} pixels, the shared height needs {expected}")]
    InconsistentGlyph {
        code_point: u8,
        expected: usize,
        found: usize,
    },

    #[error("unable to load font resource: {0}")]
    FontResource(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Write};
use std::path::Path;

use byteorder::{ReadBytesExt, WriteBytesExt};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::glyph::{pixel_count, GlyphBitmap};
use crate::{FontSet, GLYPH_COUNT, HEADER_LEN};

/// How strictly [`decode_with`] treats data the encoder never produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Pixel bytes other than 0 or 1 and bytes after the last payload are errors.
    #[default]
    Strict,
    /// Nonzero pixel bytes become 1 and trailing bytes are ignored, both with a warning.
    Lenient,
}

/// Size in bytes of the encoded form of `font`.
pub fn encoded_len(font: &FontSet) -> usize {
    HEADER_LEN
        + font
            .widths()
            .map(|width| pixel_count(width, font.height()))
            .sum::<usize>()
}

pub fn encode(font: &FontSet) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(encoded_len(font));
    write_to(font, &mut bytes).expect("writing to a Vec can't fail");
    bytes
}

pub fn write_to<W: Write>(font: &FontSet, mut writer: W) -> Result<()> {
    for width in font.widths() {
        writer.write_u8(width)?;
    }
    writer.write_u8(font.height())?;
    writer.write_u8(font.font_size())?;

    for glyph in font.glyphs() {
        writer.write_all(glyph.pixels())?;
    }

    Ok(())
}

pub fn save<P: AsRef<Path>>(font: &FontSet, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_to(font, &mut writer)?;
    writer.flush()?;
    debug!(
        "wrote {} bytes to {}",
        encoded_len(font),
        path.as_ref().display()
    );

    Ok(())
}

pub fn decode(bytes: &[u8]) -> Result<FontSet> {
    decode_with(bytes, DecodeMode::Strict)
}

pub fn decode_with(bytes: &[u8], mode: DecodeMode) -> Result<FontSet> {
    if bytes.len() < HEADER_LEN {
        return Err(Error::TruncatedHeader { found: bytes.len() });
    }

    let mut cursor = Cursor::new(bytes);

    let mut widths = [0u8; GLYPH_COUNT];
    cursor.read_exact(&mut widths)?;
    let height = cursor.read_u8()?;
    let font_size = cursor.read_u8()?;
    debug!("bfont header: height {height}, font size {font_size}");

    let mut glyphs = Vec::with_capacity(GLYPH_COUNT);
    for (code_point, width) in widths.into_iter().enumerate() {
        let code_point = code_point as u8;
        let expected = pixel_count(width, height);
        let offset = cursor.position() as usize;
        let available = bytes.len() - offset;
        if available < expected {
            return Err(Error::TruncatedPayload {
                code_point,
                expected,
                available,
            });
        }

        let mut pixels = vec![0u8; expected];
        cursor.read_exact(&mut pixels)?;
        check_pixels(code_point, offset, &mut pixels, mode)?;

        glyphs.push(GlyphBitmap::from_raw(width, pixels));
    }

    let trailing = bytes.len() - cursor.position() as usize;
    if trailing > 0 {
        match mode {
            DecodeMode::Strict => return Err(Error::TrailingBytes { count: trailing }),
            DecodeMode::Lenient => warn!("ignoring {trailing} trailing bytes"),
        }
    }

    FontSet::new(glyphs, height, font_size)
}

fn check_pixels(code_point: u8, offset: usize, pixels: &mut [u8], mode: DecodeMode) -> Result<()> {
    let mut normalized = 0;
    for (i, pixel) in pixels.iter_mut().enumerate() {
        if *pixel <= 1 {
            continue;
        }

        match mode {
            DecodeMode::Strict => {
                return Err(Error::CorruptPixelData {
                    code_point,
                    offset: offset + i,
                    value: *pixel,
                })
            }
            DecodeMode::Lenient => {
                *pixel = 1;
                normalized += 1;
            }
        }
    }

    if normalized > 0 {
        warn!("normalized {normalized} pixel values for code point {code_point}");
    }

    Ok(())
}

/// Reads the whole stream before decoding.
pub fn read_from<R: Read>(mut reader: R, mode: DecodeMode) -> Result<FontSet> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode_with(&bytes, mode)
}

pub fn load<P: AsRef<Path>>(path: P, mode: DecodeMode) -> Result<FontSet> {
    let file = File::open(path.as_ref())?;
    let font = read_from(file, mode)?;
    debug!("loaded {}", path.as_ref().display());

    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Space through tilde 5 wide, everything else empty.
    fn sample_font() -> FontSet {
        let glyphs = (0..GLYPH_COUNT)
            .map(|code_point| {
                if (32..=126).contains(&code_point) {
                    let pixels = (0..40).map(|i| ((i + code_point) % 3 == 0) as u8).collect();
                    GlyphBitmap::new(5, 8, pixels).unwrap()
                } else {
                    GlyphBitmap::blank(0, 8)
                }
            })
            .collect();

        FontSet::new(glyphs, 8, 12).unwrap()
    }

    #[test]
    fn it_encodes_the_header() {
        let bytes = encode(&sample_font());

        assert_eq!(&[0u8; 32][..], &bytes[0..32]);
        assert_eq!(&[5u8; 95][..], &bytes[32..127]);
        assert_eq!(0, bytes[127]);
        assert_eq!(8, bytes[128]);
        assert_eq!(12, bytes[129]);
    }

    #[test]
    fn it_has_a_deterministic_length() {
        let font = sample_font();
        let bytes = encode(&font);

        assert_eq!(3930, bytes.len());
        assert_eq!(encoded_len(&font), bytes.len());
    }

    #[test]
    fn it_round_trips() {
        let font = sample_font();
        let decoded = decode(&encode(&font)).unwrap();

        assert_eq!(font, decoded);
        assert_eq!(40, decoded.glyph(b'A').unwrap().pixels().len());
    }

    #[test]
    fn it_round_trips_the_largest_glyphs() {
        let glyphs = (0..GLYPH_COUNT)
            .map(|code_point| {
                let width = if code_point % 2 == 0 { 255 } else { (code_point % 6 + 1) as u8 };
                let pixels = (0..usize::from(width) * 255)
                    .map(|i| ((i * 7 + code_point) % 5 < 2) as u8)
                    .collect();
                GlyphBitmap::new(width, 255, pixels).unwrap()
            })
            .collect();
        let font = FontSet::new(glyphs, 255, 255).unwrap();

        let bytes = encode(&font);

        assert_eq!(encoded_len(&font), bytes.len());
        assert_eq!(4_226_500, bytes.len());
        assert_eq!(font, decode(&bytes).unwrap());
    }

    #[test]
    fn it_round_trips_fonts_built_from_public_constructors() {
        let mut glyphs = vec![GlyphBitmap::blank(0, 1); GLYPH_COUNT];
        glyphs[b'A' as usize] = GlyphBitmap::new(2, 1, vec![1, 0]).unwrap();
        let font = FontSet::new(glyphs, 1, 12).unwrap();

        assert_eq!(font, decode(&encode(&font)).unwrap());
    }

    #[test]
    fn it_places_payloads_in_code_point_order() {
        let mut glyphs = vec![GlyphBitmap::blank(0, 2); GLYPH_COUNT];
        glyphs[1] = GlyphBitmap::new(1, 2, vec![1, 0]).unwrap();
        glyphs[127] = GlyphBitmap::new(2, 2, vec![0, 1, 1, 1]).unwrap();
        let bytes = encode(&FontSet::new(glyphs, 2, 9).unwrap());

        assert_eq!(&[1, 0, 0, 1, 1, 1][..], &bytes[HEADER_LEN..]);
    }

    #[test]
    fn it_decodes_a_zero_height_font() {
        let mut bytes = vec![7u8; GLYPH_COUNT];
        bytes.extend_from_slice(&[0, 10]);

        let font = decode(&bytes).unwrap();
        assert_eq!(0, font.height());
        assert_eq!(10, font.font_size());
        assert!(font.glyphs().iter().all(|g| g.width() == 7 && g.pixels().is_empty()));
    }

    #[test]
    fn it_rejects_a_truncated_header() {
        let bytes = encode(&sample_font());

        assert!(matches!(
            decode(&bytes[..129]),
            Err(Error::TruncatedHeader { found: 129 })
        ));
        assert!(matches!(
            decode(&[]),
            Err(Error::TruncatedHeader { found: 0 })
        ));
    }

    #[test]
    fn it_rejects_every_truncated_prefix() {
        let bytes = encode(&sample_font());

        for len in 0..bytes.len() {
            match decode(&bytes[..len]) {
                Err(Error::TruncatedHeader { .. }) => assert!(len < HEADER_LEN),
                Err(Error::TruncatedPayload { .. }) => assert!(len >= HEADER_LEN),
                other => panic!("prefix of {len} bytes decoded to {other:?}"),
            }
        }
    }

    #[test]
    fn it_reports_the_truncated_glyph() {
        let bytes = encode(&sample_font());

        assert!(matches!(
            decode(&bytes[..HEADER_LEN + 45]),
            Err(Error::TruncatedPayload {
                code_point: 33,
                expected: 40,
                available: 5
            })
        ));
    }

    #[test]
    fn it_handles_trailing_bytes_by_mode() {
        let font = sample_font();
        let mut bytes = encode(&font);
        bytes.extend_from_slice(&[0, 0, 1]);

        assert!(matches!(
            decode(&bytes),
            Err(Error::TrailingBytes { count: 3 })
        ));
        assert_eq!(font, decode_with(&bytes, DecodeMode::Lenient).unwrap());
    }

    #[test]
    fn it_handles_corrupt_pixels_by_mode() {
        let mut bytes = encode(&sample_font());
        let offset = HEADER_LEN + 2;
        bytes[offset] = 0xff;

        assert!(matches!(
            decode(&bytes),
            Err(Error::CorruptPixelData {
                code_point: 32,
                offset: 132,
                value: 0xff
            })
        ));

        let font = decode_with(&bytes, DecodeMode::Lenient).unwrap();
        assert_eq!(1, font.glyph(32).unwrap().pixels()[2]);
    }

    #[test]
    fn it_reads_from_a_stream() {
        let font = sample_font();
        let bytes = encode(&font);

        assert_eq!(font, read_from(&bytes[..], DecodeMode::Strict).unwrap());
    }

    #[test]
    fn it_saves_and_loads_files() {
        let font = sample_font();
        let path = std::env::temp_dir().join(format!("bfont-codec-{}.bfont", std::process::id()));

        save(&font, &path).unwrap();
        let loaded = load(&path, DecodeMode::Strict);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(font, loaded.unwrap());
    }

    #[test]
    fn it_reports_missing_files_as_io_errors() {
        let path = std::env::temp_dir().join("bfont-does-not-exist.bfont");
        assert!(matches!(load(path, DecodeMode::Strict), Err(Error::Io(_))));
    }
}

//! [`Rasterizer`] for TrueType fonts, backed by `fontdue`.

use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};

use crate::builder::{RasterizedGlyph, Rasterizer};
use crate::error::{Error, Result};

pub struct TrueTypeRasterizer {
    font: Font,
}

impl TrueTypeRasterizer {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|err| Error::FontResource(err.to_string()))?;

        Ok(Self { font })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}

impl Rasterizer for TrueTypeRasterizer {
    fn rasterize(&self, character: char, point_size: u8, threshold: u8) -> Result<RasterizedGlyph> {
        if self.font.lookup_glyph_index(character) == 0 {
            return Err(Error::RasterizationUnavailable { character });
        }

        let px = f32::from(point_size);
        let line = self
            .font
            .horizontal_line_metrics(px)
            .ok_or_else(|| Error::FontResource("font has no horizontal metrics".into()))?;

        let (metrics, coverage) = self.font.rasterize(character, px);
        let ascent = line.ascent.round() as i32;
        let height = (ascent - line.descent.round() as i32).max(0) as usize;
        // Advance widths are truncated, not rounded.
        let width = metrics.advance_width.max(0.0) as usize;

        Ok(composite(&metrics, &coverage, width, height, ascent, threshold))
    }
}

/// Binarizes `coverage` into a `width` x `height` box whose baseline sits
/// `ascent` rows below the top. Coverage outside the box is dropped.
fn composite(
    metrics: &Metrics,
    coverage: &[u8],
    width: usize,
    height: usize,
    ascent: i32,
    threshold: u8,
) -> RasterizedGlyph {
    let mut pixels = vec![0u8; width * height];
    let top = ascent - (metrics.ymin + metrics.height as i32);

    for (i, value) in coverage.iter().enumerate() {
        if *value <= threshold {
            continue;
        }

        let x = metrics.xmin + (i % metrics.width) as i32;
        let y = top + (i / metrics.width) as i32;
        if (0..width as i32).contains(&x) && (0..height as i32).contains(&y) {
            pixels[y as usize * width + x as usize] = 1;
        }
    }

    RasterizedGlyph {
        width,
        height,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Units per em 1000, hhea ascent 1024 and descent -400, a single 'A'
    // glyph advancing 540 units.
    const DEMO: &[u8] = include_bytes!("../../assets/demo.ttf");

    #[test]
    fn it_reports_missing_glyphs() {
        let rasterizer = TrueTypeRasterizer::from_bytes(DEMO).unwrap();

        assert!(matches!(
            rasterizer.rasterize('B', 10, 128),
            Err(Error::RasterizationUnavailable { character: 'B' })
        ));
    }

    #[test]
    fn it_sizes_glyphs_from_line_metrics_and_advance() {
        let rasterizer = TrueTypeRasterizer::from_bytes(DEMO).unwrap();

        let glyph = rasterizer.rasterize('A', 10, 0).unwrap();

        // 10.24 + 4.0 rows, 5.4 columns truncated.
        assert_eq!(14, glyph.height);
        assert_eq!(5, glyph.width);
        assert_eq!(70, glyph.pixels.len());
        assert!(glyph.pixels.iter().all(|p| *p <= 1));
        assert!(glyph.pixels.contains(&1));
    }

    #[test]
    fn it_builds_a_font_set_with_space_fallback() {
        let rasterizer = TrueTypeRasterizer::from_bytes(DEMO).unwrap();

        // The demo font has no space glyph.
        assert!(matches!(
            crate::FontSetBuilder::new(10, 128).build(&rasterizer),
            Err(Error::RasterizationUnavailable { character: ' ' })
        ));
    }

    #[test]
    fn it_rejects_invalid_font_data() {
        assert!(matches!(
            TrueTypeRasterizer::from_bytes(b"not a font"),
            Err(Error::FontResource(_))
        ));
    }

    #[test]
    fn it_places_coverage_on_the_baseline() {
        let metrics = Metrics {
            xmin: 1,
            ymin: -1,
            width: 2,
            height: 3,
            ..Default::default()
        };
        #[rustfmt::skip]
        let coverage = [
            255, 10,
            129, 128,
            200, 0,
        ];

        let glyph = composite(&metrics, &coverage, 4, 5, 3, 128);

        #[rustfmt::skip]
        let expected = vec![
            0, 0, 0, 0,
            0, 1, 0, 0,
            0, 1, 0, 0,
            0, 1, 0, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(expected, glyph.pixels);
    }

    #[test]
    fn it_clips_coverage_outside_the_box() {
        let metrics = Metrics {
            xmin: -1,
            ymin: 0,
            width: 3,
            height: 1,
            ..Default::default()
        };

        let glyph = composite(&metrics, &[255, 255, 255], 1, 2, 2, 0);

        assert_eq!(vec![0, 1], glyph.pixels);
    }
}

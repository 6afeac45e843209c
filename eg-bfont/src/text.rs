use embedded_graphics::{
    prelude::*,
    primitives::Rectangle,
    text::{
        renderer::{CharacterStyle, TextMetrics, TextRenderer},
        Baseline,
    },
};

use crate::BfontFont;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BfontTextStyle<'a, C> {
    font: &'a BfontFont<'a>,
    color: Option<C>,
}

impl<'a, C: PixelColor> BfontTextStyle<'a, C> {
    pub fn new(font: &'a BfontFont<'a>, color: C) -> Self {
        Self {
            font,
            color: Some(color),
        }
    }

    /// `.bfont` glyphs carry no ascent, so the alphabetic baseline is the
    /// bottom row.
    fn top_left(&self, position: Point, baseline: Baseline) -> Point {
        let bottom = self.font.height.saturating_sub(1) as i32;
        let y = match baseline {
            Baseline::Top => position.y,
            Baseline::Middle => position.y - bottom / 2,
            _ => position.y - bottom,
        };

        Point::new(position.x, y)
    }
}

impl<C: PixelColor> CharacterStyle for BfontTextStyle<'_, C> {
    type Color = C;

    fn set_text_color(&mut self, text_color: Option<Self::Color>) {
        self.color = text_color;
    }
}

impl<C: PixelColor> TextRenderer for BfontTextStyle<'_, C> {
    type Color = C;

    fn draw_string<D>(
        &self,
        text: &str,
        mut position: Point,
        baseline: Baseline,
        target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let top = self.top_left(position, baseline).y;

        for c in text.chars() {
            let glyph = self.font.get_glyph(c);

            if let Some(color) = self.color {
                glyph.draw(
                    Point::new(position.x, top),
                    self.font.height,
                    color,
                    self.font.data,
                    target,
                )?;
            }

            position.x += glyph.width as i32;
        }

        Ok(position)
    }

    fn draw_whitespace<D>(
        &self,
        width: u32,
        position: Point,
        _baseline: Baseline,
        _target: &mut D,
    ) -> Result<Point, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        Ok(position + Size::new(width, 0))
    }

    fn measure_string(&self, text: &str, position: Point, baseline: Baseline) -> TextMetrics {
        let dx = text.chars().map(|c| self.font.get_glyph(c).width).sum();
        let height = if dx > 0 { self.font.height } else { 0 };

        TextMetrics {
            bounding_box: Rectangle::new(
                self.top_left(position, baseline),
                Size::new(dx, height),
            ),
            next_position: position + Size::new(dx, 0),
        }
    }

    fn line_height(&self) -> u32 {
        self.font.height
    }
}

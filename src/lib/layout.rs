//! Line packing of variable-width glyphs onto a canvas that grows on demand.
//!
//! Glyphs are placed left to right with [`MARGIN`] between them and around
//! the edges. A glyph that would cross the right margin starts a new line;
//! a line that would cross the bottom margin grows the canvas by the glyph
//! height plus the margin before anything is placed on it.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use log::debug;

use crate::{Canvas, FontSet, GlyphBitmap, PRINTABLE};

pub const MARGIN: u32 = 10;

/// First glyph position used when viewing a decoded font.
pub const VIEWER_ORIGIN: Point = Point::new(10, 10);

/// First glyph position used when previewing a font during generation.
pub const PREVIEW_ORIGIN: Point = Point::new(10, 100);

/// Top-left corner at which the glyph for `code_point` is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub code_point: u8,
    pub position: Point,
}

/// The canvas height changed from `from` to `to` before the next placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Growth {
    pub from: u32,
    pub to: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub growths: Vec<Growth>,
    pub placement: Placement,
}

#[derive(Clone, Debug)]
pub struct LayoutEngine {
    canvas: Size,
    origin: Point,
    cursor: Point,
    line_height: u32,
}

impl LayoutEngine {
    pub fn new(canvas: Size, origin: Point) -> Self {
        Self {
            canvas,
            origin,
            cursor: origin,
            line_height: 0,
        }
    }

    /// Canvas size required by everything placed so far.
    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn place(&mut self, code_point: u8, width: u8, height: u8) -> Step {
        let margin = MARGIN as i32;
        let width = i32::from(width);

        if self.cursor.x + width > self.canvas.width as i32 - margin {
            self.cursor.x = self.origin.x;
            self.cursor.y += self.line_height as i32 + margin;
            self.line_height = 0;
        }

        let mut growths = Vec::new();
        while self.cursor.y + i32::from(height) > self.canvas.height as i32 - margin {
            let from = self.canvas.height;
            let to = from + u32::from(height) + MARGIN;
            debug!("growing canvas from {from} to {to} rows for code point {code_point}");
            self.canvas.height = to;
            growths.push(Growth { from, to });
        }

        let placement = Placement {
            code_point,
            position: self.cursor,
        };

        self.cursor.x += width + margin;
        self.line_height = self.line_height.max(u32::from(height));

        Step {
            growths,
            placement,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    pub placements: Vec<Placement>,
    pub growths: Vec<Growth>,
    pub canvas_size: Size,
}

/// Places the printable glyphs of `font`, space through tilde.
pub fn layout(font: &FontSet, canvas: Size, origin: Point) -> LayoutPlan {
    let mut engine = LayoutEngine::new(canvas, origin);
    let mut placements = Vec::with_capacity(PRINTABLE.len());
    let mut growths = Vec::new();

    for (code_point, glyph) in printable(font) {
        let step = engine.place(code_point, glyph.width(), font.height());
        growths.extend(step.growths);
        placements.push(step.placement);
    }

    LayoutPlan {
        placements,
        growths,
        canvas_size: engine.canvas_size(),
    }
}

fn printable(font: &FontSet) -> impl Iterator<Item = (u8, &GlyphBitmap)> {
    PRINTABLE.filter_map(move |code_point| font.glyph(code_point).map(|glyph| (code_point, glyph)))
}

/// Draws the set pixels of `glyph` with its top-left corner at `position`.
pub fn draw_glyph<D>(target: &mut D, glyph: &GlyphBitmap, position: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.draw_iter(glyph.set_pixels().map(|(column, row)| {
        Pixel(
            position + Point::new(column as i32, row as i32),
            BinaryColor::On,
        )
    }))
}

/// Lays out and draws the printable glyphs of `font`, growing `canvas`
/// whenever the next line does not fit.
pub fn render(font: &FontSet, mut canvas: Canvas, origin: Point) -> Canvas {
    let mut engine = LayoutEngine::new(canvas.size(), origin);

    for (code_point, glyph) in printable(font) {
        let step = engine.place(code_point, glyph.width(), font.height());
        for growth in step.growths {
            canvas.grow(growth.to - growth.from);
        }

        match draw_glyph(&mut canvas, glyph, step.placement.position) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    canvas
}

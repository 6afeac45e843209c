use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use image::{GrayImage, Luma};

/// Owned 1-bit drawing surface that can grow downwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    pixels: Vec<bool>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|x| *x < self.size.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.size.height)?;
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Marks one pixel as set. Points outside the canvas are ignored.
    pub fn plot(&mut self, x: i32, y: i32) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = true;
        }
    }

    pub fn is_set(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map_or(false, |index| self.pixels[index])
    }

    pub fn set_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    /// Replaces the surface with one `extra` rows taller, keeping all drawn
    /// content at the same position.
    pub fn grow(&mut self, extra: u32) {
        let mut grown = Canvas::new(self.size.width, self.size.height + extra);
        grown.pixels[..self.pixels.len()].copy_from_slice(&self.pixels);
        *self = grown;
    }

    /// Black ink on a white background.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.size.width, self.size.height, |x, y| {
            if self.is_set(x as i32, y as i32) {
                Luma([0])
            } else {
                Luma([255])
            }
        })
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(index) = self.index(point.x, point.y) {
                self.pixels[index] = color.is_on();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    #[test]
    fn it_plots_inside_bounds_only() {
        let mut canvas = Canvas::new(4, 3);
        canvas.plot(3, 2);
        canvas.plot(4, 0);
        canvas.plot(-1, 1);

        assert!(canvas.is_set(3, 2));
        assert_eq!(1, canvas.set_pixel_count());
    }

    #[test]
    fn it_grows_without_moving_content() {
        let mut canvas = Canvas::new(5, 2);
        canvas.plot(0, 0);
        canvas.plot(4, 1);

        canvas.grow(3);

        assert_eq!(Size::new(5, 5), canvas.size());
        assert!(canvas.is_set(0, 0));
        assert!(canvas.is_set(4, 1));
        assert_eq!(2, canvas.set_pixel_count());

        canvas.plot(2, 4);
        assert!(canvas.is_set(2, 4));
    }

    #[test]
    fn it_is_an_embedded_graphics_target() {
        let mut canvas = Canvas::new(6, 6);
        Rectangle::new(Point::new(1, 1), Size::new(2, 2))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut canvas)
            .unwrap();

        assert_eq!(4, canvas.set_pixel_count());
        assert!(canvas.is_set(2, 2));
        assert!(!canvas.is_set(3, 3));
    }

    #[test]
    fn it_converts_to_an_image() {
        let mut canvas = Canvas::new(2, 1);
        canvas.plot(1, 0);
        let image = canvas.to_image();

        assert_eq!(Luma([255]), *image.get_pixel(0, 0));
        assert_eq!(Luma([0]), *image.get_pixel(1, 0));
    }
}

//! `embedded-graphics` bindings for [`FrameBuffer`]
//!
//! The framebuffer itself is format-agnostic at the type level, so the
//! [`DrawTarget`] impls live on thin per-format canvases instead. The
//! [`FrameBuffer::text`] helper covers the common case of the built-in
//! 6x10 font without the caller touching `embedded-graphics` at all.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::{BinaryColor, Rgb565},
    prelude::*,
    text::{Baseline, Text},
    Pixel,
};

use crate::framebuffer::FrameBuffer;

/// Monochrome draw target over a packed-monochrome framebuffer.
pub struct MonoCanvas<'a, B>(pub &'a mut FrameBuffer<B>);

impl<B: AsRef<[u8]> + AsMut<[u8]>> OriginDimensions for MonoCanvas<'_, B> {
    fn size(&self) -> Size {
        Size::new(self.0.width() as u32, self.0.height() as u32)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> DrawTarget for MonoCanvas<'_, B> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.0
                .set_pixel(point.x, point.y, color.is_on() as u16);
        }
        Ok(())
    }
}

/// RGB565 draw target over a color framebuffer.
pub struct ColorCanvas<'a, B>(pub &'a mut FrameBuffer<B>);

impl<B: AsRef<[u8]> + AsMut<[u8]>> OriginDimensions for ColorCanvas<'_, B> {
    fn size(&self) -> Size {
        Size::new(self.0.width() as u32, self.0.height() as u32)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> DrawTarget for ColorCanvas<'_, B> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.0.set_pixel(point.x, point.y, color.into_storage());
        }
        Ok(())
    }
}

/// Adapter that paints the glyph foreground in one raw color and leaves
/// the background untouched, so text composes over whatever is drawn.
struct TextTarget<'a, B> {
    fb: &'a mut FrameBuffer<B>,
    color: u16,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> OriginDimensions for TextTarget<'_, B> {
    fn size(&self) -> Size {
        Size::new(self.fb.width() as u32, self.fb.height() as u32)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> DrawTarget for TextTarget<'_, B> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if color.is_on() {
                self.fb.set_pixel(point.x, point.y, self.color);
            }
        }
        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> FrameBuffer<B> {
    /// Draw `s` in the built-in 6x10 font with its top-left corner at
    /// `(x, y)`. Background pixels are left untouched.
    pub fn text(&mut self, s: &str, x: i32, y: i32, color: u16) {
        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let mut target = TextTarget { fb: self, color };
        // Infallible target, the draw cannot fail.
        let _ = Text::with_baseline(s, Point::new(x, y), style, Baseline::Top).draw(&mut target);
    }
}

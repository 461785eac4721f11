//! Graphics support via embedded-graphics
//!
//! Every [`DisplayDriver`] is a [`DrawTarget`] in its controller's color type
//! ([`BinaryColor`](embedded_graphics_core::pixelcolor::BinaryColor) for the
//! SSD1306, [`Rgb565`](embedded_graphics_core::pixelcolor::Rgb565) for the
//! ST7735). Drawing happens in logical coordinates, so the reported size follows
//! the current orientation. Pixels outside the logical area are skipped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     mono_font::{MonoTextStyle, ascii::FONT_6X10},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//!     text::Text,
//! };
//! use kf_display::{I2cBus, Ssd1306, Ssd1306Display};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::{I2c, Operation};
//! # struct MockI2c;
//! # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
//! # impl I2c for MockI2c {
//! #     fn transaction(&mut self, _a: u8, _o: &mut [Operation<'_>]) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let mut display = Ssd1306Display::new(Ssd1306::new(I2cBus::new(MockI2c), Default::default()));
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! let _ = Rectangle::new(Point::new(0, 0), Size::new(128, 64))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(44, 12), 40)
//!     .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
//!     .draw(&mut display);
//!
//! let _ = Text::new(
//!     "Hello, OLED!",
//!     Point::new(4, 60),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On),
//! )
//! .draw(&mut display);
//!
//! display.send();
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::PixelColor,
    prelude::Pixel,
};

use crate::driver::{Color, Controller, DisplayDriver};

impl<C, const N: usize> DrawTarget for DisplayDriver<C, N>
where
    C: Controller,
    Color<C>: PixelColor,
{
    type Color = Color<C>;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            // Negative or beyond u8: never on the panel
            let (Ok(x), Ok(y)) = (u8::try_from(x), u8::try_from(y)) else {
                continue;
            };
            self.set_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        DisplayDriver::clear(self, color);
        Ok(())
    }
}

impl<C, const N: usize> OriginDimensions for DisplayDriver<C, N>
where
    C: Controller,
{
    fn size(&self) -> Size {
        Size::new(self.width().into(), self.height().into())
    }
}

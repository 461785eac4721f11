//! Display drivers for small embedded panels
//!
//! Statically dispatched drivers for an SSD1306 monochrome OLED (I2C) and an
//! ST7735 color LCD (SPI), sharing one generic front end.
//!
//! ## Features
//!
//! - `no_std`, no allocation: the pixel buffer is a fixed-size array sized at
//!   compile time from the controller geometry
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature, on by default)
//! - Six orientations; the ST7735 rotates in hardware, the SSD1306 mirrors
//!
//! ## Architecture
//!
//! - [`DisplayDriver`] owns the buffer and forwards the lifecycle to a
//!   [`Controller`] (`init`, `send`, `set_orientation`, logical `width`/`height`)
//! - [`PixelFormat`] fixes the storage word, the pixels per word and the buffer
//!   layout of a controller
//! - [`I2cInterface`] / [`SpiInterface`] are the transports the controllers talk
//!   through; [`I2cBus`] and [`SpiWire`] implement them over embedded-hal
//!
//! ## Usage
//!
//! ```rust,no_run
//! use embedded_graphics_core::pixelcolor::BinaryColor;
//! use kf_display::{I2cBus, Orientation, Ssd1306, Ssd1306Builder, Ssd1306Display};
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
//! # let i2c = MockI2c;
//! # let mut delay = MockDelay;
//! let config = match Ssd1306Builder::new().build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = Ssd1306Display::new(Ssd1306::new(I2cBus::new(i2c), config));
//! if let Err(err) = display.init(&mut delay) {
//!     let _ = err;
//!     return;
//! }
//!
//! display.set_orientation(Orientation::MirrorY);
//! display.set_pixel(0, 0, BinaryColor::On);
//! display.send();
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Controller command definitions
pub mod command;
/// Controller configuration types and builders
pub mod config;
/// Generic display driver and controller trait
pub mod driver;
/// Error types for the drivers
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Orientation of the logical coordinate system
pub mod orientation;
/// Buffer pixel formats
pub mod pixel;
/// SSD1306 monochrome OLED controller
pub mod ssd1306;
/// ST7735 color LCD controller
pub mod st7735;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use config::{
    ColorOrder, DEFAULT_I2C_ADDRESS, DEFAULT_SPI_FREQUENCY_HZ, Ssd1306Builder, Ssd1306Config,
    St7735Builder, St7735Config,
};
pub use driver::{Controller, DisplayDriver};
pub use error::{BuilderError, Error};
pub use interface::{I2cBus, I2cInterface, InterfaceError, SpiInterface, SpiWire};
pub use orientation::Orientation;
pub use pixel::{Monochrome, PixelFormat, Rgb565Format, buffer_size};
pub use ssd1306::{Ssd1306, Ssd1306Display};
pub use st7735::{St7735, St7735Display};

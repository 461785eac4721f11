//! ST7735 color LCD controller
//!
//! 128x160 panel on SPI, RGB565 row-major buffer. All six orientations are
//! supported in hardware; the two rotations swap the logical dimensions.
//!
//! `init()` reports success unconditionally. Bus and pin failures anywhere in this
//! controller are logged at `warn` and dropped, so its
//! [`Controller::Error`] is [`Infallible`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics_core::pixelcolor::{Rgb565, RgbColor};
//! use kf_display::{Orientation, SpiWire, St7735, St7735Builder, St7735Display};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! let config = match St7735Builder::new()
//!     .orientation(Orientation::ClockWise)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let wire = SpiWire::new(MockSpi, MockPin, MockPin, MockPin);
//! let mut display = St7735Display::new(St7735::new(wire, config));
//! let _ = display.init(&mut delay);
//!
//! // Landscape after init
//! assert_eq!((display.width(), display.height()), (160, 128));
//! display.clear(Rgb565::BLACK);
//! display.set_pixel(159, 0, Rgb565::RED);
//! display.send();
//! ```

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;

use crate::command::St7735Command as Command;
use crate::config::{ColorOrder, St7735Config};
use crate::driver::{Controller, DisplayDriver};
use crate::interface::SpiInterface;
use crate::orientation::Orientation;
use crate::pixel::{Rgb565Format, buffer_size};

/// Panel width in pixels (native orientation)
pub const WIDTH: u8 = 128;
/// Panel height in pixels (native orientation)
pub const HEIGHT: u8 = 160;
/// Buffer length in 16-bit words
pub const BUFFER_ITEMS: usize = buffer_size::<Rgb565Format>(WIDTH, HEIGHT);

/// ST7735 behind a [`DisplayDriver`]
pub type St7735Display<I> = DisplayDriver<St7735<I>, BUFFER_ITEMS>;

/// Wait after the reset pulse
const RESET_WAKE_MS: u32 = 120;
/// Wait after SWRESET
const SOFTWARE_RESET_MS: u32 = 150;
/// Wait after SLPOUT
const SLEEP_OUT_MS: u32 = 255;
/// Wait after DISPON
const DISPLAY_ON_MS: u32 = 100;

/// COLMOD parameter for 16 bits per pixel
const COLOR_MODE_16BIT: u8 = 0x05;

mod madctl {
    /// Row address order
    pub const MY: u8 = 0x80;
    /// Column address order
    pub const MX: u8 = 0x40;
    /// Row/column exchange
    pub const MV: u8 = 0x20;
    /// BGR channel order
    pub const BGR: u8 = 0x08;
}

const fn orientation_bits(orientation: Orientation) -> u8 {
    match orientation {
        Orientation::Normal => 0,
        Orientation::MirrorX => madctl::MX,
        Orientation::MirrorY => madctl::MY,
        Orientation::Flip => madctl::MX | madctl::MY,
        Orientation::ClockWise => madctl::MX | madctl::MV,
        Orientation::CounterClockWise => madctl::MY | madctl::MV,
    }
}

const fn color_order_bits(order: ColorOrder) -> u8 {
    match order {
        ColorOrder::Rgb => 0,
        ColorOrder::Bgr => madctl::BGR,
    }
}

/// ST7735 controller
pub struct St7735<I> {
    interface: I,
    config: St7735Config,
    width: u8,
    height: u8,
    orientation: Orientation,
    madctl: u8,
}

impl<I> St7735<I>
where
    I: SpiInterface,
{
    /// Create a new controller
    ///
    /// The configured orientation is applied by `init()`; until then the logical
    /// dimensions are the native 128x160.
    pub fn new(interface: I, config: St7735Config) -> Self {
        Self {
            interface,
            config,
            width: WIDTH,
            height: HEIGHT,
            orientation: Orientation::Normal,
            madctl: color_order_bits(config.color_order),
        }
    }

    /// Configuration this controller was created with
    pub fn config(&self) -> &St7735Config {
        &self.config
    }

    /// Orientation last programmed
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Mode byte (MADCTL) last programmed
    pub fn madctl(&self) -> u8 {
        self.madctl
    }

    /// Turn the panel output on or off; RAM is kept
    pub fn set_power(&mut self, on: bool) {
        self.command(if on {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        });
    }

    /// Invert all colors on the panel without touching RAM
    pub fn invert(&mut self, invert: bool) {
        self.command(if invert {
            Command::InvertOn
        } else {
            Command::InvertOff
        });
    }

    /// Enter or leave sleep mode
    ///
    /// Leaving sleep blocks for the same wake-up time as `init()`.
    pub fn set_sleep<D: DelayNs>(&mut self, sleep: bool, delay: &mut D) {
        if sleep {
            self.command(Command::SleepIn);
        } else {
            self.command(Command::SleepOut);
            delay.delay_ms(SLEEP_OUT_MS);
        }
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.interface
    }

    fn command(&mut self, command: Command) {
        if let Err(e) = self.interface.send_command(command as u8) {
            log::warn!("st7735 command {:?} dropped: {:?}", command, e);
        }
    }

    fn command_with_data(&mut self, command: Command, data: &[u8]) {
        self.command(command);
        if let Err(e) = self.interface.send_data(data) {
            log::warn!("st7735 {:?} parameters dropped: {:?}", command, e);
        }
    }
}

impl<I> Controller for St7735<I>
where
    I: SpiInterface,
{
    type Format = Rgb565Format;
    type Error = Infallible;

    const PHYS_WIDTH: u8 = WIDTH;
    const PHYS_HEIGHT: u8 = HEIGHT;

    fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        log::debug!("st7735 init at {} Hz", self.config.spi_frequency_hz);
        if let Err(e) = self.interface.begin(self.config.spi_frequency_hz) {
            log::warn!("st7735 interface setup failed: {:?}", e);
        }

        self.interface.reset(delay);
        delay.delay_ms(RESET_WAKE_MS);

        self.command(Command::SoftwareReset);
        delay.delay_ms(SOFTWARE_RESET_MS);

        self.command(Command::SleepOut);
        delay.delay_ms(SLEEP_OUT_MS);

        self.command_with_data(Command::PixelFormat, &[COLOR_MODE_16BIT]);
        self.set_orientation(self.config.orientation);

        self.command(Command::DisplayOn);
        delay.delay_ms(DISPLAY_ON_MS);

        log::debug!("st7735 ready");
        Ok(())
    }

    fn width(&self) -> u8 {
        self.width
    }

    fn height(&self) -> u8 {
        self.height
    }

    fn send(&mut self, buffer: &[u16]) {
        log::debug!("st7735 frame: {} pixels", buffer.len());
        self.command(Command::MemoryWrite);
        if let Err(e) = self.interface.send_pixels(buffer) {
            log::warn!("st7735 frame dropped: {:?}", e);
        }
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        let madctl = color_order_bits(self.config.color_order) | orientation_bits(orientation);
        self.command_with_data(Command::MemoryAccessControl, &[madctl]);

        (self.width, self.height) = if madctl & madctl::MV == 0 {
            (WIDTH, HEIGHT)
        } else {
            (HEIGHT, WIDTH)
        };
        self.madctl = madctl;
        self.orientation = orientation;
        log::debug!(
            "st7735 orientation {:?}: madctl {:#04x}, {}x{}",
            orientation,
            madctl,
            self.width,
            self.height
        );

        self.command_with_data(Command::ColumnAddressSet, &[0, 0, 0, self.width - 1]);
        self.command_with_data(Command::RowAddressSet, &[0, 0, 0, self.height - 1]);
    }
}

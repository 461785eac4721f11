//! Hardware interface abstraction
//!
//! The controllers talk to their panels through two small traits:
//!
//! - [`I2cInterface`] for the SSD1306: open the bus, then write whole
//!   transmissions to a 7-bit address.
//! - [`SpiInterface`] for the ST7735: command bytes with DC low, parameters and
//!   pixels with DC high, each bracketed by its own chip-select assertion.
//!
//! [`I2cBus`] and [`SpiWire`] implement them on top of embedded-hal v1.0. Implement
//! the traits yourself for other transports or for testing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kf_display::{SpiInterface, SpiWire};
//! # use core::convert::Infallible;
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
//! // SPI bus plus chip-select, data/command and reset pins
//! let mut wire = SpiWire::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! let _ = wire.send_command(0x2C);
//! let _ = wire.send_pixels(&[0xF800, 0x07E0, 0x001F]);
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Transport used by the SSD1306 controller
pub trait I2cInterface {
    /// Error type for bus operations
    type Error: Debug;

    /// Open the bus
    ///
    /// # Errors
    ///
    /// Returns an error if the bus is not available.
    fn begin(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Write `bytes` as one transmission to `address`
    ///
    /// # Errors
    ///
    /// Returns an error if fewer bytes were accepted than given or the device
    /// ended the transmission with a non-zero status.
    fn write(&mut self, address: u8, bytes: &[u8]) -> InterfaceResult<(), Self::Error>;
}

/// Transport used by the ST7735 controller
pub trait SpiInterface {
    /// Error type for bus and pin operations
    type Error: Debug;

    /// Drive the control pins to their idle levels and apply the bus clock
    fn begin(&mut self, frequency_hz: u32) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line low for [`RESET_PULSE_MS`]
    ///
    /// The panel wake-up wait after the pulse belongs to the controller.
    fn reset<D: DelayNs>(&mut self, delay: &mut D);

    /// Send one command byte (DC low) inside its own chip-select bracket
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send parameter bytes (DC high) inside their own chip-select bracket
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send 16-bit pixels (DC high), most significant byte first, inside one
    /// chip-select bracket
    fn send_pixels(&mut self, pixels: &[u16]) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the SPI interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Width of the reset pulse in milliseconds
pub const RESET_PULSE_MS: u32 = 10;

/// Pixels staged per SPI write while streaming a frame
pub const PIXEL_CHUNK: usize = 32;

/// [`I2cInterface`] over an embedded-hal [`I2c`] bus
///
/// embedded-hal buses are configured by the HAL before they are handed over,
/// so [`I2cInterface::begin`] always succeeds here.
#[derive(Debug)]
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C>
where
    I2C: I2c,
{
    /// Wrap an I2C bus
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> I2cInterface for I2cBus<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn begin(&mut self) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, address: u8, bytes: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.i2c.write(address, bytes)
    }
}

/// [`SpiInterface`] over an embedded-hal [`SpiBus`] with manual chip select
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip-select pin (active low) implementing [`OutputPin`]
/// * `DC` - Data/Command pin (low=command, high=data) implementing [`OutputPin`]
/// * `RST` - Reset pin (active low) implementing [`OutputPin`]
#[derive(Debug)]
pub struct SpiWire<SPI, CS, DC, RST> {
    spi: SPI,
    cs: CS,
    dc: DC,
    rst: RST,
    /// Clock requested by the last `begin`
    frequency_hz: u32,
}

impl<SPI, CS, DC, RST> SpiWire<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SPI wire
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            frequency_hz: 0,
        }
    }

    /// Clock frequency requested by the controller, 0 before `begin`
    ///
    /// embedded-hal buses are clocked by the HAL; use this value when
    /// constructing the bus if it has to follow the controller configuration.
    pub fn frequency(&self) -> u32 {
        self.frequency_hz
    }

    /// Give the bus and pins back
    pub fn release(self) -> (SPI, CS, DC, RST) {
        (self.spi, self.cs, self.dc, self.rst)
    }
}

impl<SPI, CS, DC, RST, PinErr> SpiWire<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Select command or data mode, assert CS, run `transfer`, release CS
    ///
    /// CS is released even when the transfer fails.
    fn bracket<F>(
        &mut self,
        data_mode: bool,
        transfer: F,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        if data_mode {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
        } else {
            self.dc.set_low().map_err(InterfaceError::Pin)?;
        }
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        let result = transfer(&mut self.spi).and_then(|()| self.spi.flush());
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        result.map_err(InterfaceError::Spi)
    }
}

impl<SPI, CS, DC, RST, PinErr> SpiInterface for SpiWire<SPI, CS, DC, RST>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn begin(&mut self, frequency_hz: u32) -> InterfaceResult<(), Self::Error> {
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        self.frequency_hz = frequency_hz;
        log::debug!("spi wire ready at {} Hz", frequency_hz);
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) {
        let _ = self.rst.set_low();
        delay.delay_ms(RESET_PULSE_MS);
        let _ = self.rst.set_high();
    }

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.bracket(false, |spi| spi.write(&[command]))
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.bracket(true, |spi| spi.write(data))
    }

    fn send_pixels(&mut self, pixels: &[u16]) -> InterfaceResult<(), Self::Error> {
        self.bracket(true, |spi| {
            let mut staging = [0u8; PIXEL_CHUNK * 2];
            for chunk in pixels.chunks(PIXEL_CHUNK) {
                for (bytes, pixel) in staging.chunks_exact_mut(2).zip(chunk) {
                    bytes.copy_from_slice(&pixel.to_be_bytes());
                }
                spi.write(&staging[..chunk.len() * 2])?;
            }
            Ok(())
        })
    }
}

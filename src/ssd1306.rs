//! SSD1306 monochrome OLED controller
//!
//! 128x64 panel on I2C, 1 bit per pixel stored as 8 pages of 128 column bytes.
//!
//! ## Error contract
//!
//! `init()` fails fast: if the bus cannot be opened or the init block is not
//! accepted, it returns an [`Error`] and nothing else is sent. Every other write
//! (frame transfer, contrast, power, inversion, orientation) is fire-and-forget;
//! a rejected write is logged and otherwise ignored.
//!
//! ## Orientation
//!
//! The panel can mirror columns and rows but has no transpose register. The two
//! rotations are reduced to a mirror-only transform and the logical dimensions
//! always stay 128x64.
//!
//! ## Example
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
//! # let mut delay = MockDelay;
//! let config = match Ssd1306Builder::new().address(0x3C).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//! let mut display = Ssd1306Display::new(Ssd1306::new(I2cBus::new(MockI2c), config));
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//!
//! display.set_pixel(10, 20, BinaryColor::On);
//! display.controller_mut().set_contrast(0xCF);
//! display.set_orientation(Orientation::Flip);
//! display.send();
//! ```

use embedded_hal::delay::DelayNs;

use crate::command::{AddressingMode, Ssd1306Command as Command, control};
use crate::config::Ssd1306Config;
use crate::driver::{Controller, DisplayDriver};
use crate::error::Error;
use crate::interface::I2cInterface;
use crate::orientation::Orientation;
use crate::pixel::{Monochrome, buffer_size};

/// Panel width in pixels
pub const WIDTH: u8 = 128;
/// Panel height in pixels
pub const HEIGHT: u8 = 64;
/// Number of 8-pixel pages
pub const PAGES: u8 = (HEIGHT as usize).div_ceil(Monochrome::PAGE_HEIGHT) as u8;
/// Buffer length in bytes
pub const BUFFER_ITEMS: usize = buffer_size::<Monochrome>(WIDTH, HEIGHT);
/// Frame bytes per I2C transmission
pub const PACKET_SIZE: usize = 64;

/// SSD1306 behind a [`DisplayDriver`]
pub type Ssd1306Display<I> = DisplayDriver<Ssd1306<I>, BUFFER_ITEMS>;

/// COM pin configuration for the panel height: alternative for 64 rows, sequential otherwise
const COM_PINS: u8 = if HEIGHT == 64 { 0x12 } else { 0x02 };

const INIT_SEQUENCE: [u8; 19] = [
    control::COMMAND_STREAM,
    // Off while configuring
    Command::DisplayOff as u8,
    Command::ClockDivide as u8,
    0x80,
    // Internal charge pump
    Command::ChargePump as u8,
    0x14,
    Command::AddressingMode as u8,
    AddressingMode::Horizontal as u8,
    Command::Contrast as u8,
    0x7F,
    Command::VcomDetect as u8,
    0x40,
    // Unmirrored
    Command::SegmentRemapReversed as u8,
    Command::ComScanReversed as u8,
    Command::DisplayOn as u8,
    Command::ComPins as u8,
    COM_PINS,
    Command::Multiplex as u8,
    HEIGHT - 1,
];

/// `(mirror columns, mirror rows)` for each orientation
const fn mirror_bits(orientation: Orientation) -> (bool, bool) {
    match orientation {
        Orientation::Normal | Orientation::ClockWise => (false, false),
        Orientation::MirrorX | Orientation::CounterClockWise => (true, false),
        Orientation::MirrorY => (false, true),
        Orientation::Flip => (true, true),
    }
}

/// SSD1306 controller
///
/// Wrap it in [`Ssd1306Display`] to get the pixel buffer and the common driver
/// operations; reach the extras below through
/// [`DisplayDriver::controller_mut`].
#[derive(Debug)]
pub struct Ssd1306<I> {
    interface: I,
    config: Ssd1306Config,
    orientation: Orientation,
}

impl<I> Ssd1306<I>
where
    I: I2cInterface,
{
    /// Create a new controller
    pub fn new(interface: I, config: Ssd1306Config) -> Self {
        Self {
            interface,
            config,
            orientation: Orientation::Normal,
        }
    }

    /// I2C address in use
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Orientation last requested
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Set contrast (0-255)
    pub fn set_contrast(&mut self, value: u8) {
        self.transmit(&[control::COMMAND_STREAM, Command::Contrast as u8, value]);
    }

    /// Turn the panel on or off; RAM is kept
    pub fn set_power(&mut self, on: bool) {
        self.send_command(if on {
            Command::DisplayOn
        } else {
            Command::DisplayOff
        });
    }

    /// Invert all pixels on the panel without touching RAM
    pub fn invert(&mut self, invert: bool) {
        self.send_command(if invert {
            Command::InvertDisplay
        } else {
            Command::NormalDisplay
        });
    }

    /// Give the interface back
    pub fn release(self) -> I {
        self.interface
    }

    fn send_command(&mut self, command: Command) {
        self.transmit(&[control::SINGLE_COMMAND, command as u8]);
    }

    fn transmit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.interface.write(self.config.address, bytes) {
            log::warn!("ssd1306 write to {:#04x} rejected: {:?}", self.config.address, e);
        }
    }
}

impl<I> Controller for Ssd1306<I>
where
    I: I2cInterface,
{
    type Format = Monochrome;
    type Error = Error<I>;

    const PHYS_WIDTH: u8 = WIDTH;
    const PHYS_HEIGHT: u8 = HEIGHT;

    fn init<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        log::debug!("ssd1306 init at {:#04x}", self.config.address);
        self.interface.begin().map_err(Error::BusUnavailable)?;
        self.interface
            .write(self.config.address, &INIT_SEQUENCE)
            .map_err(Error::TransmissionRejected)?;
        self.orientation = Orientation::Normal;
        log::debug!("ssd1306 ready");
        Ok(())
    }

    fn width(&self) -> u8 {
        WIDTH
    }

    fn height(&self) -> u8 {
        HEIGHT
    }

    fn send(&mut self, buffer: &[u8]) {
        log::debug!("ssd1306 frame: {} bytes", buffer.len());
        self.transmit(&[
            control::COMMAND_STREAM,
            Command::ColumnAddress as u8,
            0,
            WIDTH - 1,
            Command::PageAddress as u8,
            0,
            PAGES - 1,
        ]);

        let mut packet = [0u8; PACKET_SIZE + 1];
        packet[0] = control::DATA_STREAM;
        for chunk in buffer.chunks(PACKET_SIZE) {
            packet[1..=chunk.len()].copy_from_slice(chunk);
            self.transmit(&packet[..=chunk.len()]);
        }
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        let (mirror_x, mirror_y) = mirror_bits(orientation);
        log::debug!(
            "ssd1306 orientation {:?} (mirror x: {}, mirror y: {})",
            orientation,
            mirror_x,
            mirror_y
        );
        self.send_command(if mirror_x {
            Command::SegmentRemapNormal
        } else {
            Command::SegmentRemapReversed
        });
        self.send_command(if mirror_y {
            Command::ComScanNormal
        } else {
            Command::ComScanReversed
        });
        self.orientation = orientation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics_core::pixelcolor::BinaryColor;

    #[derive(Debug, PartialEq)]
    struct Nack;

    #[derive(Debug, Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail_begin: bool,
        reject_all: bool,
    }

    impl I2cInterface for MockI2c {
        type Error = Nack;

        fn begin(&mut self) -> Result<(), Self::Error> {
            if self.fail_begin { Err(Nack) } else { Ok(()) }
        }

        fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
            self.writes.push((address, bytes.to_vec()));
            if self.reject_all { Err(Nack) } else { Ok(()) }
        }
    }

    struct MockDelay;
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn test_display(interface: MockI2c) -> Ssd1306Display<MockI2c> {
        Ssd1306Display::new(Ssd1306::new(interface, Ssd1306Config::default()))
    }

    fn writes(display: &Ssd1306Display<MockI2c>) -> &[(u8, Vec<u8>)] {
        &display.controller().interface.writes
    }

    #[test]
    fn test_init_sends_documented_sequence() {
        let mut display = test_display(MockI2c::default());
        assert!(display.init(&mut MockDelay).is_ok());
        assert_eq!(
            writes(&display),
            &[(
                0x3C,
                vec![
                    0x00, 0xAE, 0xD5, 0x80, 0x8D, 0x14, 0x20, 0x00, 0x81, 0x7F, 0xDB, 0x40, 0xA1,
                    0xC8, 0xAF, 0xDA, 0x12, 0xA8, 0x3F,
                ]
            )]
        );
    }

    #[test]
    fn test_init_bus_unavailable() {
        let mut display = test_display(MockI2c {
            fail_begin: true,
            ..MockI2c::default()
        });
        let result = display.init(&mut MockDelay);
        assert!(matches!(result, Err(Error::BusUnavailable(Nack))));
        assert!(writes(&display).is_empty());
    }

    #[test]
    fn test_init_rejected_stops_after_failing_write() {
        let mut display = test_display(MockI2c {
            reject_all: true,
            ..MockI2c::default()
        });
        let result = display.init(&mut MockDelay);
        assert!(matches!(result, Err(Error::TransmissionRejected(Nack))));
        assert_eq!(writes(&display).len(), 1);
    }

    #[test]
    fn test_init_uses_configured_address() {
        let interface = MockI2c::default();
        let config = Ssd1306Config { address: 0x3D };
        let mut display = Ssd1306Display::new(Ssd1306::new(interface, config));
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.controller().address(), 0x3D);
        assert!(writes(&display).iter().all(|(address, _)| *address == 0x3D));
    }

    #[test]
    fn test_send_sets_window_then_streams_packets() {
        let mut display = test_display(MockI2c::default());
        for (i, byte) in display.buffer().iter_mut().enumerate() {
            *byte = (i % 251) as u8;
        }
        let frame = display.buffer_ref().to_vec();

        display.send();

        let writes = writes(&display);
        assert_eq!(
            writes[0].1,
            vec![0x00, 0x21, 0x00, 0x7F, 0x22, 0x00, 0x07]
        );
        assert_eq!(writes.len(), 1 + BUFFER_ITEMS / PACKET_SIZE);

        let mut streamed = Vec::new();
        for (_, packet) in &writes[1..] {
            assert_eq!(packet[0], 0x40);
            assert_eq!(packet.len(), PACKET_SIZE + 1);
            streamed.extend_from_slice(&packet[1..]);
        }
        assert_eq!(streamed, frame);
        assert_eq!(display.buffer_ref(), frame.as_slice());
    }

    #[test]
    fn test_send_is_fire_and_forget() {
        let mut display = test_display(MockI2c {
            reject_all: true,
            ..MockI2c::default()
        });
        display.send();
        assert_eq!(writes(&display).len(), 1 + BUFFER_ITEMS / PACKET_SIZE);
    }

    fn orientation_registers(orientation: Orientation) -> Vec<Vec<u8>> {
        let mut display = test_display(MockI2c::default());
        display.set_orientation(orientation);
        assert_eq!((display.width(), display.height()), (128, 64));
        assert_eq!((display.max_x(), display.max_y()), (127, 63));
        writes(&display).iter().map(|(_, bytes)| bytes.clone()).collect()
    }

    #[test]
    fn test_orientation_mirror_registers() {
        assert_eq!(
            orientation_registers(Orientation::Normal),
            vec![vec![0x80, 0xA1], vec![0x80, 0xC8]]
        );
        assert_eq!(
            orientation_registers(Orientation::MirrorX),
            vec![vec![0x80, 0xA0], vec![0x80, 0xC8]]
        );
        assert_eq!(
            orientation_registers(Orientation::MirrorY),
            vec![vec![0x80, 0xA1], vec![0x80, 0xC0]]
        );
        assert_eq!(
            orientation_registers(Orientation::Flip),
            vec![vec![0x80, 0xA0], vec![0x80, 0xC0]]
        );
    }

    #[test]
    fn test_rotation_degrades_to_mirror() {
        assert_eq!(
            orientation_registers(Orientation::ClockWise),
            orientation_registers(Orientation::Normal)
        );
        assert_eq!(
            orientation_registers(Orientation::CounterClockWise),
            orientation_registers(Orientation::MirrorX)
        );
    }

    #[test]
    fn test_orientation_is_remembered() {
        let mut display = test_display(MockI2c::default());
        display.set_orientation(Orientation::ClockWise);
        assert_eq!(display.controller().orientation(), Orientation::ClockWise);
        display.init(&mut MockDelay).unwrap();
        assert_eq!(display.controller().orientation(), Orientation::Normal);
    }

    #[test]
    fn test_extra_commands() {
        let mut display = test_display(MockI2c::default());
        let controller = display.controller_mut();
        controller.set_contrast(0x42);
        controller.set_power(false);
        controller.set_power(true);
        controller.invert(true);
        controller.invert(false);

        let bytes: Vec<Vec<u8>> = writes(&display)
            .iter()
            .map(|(_, bytes)| bytes.clone())
            .collect();
        assert_eq!(
            bytes,
            vec![
                vec![0x00, 0x81, 0x42],
                vec![0x80, 0xAE],
                vec![0x80, 0xAF],
                vec![0x80, 0xA7],
                vec![0x80, 0xA6],
            ]
        );
    }

    #[test]
    fn test_pixel_lands_in_page_layout() {
        let mut display = test_display(MockI2c::default());
        display.set_pixel(5, 10, BinaryColor::On);
        assert_eq!(display.buffer_ref()[128 + 5], 0b0000_0100);
        assert_eq!(display.pixel(5, 10), Some(BinaryColor::On));
    }

    #[test]
    fn test_buffer_geometry() {
        assert_eq!(BUFFER_ITEMS, 1024);
        assert_eq!(PAGES, 8);
        assert_eq!(Ssd1306Display::<MockI2c>::MAX_PHYS_X, 127);
        assert_eq!(Ssd1306Display::<MockI2c>::MAX_PHYS_Y, 63);
    }
}

//! Controller command sets
//!
//! Each controller has its own closed opcode enumeration. The opcode spaces are
//! unrelated, so nothing here is shared between [`Ssd1306Command`] and
//! [`St7735Command`].
//!
//! ## SSD1306 framing
//!
//! Every I2C transmission starts with a control byte:
//! - [`control::COMMAND_STREAM`] (0x00): all following bytes are commands and their parameters
//! - [`control::SINGLE_COMMAND`] (0x80): exactly one command byte follows
//! - [`control::DATA_STREAM`] (0x40): all following bytes are display RAM data
//!
//! ## ST7735 framing
//!
//! Commands are sent with DC low, parameters and pixel data with DC high, each
//! bracketed by its own chip-select assertion.
//!
//! ## Example
//!
//! ```
//! use kf_display::command::{Ssd1306Command, St7735Command};
//!
//! assert_eq!(Ssd1306Command::DisplayOn as u8, 0xAF);
//! assert_eq!(St7735Command::MemoryWrite as u8, 0x2C);
//! ```

/// SSD1306 control bytes
pub mod control {
    /// Command stream follows
    pub const COMMAND_STREAM: u8 = 0x00;
    /// One command byte follows
    pub const SINGLE_COMMAND: u8 = 0x80;
    /// Display RAM data stream follows
    pub const DATA_STREAM: u8 = 0x40;
}

/// SSD1306 opcodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Ssd1306Command {
    /// Panel off (sleep)
    DisplayOff = 0xAE,
    /// Panel on
    DisplayOn = 0xAF,
    /// Memory addressing mode, 1 parameter ([`AddressingMode`])
    AddressingMode = 0x20,
    /// Column address window, 2 parameters: start, end
    ColumnAddress = 0x21,
    /// Page address window, 2 parameters: start, end
    PageAddress = 0x22,
    /// Contrast, 1 parameter: 0-255
    Contrast = 0x81,
    /// Charge pump setting, 1 parameter (0x14 enables)
    ChargePump = 0x8D,
    /// Segment remap with column 127 mapped to SEG0 (unmirrored X for this driver)
    SegmentRemapReversed = 0xA1,
    /// Segment remap with column 0 mapped to SEG0 (mirrored X for this driver)
    SegmentRemapNormal = 0xA0,
    /// Show RAM contents as stored
    NormalDisplay = 0xA6,
    /// Show RAM contents inverted
    InvertDisplay = 0xA7,
    /// Multiplex ratio, 1 parameter: rows - 1
    Multiplex = 0xA8,
    /// COM scan from COM[N-1] to COM0 (unmirrored Y for this driver)
    ComScanReversed = 0xC8,
    /// COM scan from COM0 to COM[N-1] (mirrored Y for this driver)
    ComScanNormal = 0xC0,
    /// Display clock divide ratio and oscillator frequency, 1 parameter
    ClockDivide = 0xD5,
    /// COM pins hardware configuration, 1 parameter
    ComPins = 0xDA,
    /// VCOMH deselect level, 1 parameter
    VcomDetect = 0xDB,
}

/// SSD1306 memory addressing modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AddressingMode {
    /// Column pointer wraps to the next page at the end of the window
    #[default]
    Horizontal = 0x00,
    /// Page pointer wraps to the next column at the end of the window
    Vertical = 0x01,
}

/// ST7735 opcodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum St7735Command {
    /// Software reset
    SoftwareReset = 0x01,
    /// Enter sleep mode
    SleepIn = 0x10,
    /// Leave sleep mode
    SleepOut = 0x11,
    /// Display inversion off
    InvertOff = 0x20,
    /// Display inversion on
    InvertOn = 0x21,
    /// Display off
    DisplayOff = 0x28,
    /// Display on
    DisplayOn = 0x29,
    /// Column address window, 4 parameters: start (MSB, LSB), end (MSB, LSB)
    ColumnAddressSet = 0x2A,
    /// Row address window, 4 parameters: start (MSB, LSB), end (MSB, LSB)
    RowAddressSet = 0x2B,
    /// Write pixel data into the current window
    MemoryWrite = 0x2C,
    /// Memory data access control (MADCTL), 1 parameter
    MemoryAccessControl = 0x36,
    /// Interface pixel format (COLMOD), 1 parameter
    PixelFormat = 0x3A,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssd1306_opcodes() {
        assert_eq!(Ssd1306Command::DisplayOff as u8, 0xAE);
        assert_eq!(Ssd1306Command::ClockDivide as u8, 0xD5);
        assert_eq!(Ssd1306Command::ChargePump as u8, 0x8D);
        assert_eq!(Ssd1306Command::SegmentRemapReversed as u8, 0xA1);
        assert_eq!(Ssd1306Command::ComScanReversed as u8, 0xC8);
        assert_eq!(Ssd1306Command::Multiplex as u8, 0xA8);
        assert_eq!(AddressingMode::Horizontal as u8, 0x00);
    }

    #[test]
    fn test_st7735_opcodes() {
        assert_eq!(St7735Command::SoftwareReset as u8, 0x01);
        assert_eq!(St7735Command::SleepOut as u8, 0x11);
        assert_eq!(St7735Command::ColumnAddressSet as u8, 0x2A);
        assert_eq!(St7735Command::RowAddressSet as u8, 0x2B);
        assert_eq!(St7735Command::MemoryAccessControl as u8, 0x36);
        assert_eq!(St7735Command::PixelFormat as u8, 0x3A);
    }
}

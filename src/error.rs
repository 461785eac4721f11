//! Error types for the drivers
//!
//! - [`Error`] - bring-up failures of the SSD1306 ([`Ssd1306`](crate::ssd1306::Ssd1306))
//! - [`BuilderError`] - invalid configuration values
//! - [`InterfaceError`](crate::interface::InterfaceError) - SPI/GPIO failures of the SPI wire adapter
//!
//! The ST7735 driver reports no errors from `init()`; its
//! [`Controller::Error`](crate::driver::Controller::Error) is
//! [`Infallible`](core::convert::Infallible).
//!
//! ## Example
//!
//! ```
//! use kf_display::{BuilderError, Ssd1306Builder};
//!
//! // 0x80 is not a 7-bit I2C address
//! let result = Ssd1306Builder::new().address(0x80).build();
//! assert!(matches!(result, Err(BuilderError::InvalidAddress { address: 0x80 })));
//! ```

use crate::interface::I2cInterface;

/// Errors reported by SSD1306 initialization
///
/// Generic over the interface type to preserve the underlying bus error.
#[derive(Debug)]
pub enum Error<I: I2cInterface> {
    /// The bus could not be opened
    BusUnavailable(I::Error),
    /// The controller did not accept a transmission
    ///
    /// Covers short writes and a non-zero end-of-transmission status.
    TransmissionRejected(I::Error),
}

impl<I: I2cInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BusUnavailable(e) => write!(f, "Bus unavailable: {e:?}"),
            Self::TransmissionRejected(e) => write!(f, "Transmission rejected: {e:?}"),
        }
    }
}

impl<I: I2cInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Address does not fit in 7 bits
    InvalidAddress {
        /// Requested address
        address: u8,
    },
    /// SPI clock frequency of zero
    InvalidFrequency {
        /// Requested frequency in Hz
        hz: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidAddress { address } => {
                write!(f, "Invalid I2C address {address:#04x} (must be 7-bit)")
            }
            Self::InvalidFrequency { hz } => write!(f, "Invalid SPI frequency: {hz} Hz"),
        }
    }
}

impl core::error::Error for BuilderError {}

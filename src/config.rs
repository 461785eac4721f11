//! Controller configuration types and builders
//!
//! Configurations are immutable snapshots owned by the controller they are
//! passed to.

use crate::error::BuilderError;
use crate::orientation::Orientation;

/// Default SSD1306 I2C address
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Default ST7735 SPI clock in Hz
pub const DEFAULT_SPI_FREQUENCY_HZ: u32 = 27_000_000;

/// Order of the red and blue channels in the ST7735 panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red in the high bits
    Rgb,
    /// Blue in the high bits (most ST7735 modules)
    #[default]
    Bgr,
}

/// SSD1306 configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ssd1306Config {
    /// 7-bit I2C address
    pub address: u8,
}

impl Default for Ssd1306Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_I2C_ADDRESS,
        }
    }
}

/// ST7735 configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct St7735Config {
    /// Orientation applied during `init()`
    pub orientation: Orientation,
    /// SPI clock in Hz
    pub spi_frequency_hz: u32,
    /// Channel order of the panel
    pub color_order: ColorOrder,
}

impl Default for St7735Config {
    fn default() -> Self {
        Self {
            orientation: Orientation::Normal,
            spi_frequency_hz: DEFAULT_SPI_FREQUENCY_HZ,
            color_order: ColorOrder::Bgr,
        }
    }
}

/// Builder for [`Ssd1306Config`]
///
/// # Example
///
/// ```
/// use kf_display::Ssd1306Builder;
///
/// let config = match Ssd1306Builder::new().address(0x3D).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.address, 0x3D);
/// ```
#[must_use]
#[derive(Debug, Default)]
pub struct Ssd1306Builder {
    config: Ssd1306Config,
}

impl Ssd1306Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the I2C address
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidAddress` if the address does not fit in 7 bits
    pub fn build(self) -> Result<Ssd1306Config, BuilderError> {
        let address = self.config.address;
        if address > 0x7F {
            return Err(BuilderError::InvalidAddress { address });
        }
        Ok(self.config)
    }
}

/// Builder for [`St7735Config`]
///
/// # Example
///
/// ```
/// use kf_display::{Orientation, St7735Builder};
///
/// let config = match St7735Builder::new()
///     .orientation(Orientation::ClockWise)
///     .spi_frequency(16_000_000)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.orientation, Orientation::ClockWise);
/// ```
#[must_use]
#[derive(Debug, Default)]
pub struct St7735Builder {
    config: St7735Config,
}

impl St7735Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the orientation applied during `init()`
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Set the SPI clock in Hz
    pub fn spi_frequency(mut self, hz: u32) -> Self {
        self.config.spi_frequency_hz = hz;
        self
    }

    /// Set the panel channel order
    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.config.color_order = order;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidFrequency` if the SPI clock is zero
    pub fn build(self) -> Result<St7735Config, BuilderError> {
        let hz = self.config.spi_frequency_hz;
        if hz == 0 {
            return Err(BuilderError::InvalidFrequency { hz });
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssd1306_defaults() {
        let config = Ssd1306Builder::new().build().unwrap();
        assert_eq!(config.address, DEFAULT_I2C_ADDRESS);
        assert_eq!(config, Ssd1306Config::default());
    }

    #[test]
    fn test_ssd1306_rejects_eight_bit_address() {
        let result = Ssd1306Builder::new().address(0x78).build();
        assert!(result.is_ok());
        let result = Ssd1306Builder::new().address(0xF0).build();
        assert_eq!(result, Err(BuilderError::InvalidAddress { address: 0xF0 }));
    }

    #[test]
    fn test_st7735_defaults() {
        let config = St7735Builder::new().build().unwrap();
        assert_eq!(config.orientation, Orientation::Normal);
        assert_eq!(config.spi_frequency_hz, 27_000_000);
        assert_eq!(config.color_order, ColorOrder::Bgr);
    }

    #[test]
    fn test_st7735_rejects_zero_frequency() {
        let result = St7735Builder::new().spi_frequency(0).build();
        assert_eq!(result, Err(BuilderError::InvalidFrequency { hz: 0 }));
    }

    #[test]
    fn test_st7735_builder_sets_all_fields() {
        let config = St7735Builder::new()
            .orientation(Orientation::CounterClockWise)
            .spi_frequency(8_000_000)
            .color_order(ColorOrder::Rgb)
            .build()
            .unwrap();
        assert_eq!(
            config,
            St7735Config {
                orientation: Orientation::CounterClockWise,
                spi_frequency_hz: 8_000_000,
                color_order: ColorOrder::Rgb,
            }
        );
    }
}

//! Pixel formats and buffer geometry
//!
//! A [`PixelFormat`] describes how a controller stores pixels in its software
//! buffer: the storage word, the color callers draw with, and how many pixels
//! share one word. Buffer sizes are derived from it at compile time with
//! [`buffer_size`].
//!
//! ## Layouts
//!
//! | Format | Word | Color | Layout |
//! |--------|------|-------|--------|
//! | [`Monochrome`] | `u8` | [`BinaryColor`] | 8 vertically stacked pixels per word ("page"), LSB on top |
//! | [`Rgb565Format`] | `u16` | [`Rgb565`] | one pixel per word, row-major |
//!
//! ## Example
//!
//! ```
//! use kf_display::pixel::{buffer_size, Monochrome, Rgb565Format};
//!
//! // 128 columns x 8 pages
//! assert_eq!(buffer_size::<Monochrome>(128, 64), 1024);
//! // one word per pixel
//! assert_eq!(buffer_size::<Rgb565Format>(128, 160), 20_480);
//! ```

use core::fmt::Debug;

use embedded_graphics_core::pixelcolor::raw::RawU16;
use embedded_graphics_core::pixelcolor::{BinaryColor, IntoStorage, Rgb565};

/// Storage policy for one pixel format
///
/// Implemented by zero-sized marker types. A controller names its format through
/// [`Controller::Format`](crate::driver::Controller::Format); a type that does not
/// implement this trait cannot be used as a format.
pub trait PixelFormat {
    /// Storage word of the pixel buffer
    type Word: Copy + Default + PartialEq + Debug;

    /// Color value visible to callers
    type Color: Copy;

    /// Number of pixels packed into one word along the vertical axis
    const PIXELS_PER_WORD: usize;

    /// Write one pixel into `buffer`, where `stride` is the logical row width in pixels
    ///
    /// Coordinates that fall outside the buffer are ignored.
    fn set_pixel(buffer: &mut [Self::Word], stride: usize, x: usize, y: usize, color: Self::Color);

    /// Read one pixel back, or `None` if the coordinate is outside the buffer
    fn pixel(buffer: &[Self::Word], stride: usize, x: usize, y: usize) -> Option<Self::Color>;

    /// Word value that paints every pixel it covers with `color`
    fn fill_word(color: Self::Color) -> Self::Word;
}

/// Number of buffer words needed for a `width` x `height` panel in format `F`
///
/// `width * ceil(height / F::PIXELS_PER_WORD)`, evaluated at compile time when
/// used in a const context.
pub const fn buffer_size<F: PixelFormat>(width: u8, height: u8) -> usize {
    width as usize * (height as usize).div_ceil(F::PIXELS_PER_WORD)
}

/// 1 bit per pixel, packed vertically into bytes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Monochrome;

impl Monochrome {
    /// Pixels per page (bits in a storage word)
    pub const PAGE_HEIGHT: usize = u8::BITS as usize;

    fn locate(stride: usize, x: usize, y: usize) -> (usize, u8) {
        (x + (y / Self::PAGE_HEIGHT) * stride, 1 << (y % Self::PAGE_HEIGHT))
    }
}

impl PixelFormat for Monochrome {
    type Word = u8;
    type Color = BinaryColor;

    const PIXELS_PER_WORD: usize = Self::PAGE_HEIGHT;

    fn set_pixel(buffer: &mut [u8], stride: usize, x: usize, y: usize, color: BinaryColor) {
        let (index, mask) = Self::locate(stride, x, y);
        if let Some(word) = buffer.get_mut(index) {
            match color {
                BinaryColor::On => *word |= mask,
                BinaryColor::Off => *word &= !mask,
            }
        }
    }

    fn pixel(buffer: &[u8], stride: usize, x: usize, y: usize) -> Option<BinaryColor> {
        let (index, mask) = Self::locate(stride, x, y);
        buffer.get(index).map(|word| {
            if word & mask != 0 {
                BinaryColor::On
            } else {
                BinaryColor::Off
            }
        })
    }

    fn fill_word(color: BinaryColor) -> u8 {
        match color {
            BinaryColor::On => 0xFF,
            BinaryColor::Off => 0x00,
        }
    }
}

/// 16-bit RGB565, one pixel per word
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb565Format;

impl PixelFormat for Rgb565Format {
    type Word = u16;
    type Color = Rgb565;

    const PIXELS_PER_WORD: usize = 1;

    fn set_pixel(buffer: &mut [u16], stride: usize, x: usize, y: usize, color: Rgb565) {
        if let Some(word) = buffer.get_mut(y * stride + x) {
            *word = color.into_storage();
        }
    }

    fn pixel(buffer: &[u16], stride: usize, x: usize, y: usize) -> Option<Rgb565> {
        buffer
            .get(y * stride + x)
            .map(|word| Rgb565::from(RawU16::new(*word)))
    }

    fn fill_word(color: Rgb565) -> u16 {
        color.into_storage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics_core::pixelcolor::RgbColor;

    #[test]
    fn test_monochrome_buffer_size_rounds_pages_up() {
        for width in 1..=40u8 {
            for height in 1..=40u8 {
                let pages = (height as usize + 7) / 8;
                assert_eq!(
                    buffer_size::<Monochrome>(width, height),
                    width as usize * pages
                );
            }
        }
        assert_eq!(buffer_size::<Monochrome>(128, 64), 1024);
        assert_eq!(buffer_size::<Monochrome>(128, 60), 1024);
        assert_eq!(buffer_size::<Monochrome>(128, 65), 1152);
    }

    #[test]
    fn test_color_buffer_size_is_one_word_per_pixel() {
        for width in 1..=40u8 {
            for height in 1..=40u8 {
                assert_eq!(
                    buffer_size::<Rgb565Format>(width, height),
                    width as usize * height as usize
                );
            }
        }
        assert_eq!(buffer_size::<Rgb565Format>(128, 160), 20_480);
    }

    #[test]
    fn test_buffer_size_is_const() {
        const ITEMS: usize = buffer_size::<Monochrome>(128, 32);
        let buffer = [0u8; ITEMS];
        assert_eq!(buffer.len(), 512);
    }

    #[test]
    fn test_monochrome_page_layout() {
        let mut buffer = [0u8; 16];
        // 8 columns x 2 pages
        Monochrome::set_pixel(&mut buffer, 8, 0, 0, BinaryColor::On);
        assert_eq!(buffer[0], 0x01);

        Monochrome::set_pixel(&mut buffer, 8, 0, 7, BinaryColor::On);
        assert_eq!(buffer[0], 0x81);

        Monochrome::set_pixel(&mut buffer, 8, 3, 9, BinaryColor::On);
        assert_eq!(buffer[8 + 3], 0x02);

        Monochrome::set_pixel(&mut buffer, 8, 0, 0, BinaryColor::Off);
        assert_eq!(buffer[0], 0x80);

        assert_eq!(Monochrome::pixel(&buffer, 8, 0, 7), Some(BinaryColor::On));
        assert_eq!(Monochrome::pixel(&buffer, 8, 1, 7), Some(BinaryColor::Off));
    }

    #[test]
    fn test_monochrome_out_of_range_is_ignored() {
        let mut buffer = [0u8; 8];
        Monochrome::set_pixel(&mut buffer, 8, 0, 8, BinaryColor::On);
        assert_eq!(buffer, [0u8; 8]);
        assert_eq!(Monochrome::pixel(&buffer, 8, 0, 8), None);
    }

    #[test]
    fn test_rgb565_row_major_layout() {
        let mut buffer = [0u16; 12];
        // 4 columns x 3 rows
        Rgb565Format::set_pixel(&mut buffer, 4, 1, 2, Rgb565::RED);
        assert_eq!(buffer[2 * 4 + 1], 0xF800);
        assert_eq!(Rgb565Format::pixel(&buffer, 4, 1, 2), Some(Rgb565::RED));
        assert_eq!(Rgb565Format::pixel(&buffer, 4, 0, 3), None);
    }

    #[test]
    fn test_fill_words() {
        assert_eq!(Monochrome::fill_word(BinaryColor::On), 0xFF);
        assert_eq!(Monochrome::fill_word(BinaryColor::Off), 0x00);
        assert_eq!(Rgb565Format::fill_word(Rgb565::WHITE), 0xFFFF);
        assert_eq!(Rgb565Format::fill_word(Rgb565::BLUE), 0x001F);
    }
}

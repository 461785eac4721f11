//! Generic display driver
//!
//! [`DisplayDriver`] is the common front of every controller. It owns the pixel
//! buffer, derives the physical geometry from the controller at compile time and
//! forwards the lifecycle operations to the concrete [`Controller`] through static
//! dispatch. Controllers never own a buffer; they receive it by shared reference
//! in [`Controller::send`].
//!
//! ## Lifecycle
//!
//! 1. Construct the controller with its interface and configuration
//! 2. Wrap it with [`DisplayDriver::new`] (buffer is zeroed)
//! 3. [`DisplayDriver::init`]
//! 4. Draw into [`DisplayDriver::buffer`] or with [`DisplayDriver::set_pixel`]
//! 5. [`DisplayDriver::send`]
//! 6. Optionally [`DisplayDriver::set_orientation`] at any time after `init`

use embedded_hal::delay::DelayNs;

use crate::orientation::Orientation;
use crate::pixel::{PixelFormat, buffer_size};

/// Storage word of a controller's pixel format
pub type Word<C> = <<C as Controller>::Format as PixelFormat>::Word;

/// Caller-visible color of a controller's pixel format
pub type Color<C> = <<C as Controller>::Format as PixelFormat>::Color;

/// Operations every display controller provides
///
/// These are called by [`DisplayDriver`]; a controller that leaves one out does
/// not compile.
pub trait Controller {
    /// Pixel format of the software buffer
    type Format: PixelFormat;

    /// Error reported by [`Controller::init`]
    type Error;

    /// Physical panel width in pixels
    const PHYS_WIDTH: u8;

    /// Physical panel height in pixels
    const PHYS_HEIGHT: u8;

    /// Bring the panel up
    ///
    /// Must succeed before the buffer is sent.
    fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Current logical width (after orientation)
    fn width(&self) -> u8;

    /// Current logical height (after orientation)
    fn height(&self) -> u8;

    /// Transfer the whole buffer to the panel, blocking until done
    fn send(&mut self, buffer: &[Word<Self>]);

    /// Reprogram the panel for `orientation`
    fn set_orientation(&mut self, orientation: Orientation);
}

/// Display driver owning the pixel buffer of controller `C`
///
/// `N` is the buffer length in words and must equal
/// [`buffer_size`]`::<C::Format>(C::PHYS_WIDTH, C::PHYS_HEIGHT)`. Each controller
/// module exports an alias with the right value, such as
/// [`Ssd1306Display`](crate::ssd1306::Ssd1306Display).
pub struct DisplayDriver<C: Controller, const N: usize> {
    controller: C,
    buffer: [Word<C>; N],
}

impl<C: Controller, const N: usize> DisplayDriver<C, N> {
    /// Physical width in pixels
    pub const PHYS_WIDTH: u8 = C::PHYS_WIDTH;
    /// Largest physical column index
    pub const MAX_PHYS_X: u8 = C::PHYS_WIDTH - 1;
    /// Physical height in pixels
    pub const PHYS_HEIGHT: u8 = C::PHYS_HEIGHT;
    /// Largest physical row index
    pub const MAX_PHYS_Y: u8 = C::PHYS_HEIGHT - 1;
    /// Buffer length in words
    pub const BUFFER_ITEMS: usize = N;

    const GEOMETRY: () = {
        assert!(
            C::PHYS_WIDTH > 0 && C::PHYS_HEIGHT > 0,
            "panel dimensions must be non-zero"
        );
        assert!(
            N == buffer_size::<C::Format>(C::PHYS_WIDTH, C::PHYS_HEIGHT),
            "buffer length does not match the panel geometry"
        );
    };

    /// Wrap `controller` and allocate its zeroed buffer
    ///
    /// A buffer length that does not match the controller geometry is a
    /// compile-time error:
    ///
    /// ```compile_fail
    /// use kf_display::{I2cBus, Ssd1306, DisplayDriver};
    /// # use core::convert::Infallible;
    /// # use embedded_hal::i2c::{I2c, Operation};
    /// # struct MockI2c;
    /// # impl embedded_hal::i2c::ErrorType for MockI2c { type Error = Infallible; }
    /// # impl I2c for MockI2c {
    /// #     fn transaction(&mut self, _a: u8, _o: &mut [Operation<'_>]) -> Result<(), Self::Error> { Ok(()) }
    /// # }
    /// let controller = Ssd1306::new(I2cBus::new(MockI2c), Default::default());
    /// // 128x64 monochrome needs 1024 bytes
    /// let _driver: DisplayDriver<_, 1000> = DisplayDriver::new(controller);
    /// ```
    pub fn new(controller: C) -> Self {
        let () = Self::GEOMETRY;
        Self {
            controller,
            buffer: [<Word<C> as Default>::default(); N],
        }
    }

    /// Initialize the panel
    ///
    /// Must be called before the first [`send`](Self::send).
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), C::Error> {
        self.controller.init(delay)
    }

    /// Logical width in pixels
    pub fn width(&self) -> u8 {
        self.controller.width()
    }

    /// Logical height in pixels
    pub fn height(&self) -> u8 {
        self.controller.height()
    }

    /// Largest logical column index
    pub fn max_x(&self) -> u8 {
        self.width() - 1
    }

    /// Largest logical row index
    pub fn max_y(&self) -> u8 {
        self.height() - 1
    }

    /// Transfer the buffer to the panel
    ///
    /// Blocks until the whole buffer is written. The buffer is not modified.
    pub fn send(&mut self) {
        self.controller.send(&self.buffer);
    }

    /// Change the orientation
    ///
    /// May change the logical dimensions; the buffer length never changes.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.controller.set_orientation(orientation);
    }

    /// Mutable view over the whole buffer
    pub fn buffer(&mut self) -> &mut [Word<C>] {
        &mut self.buffer
    }

    /// Read-only view over the whole buffer
    pub fn buffer_ref(&self) -> &[Word<C>] {
        &self.buffer
    }

    /// Set one pixel in logical coordinates
    ///
    /// Pixels outside the logical dimensions are ignored.
    pub fn set_pixel(&mut self, x: u8, y: u8, color: Color<C>) {
        let width = self.width();
        if x >= width || y >= self.height() {
            return;
        }
        C::Format::set_pixel(&mut self.buffer, width.into(), x.into(), y.into(), color);
    }

    /// Read one pixel in logical coordinates
    pub fn pixel(&self, x: u8, y: u8) -> Option<Color<C>> {
        let width = self.width();
        if x >= width || y >= self.height() {
            return None;
        }
        C::Format::pixel(&self.buffer, width.into(), x.into(), y.into())
    }

    /// Fill the whole buffer with `color`
    pub fn clear(&mut self, color: Color<C>) {
        self.buffer.fill(C::Format::fill_word(color));
    }

    /// Access the controller
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Access the controller mutably, for controller-specific operations
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Drop the buffer and give the controller back
    pub fn release(self) -> C {
        self.controller
    }
}

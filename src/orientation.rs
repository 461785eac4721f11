//! Display orientation
//!
//! [`Orientation`] is the one orientation vocabulary shared by every controller.
//! Each controller maps it onto its own registers with a private table; the
//! enum's discriminants carry no register meaning.
//!
//! | Orientation | Mirror X | Mirror Y | Axes swapped |
//! |-------------|----------|----------|--------------|
//! | `Normal` | no | no | no |
//! | `MirrorX` | yes | no | no |
//! | `MirrorY` | no | yes | no |
//! | `Flip` | yes | yes | no |
//! | `ClockWise` | - | - | yes |
//! | `CounterClockWise` | - | - | yes |
//!
//! Controllers without a transpose register (SSD1306) degrade the two rotations
//! to a mirror-only transform.

/// Display orientation relative to the panel's native scan direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Native orientation
    #[default]
    Normal,
    /// Mirror the X axis only
    MirrorX,
    /// Mirror the Y axis only
    MirrorY,
    /// Mirror both axes (180 degree rotation)
    Flip,
    /// Rotate 90 degrees clockwise
    ClockWise,
    /// Rotate 90 degrees counter-clockwise
    CounterClockWise,
}

impl Orientation {
    /// Every orientation, in declaration order
    pub const ALL: [Self; 6] = [
        Self::Normal,
        Self::MirrorX,
        Self::MirrorY,
        Self::Flip,
        Self::ClockWise,
        Self::CounterClockWise,
    ];

    /// Whether this orientation exchanges the logical width and height
    ///
    /// ```
    /// use kf_display::Orientation;
    ///
    /// assert!(Orientation::ClockWise.swaps_axes());
    /// assert!(!Orientation::Flip.swaps_axes());
    /// ```
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::ClockWise | Self::CounterClockWise)
    }

    /// Logical `(width, height)` of a `width` x `height` panel in this orientation
    pub const fn logical_dimensions(self, width: u8, height: u8) -> (u8, u8) {
        if self.swaps_axes() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Orientation::default(), Orientation::Normal);
    }

    #[test]
    fn test_only_rotations_swap_axes() {
        for orientation in Orientation::ALL {
            let expected = matches!(
                orientation,
                Orientation::ClockWise | Orientation::CounterClockWise
            );
            assert_eq!(orientation.swaps_axes(), expected);
        }
    }

    #[test]
    fn test_logical_dimensions() {
        assert_eq!(Orientation::Normal.logical_dimensions(128, 160), (128, 160));
        assert_eq!(Orientation::Flip.logical_dimensions(128, 160), (128, 160));
        assert_eq!(
            Orientation::ClockWise.logical_dimensions(128, 160),
            (160, 128)
        );
        assert_eq!(
            Orientation::CounterClockWise.logical_dimensions(128, 160),
            (160, 128)
        );
    }
}

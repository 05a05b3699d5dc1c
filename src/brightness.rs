//! Brightness scaling
//!
//! Maps a wire percentage to a multiplicative factor and applies it to a
//! color to get the physical output levels. Brightness changes are applied
//! instantly, they are never interpolated.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::output::OutputLevels;

/// Highest accepted brightness percentage
pub const MAX_PERCENT: u16 = 100;

/// Brightness factor in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Brightness(f32);

impl Brightness {
    /// Full output
    pub const FULL: Self = Self(1.0);

    /// Output switched off
    pub const OFF: Self = Self(0.0);

    /// Create brightness from a wire percentage
    ///
    /// Values above [`MAX_PERCENT`] are clamped.
    pub fn from_percent(percent: u16) -> Self {
        let clamped = percent.min(MAX_PERCENT);
        #[cfg(feature = "esp32-log")]
        if clamped != percent {
            println!(
                "[Brightness.from_percent] clamping {:?}% to {:?}%",
                percent, clamped
            );
        }
        Self(f32::from(clamped) / f32::from(MAX_PERCENT))
    }

    /// Create brightness from a raw factor, e.g. one read back from storage
    ///
    /// The factor is clamped to `0.0..=1.0`; NaN maps to [`Self::OFF`].
    pub fn from_factor(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::OFF;
        }
        Self(factor.clamp(0.0, 1.0))
    }

    /// Multiplicative factor
    pub const fn factor(self) -> f32 {
        self.0
    }

    /// Percentage reported back to the peer
    ///
    /// Rounds up, so a stored factor that lost precision never reads back
    /// one percent lower than it was written.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_percent(self) -> u16 {
        libm::ceilf(self.0 * f32::from(MAX_PERCENT)) as u16
    }

    /// Scale a color to output levels
    pub fn apply(self, color: Rgb) -> OutputLevels {
        OutputLevels {
            r: self.scale(color.r),
            g: self.scale(color.g),
            b: self.scale(color.b),
        }
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scale(self, channel: u8) -> u8 {
        (f32::from(channel) * self.0) as u8
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self(crate::config::DEFAULT_BRIGHTNESS)
    }
}

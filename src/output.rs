//! Output sink boundary.
//!
//! The engine never talks to the PWM peripheral directly. It hands three
//! duty levels to an [`OutputDriver`], one per [`OutputChannel`].

use crate::config::{BLUE_PIN, GREEN_PIN, RED_PIN};

/// Physical output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputChannel {
    Red,
    Green,
    Blue,
}

impl OutputChannel {
    /// All channels in wire order
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// LEDC channel number used for this color
    pub const fn pwm_channel(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// GPIO the channel is attached to on the reference board
    pub const fn pin(self) -> u8 {
        match self {
            Self::Red => RED_PIN,
            Self::Green => GREEN_PIN,
            Self::Blue => BLUE_PIN,
        }
    }
}

/// Duty levels for all three channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputLevels {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl OutputLevels {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Level for a single channel
    pub const fn level(self, channel: OutputChannel) -> u8 {
        match channel {
            OutputChannel::Red => self.r,
            OutputChannel::Green => self.g,
            OutputChannel::Blue => self.b,
        }
    }
}

/// Abstract output driver trait
///
/// Implement this trait to support different hardware platforms.
/// The light engine is generic over this trait.
pub trait OutputDriver {
    /// Set the duty level of a single channel
    fn set_level(&mut self, channel: OutputChannel, level: u8);

    /// Write levels to all channels, red first
    fn write(&mut self, levels: OutputLevels) {
        for channel in OutputChannel::ALL {
            self.set_level(channel, levels.level(channel));
        }
    }
}

//! Wire records written by the remote peer.
//!
//! Both records are fixed size. Channel bytes are always read unsigned, so a
//! channel value of `200` arrives as `200` and never as a negative number.

use crate::color::Rgb;

/// Color characteristic payload: red, green, blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorRecord {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorRecord {
    /// Size of the record on the wire
    pub const SIZE: usize = 3;

    /// Parse a record from raw characteristic bytes
    ///
    /// Returns `None` if the payload is shorter than [`Self::SIZE`].
    /// Trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [r, g, b, ..] => Some(Self {
                r: *r,
                g: *g,
                b: *b,
            }),
            _ => None,
        }
    }

    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        [self.r, self.g, self.b]
    }

    pub const fn from_color(color: Rgb) -> Self {
        Self {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    /// Channel intensities carried by the record
    pub const fn color(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl From<Rgb> for ColorRecord {
    fn from(color: Rgb) -> Self {
        Self::from_color(color)
    }
}

/// Brightness characteristic payload: percentage as little-endian `u16`
///
/// The value is not clamped here; values above 100 are clamped when they are
/// turned into a [`crate::Brightness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrightnessRecord(pub u16);

impl BrightnessRecord {
    /// Size of the record on the wire
    pub const SIZE: usize = 2;

    /// Parse a record from raw characteristic bytes
    ///
    /// A single byte is taken as the low byte of the percentage. Returns
    /// `None` for an empty payload.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [lo, hi, ..] => Some(Self(u16::from_le_bytes([*lo, *hi]))),
            [lo] => Some(Self(u16::from(*lo))),
            [] => None,
        }
    }

    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_le_bytes()
    }

    pub const fn percent(self) -> u16 {
        self.0
    }
}

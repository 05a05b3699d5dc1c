mod utils;
pub mod wire;

use smart_leds::RGB8;
pub use utils::interpolate;
pub use wire::{BrightnessRecord, ColorRecord};

pub type Rgb = RGB8;

/// Fully dark colour, used when nothing has been persisted yet
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

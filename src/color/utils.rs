use crate::color::Rgb;

/// Linearly interpolate a single channel
///
/// Truncates toward zero and saturates to the `u8` range.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    let a = f32::from(a);
    let b = f32::from(b);
    (a + (b - a) * t) as u8
}

/// Interpolate between two colors
///
/// # Arguments
/// * `a` - Color at `t = 0.0`
/// * `b` - Color at `t = 1.0`
/// * `t` - Position on the line between `a` and `b`
///
/// `t` is not clamped. Values outside of `0.0..=1.0` extrapolate along the
/// same line and saturate at the channel bounds; do not depend on that.
#[inline]
pub fn interpolate(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb {
        r: lerp_channel(a.r, b.r, t),
        g: lerp_channel(a.g, b.g, t),
        b: lerp_channel(a.b, b.b, t),
    }
}


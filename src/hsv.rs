//! RGB to HSV conversion and inclusive HSV range checks.
//!
//! All hue arithmetic uses the OpenCV integer convention: H in 0-179 (degrees
//! halved so the wheel fits a byte), S and V in 0-255. The band thresholds in
//! [`crate::classify`] are calibrated against this scale; a 0-359 hue wheel
//! would silently shift every band, so the scale is fixed here and documented
//! rather than left to the caller.

/// Convert an 8-bit RGB triple to HSV on the OpenCV scale.
///
/// Returns `(h, s, v)` with H in 0-179, S and V in 0-255. Achromatic pixels
/// (zero delta) report hue 0.
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r_n = f32::from(r) / 255.0;
    let g_n = f32::from(g) / 255.0;
    let b_n = f32::from(b) / 255.0;

    let max = r_n.max(g_n).max(b_n);
    let min = r_n.min(g_n).min(b_n);
    let delta = max - min;

    // Hue in degrees on the full 0-360 wheel.
    let h_deg = if delta < 1e-6 {
        0.0
    } else if (max - r_n).abs() < 1e-6 {
        let h = 60.0 * ((g_n - b_n) / delta);
        if h < 0.0 {
            h + 360.0
        } else {
            h
        }
    } else if (max - g_n).abs() < 1e-6 {
        60.0 * ((b_n - r_n) / delta + 2.0)
    } else {
        60.0 * ((r_n - g_n) / delta + 4.0)
    };

    let s = if max < 1e-6 { 0.0 } else { delta / max };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        // Halve the wheel; 359.x rounds up to 180, which wraps to 0.
        let h = ((h_deg / 2.0).round() as u16 % 180) as u8;
        let s = (s * 255.0).round() as u8;
        let v = (max * 255.0).round() as u8;
        (h, s, v)
    }
}

/// An inclusive box in HSV space on the OpenCV scale.
///
/// All configured bands sit away from the hue wrap point, so ranges are plain
/// inclusive intervals with `h_lo <= h_hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    /// Lower hue bound (0-179).
    pub h_lo: u8,
    /// Upper hue bound (0-179).
    pub h_hi: u8,
    /// Lower saturation bound.
    pub s_lo: u8,
    /// Upper saturation bound.
    pub s_hi: u8,
    /// Lower value bound.
    pub v_lo: u8,
    /// Upper value bound.
    pub v_hi: u8,
}

impl HsvRange {
    /// Build a range from six inclusive per-channel bounds.
    #[must_use]
    pub const fn new(h_lo: u8, h_hi: u8, s_lo: u8, s_hi: u8, v_lo: u8, v_hi: u8) -> Self {
        Self {
            h_lo,
            h_hi,
            s_lo,
            s_hi,
            v_lo,
            v_hi,
        }
    }

    /// Whether the triple falls inside the box on every channel.
    #[must_use]
    pub const fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        h >= self.h_lo
            && h <= self.h_hi
            && s >= self.s_lo
            && s <= self.s_hi
            && v >= self.v_lo
            && v <= self.v_hi
    }
}

//! HSV masking primitive and coverage arithmetic.
//!
//! A [`ColorMask`] is a same-dimension boolean buffer over an image: a pixel
//! is set iff its HSV triple falls inside a configured [`HsvRange`]. Coverage
//! is the fraction of set pixels expressed as a percentage, the crate's only
//! derived statistic.

use std::ops::BitOr;

use image::RgbImage;

use crate::hsv::{rgb_to_hsv, HsvRange};

/// A boolean pixel mask with the dimensions of its source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl ColorMask {
    /// Mask width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of set pixels.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Whether the pixel at `(x, y)` is set.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the mask dimensions.
    #[must_use]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        assert!(x < self.width && y < self.height, "mask index out of bounds");
        self.bits[(y * self.width + x) as usize]
    }

    /// Percentage of set pixels in `[0.0, 100.0]`.
    ///
    /// An empty mask (zero pixels) has coverage `0.0`.
    #[must_use]
    pub fn coverage_percent(&self) -> f32 {
        if self.bits.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let total = self.bits.len() as f32;
        #[allow(clippy::cast_precision_loss)]
        let set = self.set_count() as f32;
        set / total * 100.0
    }
}

impl BitOr for &ColorMask {
    type Output = ColorMask;

    /// Pixel-wise union of two masks over the same image.
    fn bitor(self, rhs: Self) -> ColorMask {
        debug_assert_eq!(self.width, rhs.width);
        debug_assert_eq!(self.height, rhs.height);
        ColorMask {
            width: self.width,
            height: self.height,
            bits: self
                .bits
                .iter()
                .zip(rhs.bits.iter())
                .map(|(a, b)| *a || *b)
                .collect(),
        }
    }
}

/// Mark every pixel whose HSV triple falls inside `range`.
///
/// Pure function of the input buffer and the six bounds; no side effects.
/// Empty-image rejection happens at decode, not here: a zero-pixel image
/// yields a zero-pixel mask.
#[must_use]
pub fn hsv_mask(image: &RgbImage, range: &HsvRange) -> ColorMask {
    let mut bits = Vec::with_capacity((image.width() * image.height()) as usize);
    for px in image.pixels() {
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        bits.push(range.contains(h, s, v));
    }
    ColorMask {
        width: image.width(),
        height: image.height(),
        bits,
    }
}

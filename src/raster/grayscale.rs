//! Weighted-sum luminance conversion.
//!
//! ```text
//! luma = round(r * wr + g * wg + b * wb), clamped to [0, 255]
//! ```
//!
//! Fingerprints are only comparable when built with the same weights.

use image::{DynamicImage, GrayImage, Luma};

use super::GrayscaleTransform;
use crate::error::Result;

/// Per-channel weights for luminance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl LumaWeights {
    /// Broadcast luma (0.30 R + 0.59 G + 0.11 B). Used for reference fingerprints.
    pub const BROADCAST: Self = Self {
        r: 0.30,
        g: 0.59,
        b: 0.11,
    };

    /// ITU-R BT.601.
    pub const REC601: Self = Self {
        r: 0.299,
        g: 0.587,
        b: 0.114,
    };

    /// ITU-R BT.709 (what `image::DynamicImage::to_luma8` uses).
    pub const REC709: Self = Self {
        r: 0.2126,
        g: 0.7152,
        b: 0.0722,
    };

    /// Luminance of one 8-bit RGB pixel.
    #[inline]
    pub fn luma(&self, r: u8, g: u8, b: u8) -> u8 {
        let value = r as f32 * self.r + g as f32 * self.g + b as f32 * self.b;
        value.round().clamp(0.0, 255.0) as u8
    }
}

impl Default for LumaWeights {
    fn default() -> Self {
        Self::BROADCAST
    }
}

/// [`GrayscaleTransform`] applying fixed [`LumaWeights`] to every pixel.
///
/// Alpha is ignored; 16-bit and float rasters are first narrowed to 8-bit RGB.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LumaTransform {
    pub weights: LumaWeights,
}

impl LumaTransform {
    pub fn new(weights: LumaWeights) -> Self {
        Self { weights }
    }
}

impl GrayscaleTransform for LumaTransform {
    fn to_grayscale(&self, source: &DynamicImage) -> Result<GrayImage> {
        let rgb = source.to_rgb8();
        let mut gray = GrayImage::new(rgb.width(), rgb.height());
        for (dst, src) in gray.pixels_mut().zip(rgb.pixels()) {
            let [r, g, b] = src.0;
            *dst = Luma([self.weights.luma(r, g, b)]);
        }
        Ok(gray)
    }
}

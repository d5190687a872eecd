//! Color transforms.
//!
//! [`ColorMatrix`] is a 4x5 affine transform over normalized RGBA
//! (`0.0..=1.0`). Each output channel is
//!
//! ```text
//! out = m[0]*r + m[1]*g + m[2]*b + m[3]*a + m[4]
//! ```
//!
//! Matrices compose with [`ColorMatrix::then`], so a chain of filters costs
//! a single pass over the pixels.

use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::{Result, ThumbprintError};
use crate::raster::{GrayscaleTransform, LumaTransform, LumaWeights};

/// Affine color transform over normalized RGBA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    /// Rows for R, G, B, A; columns r, g, b, a, offset.
    pub rows: [[f32; 5]; 4],
}

impl ColorMatrix {
    pub const IDENTITY: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
        ],
    };

    /// Replace R, G and B by the weighted luminance.
    pub fn grayscale(weights: LumaWeights) -> Self {
        let row = [weights.r, weights.g, weights.b, 0.0, 0.0];
        Self {
            rows: [row, row, row, Self::IDENTITY.rows[3]],
        }
    }

    pub fn sepia() -> Self {
        Self {
            rows: [
                [0.393, 0.769, 0.189, 0.0, 0.0],
                [0.349, 0.686, 0.168, 0.0, 0.0],
                [0.272, 0.534, 0.131, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    pub fn invert() -> Self {
        Self {
            rows: [
                [-1.0, 0.0, 0.0, 0.0, 1.0],
                [0.0, -1.0, 0.0, 0.0, 1.0],
                [0.0, 0.0, -1.0, 0.0, 1.0],
                [0.0, 0.0, 0.0, 1.0, 0.0],
            ],
        }
    }

    /// Add `offset` (normalized, typically `-1.0..=1.0`) to R, G and B.
    pub fn brightness(offset: f32) -> Self {
        let mut m = Self::IDENTITY;
        for row in m.rows.iter_mut().take(3) {
            row[4] = offset;
        }
        m
    }

    /// Scale R, G and B around mid-gray. `1.0` is a no-op, `0.0` flattens to gray.
    pub fn contrast(factor: f32) -> Self {
        let mut m = Self::IDENTITY;
        for (i, row) in m.rows.iter_mut().take(3).enumerate() {
            row[i] = factor;
            row[4] = 0.5 * (1.0 - factor);
        }
        m
    }

    /// `0.0` is fully desaturated, `1.0` is a no-op, above `1.0` boosts color.
    pub fn saturation(amount: f32) -> Self {
        let w = LumaWeights::BROADCAST;
        let lum = [w.r, w.g, w.b];
        let mut m = Self::IDENTITY;
        for (i, row) in m.rows.iter_mut().take(3).enumerate() {
            for (j, cell) in row.iter_mut().take(3).enumerate() {
                let identity = if i == j { 1.0 } else { 0.0 };
                *cell = (1.0 - amount) * lum[j] + amount * identity;
            }
        }
        m
    }

    /// The transform that applies `self` first, then `next`.
    ///
    /// The composed matrix clamps once, at the end. Applying the two
    /// matrices one after the other clamps in between, so the results differ
    /// whenever `self` pushes a channel out of `0.0..=1.0`.
    pub fn then(&self, next: &ColorMatrix) -> ColorMatrix {
        let mut rows = [[0.0f32; 5]; 4];
        for (i, out) in rows.iter_mut().enumerate() {
            for j in 0..5 {
                let mut sum: f32 = (0..4).map(|k| next.rows[i][k] * self.rows[k][j]).sum();
                if j == 4 {
                    sum += next.rows[i][4];
                }
                out[j] = sum;
            }
        }
        ColorMatrix { rows }
    }

    /// Transform one pixel.
    #[inline]
    pub fn transform(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        let input = pixel.0.map(|c| c as f32 / 255.0);
        let mut out = [0u8; 4];
        for (channel, row) in out.iter_mut().zip(self.rows.iter()) {
            let value = row[0] * input[0] + row[1] * input[1] + row[2] * input[2] + row[3] * input[3] + row[4];
            *channel = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        Rgba(out)
    }

    pub fn apply(&self, image: &DynamicImage) -> RgbaImage {
        let mut rgba = image.to_rgba8();
        for pixel in rgba.pixels_mut() {
            *pixel = self.transform(*pixel);
        }
        rgba
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Apply brightness and contrast, both in `-100..=100`.
///
/// Brightness maps to a -255..=255 offset. Contrast maps to a factor
/// `1 + contrast/100` around 128, so -100 is flat gray and 100 doubles.
/// Alpha is untouched.
pub fn brightness_contrast(image: &DynamicImage, brightness: i32, contrast: i32) -> Result<DynamicImage> {
    for (name, value) in [("brightness", brightness), ("contrast", contrast)] {
        if !(-100..=100).contains(&value) {
            return Err(ThumbprintError::InvalidInput(format!(
                "{} must be within -100..=100, got {}",
                name, value
            )));
        }
    }
    if brightness == 0 && contrast == 0 {
        return Ok(image.clone());
    }

    let brightness_offset = (brightness as f32 / 100.0) * 255.0;
    let contrast_factor = 1.0 + (contrast as f32 / 100.0);

    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        for c in 0..3 {
            let val = (pixel[c] as f32 - 128.0) * contrast_factor + 128.0;
            let val = val + brightness_offset;
            pixel[c] = val.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(DynamicImage::ImageRgba8(rgba))
}

/// Gamma correction: `out = in^gamma`. `gamma < 1` lightens midtones.
pub fn gamma(image: &DynamicImage, gamma: f32) -> Result<DynamicImage> {
    if !(gamma.is_finite() && gamma > 0.0) {
        return Err(ThumbprintError::InvalidInput(format!(
            "gamma must be positive, got {}",
            gamma
        )));
    }
    let lut: Vec<u8> = (0..=255u16)
        .map(|v| ((v as f32 / 255.0).powf(gamma) * 255.0).round() as u8)
        .collect();
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        for c in 0..3 {
            pixel[c] = lut[pixel[c] as usize];
        }
    }
    Ok(DynamicImage::ImageRgba8(rgba))
}

pub fn invert(image: &DynamicImage) -> DynamicImage {
    DynamicImage::ImageRgba8(ColorMatrix::invert().apply(image))
}

/// Single-channel grayscale using the same conversion as fingerprinting.
pub fn grayscale(image: &DynamicImage, weights: LumaWeights) -> Result<DynamicImage> {
    Ok(DynamicImage::ImageLuma8(LumaTransform::new(weights).to_grayscale(image)?))
}

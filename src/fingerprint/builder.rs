//! Fingerprint construction: resample, grayscale, average threshold.

use image::DynamicImage;

use super::{Fingerprint, GRID_SIZE, SAMPLE_COUNT};
use crate::config::Profile;
use crate::error::{Result, ThumbprintError};
use crate::raster::{GrayscaleTransform, ImageResampler, LumaTransform, Resampler};

/// Builds fingerprints using an injected [`Resampler`] and [`GrayscaleTransform`].
///
/// The builder holds no mutable state; one instance can be shared between
/// threads and every call allocates its own thumbnail.
///
/// ```
/// use image::{DynamicImage, GrayImage, Luma};
/// use thumbprint::fingerprint::FingerprintBuilder;
///
/// // Left half dark, right half bright.
/// let img = DynamicImage::ImageLuma8(GrayImage::from_fn(80, 80, |x, _| {
///     Luma([if x < 40 { 10 } else { 240 }])
/// }));
/// let fp = FingerprintBuilder::new().build(&img)?;
/// assert_eq!(fp.as_bytes(), &[0xF0; 8]);
/// # Ok::<(), thumbprint::ThumbprintError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FingerprintBuilder<R = ImageResampler, G = LumaTransform> {
    resampler: R,
    grayscale: G,
}

impl FingerprintBuilder {
    /// Builder for the reference profile.
    pub fn new() -> Self {
        Self::from_profile(&Profile::REFERENCE)
    }

    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            resampler: ImageResampler::new(profile.filter),
            grayscale: LumaTransform::new(profile.weights),
        }
    }
}

impl<R: Resampler, G: GrayscaleTransform> FingerprintBuilder<R, G> {
    pub fn with_capabilities(resampler: R, grayscale: G) -> Self {
        Self {
            resampler,
            grayscale,
        }
    }

    /// Fingerprint `raster`.
    ///
    /// The raster is always resampled to the 8x8 grid, even if it already
    /// has that size. Collaborator errors are returned unchanged.
    pub fn build(&self, raster: &DynamicImage) -> Result<Fingerprint> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(ThumbprintError::InvalidInput(format!(
                "raster has no pixels ({}x{})",
                raster.width(),
                raster.height()
            )));
        }

        let samples = {
            let thumbnail = self.resampler.resample(raster, GRID_SIZE, GRID_SIZE)?;
            check_grid("resampler", thumbnail.width(), thumbnail.height())?;

            let gray = self.grayscale.to_grayscale(&thumbnail)?;
            check_grid("grayscale transform", gray.width(), gray.height())?;

            let mut samples = [0u8; SAMPLE_COUNT];
            for (sample, pixel) in samples.iter_mut().zip(gray.pixels()) {
                *sample = pixel.0[0];
            }
            samples
        };

        let fingerprint = average_threshold(&samples);
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            fingerprint = %fingerprint,
            "built fingerprint"
        );
        Ok(fingerprint)
    }
}

fn check_grid(stage: &str, width: u32, height: u32) -> Result<()> {
    if width != GRID_SIZE || height != GRID_SIZE {
        return Err(ThumbprintError::Image(format!(
            "{} returned {}x{}, expected {}x{}",
            stage, width, height, GRID_SIZE, GRID_SIZE
        )));
    }
    Ok(())
}

/// Fingerprint `raster` with the reference profile.
pub fn build_fingerprint(raster: &DynamicImage) -> Result<Fingerprint> {
    FingerprintBuilder::new().build(raster)
}

/// Threshold 64 row-major luma samples against their floored mean.
///
/// Bit `i` is set only when `samples[i]` is strictly greater than
/// `floor(sum / 64)`; samples equal to the mean stay 0.
///
/// ```
/// use thumbprint::fingerprint::average_threshold;
///
/// let flat = [128u8; 64];
/// assert_eq!(average_threshold(&flat).to_u64(), 0);
/// ```
pub fn average_threshold(samples: &[u8; SAMPLE_COUNT]) -> Fingerprint {
    let sum: u32 = samples.iter().map(|&s| s as u32).sum();
    let mean = sum / SAMPLE_COUNT as u32;
    tracing::trace!(sum, mean, "average threshold");

    let bits = samples
        .iter()
        .enumerate()
        .filter(|(_, s)| **s as u32 > mean)
        .fold(0u64, |acc, (i, _)| acc | (1u64 << i));

    Fingerprint::from_u64(bits)
}

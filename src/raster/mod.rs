//! # Raster Capabilities
//!
//! The fingerprint engine never touches a pixel backend directly. It asks
//! two small capabilities for the work it needs:
//!
//! - [`Resampler`]: produce a new raster of an exact size
//! - [`GrayscaleTransform`]: collapse a raster to one luma channel
//!
//! The defaults ([`ImageResampler`], [`LumaTransform`]) are backed by the
//! `image` crate. Tests swap in fakes to observe what the builder asks for.
//!
//! ## Example
//!
//! ```
//! use image::{DynamicImage, RgbImage, Rgb};
//! use thumbprint::raster::{GrayscaleTransform, ImageResampler, LumaTransform, Resampler};
//!
//! let source = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([200, 10, 10])));
//! let thumb = ImageResampler::default().resample(&source, 8, 8)?;
//! let gray = LumaTransform::default().to_grayscale(&thumb)?;
//! assert_eq!(gray.dimensions(), (8, 8));
//! # Ok::<(), thumbprint::ThumbprintError>(())
//! ```

pub mod grayscale;
pub mod resample;

use image::{DynamicImage, GrayImage};

use crate::error::Result;

pub use grayscale::{LumaTransform, LumaWeights};
pub use resample::{ImageResampler, ResampleFilter};

/// Produces a resized copy of a raster.
pub trait Resampler {
    /// Return a new raster of exactly `width` x `height` pixels.
    ///
    /// Aspect ratio is not preserved. A zero width or height fails with
    /// [`ThumbprintError::Dimension`](crate::ThumbprintError::Dimension).
    fn resample(&self, source: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage>;
}

/// Converts a raster to single-channel luminance.
pub trait GrayscaleTransform {
    /// Return a grayscale raster with the same dimensions as `source`.
    fn to_grayscale(&self, source: &DynamicImage) -> Result<GrayImage>;
}

impl<T: Resampler + ?Sized> Resampler for &T {
    fn resample(&self, source: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage> {
        (**self).resample(source, width, height)
    }
}

impl<T: GrayscaleTransform + ?Sized> GrayscaleTransform for &T {
    fn to_grayscale(&self, source: &DynamicImage) -> Result<GrayImage> {
        (**self).to_grayscale(source)
    }
}

//! # Bitmap Utilities
//!
//! Thin, typed wrappers over the `image` crate for the everyday raster work
//! around fingerprinting: loading and saving, resizing, color transforms,
//! compositing and text.
//!
//! ## Modules
//!
//! - [`io`]: Load/save/convert, with optional HEIC decoding
//! - [`resize`]: Exact and aspect-preserving resize, rotation
//! - [`adjust`]: Color matrices, brightness/contrast, invert
//! - [`blend`]: Blend modes and alpha compositing
//! - [`text`]: Anti-aliased TTF/OTF text drawing
//!
//! ## Usage Example
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use thumbprint::bitmap::{adjust::ColorMatrix, blend::{self, BlendMode}};
//!
//! let mut base = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
//! let stamp = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
//! blend::composite(&mut base, &stamp, 1, 1, BlendMode::Normal, 1.0)?;
//!
//! let inverted = ColorMatrix::invert().apply(&DynamicImage::ImageRgba8(base));
//! assert_eq!(inverted.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
//! # Ok::<(), thumbprint::ThumbprintError>(())
//! ```

pub mod adjust;
pub mod blend;
pub mod io;
pub mod resize;
pub mod text;

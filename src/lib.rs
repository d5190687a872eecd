//! # Thumbprint - Bitmap Utilities and Perceptual Fingerprints
//!
//! Thumbprint reduces an image of any size to an 8-byte perceptual
//! fingerprint and scores how similar two fingerprints are. It also bundles
//! the raster chores that surround that work. It provides:
//!
//! - **Fingerprints**: 8x8 average-threshold hashes with byte-level
//!   Hamming, sum-of-differences and bit-level distances
//! - **Raster capabilities**: pluggable resampling and grayscale conversion
//! - **Bitmap utilities**: load/save, resize, color matrices, compositing, text
//!
//! ## Quick Start
//!
//! ```no_run
//! use thumbprint::{bitmap::io, fingerprint};
//!
//! let a = fingerprint::build_fingerprint(&io::load("holiday.jpg")?)?;
//! let b = fingerprint::build_fingerprint(&io::load("holiday-copy.png")?)?;
//!
//! println!("{} vs {}", a, b);
//! let distance = fingerprint::hamming_distance(a.as_bytes(), b.as_bytes())?;
//! if distance <= 2 {
//!     println!("probably the same picture");
//! }
//!
//! # Ok::<(), thumbprint::ThumbprintError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`fingerprint`] | Fingerprint construction, comparison, hex text |
//! | [`raster`] | `Resampler` / `GrayscaleTransform` capabilities |
//! | [`bitmap`] | Image I/O, resize, color transforms, compositing, text |
//! | [`config`] | Named fingerprint profiles |
//! | [`error`] | Error types |
//!
//! ## Stability
//!
//! Fingerprints built with the same [`config::Profile`] are stable across
//! runs and platforms. Changing the profile (resample filter or luma
//! weights) changes the bits; never compare fingerprints across profiles.

pub mod bitmap;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod raster;

// Re-exports for convenience
pub use error::{Result, ThumbprintError};
pub use fingerprint::{Fingerprint, FingerprintBuilder};

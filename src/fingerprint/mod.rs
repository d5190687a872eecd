//! # Perceptual Fingerprints
//!
//! A fingerprint is a 64-bit average-threshold hash of an image's coarse
//! luminance structure.
//!
//! ## How It Works
//!
//! ```text
//! any-size raster ──resample──▶ 8x8 ──grayscale──▶ 64 luma samples
//!                                                       │
//!          mean = floor(sum / 64)  ◀────────────────────┘
//!          bit i = luma[i] > mean
//!                      │
//!                      ▼
//!          u64 ──little-endian──▶ [u8; 8]
//! ```
//!
//! Sample `i` is grid cell `(i % 8, i / 8)`, so byte `k` of the fingerprint
//! holds grid row `k`, with bit 0 = column 0.
//!
//! ## Comparing
//!
//! | Metric | Range for 8 bytes | Function |
//! |--------|-------------------|----------|
//! | Byte Hamming | 0..=8 | [`hamming_distance`] |
//! | Sum of byte differences | 0..=2040 | [`sum_byte_distance`] |
//! | Bit Hamming | 0..=64 | [`bit_distance`] |
//!
//! The byte-level Hamming distance counts differing *bytes*, not bits. It
//! is the metric similarity thresholds are expressed in.
//!
//! ## Example
//!
//! ```
//! use image::{DynamicImage, RgbImage, Rgb};
//! use thumbprint::fingerprint::build_fingerprint;
//!
//! let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([30, 60, 90])));
//! let fp = build_fingerprint(&img)?;
//! assert_eq!(fp.to_string(), "0000000000000000");
//! # Ok::<(), thumbprint::ThumbprintError>(())
//! ```

pub mod builder;
pub mod compare;
pub mod encoding;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, ThumbprintError};

pub use builder::{FingerprintBuilder, average_threshold, build_fingerprint};
pub use compare::{Metric, bit_distance, hamming_distance, is_similar, sum_byte_distance};
pub use encoding::{from_hex, to_hex};

/// Side length of the sampling grid.
pub const GRID_SIZE: u32 = 8;

/// Number of luminance samples (one bit each).
pub const SAMPLE_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Fingerprint length in bytes.
pub const FINGERPRINT_LEN: usize = SAMPLE_COUNT / 8;

/// An 8-byte perceptual fingerprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    pub const fn new(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, which must be exactly [`FINGERPRINT_LEN`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let array: [u8; FINGERPRINT_LEN] =
            bytes
                .try_into()
                .map_err(|_| ThumbprintError::LengthMismatch {
                    left: bytes.len(),
                    right: FINGERPRINT_LEN,
                })?;
        Ok(Self(array))
    }

    pub const fn from_u64(bits: u64) -> Self {
        Self(bits.to_le_bytes())
    }

    pub const fn to_u64(&self) -> u64 {
        u64::from_le_bytes(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Whether grid cell `index` (row-major) was brighter than the mean.
    pub fn bit(&self, index: usize) -> bool {
        index < SAMPLE_COUNT && (self.to_u64() >> index) & 1 == 1
    }

    /// Number of differing byte positions (0..=8).
    pub fn hamming_distance(&self, other: &Fingerprint) -> usize {
        compare::differing_bytes(&self.0, &other.0)
    }

    /// Sum of absolute per-byte differences (0..=2040).
    pub fn sum_byte_distance(&self, other: &Fingerprint) -> u64 {
        compare::abs_byte_diff_sum(&self.0, &other.0)
    }

    /// Number of differing bits (0..=64).
    pub fn bit_distance(&self, other: &Fingerprint) -> u32 {
        compare::differing_bits(&self.0, &other.0)
    }
}

impl From<[u8; FINGERPRINT_LEN]> for Fingerprint {
    fn from(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Fingerprint {
    type Err = ThumbprintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(&from_hex(s.trim())?)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(SAMPLE_COUNT, 64);
        assert_eq!(FINGERPRINT_LEN, 8);
    }

    #[test]
    fn test_u64_is_little_endian() {
        let fp = Fingerprint::from_u64(0x0102_0304_0506_0708);
        assert_eq!(fp.as_bytes(), &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(fp.to_u64(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_bit_maps_to_grid_row() {
        // Bit 9 is grid cell (1, 1): byte 1, bit 1.
        let fp = Fingerprint::from_u64(1 << 9);
        assert!(fp.bit(9));
        assert!(!fp.bit(8));
        assert_eq!(fp.as_bytes()[1], 0b0000_0010);
        assert!(!fp.bit(64));
    }

    #[test]
    fn test_from_bytes_wrong_length() {
        let err = Fingerprint::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ThumbprintError::LengthMismatch { left: 3, right: 8 }));
    }

    #[test]
    fn test_display_and_parse() {
        let fp = Fingerprint::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x7f, 0xff]);
        assert_eq!(fp.to_string(), "deadbeef00017fff");
        assert_eq!("DEADBEEF00017FFF".parse::<Fingerprint>().unwrap(), fp);
        assert!("deadbeef".parse::<Fingerprint>().is_err());
    }

    #[test]
    fn test_distances() {
        let a = Fingerprint::new([0x0f, 0xff, 0, 0, 0, 0, 0, 0]);
        let b = Fingerprint::new([0x00, 0xff, 0, 0, 0, 0, 0, 0]);
        assert_eq!(a.hamming_distance(&b), 1);
        assert_eq!(a.sum_byte_distance(&b), 15);
        assert_eq!(a.bit_distance(&b), 4);
        assert_eq!(a.hamming_distance(&a), 0);
    }

    #[test]
    fn test_methods_agree_with_slice_metrics() {
        let a = Fingerprint::from_u64(0x8040_2010_0804_0201);
        let b = Fingerprint::from_u64(0x0102_0408_1020_4080);
        assert_eq!(a.hamming_distance(&b), hamming_distance(a.as_bytes(), b.as_bytes()).unwrap());
        assert_eq!(a.sum_byte_distance(&b), sum_byte_distance(a.as_bytes(), b.as_bytes()).unwrap());
        assert_eq!(a.bit_distance(&b), bit_distance(a.as_bytes(), b.as_bytes()).unwrap());
        assert_eq!(a.bit_distance(&b), (a.to_u64() ^ b.to_u64()).count_ones());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let fp = Fingerprint::from_u64(0xff);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, "\"ff00000000000000\"");
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
    }
}

//! Distance metrics over equal-length byte sequences.
//!
//! All metrics are commutative and return zero exactly when the inputs are
//! byte-for-byte equal. Both inputs must be non-empty and of equal length.

use crate::error::{Result, ThumbprintError};

fn check_pair(a: &[u8], b: &[u8]) -> Result<()> {
    if a.is_empty() || b.is_empty() {
        return Err(ThumbprintError::InvalidInput(
            "cannot compare empty byte sequences".to_string(),
        ));
    }
    if a.len() != b.len() {
        return Err(ThumbprintError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

// Unchecked kernels, shared with the fixed-length `Fingerprint` methods.

pub(crate) fn differing_bytes(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

pub(crate) fn abs_byte_diff_sum(a: &[u8], b: &[u8]) -> u64 {
    a.iter().zip(b).map(|(&x, &y)| x.abs_diff(y) as u64).sum()
}

pub(crate) fn differing_bits(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(&x, &y)| (x ^ y).count_ones()).sum()
}

/// Count the byte positions where `a` and `b` differ.
///
/// This is a byte-level count: two fingerprints that differ in one bit and
/// two that differ in all eight bits of the same byte both score 1. Use
/// [`bit_distance`] for the bit-level count.
///
/// ```
/// use thumbprint::fingerprint::hamming_distance;
///
/// assert_eq!(hamming_distance(&[0x0F, 0xFF], &[0x00, 0xFF]).unwrap(), 1);
/// ```
pub fn hamming_distance(a: &[u8], b: &[u8]) -> Result<usize> {
    check_pair(a, b)?;
    Ok(differing_bytes(a, b))
}

/// Sum of `|a[i] - b[i]|` over unsigned bytes.
///
/// ```
/// use thumbprint::fingerprint::sum_byte_distance;
///
/// assert_eq!(sum_byte_distance(&[0x0F, 0xFF], &[0x00, 0xFF]).unwrap(), 15);
/// ```
pub fn sum_byte_distance(a: &[u8], b: &[u8]) -> Result<u64> {
    check_pair(a, b)?;
    Ok(abs_byte_diff_sum(a, b))
}

/// Number of differing bits (popcount of `a XOR b`).
pub fn bit_distance(a: &[u8], b: &[u8]) -> Result<u32> {
    check_pair(a, b)?;
    Ok(differing_bits(a, b))
}

/// A named distance metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Metric {
    /// [`hamming_distance`]
    #[default]
    Hamming,
    /// [`sum_byte_distance`]
    SumBytes,
    /// [`bit_distance`]
    Bits,
}

impl Metric {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "hamming" | "bytes" => Some(Metric::Hamming),
            "sum" | "sum-bytes" | "sad" => Some(Metric::SumBytes),
            "bits" | "bit-hamming" => Some(Metric::Bits),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Hamming => "hamming",
            Metric::SumBytes => "sum",
            Metric::Bits => "bits",
        }
    }

    /// Score `a` against `b` with this metric.
    pub fn distance(&self, a: &[u8], b: &[u8]) -> Result<u64> {
        match self {
            Metric::Hamming => hamming_distance(a, b).map(|d| d as u64),
            Metric::SumBytes => sum_byte_distance(a, b),
            Metric::Bits => bit_distance(a, b).map(u64::from),
        }
    }
}

/// `true` when `metric.distance(a, b) <= threshold`.
pub fn is_similar(a: &[u8], b: &[u8], metric: Metric, threshold: u64) -> Result<bool> {
    Ok(metric.distance(a, b)? <= threshold)
}

//! # Fingerprint Profiles
//!
//! A profile fixes everything that influences the bits of a fingerprint
//! besides the image itself: the resample filter and the luma weights. It
//! also carries the default similarity threshold used by `compare`.
//!
//! Fingerprints built with different profiles are not comparable.
//!
//! | Profile | Filter | Luma weights | Threshold (bytes) |
//! |---------|--------|--------------|-------------------|
//! | reference | Triangle | 0.30 / 0.59 / 0.11 | 2 |
//! | fast | Nearest | 0.30 / 0.59 / 0.11 | 3 |
//! | sharp | Lanczos3 | BT.601 | 2 |
//!
//! ## Usage
//!
//! ```
//! use thumbprint::config::Profile;
//!
//! let profile = Profile::by_name("reference").unwrap();
//! assert_eq!(profile.similarity_threshold, 2);
//! ```

use crate::raster::{LumaWeights, ResampleFilter};

/// Named, fixed fingerprinting parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Profile name as used on the command line
    pub name: &'static str,

    /// Kernel used to shrink the source to the 8x8 grid
    pub filter: ResampleFilter,

    /// Channel weights used for the grayscale step
    pub weights: LumaWeights,

    /// Maximum byte-level Hamming distance still reported as "similar"
    pub similarity_threshold: u64,
}

impl Profile {
    /// Default profile; produces the reference fingerprints.
    pub const REFERENCE: Self = Self {
        name: "reference",
        filter: ResampleFilter::Triangle,
        weights: LumaWeights::BROADCAST,
        similarity_threshold: 2,
    };

    /// Nearest-neighbour sampling. Much cheaper on very large inputs, noisier.
    pub const FAST: Self = Self {
        name: "fast",
        filter: ResampleFilter::Nearest,
        weights: LumaWeights::BROADCAST,
        similarity_threshold: 3,
    };

    pub const SHARP: Self = Self {
        name: "sharp",
        filter: ResampleFilter::Lanczos3,
        weights: LumaWeights::REC601,
        similarity_threshold: 2,
    };

    const ALL: [Profile; 3] = [Profile::REFERENCE, Profile::FAST, Profile::SHARP];

    /// Look up a profile by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Names of all built-in profiles.
    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name).collect()
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::REFERENCE
    }
}

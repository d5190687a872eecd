//! Hex text form of fingerprints and other byte strings.
//!
//! Lowercase, no separators, byte 0 first. Used for logging and for
//! persisting fingerprints as text.

use crate::error::{Result, ThumbprintError};

/// Render bytes as lowercase hex.
///
/// ```
/// use thumbprint::fingerprint::to_hex;
///
/// assert_eq!(to_hex(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap(), "deadbeef");
/// assert!(to_hex(&[]).is_err());
/// ```
pub fn to_hex(bytes: &[u8]) -> Result<String> {
    if bytes.is_empty() {
        return Err(ThumbprintError::InvalidInput(
            "cannot render an empty byte sequence as hex".to_string(),
        ));
    }
    Ok(hex::encode(bytes))
}

/// Parse hex text produced by [`to_hex`]. Either case is accepted.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(ThumbprintError::InvalidInput("empty hex string".to_string()));
    }
    Ok(hex::decode(text)?)
}

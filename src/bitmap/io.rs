//! Loading, saving and format conversion.
//!
//! Formats are whatever the `image` crate was built with. HEIC/HEIF
//! containers are detected by their `ftyp` brand and decoded through
//! libheif when the `heif` feature is enabled.

use std::path::Path;

use image::DynamicImage;

use crate::error::{Result, ThumbprintError};

/// Load an image from disk, detecting the format from its content.
pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let image = load_from_memory(&bytes)
        .map_err(|e| ThumbprintError::Image(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded image"
    );
    Ok(image)
}

/// Decode an in-memory image.
pub fn load_from_memory(bytes: &[u8]) -> Result<DynamicImage> {
    if is_heic(bytes) {
        return decode_heic(bytes);
    }
    Ok(image::load_from_memory(bytes)?)
}

/// Save an image; the format follows the file extension.
pub fn save(image: &DynamicImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save(path)
        .map_err(|e| ThumbprintError::Image(format!("Failed to save {}: {}", path.display(), e)))?;
    tracing::debug!(path = %path.display(), "saved image");
    Ok(())
}

/// Re-encode `src` into the format implied by `dst`'s extension.
pub fn convert(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
    let image = load(src)?;
    save(&image, dst)
}

/// ISO-BMFF brands written by HEIF encoders.
const HEIF_BRANDS: [&[u8; 4]; 10] = [
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"hevm", b"hevs", b"mif1", b"msf1",
];

/// Whether `data` starts with an ISO-BMFF `ftyp` box carrying a HEIF brand.
pub fn is_heic(data: &[u8]) -> bool {
    if data.get(4..8) != Some(b"ftyp".as_slice()) {
        return false;
    }
    data.get(8..12)
        .is_some_and(|brand| HEIF_BRANDS.iter().any(|known| known.as_slice() == brand))
}

#[cfg(feature = "heif")]
fn decode_heic(data: &[u8]) -> Result<DynamicImage> {
    use image::RgbImage;
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(data)
        .map_err(|e| ThumbprintError::Image(format!("Failed to read HEIC: {}", e)))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| ThumbprintError::Image(format!("Failed to get primary image: {}", e)))?;
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| ThumbprintError::Image(format!("Failed to decode HEIC image: {}", e)))?;

    let planes = decoded.planes();
    let interleaved = planes
        .interleaved
        .ok_or_else(|| ThumbprintError::Image("No interleaved RGB data in HEIC".to_string()))?;

    let width = decoded.width();
    let height = decoded.height();
    let stride = interleaved.stride;
    let pixels = interleaved.data;

    let mut rgb = RgbImage::new(width, height);
    for y in 0..height {
        let row = y as usize * stride;
        for x in 0..width {
            let offset = row + x as usize * 3;
            if let Some(px) = pixels.get(offset..offset + 3) {
                rgb.put_pixel(x, y, image::Rgb([px[0], px[1], px[2]]));
            }
        }
    }

    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(not(feature = "heif"))]
fn decode_heic(_data: &[u8]) -> Result<DynamicImage> {
    Err(ThumbprintError::Image(
        "HEIC/HEIF input requires the `heif` feature".to_string(),
    ))
}

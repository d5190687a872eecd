//! Resizing and rotation.

use image::DynamicImage;

use crate::error::{Result, ThumbprintError};
use crate::raster::{ImageResampler, ResampleFilter, Resampler};

/// Resize to exactly `width` x `height`, ignoring aspect ratio.
pub fn resize_exact(
    image: &DynamicImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<DynamicImage> {
    ImageResampler::new(filter).resample(image, width, height)
}

/// Resize to `width`, keeping the aspect ratio. Height is at least 1.
pub fn resize_to_width(image: &DynamicImage, width: u32, filter: ResampleFilter) -> Result<DynamicImage> {
    if image.width() == 0 {
        return Err(ThumbprintError::InvalidInput("image has zero width".to_string()));
    }
    let aspect_ratio = image.height() as f64 / image.width() as f64;
    let height = ((width as f64 * aspect_ratio).round() as u32).max(1);
    resize_exact(image, width, height, filter)
}

/// Shrink to fit within `max_width` x `max_height`, keeping the aspect ratio.
///
/// Images already inside the box are returned unchanged.
pub fn fit_within(
    image: &DynamicImage,
    max_width: u32,
    max_height: u32,
    filter: ResampleFilter,
) -> Result<DynamicImage> {
    if max_width == 0 || max_height == 0 {
        return Err(ThumbprintError::Dimension {
            width: max_width,
            height: max_height,
        });
    }
    let (width, height) = (image.width(), image.height());
    if width <= max_width && height <= max_height {
        return Ok(image.clone());
    }
    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    resize_exact(image, new_width, new_height, filter)
}

/// Rotate clockwise by a multiple of 90 degrees (negative turns counter-clockwise).
pub fn rotate(image: &DynamicImage, degrees: i32) -> Result<DynamicImage> {
    match degrees.rem_euclid(360) {
        0 => Ok(image.clone()),
        90 => Ok(image.rotate90()),
        180 => Ok(image.rotate180()),
        270 => Ok(image.rotate270()),
        _ => Err(ThumbprintError::InvalidInput(format!(
            "rotation must be a multiple of 90 degrees, got {}",
            degrees
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Gray gradient with a red marker in the top-left corner.
    fn marked(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            if x == 0 && y == 0 {
                Rgb([255, 0, 0])
            } else {
                let v = ((x + y) % 200) as u8;
                Rgb([v, v, v])
            }
        }))
    }

    #[test]
    fn test_rotation_90() {
        let rotated = rotate(&marked(100, 50), 90).unwrap().to_rgb8();
        assert_eq!((rotated.width(), rotated.height()), (50, 100));
        // Clockwise: the top-left marker ends up top-right.
        assert_eq!(rotated.get_pixel(49, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn test_rotation_negative_90_is_270() {
        let img = marked(10, 4);
        let a = rotate(&img, -90).unwrap();
        let b = rotate(&img, 270).unwrap();
        assert_eq!(a.to_rgb8(), b.to_rgb8());
    }

    #[test]
    fn test_rotation_360_is_identity() {
        let img = marked(6, 3);
        assert_eq!(rotate(&img, 360).unwrap().to_rgb8(), img.to_rgb8());
    }

    #[test]
    fn test_rotation_rejects_odd_angle() {
        assert!(matches!(
            rotate(&marked(2, 2), 45),
            Err(ThumbprintError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resize_to_width_keeps_aspect() {
        let out = resize_to_width(&marked(200, 100), 50, ResampleFilter::Triangle).unwrap();
        assert_eq!((out.width(), out.height()), (50, 25));
    }

    #[test]
    fn test_resize_to_width_min_height() {
        let out = resize_to_width(&marked(1000, 1), 10, ResampleFilter::Nearest).unwrap();
        assert_eq!((out.width(), out.height()), (10, 1));
    }

    #[test]
    fn test_fit_within() {
        let out = fit_within(&marked(400, 100), 100, 100, ResampleFilter::Triangle).unwrap();
        assert_eq!((out.width(), out.height()), (100, 25));

        let small = fit_within(&marked(20, 10), 100, 100, ResampleFilter::Triangle).unwrap();
        assert_eq!((small.width(), small.height()), (20, 10));
    }

    #[test]
    fn test_resize_exact_zero_fails() {
        assert!(matches!(
            resize_exact(&marked(4, 4), 4, 0, ResampleFilter::Nearest),
            Err(ThumbprintError::Dimension { .. })
        ));
    }
}

//! TTF/OTF text drawing.
//!
//! Glyphs are laid out on a single line with kerning, rasterized with
//! ab_glyph, and their anti-aliased coverage is blended into the target.

use std::path::Path;

use ab_glyph::{Font as _, FontArc, ScaleFont, point};
use image::{Rgba, RgbaImage};

use super::blend::lerp;
use crate::error::{Result, ThumbprintError};

const DEJAVU_SANS_MONO: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

/// A loaded font face.
#[derive(Clone)]
pub struct Font {
    inner: FontArc,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("glyphs", &self.inner.glyph_count())
            .finish()
    }
}

impl Font {
    /// DejaVu Sans Mono, compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let inner = FontArc::try_from_slice(DEJAVU_SANS_MONO)
            .map_err(|e| ThumbprintError::Font(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let inner = FontArc::try_from_vec(data).map_err(|e| ThumbprintError::Font(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let inner = FontArc::try_from_vec(data)
            .map_err(|e| ThumbprintError::Font(format!("{}: {}", path.display(), e)))?;
        Ok(Self { inner })
    }

    /// Width and line height in pixels of `text` rendered at `px_height`.
    pub fn measure(&self, text: &str, px_height: f32) -> Result<(u32, u32)> {
        check_height(px_height)?;
        let layout = self.layout(text, px_height);
        Ok((layout.width.ceil() as u32, layout.line_height.ceil() as u32))
    }

    fn layout(&self, text: &str, px_height: f32) -> Layout {
        let scaled = self.inner.as_scaled(px_height);
        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        let mut previous = None;

        for ch in text.chars() {
            let glyph_id = self.inner.glyph_id(ch);
            if let Some(prev) = previous {
                caret_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push((glyph_id, caret_x));
            caret_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }

        Layout {
            glyphs,
            width: caret_x,
            ascent: scaled.ascent(),
            line_height: scaled.ascent() - scaled.descent(),
        }
    }
}

struct Layout {
    glyphs: Vec<(ab_glyph::GlyphId, f32)>,
    width: f32,
    ascent: f32,
    line_height: f32,
}

fn check_height(px_height: f32) -> Result<()> {
    if !(px_height.is_finite() && px_height > 0.0) {
        return Err(ThumbprintError::InvalidInput(format!(
            "text height must be positive, got {}",
            px_height
        )));
    }
    Ok(())
}

/// Draw one line of `text` with its top-left corner at (`x`, `y`).
///
/// Coverage is multiplied by the color's alpha; pixels outside the image
/// are clipped.
pub fn draw_text(
    image: &mut RgbaImage,
    font: &Font,
    text: &str,
    px_height: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
) -> Result<()> {
    check_height(px_height)?;
    let layout = font.layout(text, px_height);
    let (width, height) = (image.width() as i32, image.height() as i32);
    let color_alpha = color[3] as f32 / 255.0;

    for &(glyph_id, glyph_x) in &layout.glyphs {
        let glyph = glyph_id.with_scale_and_position(
            px_height,
            point(x as f32 + glyph_x, y as f32 + layout.ascent),
        );
        let Some(outlined) = font.inner.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let px = gx as i32 + bounds.min.x as i32;
            let py = gy as i32 + bounds.min.y as i32;
            if px < 0 || py < 0 || px >= width || py >= height {
                return;
            }
            let weight = coverage.clamp(0.0, 1.0) * color_alpha;
            let target = image.get_pixel_mut(px as u32, py as u32);
            for c in 0..3 {
                let value = lerp(target[c] as f32, color[c] as f32, weight);
                target[c] = value.round().clamp(0.0, 255.0) as u8;
            }
            let alpha = lerp(target[3] as f32, 255.0, weight);
            target[3] = alpha.round().clamp(0.0, 255.0) as u8;
        });
    }

    tracing::trace!(text, px_height, x, y, "drew text");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn lit_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, px) in image.enumerate_pixels() {
            if *px == BACKGROUND {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bounds
    }

    #[test]
    fn test_bundled_font_loads() {
        let font = Font::bundled().unwrap();
        let (w, h) = font.measure("Hg", 32.0).unwrap();
        assert!(w > 0 && h > 0);
    }

    #[test]
    fn test_measure_scales_with_text_and_height() {
        let font = Font::bundled().unwrap();
        let (one, _) = font.measure("M", 20.0).unwrap();
        let (four, _) = font.measure("MMMM", 20.0).unwrap();
        // Monospaced: four glyphs are four advances wide, up to rounding.
        assert!(four > (one - 1) * 4 && four <= one * 4, "{} vs {}", one, four);

        let (_, small) = font.measure("M", 16.0).unwrap();
        let (_, large) = font.measure("M", 48.0).unwrap();
        assert!(large > small * 2);
        assert_eq!(font.measure("", 20.0).unwrap().0, 0);
    }

    #[test]
    fn test_draw_text_stays_inside_measured_box() {
        let font = Font::bundled().unwrap();
        let (x, y) = (10, 20);
        let (w, h) = font.measure("Hg", 32.0).unwrap();
        let mut canvas = RgbaImage::from_pixel(100, 80, BACKGROUND);
        draw_text(&mut canvas, &font, "Hg", 32.0, x, y, Rgba([255, 255, 255, 255])).unwrap();

        let (x0, y0, x1, y1) = lit_bounds(&canvas).unwrap();
        assert!(x0 >= x as u32 && y0 >= y as u32, "starts at ({}, {})", x0, y0);
        assert!(x1 < x as u32 + w && y1 < y as u32 + h, "ends at ({}, {})", x1, y1);
    }

    #[test]
    fn test_draw_text_uses_color() {
        let font = Font::bundled().unwrap();
        let mut canvas = RgbaImage::from_pixel(60, 40, BACKGROUND);
        draw_text(&mut canvas, &font, "#", 32.0, 0, 0, Rgba([200, 0, 0, 255])).unwrap();

        let reddest = canvas.pixels().map(|p| p[0]).max().unwrap();
        assert_eq!(reddest, 200);
        assert!(canvas.pixels().all(|p| p[1] == 0 && p[2] == 0));
    }

    #[test]
    fn test_draw_text_clips_negative_offset() {
        let font = Font::bundled().unwrap();
        let mut canvas = RgbaImage::from_pixel(40, 40, BACKGROUND);
        draw_text(&mut canvas, &font, "Hg", 32.0, -15, -20, Rgba([255, 255, 255, 255])).unwrap();
        // Entirely off-canvas draws nothing and does not panic either.
        let mut empty = RgbaImage::from_pixel(40, 40, BACKGROUND);
        draw_text(&mut empty, &font, "Hg", 32.0, 500, -500, Rgba([255, 255, 255, 255])).unwrap();
        assert!(lit_bounds(&empty).is_none());
    }

    #[test]
    fn test_draw_text_transparent_color_is_noop() {
        let font = Font::bundled().unwrap();
        let mut canvas = RgbaImage::from_pixel(60, 40, BACKGROUND);
        draw_text(&mut canvas, &font, "Hg", 24.0, 4, 4, Rgba([255, 255, 255, 0])).unwrap();
        assert!(lit_bounds(&canvas).is_none());
    }

    #[test]
    fn test_draw_text_rejects_bad_height() {
        let font = Font::bundled().unwrap();
        let mut canvas = RgbaImage::new(10, 10);
        assert!(draw_text(&mut canvas, &font, "x", 0.0, 0, 0, BACKGROUND).is_err());
    }

    #[test]
    fn test_invalid_font_bytes() {
        let err = Font::from_bytes(b"definitely not a font".to_vec()).unwrap_err();
        assert!(matches!(err, ThumbprintError::Font(_)));
    }

    #[test]
    fn test_missing_font_file() {
        let err = Font::from_file("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, ThumbprintError::Io(_)));
    }

    #[test]
    fn test_check_height() {
        assert!(check_height(12.0).is_ok());
        assert!(check_height(0.0).is_err());
        assert!(check_height(-3.0).is_err());
        assert!(check_height(f32::NAN).is_err());
    }
}

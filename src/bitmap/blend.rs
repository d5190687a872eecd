//! Blend modes and layer compositing.
//!
//! Channel values are normalized to `0.0..=1.0` with 0.0 = black.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThumbprintError};

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend modes for compositing layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Normal blending - top layer replaces bottom based on opacity.
    #[default]
    Normal,
    /// Multiply - darkens.
    Multiply,
    /// Screen - lightens.
    Screen,
    /// Overlay - increases contrast, combines multiply and screen.
    Overlay,
    /// Add - additive blending (clamped to 1.0).
    Add,
    /// Difference - absolute difference between layers.
    Difference,
    /// Takes the darker of two values.
    Darken,
    /// Takes the lighter of two values.
    Lighten,
}

impl BlendMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "normal" => Some(BlendMode::Normal),
            "multiply" => Some(BlendMode::Multiply),
            "screen" => Some(BlendMode::Screen),
            "overlay" => Some(BlendMode::Overlay),
            "add" => Some(BlendMode::Add),
            "difference" => Some(BlendMode::Difference),
            "darken" | "min" => Some(BlendMode::Darken),
            "lighten" | "max" => Some(BlendMode::Lighten),
            _ => None,
        }
    }

    /// Combine one normalized channel of `base` and `top`.
    #[inline]
    pub fn apply(self, base: f32, top: f32) -> f32 {
        match self {
            BlendMode::Normal => top,
            BlendMode::Multiply => base * top,
            BlendMode::Screen => 1.0 - (1.0 - base) * (1.0 - top),
            BlendMode::Overlay => {
                if base < 0.5 {
                    2.0 * base * top
                } else {
                    1.0 - 2.0 * (1.0 - base) * (1.0 - top)
                }
            }
            BlendMode::Add => (base + top).min(1.0),
            BlendMode::Difference => (base - top).abs(),
            BlendMode::Darken => base.min(top),
            BlendMode::Lighten => base.max(top),
        }
    }
}

/// Draw `top` onto `base` with its top-left corner at (`x`, `y`).
///
/// Each top pixel contributes with weight `alpha * opacity`. Pixels falling
/// outside `base` are clipped; negative offsets are allowed.
pub fn composite(
    base: &mut RgbaImage,
    top: &RgbaImage,
    x: i64,
    y: i64,
    mode: BlendMode,
    opacity: f32,
) -> Result<()> {
    if !(0.0..=1.0).contains(&opacity) {
        return Err(ThumbprintError::InvalidInput(format!(
            "opacity must be within 0.0..=1.0, got {}",
            opacity
        )));
    }

    let (base_w, base_h) = (base.width() as i64, base.height() as i64);
    for (tx, ty, top_px) in top.enumerate_pixels() {
        let bx = x + tx as i64;
        let by = y + ty as i64;
        if bx < 0 || by < 0 || bx >= base_w || by >= base_h {
            continue;
        }
        let weight = top_px[3] as f32 / 255.0 * opacity;
        if weight <= 0.0 {
            continue;
        }
        let base_px = base.get_pixel_mut(bx as u32, by as u32);
        *base_px = blend_pixel(*base_px, *top_px, mode, weight);
    }
    Ok(())
}

fn blend_pixel(base: Rgba<u8>, top: Rgba<u8>, mode: BlendMode, weight: f32) -> Rgba<u8> {
    let mut out = base;
    for c in 0..3 {
        let b = base[c] as f32 / 255.0;
        let t = top[c] as f32 / 255.0;
        let value = lerp(b, mode.apply(b, t), weight);
        out[c] = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let base_alpha = base[3] as f32 / 255.0;
    let alpha = base_alpha + weight * (1.0 - base_alpha);
    out[3] = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_blend_mode_table() {
        let cases = [
            (BlendMode::Normal, 0.2, 0.6, 0.6),
            (BlendMode::Multiply, 0.4, 0.5, 0.2),
            (BlendMode::Screen, 0.4, 0.5, 0.7),
            (BlendMode::Add, 0.25, 0.5, 0.75),
            (BlendMode::Add, 0.9, 0.6, 1.0),
            (BlendMode::Difference, 0.2, 0.9, 0.7),
            (BlendMode::Darken, 0.6, 0.1, 0.1),
            (BlendMode::Lighten, 0.6, 0.1, 0.6),
        ];
        for (mode, base, top, expected) in cases {
            let got = mode.apply(base, top);
            assert!(close(got, expected), "{:?}({}, {}) = {}", mode, base, top, got);
        }
    }

    #[test]
    fn test_overlay_switches_on_base() {
        // Dark base multiplies: 2 * 0.25 * 0.5
        assert!(close(BlendMode::Overlay.apply(0.25, 0.5), 0.25));
        // Light base screens: 1 - 2 * 0.25 * 0.5
        assert!(close(BlendMode::Overlay.apply(0.75, 0.5), 0.75));
        // Overlay with mid-gray top keeps the base.
        for base in [0.1, 0.4, 0.6, 0.9] {
            assert!(close(BlendMode::Overlay.apply(base, 0.5), base), "{}", base);
        }
    }

    #[test]
    fn test_modes_are_symmetric_where_expected() {
        for mode in [BlendMode::Multiply, BlendMode::Screen, BlendMode::Difference, BlendMode::Add] {
            assert!(close(mode.apply(0.3, 0.8), mode.apply(0.8, 0.3)), "{:?}", mode);
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&BlendMode::Difference).unwrap(), "\"difference\"");
        let mode: BlendMode = serde_json::from_str("\"lighten\"").unwrap();
        assert_eq!(mode, BlendMode::Lighten);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(BlendMode::from_name("Multiply"), Some(BlendMode::Multiply));
        assert_eq!(BlendMode::from_name("max"), Some(BlendMode::Lighten));
        assert_eq!(BlendMode::from_name("dodge"), None);
    }

    #[test]
    fn test_composite_places_and_clips() {
        let mut base = RgbaImage::from_pixel(4, 4, WHITE);
        let top = RgbaImage::from_pixel(3, 3, BLACK);
        composite(&mut base, &top, 2, -1, BlendMode::Normal, 1.0).unwrap();

        assert_eq!(base.get_pixel(2, 0), &BLACK);
        assert_eq!(base.get_pixel(3, 1), &BLACK);
        assert_eq!(base.get_pixel(2, 2), &WHITE);
        assert_eq!(base.get_pixel(1, 0), &WHITE);
    }

    #[test]
    fn test_composite_half_opacity() {
        let mut base = RgbaImage::from_pixel(1, 1, WHITE);
        let top = RgbaImage::from_pixel(1, 1, BLACK);
        composite(&mut base, &top, 0, 0, BlendMode::Normal, 0.5).unwrap();
        assert_eq!(base.get_pixel(0, 0), &Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn test_composite_transparent_top_is_noop() {
        let mut base = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let top = RgbaImage::from_pixel(2, 2, Rgba([200, 200, 200, 0]));
        composite(&mut base, &top, 0, 0, BlendMode::Multiply, 1.0).unwrap();
        assert_eq!(base.get_pixel(1, 1), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_composite_rejects_bad_opacity() {
        let mut base = RgbaImage::new(1, 1);
        let top = RgbaImage::new(1, 1);
        assert!(composite(&mut base, &top, 0, 0, BlendMode::Normal, 1.5).is_err());
    }
}

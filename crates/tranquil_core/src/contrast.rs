//! WCAG color math
//!
//! Relative luminance and contrast ratio follow the WCAG 2.1 definitions:
//! channels are linearized with the sRGB transfer function and combined with
//! the Rec. 709 coefficients. The blending helpers here operate in gamma
//! space, per channel, which is what Material dark-theme surface tinting uses.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// WCAG conformance level for a contrast ratio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WcagLevel {
    Aaa,
    Aa,
    Fail,
}

impl WcagLevel {
    /// Classify a contrast ratio.
    ///
    /// Normal text needs 7.0 (AAA) / 4.5 (AA); large text needs 4.5 / 3.0.
    pub fn classify(ratio: f64, large_text: bool) -> Self {
        let (aaa, aa) = if large_text { (4.5, 3.0) } else { (7.0, 4.5) };
        if ratio >= aaa {
            WcagLevel::Aaa
        } else if ratio >= aa {
            WcagLevel::Aa
        } else {
            WcagLevel::Fail
        }
    }

    pub fn passes(self) -> bool {
        self != WcagLevel::Fail
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WcagLevel::Aaa => "AAA",
            WcagLevel::Aa => "AA",
            WcagLevel::Fail => "fail",
        })
    }
}

/// sRGB transfer function inverse (gamma-encoded channel to linear light)
#[inline]
fn linearize(channel: f64) -> f64 {
    if channel <= 0.03928 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance in `[0, 1]`, 0 for black and 1 for white
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_unit_rgb();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Contrast ratio in `[1, 21]`, independent of argument order
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex strings.
///
/// Returns `None` when either side is not a well-formed hex color.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Option<f64> {
    let a = Color::from_hex_str(a).ok()?;
    let b = Color::from_hex_str(b).ok()?;
    Some(contrast_ratio(a, b))
}

/// Linear per-channel interpolation from `base` toward `overlay`.
///
/// `opacity` is clamped to `[0, 1]`; 0 yields `base` and 1 yields `overlay`.
/// The result keeps the base alpha.
pub fn blend(base: Color, overlay: Color, opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| {
        let from = f64::from(from);
        let to = f64::from(to);
        (from + (to - from) * t).round().clamp(0.0, 255.0) as u8
    };
    Color::rgba(
        mix(base.r, overlay.r),
        mix(base.g, overlay.g),
        mix(base.b, overlay.b),
        base.a,
    )
}

/// [`blend`] over hex strings.
///
/// If either input fails to parse, the unmodified `base` string is returned,
/// so callers must not assume the result differs from the input.
pub fn blend_hex(base: &str, overlay: &str, opacity: f64) -> String {
    match (Color::from_hex_str(base), Color::from_hex_str(overlay)) {
        (Ok(b), Ok(o)) => blend(b, o, opacity).to_hex_string(),
        _ => {
            tracing::trace!("blend_hex: unparseable input {base:?} / {overlay:?}, keeping base");
            base.to_string()
        }
    }
}

/// Multiply each channel by `factor`, clamping to `[0, 255]`
pub fn adjust_brightness(color: Color, factor: f64) -> Color {
    let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8;
    Color::rgba(scale(color.r), scale(color.g), scale(color.b), color.a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(Color::BLACK), 0.0, 1e-9));
        assert!(approx_eq(relative_luminance(Color::WHITE), 1.0, 1e-9));
    }

    #[test]
    fn luminance_primaries_match_coefficients() {
        assert!(approx_eq(relative_luminance(Color::rgb(255, 0, 0)), 0.2126, 1e-6));
        assert!(approx_eq(relative_luminance(Color::rgb(0, 255, 0)), 0.7152, 1e-6));
        assert!(approx_eq(relative_luminance(Color::rgb(0, 0, 255)), 0.0722, 1e-6));
    }

    #[test]
    fn luminance_mid_gray() {
        let lum = relative_luminance(Color::rgb(128, 128, 128));
        assert!(lum > 0.2 && lum < 0.23, "mid-gray luminance: {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(Color::WHITE, Color::BLACK);
        assert!(approx_eq(ratio, 21.0, 0.01), "B/W contrast: {ratio}");
    }

    #[test]
    fn contrast_with_self_is_one() {
        for hex in [0x000000, 0xFFFFFF, 0x3A5A8C, 0xB3261E, 0x121212] {
            let c = Color::from_hex(hex);
            assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-12));
        }
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Color::from_hex(0x1C1B1F);
        let b = Color::from_hex(0xFAFAF7);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn contrast_hex_rejects_malformed() {
        assert!(contrast_ratio_hex("#FFFFFF", "#000000").is_some());
        assert!(contrast_ratio_hex("#FFFFFF", "black").is_none());
    }

    // ── WCAG levels ─────────────────────────────────────────────────

    #[test]
    fn wcag_normal_text_thresholds() {
        assert_eq!(WcagLevel::classify(21.0, false), WcagLevel::Aaa);
        assert_eq!(WcagLevel::classify(7.0, false), WcagLevel::Aaa);
        assert_eq!(WcagLevel::classify(6.99, false), WcagLevel::Aa);
        assert_eq!(WcagLevel::classify(4.5, false), WcagLevel::Aa);
        assert_eq!(WcagLevel::classify(4.49, false), WcagLevel::Fail);
        assert_eq!(WcagLevel::classify(1.0, false), WcagLevel::Fail);
    }

    #[test]
    fn wcag_large_text_thresholds() {
        assert_eq!(WcagLevel::classify(4.5, true), WcagLevel::Aaa);
        assert_eq!(WcagLevel::classify(3.0, true), WcagLevel::Aa);
        assert_eq!(WcagLevel::classify(2.99, true), WcagLevel::Fail);
    }

    // ── Blending ────────────────────────────────────────────────────

    #[test]
    fn blend_endpoints() {
        let base = Color::from_hex(0x121212);
        let overlay = Color::from_hex(0xE6E1E5);
        assert_eq!(blend(base, overlay, 0.0), base);
        assert_eq!(blend(base, overlay, 1.0), overlay);
    }

    #[test]
    fn blend_midpoint_rounds() {
        let mid = blend(Color::BLACK, Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(128, 128, 128));
    }

    #[test]
    fn blend_clamps_opacity() {
        let base = Color::from_hex(0x202020);
        assert_eq!(blend(base, Color::WHITE, -1.0), base);
        assert_eq!(blend(base, Color::WHITE, 2.0), Color::WHITE);
    }

    #[test]
    fn blend_hex_keeps_base_on_parse_failure() {
        assert_eq!(blend_hex("#121212", "not-a-color", 0.5), "#121212");
        assert_eq!(blend_hex("garbage", "#FFFFFF", 0.5), "garbage");
        assert_eq!(blend_hex("#000000", "#FFFFFF", 1.0), "#FFFFFF");
    }

    #[test]
    fn brightness_scales_and_clamps() {
        let c = Color::rgb(100, 200, 50);
        assert_eq!(adjust_brightness(c, 0.5), Color::rgb(50, 100, 25));
        assert_eq!(adjust_brightness(c, 2.0), Color::rgb(200, 255, 100));
        assert_eq!(adjust_brightness(c, 0.0), Color::BLACK);
    }
}

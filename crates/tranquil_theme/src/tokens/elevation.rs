//! Material elevation tokens
//!
//! Six elevation levels, from the flat background to floating elements.
//! Light themes express elevation with shadows. Dark themes also tint the
//! surface toward `on_surface`, since shadows are hard to see on dark
//! backgrounds.

use crate::tokens::palette::ColorPalette;
use serde::{Deserialize, Serialize};
use tranquil_core::{blend, Color};

/// Highest elevation level
pub const MAX_LEVEL: u8 = 5;
/// Shadow opacity above which a level is reported as too heavy
pub const MAX_SHADOW_OPACITY: f32 = 0.3;

/// Android elevation in dp for each level
const ANDROID_DP: [f32; 6] = [0.0, 1.0, 3.0, 6.0, 8.0, 12.0];

/// Semantic elevation levels
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElevationLevel {
    Background,
    Card,
    Button,
    Dialog,
    Navigation,
    Floating,
}

impl ElevationLevel {
    pub fn all() -> &'static [ElevationLevel] {
        const LEVELS: [ElevationLevel; 6] = [
            ElevationLevel::Background,
            ElevationLevel::Card,
            ElevationLevel::Button,
            ElevationLevel::Dialog,
            ElevationLevel::Navigation,
            ElevationLevel::Floating,
        ];
        &LEVELS
    }

    /// Numeric level, 0 through 5
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ElevationLevel::Background => "background",
            ElevationLevel::Card => "card",
            ElevationLevel::Button => "button",
            ElevationLevel::Dialog => "dialog",
            ElevationLevel::Navigation => "navigation",
            ElevationLevel::Floating => "floating",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadowOffset {
    pub width: f32,
    pub height: f32,
}

/// Shadow and surface parameters for one elevation level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationStyle {
    pub shadow_color: Color,
    pub shadow_offset: ShadowOffset,
    pub shadow_opacity: f32,
    pub shadow_radius: f32,
    pub elevation: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_color: Option<Color>,
}

impl ElevationStyle {
    /// Flat, shadowless style
    pub const fn none() -> Self {
        Self {
            shadow_color: Color::TRANSPARENT,
            shadow_offset: ShadowOffset {
                width: 0.0,
                height: 0.0,
            },
            shadow_opacity: 0.0,
            shadow_radius: 0.0,
            elevation: 0,
            surface_color: None,
        }
    }
}

impl Default for ElevationStyle {
    fn default() -> Self {
        Self::none()
    }
}

/// The six elevation levels of a theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialElevation {
    pub background: ElevationStyle,
    pub card: ElevationStyle,
    pub button: ElevationStyle,
    pub dialog: ElevationStyle,
    pub navigation: ElevationStyle,
    pub floating: ElevationStyle,
}

impl MaterialElevation {
    pub fn get(&self, level: ElevationLevel) -> &ElevationStyle {
        match level {
            ElevationLevel::Background => &self.background,
            ElevationLevel::Card => &self.card,
            ElevationLevel::Button => &self.button,
            ElevationLevel::Dialog => &self.dialog,
            ElevationLevel::Navigation => &self.navigation,
            ElevationLevel::Floating => &self.floating,
        }
    }

    pub fn get_mut(&mut self, level: ElevationLevel) -> &mut ElevationStyle {
        match level {
            ElevationLevel::Background => &mut self.background,
            ElevationLevel::Card => &mut self.card,
            ElevationLevel::Button => &mut self.button,
            ElevationLevel::Dialog => &mut self.dialog,
            ElevationLevel::Navigation => &mut self.navigation,
            ElevationLevel::Floating => &mut self.floating,
        }
    }

    fn from_fn(mut style: impl FnMut(u8) -> ElevationStyle) -> Self {
        Self {
            background: style(0),
            card: style(1),
            button: style(2),
            dialog: style(3),
            navigation: style(4),
            floating: style(5),
        }
    }
}

impl Default for MaterialElevation {
    fn default() -> Self {
        light_elevation_set(Color::BLACK)
    }
}

/// Style for a numeric level. Levels above [`MAX_LEVEL`] are clamped.
pub fn style_for_level(level: u8, shadow_color: Color, surface_color: Option<Color>) -> ElevationStyle {
    let level = level.min(MAX_LEVEL);
    if level == 0 {
        return ElevationStyle {
            surface_color,
            ..ElevationStyle::none()
        };
    }

    let l = f32::from(level);
    ElevationStyle {
        shadow_color,
        shadow_offset: ShadowOffset {
            width: 0.0,
            height: f32::from((level / 2).max(1)),
        },
        shadow_opacity: (0.1 + l * 0.02).min(0.24),
        shadow_radius: l * 2.0,
        elevation: level,
        surface_color,
    }
}

/// Dark-theme overlay opacity for a level
pub fn dark_tint_opacity(level: u8) -> f64 {
    (f64::from(level.min(MAX_LEVEL)) * 0.025).min(0.15)
}

/// Surface color of a level on a dark theme
pub fn tinted_surface(level: u8, base_surface: Color, on_surface: Color) -> Color {
    if level == 0 {
        return base_surface;
    }
    blend(base_surface, on_surface, dark_tint_opacity(level))
}

pub fn light_elevation_set(shadow_color: Color) -> MaterialElevation {
    MaterialElevation::from_fn(|level| style_for_level(level, shadow_color, None))
}

pub fn dark_elevation_set(shadow_color: Color, base_surface: Color, on_surface: Color) -> MaterialElevation {
    MaterialElevation::from_fn(|level| {
        style_for_level(
            level,
            shadow_color,
            Some(tinted_surface(level, base_surface, on_surface)),
        )
    })
}

/// Surface color to paint at `level`
pub fn resolve_surface_color(level: ElevationLevel, palette: &ColorPalette, is_dark: bool) -> Color {
    if !is_dark {
        return palette.surface;
    }
    match level {
        ElevationLevel::Background => palette.background,
        _ => tinted_surface(level.level(), palette.surface, palette.on_surface),
    }
}

/// Android elevation in dp
pub fn android_elevation(level: ElevationLevel) -> f32 {
    ANDROID_DP[usize::from(level.level())]
}

/// Style properties a view applies for an elevation
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_offset: Option<ShadowOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<u8>,
}

impl ViewStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Translate an elevation style to view properties.
///
/// Dark themes with a tinted surface use the surface color alone. Otherwise
/// native shadows are emitted for raised levels when enabled.
pub fn apply_to_view_style(style: &ElevationStyle, is_dark: bool, use_native_shadow: bool) -> ViewStyle {
    if is_dark {
        if let Some(surface) = style.surface_color {
            return ViewStyle {
                background_color: Some(surface),
                ..ViewStyle::default()
            };
        }
    }

    if use_native_shadow && style.elevation > 0 {
        return ViewStyle {
            shadow_color: Some(style.shadow_color),
            shadow_offset: Some(style.shadow_offset),
            shadow_opacity: Some(style.shadow_opacity),
            shadow_radius: Some(style.shadow_radius),
            elevation: Some(style.elevation),
            ..ViewStyle::default()
        };
    }

    ViewStyle::default()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationReport {
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

/// Check that elevations increase level over level and shadows stay light
pub fn validate(elevation: &MaterialElevation) -> ElevationReport {
    let mut warnings = Vec::new();
    let levels = ElevationLevel::all();

    for pair in levels.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        let (a, b) = (elevation.get(lower), elevation.get(upper));
        if b.elevation <= a.elevation {
            warnings.push(format!(
                "Elevation of {} ({}) should be greater than {} ({})",
                upper.name(),
                b.elevation,
                lower.name(),
                a.elevation
            ));
        }
    }

    for level in &levels[1..] {
        let style = elevation.get(*level);
        if style.shadow_opacity > MAX_SHADOW_OPACITY {
            warnings.push(format!(
                "Shadow opacity {:.2} at {} exceeds {MAX_SHADOW_OPACITY}",
                style.shadow_opacity,
                level.name()
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "elevation validation warnings");
    }

    ElevationReport {
        is_valid: warnings.is_empty(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::dawn_mist;

    #[test]
    fn level_zero_is_flat() {
        let style = style_for_level(0, Color::BLACK, None);
        assert_eq!(style, ElevationStyle::none());
    }

    #[test]
    fn levels_increase_strictly() {
        let set = light_elevation_set(Color::BLACK);
        for pair in ElevationLevel::all().windows(2) {
            let (a, b) = (set.get(pair[0]), set.get(pair[1]));
            assert!(b.elevation > a.elevation);
            assert!(b.shadow_opacity > a.shadow_opacity);
            assert!(b.shadow_radius > a.shadow_radius);
        }
        assert!(validate(&set).is_valid);
    }

    #[test]
    fn level_formula() {
        let style = style_for_level(3, Color::BLACK, None);
        assert_eq!(style.shadow_offset.height, 1.0);
        assert_eq!(style.shadow_radius, 6.0);
        assert!((style.shadow_opacity - 0.16).abs() < 1e-6);

        let style = style_for_level(4, Color::BLACK, None);
        assert_eq!(style.shadow_offset.height, 2.0);
        assert_eq!(style_for_level(9, Color::BLACK, None).elevation, MAX_LEVEL);
    }

    #[test]
    fn dark_surfaces_tint_toward_on_surface() {
        let palette = dawn_mist::dark();
        let set = dark_elevation_set(Color::BLACK, palette.surface, palette.on_surface);
        assert_eq!(set.background.surface_color, Some(palette.surface));

        let card = set.card.surface_color.unwrap();
        let floating = set.floating.surface_color.unwrap();
        let lum = tranquil_core::relative_luminance;
        assert!(lum(card) > lum(palette.surface));
        assert!(lum(floating) > lum(card));
    }

    #[test]
    fn surface_resolution_by_scheme() {
        let light = dawn_mist::light();
        let dark = dawn_mist::dark();
        assert_eq!(resolve_surface_color(ElevationLevel::Dialog, &light, false), light.surface);
        assert_eq!(resolve_surface_color(ElevationLevel::Background, &dark, true), dark.background);
        assert_eq!(
            resolve_surface_color(ElevationLevel::Floating, &dark, true),
            blend(dark.surface, dark.on_surface, 0.125)
        );
    }

    #[test]
    fn view_style_selection() {
        let dark_style = style_for_level(2, Color::BLACK, Some(Color::from_hex(0x2A2A2A)));
        let view = apply_to_view_style(&dark_style, true, true);
        assert_eq!(view.background_color, Some(Color::from_hex(0x2A2A2A)));
        assert_eq!(view.elevation, None);

        let light_style = style_for_level(2, Color::BLACK, None);
        let view = apply_to_view_style(&light_style, false, true);
        assert_eq!(view.elevation, Some(2));
        assert_eq!(view.shadow_radius, Some(4.0));

        assert!(apply_to_view_style(&light_style, false, false).is_empty());
        assert!(apply_to_view_style(&ElevationStyle::none(), false, true).is_empty());
    }

    #[test]
    fn shuffled_levels_are_reported() {
        let mut set = light_elevation_set(Color::BLACK);
        std::mem::swap(&mut set.card, &mut set.dialog);
        set.floating.shadow_opacity = 0.4;

        let report = validate(&set);
        assert!(!report.is_valid);
        assert_eq!(report.warnings.len(), 3);
        assert!(report.warnings[0].contains("button"));
        assert!(report.warnings[1].contains("dialog"));
        assert!(report.warnings[2].contains("floating"));
    }

    #[test]
    fn android_dp_table() {
        let dp: Vec<f32> = ElevationLevel::all().iter().map(|l| android_elevation(*l)).collect();
        assert_eq!(dp, vec![0.0, 1.0, 3.0, 6.0, 8.0, 12.0]);
    }
}

//! Theme collections and custom themes

use crate::tokens::elevation::{self, ElevationLevel, MaterialElevation};
use crate::tokens::{ColorPalette, PalettePatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tranquil_animation::{ThemeAnimations, ThemeAnimationsPatch};
use tranquil_core::Color;

/// Light or dark
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(self) -> bool {
        self == ColorScheme::Dark
    }

    pub fn toggle(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ColorScheme::Light),
            "dark" => Ok(ColorScheme::Dark),
            other => Err(format!("unknown color scheme {other:?}")),
        }
    }
}

/// How surfaces are rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceConfig {
    /// Tint raised surfaces toward `on_surface` in dark mode
    pub tint_dark_surfaces: bool,
    pub use_native_shadows: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            tint_dark_surfaces: true,
            use_native_shadows: true,
        }
    }
}

/// Touch ripple feedback
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RippleConfig {
    /// Ripple color; the palette's primary when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub opacity: f32,
    pub borderless: bool,
    pub duration_ms: u32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            color: None,
            opacity: 0.12,
            borderless: false,
            duration_ms: 250,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialConfig {
    pub elevation: MaterialElevation,
    pub surface: SurfaceConfig,
    pub ripple: RippleConfig,
}

/// A complete theme: both palettes plus elevation and motion settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeCollection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub light: ColorPalette,
    pub dark: ColorPalette,
    #[serde(default)]
    pub material_config: MaterialConfig,
    #[serde(default)]
    pub animations: ThemeAnimations,
    #[serde(default)]
    pub is_custom: bool,
}

impl ThemeCollection {
    pub fn palette(&self, scheme: ColorScheme) -> &ColorPalette {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    /// Elevation levels for a scheme. Dark levels carry tinted surface colors.
    pub fn elevation(&self, scheme: ColorScheme) -> MaterialElevation {
        let mut levels = self.material_config.elevation.clone();
        if scheme.is_dark() && self.material_config.surface.tint_dark_surfaces {
            let palette = &self.dark;
            for level in ElevationLevel::all() {
                levels.get_mut(*level).surface_color = Some(elevation::tinted_surface(
                    level.level(),
                    palette.surface,
                    palette.on_surface,
                ));
            }
        }
        levels
    }

    pub fn ripple_color(&self, scheme: ColorScheme) -> Color {
        self.material_config
            .ripple
            .color
            .unwrap_or(self.palette(scheme).primary)
    }
}

/// Per-scheme palette overrides of a custom theme
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CustomColors {
    pub light: PalettePatch,
    pub dark: PalettePatch,
}

impl CustomColors {
    pub fn for_scheme(&self, scheme: ColorScheme) -> &PalettePatch {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    pub fn merged(&self, other: &CustomColors) -> CustomColors {
        CustomColors {
            light: self.light.merged(&other.light),
            dark: self.dark.merged(&other.dark),
        }
    }
}

/// A user theme derived from a built-in base theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTheme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_theme_id: String,
    pub light: ColorPalette,
    pub dark: ColorPalette,
    #[serde(default)]
    pub custom_colors: CustomColors,
    #[serde(default)]
    pub material_config: MaterialConfig,
    #[serde(default)]
    pub animations: ThemeAnimations,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CustomTheme {
    /// Start a custom theme from `base`, copying its palettes and settings
    pub fn derive(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        base: &ThemeCollection,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            base_theme_id: base.id.clone(),
            light: base.light.clone(),
            dark: base.dark.clone(),
            custom_colors: CustomColors::default(),
            material_config: base.material_config.clone(),
            animations: base.animations,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_colors(mut self, custom_colors: CustomColors) -> Self {
        self.custom_colors = custom_colors;
        self
    }

    /// Palette with the custom overrides applied
    pub fn palette(&self, scheme: ColorScheme) -> ColorPalette {
        let base = match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        };
        self.custom_colors.for_scheme(scheme).apply(base)
    }

    /// The resolved collection used for display
    pub fn to_collection(&self) -> ThemeCollection {
        ThemeCollection {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            light: self.palette(ColorScheme::Light),
            dark: self.palette(ColorScheme::Dark),
            material_config: self.material_config.clone(),
            animations: self.animations,
            is_custom: true,
        }
    }
}

/// Fields of a custom theme that may change after creation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CustomThemePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Merged over the existing overrides
    pub custom_colors: Option<CustomColors>,
    pub material_config: Option<MaterialConfig>,
    pub animations: Option<ThemeAnimationsPatch>,
}

impl CustomThemePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// A new theme with the patch applied. Timestamps are left to the caller.
    pub fn apply(&self, base: &CustomTheme) -> CustomTheme {
        let mut theme = base.clone();
        if let Some(name) = &self.name {
            theme.name = name.clone();
        }
        if let Some(description) = &self.description {
            theme.description = description.clone();
        }
        if let Some(colors) = &self.custom_colors {
            theme.custom_colors = theme.custom_colors.merged(colors);
        }
        if let Some(material) = &self.material_config {
            theme.material_config = material.clone();
        }
        if let Some(animations) = &self.animations {
            theme.animations = animations.apply(&theme.animations);
        }
        theme
    }
}

//! Theme validation
//!
//! Palettes are checked against a fixed list of foreground/background pairs
//! that carry text. Results are report objects; nothing here fails with an
//! error.

use crate::theme::{ColorScheme, CustomTheme, ThemeCollection};
use crate::tokens::elevation;
use crate::tokens::{ColorPalette, ColorToken};
use serde::{Deserialize, Serialize};
use tranquil_core::{contrast_ratio, Color, WcagLevel};

/// Foreground/background pairs that must stay legible
pub const CRITICAL_PAIRS: [(ColorToken, ColorToken); 9] = [
    (ColorToken::Text, ColorToken::Background),
    (ColorToken::Text, ColorToken::Surface),
    (ColorToken::OnPrimary, ColorToken::Primary),
    (ColorToken::OnSecondary, ColorToken::Secondary),
    (ColorToken::OnError, ColorToken::Error),
    (ColorToken::OnSurfaceVariant, ColorToken::SurfaceVariant),
    (ColorToken::OnPrimaryContainer, ColorToken::PrimaryContainer),
    (ColorToken::OnSecondaryContainer, ColorToken::SecondaryContainer),
    (ColorToken::OnTertiaryContainer, ColorToken::TertiaryContainer),
];

/// Iterations of the lightness search in [`suggest_adjustment`]
const SEARCH_ITERATIONS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Share of critical pairs a built-in palette must pass
    pub pass_rate_threshold: f64,
    /// Contrast ratio suggestions aim for
    pub target_ratio: f64,
    /// Grade pairs against the large-text thresholds
    pub large_text: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            pass_rate_threshold: 0.5,
            target_ratio: 4.5,
            large_text: false,
        }
    }
}

/// Outcome of one foreground/background check
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorValidationResult {
    pub foreground: ColorToken,
    pub background: ColorToken,
    pub foreground_color: Color,
    pub background_color: Color,
    pub contrast_ratio: f64,
    pub level: WcagLevel,
    pub passes: bool,
    /// Present for failing pairs only
    pub suggested_color: Option<Color>,
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Share of passing results, 1.0 for an empty slice
pub fn pass_rate(results: &[ColorValidationResult]) -> f64 {
    if results.is_empty() {
        return 1.0;
    }
    results.iter().filter(|r| r.passes).count() as f64 / results.len() as f64
}

/// Search HSL lightness for a foreground reaching `target` contrast on `background`.
///
/// Darkens when black contrasts better with `background` than white, and
/// lightens otherwise. When the target is unreachable the candidate with the
/// highest contrast is returned.
pub fn suggest_adjustment(foreground: Color, background: Color, target: f64) -> Color {
    if contrast_ratio(foreground, background) >= target {
        return foreground;
    }

    let (h, s, l) = foreground.to_hsl();
    let darken = contrast_ratio(Color::BLACK, background) >= contrast_ratio(Color::WHITE, background);
    let (mut lo, mut hi) = if darken { (0.0, l) } else { (l, 1.0) };

    let mut best: Option<Color> = None;
    let mut fallback = foreground;
    let mut fallback_ratio = contrast_ratio(foreground, background);

    for _ in 0..SEARCH_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let candidate = Color::from_hsl(h, s, mid);
        let ratio = contrast_ratio(candidate, background);

        if ratio >= target {
            best = Some(candidate);
            // Move back toward the original lightness
            if darken {
                lo = mid;
            } else {
                hi = mid;
            }
        } else {
            if ratio > fallback_ratio {
                fallback = candidate;
                fallback_ratio = ratio;
            }
            if darken {
                hi = mid;
            } else {
                lo = mid;
            }
        }
    }

    best.unwrap_or(fallback)
}

#[derive(Clone, Debug, Default)]
pub struct ThemeValidator {
    config: ValidatorConfig,
}

impl ThemeValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    fn check_pair(&self, palette: &ColorPalette, fg: ColorToken, bg: ColorToken) -> ColorValidationResult {
        let foreground_color = palette.get(fg);
        let background_color = palette.get(bg);
        let ratio = contrast_ratio(foreground_color, background_color);
        let level = WcagLevel::classify(ratio, self.config.large_text);
        let passes = level.passes();

        let (suggested_color, suggestions) = if passes {
            (None, Vec::new())
        } else {
            let suggested = suggest_adjustment(foreground_color, background_color, self.config.target_ratio);
            let suggestions = vec![
                format!(
                    "{} on {} has contrast {:.2}:1; at least {:.1}:1 is needed",
                    fg.key(),
                    bg.key(),
                    ratio,
                    self.config.target_ratio
                ),
                format!(
                    "Try {} for {} ({:.2}:1)",
                    suggested,
                    fg.key(),
                    contrast_ratio(suggested, background_color)
                ),
            ];
            (Some(suggested), suggestions)
        };

        ColorValidationResult {
            foreground: fg,
            background: bg,
            foreground_color,
            background_color,
            contrast_ratio: ratio,
            level,
            passes,
            suggested_color,
            suggestions,
        }
    }

    /// Check every critical pair of a palette
    pub fn validate_palette(&self, palette: &ColorPalette) -> Vec<ColorValidationResult> {
        CRITICAL_PAIRS
            .iter()
            .map(|(fg, bg)| self.check_pair(palette, *fg, *bg))
            .collect()
    }

    pub fn validate_theme_collection(&self, theme: &ThemeCollection) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        require(&mut errors, &theme.id, "Theme id is required");
        require(&mut errors, &theme.name, "Theme name is required");
        require(&mut errors, &theme.description, "Theme description is required");

        let elevation_report = elevation::validate(&theme.material_config.elevation);
        if !elevation_report.is_valid {
            errors.push(format!(
                "Invalid material elevation: {}",
                elevation_report.warnings.join("; ")
            ));
        }

        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let results = self.validate_palette(theme.palette(scheme));
            let rate = pass_rate(&results);
            let failed = results.iter().filter(|r| !r.passes).count();

            if rate < self.config.pass_rate_threshold {
                errors.push(format!(
                    "{scheme} palette passes {} of {} contrast checks",
                    results.len() - failed,
                    results.len()
                ));
            } else {
                warnings.extend(
                    results
                        .iter()
                        .filter(|r| !r.passes)
                        .map(|r| format!("{scheme}: {}", r.suggestions.join(". "))),
                );
            }
        }

        if !errors.is_empty() {
            tracing::debug!(id = %theme.id, ?errors, "theme failed validation");
        }

        ValidationReport::from_parts(errors, warnings)
    }

    /// Stricter than collections: any failing pair invalidates the scheme
    pub fn validate_custom_theme(&self, theme: &CustomTheme) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        require(&mut errors, &theme.id, "Theme id is required");
        require(&mut errors, &theme.name, "Theme name is required");
        require(&mut errors, &theme.base_theme_id, "Base theme id is required");

        let elevation_report = elevation::validate(&theme.material_config.elevation);
        if !elevation_report.is_valid {
            warnings.extend(elevation_report.warnings);
        }

        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let results = self.validate_palette(&theme.palette(scheme));
            let failed = results.iter().filter(|r| !r.passes).count();
            if failed > 0 {
                errors.push(format!(
                    "{scheme} palette fails {failed} of {} contrast checks",
                    results.len()
                ));
                warnings.extend(
                    results
                        .iter()
                        .filter(|r| !r.passes)
                        .flat_map(|r| r.suggestions.iter().cloned()),
                );
            }
        }

        ValidationReport::from_parts(errors, warnings)
    }
}

fn require(errors: &mut Vec<String>, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(message.to_string());
    }
}

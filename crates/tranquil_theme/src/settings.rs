//! Engine settings (tranquil.toml)
//!
//! ```toml
//! default_theme = "ocean-depth"
//! color_scheme = "dark"
//! visual_mode = "ambient"
//!
//! [performance]
//! tier = "medium"
//! maxConcurrentAnimations = 4
//!
//! [validator]
//! passRateThreshold = 0.75
//! ```
//!
//! Nested tables reuse the camelCase field names of the persisted JSON.

use crate::registry::DEFAULT_THEME_ID;
use crate::theme::ColorScheme;
use crate::validator::ValidatorConfig;
use crate::visual_mode::VisualMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tranquil_animation::{MonitorConfig, PerformanceSettings};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Theme used until the user picks one
    pub default_theme: String,
    pub color_scheme: ColorScheme,
    pub visual_mode: VisualMode,
    pub performance: PerformanceSettings,
    pub monitor: MonitorConfig,
    pub validator: ValidatorConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_theme: DEFAULT_THEME_ID.to_string(),
            color_scheme: ColorScheme::default(),
            visual_mode: VisualMode::default(),
            performance: PerformanceSettings::default(),
            monitor: MonitorConfig::default(),
            validator: ValidatorConfig::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded engine settings");
        Ok(settings)
    }
}

//! Zen mode: distraction-free display settings

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZenModeConfig {
    pub enabled: bool,
    /// Idle time before chrome hides
    pub auto_hide_delay_ms: u32,
    pub hide_navigation: bool,
    pub hide_status_bar: bool,
    /// Screen dimming in `[0, 1]`
    pub dim_level: f32,
    pub reveal_on_tap: bool,
}

impl Default for ZenModeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            auto_hide_delay_ms: 3000,
            hide_navigation: true,
            hide_status_bar: true,
            dim_level: 0.3,
            reveal_on_tap: true,
        }
    }
}

/// Partial update to [`ZenModeConfig`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ZenModeConfigPatch {
    pub enabled: Option<bool>,
    pub auto_hide_delay_ms: Option<u32>,
    pub hide_navigation: Option<bool>,
    pub hide_status_bar: Option<bool>,
    pub dim_level: Option<f32>,
    pub reveal_on_tap: Option<bool>,
}

impl ZenModeConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: ZenModeConfig) -> ZenModeConfig {
        ZenModeConfig {
            enabled: self.enabled.unwrap_or(base.enabled),
            auto_hide_delay_ms: self.auto_hide_delay_ms.unwrap_or(base.auto_hide_delay_ms),
            hide_navigation: self.hide_navigation.unwrap_or(base.hide_navigation),
            hide_status_bar: self.hide_status_bar.unwrap_or(base.hide_status_bar),
            dim_level: self.dim_level.unwrap_or(base.dim_level).clamp(0.0, 1.0),
            reveal_on_tap: self.reveal_on_tap.unwrap_or(base.reveal_on_tap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_clamps_dim_level() {
        let patch = ZenModeConfigPatch {
            enabled: Some(true),
            dim_level: Some(1.7),
            ..Default::default()
        };
        let config = patch.apply(ZenModeConfig::default());
        assert!(config.enabled);
        assert_eq!(config.dim_level, 1.0);
        assert_eq!(config.auto_hide_delay_ms, 3000);
    }

    #[test]
    fn config_uses_camel_case_keys() {
        let json = serde_json::to_value(ZenModeConfig::default()).unwrap();
        assert_eq!(json["autoHideDelayMs"], 3000);
        assert!(serde_json::from_str::<ZenModeConfigPatch>(r#"{"dim": 0.5}"#).is_err());
    }
}

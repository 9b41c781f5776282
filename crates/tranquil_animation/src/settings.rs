//! Performance settings shared by the animation manager and visual modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse quality tier driving animation quality and effect availability
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    #[default]
    High,
}

impl PerformanceTier {
    /// One step lower, saturating at `Low`
    pub fn downgrade(self) -> Self {
        match self {
            PerformanceTier::High => PerformanceTier::Medium,
            _ => PerformanceTier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceTier::Low => "low",
            PerformanceTier::Medium => "medium",
            PerformanceTier::High => "high",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(PerformanceTier::Low),
            "medium" => Ok(PerformanceTier::Medium),
            "high" => Ok(PerformanceTier::High),
            other => Err(format!("unknown performance tier {other:?}")),
        }
    }
}

/// Runtime performance settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PerformanceSettings {
    pub tier: PerformanceTier,
    /// Accessibility flag: suppress motion entirely
    pub reduced_motion: bool,
    pub max_concurrent_animations: u32,
    pub enable_particles: bool,
    pub battery_saver: bool,
    pub target_fps: u32,
}

impl PerformanceSettings {
    /// Floor for self-correcting concurrency reductions
    pub const MIN_CONCURRENT_ANIMATIONS: u32 = 2;

    pub fn target_frame_time_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            tier: PerformanceTier::High,
            reduced_motion: false,
            max_concurrent_animations: 8,
            enable_particles: true,
            battery_saver: false,
            target_fps: 60,
        }
    }
}

/// Partial update to [`PerformanceSettings`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PerformanceSettingsPatch {
    pub tier: Option<PerformanceTier>,
    pub reduced_motion: Option<bool>,
    pub max_concurrent_animations: Option<u32>,
    pub enable_particles: Option<bool>,
    pub battery_saver: Option<bool>,
    pub target_fps: Option<u32>,
}

impl PerformanceSettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: PerformanceSettings) -> PerformanceSettings {
        PerformanceSettings {
            tier: self.tier.unwrap_or(base.tier),
            reduced_motion: self.reduced_motion.unwrap_or(base.reduced_motion),
            max_concurrent_animations: self
                .max_concurrent_animations
                .unwrap_or(base.max_concurrent_animations),
            enable_particles: self.enable_particles.unwrap_or(base.enable_particles),
            battery_saver: self.battery_saver.unwrap_or(base.battery_saver),
            target_fps: self.target_fps.unwrap_or(base.target_fps),
        }
    }

    /// Combine two nudges, keeping the more conservative value for each field
    pub fn merge_conservative(self, other: Self) -> Self {
        fn pick<T: Ord>(a: Option<T>, b: Option<T>) -> Option<T> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            }
        }
        fn any(a: Option<bool>, b: Option<bool>) -> Option<bool> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a || b),
                (a, b) => a.or(b),
            }
        }
        fn all(a: Option<bool>, b: Option<bool>) -> Option<bool> {
            match (a, b) {
                (Some(a), Some(b)) => Some(a && b),
                (a, b) => a.or(b),
            }
        }

        Self {
            tier: pick(self.tier, other.tier),
            reduced_motion: any(self.reduced_motion, other.reduced_motion),
            max_concurrent_animations: pick(
                self.max_concurrent_animations,
                other.max_concurrent_animations,
            ),
            enable_particles: all(self.enable_particles, other.enable_particles),
            battery_saver: any(self.battery_saver, other.battery_saver),
            target_fps: pick(self.target_fps, other.target_fps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_ordering_and_downgrade() {
        assert!(PerformanceTier::Low < PerformanceTier::High);
        assert_eq!(PerformanceTier::High.downgrade(), PerformanceTier::Medium);
        assert_eq!(PerformanceTier::Low.downgrade(), PerformanceTier::Low);
        assert_eq!("Medium".parse::<PerformanceTier>(), Ok(PerformanceTier::Medium));
        assert!("ultra".parse::<PerformanceTier>().is_err());
    }

    #[test]
    fn conservative_merge_prefers_lower_quality() {
        let a = PerformanceSettingsPatch {
            tier: Some(PerformanceTier::Medium),
            max_concurrent_animations: Some(4),
            enable_particles: Some(true),
            ..Default::default()
        };
        let b = PerformanceSettingsPatch {
            tier: Some(PerformanceTier::Low),
            enable_particles: Some(false),
            reduced_motion: Some(true),
            ..Default::default()
        };
        let merged = a.merge_conservative(b);
        assert_eq!(merged.tier, Some(PerformanceTier::Low));
        assert_eq!(merged.max_concurrent_animations, Some(4));
        assert_eq!(merged.enable_particles, Some(false));
        assert_eq!(merged.reduced_motion, Some(true));
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: PerformanceSettings = serde_json::from_str(r#"{"tier": "low"}"#).unwrap();
        assert_eq!(settings.tier, PerformanceTier::Low);
        assert_eq!(settings.max_concurrent_animations, 8);
        assert!(serde_json::from_str::<PerformanceSettings>(r#"{"turbo": true}"#).is_err());
    }
}

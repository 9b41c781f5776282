//! Visual mode engine
//!
//! A small state machine over [`VisualMode`]. Each mode owns a fixed template
//! of decorative effects. Mutations never touch the templates; they are kept
//! in a per-engine overlay keyed by `(mode, effect)` and resolved on read, so
//! a mode keeps its changes across switches and two engines never share state.
//!
//! The engine also derives a [`TimerVisualization`] from the current mode and
//! performance tier.

use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tranquil_animation::{AnimationConfig, BatteryImpact, DigitTransitionKind, Easing, PerformanceTier};

/// Longest effect animation allowed on the low tier
pub const LOW_TIER_MAX_DURATION_MS: u32 = 1000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    #[default]
    Minimal,
    Artistic,
    Ambient,
}

impl VisualMode {
    pub fn all() -> &'static [VisualMode] {
        &[VisualMode::Minimal, VisualMode::Artistic, VisualMode::Ambient]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisualMode::Minimal => "minimal",
            VisualMode::Artistic => "artistic",
            VisualMode::Ambient => "ambient",
        }
    }

    fn index(self) -> usize {
        match self {
            VisualMode::Minimal => 0,
            VisualMode::Artistic => 1,
            VisualMode::Ambient => 2,
        }
    }
}

impl fmt::Display for VisualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(VisualMode::Minimal),
            "artistic" => Ok(VisualMode::Artistic),
            "ambient" => Ok(VisualMode::Ambient),
            other => Err(format!("unknown visual mode {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Background,
    Particles,
    Gradient,
    Pattern,
    Typography,
}

impl FromStr for EffectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "background" => Ok(EffectType::Background),
            "particles" => Ok(EffectType::Particles),
            "gradient" => Ok(EffectType::Gradient),
            "pattern" => Ok(EffectType::Pattern),
            "typography" => Ok(EffectType::Typography),
            other => Err(format!("unknown effect type {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectIntensity {
    Subtle,
    Moderate,
    Prominent,
}

impl EffectIntensity {
    /// Loop length of the effect animation
    pub fn duration_ms(self) -> u32 {
        match self {
            EffectIntensity::Subtle => 8000,
            EffectIntensity::Moderate => 5000,
            EffectIntensity::Prominent => 3000,
        }
    }

    /// The looping animation every effect at this intensity runs
    pub fn animation(self) -> AnimationConfig {
        AnimationConfig::new(self.duration_ms())
            .with_easing(Easing::EaseInOutSine)
            .looping()
    }
}

/// Rendering cost of an effect, also used for aggregate impact
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceCost {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEffect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    pub intensity: EffectIntensity,
    pub animation: AnimationConfig,
    pub performance_cost: PerformanceCost,
    pub enabled: bool,
}

impl VisualEffect {
    fn template(effect_type: EffectType, intensity: EffectIntensity, performance_cost: PerformanceCost) -> Self {
        Self {
            effect_type,
            intensity,
            animation: intensity.animation(),
            performance_cost,
            enabled: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualModeConfig {
    pub id: VisualMode,
    pub name: String,
    pub description: String,
    pub effects: Vec<VisualEffect>,
    pub performance_impact: PerformanceCost,
    pub battery_impact: BatteryImpact,
}

impl VisualModeConfig {
    pub fn effect(&self, effect_type: EffectType) -> Option<&VisualEffect> {
        self.effects.iter().find(|e| e.effect_type == effect_type)
    }
}

/// Immutable template for a mode, shared by every engine
pub fn template(mode: VisualMode) -> &'static VisualModeConfig {
    static TEMPLATES: OnceLock<[VisualModeConfig; 3]> = OnceLock::new();
    let templates = TEMPLATES.get_or_init(|| {
        use EffectIntensity::*;
        use EffectType::*;
        use PerformanceCost as Cost;

        [
            VisualModeConfig {
                id: VisualMode::Minimal,
                name: "Minimal".into(),
                description: "Clean typography on a still background".into(),
                effects: vec![
                    VisualEffect::template(Typography, Subtle, Cost::Low),
                    VisualEffect::template(Background, Subtle, Cost::Low),
                ],
                performance_impact: Cost::Low,
                battery_impact: BatteryImpact::Low,
            },
            VisualModeConfig {
                id: VisualMode::Artistic,
                name: "Artistic".into(),
                description: "Slow gradients and patterns behind expressive digits".into(),
                effects: vec![
                    VisualEffect::template(Gradient, Moderate, Cost::Medium),
                    VisualEffect::template(Pattern, Subtle, Cost::Low),
                    VisualEffect::template(Typography, Moderate, Cost::Low),
                    VisualEffect::template(Background, Moderate, Cost::Low),
                ],
                performance_impact: Cost::Medium,
                battery_impact: BatteryImpact::Medium,
            },
            VisualModeConfig {
                id: VisualMode::Ambient,
                name: "Ambient".into(),
                description: "Drifting particles and a breathing, time-aware backdrop".into(),
                effects: vec![
                    VisualEffect::template(Background, Subtle, Cost::Low),
                    VisualEffect::template(Particles, Subtle, Cost::High),
                    VisualEffect::template(Gradient, Moderate, Cost::Medium),
                ],
                performance_impact: Cost::Medium,
                battery_impact: BatteryImpact::High,
            },
        ]
    });
    &templates[mode.index()]
}

/// Fields of an effect changed on one engine
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct EffectOverlay {
    enabled: Option<bool>,
    intensity: Option<EffectIntensity>,
    /// Explicit animation; derived from the intensity when unset
    animation: Option<AnimationConfig>,
}

impl EffectOverlay {
    fn resolve(&self, template: &VisualEffect) -> VisualEffect {
        let intensity = self.intensity.unwrap_or(template.intensity);
        let animation = match (self.animation, self.intensity) {
            (Some(animation), _) => animation,
            (None, Some(intensity)) => intensity.animation(),
            (None, None) => template.animation,
        };
        VisualEffect {
            intensity,
            animation,
            enabled: self.enabled.unwrap_or(template.enabled),
            ..*template
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressIndicator {
    #[default]
    Bar,
    Ring,
    Dots,
    None,
}

/// How the clock face renders time for the current mode and tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerVisualization {
    pub digit_transition: DigitTransitionKind,
    /// Per-second tick animation
    pub tick_animation: bool,
    pub progress_indicator: ProgressIndicator,
    pub ambient_particles: bool,
    pub time_based_gradient: bool,
    pub breathing_background: bool,
}

impl TimerVisualization {
    pub fn for_mode(mode: VisualMode, tier: PerformanceTier) -> Self {
        use DigitTransitionKind as Digit;
        use PerformanceTier::*;
        use ProgressIndicator as Progress;

        let (digit_transition, tick_animation, progress_indicator, ambient_particles, time_based_gradient, breathing_background) =
            match (mode, tier) {
                (VisualMode::Minimal, High | Medium) => (Digit::Fade, false, Progress::Bar, false, false, false),
                (VisualMode::Minimal, Low) => (Digit::None, false, Progress::None, false, false, false),
                (VisualMode::Artistic, High) => (Digit::Flip, true, Progress::Ring, false, true, false),
                (VisualMode::Artistic, Medium) => (Digit::Slide, false, Progress::Ring, false, true, false),
                (VisualMode::Artistic, Low) => (Digit::Fade, false, Progress::Bar, false, false, false),
                (VisualMode::Ambient, High) => (Digit::Fade, true, Progress::Ring, true, true, true),
                (VisualMode::Ambient, Medium) => (Digit::Fade, false, Progress::Dots, false, true, true),
                (VisualMode::Ambient, Low) => (Digit::Fade, false, Progress::None, false, false, false),
            };

        Self {
            digit_transition,
            tick_animation,
            progress_indicator,
            ambient_particles,
            time_based_gradient,
            breathing_background,
        }
    }
}

#[derive(Debug)]
pub struct VisualModeEngine {
    mode: VisualMode,
    tier: PerformanceTier,
    particles_allowed: bool,
    overlays: FxHashMap<(VisualMode, EffectType), EffectOverlay>,
    visualization: TimerVisualization,
}

impl Default for VisualModeEngine {
    fn default() -> Self {
        Self::new(VisualMode::default(), PerformanceTier::default())
    }
}

impl VisualModeEngine {
    pub fn new(mode: VisualMode, tier: PerformanceTier) -> Self {
        Self {
            mode,
            tier,
            particles_allowed: true,
            overlays: FxHashMap::default(),
            visualization: TimerVisualization::for_mode(mode, tier),
        }
    }

    pub fn mode(&self) -> VisualMode {
        self.mode
    }

    pub fn tier(&self) -> PerformanceTier {
        self.tier
    }

    pub fn particles_allowed(&self) -> bool {
        self.particles_allowed
    }

    /// Switch modes. Returns false when already in `mode`.
    pub fn switch_mode(&mut self, mode: VisualMode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::debug!(from = %self.mode, to = %mode, "visual mode switched");
        self.mode = mode;
        self.visualization = TimerVisualization::for_mode(self.mode, self.tier);
        true
    }

    /// Switch by name; unknown names are ignored
    pub fn switch_mode_str(&mut self, mode: &str) -> bool {
        match mode.parse::<VisualMode>() {
            Ok(mode) => self.switch_mode(mode),
            Err(err) => {
                tracing::debug!(%err, "ignoring visual mode switch");
                false
            }
        }
    }

    fn resolve(&self, mode: VisualMode, template: &VisualEffect) -> VisualEffect {
        match self.overlays.get(&(mode, template.effect_type)) {
            Some(overlay) => overlay.resolve(template),
            None => *template,
        }
    }

    /// Every effect of `mode` with this engine's changes applied
    pub fn effects(&self, mode: VisualMode) -> Vec<VisualEffect> {
        template(mode).effects.iter().map(|e| self.resolve(mode, e)).collect()
    }

    pub fn effect(&self, effect_type: EffectType) -> Option<VisualEffect> {
        template(self.mode)
            .effect(effect_type)
            .map(|e| self.resolve(self.mode, e))
    }

    /// The current mode's config with resolved effects
    pub fn current_config(&self) -> VisualModeConfig {
        VisualModeConfig {
            effects: self.effects(self.mode),
            ..template(self.mode).clone()
        }
    }

    pub fn active_effects(&self) -> Vec<VisualEffect> {
        self.effects(self.mode).into_iter().filter(|e| e.enabled).collect()
    }

    fn overlay_mut(&mut self, mode: VisualMode, effect_type: EffectType) -> Option<&mut EffectOverlay> {
        template(mode).effect(effect_type)?;
        Some(self.overlays.entry((mode, effect_type)).or_default())
    }

    fn set_enabled(&mut self, effect_type: EffectType, enabled: bool) -> bool {
        let mode = self.mode;
        match self.overlay_mut(mode, effect_type) {
            Some(overlay) => {
                overlay.enabled = Some(enabled);
                true
            }
            None => false,
        }
    }

    /// Returns false if the current mode has no such effect
    pub fn enable_effect(&mut self, effect_type: EffectType) -> bool {
        self.set_enabled(effect_type, true)
    }

    pub fn disable_effect(&mut self, effect_type: EffectType) -> bool {
        self.set_enabled(effect_type, false)
    }

    /// Change intensity and re-derive the effect animation from it
    pub fn set_intensity(&mut self, effect_type: EffectType, intensity: EffectIntensity) -> bool {
        let mode = self.mode;
        let Some(overlay) = self.overlay_mut(mode, effect_type) else {
            return false;
        };
        overlay.intensity = Some(intensity);
        overlay.animation = None;

        if self.tier == PerformanceTier::Low {
            self.cap_duration(mode, effect_type);
        }
        true
    }

    fn cap_duration(&mut self, mode: VisualMode, effect_type: EffectType) {
        let Some(template_effect) = template(mode).effect(effect_type) else {
            return;
        };
        let animation = self.resolve(mode, template_effect).animation;
        if animation.duration_ms <= LOW_TIER_MAX_DURATION_MS {
            return;
        }
        if let Some(overlay) = self.overlays.get_mut(&(mode, effect_type)) {
            overlay.animation = Some(animation.with_duration(LOW_TIER_MAX_DURATION_MS));
        }
    }

    /// Allow or forbid particle effects in every mode.
    ///
    /// Allowing re-enables particles only where the current tier supports them.
    pub fn allow_particles(&mut self, allowed: bool) {
        tracing::debug!(allowed, "particle effects toggled");
        self.particles_allowed = allowed;

        for &mode in VisualMode::all() {
            let Some(template_effect) = template(mode).effect(EffectType::Particles) else {
                continue;
            };
            let current = self.resolve(mode, template_effect);
            let enabled = allowed && template_effect.enabled && Self::tier_supports(self.tier, &current);
            self.overlays.entry((mode, EffectType::Particles)).or_default().enabled = Some(enabled);
        }
    }

    /// Adapt every mode's effects to `tier` and recompute the timer visualization
    pub fn optimize_for_performance(&mut self, tier: PerformanceTier) {
        tracing::debug!(%tier, mode = %self.mode, "optimizing visual effects");
        self.tier = tier;

        for &mode in VisualMode::all() {
            for template_effect in &template(mode).effects {
                let current = self.resolve(mode, template_effect);
                let allowed = self.particles_allowed || template_effect.effect_type != EffectType::Particles;
                let overlay = self.overlays.entry((mode, template_effect.effect_type)).or_default();

                match tier {
                    PerformanceTier::Low => {
                        if Self::low_tier_rejects(&current) {
                            overlay.enabled = Some(false);
                        }
                        if current.animation.duration_ms > LOW_TIER_MAX_DURATION_MS {
                            overlay.animation = Some(current.animation.with_duration(LOW_TIER_MAX_DURATION_MS));
                        }
                    }
                    PerformanceTier::Medium => {
                        if current.intensity == EffectIntensity::Prominent {
                            overlay.intensity = Some(EffectIntensity::Moderate);
                            overlay.animation = None;
                        }
                    }
                    PerformanceTier::High => {
                        overlay.enabled = Some(allowed);
                        overlay.animation = None;
                    }
                }
            }
        }

        self.visualization = TimerVisualization::for_mode(self.mode, self.tier);
    }

    fn low_tier_rejects(effect: &VisualEffect) -> bool {
        effect.effect_type == EffectType::Particles || effect.performance_cost == PerformanceCost::High
    }

    fn tier_supports(tier: PerformanceTier, effect: &VisualEffect) -> bool {
        match tier {
            PerformanceTier::Low => !Self::low_tier_rejects(effect),
            PerformanceTier::Medium => {
                !(effect.effect_type == EffectType::Particles && effect.intensity == EffectIntensity::Prominent)
            }
            PerformanceTier::High => true,
        }
    }

    /// Whether the current mode may show `effect_type` on the current tier
    pub fn is_effect_supported(&self, effect_type: EffectType) -> bool {
        let Some(effect) = self.effect(effect_type) else {
            return false;
        };
        if effect_type == EffectType::Particles && !self.particles_allowed {
            return false;
        }
        Self::tier_supports(self.tier, &effect)
    }

    /// Aggregate cost of the current mode's active effects
    pub fn performance_impact(&self) -> PerformanceCost {
        if self.mode == VisualMode::Minimal {
            return PerformanceCost::Low;
        }
        let active = self.active_effects();
        if active.is_empty() {
            return PerformanceCost::Low;
        }
        let heavy = active
            .iter()
            .any(|e| e.performance_cost == PerformanceCost::High || e.effect_type == EffectType::Particles);
        if heavy {
            PerformanceCost::High
        } else if active.len() > 2 {
            PerformanceCost::Medium
        } else {
            template(self.mode).performance_impact
        }
    }

    pub fn timer_visualization(&self) -> TimerVisualization {
        self.visualization
    }

    /// Drop effect changes made on this engine. Tier and particle limits stay.
    pub fn reset(&mut self) {
        self.overlays.clear();
        if self.tier != PerformanceTier::High {
            self.optimize_for_performance(self.tier);
        }
        if !self.particles_allowed {
            self.allow_particles(false);
        }
        self.visualization = TimerVisualization::for_mode(self.mode, self.tier);
    }
}

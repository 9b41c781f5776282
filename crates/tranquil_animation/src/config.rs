//! Animation configuration values
//!
//! [`AnimationConfig`] is an immutable description of a single animation:
//! duration, easing, delay, iteration count, direction and fill mode.
//! Partial updates go through [`AnimationConfigPatch`], which lists the fields
//! that may change and rejects anything else when deserialized.

use crate::easing::Easing;
use serde::{Deserialize, Serialize};

/// How many times an animation body repeats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IterationsRepr", into = "IterationsRepr")]
pub enum Iterations {
    /// A positive repeat count
    Count(u32),
    Infinite,
}

impl Iterations {
    pub const ONCE: Iterations = Iterations::Count(1);

    /// Positive count; zero is bumped to one
    pub fn count(n: u32) -> Self {
        Iterations::Count(n.max(1))
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Iterations::Infinite)
    }

    /// Whether iteration `index` (zero based) should still play
    pub fn allows(self, index: u32) -> bool {
        match self {
            Iterations::Count(n) => index < n,
            Iterations::Infinite => true,
        }
    }
}

impl Default for Iterations {
    fn default() -> Self {
        Iterations::ONCE
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum IterationsRepr {
    Count(u32),
    Keyword(InfiniteKeyword),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
enum InfiniteKeyword {
    #[serde(rename = "infinite")]
    Infinite,
}

impl TryFrom<IterationsRepr> for Iterations {
    type Error = String;

    fn try_from(repr: IterationsRepr) -> Result<Self, Self::Error> {
        match repr {
            IterationsRepr::Count(0) => Err("iterations must be a positive integer".to_string()),
            IterationsRepr::Count(n) => Ok(Iterations::Count(n)),
            IterationsRepr::Keyword(InfiniteKeyword::Infinite) => Ok(Iterations::Infinite),
        }
    }
}

impl From<Iterations> for IterationsRepr {
    fn from(iterations: Iterations) -> Self {
        match iterations {
            Iterations::Count(n) => IterationsRepr::Count(n),
            Iterations::Infinite => IterationsRepr::Keyword(InfiniteKeyword::Infinite),
        }
    }
}

/// Playback direction across iterations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Normal,
    Reverse,
    /// Odd iterations play backwards
    Alternate,
    AlternateReverse,
}

/// Which value is held outside the active interval
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillMode {
    None,
    /// Keep the final value after completion
    #[default]
    Forwards,
    Backwards,
    Both,
}

impl FillMode {
    pub fn holds_end(self) -> bool {
        matches!(self, FillMode::Forwards | FillMode::Both)
    }
}

/// Immutable animation description
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default)]
    pub iterations: Iterations,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub fill_mode: FillMode,
}

impl AnimationConfig {
    pub const fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            easing: Easing::Linear,
            delay_ms: 0,
            iterations: Iterations::ONCE,
            direction: Direction::Normal,
            fill_mode: FillMode::Forwards,
        }
    }

    /// A config that completes immediately
    pub const fn instant() -> Self {
        Self::new(0)
    }

    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub const fn with_delay(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub const fn with_iterations(mut self, iterations: Iterations) -> Self {
        self.iterations = iterations;
        self
    }

    pub const fn looping(self) -> Self {
        self.with_iterations(Iterations::Infinite)
    }

    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub const fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub const fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// The reduced-motion form of this config: zero duration and delay, one iteration
    pub const fn reduced_motion(self) -> Self {
        Self {
            duration_ms: 0,
            delay_ms: 0,
            iterations: Iterations::ONCE,
            ..self
        }
    }

    /// Half of the duration, used by two-phase transitions
    pub const fn half_duration_ms(&self) -> u32 {
        self.duration_ms / 2
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(300).with_easing(Easing::STANDARD)
    }
}

/// Partial update to an [`AnimationConfig`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnimationConfigPatch {
    pub duration_ms: Option<u32>,
    pub easing: Option<Easing>,
    pub delay_ms: Option<u32>,
    pub iterations: Option<Iterations>,
    pub direction: Option<Direction>,
    pub fill_mode: Option<FillMode>,
}

impl AnimationConfigPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, base: AnimationConfig) -> AnimationConfig {
        AnimationConfig {
            duration_ms: self.duration_ms.unwrap_or(base.duration_ms),
            easing: self.easing.unwrap_or(base.easing),
            delay_ms: self.delay_ms.unwrap_or(base.delay_ms),
            iterations: self.iterations.unwrap_or(base.iterations),
            direction: self.direction.unwrap_or(base.direction),
            fill_mode: self.fill_mode.unwrap_or(base.fill_mode),
        }
    }
}

/// Named animation slots carried by every theme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationSlot {
    ThemeTransition,
    DigitTransition,
    Breathing,
    Pulse,
    FadeIn,
    FadeOut,
    ScaleIn,
    SlideIn,
}

impl AnimationSlot {
    pub fn all() -> &'static [AnimationSlot] {
        const SLOTS: [AnimationSlot; 8] = [
            AnimationSlot::ThemeTransition,
            AnimationSlot::DigitTransition,
            AnimationSlot::Breathing,
            AnimationSlot::Pulse,
            AnimationSlot::FadeIn,
            AnimationSlot::FadeOut,
            AnimationSlot::ScaleIn,
            AnimationSlot::SlideIn,
        ];
        &SLOTS
    }

    /// Stable key used in serialized theme files
    pub fn key(self) -> &'static str {
        match self {
            AnimationSlot::ThemeTransition => "themeTransition",
            AnimationSlot::DigitTransition => "digitTransition",
            AnimationSlot::Breathing => "breathing",
            AnimationSlot::Pulse => "pulse",
            AnimationSlot::FadeIn => "fadeIn",
            AnimationSlot::FadeOut => "fadeOut",
            AnimationSlot::ScaleIn => "scaleIn",
            AnimationSlot::SlideIn => "slideIn",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|slot| slot.key() == key)
    }
}

/// Animation configs for every [`AnimationSlot`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeAnimations {
    pub theme_transition: AnimationConfig,
    pub digit_transition: AnimationConfig,
    pub breathing: AnimationConfig,
    pub pulse: AnimationConfig,
    pub fade_in: AnimationConfig,
    pub fade_out: AnimationConfig,
    pub scale_in: AnimationConfig,
    pub slide_in: AnimationConfig,
}

impl ThemeAnimations {
    pub fn get(&self, slot: AnimationSlot) -> AnimationConfig {
        match slot {
            AnimationSlot::ThemeTransition => self.theme_transition,
            AnimationSlot::DigitTransition => self.digit_transition,
            AnimationSlot::Breathing => self.breathing,
            AnimationSlot::Pulse => self.pulse,
            AnimationSlot::FadeIn => self.fade_in,
            AnimationSlot::FadeOut => self.fade_out,
            AnimationSlot::ScaleIn => self.scale_in,
            AnimationSlot::SlideIn => self.slide_in,
        }
    }

    /// Slower, gentler timings used by calm themes
    pub fn relaxed() -> Self {
        let base = Self::default();
        Self {
            theme_transition: base.theme_transition.with_duration(450),
            digit_transition: base.digit_transition.with_duration(320),
            breathing: base.breathing.with_duration(6000),
            pulse: base.pulse.with_duration(2400),
            ..base
        }
    }
}

impl Default for ThemeAnimations {
    fn default() -> Self {
        Self {
            theme_transition: AnimationConfig::new(300).with_easing(Easing::EaseInOut),
            digit_transition: AnimationConfig::new(200).with_easing(Easing::STANDARD),
            breathing: AnimationConfig::new(4000)
                .with_easing(Easing::EaseInOutSine)
                .looping(),
            pulse: AnimationConfig::new(1500)
                .with_easing(Easing::EaseInOut)
                .looping(),
            fade_in: AnimationConfig::new(250).with_easing(Easing::DECELERATE),
            fade_out: AnimationConfig::new(200).with_easing(Easing::ACCELERATE),
            scale_in: AnimationConfig::new(300).with_easing(Easing::EaseOutBack),
            slide_in: AnimationConfig::new(300).with_easing(Easing::DECELERATE),
        }
    }
}

/// Partial update to [`ThemeAnimations`], one optional patch per slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeAnimationsPatch {
    pub theme_transition: Option<AnimationConfigPatch>,
    pub digit_transition: Option<AnimationConfigPatch>,
    pub breathing: Option<AnimationConfigPatch>,
    pub pulse: Option<AnimationConfigPatch>,
    pub fade_in: Option<AnimationConfigPatch>,
    pub fade_out: Option<AnimationConfigPatch>,
    pub scale_in: Option<AnimationConfigPatch>,
    pub slide_in: Option<AnimationConfigPatch>,
}

impl ThemeAnimationsPatch {
    pub fn apply(&self, base: &ThemeAnimations) -> ThemeAnimations {
        let patch = |p: Option<AnimationConfigPatch>, c: AnimationConfig| match p {
            Some(p) => p.apply(c),
            None => c,
        };
        ThemeAnimations {
            theme_transition: patch(self.theme_transition, base.theme_transition),
            digit_transition: patch(self.digit_transition, base.digit_transition),
            breathing: patch(self.breathing, base.breathing),
            pulse: patch(self.pulse, base.pulse),
            fade_in: patch(self.fade_in, base.fade_in),
            fade_out: patch(self.fade_out, base.fade_out),
            scale_in: patch(self.scale_in, base.scale_in),
            slide_in: patch(self.slide_in, base.slide_in),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reduced_motion_zeroes_timing() {
        let config = AnimationConfig::new(4000).with_delay(250).looping();
        let reduced = config.reduced_motion();
        assert_eq!(reduced.duration_ms, 0);
        assert_eq!(reduced.delay_ms, 0);
        assert_eq!(reduced.iterations, Iterations::ONCE);
        assert_eq!(reduced.easing, config.easing);
    }

    #[test]
    fn iterations_serialize_as_number_or_keyword() {
        assert_eq!(serde_json::to_string(&Iterations::Count(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Iterations::Infinite).unwrap(),
            "\"infinite\""
        );
        let parsed: Iterations = serde_json::from_str("\"infinite\"").unwrap();
        assert_eq!(parsed, Iterations::Infinite);
        assert!(serde_json::from_str::<Iterations>("0").is_err());
        assert!(serde_json::from_str::<Iterations>("\"forever\"").is_err());
    }

    #[test]
    fn zero_iterations_become_one() {
        assert_eq!(Iterations::count(0), Iterations::ONCE);
        assert!(Iterations::count(3).allows(2));
        assert!(!Iterations::count(3).allows(3));
    }

    #[test]
    fn config_json_uses_camel_case() {
        let json = serde_json::to_value(AnimationConfig::new(200).looping()).unwrap();
        assert_eq!(json["durationMs"], 200);
        assert_eq!(json["iterations"], "infinite");
        assert_eq!(json["fillMode"], "forwards");
    }

    #[test]
    fn patch_overrides_only_named_fields() {
        let base = AnimationConfig::new(300).with_easing(Easing::EaseIn);
        let patch = AnimationConfigPatch {
            duration_ms: Some(120),
            ..Default::default()
        };
        let patched = patch.apply(base);
        assert_eq!(patched.duration_ms, 120);
        assert_eq!(patched.easing, Easing::EaseIn);
        assert!(AnimationConfigPatch::default().is_empty());
    }

    #[test]
    fn patch_rejects_unknown_keys() {
        let err = serde_json::from_str::<AnimationConfigPatch>(r#"{"durationMs": 10, "speed": 2}"#);
        assert!(err.is_err());
    }

    #[test]
    fn theme_animations_patch_targets_one_slot() {
        let base = ThemeAnimations::default();
        let patch: ThemeAnimationsPatch =
            serde_json::from_str(r#"{"pulse": {"durationMs": 900}}"#).unwrap();
        let patched = patch.apply(&base);
        assert_eq!(patched.pulse.duration_ms, 900);
        assert_eq!(patched.breathing, base.breathing);
    }

    #[test]
    fn slot_keys_round_trip() {
        for slot in AnimationSlot::all() {
            assert_eq!(AnimationSlot::from_key(slot.key()), Some(*slot));
        }
        assert_eq!(AnimationSlot::from_key("wobble"), None);
    }
}

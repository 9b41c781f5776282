//! Animation presets for the clock's recurring motions
//!
//! Each preset turns an (already optimized) [`AnimationConfig`] into a
//! [`Track`]. Iterations, delay and fill come from the config, so a
//! reduced-motion config collapses every preset to a single instant pass.

use crate::config::AnimationConfig;
use crate::easing::Easing;
use crate::track::Track;
use serde::{Deserialize, Serialize};

/// How a changing clock digit animates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitTransitionKind {
    /// Fade out, then back in
    #[default]
    Fade,
    /// Grow slightly, then settle back
    Scale,
    /// Swing in from edge-on with overshoot
    Flip,
    /// Slide in and decelerate
    Slide,
    /// Hard cut
    None,
}

/// Peak scale for [`DigitTransitionKind::Scale`]
pub const DIGIT_SCALE_PEAK: f32 = 1.1;

/// Pre-built tracks
pub struct AnimationPreset;

impl AnimationPreset {
    fn shaped(track: Track, config: &AnimationConfig) -> Track {
        track
            .iterations(config.iterations)
            .delay(config.delay_ms)
            .fill(config.fill_mode)
    }

    /// Fade to 0, run `apply` at the midpoint, fade back to 1
    pub fn theme_transition<F: FnMut() + 'static>(config: &AnimationConfig, apply: F) -> Track {
        let half = config.half_duration_ms();
        let track = Track::new()
            .tween(0.0, half, config.easing)
            .call(apply)
            .tween(1.0, config.duration_ms - half, config.easing);
        Self::shaped(track, config)
    }

    /// Slow swell between `min` and `max`
    pub fn breathing(config: &AnimationConfig, min: f32, max: f32) -> Track {
        let half = config.half_duration_ms();
        let track = Track::new()
            .tween(max, half, config.easing)
            .tween(min, config.duration_ms - half, config.easing);
        Self::shaped(track, config)
    }

    /// One segment from `start` to `scale`, restarting from `start` every iteration
    pub fn pulse(config: &AnimationConfig, start: f32, scale: f32) -> Track {
        let track = Track::new()
            .set(start)
            .tween(scale, config.duration_ms, config.easing);
        Self::shaped(track, config)
    }

    pub fn digit(config: &AnimationConfig, kind: DigitTransitionKind) -> Track {
        let half = config.half_duration_ms();
        let rest = config.duration_ms - half;
        let track = match kind {
            DigitTransitionKind::Fade => Track::new()
                .tween(0.0, half, config.easing)
                .tween(1.0, rest, config.easing),
            DigitTransitionKind::Scale => Track::new()
                .tween(DIGIT_SCALE_PEAK, half, config.easing)
                .tween(1.0, rest, config.easing),
            DigitTransitionKind::Flip => Track::new()
                .set(0.0)
                .tween(1.0, config.duration_ms, Easing::EaseOutBack),
            DigitTransitionKind::Slide => Track::new()
                .set(0.0)
                .tween(1.0, config.duration_ms, Easing::EaseOutCubic),
            DigitTransitionKind::None => Track::new().set(1.0),
        };
        Self::shaped(track, config)
    }

    pub fn fade_in(config: &AnimationConfig) -> Track {
        Self::shaped(
            Track::new()
                .set(0.0)
                .tween(1.0, config.duration_ms, config.easing),
            config,
        )
    }

    pub fn fade_out(config: &AnimationConfig) -> Track {
        Self::shaped(
            Track::new()
                .set(1.0)
                .tween(0.0, config.duration_ms, config.easing),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Iterations;
    use crate::track::Playback;
    use crate::value::AnimatedValue;
    use std::cell::Cell;
    use std::rc::Rc;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn theme_transition_swaps_at_midpoint() {
        let opacity = AnimatedValue::new(1.0);
        let swapped_at = Rc::new(Cell::new(f32::NAN));
        let watched = opacity.clone();
        let marker = swapped_at.clone();

        let config = AnimationConfig::new(300);
        let track = AnimationPreset::theme_transition(&config, move || marker.set(watched.get()));
        let mut playback = Playback::new(opacity.clone(), track);

        playback.advance(100.0);
        assert!(swapped_at.get().is_nan());
        playback.advance(50.0);
        assert_eq!(swapped_at.get(), 0.0);
        assert!(playback.advance(150.0));
        assert_eq!(opacity.get(), 1.0);
    }

    #[test]
    fn breathing_reaches_both_bounds() {
        let value = AnimatedValue::new(0.6);
        let config = AnimationConfig::new(4000).looping();
        let mut playback = Playback::new(value.clone(), AnimationPreset::breathing(&config, 0.6, 1.0));

        playback.advance(2000.0);
        assert!(approx(value.get(), 1.0));
        playback.advance(2000.0);
        assert!(approx(value.get(), 0.6));
        assert!(!playback.advance(1000.0));
    }

    #[test]
    fn pulse_restarts_from_start_each_iteration() {
        let value = AnimatedValue::new(1.0);
        let config = AnimationConfig::new(100).with_iterations(Iterations::Count(2));
        let mut playback = Playback::new(value.clone(), AnimationPreset::pulse(&config, 1.0, 1.2));

        playback.advance(50.0);
        assert!(approx(value.get(), 1.1));
        assert!(!playback.advance(60.0));
        assert!(approx(value.get(), 1.02));
    }

    #[test]
    fn flip_and_slide_start_from_zero() {
        for kind in [DigitTransitionKind::Flip, DigitTransitionKind::Slide] {
            let value = AnimatedValue::new(1.0);
            let config = AnimationConfig::new(200);
            let mut playback = Playback::new(value.clone(), AnimationPreset::digit(&config, kind));
            playback.advance(0.0);
            assert!(approx(value.get(), 0.0), "{kind:?}");
            assert!(playback.advance(200.0));
            assert_eq!(value.get(), 1.0);
        }
    }

    #[test]
    fn scale_digit_peaks_at_half() {
        let value = AnimatedValue::new(1.0);
        let config = AnimationConfig::new(200);
        let mut playback =
            Playback::new(value.clone(), AnimationPreset::digit(&config, DigitTransitionKind::Scale));
        playback.advance(100.0);
        assert!(approx(value.get(), DIGIT_SCALE_PEAK));
        assert!(playback.advance(100.0));
        assert_eq!(value.get(), 1.0);
    }

    #[test]
    fn instant_config_completes_in_one_call() {
        let value = AnimatedValue::new(1.0);
        let config = AnimationConfig::new(4000).looping().reduced_motion();
        let mut playback = Playback::new(value.clone(), AnimationPreset::breathing(&config, 0.5, 1.0));
        assert!(playback.advance(0.0));
        assert_eq!(value.get(), 0.5);
    }
}

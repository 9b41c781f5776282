//! Performance-aware animation manager
//!
//! The manager owns every in-flight animation, keyed by [`AnimationId`].
//! Configs are passed through [`AnimationManager::optimize`] before they run,
//! so the current tier, reduced-motion flag and concurrency pressure shape
//! every animation the same way.
//!
//! Each started animation hands back a [`Completion`], a oneshot receiver
//! that resolves `Ok(())` when the animation finishes and
//! `Err(AnimationError::Interrupted)` when it is stopped or replaced.

use crate::config::{AnimationConfig, AnimationSlot, ThemeAnimations};
use crate::performance::MonitorReport;
use crate::presets::{AnimationPreset, DigitTransitionKind};
use crate::settings::{PerformanceSettings, PerformanceSettingsPatch, PerformanceTier};
use crate::spring::SpringConfig;
use crate::track::{Playback, Track};
use crate::value::AnimatedValue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// Frame-time samples kept for the running average
const FRAME_HISTORY: usize = 60;
/// Duration cap applied while the concurrency limit is saturated
const SATURATED_DURATION_MS: u32 = 100;
/// Duration cap for the medium tier
const MEDIUM_TIER_DURATION_MS: u32 = 200;

/// Identifier of a running animation
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationId(String);

impl AnimationId {
    pub const THEME_TRANSITION: &'static str = "theme-transition";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnimationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AnimationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("animation `{id}` was interrupted")]
    Interrupted { id: AnimationId },
}

pub type AnimationResult = Result<(), AnimationError>;

/// Resolves when an animation finishes or is interrupted
#[derive(Debug)]
pub struct Completion {
    id: AnimationId,
    receiver: oneshot::Receiver<AnimationResult>,
}

impl Completion {
    pub fn id(&self) -> &AnimationId {
        &self.id
    }

    /// The outcome if the animation has already ended, `None` while it runs
    pub fn try_result(&mut self) -> Option<AnimationResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(AnimationError::Interrupted {
                id: self.id.clone(),
            })),
        }
    }
}

impl Future for Completion {
    type Output = AnimationResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        Pin::new(&mut this.receiver).poll(cx).map(|received| match received {
            Ok(result) => result,
            Err(_) => Err(AnimationError::Interrupted {
                id: this.id.clone(),
            }),
        })
    }
}

/// Counters exposed for diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationStats {
    pub total_started: u64,
    pub active: usize,
    pub frame_drops: u64,
    pub average_frame_time_ms: f64,
}

struct ActiveAnimation {
    playback: Playback,
    sender: oneshot::Sender<AnimationResult>,
    elapsed_ms: f64,
    ticks: u32,
}

pub struct AnimationManager {
    settings: PerformanceSettings,
    animations: ThemeAnimations,
    active: FxHashMap<AnimationId, ActiveAnimation>,
    next_id: u64,
    total_started: u64,
    frame_drops: u64,
    frame_times: VecDeque<f64>,
}

impl AnimationManager {
    pub fn new(settings: PerformanceSettings) -> Self {
        Self {
            settings,
            animations: ThemeAnimations::default(),
            active: FxHashMap::default(),
            next_id: 0,
            total_started: 0,
            frame_drops: 0,
            frame_times: VecDeque::with_capacity(FRAME_HISTORY),
        }
    }

    pub fn settings(&self) -> &PerformanceSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: PerformanceSettings) {
        tracing::debug!(?settings, "animation settings replaced");
        self.settings = settings;
    }

    pub fn update_settings(&mut self, patch: &PerformanceSettingsPatch) -> PerformanceSettings {
        self.set_settings(patch.apply(self.settings));
        self.settings
    }

    pub fn animations(&self) -> &ThemeAnimations {
        &self.animations
    }

    /// Swap the per-theme timing table
    pub fn set_animations(&mut self, animations: ThemeAnimations) {
        self.animations = animations;
    }

    /// Shape a config for the current tier, motion preference and load
    pub fn optimize(&self, base: AnimationConfig) -> AnimationConfig {
        let mut config = match self.settings.tier {
            PerformanceTier::Low => base.reduced_motion(),
            PerformanceTier::Medium => base.with_duration(base.duration_ms.min(MEDIUM_TIER_DURATION_MS)),
            PerformanceTier::High => base,
        };

        if self.settings.reduced_motion {
            config = config.reduced_motion();
        }

        if self.active.len() as u32 >= self.settings.max_concurrent_animations {
            config = config.with_duration(config.duration_ms.min(SATURATED_DURATION_MS));
        }

        config
    }

    /// The optimized config for a named slot of the current timing table
    pub fn config_for(&self, slot: AnimationSlot) -> AnimationConfig {
        self.optimize(self.animations.get(slot))
    }

    fn generate_id(&mut self) -> AnimationId {
        self.next_id += 1;
        AnimationId(format!("anim-{}", self.next_id))
    }

    /// Start a prepared track. Replaces any animation running under the same id.
    pub fn play(&mut self, value: &AnimatedValue, track: Track, id: Option<AnimationId>) -> Completion {
        let id = id.unwrap_or_else(|| self.generate_id());
        self.stop_one(&id);

        let (sender, receiver) = oneshot::channel();
        let mut playback = Playback::new(value.clone(), track);
        self.total_started += 1;

        if playback.advance(0.0) {
            tracing::trace!(%id, "animation completed immediately");
            let _ = sender.send(Ok(()));
        } else {
            tracing::trace!(%id, active = self.active.len() + 1, "animation started");
            self.active.insert(
                id.clone(),
                ActiveAnimation {
                    playback,
                    sender,
                    elapsed_ms: 0.0,
                    ticks: 0,
                },
            );
        }

        Completion { id, receiver }
    }

    /// Animate `value` to `to` with an optimized copy of `config`
    pub fn run(
        &mut self,
        value: &AnimatedValue,
        to: f32,
        config: AnimationConfig,
        id: Option<AnimationId>,
    ) -> Completion {
        let config = self.optimize(config);
        let track = Track::between(value.get(), to, &config);
        self.play(value, track, id)
    }

    /// Cross-fade through zero opacity, calling `apply` at the midpoint.
    /// A transition already in flight is interrupted.
    pub fn theme_transition<F>(
        &mut self,
        opacity: &AnimatedValue,
        apply: F,
        config: Option<AnimationConfig>,
    ) -> Completion
    where
        F: FnMut() + 'static,
    {
        let config = self.optimize(config.unwrap_or(self.animations.theme_transition));
        let track = AnimationPreset::theme_transition(&config, apply);
        self.play(opacity, track, Some(AnimationId::from(AnimationId::THEME_TRANSITION)))
    }

    pub fn breathing_animation(&mut self, value: &AnimatedValue, min: f32, max: f32) -> Completion {
        let config = self.config_for(AnimationSlot::Breathing);
        let track = AnimationPreset::breathing(&config, min, max);
        self.play(value, track, None)
    }

    pub fn pulse_animation(&mut self, value: &AnimatedValue, scale: f32) -> Completion {
        let config = self.config_for(AnimationSlot::Pulse);
        let track = AnimationPreset::pulse(&config, value.get(), scale);
        self.play(value, track, None)
    }

    pub fn digit_transition(&mut self, value: &AnimatedValue, kind: DigitTransitionKind) -> Completion {
        let config = self.config_for(AnimationSlot::DigitTransition);
        let track = AnimationPreset::digit(&config, kind);
        self.play(value, track, None)
    }

    /// Animate several values to `to`, each starting `step_ms` after the previous
    pub fn stagger(
        &mut self,
        values: &[AnimatedValue],
        to: f32,
        config: AnimationConfig,
        step_ms: u32,
    ) -> Vec<Completion> {
        let config = self.optimize(config);
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let delay = if config.is_instant() {
                    0
                } else {
                    config.delay_ms + step_ms.saturating_mul(index as u32)
                };
                let track = Track::between(value.get(), to, &config.with_delay(delay));
                self.play(value, track, None)
            })
            .collect()
    }

    /// Spring `value` toward `to`. Snaps when motion is reduced.
    pub fn spring(
        &mut self,
        value: &AnimatedValue,
        to: f32,
        config: SpringConfig,
        id: Option<AnimationId>,
    ) -> Completion {
        let snap = self.settings.reduced_motion || self.settings.tier == PerformanceTier::Low;
        let track = if snap {
            Track::new().set(to)
        } else {
            Track::new().spring(to, config)
        };
        self.play(value, track, id)
    }

    /// Stop one animation, leaving its value where it is. Returns whether it was running.
    pub fn stop_one(&mut self, id: &AnimationId) -> bool {
        match self.active.remove(id) {
            Some(animation) => {
                tracing::trace!(%id, "animation interrupted");
                let _ = animation
                    .sender
                    .send(Err(AnimationError::Interrupted { id: id.clone() }));
                true
            }
            None => false,
        }
    }

    /// Stop everything. Returns how many animations were interrupted.
    pub fn stop_all(&mut self) -> usize {
        let stopped = self.active.len();
        for (id, animation) in self.active.drain() {
            let _ = animation.sender.send(Err(AnimationError::Interrupted { id }));
        }
        if stopped > 0 {
            tracing::debug!(stopped, "stopped all animations");
        }
        stopped
    }

    /// Jump one animation to its end and resolve it successfully
    pub fn finish_now(&mut self, id: &AnimationId) -> bool {
        match self.active.remove(id) {
            Some(mut animation) => {
                animation.playback.complete_now();
                self.complete(animation);
                true
            }
            None => false,
        }
    }

    /// Advance every running animation by `dt_ms`
    pub fn tick(&mut self, dt_ms: f64) {
        if self.active.is_empty() {
            return;
        }

        let mut finished: SmallVec<[AnimationId; 8]> = SmallVec::new();
        for (id, animation) in self.active.iter_mut() {
            animation.elapsed_ms += dt_ms.max(0.0);
            animation.ticks += 1;
            if animation.playback.advance(dt_ms as f32) {
                finished.push(id.clone());
            }
        }

        for id in finished {
            if let Some(animation) = self.active.remove(&id) {
                tracing::trace!(%id, value = animation.playback.value().get(), "animation finished");
                self.complete(animation);
            }
        }
    }

    fn complete(&mut self, animation: ActiveAnimation) {
        if animation.ticks > 0 {
            self.record_frame_time(animation.elapsed_ms / f64::from(animation.ticks));
        }
        let _ = animation.sender.send(Ok(()));
    }

    fn record_frame_time(&mut self, frame_ms: f64) {
        if self.frame_times.len() >= FRAME_HISTORY {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_ms);
        if frame_ms > self.settings.target_frame_time_ms() * 1.5 {
            self.frame_drops += 1;
        }
    }

    /// Adjust settings from a monitor tick. Returns whether anything changed.
    pub fn self_correct(&mut self, report: &MonitorReport) -> bool {
        let mut changed = false;

        if report.dropped_since_last_tick > 3 {
            let reduced = self
                .settings
                .max_concurrent_animations
                .saturating_sub(1)
                .max(PerformanceSettings::MIN_CONCURRENT_ANIMATIONS);
            if reduced != self.settings.max_concurrent_animations {
                tracing::debug!(
                    from = self.settings.max_concurrent_animations,
                    to = reduced,
                    "lowering concurrent animation limit"
                );
                self.settings.max_concurrent_animations = reduced;
                changed = true;
            }
        }

        if report.drop_percentage > 20.0 && !self.settings.reduced_motion {
            tracing::debug!(drop_percentage = report.drop_percentage, "forcing reduced motion");
            self.settings.reduced_motion = true;
            changed = true;
        }

        changed
    }

    pub fn is_active(&self, id: &AnimationId) -> bool {
        self.active.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn stats(&self) -> AnimationStats {
        let average_frame_time_ms = if self.frame_times.is_empty() {
            0.0
        } else {
            self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64
        };
        AnimationStats {
            total_started: self.total_started,
            active: self.active.len(),
            frame_drops: self.frame_drops,
            average_frame_time_ms,
        }
    }

    /// Interrupt everything and reset the counters
    pub fn teardown(&mut self) {
        self.stop_all();
        self.frame_times.clear();
        self.frame_drops = 0;
    }
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new(PerformanceSettings::default())
    }
}

impl fmt::Debug for AnimationManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationManager")
            .field("settings", &self.settings)
            .field("active", &self.active.len())
            .field("total_started", &self.total_started)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Iterations;
    use crate::easing::Easing;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    fn manager_with(settings: PerformanceSettings) -> AnimationManager {
        AnimationManager::new(settings)
    }

    #[test]
    fn optimize_by_tier() {
        let base = AnimationConfig::new(500).looping();

        let high = manager_with(PerformanceSettings::default());
        assert_eq!(high.optimize(base), base);

        let medium = manager_with(PerformanceSettings {
            tier: PerformanceTier::Medium,
            ..Default::default()
        });
        assert_eq!(medium.optimize(base).duration_ms, 200);
        assert!(medium.optimize(base).iterations.is_infinite());

        let low = manager_with(PerformanceSettings {
            tier: PerformanceTier::Low,
            ..Default::default()
        });
        let optimized = low.optimize(base);
        assert_eq!(optimized.duration_ms, 0);
        assert_eq!(optimized.iterations, Iterations::ONCE);
    }

    #[test]
    fn optimize_caps_duration_when_saturated() {
        let mut manager = manager_with(PerformanceSettings {
            max_concurrent_animations: 2,
            ..Default::default()
        });
        let a = AnimatedValue::new(0.0);
        let b = AnimatedValue::new(0.0);
        manager.run(&a, 1.0, AnimationConfig::new(1000), None);
        assert_eq!(manager.optimize(AnimationConfig::new(1000)).duration_ms, 1000);
        manager.run(&b, 1.0, AnimationConfig::new(1000), None);
        assert_eq!(manager.optimize(AnimationConfig::new(1000)).duration_ms, 100);
    }

    #[test]
    fn run_completes_after_ticks() {
        let mut manager = AnimationManager::default();
        let value = AnimatedValue::new(0.0);
        let mut completion = manager.run(&value, 10.0, AnimationConfig::new(100), None);

        manager.tick(50.0);
        assert!(completion.try_result().is_none());
        assert!((value.get() - 5.0).abs() < 1e-4);

        manager.tick(50.0);
        assert_eq!(completion.try_result(), Some(Ok(())));
        assert_eq!(value.get(), 10.0);
        assert_eq!(manager.active_count(), 0);

        let stats = manager.stats();
        assert_eq!(stats.total_started, 1);
        assert!((stats.average_frame_time_ms - 50.0).abs() < 1e-9);
        assert_eq!(stats.frame_drops, 1);
    }

    #[test]
    fn replacing_an_id_interrupts_the_previous_animation() {
        let mut manager = AnimationManager::default();
        let value = AnimatedValue::new(0.0);
        let id = AnimationId::from("clock-face");

        let mut first = manager.run(&value, 1.0, AnimationConfig::new(100), Some(id.clone()));
        let mut second = manager.run(&value, 2.0, AnimationConfig::new(100), Some(id.clone()));

        assert_eq!(
            first.try_result(),
            Some(Err(AnimationError::Interrupted { id: id.clone() }))
        );
        assert!(second.try_result().is_none());
        assert_eq!(manager.active_count(), 1);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut manager = AnimationManager::default();
        let value = AnimatedValue::new(0.0);
        let id = AnimationId::from("fade");
        let mut completion = manager.run(&value, 1.0, AnimationConfig::new(100), Some(id.clone()));

        assert!(manager.stop_one(&id));
        assert!(!manager.stop_one(&id));
        assert_eq!(manager.stop_all(), 0);
        assert!(matches!(completion.try_result(), Some(Err(AnimationError::Interrupted { .. }))));
    }

    #[test]
    fn reduced_motion_completes_synchronously() {
        let mut manager = manager_with(PerformanceSettings {
            reduced_motion: true,
            ..Default::default()
        });
        let opacity = AnimatedValue::new(1.0);
        let applied = Rc::new(Cell::new(false));
        let flag = applied.clone();

        let mut completion = manager.theme_transition(&opacity, move || flag.set(true), None);
        assert!(applied.get());
        assert_eq!(completion.try_result(), Some(Ok(())));
        assert_eq!(opacity.get(), 1.0);

        let mut breathing = manager.breathing_animation(&AnimatedValue::new(0.5), 0.5, 1.0);
        assert_eq!(breathing.try_result(), Some(Ok(())));
        assert_eq!(manager.active_count(), 0);
    }

    #[test]
    fn stagger_offsets_start_times() {
        let mut manager = AnimationManager::default();
        let values: Vec<_> = (0..3).map(|_| AnimatedValue::new(0.0)).collect();
        let config = AnimationConfig::new(100).with_easing(Easing::Linear);
        let completions = manager.stagger(&values, 1.0, config, 50);
        assert_eq!(completions.len(), 3);

        manager.tick(50.0);
        assert!((values[0].get() - 0.5).abs() < 1e-4);
        assert_eq!(values[1].get(), 0.0);
        assert_eq!(values[2].get(), 0.0);

        manager.tick(50.0);
        assert!((values[1].get() - 0.5).abs() < 1e-4);
        assert_eq!(values[2].get(), 0.0);
    }

    #[test]
    fn spring_snaps_on_low_tier() {
        let mut manager = manager_with(PerformanceSettings {
            tier: PerformanceTier::Low,
            ..Default::default()
        });
        let value = AnimatedValue::new(0.0);
        let mut completion = manager.spring(&value, 3.0, SpringConfig::gentle(), None);
        assert_eq!(value.get(), 3.0);
        assert_eq!(completion.try_result(), Some(Ok(())));
    }

    #[test]
    fn self_correction_lowers_limits() {
        let mut manager = manager_with(PerformanceSettings {
            max_concurrent_animations: 3,
            ..Default::default()
        });
        let report = MonitorReport {
            metrics: Default::default(),
            dropped_since_last_tick: 4,
            drop_percentage: 10.0,
        };
        assert!(manager.self_correct(&report));
        assert_eq!(manager.settings().max_concurrent_animations, 2);
        assert!(!manager.self_correct(&report));
        assert_eq!(manager.settings().max_concurrent_animations, 2);

        let heavy = MonitorReport {
            drop_percentage: 25.0,
            ..report
        };
        assert!(manager.self_correct(&heavy));
        assert!(manager.settings().reduced_motion);
    }

    #[test]
    fn finish_now_resolves_successfully() {
        let mut manager = AnimationManager::default();
        let value = AnimatedValue::new(0.0);
        let id = AnimationId::from("digit");
        let mut completion = manager.run(&value, 1.0, AnimationConfig::new(400), Some(id.clone()));
        manager.tick(16.0);

        assert!(manager.finish_now(&id));
        assert_eq!(value.get(), 1.0);
        assert_eq!(completion.try_result(), Some(Ok(())));
    }

    #[tokio::test]
    async fn completion_is_awaitable() {
        let mut manager = AnimationManager::default();
        let value = AnimatedValue::new(0.0);
        let completion = manager.run(&value, 1.0, AnimationConfig::new(32), None);
        manager.tick(16.0);
        manager.tick(16.0);
        assert_eq!(completion.await, Ok(()));

        let completion = manager.run(&value, 0.0, AnimationConfig::new(32), None);
        manager.teardown();
        assert!(completion.await.is_err());
    }
}

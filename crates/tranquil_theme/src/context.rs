//! Theme context
//!
//! The composition root of the engine. A [`ThemeContext`] owns the registry,
//! the visual-mode engine, the animation manager, the performance monitor and
//! the preference store. There are no globals; hosts create one context per
//! session and drive it with [`ThemeContext::advance`] from their frame loop.
//!
//! Every mutator follows the same order:
//! 1. apply the change in memory,
//! 2. persist it (failures are logged and handed back as [`Persisted`]),
//! 3. notify subscribers synchronously.
//!
//! Theme and scheme switches cross-fade through [`ThemeContext::transition_opacity`].
//! [`ThemeContext::theme`] and [`ThemeContext::scheme`] report the selection
//! immediately. The rendering accessors (`palette`, `elevation`,
//! `surface_color`, `view_style`, `presented`) keep the outgoing theme until
//! the fade's midpoint, where the swap is announced with
//! [`ChangeReason::Presented`].

use crate::persistence::{keys, load_json, save_json, MemoryStore, Persisted, PreferenceStore};
use crate::registry::{RegistryError, ThemeRegistry};
use crate::settings::EngineSettings;
use crate::theme::{ColorScheme, CustomColors, CustomTheme, CustomThemePatch, ThemeCollection};
use crate::tokens::elevation::{self, ElevationLevel, ElevationStyle, ViewStyle};
use crate::tokens::ColorPalette;
use crate::visual_mode::{TimerVisualization, VisualMode, VisualModeEngine};
use crate::zen::{ZenModeConfig, ZenModeConfigPatch};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use tranquil_animation::{
    AnimatedValue, AnimationConfig, AnimationId, AnimationManager, AnimationSlot, DeviceCapabilities, DeviceInfo,
    PerformanceMonitor, PerformanceSettings, PerformanceSettingsPatch, PerformanceTier,
};
use tranquil_core::{Color, ListenerId, Listeners};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("unknown color scheme: {0}")]
    UnknownScheme(String),
}

/// What triggered a [`ThemeChange`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeReason {
    Theme,
    Scheme,
    VisualMode,
    CustomThemes,
    Zen,
    Performance,
    Restored,
    /// The rendering accessors switched to the selection at a fade midpoint
    Presented,
}

/// Notification sent to subscribers after every mutation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeChange {
    pub theme_id: String,
    pub scheme: ColorScheme,
    pub visual_mode: VisualMode,
    pub reason: ChangeReason,
}

/// Theme and scheme currently on screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presented {
    pub theme_id: String,
    pub scheme: ColorScheme,
}

/// What the renderer draws; trails the selection during a cross-fade
#[derive(Debug)]
struct Shown {
    theme: ThemeCollection,
    scheme: ColorScheme,
    swapped: bool,
}

/// Clamp requested settings to what the device can do
fn constrain(requested: PerformanceSettings, capabilities: &DeviceCapabilities) -> PerformanceSettings {
    PerformanceSettings {
        tier: requested.tier.min(capabilities.tier),
        reduced_motion: requested.reduced_motion || capabilities.reduced_motion,
        max_concurrent_animations: requested
            .max_concurrent_animations
            .min(capabilities.max_concurrent_animations),
        enable_particles: requested.enable_particles && capabilities.supports_particles,
        ..requested
    }
}

pub struct ThemeContext<S: PreferenceStore = MemoryStore> {
    settings: EngineSettings,
    registry: ThemeRegistry,
    visuals: VisualModeEngine,
    animations: AnimationManager,
    monitor: PerformanceMonitor,
    store: S,
    current: ThemeCollection,
    scheme: ColorScheme,
    zen: ZenModeConfig,
    listeners: Listeners<ThemeChange>,
    opacity: AnimatedValue,
    shown: Rc<RefCell<Shown>>,
}

impl ThemeContext<MemoryStore> {
    /// A context with default settings and an in-memory store
    pub fn in_memory(device: DeviceInfo) -> Result<Self, ThemeError> {
        Self::new(EngineSettings::default(), device, MemoryStore::new())
    }
}

impl<S: PreferenceStore> ThemeContext<S> {
    pub fn new(settings: EngineSettings, device: DeviceInfo, store: S) -> Result<Self, ThemeError> {
        let registry = ThemeRegistry::with_builtins(settings.validator);
        let current = registry.get_or_default(&settings.default_theme)?.clone();

        let mut monitor = PerformanceMonitor::new(settings.monitor, device);
        let performance = constrain(settings.performance, &monitor.device_capabilities());
        monitor.start();

        let mut animations = AnimationManager::new(performance);
        animations.set_animations(current.animations);

        let scheme = settings.color_scheme;
        let shown = Shown {
            theme: current.clone(),
            scheme,
            swapped: false,
        };

        let mut context = Self {
            visuals: VisualModeEngine::new(settings.visual_mode, PerformanceTier::High),
            settings,
            registry,
            animations,
            monitor,
            store,
            current,
            scheme,
            zen: ZenModeConfig::default(),
            listeners: Listeners::new(),
            opacity: AnimatedValue::new(1.0),
            shown: Rc::new(RefCell::new(shown)),
        };
        context.sync_visuals();

        tracing::debug!(
            theme = %context.current.id,
            scheme = %context.scheme,
            tier = %performance.tier,
            "theme context created"
        );
        Ok(context)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn theme(&self) -> &ThemeCollection {
        &self.current
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    /// Palette on screen
    pub fn palette(&self) -> ColorPalette {
        let shown = self.shown.borrow();
        shown.theme.palette(shown.scheme).clone()
    }

    pub fn elevation(&self, level: ElevationLevel) -> ElevationStyle {
        let shown = self.shown.borrow();
        *shown.theme.elevation(shown.scheme).get(level)
    }

    pub fn surface_color(&self, level: ElevationLevel) -> Color {
        let shown = self.shown.borrow();
        elevation::resolve_surface_color(level, shown.theme.palette(shown.scheme), shown.scheme.is_dark())
    }

    /// Renderable style for a surface at `level`
    pub fn view_style(&self, level: ElevationLevel) -> ViewStyle {
        let style = self.elevation(level);
        let shown = self.shown.borrow();
        let use_native = shown.theme.material_config.surface.use_native_shadows;
        elevation::apply_to_view_style(&style, shown.scheme.is_dark(), use_native)
    }

    /// Optimized animation config for a named slot such as `"digitTransition"`
    pub fn animation_config(&self, name: &str) -> Option<AnimationConfig> {
        AnimationSlot::from_key(name).map(|slot| self.animations.config_for(slot))
    }

    pub fn visual_mode(&self) -> VisualMode {
        self.visuals.mode()
    }

    pub fn timer_visualization(&self) -> TimerVisualization {
        self.visuals.timer_visualization()
    }

    pub fn zen(&self) -> &ZenModeConfig {
        &self.zen
    }

    pub fn performance_settings(&self) -> &PerformanceSettings {
        self.animations.settings()
    }

    pub fn presented(&self) -> Presented {
        let shown = self.shown.borrow();
        Presented {
            theme_id: shown.theme.id.clone(),
            scheme: shown.scheme,
        }
    }

    /// Opacity driven by theme cross-fades
    pub fn transition_opacity(&self) -> &AnimatedValue {
        &self.opacity
    }

    pub fn is_transitioning(&self) -> bool {
        self.animations
            .is_active(&AnimationId::from(AnimationId::THEME_TRANSITION))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn visuals(&self) -> &VisualModeEngine {
        &self.visuals
    }

    /// Direct effect edits; these are not persisted
    pub fn visuals_mut(&mut self) -> &mut VisualModeEngine {
        &mut self.visuals
    }

    pub fn animations(&self) -> &AnimationManager {
        &self.animations
    }

    pub fn animations_mut(&mut self) -> &mut AnimationManager {
        &mut self.animations
    }

    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut PerformanceMonitor {
        &mut self.monitor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ThemeChange) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify(&mut self, reason: ChangeReason) {
        let change = ThemeChange {
            theme_id: self.current.id.clone(),
            scheme: self.scheme,
            visual_mode: self.visuals.mode(),
            reason,
        };
        self.listeners.notify(&change);
    }

    /// Announce a midpoint swap, once per swap
    fn flush_presented(&mut self) {
        let swapped = std::mem::take(&mut self.shown.borrow_mut().swapped);
        if swapped {
            self.notify(ChangeReason::Presented);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn persist(&mut self, key: &str, value: &str) -> Persisted {
        let result = self.store.save(key, value);
        if let Err(err) = &result {
            tracing::warn!(key, %err, "failed to persist preference");
        }
        result
    }

    fn persist_json<T: Serialize>(&mut self, key: &str, value: &T) -> Persisted {
        let result = save_json(&mut self.store, key, value);
        if let Err(err) = &result {
            tracing::warn!(key, %err, "failed to persist preference");
        }
        result
    }

    fn persist_customs(&mut self) -> Persisted {
        let customs: Vec<CustomTheme> = self.registry.custom_themes().cloned().collect();
        self.persist_json(keys::CUSTOM_THEMES, &customs)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Theme and scheme
    // ─────────────────────────────────────────────────────────────────────────

    /// Cross-fade to the selection. The swap runs at the midpoint, or
    /// immediately when motion is reduced.
    fn start_transition(&mut self) {
        let theme = self.current.clone();
        let scheme = self.scheme;
        let shown = Rc::clone(&self.shown);
        self.animations.theme_transition(
            &self.opacity,
            move || {
                let mut shown = shown.borrow_mut();
                shown.theme = theme.clone();
                shown.scheme = scheme;
                shown.swapped = true;
            },
            None,
        );
    }

    /// Show the selection right away, cancelling any cross-fade
    fn present_now(&mut self) {
        self.animations
            .stop_one(&AnimationId::from(AnimationId::THEME_TRANSITION));
        *self.shown.borrow_mut() = Shown {
            theme: self.current.clone(),
            scheme: self.scheme,
            swapped: false,
        };
        self.opacity.set(1.0);
    }

    fn adopt(&mut self, theme: ThemeCollection) {
        self.animations.set_animations(theme.animations);
        self.current = theme;
    }

    /// Switch to a registered theme. Unknown ids are rejected.
    pub fn set_theme(&mut self, id: &str) -> Result<Persisted, ThemeError> {
        if id == self.current.id {
            return Ok(Ok(()));
        }
        let theme = self
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        tracing::debug!(from = %self.current.id, to = %theme.id, "switching theme");
        self.adopt(theme);
        self.start_transition();

        let persisted = self.persist(keys::THEME_ID, id);
        self.notify(ChangeReason::Theme);
        self.flush_presented();
        Ok(persisted)
    }

    pub fn set_scheme(&mut self, scheme: ColorScheme) -> Persisted {
        if scheme == self.scheme {
            return Ok(());
        }
        tracing::debug!(from = %self.scheme, to = %scheme, "switching color scheme");
        self.scheme = scheme;
        self.start_transition();

        let persisted = self.persist(keys::THEME_MODE, scheme.as_str());
        self.notify(ChangeReason::Scheme);
        self.flush_presented();
        persisted
    }

    pub fn set_scheme_str(&mut self, scheme: &str) -> Result<Persisted, ThemeError> {
        let scheme = scheme
            .parse::<ColorScheme>()
            .map_err(|_| ThemeError::UnknownScheme(scheme.to_string()))?;
        Ok(self.set_scheme(scheme))
    }

    pub fn toggle_scheme(&mut self) -> Persisted {
        self.set_scheme(self.scheme.toggle())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Visual modes
    // ─────────────────────────────────────────────────────────────────────────

    /// Tier the visual effects run at; reduced motion counts as low
    fn visual_tier(&self) -> PerformanceTier {
        let settings = self.animations.settings();
        if settings.reduced_motion {
            PerformanceTier::Low
        } else {
            settings.tier
        }
    }

    fn sync_visuals(&mut self) {
        let tier = self.visual_tier();
        if tier != self.visuals.tier() {
            self.visuals.optimize_for_performance(tier);
        }
        let particles = self.animations.settings().enable_particles;
        if particles != self.visuals.particles_allowed() {
            self.visuals.allow_particles(particles);
        }
    }

    pub fn set_visual_mode(&mut self, mode: VisualMode) -> Persisted {
        if !self.visuals.switch_mode(mode) {
            return Ok(());
        }
        self.sync_visuals();

        let persisted = self.persist(keys::VISUAL_MODE, mode.as_str());
        self.notify(ChangeReason::VisualMode);
        persisted
    }

    /// Switch by name; unknown names are logged and ignored
    pub fn set_visual_mode_str(&mut self, mode: &str) -> Persisted {
        match mode.parse::<VisualMode>() {
            Ok(mode) => self.set_visual_mode(mode),
            Err(err) => {
                tracing::warn!(%err, "ignoring visual mode switch");
                Ok(())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Custom themes
    // ─────────────────────────────────────────────────────────────────────────

    /// A fresh custom theme based on `base_id`, not yet registered
    pub fn derive_custom_theme(
        &self,
        name: &str,
        description: &str,
        base_id: &str,
        colors: CustomColors,
    ) -> Result<CustomTheme, ThemeError> {
        let base = self
            .registry
            .builtins()
            .find(|theme| theme.id == base_id)
            .ok_or_else(|| RegistryError::UnknownBaseTheme {
                id: name.to_string(),
                base: base_id.to_string(),
            })?;

        let stamp = Utc::now().timestamp_millis();
        let mut id = format!("custom-{stamp}");
        let mut suffix = 1;
        while self.registry.get(&id).is_some() {
            suffix += 1;
            id = format!("custom-{stamp}-{suffix}");
        }

        Ok(CustomTheme::derive(id, name, description, base).with_colors(colors))
    }

    pub fn create_custom_theme(&mut self, theme: CustomTheme) -> Result<Persisted, ThemeError> {
        self.registry.register_custom(theme)?;
        let persisted = self.persist_customs();
        self.notify(ChangeReason::CustomThemes);
        Ok(persisted)
    }

    pub fn update_custom_theme(&mut self, id: &str, patch: &CustomThemePatch) -> Result<Persisted, ThemeError> {
        let updated = self.registry.update(id, patch)?.clone();
        let active = self.current.id == id;
        if active {
            self.adopt(updated);
            self.start_transition();
        }
        let persisted = self.persist_customs();
        self.notify(ChangeReason::CustomThemes);
        self.flush_presented();
        Ok(persisted)
    }

    /// Delete a custom theme. The default theme takes over if it was active.
    pub fn delete_custom_theme(&mut self, id: &str) -> Result<Persisted, ThemeError> {
        if self.registry.is_builtin(id) {
            return Err(RegistryError::BuiltinImmutable(id.to_string()).into());
        }
        if !self.registry.remove(id) {
            return Err(RegistryError::NotFound(id.to_string()).into());
        }

        let mut persisted = self.persist_customs();
        if self.current.id == id {
            let fallback = self.registry.get_or_default(&self.settings.default_theme)?.clone();
            tracing::debug!(removed = %id, fallback = %fallback.id, "active custom theme deleted");
            let fallback_id = fallback.id.clone();
            self.adopt(fallback);
            self.start_transition();
            persisted = persisted.and(self.persist(keys::THEME_ID, &fallback_id));
        }

        self.notify(ChangeReason::CustomThemes);
        self.flush_presented();
        Ok(persisted)
    }

    pub fn custom_themes(&self) -> impl Iterator<Item = &CustomTheme> {
        self.registry.custom_themes()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Zen and performance
    // ─────────────────────────────────────────────────────────────────────────

    pub fn update_zen(&mut self, patch: &ZenModeConfigPatch) -> Persisted {
        self.zen = patch.apply(self.zen);
        let zen = self.zen;
        let persisted = self.persist_json(keys::ZEN_CONFIG, &zen);
        self.notify(ChangeReason::Zen);
        persisted
    }

    /// Apply a settings patch, clamped to the device's capabilities
    pub fn update_performance(&mut self, patch: &PerformanceSettingsPatch) -> Persisted {
        let requested = patch.apply(*self.animations.settings());
        self.apply_performance(requested);

        let settings = *self.animations.settings();
        let persisted = self.persist_json(keys::PERFORMANCE_SETTINGS, &settings);
        self.notify(ChangeReason::Performance);
        persisted
    }

    fn apply_performance(&mut self, requested: PerformanceSettings) {
        let settings = constrain(requested, &self.monitor.device_capabilities());
        self.animations.set_settings(settings);
        self.sync_visuals();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame loop
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance animations and the monitor by one frame of `dt_ms`
    pub fn advance(&mut self, dt_ms: f64) {
        self.animations.tick(dt_ms);
        self.flush_presented();
        self.monitor.record_frame_time(dt_ms);

        let Some(report) = self.monitor.advance(dt_ms) else {
            return;
        };
        tracing::trace!(
            fps = report.metrics.frame_rate,
            dropped = report.dropped_since_last_tick,
            "monitor report"
        );
        if self.animations.self_correct(&report) {
            self.sync_visuals();
            self.notify(ChangeReason::Performance);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    fn load_logged<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match load_json(&self.store, key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "ignoring stored preference");
                None
            }
        }
    }

    fn load_string(&self, key: &str) -> Option<String> {
        match self.store.load(key) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "ignoring stored preference");
                None
            }
        }
    }

    /// Load persisted preferences. Bad or unknown values are logged and skipped.
    pub fn restore(&mut self) {
        if let Some(customs) = self.load_logged::<Vec<CustomTheme>>(keys::CUSTOM_THEMES) {
            let fresh: Vec<CustomTheme> = customs
                .into_iter()
                .filter(|theme| self.registry.get_custom(&theme.id).is_none())
                .collect();
            self.registry.restore_customs(fresh);
        }

        if let Some(id) = self.load_string(keys::THEME_ID) {
            match self.registry.get(&id) {
                Some(theme) => {
                    let theme = theme.clone();
                    self.adopt(theme);
                }
                None => tracing::warn!(%id, "stored theme is not registered"),
            }
        }

        if let Some(scheme) = self.load_string(keys::THEME_MODE) {
            match scheme.parse::<ColorScheme>() {
                Ok(scheme) => self.scheme = scheme,
                Err(err) => tracing::warn!(%err, "ignoring stored color scheme"),
            }
        }

        if let Some(mode) = self.load_string(keys::VISUAL_MODE) {
            if let Err(err) = mode.parse::<VisualMode>().map(|mode| self.visuals.switch_mode(mode)) {
                tracing::warn!(%err, "ignoring stored visual mode");
            }
        }

        if let Some(zen) = self.load_logged::<ZenModeConfig>(keys::ZEN_CONFIG) {
            self.zen = ZenModeConfigPatch::default().apply(zen);
        }

        match self.load_logged::<PerformanceSettings>(keys::PERFORMANCE_SETTINGS) {
            Some(settings) => self.apply_performance(settings),
            None => self.sync_visuals(),
        }

        self.present_now();

        tracing::debug!(theme = %self.current.id, scheme = %self.scheme, mode = %self.visuals.mode(), "preferences restored");
        self.notify(ChangeReason::Restored);
    }

    /// Stop animations and monitoring and drop every subscriber
    pub fn teardown(&mut self) {
        self.animations.teardown();
        self.monitor.teardown();
        self.listeners.clear();
        self.present_now();
    }

    pub fn into_store(mut self) -> S {
        self.teardown();
        self.store
    }
}

impl<S: PreferenceStore> std::fmt::Debug for ThemeContext<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("theme", &self.current.id)
            .field("scheme", &self.scheme)
            .field("visual_mode", &self.visuals.mode())
            .field("performance", self.animations.settings())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

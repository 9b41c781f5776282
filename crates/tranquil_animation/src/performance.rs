//! Frame-timing monitor
//!
//! The host frame loop feeds frame durations through
//! [`PerformanceMonitor::record_frame_time`] and drives sampling with
//! [`PerformanceMonitor::advance`]. While monitoring, every sample interval
//! produces a tick that derives thermal and battery estimates, notifies
//! subscribers and returns a [`MonitorReport`] the animation manager uses to
//! correct itself.

use crate::settings::{PerformanceSettingsPatch, PerformanceTier};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::VecDeque;
use tranquil_core::{ListenerId, Listeners};

/// Samples considered for the thermal estimate
const THERMAL_WINDOW: usize = 10;
/// Minimum samples in the window before thermal state moves off nominal
const THERMAL_MIN_SAMPLES: usize = 5;
/// A frame counts as dropped above this multiple of the target frame time
const DROP_FACTOR: f64 = 1.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalState {
    #[default]
    Nominal,
    Fair,
    Serious,
    Critical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryImpact {
    #[default]
    Low,
    Medium,
    High,
}

/// Snapshot of the derived frame metrics
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub frame_rate: f64,
    pub average_frame_time_ms: f64,
    /// Dropped frames in the current history window
    pub frame_drop_count: u32,
    /// Estimated memory use in MB
    pub memory_usage_estimate: f64,
    pub battery_impact: BatteryImpact,
    pub thermal_state: ThermalState,
}

impl PerformanceMetrics {
    fn at_target(target_fps: u32) -> Self {
        let fps = f64::from(target_fps.max(1));
        Self {
            frame_rate: fps,
            average_frame_time_ms: 1000.0 / fps,
            frame_drop_count: 0,
            memory_usage_estimate: 0.0,
            battery_impact: BatteryImpact::Low,
            thermal_state: ThermalState::Nominal,
        }
    }
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self::at_target(60)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MonitorConfig {
    pub target_fps: u32,
    pub sample_interval_ms: u64,
    pub history_capacity: usize,
    pub memory_budget_mb: f64,
}

impl MonitorConfig {
    pub fn target_frame_time_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            sample_interval_ms: 1000,
            history_capacity: 60,
            memory_budget_mb: 512.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonitorState {
    #[default]
    Idle,
    Monitoring,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
    #[default]
    Desktop,
}

/// Static facts about the device, supplied by the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceInfo {
    /// Logical width in points
    pub screen_width: u32,
    /// Logical height in points
    pub screen_height: u32,
    pub pixel_density: f32,
    pub platform: Platform,
    pub os_version: String,
    pub reduced_motion: bool,
}

impl DeviceInfo {
    /// Physical pixel count
    pub fn effective_pixels(&self) -> f64 {
        let density = f64::from(self.pixel_density.max(0.0));
        f64::from(self.screen_width) * f64::from(self.screen_height) * density * density
    }

    fn os_major(&self) -> Option<u32> {
        self.os_version.split('.').next()?.trim().parse().ok()
    }

    /// Whether the OS predates the animation APIs the app relies on
    pub fn is_outdated_os(&self) -> bool {
        let minimum = match self.platform {
            Platform::Android => 8,
            Platform::Ios => 13,
            Platform::Web | Platform::Desktop => return false,
        };
        self.os_major().is_some_and(|major| major < minimum)
    }
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 800,
            pixel_density: 2.0,
            platform: Platform::Desktop,
            os_version: String::new(),
            reduced_motion: false,
        }
    }
}

/// One-time classification of the device
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCapabilities {
    pub is_low_end: bool,
    pub tier: PerformanceTier,
    pub max_concurrent_animations: u32,
    pub supports_particles: bool,
    pub reduced_motion: bool,
}

impl DeviceCapabilities {
    pub fn from_device(device: &DeviceInfo) -> Self {
        let is_low_end = device.effective_pixels() < 1_000_000.0
            || device.pixel_density < 2.0
            || device.is_outdated_os();

        let tier = if is_low_end {
            PerformanceTier::Low
        } else if device.pixel_density >= 3.0 {
            PerformanceTier::High
        } else {
            PerformanceTier::Medium
        };

        Self {
            is_low_end,
            tier,
            max_concurrent_animations: if is_low_end { 3 } else { 8 },
            supports_particles: !is_low_end,
            reduced_motion: device.reduced_motion,
        }
    }
}

/// Suggested quality changes derived from the current metrics
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub should_reduce_quality: bool,
    pub should_disable_animations: bool,
    pub settings: PerformanceSettingsPatch,
    pub reasons: Vec<String>,
}

impl Recommendations {
    fn push(&mut self, reason: String, nudge: PerformanceSettingsPatch) {
        self.should_reduce_quality = true;
        self.settings = self.settings.merge_conservative(nudge);
        self.reasons.push(reason);
    }
}

/// Result of one sampling tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonitorReport {
    pub metrics: PerformanceMetrics,
    /// Dropped frames recorded since the previous tick
    pub dropped_since_last_tick: u32,
    /// Share of frames since the previous tick that dropped, in percent
    pub drop_percentage: f64,
}

pub struct PerformanceMonitor {
    config: MonitorConfig,
    state: MonitorState,
    history: VecDeque<f64>,
    metrics: PerformanceMetrics,
    elapsed_since_tick: f64,
    frames_since_tick: u32,
    drops_since_tick: u32,
    device: DeviceInfo,
    capabilities: OnceCell<DeviceCapabilities>,
    listeners: Listeners<PerformanceMetrics>,
}

impl PerformanceMonitor {
    pub fn new(config: MonitorConfig, device: DeviceInfo) -> Self {
        Self {
            history: VecDeque::with_capacity(config.history_capacity),
            metrics: PerformanceMetrics::at_target(config.target_fps),
            config,
            state: MonitorState::Idle,
            elapsed_since_tick: 0.0,
            frames_since_tick: 0,
            drops_since_tick: 0,
            device,
            capabilities: OnceCell::new(),
            listeners: Listeners::new(),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn is_monitoring(&self) -> bool {
        self.state == MonitorState::Monitoring
    }

    pub fn metrics(&self) -> PerformanceMetrics {
        self.metrics
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    pub fn start(&mut self) {
        if self.state == MonitorState::Monitoring {
            return;
        }
        tracing::debug!(interval_ms = self.config.sample_interval_ms, "performance monitoring started");
        self.state = MonitorState::Monitoring;
        self.elapsed_since_tick = 0.0;
        self.frames_since_tick = 0;
        self.drops_since_tick = 0;
    }

    pub fn stop(&mut self) {
        if self.state == MonitorState::Idle {
            return;
        }
        tracing::debug!("performance monitoring stopped");
        self.state = MonitorState::Idle;
    }

    /// Record one frame duration. Non-finite or negative samples are ignored.
    pub fn record_frame_time(&mut self, frame_ms: f64) {
        if !frame_ms.is_finite() || frame_ms < 0.0 {
            tracing::trace!(frame_ms, "ignoring invalid frame sample");
            return;
        }

        let capacity = self.config.history_capacity.max(1);
        while self.history.len() >= capacity {
            self.history.pop_front();
        }
        self.history.push_back(frame_ms);

        let dropped = self.is_drop(frame_ms);
        self.frames_since_tick += 1;
        if dropped {
            self.drops_since_tick += 1;
        }

        self.recompute_frame_metrics();
    }

    /// Record the host's current memory estimate in MB
    pub fn record_memory_usage(&mut self, megabytes: f64) {
        if megabytes.is_finite() && megabytes >= 0.0 {
            self.metrics.memory_usage_estimate = megabytes;
        }
    }

    /// Advance the sampling clock. Returns a report when a tick fires.
    pub fn advance(&mut self, elapsed_ms: f64) -> Option<MonitorReport> {
        if self.state != MonitorState::Monitoring {
            return None;
        }

        self.elapsed_since_tick += elapsed_ms.max(0.0);
        let interval = self.config.sample_interval_ms.max(1) as f64;
        if self.elapsed_since_tick < interval {
            return None;
        }
        self.elapsed_since_tick %= interval;

        Some(self.tick())
    }

    fn tick(&mut self) -> MonitorReport {
        self.metrics.thermal_state = self.thermal_state();
        self.metrics.battery_impact = self.battery_impact();

        let drop_percentage = if self.frames_since_tick == 0 {
            0.0
        } else {
            f64::from(self.drops_since_tick) / f64::from(self.frames_since_tick) * 100.0
        };
        let report = MonitorReport {
            metrics: self.metrics,
            dropped_since_last_tick: self.drops_since_tick,
            drop_percentage,
        };
        self.frames_since_tick = 0;
        self.drops_since_tick = 0;

        tracing::trace!(
            fps = report.metrics.frame_rate,
            drops = report.dropped_since_last_tick,
            thermal = ?report.metrics.thermal_state,
            "performance tick"
        );

        let metrics = self.metrics;
        self.listeners.notify(&metrics);
        report
    }

    fn is_drop(&self, frame_ms: f64) -> bool {
        frame_ms > self.config.target_frame_time_ms() * DROP_FACTOR
    }

    fn recompute_frame_metrics(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let average = self.history.iter().sum::<f64>() / self.history.len() as f64;
        self.metrics.average_frame_time_ms = average;
        self.metrics.frame_rate = if average > 0.0 {
            1000.0 / average
        } else {
            f64::from(self.config.target_fps)
        };
        self.metrics.frame_drop_count = self.history.iter().filter(|ms| self.is_drop(**ms)).count() as u32;
    }

    fn thermal_state(&self) -> ThermalState {
        let recent: Vec<f64> = self.history.iter().rev().take(THERMAL_WINDOW).copied().collect();
        if recent.len() < THERMAL_MIN_SAMPLES {
            return ThermalState::Nominal;
        }
        let average = recent.iter().sum::<f64>() / recent.len() as f64;
        if average <= 0.0 {
            return ThermalState::Nominal;
        }
        let ratio = (1000.0 / average) / f64::from(self.config.target_fps.max(1));

        if ratio > 0.9 {
            ThermalState::Nominal
        } else if ratio > 0.7 {
            ThermalState::Fair
        } else if ratio > 0.5 {
            ThermalState::Serious
        } else {
            ThermalState::Critical
        }
    }

    fn battery_impact(&self) -> BatteryImpact {
        let drop_ratio = if self.history.is_empty() {
            0.0
        } else {
            f64::from(self.metrics.frame_drop_count) / self.history.len() as f64
        };
        let memory_ratio = self.metrics.memory_usage_estimate / self.config.memory_budget_mb.max(1.0);

        if drop_ratio > 0.2 || memory_ratio > 0.8 {
            BatteryImpact::High
        } else if drop_ratio > 0.1 || memory_ratio > 0.6 {
            BatteryImpact::Medium
        } else {
            BatteryImpact::Low
        }
    }

    /// Device classification, computed on first use
    pub fn device_capabilities(&self) -> DeviceCapabilities {
        *self
            .capabilities
            .get_or_init(|| DeviceCapabilities::from_device(&self.device))
    }

    pub fn recommendations(&self) -> Recommendations {
        let metrics = &self.metrics;
        let target = f64::from(self.config.target_fps);
        let mut recs = Recommendations::default();

        if metrics.frame_rate < target * 0.8 {
            recs.push(
                format!(
                    "Frame rate {:.1} fps is below 80% of the {} fps target",
                    metrics.frame_rate, self.config.target_fps
                ),
                PerformanceSettingsPatch {
                    tier: Some(PerformanceTier::Medium),
                    max_concurrent_animations: Some(4),
                    ..Default::default()
                },
            );
        }

        if metrics.frame_drop_count > 5 {
            recs.push(
                format!("{} dropped frames in the last window", metrics.frame_drop_count),
                PerformanceSettingsPatch {
                    max_concurrent_animations: Some(3),
                    enable_particles: Some(false),
                    ..Default::default()
                },
            );
        }

        match metrics.thermal_state {
            ThermalState::Serious => recs.push(
                "Device is running hot".to_string(),
                PerformanceSettingsPatch {
                    tier: Some(PerformanceTier::Low),
                    enable_particles: Some(false),
                    ..Default::default()
                },
            ),
            ThermalState::Critical => {
                recs.should_disable_animations = true;
                recs.push(
                    "Thermal state is critical".to_string(),
                    PerformanceSettingsPatch {
                        tier: Some(PerformanceTier::Low),
                        reduced_motion: Some(true),
                        enable_particles: Some(false),
                        ..Default::default()
                    },
                );
            }
            ThermalState::Nominal | ThermalState::Fair => {}
        }

        if metrics.memory_usage_estimate > self.config.memory_budget_mb * 0.8 {
            recs.push(
                format!(
                    "Memory use {:.0} MB exceeds 80% of the {:.0} MB budget",
                    metrics.memory_usage_estimate, self.config.memory_budget_mb
                ),
                PerformanceSettingsPatch {
                    max_concurrent_animations: Some(2),
                    enable_particles: Some(false),
                    ..Default::default()
                },
            );
        }

        if metrics.battery_impact == BatteryImpact::High {
            recs.push(
                "High battery impact".to_string(),
                PerformanceSettingsPatch {
                    battery_saver: Some(true),
                    target_fps: Some(30),
                    ..Default::default()
                },
            );
        }

        recs
    }

    /// Subscribe to per-tick metric snapshots
    pub fn on_update<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&PerformanceMetrics) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Stop sampling and drop every subscriber
    pub fn teardown(&mut self) {
        self.stop();
        self.listeners.clear();
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default(), DeviceInfo::default())
    }
}

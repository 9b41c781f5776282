//! Tranquil Animation System
//!
//! Performance-aware animation for a calm clock UI.
//!
//! # Features
//!
//! - **Configs**: immutable [`AnimationConfig`] values with partial-update patches
//! - **Easing**: standard curves plus CSS-style cubic beziers
//! - **Springs**: RK4-integrated damped springs
//! - **Tracks**: tween/spring/callback sequences with iterations and directions
//! - **Presets**: theme cross-fades, breathing, pulses and digit transitions
//! - **Monitor**: frame-time sampling with thermal and battery estimates
//! - **Manager**: optimizes configs for the current tier and drives every
//!   running animation from the host's frame loop
//!
//! # Example
//!
//! ```rust
//! use tranquil_animation::{AnimatedValue, AnimationConfig, AnimationManager};
//!
//! let mut manager = AnimationManager::default();
//! let opacity = AnimatedValue::new(0.0);
//!
//! let mut done = manager.run(&opacity, 1.0, AnimationConfig::new(100), None);
//! manager.tick(100.0);
//!
//! assert_eq!(opacity.get(), 1.0);
//! assert!(done.try_result().is_some_and(|r| r.is_ok()));
//! ```

pub mod config;
pub mod easing;
pub mod manager;
pub mod performance;
pub mod presets;
pub mod settings;
pub mod spring;
pub mod track;
pub mod value;

pub use config::{
    AnimationConfig, AnimationConfigPatch, AnimationSlot, Direction, FillMode, Iterations, ThemeAnimations,
    ThemeAnimationsPatch,
};
pub use easing::Easing;
pub use manager::{AnimationError, AnimationId, AnimationManager, AnimationResult, AnimationStats, Completion};
pub use performance::{
    BatteryImpact, DeviceCapabilities, DeviceInfo, MonitorConfig, MonitorReport, MonitorState, PerformanceMetrics,
    PerformanceMonitor, Platform, Recommendations, ThermalState,
};
pub use presets::{AnimationPreset, DigitTransitionKind};
pub use settings::{PerformanceSettings, PerformanceSettingsPatch, PerformanceTier};
pub use spring::{Spring, SpringConfig};
pub use track::{Step, Track};
pub use value::AnimatedValue;

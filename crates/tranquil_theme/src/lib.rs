//! Tranquil Theme System
//!
//! Theming and visual effects for a calm clock.
//!
//! # Overview
//!
//! - **Tokens**: palette slots with per-slot overrides, Material elevation
//!   levels with dark-surface tinting
//! - **Themes**: five built-in light/dark collections plus user themes derived
//!   from them
//! - **Validation**: WCAG contrast checks of the text-carrying color pairs,
//!   with lightness suggestions for failing pairs
//! - **Visual modes**: minimal, artistic and ambient effect bundles that adapt
//!   to the performance tier
//! - **Context**: one owner for all of the above, persisting preferences and
//!   notifying subscribers
//!
//! # Quick Start
//!
//! ```rust
//! use tranquil_animation::DeviceInfo;
//! use tranquil_theme::{ColorScheme, ThemeContext, VisualMode};
//!
//! let mut context = ThemeContext::in_memory(DeviceInfo::default()).unwrap();
//! context.subscribe(|change| println!("theme changed: {change:?}"));
//!
//! context.set_theme("forest-calm").unwrap().unwrap();
//! context.set_scheme(ColorScheme::Dark).unwrap();
//! context.set_visual_mode(VisualMode::Ambient).unwrap();
//!
//! // Drive transitions from the frame loop; the palette swaps mid-fade
//! while context.is_transitioning() {
//!     context.advance(16.0);
//! }
//!
//! let background = context.palette().background;
//! assert_eq!(background, context.theme().dark.background);
//! ```
//!
//! # Custom themes
//!
//! Custom themes start from a built-in theme and override individual slots.
//! They are validated strictly: every critical pair must pass WCAG AA in
//! both schemes.
//!
//! ```rust
//! use tranquil_animation::DeviceInfo;
//! use tranquil_core::Color;
//! use tranquil_theme::{ColorToken, CustomColors, ThemeContext};
//!
//! let mut context = ThemeContext::in_memory(DeviceInfo::default()).unwrap();
//!
//! let mut colors = CustomColors::default();
//! colors.dark.set(ColorToken::Accent, Color::from_hex(0x9FD3C7));
//! let theme = context
//!     .derive_custom_theme("Sea Glass", "Soft teal accents", "ocean-depth", colors)
//!     .unwrap();
//! let id = theme.id.clone();
//!
//! context.create_custom_theme(theme).unwrap().unwrap();
//! context.set_theme(&id).unwrap().unwrap();
//! ```

pub mod context;
pub mod persistence;
pub mod registry;
pub mod settings;
pub mod theme;
pub mod themes;
pub mod tokens;
pub mod validator;
pub mod visual_mode;
pub mod zen;

// Re-export commonly used types
pub use context::{ChangeReason, Presented, ThemeChange, ThemeContext, ThemeError};
pub use persistence::{JsonFileStore, MemoryStore, PersistError, Persisted, PreferenceStore};
pub use registry::{InvalidTheme, RegistryError, RegistryResult, ThemeRegistry, ValidationSummary, DEFAULT_THEME_ID};
pub use settings::{EngineSettings, SettingsError};
pub use theme::{
    ColorScheme, CustomColors, CustomTheme, CustomThemePatch, MaterialConfig, RippleConfig, SurfaceConfig,
    ThemeCollection,
};
pub use themes::{builtin_themes, BuiltinTheme};
pub use tokens::*;
pub use validator::{ColorValidationResult, ThemeValidator, ValidationReport, ValidatorConfig};
pub use visual_mode::{
    EffectIntensity, EffectType, PerformanceCost, ProgressIndicator, TimerVisualization, VisualEffect, VisualMode,
    VisualModeConfig, VisualModeEngine,
};
pub use zen::{ZenModeConfig, ZenModeConfigPatch};

//! Tranquil Core
//!
//! Foundational primitives shared by the animation and theme crates:
//!
//! - **Colors**: 8-bit sRGB [`Color`] parsed from and serialized to hex strings
//! - **Color math**: WCAG relative luminance, contrast ratio, conformance levels,
//!   blending and brightness adjustment
//! - **Listeners**: panic-isolated callback registries for change notifications
//!
//! # Example
//!
//! ```rust
//! use tranquil_core::{contrast, Color, WcagLevel};
//!
//! let text = Color::from_hex_str("#1C1B1F").unwrap();
//! let background = Color::from_hex_str("#FAFAF7").unwrap();
//!
//! let ratio = contrast::contrast_ratio(text, background);
//! assert_eq!(WcagLevel::classify(ratio, false), WcagLevel::Aaa);
//! ```

pub mod color;
pub mod contrast;
pub mod listeners;

pub use color::{Color, ColorParseError};
pub use contrast::{adjust_brightness, blend, blend_hex, contrast_ratio, relative_luminance, WcagLevel};
pub use listeners::{ListenerId, Listeners};

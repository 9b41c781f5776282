//! Design tokens for theming
//!
//! - Palette color slots and overrides
//! - Material elevation levels, shadows and dark-surface tinting

pub mod elevation;
mod palette;

pub use elevation::{
    ElevationLevel, ElevationReport, ElevationStyle, MaterialElevation, ShadowOffset, ViewStyle,
};
pub use palette::*;

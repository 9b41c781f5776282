//! Built-in themes

pub mod dawn_mist;
pub mod forest_calm;
pub mod monochrome_zen;
pub mod ocean_depth;
pub mod sunset_glow;

use crate::theme::ThemeCollection;
use std::fmt::{Display, Formatter};

/// Built-in theme catalog
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinTheme {
    DawnMist,
    ForestCalm,
    OceanDepth,
    SunsetGlow,
    MonochromeZen,
}

impl BuiltinTheme {
    /// Stable theme id for persistence
    pub fn id(self) -> &'static str {
        match self {
            Self::DawnMist => dawn_mist::ID,
            Self::ForestCalm => forest_calm::ID,
            Self::OceanDepth => ocean_depth::ID,
            Self::SunsetGlow => sunset_glow::ID,
            Self::MonochromeZen => monochrome_zen::ID,
        }
    }

    pub fn all() -> &'static [BuiltinTheme] {
        const THEMES: [BuiltinTheme; 5] = [
            BuiltinTheme::DawnMist,
            BuiltinTheme::ForestCalm,
            BuiltinTheme::OceanDepth,
            BuiltinTheme::SunsetGlow,
            BuiltinTheme::MonochromeZen,
        ];
        &THEMES
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|theme| theme.id() == id)
    }

    pub fn theme(self) -> ThemeCollection {
        match self {
            Self::DawnMist => dawn_mist::theme(),
            Self::ForestCalm => forest_calm::theme(),
            Self::OceanDepth => ocean_depth::theme(),
            Self::SunsetGlow => sunset_glow::theme(),
            Self::MonochromeZen => monochrome_zen::theme(),
        }
    }
}

impl Display for BuiltinTheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Every built-in theme, in catalog order
pub fn builtin_themes() -> Vec<ThemeCollection> {
    BuiltinTheme::all().iter().map(|theme| theme.theme()).collect()
}

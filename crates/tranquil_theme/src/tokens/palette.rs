//! Color palette tokens
//!
//! A [`ColorPalette`] holds every named color slot of one scheme. Slots are
//! addressed statically through fields or dynamically through [`ColorToken`].
//! [`PalettePatch`] carries optional per-slot overrides used by custom themes.

use serde::{Deserialize, Serialize};
use tranquil_core::Color;

macro_rules! palette_slots {
    ($($(#[$doc:meta])* $field:ident => $token:ident : $key:literal),* $(,)?) => {
        /// Palette slot keys for dynamic access
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum ColorToken {
            $($token,)*
        }

        impl ColorToken {
            pub fn all() -> &'static [ColorToken] {
                &[$(ColorToken::$token,)*]
            }

            /// Serialized slot name
            pub fn key(self) -> &'static str {
                match self {
                    $(ColorToken::$token => $key,)*
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(ColorToken::$token),)*
                    _ => None,
                }
            }
        }

        /// Complete set of color slots for one scheme
        #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct ColorPalette {
            $($(#[$doc])* pub $field: Color,)*
        }

        impl ColorPalette {
            /// Get a color by token key
            pub fn get(&self, token: ColorToken) -> Color {
                match token {
                    $(ColorToken::$token => self.$field,)*
                }
            }

            pub fn set(&mut self, token: ColorToken, color: Color) {
                match token {
                    $(ColorToken::$token => self.$field = color,)*
                }
            }
        }

        /// Optional per-slot overrides
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct PalettePatch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<Color>,
            )*
        }

        impl PalettePatch {
            pub fn get(&self, token: ColorToken) -> Option<Color> {
                match token {
                    $(ColorToken::$token => self.$field,)*
                }
            }

            pub fn set(&mut self, token: ColorToken, color: Color) {
                match token {
                    $(ColorToken::$token => self.$field = Some(color),)*
                }
            }

            /// A new palette with every overridden slot replaced
            pub fn apply(&self, base: &ColorPalette) -> ColorPalette {
                ColorPalette {
                    $($field: self.$field.unwrap_or(base.$field),)*
                }
            }

            /// Layer `other` on top of `self`; slots set in `other` win
            pub fn merged(&self, other: &PalettePatch) -> PalettePatch {
                PalettePatch {
                    $($field: other.$field.or(self.$field),)*
                }
            }

            /// Number of overridden slots
            pub fn len(&self) -> usize {
                0 $(+ usize::from(self.$field.is_some()))*
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }
        }
    };
}

palette_slots! {
    background => Background: "background",
    on_background => OnBackground: "onBackground",
    surface => Surface: "surface",
    on_surface => OnSurface: "onSurface",
    surface_variant => SurfaceVariant: "surfaceVariant",
    on_surface_variant => OnSurfaceVariant: "onSurfaceVariant",

    primary => Primary: "primary",
    on_primary => OnPrimary: "onPrimary",
    primary_container => PrimaryContainer: "primaryContainer",
    on_primary_container => OnPrimaryContainer: "onPrimaryContainer",

    secondary => Secondary: "secondary",
    on_secondary => OnSecondary: "onSecondary",
    secondary_container => SecondaryContainer: "secondaryContainer",
    on_secondary_container => OnSecondaryContainer: "onSecondaryContainer",

    tertiary => Tertiary: "tertiary",
    on_tertiary => OnTertiary: "onTertiary",
    tertiary_container => TertiaryContainer: "tertiaryContainer",
    on_tertiary_container => OnTertiaryContainer: "onTertiaryContainer",

    error => Error: "error",
    on_error => OnError: "onError",
    error_container => ErrorContainer: "errorContainer",
    on_error_container => OnErrorContainer: "onErrorContainer",

    outline => Outline: "outline",
    outline_variant => OutlineVariant: "outlineVariant",
    shadow => Shadow: "shadow",
    inverse_surface => InverseSurface: "inverseSurface",
    inverse_on_surface => InverseOnSurface: "inverseOnSurface",
    inverse_primary => InversePrimary: "inversePrimary",

    /// Legacy alias of `on_background` used by clock faces
    text => Text: "text",
    text_secondary => TextSecondary: "textSecondary",
    /// Legacy alias of `primary`
    accent => Accent: "accent",
    /// Legacy alias of `outline_variant`
    border => Border: "border",
}

//! Sunset Glow

use crate::theme::ThemeCollection;
use crate::tokens::ColorPalette;
use tranquil_animation::ThemeAnimations;
use tranquil_core::Color;

pub const ID: &str = "sunset-glow";

pub fn light() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0xF9F9F8),
        on_background: Color::from_hex(0x1E1B1A),
        surface: Color::WHITE,
        on_surface: Color::from_hex(0x1E1B1A),
        surface_variant: Color::from_hex(0xEAE4E1),
        on_surface_variant: Color::from_hex(0x534741),
        primary: Color::from_hex(0x8E4B29),
        on_primary: Color::WHITE,
        primary_container: Color::from_hex(0xF9E2D7),
        on_primary_container: Color::from_hex(0x2F190E),
        secondary: Color::from_hex(0x7A613E),
        on_secondary: Color::WHITE,
        secondary_container: Color::from_hex(0xF2EADE),
        on_secondary_container: Color::from_hex(0x292015),
        tertiary: Color::from_hex(0x8A2E5C),
        on_tertiary: Color::WHITE,
        tertiary_container: Color::from_hex(0xF4DDE8),
        on_tertiary_container: Color::from_hex(0x2E0F1F),
        error: Color::from_hex(0xB3261E),
        on_error: Color::WHITE,
        error_container: Color::from_hex(0xF9DEDC),
        on_error_container: Color::from_hex(0x410E0B),
        outline: Color::from_hex(0x81756E),
        outline_variant: Color::from_hex(0xD2CAC6),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0x342F2D),
        inverse_on_surface: Color::from_hex(0xF3F2F1),
        inverse_primary: Color::from_hex(0xF2BFA6),
        text: Color::from_hex(0x1E1B1A),
        text_secondary: Color::from_hex(0x534741),
        accent: Color::from_hex(0x8E4B29),
        border: Color::from_hex(0xD2CAC6),
    }
}

pub fn dark() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0x121212),
        on_background: Color::from_hex(0xE8E5E3),
        surface: Color::from_hex(0x1E1E1E),
        on_surface: Color::from_hex(0xE8E5E3),
        surface_variant: Color::from_hex(0x50453F),
        on_surface_variant: Color::from_hex(0xD2CAC6),
        primary: Color::from_hex(0xF2BFA6),
        on_primary: Color::from_hex(0x472515),
        primary_container: Color::from_hex(0x773E22),
        on_primary_container: Color::from_hex(0xF9E2D7),
        secondary: Color::from_hex(0xE2D0B6),
        on_secondary: Color::from_hex(0x3D301F),
        secondary_container: Color::from_hex(0x665133),
        on_secondary_container: Color::from_hex(0xF2EADE),
        tertiary: Color::from_hex(0xE6B3CC),
        on_tertiary: Color::from_hex(0x45172E),
        tertiary_container: Color::from_hex(0x73264D),
        on_tertiary_container: Color::from_hex(0xF4DDE8),
        error: Color::from_hex(0xF2B8B5),
        on_error: Color::from_hex(0x601410),
        error_container: Color::from_hex(0x8C1D18),
        on_error_container: Color::from_hex(0xF9DEDC),
        outline: Color::from_hex(0x9C918B),
        outline_variant: Color::from_hex(0x50453F),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0xE8E5E3),
        inverse_on_surface: Color::from_hex(0x342F2D),
        inverse_primary: Color::from_hex(0x8E4B29),
        text: Color::from_hex(0xE8E5E3),
        text_secondary: Color::from_hex(0xD2CAC6),
        accent: Color::from_hex(0xF2BFA6),
        border: Color::from_hex(0x50453F),
    }
}

pub fn theme() -> ThemeCollection {
    ThemeCollection {
        id: ID.to_string(),
        name: "Sunset Glow".to_string(),
        description: "Warm amber and coral tones for winding down.".to_string(),
        light: light(),
        dark: dark(),
        material_config: Default::default(),
        animations: ThemeAnimations::default(),
        is_custom: false,
    }
}

//! Forest Calm

use crate::theme::ThemeCollection;
use crate::tokens::ColorPalette;
use tranquil_animation::ThemeAnimations;
use tranquil_core::Color;

pub const ID: &str = "forest-calm";

pub fn light() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0xF8F9F9),
        on_background: Color::from_hex(0x1A1E1B),
        surface: Color::WHITE,
        on_surface: Color::from_hex(0x1A1E1B),
        surface_variant: Color::from_hex(0xE1EAE4),
        on_surface_variant: Color::from_hex(0x415347),
        primary: Color::from_hex(0x407753),
        on_primary: Color::WHITE,
        primary_container: Color::from_hex(0xDDF4E4),
        on_primary_container: Color::from_hex(0x15281C),
        secondary: Color::from_hex(0x596C4B),
        on_secondary: Color::WHITE,
        secondary_container: Color::from_hex(0xE7EEE3),
        on_secondary_container: Color::from_hex(0x1E2419),
        tertiary: Color::from_hex(0x857032),
        on_tertiary: Color::WHITE,
        tertiary_container: Color::from_hex(0xF2EDDE),
        on_tertiary_container: Color::from_hex(0x2C2511),
        error: Color::from_hex(0xB3261E),
        on_error: Color::WHITE,
        error_container: Color::from_hex(0xF9DEDC),
        on_error_container: Color::from_hex(0x410E0B),
        outline: Color::from_hex(0x6E8175),
        outline_variant: Color::from_hex(0xC6D2CA),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0x2D342F),
        inverse_on_surface: Color::from_hex(0xF1F3F2),
        inverse_primary: Color::from_hex(0xB3E6C4),
        text: Color::from_hex(0x1A1E1B),
        text_secondary: Color::from_hex(0x415347),
        accent: Color::from_hex(0x407753),
        border: Color::from_hex(0xC6D2CA),
    }
}

pub fn dark() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0x121212),
        on_background: Color::from_hex(0xE3E8E5),
        surface: Color::from_hex(0x1E1E1E),
        on_surface: Color::from_hex(0xE3E8E5),
        surface_variant: Color::from_hex(0x3F5045),
        on_surface_variant: Color::from_hex(0xC6D2CA),
        primary: Color::from_hex(0xB3E6C4),
        on_primary: Color::from_hex(0x203C29),
        primary_container: Color::from_hex(0x366345),
        on_primary_container: Color::from_hex(0xDDF4E4),
        secondary: Color::from_hex(0xCAD8C0),
        on_secondary: Color::from_hex(0x2D3626),
        secondary_container: Color::from_hex(0x4A5A3F),
        on_secondary_container: Color::from_hex(0xE7EEE3),
        tertiary: Color::from_hex(0xE3D7B5),
        on_tertiary: Color::from_hex(0x433819),
        tertiary_container: Color::from_hex(0x6F5E2A),
        on_tertiary_container: Color::from_hex(0xF2EDDE),
        error: Color::from_hex(0xF2B8B5),
        on_error: Color::from_hex(0x601410),
        error_container: Color::from_hex(0x8C1D18),
        on_error_container: Color::from_hex(0xF9DEDC),
        outline: Color::from_hex(0x8B9C91),
        outline_variant: Color::from_hex(0x3F5045),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0xE3E8E5),
        inverse_on_surface: Color::from_hex(0x2D342F),
        inverse_primary: Color::from_hex(0x407753),
        text: Color::from_hex(0xE3E8E5),
        text_secondary: Color::from_hex(0xC6D2CA),
        accent: Color::from_hex(0xB3E6C4),
        border: Color::from_hex(0x3F5045),
    }
}

pub fn theme() -> ThemeCollection {
    ThemeCollection {
        id: ID.to_string(),
        name: "Forest Calm".to_string(),
        description: "Muted mossy greens with slow, relaxed motion.".to_string(),
        light: light(),
        dark: dark(),
        material_config: Default::default(),
        animations: ThemeAnimations::relaxed(),
        is_custom: false,
    }
}

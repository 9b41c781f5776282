//! Ocean Depth

use crate::theme::ThemeCollection;
use crate::tokens::ColorPalette;
use tranquil_animation::ThemeAnimations;
use tranquil_core::Color;

pub const ID: &str = "ocean-depth";

pub fn light() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0xF8F9F9),
        on_background: Color::from_hex(0x1A1C1E),
        surface: Color::WHITE,
        on_surface: Color::from_hex(0x1A1C1E),
        surface_variant: Color::from_hex(0xE1E6EA),
        on_surface_variant: Color::from_hex(0x414B53),
        primary: Color::from_hex(0x326385),
        on_primary: Color::WHITE,
        primary_container: Color::from_hex(0xD9EBF7),
        on_primary_container: Color::from_hex(0x11212C),
        secondary: Color::from_hex(0x437075),
        on_secondary: Color::WHITE,
        secondary_container: Color::from_hex(0xE0EFF0),
        on_secondary_container: Color::from_hex(0x162527),
        tertiary: Color::from_hex(0x4D2E8A),
        on_tertiary: Color::WHITE,
        tertiary_container: Color::from_hex(0xE4DDF4),
        on_tertiary_container: Color::from_hex(0x1A0F2E),
        error: Color::from_hex(0xB3261E),
        on_error: Color::WHITE,
        error_container: Color::from_hex(0xF9DEDC),
        on_error_container: Color::from_hex(0x410E0B),
        outline: Color::from_hex(0x6E7981),
        outline_variant: Color::from_hex(0xC6CDD2),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0x2D3134),
        inverse_on_surface: Color::from_hex(0xF1F2F3),
        inverse_primary: Color::from_hex(0xABD2ED),
        text: Color::from_hex(0x1A1C1E),
        text_secondary: Color::from_hex(0x414B53),
        accent: Color::from_hex(0x326385),
        border: Color::from_hex(0xC6CDD2),
    }
}

pub fn dark() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0x121212),
        on_background: Color::from_hex(0xE3E6E8),
        surface: Color::from_hex(0x1E1E1E),
        on_surface: Color::from_hex(0xE3E6E8),
        surface_variant: Color::from_hex(0x3F4950),
        on_surface_variant: Color::from_hex(0xC6CDD2),
        primary: Color::from_hex(0xABD2ED),
        on_primary: Color::from_hex(0x193143),
        primary_container: Color::from_hex(0x2A526F),
        on_primary_container: Color::from_hex(0xD9EBF7),
        secondary: Color::from_hex(0xBADBDE),
        on_secondary: Color::from_hex(0x22383A),
        secondary_container: Color::from_hex(0x385E61),
        on_secondary_container: Color::from_hex(0xE0EFF0),
        tertiary: Color::from_hex(0xC4B3E6),
        on_tertiary: Color::from_hex(0x261745),
        tertiary_container: Color::from_hex(0x402673),
        on_tertiary_container: Color::from_hex(0xE4DDF4),
        error: Color::from_hex(0xF2B8B5),
        on_error: Color::from_hex(0x601410),
        error_container: Color::from_hex(0x8C1D18),
        on_error_container: Color::from_hex(0xF9DEDC),
        outline: Color::from_hex(0x8B959C),
        outline_variant: Color::from_hex(0x3F4950),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0xE3E6E8),
        inverse_on_surface: Color::from_hex(0x2D3134),
        inverse_primary: Color::from_hex(0x326385),
        text: Color::from_hex(0xE3E6E8),
        text_secondary: Color::from_hex(0xC6CDD2),
        accent: Color::from_hex(0xABD2ED),
        border: Color::from_hex(0x3F4950),
    }
}

pub fn theme() -> ThemeCollection {
    ThemeCollection {
        id: ID.to_string(),
        name: "Ocean Depth".to_string(),
        description: "Deep blues and teals for long focus sessions.".to_string(),
        light: light(),
        dark: dark(),
        material_config: Default::default(),
        animations: ThemeAnimations::default(),
        is_custom: false,
    }
}

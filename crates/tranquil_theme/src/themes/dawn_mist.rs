//! Dawn Mist

use crate::theme::ThemeCollection;
use crate::tokens::ColorPalette;
use tranquil_animation::ThemeAnimations;
use tranquil_core::Color;

pub const ID: &str = "dawn-mist";

pub fn light() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0xF8F8F9),
        on_background: Color::from_hex(0x1A1A1E),
        surface: Color::WHITE,
        on_surface: Color::from_hex(0x1A1A1E),
        surface_variant: Color::from_hex(0xE2E1EA),
        on_surface_variant: Color::from_hex(0x434153),
        primary: Color::from_hex(0x494573),
        on_primary: Color::WHITE,
        primary_container: Color::from_hex(0xDFDEF2),
        on_primary_container: Color::from_hex(0x181726),
        secondary: Color::from_hex(0x6A4E6A),
        on_secondary: Color::WHITE,
        secondary_container: Color::from_hex(0xEDE3ED),
        on_secondary_container: Color::from_hex(0x231A23),
        tertiary: Color::from_hex(0x8A2E4C),
        on_tertiary: Color::WHITE,
        tertiary_container: Color::from_hex(0xF4DDE4),
        on_tertiary_container: Color::from_hex(0x2E0F19),
        error: Color::from_hex(0xB3261E),
        on_error: Color::WHITE,
        error_container: Color::from_hex(0xF9DEDC),
        on_error_container: Color::from_hex(0x410E0B),
        outline: Color::from_hex(0x706E81),
        outline_variant: Color::from_hex(0xC7C6D2),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0x2D2D34),
        inverse_on_surface: Color::from_hex(0xF1F1F3),
        inverse_primary: Color::from_hex(0xB9B5E3),
        text: Color::from_hex(0x1A1A1E),
        text_secondary: Color::from_hex(0x434153),
        accent: Color::from_hex(0x494573),
        border: Color::from_hex(0xC7C6D2),
    }
}

pub fn dark() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0x121212),
        on_background: Color::from_hex(0xE4E3E8),
        surface: Color::from_hex(0x1E1E1E),
        on_surface: Color::from_hex(0xE4E3E8),
        surface_variant: Color::from_hex(0x403F50),
        on_surface_variant: Color::from_hex(0xC7C6D2),
        primary: Color::from_hex(0xB9B5E3),
        on_primary: Color::from_hex(0x242239),
        primary_container: Color::from_hex(0x3D3960),
        on_primary_container: Color::from_hex(0xDFDEF2),
        secondary: Color::from_hex(0xD6C2D6),
        on_secondary: Color::from_hex(0x352735),
        secondary_container: Color::from_hex(0x584158),
        on_secondary_container: Color::from_hex(0xEDE3ED),
        tertiary: Color::from_hex(0xE6B3C3),
        on_tertiary: Color::from_hex(0x451726),
        tertiary_container: Color::from_hex(0x732640),
        on_tertiary_container: Color::from_hex(0xF4DDE4),
        error: Color::from_hex(0xF2B8B5),
        on_error: Color::from_hex(0x601410),
        error_container: Color::from_hex(0x8C1D18),
        on_error_container: Color::from_hex(0xF9DEDC),
        outline: Color::from_hex(0x8D8B9C),
        outline_variant: Color::from_hex(0x403F50),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0xE4E3E8),
        inverse_on_surface: Color::from_hex(0x2D2D34),
        inverse_primary: Color::from_hex(0x494573),
        text: Color::from_hex(0xE4E3E8),
        text_secondary: Color::from_hex(0xC7C6D2),
        accent: Color::from_hex(0xB9B5E3),
        border: Color::from_hex(0x403F50),
    }
}

pub fn theme() -> ThemeCollection {
    ThemeCollection {
        id: ID.to_string(),
        name: "Dawn Mist".to_string(),
        description: "Soft lavender greys for early, unhurried mornings.".to_string(),
        light: light(),
        dark: dark(),
        material_config: Default::default(),
        animations: ThemeAnimations::default(),
        is_custom: false,
    }
}

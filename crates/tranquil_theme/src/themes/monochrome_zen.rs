//! Monochrome Zen

use crate::theme::ThemeCollection;
use crate::tokens::ColorPalette;
use tranquil_animation::ThemeAnimations;
use tranquil_core::Color;

pub const ID: &str = "monochrome-zen";

pub fn light() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0xF9F9F9),
        on_background: Color::from_hex(0x1C1C1C),
        surface: Color::WHITE,
        on_surface: Color::from_hex(0x1C1C1C),
        surface_variant: Color::from_hex(0xE6E6E6),
        on_surface_variant: Color::from_hex(0x4A4A4A),
        primary: Color::from_hex(0x5C5C5C),
        on_primary: Color::WHITE,
        primary_container: Color::from_hex(0xE8E8E8),
        on_primary_container: Color::from_hex(0x1F1F1F),
        secondary: Color::from_hex(0x5C5C5C),
        on_secondary: Color::WHITE,
        secondary_container: Color::from_hex(0xE8E8E8),
        on_secondary_container: Color::from_hex(0x1F1F1F),
        tertiary: Color::from_hex(0x5C5C5C),
        on_tertiary: Color::WHITE,
        tertiary_container: Color::from_hex(0xE8E8E8),
        on_tertiary_container: Color::from_hex(0x1F1F1F),
        error: Color::from_hex(0xB3261E),
        on_error: Color::WHITE,
        error_container: Color::from_hex(0xF9DEDC),
        on_error_container: Color::from_hex(0x410E0B),
        outline: Color::from_hex(0x787878),
        outline_variant: Color::from_hex(0xCCCCCC),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0x303030),
        inverse_on_surface: Color::from_hex(0xF2F2F2),
        inverse_primary: Color::from_hex(0xCCCCCC),
        text: Color::from_hex(0x1C1C1C),
        text_secondary: Color::from_hex(0x4A4A4A),
        accent: Color::from_hex(0x5C5C5C),
        border: Color::from_hex(0xCCCCCC),
    }
}

pub fn dark() -> ColorPalette {
    ColorPalette {
        background: Color::from_hex(0x121212),
        on_background: Color::from_hex(0xE6E6E6),
        surface: Color::from_hex(0x1E1E1E),
        on_surface: Color::from_hex(0xE6E6E6),
        surface_variant: Color::from_hex(0x474747),
        on_surface_variant: Color::from_hex(0xCCCCCC),
        primary: Color::from_hex(0xCCCCCC),
        on_primary: Color::from_hex(0x2E2E2E),
        primary_container: Color::from_hex(0x4C4C4C),
        on_primary_container: Color::from_hex(0xE8E8E8),
        secondary: Color::from_hex(0xCCCCCC),
        on_secondary: Color::from_hex(0x2E2E2E),
        secondary_container: Color::from_hex(0x4C4C4C),
        on_secondary_container: Color::from_hex(0xE8E8E8),
        tertiary: Color::from_hex(0xCCCCCC),
        on_tertiary: Color::from_hex(0x2E2E2E),
        tertiary_container: Color::from_hex(0x4C4C4C),
        on_tertiary_container: Color::from_hex(0xE8E8E8),
        error: Color::from_hex(0xF2B8B5),
        on_error: Color::from_hex(0x601410),
        error_container: Color::from_hex(0x8C1D18),
        on_error_container: Color::from_hex(0xF9DEDC),
        outline: Color::from_hex(0x949494),
        outline_variant: Color::from_hex(0x474747),
        shadow: Color::BLACK,
        inverse_surface: Color::from_hex(0xE6E6E6),
        inverse_on_surface: Color::from_hex(0x303030),
        inverse_primary: Color::from_hex(0x5C5C5C),
        text: Color::from_hex(0xE6E6E6),
        text_secondary: Color::from_hex(0xCCCCCC),
        accent: Color::from_hex(0xCCCCCC),
        border: Color::from_hex(0x474747),
    }
}

pub fn theme() -> ThemeCollection {
    ThemeCollection {
        id: ID.to_string(),
        name: "Monochrome Zen".to_string(),
        description: "Pure greyscale with the quietest motion.".to_string(),
        light: light(),
        dark: dark(),
        material_config: Default::default(),
        animations: ThemeAnimations::relaxed(),
        is_custom: false,
    }
}

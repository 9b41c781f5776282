use pretty_assertions::assert_eq;
use tranquil_core::{contrast_ratio, Color};
use tranquil_theme::elevation::{self, ElevationLevel};
use tranquil_theme::{
    builtin_themes, BuiltinTheme, ColorScheme, ColorToken, CustomColors, CustomTheme, ThemeRegistry,
    ThemeValidator, ValidatorConfig,
};

#[test]
fn every_builtin_theme_validates() {
    let registry = ThemeRegistry::with_builtins(ValidatorConfig::default());
    let summary = registry.validate_all();

    assert_eq!(summary.valid.len(), 5);
    assert!(summary.invalid.is_empty(), "{:?}", summary.invalid);
}

#[test]
fn catalog_ids_are_stable() {
    let ids: Vec<_> = BuiltinTheme::all().iter().map(|theme| theme.id()).collect();
    assert_eq!(
        ids,
        vec!["dawn-mist", "forest-calm", "ocean-depth", "sunset-glow", "monochrome-zen"]
    );
    for theme in BuiltinTheme::all() {
        assert_eq!(BuiltinTheme::from_id(theme.id()), Some(*theme));
        assert_eq!(theme.theme().id, theme.id());
    }
    assert_eq!(BuiltinTheme::from_id("aurora"), None);
}

#[test]
fn body_text_reaches_aaa_on_backgrounds() {
    for theme in builtin_themes() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let palette = theme.palette(scheme);
            let ratio = contrast_ratio(palette.text, palette.background);
            assert!(ratio >= 7.0, "{} {scheme}: {ratio:.2}", theme.id);
        }
    }
}

#[test]
fn builtin_elevation_sets_are_monotonic() {
    for theme in builtin_themes() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            let levels = theme.elevation(scheme);
            assert!(elevation::validate(&levels).is_valid, "{} {scheme}", theme.id);

            for pair in ElevationLevel::all().windows(2) {
                let (lower, upper) = (levels.get(pair[0]), levels.get(pair[1]));
                assert!(upper.shadow_opacity > lower.shadow_opacity);
                assert!(upper.shadow_radius > lower.shadow_radius);
            }
        }
    }
}

#[test]
fn removed_custom_theme_is_not_found() {
    let mut registry = ThemeRegistry::with_builtins(ValidatorConfig::default());
    let base = BuiltinTheme::SunsetGlow.theme();

    let mut colors = CustomColors::default();
    colors.dark.set(ColorToken::Accent, Color::from_hex(0xFFB38A));
    let theme = CustomTheme::derive("ember", "Ember", "Late evening warmth", &base).with_colors(colors);

    registry.register_custom(theme).unwrap();
    assert_eq!(registry.validate_all().valid.len(), 6);
    assert_eq!(registry.search("evening").len(), 1);

    assert!(registry.remove("ember"));
    assert!(registry.get("ember").is_none());
    assert!(registry.get_custom("ember").is_none());
    assert!(registry.search("evening").is_empty());
    assert_eq!(registry.get_or_default("ember").unwrap().id, "dawn-mist");
}

#[test]
fn themes_serialize_colors_as_hex() {
    let theme = BuiltinTheme::MonochromeZen.theme();
    let json = serde_json::to_value(&theme).unwrap();

    let background = json["light"]["background"].as_str().unwrap();
    assert!(background.starts_with('#'));
    assert_eq!(background.len(), 7);
    assert_eq!(json["id"], "monochrome-zen");
    assert!(json["materialConfig"]["elevation"]["floating"].is_object());
}

#[test]
fn large_text_grading_is_more_lenient() {
    let mut palette = BuiltinTheme::DawnMist.theme().light;
    // About 3.7:1 on the primary
    palette.on_primary = Color::from_hex(0xA8A4D0);

    let strict = ThemeValidator::default();
    let lenient = ThemeValidator::new(ValidatorConfig {
        large_text: true,
        ..Default::default()
    });

    let failures = |validator: &ThemeValidator| {
        validator
            .validate_palette(&palette)
            .into_iter()
            .filter(|r| !r.passes)
            .count()
    };
    assert_eq!(failures(&strict), 1);
    assert_eq!(failures(&lenient), 0);
}

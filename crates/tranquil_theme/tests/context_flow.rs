use pretty_assertions::assert_eq;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tranquil_animation::{DeviceInfo, PerformanceSettingsPatch, PerformanceTier};
use tranquil_core::Color;
use tranquil_theme::persistence::keys;
use tranquil_theme::{
    ChangeReason, ColorScheme, ColorToken, CustomColors, EffectIntensity, EffectType, EngineSettings, JsonFileStore,
    MemoryStore, PersistError, PreferenceStore, ProgressIndicator, ThemeContext, VisualMode, VisualModeEngine,
    ZenModeConfigPatch,
};

fn high_end() -> DeviceInfo {
    DeviceInfo {
        pixel_density: 3.0,
        ..Default::default()
    }
}

/// Rejects every write
struct ReadOnlyStore;

impl PreferenceStore for ReadOnlyStore {
    fn save(&mut self, _key: &str, _value: &str) -> Result<(), PersistError> {
        Err(PersistError::Backend("store is read-only".into()))
    }

    fn load(&self, _key: &str) -> Result<Option<String>, PersistError> {
        Ok(None)
    }
}

/// Collects formatted log output
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn ambient_mode_degrades_to_low_tier() {
    let mut engine = VisualModeEngine::new(VisualMode::Ambient, PerformanceTier::High);
    engine.optimize_for_performance(PerformanceTier::Low);

    let visualization = engine.timer_visualization();
    assert!(!visualization.ambient_particles);
    assert_eq!(visualization.progress_indicator, ProgressIndicator::None);
    assert!(!engine.is_effect_supported(EffectType::Particles));
}

#[test]
fn ambient_context_degrades_when_tier_drops() {
    let mut context = ThemeContext::in_memory(high_end()).unwrap();
    context.set_visual_mode(VisualMode::Ambient).unwrap();
    assert!(context.timer_visualization().ambient_particles);

    context
        .update_performance(&PerformanceSettingsPatch {
            tier: Some(PerformanceTier::Low),
            ..Default::default()
        })
        .unwrap();

    let visualization = context.timer_visualization();
    assert!(!visualization.ambient_particles);
    assert_eq!(visualization.progress_indicator, ProgressIndicator::None);
    assert!(context.visuals().active_effects().iter().all(|e| e.effect_type != EffectType::Particles));
}

#[test]
fn effect_changes_survive_mode_round_trip() {
    let mut context = ThemeContext::in_memory(high_end()).unwrap();
    context.set_visual_mode(VisualMode::Artistic).unwrap();
    context
        .visuals_mut()
        .set_intensity(EffectType::Gradient, EffectIntensity::Subtle);

    context.set_visual_mode(VisualMode::Minimal).unwrap();
    context.set_visual_mode(VisualMode::Artistic).unwrap();

    let gradient = context.visuals().effect(EffectType::Gradient).unwrap();
    assert_eq!(gradient.intensity, EffectIntensity::Subtle);
    assert_eq!(gradient.animation.duration_ms, 8000);
}

#[test]
fn persistence_failures_are_logged_and_state_still_applies() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut context = ThemeContext::new(EngineSettings::default(), high_end(), ReadOnlyStore).unwrap();
        let notified = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&notified);
        context.subscribe(move |change| sink.lock().unwrap().push(change.reason));

        let persisted = context.set_theme("forest-calm").unwrap();
        assert!(matches!(persisted, Err(PersistError::Backend(_))));
        assert_eq!(context.theme().id, "forest-calm");

        assert!(context.set_scheme(ColorScheme::Dark).is_err());
        assert!(context.is_dark());

        assert_eq!(*notified.lock().unwrap(), vec![ChangeReason::Theme, ChangeReason::Scheme]);
    });

    let output = logs.contents();
    assert!(output.contains("failed to persist preference"), "{output}");
    assert!(output.contains("theme_id"));
    assert!(output.contains("theme_mode"));
}

#[test]
fn restore_brings_back_every_preference() {
    let mut first = ThemeContext::in_memory(high_end()).unwrap();

    let mut colors = CustomColors::default();
    colors.light.set(ColorToken::Accent, Color::from_hex(0x1F5F4F));
    let custom = first
        .derive_custom_theme("Pine", "Evergreen accents", "forest-calm", colors)
        .unwrap();
    let custom_id = custom.id.clone();

    first.create_custom_theme(custom).unwrap().unwrap();
    first.set_theme(&custom_id).unwrap().unwrap();
    first.set_scheme(ColorScheme::Dark).unwrap();
    first.set_visual_mode(VisualMode::Artistic).unwrap();
    first
        .update_zen(&ZenModeConfigPatch {
            enabled: Some(true),
            dim_level: Some(0.5),
            ..Default::default()
        })
        .unwrap();
    first
        .update_performance(&PerformanceSettingsPatch {
            tier: Some(PerformanceTier::Medium),
            ..Default::default()
        })
        .unwrap();

    let store = first.into_store();
    let mut second = ThemeContext::new(EngineSettings::default(), high_end(), store).unwrap();
    assert_eq!(second.theme().id, "dawn-mist");

    let reasons = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reasons);
    second.subscribe(move |change| sink.lock().unwrap().push(change.reason));
    second.restore();

    assert_eq!(second.theme().id, custom_id);
    assert!(second.theme().is_custom);
    assert_eq!(second.theme().light.accent, Color::from_hex(0x1F5F4F));
    assert_eq!(second.scheme(), ColorScheme::Dark);
    assert_eq!(second.visual_mode(), VisualMode::Artistic);
    assert!(second.zen().enabled);
    assert_eq!(second.zen().dim_level, 0.5);
    assert_eq!(second.performance_settings().tier, PerformanceTier::Medium);
    assert_eq!(second.visuals().tier(), PerformanceTier::Medium);
    assert_eq!(second.presented().theme_id, custom_id);
    assert_eq!(*reasons.lock().unwrap(), vec![ChangeReason::Restored]);
}

#[test]
fn restore_skips_bad_values() {
    let mut store = MemoryStore::new();
    store.save(keys::THEME_ID, "no-such-theme").unwrap();
    store.save(keys::THEME_MODE, "sepia").unwrap();
    store.save(keys::VISUAL_MODE, "disco").unwrap();
    store.save(keys::ZEN_CONFIG, "{broken").unwrap();
    store.save(keys::CUSTOM_THEMES, "[]").unwrap();

    let mut context = ThemeContext::new(EngineSettings::default(), high_end(), store).unwrap();
    context.restore();

    assert_eq!(context.theme().id, "dawn-mist");
    assert_eq!(context.scheme(), ColorScheme::Light);
    assert_eq!(context.visual_mode(), VisualMode::Minimal);
    assert!(!context.zen().enabled);
}

#[test]
fn preferences_round_trip_through_a_json_file() {
    let path = std::env::temp_dir().join(format!("tranquil-context-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let store = JsonFileStore::open(&path).unwrap();
        let mut context = ThemeContext::new(EngineSettings::default(), high_end(), store).unwrap();
        context.set_theme("ocean-depth").unwrap().unwrap();
        context.set_visual_mode(VisualMode::Ambient).unwrap();
    }

    let store = JsonFileStore::open(&path).unwrap();
    let mut context = ThemeContext::new(EngineSettings::default(), high_end(), store).unwrap();
    context.restore();
    assert_eq!(context.theme().id, "ocean-depth");
    assert_eq!(context.visual_mode(), VisualMode::Ambient);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn sustained_slow_frames_force_reduced_motion() {
    let mut context = ThemeContext::in_memory(high_end()).unwrap();
    let reasons = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reasons);
    context.subscribe(move |change| sink.lock().unwrap().push(change.reason));

    for _ in 0..40 {
        context.advance(50.0);
    }

    assert!(context.performance_settings().reduced_motion);
    assert_eq!(context.animation_config("themeTransition").unwrap().duration_ms, 0);
    assert_eq!(context.visuals().tier(), PerformanceTier::Low);
    assert!(reasons.lock().unwrap().contains(&ChangeReason::Performance));
}

use tranquil_animation::{
    AnimatedValue, AnimationConfig, AnimationManager, AnimationSlot, DigitTransitionKind, Iterations,
    PerformanceMonitor, PerformanceSettings, PerformanceTier,
};

#[test]
fn slow_frames_trigger_quality_reduction() {
    let mut monitor = PerformanceMonitor::default();
    for _ in 0..10 {
        monitor.record_frame_time(50.0);
    }

    let metrics = monitor.metrics();
    assert!(metrics.frame_rate < 60.0);
    assert!(metrics.frame_drop_count > 0);
    assert!(monitor.recommendations().should_reduce_quality);
}

#[test]
fn reduced_motion_optimize_is_instant_and_single_pass() {
    let manager = AnimationManager::new(PerformanceSettings {
        reduced_motion: true,
        ..Default::default()
    });

    for slot in AnimationSlot::all() {
        let optimized = manager.config_for(*slot);
        assert_eq!(optimized.duration_ms, 0, "{slot:?}");
        assert_eq!(optimized.iterations, Iterations::ONCE, "{slot:?}");
    }

    let looping = AnimationConfig::new(4000).looping();
    let optimized = manager.optimize(looping);
    assert_eq!(optimized.duration_ms, 0);
    assert_eq!(optimized.iterations, Iterations::ONCE);
}

#[test]
fn monitor_reports_drive_self_correction() {
    let mut monitor = PerformanceMonitor::default();
    let mut manager = AnimationManager::new(PerformanceSettings {
        max_concurrent_animations: 4,
        ..Default::default()
    });
    monitor.start();

    let breathing = AnimatedValue::new(0.6);
    let _loop = manager.breathing_animation(&breathing, 0.6, 1.0);

    let mut corrected = false;
    for _ in 0..20 {
        manager.tick(50.0);
        monitor.record_frame_time(50.0);
        if let Some(report) = monitor.advance(50.0) {
            corrected |= manager.self_correct(&report);
        }
    }

    assert!(corrected);
    assert_eq!(manager.settings().max_concurrent_animations, 3);
    assert!(manager.settings().reduced_motion);

    let optimized = manager.config_for(AnimationSlot::Breathing);
    assert_eq!(optimized.duration_ms, 0);
}

#[test]
fn digit_transitions_follow_the_tier() {
    let mut manager = AnimationManager::new(PerformanceSettings {
        tier: PerformanceTier::Medium,
        ..Default::default()
    });
    let digit = AnimatedValue::new(1.0);

    let mut done = manager.digit_transition(&digit, DigitTransitionKind::Fade);
    manager.tick(100.0);
    assert!(digit.get() < 0.01);
    manager.tick(100.0);
    assert_eq!(digit.get(), 1.0);
    assert_eq!(done.try_result(), Some(Ok(())));
}

#[test]
fn teardown_interrupts_everything() {
    let mut manager = AnimationManager::default();
    let values: Vec<_> = (0..4).map(|_| AnimatedValue::new(0.0)).collect();
    let mut completions: Vec<_> = values
        .iter()
        .map(|v| manager.pulse_animation(v, 1.2))
        .collect();

    manager.tick(16.0);
    manager.teardown();

    assert_eq!(manager.active_count(), 0);
    for completion in &mut completions {
        assert!(matches!(completion.try_result(), Some(Err(_))));
    }
}

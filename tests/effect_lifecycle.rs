//! Integration tests for the effect lifecycle
//!
//! Drives effects with a virtual clock and a recording canvas to verify
//! the reduced-motion gate and teardown behavior over sustained runs.

use driftfx::{DriverState, EffectConfig, EffectDriver, EffectStage};
use driftfx_core::TraceCanvas;

const DT: f32 = 1.0 / 60.0;

#[test]
fn reduced_motion_draws_nothing_over_five_seconds() {
    let mut driver = EffectDriver::new(EffectConfig::dust());
    driver.start(640, 480, true);

    let mut canvas = TraceCanvas::new(640, 480);
    for _ in 0..300 {
        driver.tick(DT, &mut canvas, None);
    }

    assert_eq!(driver.state(), DriverState::Idle);
    assert!(canvas.calls.is_empty(), "reduced motion must draw nothing");
}

#[test]
fn stop_is_complete_over_one_second() {
    let mut driver = EffectDriver::new(EffectConfig::dust());
    driver.start(640, 480, false);

    let mut canvas = TraceCanvas::new(640, 480);
    driver.tick(DT, &mut canvas, None);
    assert!(!canvas.calls.is_empty());

    driver.stop(&mut canvas);
    assert_eq!(driver.state(), DriverState::Stopped);
    assert_eq!(driver.particle_count(), 0);

    // A full second of further ticks after teardown draws nothing
    canvas.reset();
    for _ in 0..60 {
        driver.tick(DT, &mut canvas, None);
    }
    assert!(canvas.calls.is_empty(), "stopped effect must stay silent");
}

#[test]
fn duration_elapse_tears_down_mid_run() {
    let config = EffectConfig::fireworks().with_duration(1.0);
    let mut driver = EffectDriver::new(config);
    driver.start(640, 480, false);

    let mut canvas = TraceCanvas::new(640, 480);
    // Two virtual seconds; the effect stops itself halfway through
    for _ in 0..120 {
        driver.tick(DT, &mut canvas, None);
    }

    assert_eq!(driver.state(), DriverState::Stopped);
    assert_eq!(driver.particle_count(), 0);
}

#[test]
fn stage_reduced_motion_gates_every_effect() {
    let mut stage = EffectStage::new();
    stage.mount(EffectDriver::new(EffectConfig::dust()));
    stage.mount(EffectDriver::new(EffectConfig::petals()));
    stage.mount(EffectDriver::new(EffectConfig::fireworks()));

    stage.start_all(640, 480, true);
    assert_eq!(stage.total_particles(), 0);

    let mut canvas = TraceCanvas::new(640, 480);
    for _ in 0..300 {
        stage.tick_all(DT, &mut canvas, None);
    }
    assert!(canvas.calls.is_empty());
}

#[test]
fn long_ambient_run_stays_bounded() {
    let mut driver = EffectDriver::new(EffectConfig::dust());
    driver.start(640, 480, false);
    let initial = driver.particle_count();

    let mut canvas = TraceCanvas::new(640, 480);
    // Thirty virtual seconds of wrap-edge ambience
    for _ in 0..1800 {
        canvas.reset();
        driver.tick(DT, &mut canvas, None);
    }

    assert_eq!(driver.state(), DriverState::Running);
    assert_eq!(driver.particle_count(), initial);
}

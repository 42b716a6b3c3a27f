use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;

use super::*;
use crate::domain::OperationalState;
use crate::render::DisplayList;
use crate::render::DrawCommand;
use crate::systems::particles::{spawn_progress, spawn_span};

fn seeded_core() -> SimulationCore {
    let config = SimulationConfig { rng_seed: Some(42), ..SimulationConfig::default() };
    SimulationCore::new(config, Layout::default()).unwrap()
}

/// Tick at 60 fps until `until_ms`, calling `inspect` after every tick
fn run_until(
    core: &mut SimulationCore,
    from_ms: f64,
    until_ms: f64,
    mut inspect: impl FnMut(&SimulationCore),
) -> f64 {
    let mut now = from_ms;
    while now < until_ms {
        core.advance(now);
        inspect(core);
        now += FRAME_TIME_MS;
    }
    now
}

#[test]
fn charging_rises_monotonically_and_self_clears_near_max() {
    let mut core = seeded_core();
    core.start_charging();

    let mut last = core.state().current_temperature;
    let mut peak = last;
    let mut cleared = false;
    run_until(&mut core, 0.0, 20_000.0, |c| {
        let s = c.state();
        if s.operational_state == OperationalState::Charging {
            assert!(s.current_temperature >= last, "fell while charging");
            assert!(s.is_heating);
        } else if !cleared {
            cleared = true;
            assert_eq!(s.operational_state, OperationalState::Stopped);
            assert!(!s.is_heating);
        }
        last = s.current_temperature;
        peak = peak.max(s.current_temperature);
    });

    assert!(cleared);
    assert!(peak >= 599.0 && peak <= 600.0, "peak {peak}");
}

#[test]
fn end_to_end_charge_timeline() {
    let mut core = seeded_core();
    core.advance(0.0);
    core.start_charging();

    let mut peak = 0.0_f64;
    let mut track_peak = |c: &SimulationCore| peak = peak.max(c.state().current_temperature);
    let now = run_until(&mut core, FRAME_TIME_MS, 5_000.0, &mut track_peak);
    let s = core.snapshot();
    assert_eq!(s.operational_state, OperationalState::Charging);
    assert!(s.current_temperature > 25.0 && s.current_temperature < 600.0);

    run_until(&mut core, now, 15_000.0, &mut track_peak);
    assert_eq!(core.state().operational_state, OperationalState::Stopped);
    assert!((600.0 - peak).abs() <= 1.0, "peak {peak}");
}

#[test]
fn stop_from_max_cools_to_room() {
    let mut core = seeded_core();
    core.state.current_temperature = 600.0;
    core.state.output_temperature = 180.0;
    core.stop();
    assert_eq!(core.state().operational_state, OperationalState::Cooling);
    assert_eq!(core.state().target_temperature, 25.0);

    let mut last = 600.0;
    run_until(&mut core, 0.0, 90_000.0, |c| {
        let t = c.state().current_temperature;
        assert!(t <= last, "rose while cooling");
        assert!(t >= 25.0);
        last = t;
    });

    let s = core.state();
    assert_eq!(s.operational_state, OperationalState::Stopped);
    assert_eq!(s.current_temperature, 25.0);
    assert_eq!(s.output_temperature, 25.0);
}

#[test]
fn discharge_primes_pool_at_viewport_size() {
    let mut core = seeded_core();
    core.mount(1920.0);
    assert_eq!(core.particle_count(), 150);

    core.mount(500.0);
    assert_eq!(core.particle_count(), 60);

    // age the pool, then make sure discharge re-primes it
    for p in core.pool.particles_mut() {
        p.life = 50;
    }
    core.state.current_temperature = 400.0;
    core.start_discharging();

    let s = core.state();
    assert_eq!(s.operational_state, OperationalState::Discharging);
    assert!(s.is_fan_running);
    assert!(!s.is_heating);
    assert_eq!(core.particle_count(), 60);
    assert!(core.particles().iter().all(|p| p.life == 0));

    let start = spawn_progress(core.layout());
    let end = start + spawn_span(core.layout());
    for p in core.particles() {
        assert!(p.progress >= start && p.progress < end, "progress {}", p.progress);
    }
}

#[test]
fn remount_starts_from_rest() {
    let mut core = seeded_core();
    core.start_charging();
    run_until(&mut core, 0.0, 3_000.0, |_| {});
    assert!(core.state().current_temperature > 25.0);

    core.start_discharging();
    run_until(&mut core, 3_000.0, 3_500.0, |_| {});
    assert!(core.fan_rotation() > 0.0);

    core.mount(1920.0);
    assert_eq!(core.snapshot(), SimulationState::at_rest(25.0));
    assert_eq!(core.fan_rotation(), 0.0);
}

#[test]
fn recycled_particles_are_never_drawn_at_the_origin() {
    let mut core = seeded_core();
    let mut surface = DisplayList::new();
    core.start_discharging();
    core.frame_on(0.0, &mut surface, 1920.0, 1080.0);

    let forced = &mut core.pool.particles_mut()[3];
    forced.life = forced.max_life as u32 + 1;

    for i in 1..=120 {
        surface.clear();
        core.frame_on(f64::from(i) * FRAME_TIME_MS, &mut surface, 1920.0, 1080.0);
        let at_origin = surface.count(|c| {
            matches!(c, DrawCommand::Arc { x, y, .. } if x.abs() < 1.0 && y.abs() < 1.0)
        });
        assert_eq!(at_origin, 0, "frame {i}");
    }
}

#[test]
fn repeated_discharge_command_keeps_pool() {
    let mut core = seeded_core();
    core.start_discharging();
    run_until(&mut core, 0.0, 500.0, |_| {});
    let before: Vec<_> = core.particles().to_vec();

    core.start_discharging();
    assert_eq!(core.particles(), before.as_slice());
}

#[test]
fn charging_command_is_idempotent() {
    let mut core = seeded_core();
    core.start_charging();
    run_until(&mut core, 0.0, 1_000.0, |_| {});
    let before = core.snapshot();

    core.start_charging();
    assert_eq!(core.snapshot(), before);
}

#[test]
fn expired_particle_is_recycled_in_place() {
    let mut core = seeded_core();
    core.start_discharging();
    let len = core.particle_count();

    let forced = &mut core.pool.particles_mut()[3];
    forced.life = forced.max_life as u32 + 1;
    core.advance(0.0);

    let p = core.particles()[3];
    assert_eq!(p.life, 0);
    assert_abs_diff_eq!(p.progress, spawn_progress(core.layout()), epsilon = 1e-12);
    assert_eq!(core.particle_count(), len);
}

#[test]
fn particles_hold_still_unless_discharging() {
    let mut core = seeded_core();
    let before: Vec<_> = core.particles().to_vec();
    core.start_charging();
    run_until(&mut core, 0.0, 1_000.0, |_| {});
    assert_eq!(core.particles(), before.as_slice());
}

#[test]
fn first_tick_after_mount_has_zero_dt() {
    let mut core = seeded_core();
    core.start_charging();
    assert_eq!(core.advance(5_000.0), 0.0);
    assert_eq!(core.state().current_temperature, 25.0);
    assert_abs_diff_eq!(core.advance(5_016.0), 16.0);

    core.mount(1920.0);
    assert_eq!(core.advance(9_000.0), 0.0);
}

#[test]
fn skipped_frame_only_moves_the_clock() {
    let mut core = seeded_core();
    core.start_charging();
    core.advance(0.0);

    let before = core.snapshot();
    core.skip_frame(100.0);
    assert_eq!(core.snapshot(), before);
    assert_abs_diff_eq!(core.advance(150.0), 50.0);
}

#[test]
fn bad_timestamps_do_not_poison_state() {
    let mut core = seeded_core();
    core.start_charging();
    core.advance(1_000.0);
    assert_eq!(core.advance(f64::NAN), 0.0);
    assert_eq!(core.advance(500.0), 0.0);
    assert!(core.state().current_temperature.is_finite());
}

#[test]
fn snapshots_are_throttled() {
    let mut core = seeded_core();
    let mut surface = DisplayList::new();

    assert!(core.frame_on(0.0, &mut surface, 1920.0, 1080.0).is_some());
    assert!(core.frame_on(16.0, &mut surface, 1920.0, 1080.0).is_none());
    assert!(core.frame_on(50.0, &mut surface, 1920.0, 1080.0).is_none());
    assert!(core.frame_on(70.0, &mut surface, 1920.0, 1080.0).is_some());
    assert!(core.frame_on(100.0, &mut surface, 1920.0, 1080.0).is_none());
}

#[test]
fn every_frame_is_redrawn_from_a_clear() {
    let mut core = seeded_core();
    let mut surface = DisplayList::new();
    core.frame_on(0.0, &mut surface, 800.0, 600.0);
    let first = surface.len();
    assert!(first > 0);

    surface.clear();
    core.frame_on(16.0, &mut surface, 800.0, 600.0);
    assert_eq!(
        surface.commands()[0],
        crate::render::DrawCommand::ClearRect(0.0, 0.0, 800.0, 600.0)
    );
}

#[test]
fn fan_turns_only_while_running() {
    let mut core = seeded_core();
    core.advance(0.0);
    core.advance(FRAME_TIME_MS);
    assert_eq!(core.fan_rotation(), 0.0);

    core.start_discharging();
    core.advance(2.0 * FRAME_TIME_MS);
    assert_abs_diff_eq!(core.fan_rotation(), FAN_ROTATION_SPEED * TAU, epsilon = 1e-9);
}

#[test]
fn discharge_advice_follows_threshold() {
    let mut core = seeded_core();
    assert!(!core.can_discharge());
    core.state.current_temperature = 100.0;
    assert!(core.can_discharge());
}

#[test]
fn perf_stats_count_frames_when_enabled() {
    let mut core = seeded_core();
    let mut surface = DisplayList::new();

    core.frame_on(0.0, &mut surface, 640.0, 480.0);
    assert_eq!(core.get_perf_stats().frames(), 0);

    core.enable_perf_metrics(true);
    core.start_discharging();
    core.frame_on(16.0, &mut surface, 640.0, 480.0);
    core.frame_on(100.0, &mut surface, 640.0, 480.0);

    let stats = core.get_perf_stats();
    assert_eq!(stats.frames(), 2);
    assert_eq!(stats.snapshots_published(), 1);
    assert_eq!(stats.active_particles(), 150);
    assert!(stats.frame_ms() >= stats.render_ms());

    core.enable_perf_metrics(false);
    assert_eq!(core.get_perf_stats().frames(), 0);
}

#[test]
fn invalid_setup_is_rejected() {
    let err = SimulationCore::from_config_json(r#"{ "room_temperature": 700 }"#);
    assert!(matches!(err, Err(SetupError::Config(_))));

    let layout = Layout { insulation_thickness: 400.0, ..Layout::default() };
    let err = SimulationCore::new(SimulationConfig::default(), layout);
    assert!(matches!(err, Err(SetupError::Layout(_))));

    assert!(SimulationCore::from_config_json("{ not json").is_err());
}

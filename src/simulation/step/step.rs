use std::f64::consts::TAU;

use crate::domain::StateSnapshot;
use crate::render::{draw_scene, FrameView, Surface};
use crate::systems::thermal;

use super::perf_timer::timed;
use super::{PerfTimer, SimulationCore, FAN_ROTATION_SPEED, FRAME_TIME_MS};

/// Milliseconds since the previous tick. The first tick after mount is 0,
/// a clock that runs backwards counts as 0.
fn tick_clock(core: &mut SimulationCore, now_ms: f64) -> f64 {
    if !now_ms.is_finite() {
        return 0.0;
    }
    let dt_ms = match core.last_frame_ms {
        Some(last) => (now_ms - last).max(0.0),
        None => 0.0,
    };
    core.last_frame_ms = Some(now_ms);
    dt_ms
}

pub(super) fn advance(core: &mut SimulationCore, now_ms: f64) -> f64 {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.begin_frame();
    }

    let dt_ms = tick_clock(core, now_ms);

    let ((), physics_ms) = timed(perf_on, || {
        thermal::integrate(&mut core.state, &core.config, dt_ms / 1000.0)
    });

    let (recycled, particles_ms) = timed(perf_on, || {
        core.pool.update(&core.state, &core.layout, core.config.room_temperature, &mut core.rng)
    });

    if core.state.is_fan_running {
        let turn = FAN_ROTATION_SPEED * (dt_ms / FRAME_TIME_MS) * TAU;
        core.fan_rotation = (core.fan_rotation + turn).rem_euclid(TAU);
    }

    core.frame += 1;

    if perf_on {
        let stats = &mut core.perf_stats;
        stats.dt_ms = dt_ms;
        stats.physics_ms = physics_ms;
        stats.particles_ms = particles_ms;
        stats.recycled_particles = recycled;
        stats.active_particles = core.pool.len() as u32;
        stats.frames = stats.frames.saturating_add(1);
    }

    dt_ms
}

fn render<S: Surface + ?Sized>(core: &SimulationCore, surface: &mut S, width: f64, height: f64) {
    let view = FrameView {
        state: &core.state,
        particles: core.pool.particles(),
        layout: &core.layout,
        speckle: &core.speckle,
        room_temperature: core.config.room_temperature,
        max_temperature: core.config.max_temperature,
        fan_rotation: core.fan_rotation,
        time_ms: core.last_frame_ms.unwrap_or(0.0),
    };
    draw_scene(surface, &view, width, height);
}

fn take_snapshot_if_due(core: &mut SimulationCore, now_ms: f64) -> Option<StateSnapshot> {
    let due = match core.last_publish_ms {
        Some(last) => now_ms - last > core.config.ui_publish_interval_ms,
        None => true,
    };
    if !due {
        return None;
    }
    core.last_publish_ms = Some(now_ms);
    if core.perf_enabled {
        core.perf_stats.snapshots_published = core.perf_stats.snapshots_published.saturating_add(1);
    }
    Some(core.state)
}

pub(super) fn frame<S: Surface + ?Sized>(
    core: &mut SimulationCore,
    now_ms: f64,
    surface: &mut S,
    width: f64,
    height: f64,
) -> Option<StateSnapshot> {
    let frame_start = if core.perf_enabled { Some(PerfTimer::start()) } else { None };

    advance(core, now_ms);

    let ((), render_ms) = timed(core.perf_enabled, || render(core, surface, width, height));

    let snapshot = take_snapshot_if_due(core, now_ms);

    if let Some(start) = frame_start {
        core.perf_stats.render_ms = render_ms;
        core.perf_stats.frame_ms = start.elapsed_ms();
    }

    snapshot
}

pub(super) fn skip_frame(core: &mut SimulationCore, now_ms: f64) {
    tick_clock(core, now_ms);
}

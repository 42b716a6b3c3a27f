//! Simulation - the sand battery exhibit as one frame-driven core
//!
//! `SimulationCore` owns the state record, the particle pool, the fixed
//! layout and the frame clock. Each tick: thermal integration, airflow,
//! fan spin, redraw, throttled snapshot publication.
//!
//! Split the same way as the rest of the engine:
//! - init/     construction and runtime settings
//! - commands/ host-issued state changes
//! - step/     the per-frame pipeline
//! - perf/     optional frame timings
//! - facade    wasm-bindgen surface for the browser

use rand::rngs::SmallRng;
use thiserror::Error;

use crate::domain::{
    ConfigError, Layout, LayoutError, SimulationConfig, SimulationState, StateSnapshot,
};
use crate::render::{Surface, SpeckleTexture};
use crate::systems::{Particle, ParticlePool};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use facade::SandBattery;
pub use perf_stats::PerfStats;

use perf_timer::PerfTimer;

/// Nominal frame length the fan speed is expressed against
pub const FRAME_TIME_MS: f64 = 1000.0 / 60.0;
/// Fan blade advance per nominal frame, in turns
pub const FAN_ROTATION_SPEED: f64 = 0.15;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}

pub struct SimulationCore {
    config: SimulationConfig,
    layout: Layout,
    state: SimulationState,
    pool: ParticlePool,
    rng: SmallRng,
    speckle: SpeckleTexture,

    // Frame clock
    fan_rotation: f64,
    last_frame_ms: Option<f64>,
    last_publish_ms: Option<f64>,
    frame: u64,

    // Pool size picked at mount from the viewport width
    pool_size: usize,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl SimulationCore {
    /// Core with the given tuning and layout, pool sized for a desktop viewport
    pub fn new(config: SimulationConfig, layout: Layout) -> Result<Self, SetupError> {
        init::create_core(config, layout)
    }

    /// Default tuning and the standard exhibit layout
    pub fn with_defaults() -> Result<Self, SetupError> {
        Self::new(SimulationConfig::default(), Layout::default())
    }

    pub fn from_config_json(json: &str) -> Result<Self, SetupError> {
        let config = SimulationConfig::from_json(json)?;
        Self::new(config, Layout::default())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Copy of the state for the host UI
    pub fn snapshot(&self) -> StateSnapshot {
        self.state
    }

    pub fn particles(&self) -> &[Particle] {
        self.pool.particles()
    }

    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    pub fn fan_rotation(&self) -> f64 {
        self.fan_rotation
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advisory: enough stored heat for discharging to be worth it
    pub fn can_discharge(&self) -> bool {
        self.state.current_temperature >= self.config.discharge_threshold
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn start_charging(&mut self) {
        commands::start_charging(self);
    }

    pub fn start_discharging(&mut self) {
        commands::start_discharging(self);
    }

    pub fn stop(&mut self) {
        commands::stop(self);
    }

    /// (Re)attach to a viewport. State starts over at rest, the pool is
    /// resized and re-primed, timers reset.
    pub fn mount(&mut self, viewport_width: f64) {
        init::mount(self, viewport_width);
    }

    /// Physics, particles and fan for one tick without drawing.
    ///
    /// Returns the elapsed milliseconds used for the tick.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        step::advance(self, now_ms)
    }

    /// Full frame: advance, clear and redraw `surface`, and return a
    /// snapshot when one is due for the host UI.
    pub fn frame_on<S: Surface + ?Sized>(
        &mut self,
        now_ms: f64,
        surface: &mut S,
        width: f64,
        height: f64,
    ) -> Option<StateSnapshot> {
        step::frame(self, now_ms, surface, width, height)
    }

    /// No drawing context this tick: keep the clock moving, touch nothing else
    pub fn skip_frame(&mut self, now_ms: f64) {
        step::skip_frame(self, now_ms);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

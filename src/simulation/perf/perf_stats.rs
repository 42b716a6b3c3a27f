use wasm_bindgen::prelude::*;

/// Timings and counters for the last frame. Frame and snapshot totals
/// accumulate while metrics stay enabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) frame_ms: f64,
    pub(super) physics_ms: f64,
    pub(super) particles_ms: f64,
    pub(super) render_ms: f64,
    pub(super) dt_ms: f64,
    pub(super) active_particles: u32,
    pub(super) recycled_particles: u32,
    pub(super) frames: u32,
    pub(super) snapshots_published: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }

    /// Clear per-frame fields, keep running totals
    pub(crate) fn begin_frame(&mut self) {
        self.frame_ms = 0.0;
        self.physics_ms = 0.0;
        self.particles_ms = 0.0;
        self.render_ms = 0.0;
        self.dt_ms = 0.0;
        self.recycled_particles = 0;
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn frame_ms(&self) -> f64 { self.frame_ms }
    #[wasm_bindgen(getter)]
    pub fn physics_ms(&self) -> f64 { self.physics_ms }
    #[wasm_bindgen(getter)]
    pub fn particles_ms(&self) -> f64 { self.particles_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn dt_ms(&self) -> f64 { self.dt_ms }
    #[wasm_bindgen(getter)]
    pub fn active_particles(&self) -> u32 { self.active_particles }
    #[wasm_bindgen(getter)]
    pub fn recycled_particles(&self) -> u32 { self.recycled_particles }
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> u32 { self.frames }
    #[wasm_bindgen(getter)]
    pub fn snapshots_published(&self) -> u32 { self.snapshots_published }
}

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::domain::{Layout, SimulationConfig, SimulationState};
use crate::render::SpeckleTexture;
use crate::systems::ParticlePool;

use super::perf_stats::PerfStats;
use super::{SetupError, SimulationCore};

/// Seed for unseeded runs, taken from the wall clock
fn clock_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().to_bits()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED)
    }
}

pub(super) fn create_core(
    config: SimulationConfig,
    layout: Layout,
) -> Result<SimulationCore, SetupError> {
    config.validate()?;
    layout.validate()?;

    let mut rng = SmallRng::seed_from_u64(config.rng_seed.unwrap_or_else(clock_seed));
    let room = config.room_temperature;
    let pool_size = config.particle_count;

    let speckle = SpeckleTexture::generate(&layout, &mut rng);
    let pool = ParticlePool::new(pool_size, &layout, room, &mut rng);

    Ok(SimulationCore {
        state: SimulationState::at_rest(room),
        config,
        layout,
        pool,
        rng,
        speckle,
        fan_rotation: 0.0,
        last_frame_ms: None,
        last_publish_ms: None,
        frame: 0,
        pool_size,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}

pub(super) fn mount(core: &mut SimulationCore, viewport_width: f64) {
    core.pool_size = core.config.pool_size_for_viewport(viewport_width);
    core.pool = ParticlePool::new(
        core.pool_size,
        &core.layout,
        core.config.room_temperature,
        &mut core.rng,
    );
    core.state = SimulationState::at_rest(core.config.room_temperature);
    core.fan_rotation = 0.0;
    core.last_frame_ms = None;
    core.last_publish_ms = None;
    tracing::debug!(viewport_width, particles = core.pool_size, "mounted");
}

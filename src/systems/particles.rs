//! Airflow particles
//!
//! Fixed-size pool, allocated once. Particles are reset in place when they
//! expire or leave the outlet, never pushed or popped.

use rand::Rng;

use crate::domain::{Layout, OperationalState, SimulationState};
use crate::systems::geometry::pipe_position;

/// Fraction of the core excess a particle picks up by the coil exit
pub const CORE_PICKUP: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub progress: f64,
    pub speed: f64,
    pub x: f64,
    pub y: f64,
    pub life: u32,
    pub max_life: f64,
    pub temperature: f64,
    pub size: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Particle {
    #[inline]
    pub fn is_expired(&self) -> bool {
        f64::from(self.life) > self.max_life
    }

    /// Put the particle on the route at its current progress
    #[inline]
    pub fn place(&mut self, layout: &Layout) {
        let pos = pipe_position(self.progress, layout);
        self.x = pos.x + self.x_offset;
        self.y = pos.y + self.y_offset;
    }

    /// Share of lifetime still ahead, in [0, 1]
    #[inline]
    pub fn remaining_life(&self) -> f64 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (1.0 - f64::from(self.life) / self.max_life).clamp(0.0, 1.0)
    }
}

/// Progress where a fresh particle spawns, just upstream of the inlet pipe
#[inline]
pub fn spawn_progress(layout: &Layout) -> f64 {
    -(layout.pipe_length + 50.0) / layout.particle_path_scale()
}

/// Progress span used to scatter a primed pool along the whole route
#[inline]
pub fn spawn_span(layout: &Layout) -> f64 {
    (layout.pipe_length * 2.0 + layout.battery_width) / layout.particle_path_scale()
}

/// Past this progress a particle has left the outlet and is recycled
#[inline]
pub fn exit_progress(layout: &Layout) -> f64 {
    1.0 + (layout.pipe_length + 80.0) / layout.particle_path_scale()
}

pub fn create_particle<R: Rng>(
    randomize_start: bool,
    layout: &Layout,
    room_temperature: f64,
    rng: &mut R,
) -> Particle {
    let scale = layout.particle_path_scale();
    let speed = (4.0 + rng.random::<f64>() * 2.5) / scale;

    let mut progress = spawn_progress(layout);
    if randomize_start {
        progress += rng.random::<f64>() * spawn_span(layout);
    }

    let mut particle = Particle {
        progress,
        speed,
        x: 0.0,
        y: 0.0,
        life: 0,
        max_life: 200.0 + rng.random::<f64>() * 100.0,
        temperature: room_temperature,
        size: 4.0 + rng.random::<f64>() * 4.0,
        x_offset: (rng.random::<f64>() - 0.5) * 8.0,
        y_offset: (rng.random::<f64>() - 0.5) * 16.0,
    };
    particle.place(layout);
    particle
}

/// Air temperature at a point on the route, given current core/outlet temperatures
#[inline]
pub fn zone_temperature(progress: f64, state: &SimulationState, room_temperature: f64) -> f64 {
    if progress <= 0.0 {
        room_temperature
    } else if progress <= 1.0 {
        room_temperature + (state.current_temperature - room_temperature) * progress * CORE_PICKUP
    } else {
        state.output_temperature
    }
}

pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// Allocate `capacity` particles scattered along the route
    pub fn new<R: Rng>(
        capacity: usize,
        layout: &Layout,
        room_temperature: f64,
        rng: &mut R,
    ) -> Self {
        let mut particles = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            particles.push(create_particle(true, layout, room_temperature, rng));
        }
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Re-prime every particle in place (start of a discharge, remount)
    pub fn reset_all<R: Rng>(&mut self, layout: &Layout, room_temperature: f64, rng: &mut R) {
        for p in self.particles.iter_mut() {
            *p = create_particle(true, layout, room_temperature, rng);
        }
        tracing::trace!(count = self.particles.len(), "particle pool primed");
    }

    /// One tick of airflow. Only moves air while the fan is pulling.
    ///
    /// Returns how many particles were recycled.
    pub fn update<R: Rng>(
        &mut self,
        state: &SimulationState,
        layout: &Layout,
        room_temperature: f64,
        rng: &mut R,
    ) -> u32 {
        if state.operational_state != OperationalState::Discharging {
            return 0;
        }

        let exit = exit_progress(layout);
        let mut recycled = 0;

        for p in self.particles.iter_mut() {
            p.progress += p.speed;
            p.place(layout);
            p.life += 1;

            if p.is_expired() || p.progress > exit {
                *p = create_particle(false, layout, room_temperature, rng);
                recycled += 1;
            }

            p.temperature = zone_temperature(p.progress, state, room_temperature);
        }

        recycled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn discharging(core: f64, output: f64) -> SimulationState {
        SimulationState {
            operational_state: OperationalState::Discharging,
            current_temperature: core,
            target_temperature: 25.0,
            output_temperature: output,
            is_heating: false,
            is_fan_running: true,
        }
    }

    #[test]
    fn fresh_particle_starts_upstream() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let p = create_particle(false, &layout, 25.0, &mut rng);
        assert_eq!(p.progress, -200.0 / 224.0);
        assert_eq!(p.life, 0);
        assert!(p.max_life >= 200.0 && p.max_life < 300.0);
        assert!(p.size >= 4.0 && p.size < 8.0);
        assert!(p.x_offset.abs() <= 4.0 && p.y_offset.abs() <= 8.0);
        assert!(p.speed >= 4.0 / 224.0 && p.speed < 6.5 / 224.0);
    }

    #[test]
    fn primed_particles_scatter_across_route() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(2);
        let pool = ParticlePool::new(200, &layout, 25.0, &mut rng);
        let start = spawn_progress(&layout);
        let end = start + spawn_span(&layout);
        assert!(pool.particles().iter().all(|p| p.progress >= start && p.progress < end));
        assert!(pool.particles().iter().any(|p| p.progress > 0.0));
    }

    #[test]
    fn idle_pool_does_not_move() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(10, &layout, 25.0, &mut rng);
        let before: Vec<_> = pool.particles().to_vec();
        let mut idle = discharging(300.0, 100.0);
        idle.operational_state = OperationalState::Stopped;
        pool.update(&idle, &layout, 25.0, &mut rng);
        assert_eq!(pool.particles(), &before[..]);
    }

    #[test]
    fn zone_temperatures() {
        let state = discharging(525.0, 180.0);
        assert_eq!(zone_temperature(-0.3, &state, 25.0), 25.0);
        assert_eq!(zone_temperature(0.5, &state, 25.0), 25.0 + 500.0 * 0.5 * 0.8);
        assert_eq!(zone_temperature(1.0, &state, 25.0), 25.0 + 500.0 * 0.8);
        assert_eq!(zone_temperature(1.2, &state, 25.0), 180.0);
    }

    #[test]
    fn expired_particle_recycles_in_place() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(4);
        let mut pool = ParticlePool::new(5, &layout, 25.0, &mut rng);
        {
            let p = &mut pool.particles_mut()[0];
            p.progress = 0.0;
            p.life = 1_000;
        }
        let recycled = pool.update(&discharging(400.0, 150.0), &layout, 25.0, &mut rng);
        assert!(recycled >= 1);
        assert_eq!(pool.len(), 5);
        let p = pool.particles()[0];
        assert_eq!(p.life, 0);
        assert_eq!(p.progress, spawn_progress(&layout));
        assert_eq!(p.temperature, 25.0);

        // drawn this same tick, so it must already sit on the inlet run
        let on_path = pipe_position(p.progress, &layout);
        assert_eq!(p.x, on_path.x + p.x_offset);
        assert_eq!(p.y, on_path.y + p.y_offset);
    }

    #[test]
    fn new_particles_are_placed_on_the_route() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(8);
        let pool = ParticlePool::new(50, &layout, 25.0, &mut rng);
        for p in pool.particles() {
            let on_path = pipe_position(p.progress, &layout);
            assert_eq!((p.x, p.y), (on_path.x + p.x_offset, on_path.y + p.y_offset));
        }
    }

    #[test]
    fn particles_past_outlet_recycle() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(5);
        let mut pool = ParticlePool::new(1, &layout, 25.0, &mut rng);
        pool.particles_mut()[0].progress = exit_progress(&layout);
        pool.update(&discharging(400.0, 150.0), &layout, 25.0, &mut rng);
        assert_eq!(pool.particles()[0].progress, spawn_progress(&layout));
    }

    #[test]
    fn moving_particle_tracks_the_path() {
        let layout = Layout::default();
        let mut rng = SmallRng::seed_from_u64(6);
        let mut pool = ParticlePool::new(1, &layout, 25.0, &mut rng);
        {
            let p = &mut pool.particles_mut()[0];
            p.progress = 0.4;
            p.life = 0;
        }
        pool.update(&discharging(400.0, 150.0), &layout, 25.0, &mut rng);
        let p = pool.particles()[0];
        let on_path = pipe_position(p.progress, &layout);
        assert_eq!(p.x, on_path.x + p.x_offset);
        assert_eq!(p.y, on_path.y + p.y_offset);
        assert_eq!(p.life, 1);
        assert!(p.temperature > 25.0 && p.temperature < 400.0);
    }
}

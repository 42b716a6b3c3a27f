//! Systems - the per-tick simulation pieces
//!
//! - geometry:  pipe path shared by drawing and airflow
//! - particles: airflow particle pool
//! - thermal:   operational state machine and temperature integration

pub mod geometry;
pub mod particles;
pub mod thermal;

pub use geometry::{pipe_position, Point};
pub use particles::{create_particle, Particle, ParticlePool};

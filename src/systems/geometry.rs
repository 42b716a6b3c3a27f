//! Pipe path - the single route shared by the drawn internal pipe and every
//! airflow particle.
//!
//! progress <= 0 : straight inlet run, extrapolated left of the core
//! 0 < p < 1     : horizontal spiral through the sand, damped at both ends
//! progress >= 1 : straight outlet run, extrapolated right of the core

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::domain::Layout;

pub const COIL_LOOPS: f64 = 5.0;
pub const COIL_RADIUS_X: f64 = 25.0;
pub const COIL_RADIUS_Y: f64 = 160.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Spiral amplitude envelope: 0 at both ends, 1 across the middle half
#[inline]
pub fn coil_damping(progress: f64) -> f64 {
    let start = ((progress * 4.0).min(1.0) * FRAC_PI_2).sin();
    let end = (((1.0 - progress) * 4.0).min(1.0) * FRAC_PI_2).sin();
    start.min(end)
}

pub fn pipe_position(progress: f64, layout: &Layout) -> Point {
    let core_start_x = layout.core_start_x();
    let core_end_x = layout.core_end_x();
    let core_width = core_end_x - core_start_x;
    let cy = layout.center_y;

    if progress <= 0.0 {
        return Point::new(core_start_x + progress * core_width, cy);
    }
    if progress >= 1.0 {
        return Point::new(core_end_x + (progress - 1.0) * core_width, cy);
    }

    let angle = progress * TAU * COIL_LOOPS;
    let dampen = coil_damping(progress);

    Point::new(
        core_start_x + progress * core_width + angle.sin() * COIL_RADIUS_X * dampen,
        cy + angle.cos() * COIL_RADIUS_Y * dampen,
    )
}

//! Domain types - state record, tuning, layout, color mapping

pub mod color;
pub mod config;
pub mod layout;
pub mod state;

pub use color::{particle_temperature_to_color, temperature_to_color, Rgb, Rgba};
pub use config::{ConfigError, SimulationConfig};
pub use layout::{Layout, LayoutError, Rect};
pub use state::{OperationalState, SimulationState, StateSnapshot};

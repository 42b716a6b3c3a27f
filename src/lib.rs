//! Sand Battery Engine - thermal storage exhibit on a 2D canvas, in WASM
//!
//! Architecture:
//! - domain/     - state record, tuning, layout, color mapping
//! - systems/    - thermal model, pipe geometry, airflow particles
//! - render/     - layered scene behind a drawing surface trait
//! - simulation/ - frame-driven core and the browser facade

pub mod domain;
pub mod render;
pub mod simulation;
pub mod systems;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"🔋 Sand battery engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Sand core color for a temperature, as a CSS string (for host-side legends)
#[wasm_bindgen]
pub fn sand_color_css(temperature: f64) -> String {
    domain::temperature_to_color(temperature).css()
}

// Re-export main types
pub use domain::{Layout, OperationalState, SimulationConfig, SimulationState, StateSnapshot};
pub use render::{DisplayList, Surface};
pub use simulation::{PerfStats, SandBattery, SetupError, SimulationCore};

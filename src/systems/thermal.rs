//! Thermal model - operational state machine and per-tick integration
//!
//! Transitions only happen on explicit commands, except the two
//! self-clearing ones: Charging -> Stopped once the core reaches its target,
//! Cooling -> Stopped once it settles at room temperature.

use crate::domain::{OperationalState, SimulationConfig, SimulationState};

/// Clamp a core temperature into [room, max]
#[inline]
fn clamp_core(temp: f64, config: &SimulationConfig) -> f64 {
    temp.clamp(config.room_temperature, config.max_temperature)
}

/// Linear fall of outlet air toward room temperature (fan off)
#[inline]
fn relax_output(state: &mut SimulationState, config: &SimulationConfig, dt: f64) {
    state.output_temperature =
        (state.output_temperature - config.output_relax_rate * dt).max(config.room_temperature);
}

/// Outlet air target while discharging: lags the core and is capped
#[inline]
pub fn discharge_output_target(current: f64, config: &SimulationConfig) -> f64 {
    let room = config.room_temperature;
    config.output_cap.min(room + (current - room) * config.output_gain)
}

/// Begin heating toward max. Returns false when already charging.
pub fn start_charging(state: &mut SimulationState, config: &SimulationConfig) -> bool {
    if state.operational_state == OperationalState::Charging {
        return false;
    }
    state.operational_state = OperationalState::Charging;
    state.target_temperature = config.max_temperature;
    state.is_heating = true;
    state.is_fan_running = false;
    tracing::debug!(from = state.current_temperature, "charging");
    true
}

/// Switch the fan on. Returns false when already discharging; the caller
/// primes the particle pool on true.
pub fn start_discharging(state: &mut SimulationState) -> bool {
    if state.operational_state == OperationalState::Discharging {
        return false;
    }
    state.operational_state = OperationalState::Discharging;
    state.is_heating = false;
    state.is_fan_running = true;
    tracing::debug!(core = state.current_temperature, "discharging");
    true
}

/// Heater and fan off, let the core cool back to room temperature
pub fn stop(state: &mut SimulationState, config: &SimulationConfig) {
    state.operational_state = OperationalState::Cooling;
    state.target_temperature = config.room_temperature;
    state.is_heating = false;
    state.is_fan_running = false;
    tracing::debug!(core = state.current_temperature, "cooling");
}

/// Advance the model by `dt` seconds
pub fn integrate(state: &mut SimulationState, config: &SimulationConfig, dt: f64) {
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
    let room = config.room_temperature;

    match state.operational_state {
        OperationalState::Charging => {
            let remaining = state.target_temperature - state.current_temperature;
            let rate = config.heating_rate * (0.2 + remaining / config.max_temperature);
            let next = (state.current_temperature + rate * dt).min(state.target_temperature);
            state.current_temperature = clamp_core(next, config);

            if state.current_temperature >= state.target_temperature - config.settle_band {
                state.operational_state = OperationalState::Stopped;
                state.is_heating = false;
                tracing::debug!(core = state.current_temperature, "charged");
            }
            relax_output(state, config, dt);
        }

        OperationalState::Discharging => {
            let next = state.current_temperature - config.discharge_extraction_rate * dt;
            state.current_temperature = clamp_core(next, config);

            // per-tick follow, frame-rate dependent
            let target = discharge_output_target(state.current_temperature, config);
            state.output_temperature += (target - state.output_temperature) * config.output_follow;
            state.output_temperature = state.output_temperature.max(room);
        }

        OperationalState::Cooling => {
            let factor = (-dt * config.cooling_decay).exp();
            let excess = state.current_temperature - state.target_temperature;
            state.current_temperature =
                clamp_core(state.target_temperature + excess * factor, config);

            if state.current_temperature <= state.target_temperature + config.settle_band {
                state.current_temperature = clamp_core(state.target_temperature, config);
                state.operational_state = OperationalState::Stopped;
                tracing::debug!("cooled");
            }
            relax_output(state, config, dt);
        }

        OperationalState::Stopped => {
            if state.current_temperature > room {
                let loss = (state.current_temperature - room) * config.passive_loss * dt;
                state.current_temperature = clamp_core(state.current_temperature - loss, config);
            }
            relax_output(state, config, dt);
        }
    }
}

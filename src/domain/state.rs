use serde::{Deserialize, Serialize};

/// Operational mode of the battery. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationalState {
    Charging,
    Discharging,
    Stopped,
    Cooling,
}

impl OperationalState {
    /// Stable upper-case name used on the JS side
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationalState::Charging => "CHARGING",
            OperationalState::Discharging => "DISCHARGING",
            OperationalState::Stopped => "STOPPED",
            OperationalState::Cooling => "COOLING",
        }
    }

    /// Label shown on the HUD badge
    pub fn badge_label(&self) -> &'static str {
        match self {
            OperationalState::Charging => "HEATING",
            OperationalState::Discharging => "DISCHARGING",
            OperationalState::Cooling => "COOLING",
            OperationalState::Stopped => "STANDBY",
        }
    }
}

/// The single mutable simulation record.
///
/// `is_heating` mirrors Charging and `is_fan_running` mirrors Discharging;
/// both only drive rendering.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub operational_state: OperationalState,
    pub current_temperature: f64,
    pub target_temperature: f64,
    pub output_temperature: f64,
    pub is_heating: bool,
    pub is_fan_running: bool,
}

impl SimulationState {
    /// Idle battery at room temperature
    pub fn at_rest(room_temperature: f64) -> Self {
        Self {
            operational_state: OperationalState::Stopped,
            current_temperature: room_temperature,
            target_temperature: room_temperature,
            output_temperature: room_temperature,
            is_heating: false,
            is_fan_running: false,
        }
    }
}

/// Read-only copy handed to the host UI
pub type StateSnapshot = SimulationState;

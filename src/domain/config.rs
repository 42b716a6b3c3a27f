//! Simulation tuning.
//!
//! Defaults reproduce the exhibit as shipped; a host page may override any
//! subset of fields with a JSON object (missing fields keep their default).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config field `{0}` must be finite")]
    NotFinite(&'static str),

    #[error("config field `{0}` must be positive")]
    NotPositive(&'static str),

    #[error("config field `{0}` must not be negative")]
    Negative(&'static str),

    #[error("config field `{0}` must be in (0, 1]")]
    NotAFraction(&'static str),

    #[error("room temperature ({room}) must be below max temperature ({max})")]
    InvertedRange { room: f64, max: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// °C, floor for every temperature in the model
    pub room_temperature: f64,
    /// °C, ceiling for the core
    pub max_temperature: f64,
    /// °C/s base charging rate, scaled by remaining distance to target
    pub heating_rate: f64,
    /// °C/s linear core loss while air is being pulled through
    pub discharge_extraction_rate: f64,
    /// °C/s linear fall of outlet air when the fan is off
    pub output_relax_rate: f64,
    /// °C cap on outlet air while discharging
    pub output_cap: f64,
    /// share of core excess (over room) that reaches the outlet
    pub output_gain: f64,
    /// per-tick fraction the outlet closes toward its target
    pub output_follow: f64,
    /// 1/s exponential decay while cooling
    pub cooling_decay: f64,
    /// 1/s passive loss while stopped
    pub passive_loss: f64,
    /// °C band for the self-clearing transitions
    pub settle_band: f64,
    pub particle_count: usize,
    pub mobile_particle_count: usize,
    /// viewports narrower than this use the mobile pool
    pub mobile_breakpoint_px: f64,
    pub ui_publish_interval_ms: f64,
    /// advisory minimum core temperature for discharging
    pub discharge_threshold: f64,
    /// fixed seed for reproducible particle jitter
    pub rng_seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            room_temperature: 25.0,
            max_temperature: 600.0,
            heating_rate: 80.0,
            discharge_extraction_rate: 3.0,
            output_relax_rate: 5.0,
            output_cap: 200.0,
            output_gain: 0.7,
            output_follow: 0.1,
            cooling_decay: 0.1,
            passive_loss: 0.005,
            settle_band: 1.0,
            particle_count: 150,
            mobile_particle_count: 60,
            mobile_breakpoint_px: 768.0,
            ui_publish_interval_ms: 66.0,
            discharge_threshold: 100.0,
            rng_seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("room_temperature", self.room_temperature),
            ("max_temperature", self.max_temperature),
            ("heating_rate", self.heating_rate),
            ("discharge_extraction_rate", self.discharge_extraction_rate),
            ("output_relax_rate", self.output_relax_rate),
            ("output_cap", self.output_cap),
            ("output_gain", self.output_gain),
            ("output_follow", self.output_follow),
            ("cooling_decay", self.cooling_decay),
            ("passive_loss", self.passive_loss),
            ("settle_band", self.settle_band),
            ("mobile_breakpoint_px", self.mobile_breakpoint_px),
            ("ui_publish_interval_ms", self.ui_publish_interval_ms),
            ("discharge_threshold", self.discharge_threshold),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
        }

        if self.room_temperature >= self.max_temperature {
            return Err(ConfigError::InvertedRange {
                room: self.room_temperature,
                max: self.max_temperature,
            });
        }

        let positive = [
            ("heating_rate", self.heating_rate),
            ("cooling_decay", self.cooling_decay),
            ("settle_band", self.settle_band),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive(name));
            }
        }

        let non_negative = [
            ("discharge_extraction_rate", self.discharge_extraction_rate),
            ("output_relax_rate", self.output_relax_rate),
            ("passive_loss", self.passive_loss),
            ("output_gain", self.output_gain),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative(name));
            }
        }

        // per-tick blend factor, diverges above 1
        if self.output_follow <= 0.0 || self.output_follow > 1.0 {
            return Err(ConfigError::NotAFraction("output_follow"));
        }

        if self.particle_count == 0 {
            return Err(ConfigError::NotPositive("particle_count"));
        }
        if self.mobile_particle_count == 0 {
            return Err(ConfigError::NotPositive("mobile_particle_count"));
        }
        Ok(())
    }

    /// Pool size for a viewport width
    pub fn pool_size_for_viewport(&self, viewport_width: f64) -> usize {
        if viewport_width < self.mobile_breakpoint_px {
            self.mobile_particle_count
        } else {
            self.particle_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{ "particle_count": 90, "rng_seed": 7 }"#;
        let config = SimulationConfig::from_json(json).unwrap();
        assert_eq!(config.particle_count, 90);
        assert_eq!(config.rng_seed, Some(7));
        assert_eq!(config.max_temperature, 600.0);
        assert_eq!(config.mobile_particle_count, 60);
    }

    #[test]
    fn rejects_inverted_range() {
        let err = SimulationConfig::from_json(r#"{ "room_temperature": 700 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
    }

    #[test]
    fn rejects_empty_pool() {
        let err = SimulationConfig::from_json(r#"{ "mobile_particle_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive("mobile_particle_count")));
    }

    #[test]
    fn rejects_runaway_output_follow() {
        for json in [r#"{ "output_follow": 3 }"#, r#"{ "output_follow": 0 }"#] {
            let err = SimulationConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::NotAFraction("output_follow")), "{json}");
        }
        assert!(SimulationConfig::from_json(r#"{ "output_follow": 1 }"#).is_ok());
    }

    #[test]
    fn rejects_negative_rates() {
        let err = SimulationConfig::from_json(r#"{ "passive_loss": -0.1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative("passive_loss")));

        let err = SimulationConfig::from_json(r#"{ "output_relax_rate": -5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative("output_relax_rate")));

        let json = r#"{ "discharge_extraction_rate": -3 }"#;
        let err = SimulationConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Negative("discharge_extraction_rate")));

        // zero means the effect is switched off
        assert!(SimulationConfig::from_json(r#"{ "passive_loss": 0 }"#).is_ok());
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(
            SimulationConfig::from_json("{ nope").unwrap_err(),
            ConfigError::Json(_)
        ));
    }

    #[test]
    fn viewport_picks_pool() {
        let config = SimulationConfig::default();
        assert_eq!(config.pool_size_for_viewport(375.0), 60);
        assert_eq!(config.pool_size_for_viewport(768.0), 150);
    }
}

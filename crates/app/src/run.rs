use std::fs;
use std::path::Path;

use electrical::{ModelParameters, TickInputs};
use serde::{Deserialize, Serialize};
use simcore::ConfigError;

/// Step-response run loaded from JSON. Missing fields take the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub params: ModelParameters,
    /// Tick period (s)
    pub period: f64,
    /// Simulated time (s)
    pub duration: f64,
    /// Time at which the voltages switch on (s)
    pub step_time: f64,
    pub mechanical_velocity: f64,
    pub d_axis_voltage: f64,
    pub q_axis_voltage: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            params: ModelParameters::default(),
            period: 1e-4,
            duration: 0.05,
            step_time: 0.005,
            mechanical_velocity: 0.0,
            d_axis_voltage: 0.0,
            q_axis_voltage: 1.0,
        }
    }
}

impl RunConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&text)?;
        if !(config.period > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "period".to_string(),
                message: format!("{} (must be > 0)", config.period),
            });
        }
        Ok(config)
    }

    pub fn input_at(&self, t: f64) -> TickInputs {
        if t < self.step_time {
            TickInputs::new(self.mechanical_velocity, 0.0, 0.0)
        } else {
            TickInputs::new(self.mechanical_velocity, self.d_axis_voltage, self.q_axis_voltage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_switches_on() {
        let config = RunConfig::default();
        assert_eq!(config.input_at(0.0).q_axis_voltage, 0.0);
        assert_eq!(config.input_at(0.005).q_axis_voltage, 1.0);
    }

    #[test]
    fn test_nested_params_from_json() {
        let config: RunConfig =
            serde_json::from_str(r#"{ "period": 5e-5, "params": { "pole_pairs": 7.0 } }"#).unwrap();
        assert_eq!(config.period, 5e-5);
        assert_eq!(config.params.pole_pairs, 7.0);
        assert_eq!(config.params.stator_resistance, 1.0);
        assert_eq!(config.duration, 0.05);
    }
}

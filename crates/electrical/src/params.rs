//! Model parameters and the clamped snapshot used by each tick.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use simcore::ConfigError;

/// Floor for the permanent-magnet flux linkage (Wb).
pub const MIN_FLUX_LINKAGE: f64 = 0.01;
/// Floor for the phase resistance (Ohm).
pub const MIN_RESISTANCE: f64 = 0.01;
/// Floor for the d- and q-axis inductances (H).
pub const MIN_INDUCTANCE: f64 = 0.0001;
/// Floor for the pole-pair count.
pub const MIN_POLE_PAIRS: f64 = 1.0;

/// Externally configured motor constants.
///
/// Values are accepted as given; nothing here is clamped until a tick takes
/// its [`EffectiveParameters`] snapshot via [`ModelParameters::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Permanent-magnet flux linkage psi_m
    pub flux_linkage: f64,
    /// Phase resistance r
    pub stator_resistance: f64,
    /// d-axis inductance ld
    pub d_axis_inductance: f64,
    /// q-axis inductance lq
    pub q_axis_inductance: f64,
    /// Pole-pair count; truncated to an integer at tick time
    pub pole_pairs: f64,
    /// Saturation voltage of the drop compensation
    pub drop_voltage: f64,
    /// Current at which the drop compensation saturates
    pub drop_slope: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters {
            flux_linkage: 0.01,
            stator_resistance: 1.0,
            d_axis_inductance: 0.001,
            q_axis_inductance: 0.001,
            pole_pairs: 1.0,
            drop_voltage: 0.7,
            drop_slope: 0.04,
        }
    }
}

impl ModelParameters {
    pub fn with_flux_linkage(mut self, flux_linkage: f64) -> Self {
        self.flux_linkage = flux_linkage;
        self
    }

    pub fn with_resistance(mut self, resistance: f64) -> Self {
        self.stator_resistance = resistance;
        self
    }

    /// Set both inductances
    pub fn with_inductances(mut self, ld: f64, lq: f64) -> Self {
        self.d_axis_inductance = ld;
        self.q_axis_inductance = lq;
        self
    }

    pub fn with_pole_pairs(mut self, pole_pairs: f64) -> Self {
        self.pole_pairs = pole_pairs;
        self
    }

    /// Set the drop compensation voltage and slope. A zero voltage disables it.
    pub fn with_drop(mut self, voltage: f64, slope: f64) -> Self {
        self.drop_voltage = voltage;
        self.drop_slope = slope;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject non-finite values.
    ///
    /// Finite but out-of-range values pass: they are clamped per tick instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("flux_linkage", self.flux_linkage),
            ("stator_resistance", self.stator_resistance),
            ("d_axis_inductance", self.d_axis_inductance),
            ("q_axis_inductance", self.q_axis_inductance),
            ("pole_pairs", self.pole_pairs),
            ("drop_voltage", self.drop_voltage),
            ("drop_slope", self.drop_slope),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("{value} is not a finite number"),
                });
            }
        }
        Ok(())
    }

    /// True when no physical parameter needs clamping.
    pub fn is_in_range(&self) -> bool {
        self.flux_linkage >= MIN_FLUX_LINKAGE
            && self.stator_resistance >= MIN_RESISTANCE
            && self.d_axis_inductance >= MIN_INDUCTANCE
            && self.q_axis_inductance >= MIN_INDUCTANCE
            && self.pole_pairs >= MIN_POLE_PAIRS
            && self.pole_pairs.fract() == 0.0
    }

    /// Snapshot with every floor applied. NaN inputs fall back to the floor.
    pub fn clamped(&self) -> EffectiveParameters {
        EffectiveParameters {
            pole_pairs: self.pole_pairs.trunc().max(MIN_POLE_PAIRS),
            flux_linkage: self.flux_linkage.max(MIN_FLUX_LINKAGE),
            resistance: self.stator_resistance.max(MIN_RESISTANCE),
            inductance_d: self.d_axis_inductance.max(MIN_INDUCTANCE),
            inductance_q: self.q_axis_inductance.max(MIN_INDUCTANCE),
            drop_voltage: self.drop_voltage,
            drop_slope: self.drop_slope,
        }
    }
}

/// Parameters as used inside one tick.
///
/// All denominators are strictly positive and `pole_pairs` is an integer >= 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveParameters {
    pub pole_pairs: f64,
    pub flux_linkage: f64,
    pub resistance: f64,
    pub inductance_d: f64,
    pub inductance_q: f64,
    pub drop_voltage: f64,
    pub drop_slope: f64,
}

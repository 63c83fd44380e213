//! d-q axis electrical model of a permanent-magnet synchronous motor.
//!
//! Each tick clamps the parameter snapshot, derives the flux linkages and
//! cross-coupling terms from the current estimates, subtracts the saturated
//! drop compensation from the applied voltages and integrates
//!
//! ```text
//! did/dt = (ud - r*id + induced_d) / ld
//! diq/dt = (uq - r*iq - induced_q) / lq
//! ```
//!
//! with the coupling and voltage terms held fixed over the tick.

use log::{debug, log_enabled, trace, Level};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use simcore::{Component, Integrator, SimContext, SubsteppedEuler};

use crate::params::ModelParameters;
use crate::saturation::guarded_drop;

/// Current estimates carried from one tick to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricalState {
    pub id_estimate: f64,
    pub iq_estimate: f64,
}

/// Per-tick host inputs. The tick period travels in [`SimContext::dt`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInputs {
    /// Rotor mechanical speed (rad/s)
    pub mechanical_velocity: f64,
    pub d_axis_voltage: f64,
    pub q_axis_voltage: f64,
}

impl TickInputs {
    pub fn new(mechanical_velocity: f64, d_axis_voltage: f64, q_axis_voltage: f64) -> Self {
        TickInputs {
            mechanical_velocity,
            d_axis_voltage,
            q_axis_voltage,
        }
    }
}

/// Values produced by one tick. Flux, induced and drop terms describe the
/// state at the start of the tick; currents and torque the state at its end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutputs {
    pub id_estimate: f64,
    pub iq_estimate: f64,
    pub induced_d_term: f64,
    pub induced_q_term: f64,
    pub d_axis_flux: f64,
    pub q_axis_flux: f64,
    pub torque: f64,
    pub d_axis_drop: f64,
    pub q_axis_drop: f64,
}

impl TickOutputs {
    /// False once the integration has blown up to NaN or infinity.
    pub fn is_finite(&self) -> bool {
        [
            self.id_estimate,
            self.iq_estimate,
            self.induced_d_term,
            self.induced_q_term,
            self.d_axis_flux,
            self.q_axis_flux,
            self.torque,
            self.d_axis_drop,
            self.q_axis_drop,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// PMSM electrical model component.
#[derive(Debug, Clone)]
pub struct Pmsm<I: Integrator = SubsteppedEuler> {
    state: ElectricalState,
    integrator: I,
}

impl Pmsm {
    /// Model with the default four-sub-step Euler integrator.
    pub fn new() -> Self {
        Self::with_integrator(SubsteppedEuler::default())
    }
}

impl Default for Pmsm {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Integrator> Pmsm<I> {
    pub fn with_integrator(integrator: I) -> Self {
        Pmsm {
            state: ElectricalState::default(),
            integrator,
        }
    }

    pub fn state(&self) -> ElectricalState {
        self.state
    }

    pub fn integrator(&self) -> &I {
        &self.integrator
    }
}

impl<I: Integrator> Component for Pmsm<I> {
    type Params = ModelParameters;
    type Input = TickInputs;
    type Output = TickOutputs;

    fn initialize(&mut self) -> ModelParameters {
        self.state = ElectricalState::default();
        let params = ModelParameters::default();
        debug!("pmsm initialized with {params:?}");
        params
    }

    fn step(&mut self, ctx: SimContext, params: &ModelParameters, input: &TickInputs) -> TickOutputs {
        let p = params.clamped();
        if log_enabled!(Level::Trace) && !params.is_in_range() {
            trace!("pmsm parameters clamped: {params:?} -> {p:?}");
        }

        let id = self.state.id_estimate;
        let iq = self.state.iq_estimate;
        let r = p.resistance;
        let ld = p.inductance_d;
        let lq = p.inductance_q;

        let electrical_velocity = input.mechanical_velocity * p.pole_pairs;
        let d_axis_flux = ld * id + p.flux_linkage;
        let q_axis_flux = lq * iq;

        let induced_d_term = electrical_velocity * q_axis_flux;
        let induced_q_term = electrical_velocity * d_axis_flux;

        let q_axis_drop = p.drop_voltage * guarded_drop(iq, p.drop_slope);
        let d_axis_drop = p.drop_voltage * guarded_drop(id, p.drop_slope);

        let ud = input.d_axis_voltage - d_axis_drop;
        let uq = input.q_axis_voltage - q_axis_drop;

        let mut currents = Vector2::new(id, iq);
        self.integrator.integrate(&mut currents, ctx.dt, |i| {
            Vector2::new(
                (ud - r * i[0] + induced_d_term) / ld,
                (uq - r * i[1] - induced_q_term) / lq,
            )
        });
        self.state.id_estimate = currents[0];
        self.state.iq_estimate = currents[1];

        TickOutputs {
            id_estimate: self.state.id_estimate,
            iq_estimate: self.state.iq_estimate,
            induced_d_term,
            induced_q_term,
            d_axis_flux,
            q_axis_flux,
            torque: p.torque(self.state.id_estimate, self.state.iq_estimate),
            d_axis_drop,
            q_axis_drop,
        }
    }
}

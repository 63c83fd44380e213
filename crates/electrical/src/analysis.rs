//! Steady-state and stability characteristics of a parameter snapshot
//!
//! These helpers let a host pick a tick period and sanity-check the
//! integrator's outputs without running it.

use nalgebra::{Matrix2, Vector2};

use crate::params::EffectiveParameters;
use crate::pmsm::TickInputs;

impl EffectiveParameters {
    /// Electromagnetic torque for the given d-q currents (Nm)
    pub fn torque(&self, id: f64, iq: f64) -> f64 {
        1.5 * self.pole_pairs
            * (self.flux_linkage * iq + (self.inductance_d - self.inductance_q) * id * iq)
    }

    /// Torque constant Kt (Nm/A) of a surface-mounted machine
    pub fn torque_constant(&self) -> f64 {
        1.5 * self.pole_pairs * self.flux_linkage
    }

    /// Back-EMF constant Ke (V/(rad/s))
    pub fn back_emf_constant(&self) -> f64 {
        self.pole_pairs * self.flux_linkage
    }

    /// Electrical time constants (ld/r, lq/r) in seconds
    pub fn electrical_time_constants(&self) -> (f64, f64) {
        (
            self.inductance_d / self.resistance,
            self.inductance_q / self.resistance,
        )
    }

    /// Largest tick period for which `substeps` forward Euler slices stay
    /// stable on the resistive decay, ignoring the velocity coupling.
    pub fn max_stable_period(&self, substeps: u32) -> f64 {
        let (tau_d, tau_q) = self.electrical_time_constants();
        substeps.max(1) as f64 * 2.0 * tau_d.min(tau_q)
    }

    /// Fixed point of the current equations with drop compensation disabled.
    ///
    /// Solves
    /// ```text
    /// [ r          -we*lq ] [id]   [ud           ]
    /// [ we*ld       r     ] [iq] = [uq - we*psi_m]
    /// ```
    /// The determinant r^2 + we^2*ld*lq is always positive.
    pub fn steady_state_currents(&self, input: &TickInputs) -> (f64, f64) {
        let we = input.mechanical_velocity * self.pole_pairs;
        let a = Matrix2::new(
            self.resistance,
            -we * self.inductance_q,
            we * self.inductance_d,
            self.resistance,
        );
        let b = Vector2::new(
            input.d_axis_voltage,
            input.q_axis_voltage - we * self.flux_linkage,
        );
        match a.lu().solve(&b) {
            Some(i) => (i[0], i[1]),
            None => (f64::NAN, f64::NAN),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::params::ModelParameters;
    use crate::pmsm::TickInputs;

    #[test]
    fn test_constants() {
        let p = ModelParameters::default()
            .with_flux_linkage(0.02)
            .with_pole_pairs(4.0)
            .clamped();
        assert!((p.torque_constant() - 0.12).abs() < 1e-12);
        assert!((p.back_emf_constant() - 0.08).abs() < 1e-12);
        assert!((p.torque(0.0, 2.0) - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_reluctance_torque() {
        let p = ModelParameters::default()
            .with_inductances(0.002, 0.001)
            .with_pole_pairs(2.0)
            .clamped();
        // 1.5 * 2 * (0.01*3 + 0.001*(-1)*3)
        assert!((p.torque(-1.0, 3.0) - 0.081).abs() < 1e-12);
    }

    #[test]
    fn test_max_stable_period_scales_with_substeps() {
        let p = ModelParameters::default().with_inductances(0.002, 0.001).clamped();
        assert!((p.max_stable_period(1) - 0.002).abs() < 1e-12);
        assert!((p.max_stable_period(4) - 0.008).abs() < 1e-12);
        assert!((p.max_stable_period(0) - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_steady_state_at_standstill_is_ohmic() {
        let p = ModelParameters::default().with_resistance(2.0).clamped();
        let (id, iq) = p.steady_state_currents(&TickInputs::new(0.0, 1.0, 3.0));
        assert!((id - 0.5).abs() < 1e-12);
        assert!((iq - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_steady_state_balances_equations() {
        let p = ModelParameters::default()
            .with_inductances(0.0015, 0.001)
            .with_pole_pairs(3.0)
            .clamped();
        let input = TickInputs::new(200.0, -0.5, 4.0);
        let (id, iq) = p.steady_state_currents(&input);
        let we = 600.0;
        let d = input.d_axis_voltage - p.resistance * id + we * p.inductance_q * iq;
        let q = input.q_axis_voltage - p.resistance * iq - we * (p.inductance_d * id + p.flux_linkage);
        assert!(d.abs() < 1e-9);
        assert!(q.abs() < 1e-9);
    }
}

use nalgebra::SVector;

use crate::ConfigError;

/// Sub-step count that reproduces the classic fourfold electrical update.
pub const DEFAULT_SUBSTEPS: u32 = 4;

/// A generic explicit integration strategy.
pub trait Integrator {
    /// Advances `state` by `dt` using `derivative` evaluated at the current state.
    fn integrate<const N: usize, F>(&self, state: &mut SVector<f64, N>, dt: f64, derivative: F)
    where
        F: Fn(&SVector<f64, N>) -> SVector<f64, N>;
}

/// Single forward Euler step over the whole period.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn integrate<const N: usize, F>(&self, state: &mut SVector<f64, N>, dt: f64, derivative: F)
    where
        F: Fn(&SVector<f64, N>) -> SVector<f64, N>,
    {
        let rate = derivative(&*state);
        *state += rate * dt;
    }
}

/// Repeated forward Euler sub-steps.
///
/// The period is split into `substeps` equal slices and the derivative is
/// re-evaluated at the freshest state before every slice. This keeps the
/// update stable for periods a few times larger than the system time constant,
/// where one full-length Euler step would overshoot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsteppedEuler {
    substeps: u32,
}

impl SubsteppedEuler {
    pub fn new(substeps: u32) -> Result<Self, ConfigError> {
        if substeps == 0 {
            return Err(ConfigError::InvalidSubsteps(substeps));
        }
        Ok(SubsteppedEuler { substeps })
    }

    pub fn substeps(&self) -> u32 {
        self.substeps
    }
}

impl Default for SubsteppedEuler {
    fn default() -> Self {
        SubsteppedEuler {
            substeps: DEFAULT_SUBSTEPS,
        }
    }
}

impl Integrator for SubsteppedEuler {
    fn integrate<const N: usize, F>(&self, state: &mut SVector<f64, N>, dt: f64, derivative: F)
    where
        F: Fn(&SVector<f64, N>) -> SVector<f64, N>,
    {
        let h = dt / self.substeps as f64;
        for _ in 0..self.substeps {
            let rate = derivative(&*state);
            *state += rate * h;
        }
    }
}

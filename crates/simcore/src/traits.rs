use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimContext {
    pub dt: f64,
    pub t: f64,
}

impl SimContext {
    pub fn new(dt: f64, t: f64) -> Self {
        SimContext { dt, t }
    }

    /// Context for the following tick with the same period.
    pub fn advance(self) -> Self {
        SimContext {
            dt: self.dt,
            t: self.t + self.dt,
        }
    }
}

/// A periodically stepped component driven by a host scheduler.
///
/// The host owns parameter snapshots and input/output values; the component
/// owns only its internal state.
pub trait Component {
    type Params;
    type Input;
    type Output;

    /// Zero the owned state and return the default parameter snapshot.
    fn initialize(&mut self) -> Self::Params;

    /// Advance the component by `ctx.dt` seconds.
    fn step(&mut self, ctx: SimContext, params: &Self::Params, input: &Self::Input) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_keeps_period() {
        let ctx = SimContext::new(0.001, 0.0).advance().advance();
        assert!((ctx.dt - 0.001).abs() < 1e-12);
        assert!((ctx.t - 0.002).abs() < 1e-12);
    }
}

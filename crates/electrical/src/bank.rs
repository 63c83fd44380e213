//! Several independent PMSM channels stepped together.

use log::debug;
use simcore::{Component, SimContext};

use crate::params::ModelParameters;
use crate::pmsm::{ElectricalState, Pmsm, TickInputs, TickOutputs};

#[derive(Debug, Clone)]
struct Channel {
    params: ModelParameters,
    model: Pmsm,
}

/// One `Pmsm` per motor channel, each with its own parameter snapshot.
#[derive(Debug, Clone, Default)]
pub struct PmsmBank {
    channels: Vec<Channel>,
}

impl PmsmBank {
    /// Add an initialized channel running `params`; returns its index.
    pub fn add_channel(&mut self, params: ModelParameters) -> usize {
        let mut model = Pmsm::new();
        model.initialize();
        self.channels.push(Channel { params, model });
        let index = self.channels.len() - 1;
        debug!("pmsm bank: added channel {index}");
        index
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn params(&self, channel: usize) -> Option<&ModelParameters> {
        self.channels.get(channel).map(|c| &c.params)
    }

    /// Parameters may be retuned between ticks; the next step picks them up.
    pub fn params_mut(&mut self, channel: usize) -> Option<&mut ModelParameters> {
        self.channels.get_mut(channel).map(|c| &mut c.params)
    }

    pub fn state(&self, channel: usize) -> Option<ElectricalState> {
        self.channels.get(channel).map(|c| c.model.state())
    }

    /// Re-run the initializer on every channel, restoring default parameters.
    pub fn initialize_all(&mut self) {
        for channel in &mut self.channels {
            channel.params = channel.model.initialize();
        }
    }

    /// Step every channel that has both an input and an output slot.
    pub fn step(&mut self, ctx: SimContext, inputs: &[TickInputs], outputs: &mut [TickOutputs]) {
        for ((channel, input), output) in self.channels.iter_mut().zip(inputs).zip(outputs.iter_mut()) {
            *output = channel.model.step(ctx, &channel.params, input);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_are_independent() {
        let mut bank = PmsmBank::default();
        bank.add_channel(ModelParameters::default());
        bank.add_channel(ModelParameters::default().with_resistance(2.0));

        let ctx = SimContext { dt: 1e-4, t: 0.0 };
        let inputs = [TickInputs::new(0.0, 0.0, 1.0), TickInputs::new(0.0, 0.0, 0.0)];
        let mut outputs = [TickOutputs::default(); 2];
        bank.step(ctx, &inputs, &mut outputs);

        assert!(outputs[0].iq_estimate > 0.0);
        assert_eq!(outputs[1].iq_estimate, 0.0);
        assert_eq!(bank.state(1), Some(ElectricalState::default()));
    }

    #[test]
    fn test_short_slices_step_prefix_only() {
        let mut bank = PmsmBank::default();
        for _ in 0..3 {
            bank.add_channel(ModelParameters::default());
        }
        let ctx = SimContext { dt: 1e-4, t: 0.0 };
        let inputs = [TickInputs::new(0.0, 1.0, 1.0); 3];
        let mut outputs = [TickOutputs::default(); 2];
        bank.step(ctx, &inputs, &mut outputs);

        assert!(bank.state(1).unwrap().id_estimate > 0.0);
        assert_eq!(bank.state(2), Some(ElectricalState::default()));
        assert_eq!(bank.state(3), None);
    }

    #[test]
    fn test_retune_and_initialize_all() {
        let mut bank = PmsmBank::default();
        let ch = bank.add_channel(ModelParameters::default());
        if let Some(p) = bank.params_mut(ch) {
            p.pole_pairs = 7.0;
        }
        let ctx = SimContext { dt: 1e-4, t: 0.0 };
        let mut outputs = [TickOutputs::default()];
        bank.step(ctx, &[TickInputs::new(0.0, 0.0, 1.0)], &mut outputs);
        assert_eq!(bank.params(ch).unwrap().pole_pairs, 7.0);

        bank.initialize_all();
        assert_eq!(bank.params(ch), Some(&ModelParameters::default()));
        assert_eq!(bank.state(ch), Some(ElectricalState::default()));
        assert_eq!(bank.len(), 1);
        assert!(!bank.is_empty());
    }
}

//! Discrete-time PMSM electrical model
//!
//! This crate provides:
//! - The drop-compensation saturation function
//! - Model parameters and their clamped per-tick snapshot
//! - The `Pmsm` component advancing the d-q current estimates
//! - A multi-channel bank and steady-state analysis helpers

pub mod analysis;
pub mod bank;
pub mod params;
pub mod pmsm;
pub mod saturation;

pub use bank::PmsmBank;
pub use params::{EffectiveParameters, ModelParameters};
pub use pmsm::{ElectricalState, Pmsm, TickInputs, TickOutputs};

//! Host-side contract shared by simulation components
//!
//! This crate provides:
//! - `SimContext` and the `Component` lifecycle trait
//! - Explicit integrators over fixed-size state vectors
//! - Configuration errors

mod traits;
pub mod error;
pub mod integrators;

pub use error::ConfigError;
pub use integrators::*;
pub use traits::*;

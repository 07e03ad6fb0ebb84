//! Scattering tree, validation and the circuit orchestrator.
//!
//! A [`WdfTree`] stores elements in an arena addressed by [`ElementId`].
//! A [`Circuit`] wraps a validated tree together with the element driven by
//! the input signal, the unadapted root and the element being observed.

mod simulator;
mod tree;
mod types;
mod validate;

pub use simulator::{Circuit, FaultPolicy, SimulatorConfig};
pub use tree::WdfTree;
pub use types::*;
pub use validate::validate_circuit;

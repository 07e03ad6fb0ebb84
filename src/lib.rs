//! # WDF Core
//!
//! A sample-accurate wave digital filter (WDF) engine for simulating
//! analog circuits, including ones with a single nonlinear device.
//!
//! This library provides:
//! - Linear one-ports (R, C, L, short and open terminations) and voltage sources
//! - Series and parallel adaptors that combine subtrees losslessly
//! - Nonlinear root devices (diode, diode pair, Chua's diode) solved per sample
//!   with a warm-started Newton-Raphson iteration
//! - A circuit orchestrator that turns input samples into output samples
//!
//! ## Architecture
//!
//! - [`components`] - Element models and the closed [`Element`] enum
//! - [`circuit`] - The [`WdfTree`] arena, validation and the [`Circuit`] orchestrator
//! - [`solver`] - Scalar Newton-Raphson root finder
//! - [`error`] - The unified [`WdfError`] type
//!
//! ## Usage
//!
//! ```
//! use wdf_core::components::{IdealVoltageSource, PolarityInverter, Resistor, SeriesAdaptor};
//! use wdf_core::{Circuit, WdfTree};
//!
//! # fn main() -> wdf_core::Result<()> {
//! let mut tree = WdfTree::new();
//! let r1 = tree.add(Resistor::new(1000.0)?)?;
//! let r2 = tree.add(Resistor::new(1000.0)?)?;
//! let s1 = tree.add(SeriesAdaptor::new(r1, r2))?;
//! let inv = tree.add(PolarityInverter::new(s1))?;
//! let vs = tree.add(IdealVoltageSource::new(inv))?;
//!
//! let mut circuit = Circuit::new(tree, vs, vs, r2, wdf_core::DEFAULT_SAMPLE_RATE)?;
//! let v = circuit.process_sample(1.0)?;
//! assert!((v - 0.5).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! ## Simulation Method
//!
//! Every element talks to its neighbour through a port carrying an incident
//! wave `a` and a reflected wave `b`, with `v = (a + b) / 2` and
//! `i = (a - b) / (2 Rp)`. Each port resistance `Rp` is chosen so that
//! adapted elements reflect without an instantaneous dependency on their
//! input, which makes the whole tree explicit except at its root. For each
//! sample:
//!
//! 1. Waves are gathered bottom-up into the root
//! 2. The root (ideal source, switch or nonlinear device) reflects one wave
//! 3. That wave is scattered top-down, and reactive elements latch it
//!
//! Capacitors and inductors are discretized with the bilinear transform by
//! default, with an optional blend towards backward Euler.

pub mod circuit;
pub mod components;
pub mod error;
pub mod solver;

// Re-export main types for convenience
pub use circuit::{Circuit, ElementId, FaultPolicy, SimulatorConfig, WdfTree};
pub use components::Element;
pub use error::{Result, WdfError};

/// Sample rate used when none is specified (Hz).
pub const DEFAULT_SAMPLE_RATE: f64 = 48000.0;

/// Thermal voltage at room temperature (V).
pub const THERMAL_VOLTAGE: f64 = 25.85e-3;

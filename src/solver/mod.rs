//! Numerical root finding.
//!
//! Every nonlinear element in a WDF tree reduces its device law and its port
//! relation to one scalar implicit equation per sample. This module provides
//! the Newton-Raphson solver those elements share.
//!
//! The solver is purely functional: it owns no state between calls, so
//! independent elements (or independent circuits on different threads) can
//! use it concurrently.

mod newton;

pub use newton::{newton_raphson, NewtonRaphson, Root};

/// Default convergence tolerance on the Newton step.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum Newton-Raphson iterations per solve.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Derivative magnitude below which a Newton step is rejected.
pub const DERIVATIVE_EPSILON: f64 = 1e-15;

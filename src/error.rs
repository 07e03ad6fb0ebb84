//! Error types for the wave digital filter engine.
//!
//! This module provides a unified error type [`WdfError`] that covers
//! configuration errors raised while building or updating a tree and the
//! numerical faults a nonlinear element can hit while processing a sample.

use thiserror::Error;

use crate::circuit::ElementId;

/// Result type alias using [`WdfError`].
pub type Result<T> = std::result::Result<T, WdfError>;

/// Unified error type for all WDF operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WdfError {
    // ============ Root-Finder Errors ============
    /// The derivative vanished, so the Newton step is meaningless
    #[error("Derivative too close to zero at x = {x:.6e} (f'(x) = {derivative:.2e})")]
    DerivativeDegenerate { x: f64, derivative: f64 },

    /// Newton-Raphson iteration did not converge
    #[error("Newton-Raphson did not converge after {iterations} iterations (last step: {step:.2e})")]
    ConvergenceFailure { iterations: usize, step: f64 },

    // ============ Configuration Errors ============
    /// Non-positive or non-finite component value, or out-of-range blend factor
    #[error("Invalid {param} for {component}: {value} ({message})")]
    InvalidComponentValue {
        component: &'static str,
        param: &'static str,
        value: f64,
        message: &'static str,
    },

    /// Adaptor coefficients cannot be formed from the children's port resistances
    #[error("Degenerate topology: {message}")]
    DegenerateTopology { message: String },

    // ============ Tree Wiring Errors ============
    /// The tree is wired in a way the scattering protocol cannot drive
    #[error("Invalid tree topology: {message}")]
    InvalidTopology { message: String },

    /// An element id does not belong to this tree
    #[error("Element {id} not found in tree")]
    ElementNotFound { id: ElementId },
}

impl WdfError {
    /// Create an invalid component value error
    pub fn invalid_value(
        component: &'static str,
        param: &'static str,
        value: f64,
        message: &'static str,
    ) -> Self {
        Self::InvalidComponentValue {
            component,
            param,
            value,
            message,
        }
    }

    /// Create a degenerate topology error
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateTopology {
            message: message.into(),
        }
    }

    /// Create an invalid topology error
    pub fn topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Whether this error was raised by the root-finder while processing a sample.
    pub fn is_simulation_fault(&self) -> bool {
        matches!(
            self,
            WdfError::DerivativeDegenerate { .. } | WdfError::ConvergenceFailure { .. }
        )
    }
}

/// Check that a component value is strictly positive and finite.
pub(crate) fn ensure_positive(component: &'static str, param: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(WdfError::invalid_value(
            component,
            param,
            value,
            "must be positive and finite",
        ))
    }
}

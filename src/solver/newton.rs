//! Scalar Newton-Raphson root finding for nonlinear WDF elements.

use crate::error::{WdfError, Result};
use super::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, DERIVATIVE_EPSILON};

/// Converged root together with the number of iterations it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Approximate root `x*`
    pub root: f64,
    /// Iterations performed, including the converging one
    pub iterations: usize,
}

/// Newton-Raphson solver settings.
///
/// The solver itself is stateless; warm starting is the caller's business,
/// so one configuration can be shared by any number of elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonRaphson {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the step size `|x_{k+1} - x_k|`
    pub tolerance: f64,
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self::new()
    }
}

impl NewtonRaphson {
    /// Create a solver with the default tolerance (1e-10) and iteration budget (100).
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Find a root of `f` starting from `x0`.
    pub fn solve<F, D>(&self, f: F, df: D, x0: f64) -> Result<Root>
    where
        F: Fn(f64) -> f64,
        D: Fn(f64) -> f64,
    {
        newton_raphson(f, df, x0, self.tolerance, self.max_iterations)
    }
}

/// Find a root of `f` using the update `x_{k+1} = x_k - f(x_k) / f'(x_k)`.
///
/// Converges when a step is smaller than `tolerance`. Fails with
/// [`WdfError::DerivativeDegenerate`] as soon as `|f'(x_k)| < 1e-15`, and with
/// [`WdfError::ConvergenceFailure`] when the budget runs out or an iterate
/// leaves the finite range.
pub fn newton_raphson<F, D>(
    f: F,
    df: D,
    x0: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Root>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let mut x = x0;
    let mut step = f64::INFINITY;

    for iter in 0..max_iterations {
        let fx = f(x);
        let dfx = df(x);

        if dfx.abs() < DERIVATIVE_EPSILON {
            return Err(WdfError::DerivativeDegenerate { x, derivative: dfx });
        }

        let x_new = x - fx / dfx;
        step = (x_new - x).abs();

        // NaN compares false, so a blown-up iterate would never converge anyway
        if !x_new.is_finite() {
            return Err(WdfError::ConvergenceFailure {
                iterations: iter + 1,
                step,
            });
        }

        if step < tolerance {
            return Ok(Root {
                root: x_new,
                iterations: iter + 1,
            });
        }

        x = x_new;
    }

    Err(WdfError::ConvergenceFailure {
        iterations: max_iterations,
        step,
    })
}

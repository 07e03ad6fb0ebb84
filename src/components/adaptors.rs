//! Two-port series and parallel adaptors.
//!
//! An adaptor joins two child ports into a three-port junction whose third
//! (parent-facing) port is adapted, i.e. reflection-free. The scattering is
//! lossless: for any incident waves the power entering the junction equals
//! the power leaving it.

use crate::circuit::ElementId;
use crate::error::{Result, WdfError};

/// Series adaptor joining two subtrees.
///
/// Port resistance:  `Rp = R1 + R2`
/// Scattering coefficient: `gamma = R1 / Rp`
///
/// 3-port series junction (port 3 = parent, reflection-free):
///   scatter_up:   `b3 = -(b1 + b2)`
///   scatter_down: `a1 = b1 - gamma * (b1 + b2 + a3)`
///                 `a2 = -(a3 + a1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesAdaptor {
    pub p1: ElementId,
    pub p2: ElementId,
    gamma: f64,
}

impl SeriesAdaptor {
    /// Join `p1` and `p2` in series. Coefficients are set once the
    /// adaptor is added to a tree.
    pub fn new(p1: ElementId, p2: ElementId) -> Self {
        Self { p1, p2, gamma: 0.5 }
    }

    /// Scattering coefficient of the first child.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Recompute when child port resistances change. Returns the new port resistance.
    pub fn update_ports(&mut self, r1: f64, r2: f64) -> Result<f64> {
        let rp = r1 + r2;
        if !(rp.is_finite() && rp > 0.0) {
            return Err(WdfError::degenerate(format!(
                "series adaptor children have port resistances {r1} and {r2}"
            )));
        }
        self.gamma = r1 / rp;
        Ok(rp)
    }

    /// Bottom-up: wave sent to the parent.
    #[inline]
    pub fn scatter_up(&self, b1: f64, b2: f64) -> f64 {
        -(b1 + b2)
    }

    /// Top-down: child incident waves `(a1, a2)` from the parent's wave `a3`
    /// and the children's latest reflected waves.
    #[inline]
    pub fn scatter_down(&self, a3: f64, b1: f64, b2: f64) -> (f64, f64) {
        let a1 = b1 - self.gamma * (a3 + b1 + b2);
        let a2 = -(a3 + a1);
        (a1, a2)
    }
}

/// Parallel adaptor joining two subtrees.
///
/// Port conductance: `Gp = G1 + G2`
/// Scattering coefficient: `gamma = G1 / Gp`
///
///   scatter_up:   `b3 = b2 - gamma * (b2 - b1)`
///   scatter_down: `a2 = a3 - gamma * (b2 - b1)`
///                 `a1 = a2 + (b2 - b1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelAdaptor {
    pub p1: ElementId,
    pub p2: ElementId,
    gamma: f64,
    /// `b2 - b1` from the last scatter_up
    b_diff: f64,
    /// `-gamma * b_diff` from the last scatter_up
    b_temp: f64,
}

impl ParallelAdaptor {
    /// Join `p1` and `p2` in parallel.
    pub fn new(p1: ElementId, p2: ElementId) -> Self {
        Self {
            p1,
            p2,
            gamma: 0.5,
            b_diff: 0.0,
            b_temp: 0.0,
        }
    }

    /// Scattering coefficient of the first child.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Recompute when child port resistances change. Returns the new port resistance.
    pub fn update_ports(&mut self, r1: f64, r2: f64) -> Result<f64> {
        let g1 = 1.0 / r1;
        let g2 = 1.0 / r2;
        let gp = g1 + g2;
        if !(g1.is_finite() && g2.is_finite() && gp > 0.0) {
            return Err(WdfError::degenerate(format!(
                "parallel adaptor children have port resistances {r1} and {r2}"
            )));
        }
        self.gamma = g1 / gp;
        Ok(1.0 / gp)
    }

    /// Bottom-up: wave sent to the parent. Caches the difference terms for scatter_down.
    #[inline]
    pub fn scatter_up(&mut self, b1: f64, b2: f64) -> f64 {
        self.b_diff = b2 - b1;
        self.b_temp = -self.gamma * self.b_diff;
        b2 + self.b_temp
    }

    /// Top-down: child incident waves `(a1, a2)`.
    #[inline]
    pub fn scatter_down(&self, a3: f64) -> (f64, f64) {
        let a2 = a3 + self.b_temp;
        (self.b_diff + a2, a2)
    }

    /// Clear the cached scattering terms.
    pub fn reset(&mut self) {
        self.b_diff = 0.0;
        self.b_temp = 0.0;
    }
}

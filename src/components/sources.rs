//! Voltage sources.

use crate::circuit::ElementId;
use crate::error::{ensure_positive, Result};

use super::WdfLeaf;

/// An ideal (unadapted) voltage source terminating the tree.
///
/// Enforces `v = Vs` at its port regardless of the load: `b = 2 Vs - a`.
/// It has no internal resistance to adapt to, so it can only sit at the root,
/// wrapping the subtree `next`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealVoltageSource {
    pub next: ElementId,
    pub voltage: f64,
}

impl IdealVoltageSource {
    /// Create a source driving the subtree `next`.
    pub fn new(next: ElementId) -> Self {
        Self { next, voltage: 0.0 }
    }

    /// Reflected wave for the given incident wave.
    pub fn reflected(&self, incident: f64) -> f64 {
        2.0 * self.voltage - incident
    }
}

/// A voltage source with a series resistance.
///
/// Adapted to its own resistance, so it is reflection-free: `b = Vs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistiveVoltageSource {
    pub resistance: f64,
    pub voltage: f64,
}

impl ResistiveVoltageSource {
    /// Create a source with the given series resistance.
    pub fn new(resistance: f64) -> Result<Self> {
        Ok(Self {
            resistance: ensure_positive("ResistiveVoltageSource", "resistance", resistance)?,
            voltage: 0.0,
        })
    }

    /// Change the series resistance. The caller must recompute ancestor port resistances.
    pub fn set_resistance(&mut self, resistance: f64) -> Result<()> {
        self.resistance = ensure_positive("ResistiveVoltageSource", "resistance", resistance)?;
        Ok(())
    }
}

impl WdfLeaf for ResistiveVoltageSource {
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    fn reflected(&self, _incident: f64) -> f64 {
        self.voltage
    }
}

/// A voltage source in series with one child port.
///
/// Presents the child's port resistance upwards. With the child's waves
/// `(a_c, b_c)` and the parent-facing waves `(a, b)`, equal currents and
/// `v = v_c + Vs` give:
///
/// ```text
/// b   = b_c + Vs
/// a_c = a - Vs
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesVoltage {
    pub next: ElementId,
    pub voltage: f64,
}

impl SeriesVoltage {
    /// Insert a series source above `next`.
    pub fn new(next: ElementId) -> Self {
        Self { next, voltage: 0.0 }
    }

    /// Wave sent to the parent given the child's reflected wave.
    pub fn reflected(&self, child_reflected: f64) -> f64 {
        child_reflected + self.voltage
    }

    /// Wave passed down to the child given the parent's incident wave.
    pub fn child_incident(&self, incident: f64) -> f64 {
        incident - self.voltage
    }
}

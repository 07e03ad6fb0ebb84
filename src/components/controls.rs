//! Control elements: Switch and PolarityInverter.

use crate::circuit::ElementId;

use super::OPEN_CIRCUIT_RESISTANCE;

/// A switch terminating the tree.
///
/// Closed it shorts the port (`b = -a`), open it leaves it floating (`b = a`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Switch {
    pub next: ElementId,
    pub closed: bool,
}

impl Switch {
    /// Create a switch across the subtree `next`.
    pub fn new(next: ElementId, closed: bool) -> Self {
        Self { next, closed }
    }

    /// Reflected wave for the given incident wave.
    pub fn reflected(&self, incident: f64) -> f64 {
        if self.closed {
            -incident
        } else {
            incident
        }
    }

    /// Port resistance given the subtree's.
    pub fn port_resistance(&self, child: f64) -> f64 {
        if self.closed {
            child
        } else {
            OPEN_CIRCUIT_RESISTANCE
        }
    }
}

/// Swaps the terminal orientation of one child port.
///
/// Needed between a series adaptor, whose parent port is sign-inverted
/// relative to its children, and anything that expects the natural sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarityInverter {
    pub next: ElementId,
}

impl PolarityInverter {
    /// Wrap the child `next`.
    pub fn new(next: ElementId) -> Self {
        Self { next }
    }
}

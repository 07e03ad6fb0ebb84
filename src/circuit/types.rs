//! Core types for tree representation.

use std::fmt;

/// A unique identifier for an element in a [`WdfTree`](super::WdfTree).
///
/// Ids are handed out in insertion order. Children must exist before their
/// parent is added, so a child's id is always lower than its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl ElementId {
    /// Raw index into the tree's element storage.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Voltage across and current into a port, read back from its waves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PortReading {
    /// `(a + b) / 2`
    pub voltage: f64,
    /// `(a - b) / (2 Rp)`
    pub current: f64,
}

impl PortReading {
    /// Convert a wave pair into voltage and current.
    pub fn from_waves(incident: f64, reflected: f64, port_resistance: f64) -> Self {
        Self {
            voltage: (incident + reflected) * 0.5,
            current: (incident - reflected) / (2.0 * port_resistance),
        }
    }
}

//! WDF circuit elements.
//!
//! This module provides every element a scattering tree is built from:
//! - Linear one-ports: Resistor, Capacitor, Inductor, ShortCircuit, OpenCircuit
//! - Sources: IdealVoltageSource, ResistiveVoltageSource, SeriesVoltage
//! - Controls: Switch, PolarityInverter
//! - Adaptors: SeriesAdaptor, ParallelAdaptor
//! - Nonlinear: diode, diode pair, Chua's diode
//!
//! Leaves implement [`WdfLeaf`]. The closed [`Element`] enum is what a
//! [`WdfTree`](crate::circuit::WdfTree) stores; the tree drives the wave
//! exchange between elements.

mod adaptors;
mod controls;
mod diode;
mod linear;
mod sources;

pub use adaptors::{ParallelAdaptor, SeriesAdaptor};
pub use controls::{PolarityInverter, Switch};
pub use diode::{ChuaModel, DeviceModel, DeviceSolution, DiodeModel, NonlinearDevice};
pub use linear::{Capacitor, Inductor, OpenCircuit, Resistor, ShortCircuit};
pub use sources::{IdealVoltageSource, ResistiveVoltageSource, SeriesVoltage};

use crate::circuit::ElementId;
use crate::error::Result;

/// Port resistance standing in for an ideal short.
pub const SHORT_CIRCUIT_RESISTANCE: f64 = 1e-16;

/// Port resistance standing in for an ideal open.
pub const OPEN_CIRCUIT_RESISTANCE: f64 = 1e16;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// One-port WDF leaf element.
///
/// Leaf elements sit at the ends of the binary tree and interact with
/// the wave domain through incident (`a`) and reflected (`b`) waves.
pub trait WdfLeaf {
    /// Port resistance seen looking into this element (Ω).
    fn port_resistance(&self) -> f64;

    /// Produce the reflected wave given the current state and incident wave.
    ///
    /// For resistors: `b = 0` (matched termination)
    /// For capacitors: `b = z⁻¹ a` (previous incident)
    /// For inductors: `b = -z⁻¹ a`
    fn reflected(&self, incident: f64) -> f64;

    /// Accept the incident wave of the current sample.
    ///
    /// Reactive elements (C, L) latch this value as state for next sample.
    fn set_incident(&mut self, _a: f64) {}

    /// Update sample rate (for reactive elements C, L). Clears their memory.
    fn set_sample_rate(&mut self, _sample_rate: f64) -> Result<()> {
        Ok(())
    }

    /// Reset internal state to zero.
    fn reset(&mut self) {}
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// A node of the scattering tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    ShortCircuit(ShortCircuit),
    OpenCircuit(OpenCircuit),
    IdealVoltageSource(IdealVoltageSource),
    ResistiveVoltageSource(ResistiveVoltageSource),
    SeriesVoltage(SeriesVoltage),
    PolarityInverter(PolarityInverter),
    Switch(Switch),
    Nonlinear(NonlinearDevice),
    Series(SeriesAdaptor),
    Parallel(ParallelAdaptor),
}

impl Element {
    /// Short type name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Resistor(_) => "Resistor",
            Element::Capacitor(_) => "Capacitor",
            Element::Inductor(_) => "Inductor",
            Element::ShortCircuit(_) => "ShortCircuit",
            Element::OpenCircuit(_) => "OpenCircuit",
            Element::IdealVoltageSource(_) => "IdealVoltageSource",
            Element::ResistiveVoltageSource(_) => "ResistiveVoltageSource",
            Element::SeriesVoltage(_) => "SeriesVoltage",
            Element::PolarityInverter(_) => "PolarityInverter",
            Element::Switch(_) => "Switch",
            Element::Nonlinear(_) => "NonlinearDevice",
            Element::Series(_) => "SeriesAdaptor",
            Element::Parallel(_) => "ParallelAdaptor",
        }
    }

    /// Child ports, in evaluation order.
    pub fn children(&self) -> [Option<ElementId>; 2] {
        match self {
            Element::IdealVoltageSource(e) => [Some(e.next), None],
            Element::SeriesVoltage(e) => [Some(e.next), None],
            Element::PolarityInverter(e) => [Some(e.next), None],
            Element::Switch(e) => [Some(e.next), None],
            Element::Nonlinear(e) => [Some(e.next), None],
            Element::Series(e) => [Some(e.p1), Some(e.p2)],
            Element::Parallel(e) => [Some(e.p1), Some(e.p2)],
            _ => [None, None],
        }
    }

    /// Whether the element is unadapted and may only terminate the tree.
    pub fn is_root_only(&self) -> bool {
        matches!(
            self,
            Element::IdealVoltageSource(_) | Element::Switch(_) | Element::Nonlinear(_)
        )
    }

    /// Whether the element accepts a source voltage.
    pub fn is_voltage_source(&self) -> bool {
        matches!(
            self,
            Element::IdealVoltageSource(_)
                | Element::ResistiveVoltageSource(_)
                | Element::SeriesVoltage(_)
        )
    }

    /// View as a leaf, if it is one.
    pub fn as_leaf(&self) -> Option<&dyn WdfLeaf> {
        match self {
            Element::Resistor(e) => Some(e),
            Element::Capacitor(e) => Some(e),
            Element::Inductor(e) => Some(e),
            Element::ShortCircuit(e) => Some(e),
            Element::OpenCircuit(e) => Some(e),
            Element::ResistiveVoltageSource(e) => Some(e),
            _ => None,
        }
    }

    /// Mutable view as a leaf, if it is one.
    pub fn as_leaf_mut(&mut self) -> Option<&mut dyn WdfLeaf> {
        match self {
            Element::Resistor(e) => Some(e),
            Element::Capacitor(e) => Some(e),
            Element::Inductor(e) => Some(e),
            Element::ShortCircuit(e) => Some(e),
            Element::OpenCircuit(e) => Some(e),
            Element::ResistiveVoltageSource(e) => Some(e),
            _ => None,
        }
    }

    /// Clear all per-sample state held inside the element.
    pub fn reset(&mut self) {
        match self {
            Element::Parallel(p) => p.reset(),
            Element::Nonlinear(d) => d.reset(),
            other => {
                if let Some(leaf) = other.as_leaf_mut() {
                    leaf.reset();
                }
            }
        }
    }
}

macro_rules! impl_from_element {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::$variant(value)
                }
            }
        )*
    };
}

impl_from_element! {
    Resistor => Resistor,
    Capacitor => Capacitor,
    Inductor => Inductor,
    ShortCircuit => ShortCircuit,
    OpenCircuit => OpenCircuit,
    IdealVoltageSource => IdealVoltageSource,
    ResistiveVoltageSource => ResistiveVoltageSource,
    SeriesVoltage => SeriesVoltage,
    PolarityInverter => PolarityInverter,
    Switch => Switch,
    Nonlinear => NonlinearDevice,
    Series => SeriesAdaptor,
    Parallel => ParallelAdaptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_classification() {
        let r: Element = Resistor::new(100.0).unwrap().into();
        assert!(r.as_leaf().is_some());
        assert!(!r.is_root_only());
        assert_eq!(r.children(), [None, None]);

        let vs: Element = IdealVoltageSource::new(ElementId(0)).into();
        assert!(vs.is_root_only());
        assert!(vs.is_voltage_source());
        assert_eq!(vs.children(), [Some(ElementId(0)), None]);

        let s: Element = SeriesAdaptor::new(ElementId(1), ElementId(2)).into();
        assert_eq!(s.children(), [Some(ElementId(1)), Some(ElementId(2))]);
        assert!(s.as_leaf().is_none());
        assert_eq!(s.kind(), "SeriesAdaptor");
    }

    #[test]
    fn test_reset_clears_reactive_state() {
        let mut c = Capacitor::new(1e-6, 48000.0).unwrap();
        c.set_incident(3.0);
        let mut element = Element::from(c);
        element.reset();
        assert_eq!(element.as_leaf().map(|l| l.reflected(0.0)), Some(0.0));
    }
}

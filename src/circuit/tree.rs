//! Arena-backed WDF scattering tree.
//!
//! The tree processes a sample in two passes driven from the root:
//! 1. **propagate**: bottom-up: leaves produce reflected waves `b`,
//!    adaptors combine their children's waves into one wave for the parent.
//! 2. **accept**: top-down: adaptors split the parent's incident wave into
//!    incident waves for their children, first child before second. Reactive
//!    leaves latch what they receive as state for the next sample.
//!
//! Every element exclusively owns its children, so the tree is a strict
//! hierarchy addressed by [`ElementId`]. Children are always added before
//! their parent, which makes insertion order a valid bottom-up order.

use crate::components::{DeviceModel, Element};
use crate::error::{Result, WdfError};

use super::types::{ElementId, PortReading};

/// One slot of the arena: an element plus the port state every element shares.
#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<ElementId>,
    /// Last wave accepted from the adjacent element (`a`)
    incident: f64,
    /// Last wave produced for the adjacent element (`b`)
    reflected: f64,
    /// Resistance this element or subtree presents upwards
    port_resistance: f64,
}

/// A binary tree of WDF elements.
#[derive(Debug, Default)]
pub struct WdfTree {
    nodes: Vec<Node>,
}

impl Clone for WdfTree {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }

    /// Reuses the existing allocation, so a per-sample snapshot does not allocate.
    fn clone_from(&mut self, source: &Self) {
        self.nodes.clone_from(&source.nodes);
    }
}

impl WdfTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All element ids in insertion (bottom-up) order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.nodes.len()).map(ElementId)
    }

    /// Add an element, attaching the children it names.
    ///
    /// Fails if a child does not exist, already has a parent, or can only
    /// terminate a tree; and with [`WdfError::DegenerateTopology`] if the
    /// children's port resistances cannot be combined.
    pub fn add(&mut self, element: impl Into<Element>) -> Result<ElementId> {
        let element = element.into();
        let id = ElementId(self.nodes.len());
        let children = element.children();

        if let [Some(p1), Some(p2)] = children {
            if p1 == p2 {
                return Err(WdfError::topology(format!(
                    "{} cannot connect {p1} to both of its ports",
                    element.kind()
                )));
            }
        }

        for child in children.into_iter().flatten() {
            let node = self.node(child)?;
            if let Some(parent) = node.parent {
                return Err(WdfError::topology(format!(
                    "{child} is already connected to {parent}"
                )));
            }
            if node.element.is_root_only() {
                return Err(WdfError::topology(format!(
                    "{} {child} can only terminate a tree",
                    node.element.kind()
                )));
            }
        }

        self.nodes.push(Node {
            element,
            parent: None,
            incident: 0.0,
            reflected: 0.0,
            port_resistance: 0.0,
        });

        // Coefficients first, so a degenerate adaptor leaves the tree untouched
        if let Err(err) = self.update_port_resistance(id) {
            self.nodes.pop();
            return Err(err);
        }

        for child in children.into_iter().flatten() {
            self.nodes[child.0].parent = Some(id);
        }

        Ok(id)
    }

    fn node(&self, id: ElementId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(WdfError::ElementNotFound { id })
    }

    fn node_mut(&mut self, id: ElementId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(WdfError::ElementNotFound { id })
    }

    /// The element stored under `id`.
    pub fn element(&self, id: ElementId) -> Result<&Element> {
        Ok(&self.node(id)?.element)
    }

    /// The parent of `id`, if it has one.
    pub fn parent(&self, id: ElementId) -> Result<Option<ElementId>> {
        Ok(self.node(id)?.parent)
    }

    /// Resistance `id` presents to whatever is connected above it.
    pub fn port_resistance(&self, id: ElementId) -> Result<f64> {
        Ok(self.node(id)?.port_resistance)
    }

    /// Last wave accepted by `id`.
    pub fn incident_wave(&self, id: ElementId) -> Result<f64> {
        Ok(self.node(id)?.incident)
    }

    /// Last wave produced by `id`.
    pub fn reflected_wave(&self, id: ElementId) -> Result<f64> {
        Ok(self.node(id)?.reflected)
    }

    /// Port voltage `(a + b) / 2`.
    pub fn wave_to_voltage(&self, id: ElementId) -> Result<f64> {
        Ok(self.reading(id)?.voltage)
    }

    /// Port current `(a - b) / (2 Rp)`.
    pub fn wave_to_current(&self, id: ElementId) -> Result<f64> {
        Ok(self.reading(id)?.current)
    }

    /// Port voltage and current together.
    pub fn reading(&self, id: ElementId) -> Result<PortReading> {
        let node = self.node(id)?;
        Ok(PortReading::from_waves(
            node.incident,
            node.reflected,
            node.port_resistance,
        ))
    }

    // -----------------------------------------------------------------------
    // Wave exchange
    // -----------------------------------------------------------------------

    /// Deliver the wave `a` to `id` and, through adaptors, to its subtree.
    ///
    /// Elements with a `next` child that terminate the tree only store `a`;
    /// the exchange with their subtree is driven by the circuit.
    pub fn accept_incident_wave(&mut self, id: ElementId, a: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        node.incident = a;
        let element = node.element;

        match element {
            Element::SeriesVoltage(sv) => {
                self.accept_incident_wave(sv.next, sv.child_incident(a))?;
            }
            Element::PolarityInverter(pi) => {
                self.accept_incident_wave(pi.next, -a)?;
            }
            Element::Series(s) => {
                let b1 = self.nodes[s.p1.0].reflected;
                let b2 = self.nodes[s.p2.0].reflected;
                let (a1, a2) = s.scatter_down(a, b1, b2);
                self.accept_incident_wave(s.p1, a1)?;
                self.accept_incident_wave(s.p2, a2)?;
            }
            Element::Parallel(p) => {
                let (a1, a2) = p.scatter_down(a);
                self.accept_incident_wave(p.p1, a1)?;
                self.accept_incident_wave(p.p2, a2)?;
            }
            Element::IdealVoltageSource(_) | Element::Switch(_) | Element::Nonlinear(_) => {}
            _ => {
                if let Some(leaf) = self.nodes[id.0].element.as_leaf_mut() {
                    leaf.set_incident(a);
                }
            }
        }

        Ok(())
    }

    /// Compute the wave `id` sends upwards, pulling from its subtree first.
    ///
    /// A nonlinear device solves its port equation here; a root-finder
    /// failure is returned as is and leaves the device's warm-start state
    /// unchanged.
    pub fn propagate_reflected_wave(&mut self, id: ElementId) -> Result<f64> {
        let node = self.node(id)?;
        let incident = node.incident;
        let element = node.element;

        let b = match element {
            Element::IdealVoltageSource(vs) => vs.reflected(incident),
            Element::Switch(sw) => sw.reflected(incident),
            Element::SeriesVoltage(sv) => {
                let b_child = self.propagate_reflected_wave(sv.next)?;
                sv.reflected(b_child)
            }
            Element::PolarityInverter(pi) => -self.propagate_reflected_wave(pi.next)?,
            Element::Series(s) => {
                let b1 = self.propagate_reflected_wave(s.p1)?;
                let b2 = self.propagate_reflected_wave(s.p2)?;
                s.scatter_up(b1, b2)
            }
            Element::Parallel(mut p) => {
                let b1 = self.propagate_reflected_wave(p.p1)?;
                let b2 = self.propagate_reflected_wave(p.p2)?;
                let b = p.scatter_up(b1, b2);
                self.nodes[id.0].element = Element::Parallel(p);
                b
            }
            Element::Nonlinear(mut device) => {
                let rp = self.nodes[device.next.0].port_resistance;
                let solution = device.solve(incident, rp)?;
                log::trace!(
                    "{id}: nonlinear solve converged in {} iterations (v = {:.6})",
                    solution.iterations,
                    solution.voltage
                );
                device.commit(&solution);
                self.nodes[id.0].element = Element::Nonlinear(device);
                solution.reflected
            }
            other => match other.as_leaf() {
                Some(leaf) => leaf.reflected(incident),
                None => return Err(not_a_leaf(&other, id)),
            },
        };

        self.nodes[id.0].reflected = b;
        Ok(b)
    }

    // -----------------------------------------------------------------------
    // Port resistances
    // -----------------------------------------------------------------------

    /// Recompute the port resistance (and adaptor coefficients) of `id` alone.
    fn update_port_resistance(&mut self, id: ElementId) -> Result<f64> {
        let element = self.node(id)?.element;

        let rp = match element {
            Element::IdealVoltageSource(vs) => self.port_resistance(vs.next)?,
            Element::Nonlinear(d) => self.port_resistance(d.next)?,
            Element::SeriesVoltage(sv) => self.port_resistance(sv.next)?,
            Element::PolarityInverter(pi) => self.port_resistance(pi.next)?,
            Element::Switch(sw) => sw.port_resistance(self.port_resistance(sw.next)?),
            Element::Series(mut s) => {
                let rp = s.update_ports(self.port_resistance(s.p1)?, self.port_resistance(s.p2)?)?;
                self.nodes[id.0].element = Element::Series(s);
                rp
            }
            Element::Parallel(mut p) => {
                let rp = p.update_ports(self.port_resistance(p.p1)?, self.port_resistance(p.p2)?)?;
                self.nodes[id.0].element = Element::Parallel(p);
                rp
            }
            other => match other.as_leaf() {
                Some(leaf) => leaf.port_resistance(),
                None => return Err(not_a_leaf(&other, id)),
            },
        };

        self.nodes[id.0].port_resistance = rp;
        Ok(rp)
    }

    /// Recompute port resistances from `id` up through every ancestor to the root.
    ///
    /// Must be called after any parameter change before the next sample;
    /// setters never do it on their own.
    pub fn recompute_port_resistances(&mut self, id: ElementId) -> Result<()> {
        let mut current = Some(id);
        while let Some(id) = current {
            self.update_port_resistance(id)?;
            current = self.nodes[id.0].parent;
        }
        Ok(())
    }

    /// Recompute every port resistance, bottom-up.
    pub fn recompute_all(&mut self) -> Result<()> {
        for index in 0..self.nodes.len() {
            self.update_port_resistance(ElementId(index))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Parameter updates
    // -----------------------------------------------------------------------

    /// Set the resistance of a Resistor or ResistiveVoltageSource.
    pub fn set_resistance(&mut self, id: ElementId, resistance: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::Resistor(r) => r.set_resistance(resistance),
            Element::ResistiveVoltageSource(vs) => vs.set_resistance(resistance),
            _ => Err(wrong_kind(kind, id, "set resistance")),
        }
    }

    /// Set the capacitance of a Capacitor.
    pub fn set_capacitance(&mut self, id: ElementId, capacitance: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::Capacitor(c) => c.set_capacitance(capacitance),
            _ => Err(wrong_kind(kind, id, "set capacitance")),
        }
    }

    /// Set the inductance of an Inductor.
    pub fn set_inductance(&mut self, id: ElementId, inductance: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::Inductor(l) => l.set_inductance(inductance),
            _ => Err(wrong_kind(kind, id, "set inductance")),
        }
    }

    /// Set the discretization blend factor of a Capacitor or Inductor.
    pub fn set_alpha(&mut self, id: ElementId, alpha: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::Capacitor(c) => c.set_alpha(alpha),
            Element::Inductor(l) => l.set_alpha(alpha),
            _ => Err(wrong_kind(kind, id, "set alpha")),
        }
    }

    /// Set the voltage of any source. Does not change port resistances.
    pub fn set_voltage(&mut self, id: ElementId, voltage: f64) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::IdealVoltageSource(vs) => vs.voltage = voltage,
            Element::ResistiveVoltageSource(vs) => vs.voltage = voltage,
            Element::SeriesVoltage(sv) => sv.voltage = voltage,
            _ => return Err(wrong_kind(kind, id, "set voltage")),
        }
        Ok(())
    }

    /// Open or close a Switch.
    pub fn set_closed(&mut self, id: ElementId, closed: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::Switch(sw) => sw.closed = closed,
            _ => return Err(wrong_kind(kind, id, "set switch state")),
        }
        Ok(())
    }

    /// Replace the law of a nonlinear device. Takes effect on the next sample;
    /// the warm-start voltage is kept.
    pub fn set_device_model(&mut self, id: ElementId, model: DeviceModel) -> Result<()> {
        let node = self.node_mut(id)?;
        let kind = node.element.kind();
        match &mut node.element {
            Element::Nonlinear(device) => device.model = model,
            _ => return Err(wrong_kind(kind, id, "set device model")),
        }
        Ok(())
    }

    /// Move every reactive element to a new sample rate, recompute all port
    /// resistances and clear all state.
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> Result<()> {
        for node in &mut self.nodes {
            if let Some(leaf) = node.element.as_leaf_mut() {
                leaf.set_sample_rate(sample_rate)?;
            }
        }
        self.recompute_all()?;
        self.reset();
        Ok(())
    }

    /// Zero every wave and all element memory.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.incident = 0.0;
            node.reflected = 0.0;
            node.element.reset();
        }
    }
}

fn wrong_kind(kind: &str, id: ElementId, operation: &str) -> WdfError {
    WdfError::topology(format!("cannot {operation} on {kind} {id}"))
}

fn not_a_leaf(element: &Element, id: ElementId) -> WdfError {
    WdfError::topology(format!("{} {id} has no leaf behaviour", element.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        Capacitor, DiodeModel, IdealVoltageSource, NonlinearDevice, OpenCircuit, ParallelAdaptor,
        PolarityInverter, Resistor, ResistiveVoltageSource, SeriesAdaptor, SeriesVoltage,
        ShortCircuit, Switch,
    };
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn divider(r1: f64, r2: f64) -> (WdfTree, ElementId, ElementId, ElementId) {
        let mut tree = WdfTree::new();
        let r1 = tree.add(Resistor::new(r1).unwrap()).unwrap();
        let r2 = tree.add(Resistor::new(r2).unwrap()).unwrap();
        let s1 = tree.add(SeriesAdaptor::new(r1, r2)).unwrap();
        (tree, r1, r2, s1)
    }

    #[test]
    fn test_series_port_resistance() {
        let (tree, _, _, s1) = divider(1000.0, 3000.0);
        assert_eq!(tree.port_resistance(s1).unwrap(), 4000.0);
        assert_eq!(tree.parent(ElementId(0)).unwrap(), Some(s1));
        assert_eq!(tree.parent(s1).unwrap(), None);
    }

    #[test]
    fn test_parallel_port_resistance() {
        let mut tree = WdfTree::new();
        let r1 = tree.add(Resistor::new(1000.0).unwrap()).unwrap();
        let r2 = tree.add(Resistor::new(1000.0).unwrap()).unwrap();
        let p1 = tree.add(ParallelAdaptor::new(r1, r2)).unwrap();
        assert_relative_eq!(tree.port_resistance(p1).unwrap(), 500.0);
    }

    #[test]
    fn test_child_cannot_be_shared() {
        let (mut tree, r1, _, _) = divider(1000.0, 1000.0);
        let r3 = tree.add(Resistor::new(10.0).unwrap()).unwrap();
        let err = tree.add(SeriesAdaptor::new(r1, r3)).unwrap_err();
        assert!(matches!(err, WdfError::InvalidTopology { .. }));
    }

    #[test]
    fn test_same_child_twice_rejected() {
        let mut tree = WdfTree::new();
        let r1 = tree.add(Resistor::new(10.0).unwrap()).unwrap();
        assert!(tree.add(ParallelAdaptor::new(r1, r1)).is_err());
    }

    #[test]
    fn test_root_only_cannot_be_child() {
        let (mut tree, _, _, s1) = divider(1000.0, 1000.0);
        let vs = tree.add(IdealVoltageSource::new(s1)).unwrap();
        let r3 = tree.add(Resistor::new(10.0).unwrap()).unwrap();
        let err = tree.add(SeriesAdaptor::new(vs, r3)).unwrap_err();
        assert!(matches!(err, WdfError::InvalidTopology { .. }));
    }

    #[test]
    fn test_unknown_child() {
        let mut tree = WdfTree::new();
        let err = tree.add(PolarityInverter::new(ElementId(4))).unwrap_err();
        assert_eq!(err, WdfError::ElementNotFound { id: ElementId(4) });
        assert!(tree.is_empty());
    }

    #[test]
    fn test_degenerate_adaptor_is_not_inserted() {
        let mut tree = WdfTree::new();
        // Port resistance underflows to zero
        let c1 = tree.add(Capacitor::new(1e300, 1e10).unwrap()).unwrap();
        let c2 = tree.add(Capacitor::new(1e300, 1e10).unwrap()).unwrap();
        let err = tree.add(SeriesAdaptor::new(c1, c2)).unwrap_err();
        assert!(matches!(err, WdfError::DegenerateTopology { .. }));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent(c1).unwrap(), None);
    }

    #[test]
    fn test_short_and_open_terminations() {
        let mut tree = WdfTree::new();
        let short = tree.add(ShortCircuit).unwrap();
        let open = tree.add(OpenCircuit).unwrap();
        let p = tree.add(ParallelAdaptor::new(short, open)).unwrap();
        assert!(tree.port_resistance(p).unwrap() < 1e-15);

        tree.accept_incident_wave(short, 2.0).unwrap();
        tree.accept_incident_wave(open, 2.0).unwrap();
        assert_eq!(tree.propagate_reflected_wave(short).unwrap(), -2.0);
        assert_eq!(tree.propagate_reflected_wave(open).unwrap(), 2.0);
    }

    #[test]
    fn test_voltage_divider_waves() {
        let (mut tree, _, r2, s1) = divider(1000.0, 1000.0);
        let inv = tree.add(PolarityInverter::new(s1)).unwrap();
        let vs = tree.add(IdealVoltageSource::new(inv)).unwrap();
        tree.set_voltage(vs, 2.0).unwrap();

        let b = tree.propagate_reflected_wave(inv).unwrap();
        tree.accept_incident_wave(vs, b).unwrap();
        let b = tree.propagate_reflected_wave(vs).unwrap();
        tree.accept_incident_wave(inv, b).unwrap();

        assert_abs_diff_eq!(tree.wave_to_voltage(r2).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tree.wave_to_voltage(vs).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(tree.wave_to_current(r2).unwrap(), 1e-3, epsilon = 1e-12);
    }

    #[test]
    fn test_series_voltage_forwards_to_child() {
        let mut tree = WdfTree::new();
        let r = tree.add(Resistor::new(100.0).unwrap()).unwrap();
        let sv = tree.add(SeriesVoltage::new(r)).unwrap();
        tree.set_voltage(sv, 1.0).unwrap();
        assert_eq!(tree.port_resistance(sv).unwrap(), 100.0);
        assert_eq!(tree.propagate_reflected_wave(sv).unwrap(), 1.0);
        tree.accept_incident_wave(sv, 3.0).unwrap();
        assert_eq!(tree.incident_wave(r).unwrap(), 2.0);
    }

    #[test]
    fn test_recompute_walks_ancestors() {
        let (mut tree, r1, _, s1) = divider(1000.0, 1000.0);
        let r3 = tree.add(Resistor::new(500.0).unwrap()).unwrap();
        let p1 = tree.add(ParallelAdaptor::new(s1, r3)).unwrap();
        assert_relative_eq!(tree.port_resistance(p1).unwrap(), 400.0);

        tree.set_resistance(r1, 3000.0).unwrap();
        // Setters do not propagate on their own
        assert_relative_eq!(tree.port_resistance(s1).unwrap(), 2000.0);

        tree.recompute_port_resistances(r1).unwrap();
        assert_relative_eq!(tree.port_resistance(s1).unwrap(), 4000.0);
        assert_relative_eq!(tree.port_resistance(p1).unwrap(), 1.0 / (1.0 / 4000.0 + 1.0 / 500.0));
    }

    #[test]
    fn test_setters_check_kind_and_value() {
        let (mut tree, r1, _, s1) = divider(1000.0, 1000.0);
        assert!(tree.set_capacitance(r1, 1e-6).is_err());
        assert!(tree.set_voltage(r1, 1.0).is_err());
        assert!(tree.set_closed(s1, true).is_err());
        assert!(matches!(
            tree.set_resistance(r1, -5.0),
            Err(WdfError::InvalidComponentValue { .. })
        ));
        assert!(tree.set_resistance(ElementId(99), 5.0).is_err());
    }

    #[test]
    fn test_set_device_model() {
        let mut tree = WdfTree::new();
        let r = tree.add(Resistor::new(1000.0).unwrap()).unwrap();
        let silicon = DeviceModel::DiodePair(DiodeModel::silicon());
        let d = tree.add(NonlinearDevice::new(r, silicon)).unwrap();

        let germanium = DeviceModel::DiodePair(DiodeModel::germanium().with_n_diodes(2.0).unwrap());
        tree.set_device_model(d, germanium).unwrap();
        match tree.element(d).unwrap() {
            Element::Nonlinear(device) => assert_eq!(device.model, germanium),
            other => panic!("unexpected element {other:?}"),
        }
        assert!(tree.set_device_model(r, silicon).is_err());

        // The new law is what the next solve uses
        tree.accept_incident_wave(d, 1.0).unwrap();
        let b = tree.propagate_reflected_wave(d).unwrap();
        let v = tree.wave_to_voltage(d).unwrap();
        assert_abs_diff_eq!((1.0 - b) / 2000.0, germanium.current(v), epsilon = 1e-12);
    }

    #[test]
    fn test_clone_from_restores_waves() {
        let (mut tree, r1, _, s1) = divider(1000.0, 1000.0);
        let mut snapshot = tree.clone();
        tree.accept_incident_wave(s1, 4.0).unwrap();
        assert_eq!(tree.incident_wave(r1).unwrap(), -2.0);
        tree.clone_from(&snapshot);
        assert_eq!(tree.incident_wave(r1).unwrap(), 0.0);

        snapshot.clone_from(&tree);
        assert_eq!(snapshot.len(), tree.len());
    }

    #[test]
    fn test_switch_port_resistance_follows_state() {
        let mut tree = WdfTree::new();
        let r = tree.add(ResistiveVoltageSource::new(50.0).unwrap()).unwrap();
        let sw = tree.add(Switch::new(r, true)).unwrap();
        assert_eq!(tree.port_resistance(sw).unwrap(), 50.0);
        tree.set_closed(sw, false).unwrap();
        tree.recompute_port_resistances(sw).unwrap();
        assert!(tree.port_resistance(sw).unwrap() > 1e12);
    }

    #[test]
    fn test_sample_rate_change_resets_state() {
        let mut tree = WdfTree::new();
        let c = tree.add(Capacitor::new(1e-6, 48000.0).unwrap()).unwrap();
        tree.accept_incident_wave(c, 1.0).unwrap();
        assert_eq!(tree.propagate_reflected_wave(c).unwrap(), 1.0);

        tree.set_sample_rate(96000.0).unwrap();
        assert_relative_eq!(tree.port_resistance(c).unwrap(), 1.0 / (2.0 * 1e-6 * 96000.0));
        assert_eq!(tree.incident_wave(c).unwrap(), 0.0);
        assert_eq!(tree.propagate_reflected_wave(c).unwrap(), 0.0);
    }
}

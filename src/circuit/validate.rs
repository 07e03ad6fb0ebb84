//! Tree validation.

use crate::error::{Result, WdfError};

use super::{ElementId, WdfTree};

/// Validate a tree and its designated elements for simulation.
///
/// Checks:
/// - All designated ids belong to the tree
/// - The root is unadapted (can terminate a tree) and has no parent
/// - Every other element has a parent, i.e. is reachable from the root
/// - The source accepts a voltage
pub fn validate_circuit(
    tree: &WdfTree,
    source: ElementId,
    root: ElementId,
    observation: ElementId,
) -> Result<()> {
    if tree.is_empty() {
        return Err(WdfError::topology("tree has no elements"));
    }

    for id in [source, root, observation] {
        tree.element(id)?;
    }

    let root_element = tree.element(root)?;
    if !root_element.is_root_only() {
        return Err(WdfError::topology(format!(
            "{} {root} cannot terminate a tree; use an IdealVoltageSource, Switch or nonlinear device",
            root_element.kind()
        )));
    }
    if let Some(parent) = tree.parent(root)? {
        return Err(WdfError::topology(format!(
            "root {root} is connected to {parent}"
        )));
    }

    // Parents always have higher ids than their children, so walking up
    // from any element terminates at a parentless one
    for id in tree.ids() {
        if id != root && tree.parent(id)?.is_none() {
            return Err(WdfError::topology(format!(
                "{} {id} is not connected to the root {root}",
                tree.element(id)?.kind()
            )));
        }
    }

    let source_element = tree.element(source)?;
    if !source_element.is_voltage_source() {
        return Err(WdfError::topology(format!(
            "{} {source} cannot be driven as a source",
            source_element.kind()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{IdealVoltageSource, ResistiveVoltageSource, Resistor, SeriesAdaptor};

    /// `Rs` in series with `R`, terminated by an ideal source.
    fn build() -> (WdfTree, ElementId, ElementId, ElementId) {
        let mut tree = WdfTree::new();
        let rs = tree.add(ResistiveVoltageSource::new(10.0).unwrap()).unwrap();
        let r = tree.add(Resistor::new(100.0).unwrap()).unwrap();
        let s = tree.add(SeriesAdaptor::new(rs, r)).unwrap();
        let vs = tree.add(IdealVoltageSource::new(s)).unwrap();
        (tree, rs, r, vs)
    }

    #[test]
    fn test_valid_tree() {
        let (tree, rs, r, vs) = build();
        assert!(validate_circuit(&tree, vs, vs, r).is_ok());
        assert!(validate_circuit(&tree, rs, vs, r).is_ok());
    }

    #[test]
    fn test_empty_tree() {
        let tree = WdfTree::new();
        let id = ElementId(0);
        assert!(validate_circuit(&tree, id, id, id).is_err());
    }

    #[test]
    fn test_adapted_root_rejected() {
        let (tree, rs, r, _) = build();
        let err = validate_circuit(&tree, rs, ElementId(2), r).unwrap_err();
        assert!(matches!(err, WdfError::InvalidTopology { .. }));
    }

    #[test]
    fn test_source_must_be_a_source() {
        let (tree, _, r, vs) = build();
        assert!(validate_circuit(&tree, r, vs, r).is_err());
    }

    #[test]
    fn test_dangling_element() {
        let (mut tree, _, r, vs) = build();
        tree.add(Resistor::new(1.0).unwrap()).unwrap();
        let err = validate_circuit(&tree, vs, vs, r).unwrap_err();
        assert!(err.to_string().contains("not connected"));
    }

    #[test]
    fn test_unknown_observation() {
        let (tree, _, _, vs) = build();
        assert_eq!(
            validate_circuit(&tree, vs, vs, ElementId(42)),
            Err(WdfError::ElementNotFound { id: ElementId(42) })
        );
    }
}

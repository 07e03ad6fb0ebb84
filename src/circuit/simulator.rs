//! Circuit orchestrator: drives the per-sample wave exchange.

use crate::error::{ensure_positive, Result, WdfError};

use super::validate::validate_circuit;
use super::{ElementId, PortReading, WdfTree};

/// What buffer processing does when a nonlinear solve fails on one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    /// Fail the whole call with the root-finder's error.
    #[default]
    Abort,
    /// Log a warning and repeat the previous output for the faulty sample.
    ///
    /// Reactive elements keep the memory of the last good sample.
    HoldPrevious,
}

/// Configuration for the circuit.
#[derive(Debug, Clone, Default)]
pub struct SimulatorConfig {
    /// Fault handling for `process_signal`, `process_signal_iv` and `process_block`.
    pub fault_policy: FaultPolicy,
}

impl SimulatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fault policy used by buffer processing.
    pub fn with_fault_policy(mut self, fault_policy: FaultPolicy) -> Self {
        self.fault_policy = fault_policy;
        self
    }
}

/// A WDF tree with its designated source, root and observation point.
///
/// Each sample runs the two-step exchange between the root and the subtree
/// it wraps:
///
/// 1. set the source voltage to the input sample
/// 2. the subtree's reflected wave flows into the root
/// 3. the root's reflected wave flows back down the subtree
/// 4. the observation point's voltage and current are read from its waves
#[derive(Debug, Clone)]
pub struct Circuit {
    tree: WdfTree,
    source: ElementId,
    root: ElementId,
    /// Top of the adapted subtree below the root
    next: ElementId,
    observation: ElementId,
    sample_rate: f64,
    config: SimulatorConfig,
    /// Observation of the last successful sample
    last_output: PortReading,
    /// Tree state before the sample in progress, kept under `HoldPrevious`
    snapshot: WdfTree,
}

impl Circuit {
    /// Create a circuit with default configuration.
    ///
    /// Every reactive element is moved to `sample_rate` and all state is cleared.
    pub fn new(
        tree: WdfTree,
        source: ElementId,
        root: ElementId,
        observation: ElementId,
        sample_rate: f64,
    ) -> Result<Self> {
        Self::with_config(tree, source, root, observation, sample_rate, SimulatorConfig::default())
    }

    /// Create a circuit with custom configuration.
    pub fn with_config(
        mut tree: WdfTree,
        source: ElementId,
        root: ElementId,
        observation: ElementId,
        sample_rate: f64,
        config: SimulatorConfig,
    ) -> Result<Self> {
        validate_circuit(&tree, source, root, observation)?;
        let sample_rate = ensure_positive("Circuit", "sample rate", sample_rate)?;

        let next = match tree.element(root)?.children() {
            [Some(next), _] => next,
            _ => return Err(WdfError::topology(format!("root {root} has no subtree"))),
        };

        tree.set_sample_rate(sample_rate)?;

        log::debug!(
            "Circuit assembled: {} elements, root {root}, source {source}, observing {observation} at {sample_rate} Hz",
            tree.len()
        );

        Ok(Self {
            tree,
            source,
            root,
            next,
            observation,
            sample_rate,
            config,
            last_output: PortReading::default(),
            snapshot: WdfTree::new(),
        })
    }

    /// Advance by one sample and return the observed voltage.
    ///
    /// A root-finder failure fails the call regardless of the fault policy.
    pub fn process_sample(&mut self, x: f64) -> Result<f64> {
        Ok(self.step(x)?.voltage)
    }

    /// Advance by one sample and return the observed `(voltage, current)`.
    pub fn process_sample_iv(&mut self, x: f64) -> Result<(f64, f64)> {
        let reading = self.step(x)?;
        Ok((reading.voltage, reading.current))
    }

    /// Process a finite signal from a reset state, so repeated calls with the
    /// same input give the same output. Use [`Circuit::process_block`] to
    /// stream a signal across several calls.
    pub fn process_signal(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.reset();
        let mut output = vec![0.0; input.len()];
        self.process_block(input, &mut output)?;
        Ok(output)
    }

    /// Like [`Circuit::process_signal`], returning `(voltage, current)` pairs.
    pub fn process_signal_iv(&mut self, input: &[f64]) -> Result<Vec<(f64, f64)>> {
        self.reset();
        input
            .iter()
            .enumerate()
            .map(|(index, &x)| {
                let reading = self.step_with_policy(index, x)?;
                Ok((reading.voltage, reading.current))
            })
            .collect()
    }

    /// Process a block of samples into `output`, continuing from the current
    /// state.
    ///
    /// Processes as many samples as both buffers hold.
    pub fn process_block(&mut self, input: &[f64], output: &mut [f64]) -> Result<()> {
        for (index, (&x, out)) in input.iter().zip(output.iter_mut()).enumerate() {
            *out = self.step_with_policy(index, x)?.voltage;
        }
        Ok(())
    }

    fn step(&mut self, x: f64) -> Result<PortReading> {
        self.tree.set_voltage(self.source, x)?;

        let b = self.tree.propagate_reflected_wave(self.next)?;
        self.tree.accept_incident_wave(self.root, b)?;
        let b = self.tree.propagate_reflected_wave(self.root)?;
        self.tree.accept_incident_wave(self.next, b)?;

        let reading = self.tree.reading(self.observation)?;
        self.last_output = reading;
        Ok(reading)
    }

    /// Run one sample under the fault policy. A held sample leaves the tree
    /// exactly as the last good sample left it.
    fn step_with_policy(&mut self, index: usize, x: f64) -> Result<PortReading> {
        if self.config.fault_policy == FaultPolicy::Abort {
            return self.step(x);
        }

        self.snapshot.clone_from(&self.tree);
        match self.step(x) {
            Err(err) if err.is_simulation_fault() => {
                log::warn!("Sample {index}: {err}; holding previous output");
                std::mem::swap(&mut self.tree, &mut self.snapshot);
                Ok(self.last_output)
            }
            result => result,
        }
    }

    /// Clear all waves, reactive memory and warm-start state.
    pub fn reset(&mut self) {
        self.tree.reset();
        self.last_output = PortReading::default();
    }

    /// Move the circuit to a new sample rate. Resets all state.
    pub fn set_sample_rate(&mut self, sample_rate: f64) -> Result<()> {
        let sample_rate = ensure_positive("Circuit", "sample rate", sample_rate)?;
        self.tree.set_sample_rate(sample_rate)?;
        self.sample_rate = sample_rate;
        self.last_output = PortReading::default();
        log::debug!("Circuit sample rate changed to {sample_rate} Hz");
        Ok(())
    }

    /// Recompute port resistances from `id` up to the root after a parameter change.
    pub fn recompute_port_resistances(&mut self, id: ElementId) -> Result<()> {
        self.tree.recompute_port_resistances(id)
    }

    /// Voltage across any element's port, as of the last sample.
    pub fn voltage(&self, id: ElementId) -> Result<f64> {
        self.tree.wave_to_voltage(id)
    }

    /// Current into any element's port, as of the last sample.
    pub fn current(&self, id: ElementId) -> Result<f64> {
        self.tree.wave_to_current(id)
    }

    /// Get the current sample rate.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn observation(&self) -> ElementId {
        self.observation
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Get a reference to the tree.
    pub fn tree(&self) -> &WdfTree {
        &self.tree
    }

    /// Mutable access for parameter updates. Follow every change with
    /// [`Circuit::recompute_port_resistances`].
    pub fn tree_mut(&mut self) -> &mut WdfTree {
        &mut self.tree
    }
}

//! Linear passive one-ports: Resistor, Capacitor, Inductor, and the ideal
//! short and open terminations.

use crate::error::{ensure_positive, Result, WdfError};

use super::{WdfLeaf, OPEN_CIRCUIT_RESISTANCE, SHORT_CIRCUIT_RESISTANCE};

/// Check the discretization blend factor.
fn ensure_alpha(component: &'static str, alpha: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(WdfError::invalid_value(
            component,
            "alpha",
            alpha,
            "blend factor must lie in [0, 1]",
        ))
    }
}

/// Weights of the previous incident and reflected waves in a reactive
/// element's next reflection. `(1, 0)` at `alpha = 1`.
fn memory_coefficients(alpha: f64) -> (f64, f64) {
    (0.5 * (1.0 + alpha), 0.5 * (1.0 - alpha))
}

/// A resistor.
///
/// Adapted to its own resistance, so it never reflects: `b = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    pub resistance: f64,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(resistance: f64) -> Result<Self> {
        Ok(Self {
            resistance: ensure_positive("Resistor", "resistance", resistance)?,
        })
    }

    /// Change the resistance. The caller must recompute ancestor port resistances.
    pub fn set_resistance(&mut self, resistance: f64) -> Result<()> {
        self.resistance = ensure_positive("Resistor", "resistance", resistance)?;
        Ok(())
    }
}

impl WdfLeaf for Resistor {
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    fn reflected(&self, _incident: f64) -> f64 {
        0.0
    }
}

/// A capacitor.
///
/// Discretized with the alpha transform `s = (1 + alpha) / T * (1 - z^-1) / (1 + alpha z^-1)`,
/// which gives
///
/// ```text
/// Rp   = T / ((1 + alpha) * C)
/// b[n] = (1 + alpha) / 2 * a[n-1] + (1 - alpha) / 2 * b[n-1]
/// ```
///
/// `alpha = 1` is the bilinear transform with the plain unit delay
/// `b[n] = a[n-1]`; `alpha = 0` is backward Euler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    pub capacitance: f64,
    pub sample_rate: f64,
    /// Discretization blend factor (0 = backward Euler, 1 = bilinear)
    pub alpha: f64,
    /// Reflected wave of the next sample
    state: f64,
}

impl Capacitor {
    /// Create a bilinear-discretized capacitor.
    pub fn new(capacitance: f64, sample_rate: f64) -> Result<Self> {
        Self::with_alpha(capacitance, sample_rate, 1.0)
    }

    /// Create a capacitor with an explicit discretization blend factor.
    pub fn with_alpha(capacitance: f64, sample_rate: f64, alpha: f64) -> Result<Self> {
        Ok(Self {
            capacitance: ensure_positive("Capacitor", "capacitance", capacitance)?,
            sample_rate: ensure_positive("Capacitor", "sample rate", sample_rate)?,
            alpha: ensure_alpha("Capacitor", alpha)?,
            state: 0.0,
        })
    }

    /// Create a bilinear capacitor whose value deviates from nominal by the
    /// relative amount `deviation`, e.g. `0.05` for a part 5% above its marking.
    pub fn with_deviation(capacitance: f64, sample_rate: f64, deviation: f64) -> Result<Self> {
        if !(deviation.is_finite() && deviation.abs() < 1.0) {
            return Err(WdfError::invalid_value(
                "Capacitor",
                "deviation",
                deviation,
                "relative deviation must lie in (-1, 1)",
            ));
        }
        let nominal = ensure_positive("Capacitor", "capacitance", capacitance)?;
        Self::new(nominal * (1.0 + deviation), sample_rate)
    }

    /// Change the capacitance. The caller must recompute ancestor port resistances.
    pub fn set_capacitance(&mut self, capacitance: f64) -> Result<()> {
        self.capacitance = ensure_positive("Capacitor", "capacitance", capacitance)?;
        Ok(())
    }

    /// Change the discretization blend factor.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.alpha = ensure_alpha("Capacitor", alpha)?;
        Ok(())
    }
}

impl WdfLeaf for Capacitor {
    fn port_resistance(&self) -> f64 {
        1.0 / ((1.0 + self.alpha) * self.capacitance * self.sample_rate)
    }

    fn reflected(&self, _incident: f64) -> f64 {
        self.state
    }

    fn set_incident(&mut self, a: f64) {
        let (ca, cb) = memory_coefficients(self.alpha);
        self.state = ca * a + cb * self.state;
    }

    fn set_sample_rate(&mut self, sample_rate: f64) -> Result<()> {
        self.sample_rate = ensure_positive("Capacitor", "sample rate", sample_rate)?;
        self.state = 0.0;
        Ok(())
    }

    fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// An inductor.
///
/// Dual of the capacitor under the same alpha transform:
///
/// ```text
/// Rp   = (1 + alpha) * L / T
/// b[n] = -(1 + alpha) / 2 * a[n-1] + (1 - alpha) / 2 * b[n-1]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    pub inductance: f64,
    pub sample_rate: f64,
    /// Discretization blend factor (0 = backward Euler, 1 = bilinear)
    pub alpha: f64,
    state: f64,
}

impl Inductor {
    /// Create a bilinear-discretized inductor.
    pub fn new(inductance: f64, sample_rate: f64) -> Result<Self> {
        Self::with_alpha(inductance, sample_rate, 1.0)
    }

    /// Create an inductor with an explicit discretization blend factor.
    pub fn with_alpha(inductance: f64, sample_rate: f64, alpha: f64) -> Result<Self> {
        Ok(Self {
            inductance: ensure_positive("Inductor", "inductance", inductance)?,
            sample_rate: ensure_positive("Inductor", "sample rate", sample_rate)?,
            alpha: ensure_alpha("Inductor", alpha)?,
            state: 0.0,
        })
    }

    /// Change the inductance. The caller must recompute ancestor port resistances.
    pub fn set_inductance(&mut self, inductance: f64) -> Result<()> {
        self.inductance = ensure_positive("Inductor", "inductance", inductance)?;
        Ok(())
    }

    /// Change the discretization blend factor.
    pub fn set_alpha(&mut self, alpha: f64) -> Result<()> {
        self.alpha = ensure_alpha("Inductor", alpha)?;
        Ok(())
    }
}

impl WdfLeaf for Inductor {
    fn port_resistance(&self) -> f64 {
        (1.0 + self.alpha) * self.inductance * self.sample_rate
    }

    fn reflected(&self, _incident: f64) -> f64 {
        self.state
    }

    fn set_incident(&mut self, a: f64) {
        let (ca, cb) = memory_coefficients(self.alpha);
        self.state = -ca * a + cb * self.state;
    }

    fn set_sample_rate(&mut self, sample_rate: f64) -> Result<()> {
        self.sample_rate = ensure_positive("Inductor", "sample rate", sample_rate)?;
        self.state = 0.0;
        Ok(())
    }

    fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// An ideal short: `v = 0`, so `b = -a`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShortCircuit;

impl WdfLeaf for ShortCircuit {
    fn port_resistance(&self) -> f64 {
        SHORT_CIRCUIT_RESISTANCE
    }

    fn reflected(&self, incident: f64) -> f64 {
        -incident
    }
}

/// An ideal open: `i = 0`, so `b = a`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpenCircuit;

impl WdfLeaf for OpenCircuit {
    fn port_resistance(&self) -> f64 {
        OPEN_CIRCUIT_RESISTANCE
    }

    fn reflected(&self, incident: f64) -> f64 {
        incident
    }
}

//! Nonlinear one-ports: diodes and Chua's diode.
//!
//! A nonlinear device sits at the root of the tree, facing the port
//! resistance `Rp` of the subtree below it. With `v = (a + b) / 2` and
//! `i = (a - b) / (2 Rp)`, the device law `i = I(v)` becomes one implicit
//! equation in the port voltage:
//!
//! ```text
//! f(v) = Rp * I(v) + v - a = 0
//! f'(v) = Rp * I'(v) + 1
//! ```
//!
//! which is solved with Newton-Raphson, seeded with the previous sample's
//! voltage. The reflected wave is then `b = 2v - a`.

use crate::circuit::ElementId;
use crate::error::{ensure_positive, Result};
use crate::solver::NewtonRaphson;
use crate::THERMAL_VOLTAGE;

/// Current at which the exponential laws switch to their tangent line.
///
/// Keeps `exp` finite for large Newton overshoots; real clipping circuits
/// never get near it.
const LINEAR_CONTINUATION_CURRENT: f64 = 1.0;

/// Shockley diode parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiodeModel {
    /// Saturation current (A). Silicon ≈ 1e-15 to 1e-9, Germanium ≈ 1e-6.
    pub saturation_current: f64,
    /// Thermal voltage times ideality factor (V)
    pub thermal_voltage: f64,
    /// Number of identical diodes in series
    pub n_diodes: f64,
}

impl DiodeModel {
    /// Create a diode model, validating every parameter.
    pub fn new(saturation_current: f64, thermal_voltage: f64, n_diodes: f64) -> Result<Self> {
        Ok(Self {
            saturation_current: ensure_positive("Diode", "saturation current", saturation_current)?,
            thermal_voltage: ensure_positive("Diode", "thermal voltage", thermal_voltage)?,
            n_diodes: ensure_positive("Diode", "diode count", n_diodes)?,
        })
    }

    /// 1N4148-like small-signal silicon diode.
    pub fn silicon() -> Self {
        Self {
            saturation_current: 2.52e-9,
            thermal_voltage: 1.752 * THERMAL_VOLTAGE,
            n_diodes: 1.0,
        }
    }

    /// Generic germanium diode, lower forward voltage.
    pub fn germanium() -> Self {
        Self {
            saturation_current: 1e-6,
            thermal_voltage: 1.3 * THERMAL_VOLTAGE,
            n_diodes: 1.0,
        }
    }

    /// Same diode, `n` of them stacked in series.
    pub fn with_n_diodes(mut self, n: f64) -> Result<Self> {
        self.n_diodes = ensure_positive("Diode", "diode count", n)?;
        Ok(self)
    }

    /// Effective `n * Vt` of the stack.
    pub fn n_vt(&self) -> f64 {
        self.thermal_voltage * self.n_diodes
    }

    /// Normalized voltage above which `exp` is replaced by its tangent.
    fn x_lin(&self) -> f64 {
        (LINEAR_CONTINUATION_CURRENT / self.saturation_current).ln()
    }

    /// `exp(x)` and its derivative, continued linearly above `x_lin`.
    fn exp_continued(&self, x: f64) -> (f64, f64) {
        let x_lin = self.x_lin();
        if x > x_lin {
            let e = x_lin.exp();
            (e * (1.0 + x - x_lin), e)
        } else {
            let e = x.exp();
            (e, e)
        }
    }

    /// Current and conductance of a single diode stack.
    pub fn diode_iv(&self, v: f64) -> (f64, f64) {
        let n_vt = self.n_vt();
        let (e, de) = self.exp_continued(v / n_vt);
        let i_s = self.saturation_current;
        (i_s * (e - 1.0), i_s * de / n_vt)
    }

    /// Current and conductance of an antiparallel pair of stacks.
    pub fn pair_iv(&self, v: f64) -> (f64, f64) {
        let n_vt = self.n_vt();
        let (ep, dep) = self.exp_continued(v / n_vt);
        let (en, den) = self.exp_continued(-v / n_vt);
        let i_s = self.saturation_current;
        (i_s * (ep - en), i_s * (dep + den) / n_vt)
    }
}

/// Chua's diode: a three-segment piecewise-linear voltage-controlled resistor.
///
/// ```text
/// i = g2 * v + (g1 - g2) / 2 * (|v + v0| - |v - v0|)
/// ```
///
/// Slope `g1` inside `|v| < v0`, `g2` outside. Both are usually negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChuaModel {
    /// Inner slope (S)
    pub g1: f64,
    /// Outer slope (S)
    pub g2: f64,
    /// Breakpoint voltage (V)
    pub v0: f64,
}

impl ChuaModel {
    /// Create a Chua diode model.
    pub fn new(g1: f64, g2: f64, v0: f64) -> Result<Self> {
        Ok(Self {
            g1,
            g2,
            v0: ensure_positive("ChuaDiode", "breakpoint voltage", v0)?,
        })
    }

    /// Current and slope at `v`.
    pub fn iv(&self, v: f64) -> (f64, f64) {
        let i = self.g2 * v + 0.5 * (self.g1 - self.g2) * ((v + self.v0).abs() - (v - self.v0).abs());
        let g = if v.abs() < self.v0 { self.g1 } else { self.g2 };
        (i, g)
    }
}

/// Device law of a nonlinear element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceModel {
    /// Single diode (stack), anode at the positive terminal
    Diode(DiodeModel),
    /// Antiparallel diode pair, symmetric clipping
    DiodePair(DiodeModel),
    /// Chua's piecewise-linear diode
    Chua(ChuaModel),
    /// Odd cubic law `i = g1 v + g3 v^3`
    Cubic { g1: f64, g3: f64 },
}

impl DeviceModel {
    /// Device current and its derivative with respect to voltage.
    pub fn iv(&self, v: f64) -> (f64, f64) {
        match self {
            DeviceModel::Diode(d) => d.diode_iv(v),
            DeviceModel::DiodePair(d) => d.pair_iv(v),
            DeviceModel::Chua(c) => c.iv(v),
            DeviceModel::Cubic { g1, g3 } => (g1 * v + g3 * v * v * v, g1 + 3.0 * g3 * v * v),
        }
    }

    /// Device current at `v`.
    pub fn current(&self, v: f64) -> f64 {
        self.iv(v).0
    }
}

/// Outcome of one nonlinear solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSolution {
    /// Port voltage
    pub voltage: f64,
    /// Wave reflected back into the tree
    pub reflected: f64,
    /// Newton iterations used
    pub iterations: usize,
}

/// A nonlinear device terminating the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonlinearDevice {
    pub next: ElementId,
    pub model: DeviceModel,
    pub solver: NewtonRaphson,
    /// Last converged port voltage, the seed for the next solve
    voltage: f64,
    /// Iterations used by the last solve
    iterations: usize,
}

impl NonlinearDevice {
    /// Create a device across the subtree `next` with the default solver settings.
    pub fn new(next: ElementId, model: DeviceModel) -> Self {
        Self::with_solver(next, model, NewtonRaphson::default())
    }

    /// Create a device with explicit solver settings.
    pub fn with_solver(next: ElementId, model: DeviceModel, solver: NewtonRaphson) -> Self {
        Self {
            next,
            model,
            solver,
            voltage: 0.0,
            iterations: 0,
        }
    }

    /// Last converged port voltage.
    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Newton iterations used by the last successful solve.
    pub fn last_iterations(&self) -> usize {
        self.iterations
    }

    /// Solve the port equation for incident wave `a` against port resistance `rp`.
    ///
    /// Does not touch the warm-start state; see [`NonlinearDevice::commit`].
    pub fn solve(&self, a: f64, rp: f64) -> Result<DeviceSolution> {
        let model = self.model;
        let root = self.solver.solve(
            |v| rp * model.current(v) + v - a,
            |v| rp * model.iv(v).1 + 1.0,
            self.voltage,
        )?;
        Ok(DeviceSolution {
            voltage: root.root,
            reflected: 2.0 * root.root - a,
            iterations: root.iterations,
        })
    }

    /// Accept a converged solution as the seed for the next sample.
    pub fn commit(&mut self, solution: &DeviceSolution) {
        self.voltage = solution.voltage;
        self.iterations = solution.iterations;
    }

    /// Forget the warm-start state.
    pub fn reset(&mut self) {
        self.voltage = 0.0;
        self.iterations = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WdfError;
    use approx::assert_abs_diff_eq;

    fn port_current(a: f64, b: f64, rp: f64) -> f64 {
        (a - b) / (2.0 * rp)
    }

    #[test]
    fn test_diode_forward_and_reverse() {
        let d = DiodeModel::silicon();
        assert_abs_diff_eq!(d.diode_iv(0.0).0, 0.0, epsilon = 1e-15);
        let (i_small, _) = d.diode_iv(0.3);
        let (i_large, _) = d.diode_iv(0.6);
        assert!(i_large > i_small * 100.0);

        let (i_rev, g_rev) = d.diode_iv(-1.0);
        assert!(i_rev < 0.0 && i_rev > -d.saturation_current);
        assert!(g_rev > 0.0);
    }

    #[test]
    fn test_diode_linear_continuation_is_continuous() {
        let d = DiodeModel::silicon();
        let v_lin = d.n_vt() * d.x_lin();
        let (below, _) = d.diode_iv(v_lin - 1e-9);
        let (above, _) = d.diode_iv(v_lin + 1e-9);
        assert_abs_diff_eq!(below, above, epsilon = 1e-5);
        // Far above the knee the law stays finite
        assert!(d.diode_iv(100.0).0.is_finite());
    }

    #[test]
    fn test_pair_is_odd() {
        let d = DiodeModel::silicon();
        for v in [0.1, 0.4, 0.7, 2.0] {
            assert_abs_diff_eq!(d.pair_iv(v).0, -d.pair_iv(-v).0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_chua_segments() {
        let c = ChuaModel::new(-500e-6, -800e-6, 1.0).unwrap();
        assert_abs_diff_eq!(c.iv(0.5).0, -250e-6, epsilon = 1e-15);
        assert_eq!(c.iv(0.5).1, -500e-6);
        // Outer segment: i(2) = g1*v0 + g2*(2 - v0)
        assert_abs_diff_eq!(c.iv(2.0).0, -500e-6 - 800e-6, epsilon = 1e-15);
        assert_eq!(c.iv(-2.0).1, -800e-6);
        assert!(ChuaModel::new(-1.0, -1.0, 0.0).is_err());
    }

    #[test]
    fn test_device_solution_satisfies_law() {
        let rp = 2200.0;
        for model in [
            DeviceModel::Diode(DiodeModel::silicon()),
            DeviceModel::DiodePair(DiodeModel::germanium()),
            DeviceModel::Chua(ChuaModel::new(-500e-6, -800e-6, 1.0).unwrap()),
            DeviceModel::Cubic { g1: 1e-3, g3: 1e-4 },
        ] {
            let mut device = NonlinearDevice::new(ElementId(0), model);
            for a in [0.0, 0.5, 3.0, -7.0, 12.0] {
                let solution = device.solve(a, rp).unwrap();
                let i = port_current(a, solution.reflected, rp);
                assert_abs_diff_eq!(i, model.current(solution.voltage), epsilon = 1e-9);
                device.commit(&solution);
            }
        }
    }

    #[test]
    fn test_diode_pair_clips() {
        let device = NonlinearDevice::new(ElementId(0), DeviceModel::DiodePair(DiodeModel::silicon()));
        let solution = device.solve(20.0, 1000.0).unwrap();
        assert!(solution.voltage > 0.3 && solution.voltage < 1.0);
        assert!(solution.reflected.abs() < 20.0);
    }

    #[test]
    fn test_warm_start_reduces_iterations() {
        let mut device = NonlinearDevice::new(ElementId(0), DeviceModel::Diode(DiodeModel::silicon()));
        let cold = device.solve(5.0, 1000.0).unwrap();
        device.commit(&cold);
        let warm = device.solve(5.0, 1000.0).unwrap();
        assert!(warm.iterations <= cold.iterations);
        assert_abs_diff_eq!(warm.voltage, cold.voltage, epsilon = 1e-9);
        device.reset();
        assert_eq!(device.voltage(), 0.0);
    }

    #[test]
    fn test_solve_failure_leaves_state_untouched() {
        let solver = NewtonRaphson::new().with_max_iterations(1);
        let mut device =
            NonlinearDevice::with_solver(ElementId(0), DeviceModel::Diode(DiodeModel::silicon()), solver);
        let err = device.solve(5.0, 1000.0).unwrap_err();
        assert!(matches!(err, WdfError::ConvergenceFailure { .. }));
        assert_eq!(device.voltage(), 0.0);
        device.reset();
    }

    #[test]
    fn test_degenerate_derivative_surfaces() {
        // Rp * g1 = -1 makes f'(v) vanish on the inner segment
        let model = DeviceModel::Chua(ChuaModel::new(-1e-3, -2e-3, 1.0).unwrap());
        let device = NonlinearDevice::new(ElementId(0), model);
        let err = device.solve(0.1, 1000.0).unwrap_err();
        assert!(matches!(err, WdfError::DerivativeDegenerate { .. }));
    }
}

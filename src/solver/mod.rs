//! Adaptive ODE integration for the circuit model.
//!
//! Implements the Dormand-Prince 5(4) embedded Runge-Kutta pair with
//! proportional step-size control. The autocatalytic T7 feedback makes the
//! system mildly stiff once the AND gate opens: concentrations grow on a
//! much faster scale than the regulator dynamics, which is exactly where a
//! fixed-step method either blows up or crawls. The embedded 4th-order
//! estimate keeps the local error inside the configured tolerances and a
//! failed run surfaces as an explicit error, never as NaN-filled output.
//!
//! Reference: Dormand & Prince, J Comput Appl Math 1980; Hairer, Norsett,
//! Wanner, Solving Ordinary Differential Equations I, Springer 1993

use thiserror::Error;

/// Errors surfaced by the adaptive solver.
///
/// Integration never silently degrades: any condition that would produce
/// degenerate output is reported to the caller.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Step-size control forced the step below the configured minimum.
    #[error("step size underflow at t = {t} (h = {h:e})")]
    StepSizeUnderflow { t: f64, h: f64 },

    /// The total step budget was exhausted before reaching the end time.
    #[error("exceeded {max_steps} steps at t = {t}")]
    MaxStepsExceeded { t: f64, max_steps: u64 },

    /// The derivative function returned NaN or infinity.
    #[error("non-finite derivative at t = {t}")]
    NonFiniteDerivative { t: f64 },

    /// An accepted step produced a NaN or infinite state component.
    #[error("non-finite state at t = {t}")]
    NonFiniteState { t: f64 },

    /// The requested sample grid is unusable.
    #[error("invalid time grid: {0}")]
    InvalidTimeGrid(String),
}

/// Configuration for the adaptive integrator
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Relative error tolerance per step
    pub rtol: f64,
    /// Absolute error tolerance per step
    pub atol: f64,
    /// Initial step size (s); the controller adapts from here
    pub h_initial: f64,
    /// Minimum step size (s) before the solver reports underflow
    pub h_min: f64,
    /// Total step budget for one solve, attempted steps included
    pub max_steps: u64,
    /// Safety factor applied to the optimal step estimate
    pub safety: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-9,
            h_initial: 1e-2,
            h_min: 1e-10,
            max_steps: 1_000_000,
            safety: 0.9,
        }
    }
}

// Dormand-Prince 5(4) Butcher tableau
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;
// 5th-order solution weights
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;
// Error weights (5th minus embedded 4th order)
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

// Step-size scale limits (Hairer et al. recommend [0.2, 5] for DP5)
const MIN_SCALE: f64 = 0.2;
const MAX_SCALE: f64 = 5.0;

/// Adaptive Dormand-Prince 5(4) integrator
///
/// Solves dy/dt = f(y) for an autonomous system, sampling the solution at
/// caller-supplied time points. Scratch vectors are reused across steps.
pub struct AdaptiveRk45 {
    /// Configuration
    pub config: SolverConfig,
    /// Number of attempted steps in the last solve (accepted + rejected)
    pub step_count: u64,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    k5: Vec<f64>,
    k6: Vec<f64>,
    k7: Vec<f64>,
    y_stage: Vec<f64>,
    y_next: Vec<f64>,
}

impl AdaptiveRk45 {
    /// Create a new integrator for a system with n variables
    pub fn new(n_variables: usize, config: SolverConfig) -> Self {
        Self {
            config,
            step_count: 0,
            k1: vec![0.0; n_variables],
            k2: vec![0.0; n_variables],
            k3: vec![0.0; n_variables],
            k4: vec![0.0; n_variables],
            k5: vec![0.0; n_variables],
            k6: vec![0.0; n_variables],
            k7: vec![0.0; n_variables],
            y_stage: vec![0.0; n_variables],
            y_next: vec![0.0; n_variables],
        }
    }

    /// Resize internal buffers if the system size changes
    fn resize(&mut self, n_variables: usize) {
        if self.k1.len() != n_variables {
            self.k1.resize(n_variables, 0.0);
            self.k2.resize(n_variables, 0.0);
            self.k3.resize(n_variables, 0.0);
            self.k4.resize(n_variables, 0.0);
            self.k5.resize(n_variables, 0.0);
            self.k6.resize(n_variables, 0.0);
            self.k7.resize(n_variables, 0.0);
            self.y_stage.resize(n_variables, 0.0);
            self.y_next.resize(n_variables, 0.0);
        }
    }

    /// Integrate the system and sample it at the given time points
    ///
    /// `times` must start at 0 and be strictly increasing. The first
    /// trajectory row is the initial condition; each later row is the state
    /// at exactly the requested instant (the step is capped at every grid
    /// point).
    pub fn solve_series<F>(
        &mut self,
        derivatives: F,
        y0: &[f64],
        times: &[f64],
    ) -> Result<Trajectory, SolverError>
    where
        F: Fn(&[f64], &mut [f64]),
    {
        validate_grid(times)?;
        if y0.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::NonFiniteState { t: times[0] });
        }

        let n = y0.len();
        self.resize(n);
        self.step_count = 0;

        let mut trajectory = Trajectory::with_capacity(times.len());
        trajectory.push(times[0], y0);

        let mut y = y0.to_vec();
        let mut t = times[0];
        let mut h = self.config.h_initial;

        for &t_target in &times[1..] {
            while t < t_target {
                if self.step_count >= self.config.max_steps {
                    return Err(SolverError::MaxStepsExceeded {
                        t,
                        max_steps: self.config.max_steps,
                    });
                }
                if h < self.config.h_min {
                    return Err(SolverError::StepSizeUnderflow { t, h });
                }

                // Never step past the next sample instant; landing on the
                // boundary sets t exactly so no sub-ulp residual remains
                let remaining = t_target - t;
                let at_boundary = h >= remaining;
                let h_try = if at_boundary { remaining } else { h };

                let err_norm = self.attempt_step(&derivatives, &y, t, h_try)?;
                self.step_count += 1;

                if err_norm <= 1.0 {
                    // Accept
                    y.copy_from_slice(&self.y_next);
                    t = if at_boundary { t_target } else { t + h_try };
                    if y.iter().any(|v| !v.is_finite()) {
                        return Err(SolverError::NonFiniteState { t });
                    }
                }

                // Proportional controller, exponent -1/5 for a 5th-order
                // method
                let scale = if err_norm > 0.0 {
                    (self.config.safety * err_norm.powf(-0.2)).clamp(MIN_SCALE, MAX_SCALE)
                } else {
                    MAX_SCALE
                };
                h = h_try * scale;
            }
            trajectory.push(t_target, &y);
        }

        Ok(trajectory)
    }

    /// Attempt one Dormand-Prince step of size h from (t, y).
    ///
    /// Fills `y_next` with the 5th-order candidate and returns the scaled
    /// error norm (accept when <= 1).
    fn attempt_step<F>(&mut self, derivatives: &F, y: &[f64], t: f64, h: f64) -> Result<f64, SolverError>
    where
        F: Fn(&[f64], &mut [f64]),
    {
        let n = y.len();

        derivatives(y, &mut self.k1);
        check_finite(&self.k1, t)?;

        for i in 0..n {
            self.y_stage[i] = y[i] + h * A21 * self.k1[i];
        }
        derivatives(&self.y_stage, &mut self.k2);

        for i in 0..n {
            self.y_stage[i] = y[i] + h * (A31 * self.k1[i] + A32 * self.k2[i]);
        }
        derivatives(&self.y_stage, &mut self.k3);

        for i in 0..n {
            self.y_stage[i] = y[i] + h * (A41 * self.k1[i] + A42 * self.k2[i] + A43 * self.k3[i]);
        }
        derivatives(&self.y_stage, &mut self.k4);

        for i in 0..n {
            self.y_stage[i] = y[i]
                + h * (A51 * self.k1[i] + A52 * self.k2[i] + A53 * self.k3[i] + A54 * self.k4[i]);
        }
        derivatives(&self.y_stage, &mut self.k5);

        for i in 0..n {
            self.y_stage[i] = y[i]
                + h * (A61 * self.k1[i]
                    + A62 * self.k2[i]
                    + A63 * self.k3[i]
                    + A64 * self.k4[i]
                    + A65 * self.k5[i]);
        }
        derivatives(&self.y_stage, &mut self.k6);

        // 5th-order candidate (the B row doubles as the A7 row)
        for i in 0..n {
            self.y_next[i] = y[i]
                + h * (B1 * self.k1[i]
                    + B3 * self.k3[i]
                    + B4 * self.k4[i]
                    + B5 * self.k5[i]
                    + B6 * self.k6[i]);
        }
        derivatives(&self.y_next, &mut self.k7);
        check_finite(&self.k7, t)?;

        // Scaled RMS norm of the embedded error estimate
        let mut err_sq = 0.0;
        for i in 0..n {
            let err_i = h
                * (E1 * self.k1[i]
                    + E3 * self.k3[i]
                    + E4 * self.k4[i]
                    + E5 * self.k5[i]
                    + E6 * self.k6[i]
                    + E7 * self.k7[i]);
            let tol = self.config.atol + self.config.rtol * y[i].abs().max(self.y_next[i].abs());
            let ratio = err_i / tol;
            err_sq += ratio * ratio;
        }
        let err_norm = (err_sq / n as f64).sqrt();
        if !err_norm.is_finite() {
            return Err(SolverError::NonFiniteDerivative { t });
        }
        Ok(err_norm)
    }
}

impl Default for AdaptiveRk45 {
    fn default() -> Self {
        Self::new(crate::circuit::N_SPECIES, SolverConfig::default())
    }
}

fn validate_grid(times: &[f64]) -> Result<(), SolverError> {
    if times.len() < 2 {
        return Err(SolverError::InvalidTimeGrid(
            "need at least two sample instants".into(),
        ));
    }
    if times[0] != 0.0 {
        return Err(SolverError::InvalidTimeGrid(format!(
            "grid must start at t = 0, got {}",
            times[0]
        )));
    }
    for w in times.windows(2) {
        if !(w[1] > w[0]) {
            return Err(SolverError::InvalidTimeGrid(format!(
                "grid must be strictly increasing, got {} after {}",
                w[1], w[0]
            )));
        }
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(SolverError::InvalidTimeGrid("non-finite sample instant".into()));
    }
    Ok(())
}

fn check_finite(values: &[f64], t: f64) -> Result<(), SolverError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SolverError::NonFiniteDerivative { t });
    }
    Ok(())
}

/// Evenly spaced sample instants from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Sampled solution table: one state row per requested time point
#[derive(Debug, Clone)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<Vec<f64>>,
}

impl Trajectory {
    fn with_capacity(n_samples: usize) -> Self {
        Self {
            times: Vec::with_capacity(n_samples),
            states: Vec::with_capacity(n_samples),
        }
    }

    fn push(&mut self, t: f64, y: &[f64]) {
        self.times.push(t);
        self.states.push(y.to_vec());
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when the trajectory holds no samples
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample instants
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Full state vector at sample `i`
    pub fn state(&self, i: usize) -> &[f64] {
        &self.states[i]
    }

    /// One species' values over all samples
    pub fn column(&self, species: usize) -> Vec<f64> {
        self.states.iter().map(|row| row[species]).collect()
    }

    /// (time, value) pairs for one species, ready for plotting
    pub fn series(&self, species: usize) -> Vec<(f64, f64)> {
        self.times
            .iter()
            .zip(self.states.iter())
            .map(|(&t, row)| (t, row[species]))
            .collect()
    }

    /// Final sample instant
    pub fn end_time(&self) -> f64 {
        *self.times.last().unwrap_or(&0.0)
    }
}

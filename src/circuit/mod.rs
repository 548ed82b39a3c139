//! The gene-circuit model: species layout and the derivative function.
//!
//! The circuit wires two inducer signals through an AND gate into an
//! amplifier and an inverter:
//! - AHL and arabinose decay exponentially after a single dose at t = 0.
//! - AHL drives HrpR expression, arabinose drives HrpS expression, each
//!   through a guarded Hill activation term.
//! - The hrpL promoter requires both regulators (product of two Hill
//!   terms) to produce T7 polymerase, which also amplifies itself through
//!   a positive-feedback term k_T7 * T7.
//! - T7 transcribes the CI repressor at the same rate constant.
//! - GFP is expressed from a CI-repressed promoter, so rising CI switches
//!   the reporter off.
//!
//! The system is autonomous: no rate depends on time directly, only on the
//! current concentrations.

pub mod kinetics;

use crate::config::Parameters;
use kinetics::{hill_activation, hill_repression};

/// Number of species in the state vector
pub const N_SPECIES: usize = 7;

/// Display names for the species, in state-vector order
pub const SPECIES_NAMES: [&str; N_SPECIES] = ["AHL", "Arab", "HrpR", "HrpS", "T7", "Cl", "GFP"];

/// Indices for species in the concentration vector
#[derive(Debug, Clone, Copy)]
pub struct SpeciesIndices {
    /// AHL inducer signal
    pub ahl: usize,
    /// Arabinose inducer signal
    pub arab: usize,
    /// HrpR regulator
    pub hrp_r: usize,
    /// HrpS regulator
    pub hrp_s: usize,
    /// T7 polymerase
    pub t7: usize,
    /// CI repressor
    pub cl: usize,
    /// GFP reporter
    pub gfp: usize,
}

impl Default for SpeciesIndices {
    fn default() -> Self {
        Self {
            ahl: 0,
            arab: 1,
            hrp_r: 2,
            hrp_s: 3,
            t7: 4,
            cl: 5,
            gfp: 6,
        }
    }
}

/// The seven-species gene circuit
///
/// Holds the immutable parameter set and evaluates the rate equations.
/// The derivative function is pure: no internal state, no I/O, identical
/// inputs always produce identical outputs.
pub struct GeneCircuit {
    /// Model parameters, fixed for the run
    pub params: Parameters,
    /// Species layout in the state vector
    pub indices: SpeciesIndices,
}

impl GeneCircuit {
    /// Create a circuit from a parameter set
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            indices: SpeciesIndices::default(),
        }
    }

    /// Initial concentration vector
    ///
    /// Inducers at their configured doses, regulators and amplifier at
    /// zero, GFP at its unrepressed steady state (the reporter starts
    /// fully on and only drops once CI accumulates).
    pub fn initial_state(&self) -> Vec<f64> {
        let mut y = vec![0.0; N_SPECIES];
        y[self.indices.ahl] = self.params.signal.init_AHL;
        y[self.indices.arab] = self.params.signal.init_Arab;
        y[self.indices.gfp] = self.params.gfp.unrepressed_steady_state();
        y
    }

    /// Compute instantaneous derivatives for the current state
    ///
    /// # Arguments
    /// * `y` - Current concentration vector (length `N_SPECIES`)
    /// * `dydt` - Output derivative vector, overwritten
    pub fn derivatives(&self, y: &[f64], dydt: &mut [f64]) {
        let ix = &self.indices;
        let p = &self.params;

        let AHL = y[ix.ahl];
        let Arab = y[ix.arab];
        let HrpR = y[ix.hrp_r];
        let HrpS = y[ix.hrp_s];
        let T7 = y[ix.t7];
        let Cl = y[ix.cl];
        let GFP = y[ix.gfp];

        let k_T7 = p.t7.k_T7();

        // Inducer decay
        dydt[ix.ahl] = -p.signal.k1 * AHL;
        dydt[ix.arab] = -p.signal.k2 * Arab;

        // Regulator expression: Hill-activated production plus basal
        // leakage, linear degradation
        dydt[ix.hrp_r] = p.hrp_r.k_R
            * (p.hrp_r.Alpha_R + hill_activation(AHL, p.hrp_r.K_R, p.hrp_r.n_R))
            - p.hrp_r.Sigma_R * HrpR;
        dydt[ix.hrp_s] = p.hrp_s.k_S
            * (p.hrp_s.Alpha_S + hill_activation(Arab, p.hrp_s.K_S, p.hrp_s.n_S))
            - p.hrp_s.Sigma_S * HrpS;

        // AND gate: hrpL output needs both regulators; T7 then feeds back
        // on itself
        let and_gate = hill_activation(HrpR, p.t7.K_RL, p.t7.n_RL)
            * hill_activation(HrpS, p.t7.K_SL, p.t7.n_SL);
        dydt[ix.t7] = p.t7.k_L * and_gate + k_T7 * T7 - p.t7.Sigma_T7 * T7;

        // CI transcribed by T7 at the feedback rate constant
        dydt[ix.cl] = k_T7 * T7 - p.cl.Sigma_Cl * Cl;

        // GFP: CI-repressed expression plus basal leakage, linear
        // degradation
        dydt[ix.gfp] = p.gfp.k_C
            * (p.gfp.Alpha_C + hill_repression(Cl, p.gfp.K_C, p.gfp.n_C))
            - p.gfp.Sigma_G * GFP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Parameters;

    fn default_circuit() -> GeneCircuit {
        GeneCircuit::new(Parameters::default())
    }

    #[test]
    fn test_initial_state() {
        let circuit = default_circuit();
        let y0 = circuit.initial_state();

        assert_eq!(y0.len(), N_SPECIES);
        assert!((y0[circuit.indices.ahl] - 0.1).abs() < 1e-12);
        assert_eq!(y0[circuit.indices.arab], 0.0);
        assert_eq!(y0[circuit.indices.t7], 0.0);
        assert!((y0[circuit.indices.gfp] - 75000.0).abs() < 1e-6);
    }

    #[test]
    fn test_ahl_decay_rate_at_t0() {
        // AHL' = -k1 * AHL = -0.005 * 0.1 = -0.0005
        let circuit = default_circuit();
        let y0 = circuit.initial_state();
        let mut dydt = vec![0.0; N_SPECIES];
        circuit.derivatives(&y0, &mut dydt);

        assert!(
            (dydt[circuit.indices.ahl] + 0.0005).abs() < 1e-15,
            "AHL' at t=0 should be -0.0005, got {}",
            dydt[circuit.indices.ahl]
        );
    }

    #[test]
    fn test_gfp_starts_at_steady_state() {
        // With Cl = 0 the repression term is 1, so GFP production exactly
        // balances degradation at the unrepressed steady state
        let circuit = default_circuit();
        let y0 = circuit.initial_state();
        let mut dydt = vec![0.0; N_SPECIES];
        circuit.derivatives(&y0, &mut dydt);

        assert!(
            dydt[circuit.indices.gfp].abs() < 1e-9,
            "GFP' at the unrepressed steady state should be 0, got {}",
            dydt[circuit.indices.gfp]
        );
    }

    #[test]
    fn test_negative_ahl_uses_guarded_hill_term() {
        // With AHL = -1 the Hill term must be 0, so HrpR' reduces to pure
        // degradation (Alpha_R = 0 by default)
        let circuit = default_circuit();
        let mut y = vec![0.0; N_SPECIES];
        y[circuit.indices.ahl] = -1.0;
        y[circuit.indices.hrp_r] = 100.0;

        let mut dydt = vec![0.0; N_SPECIES];
        circuit.derivatives(&y, &mut dydt);

        let expected = -circuit.params.hrp_r.Sigma_R * 100.0;
        assert!(
            (dydt[circuit.indices.hrp_r] - expected).abs() < 1e-12,
            "HrpR' with AHL=-1 should be pure degradation {}, got {}",
            expected,
            dydt[circuit.indices.hrp_r]
        );
        assert!(dydt.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_and_gate_requires_both_regulators() {
        let circuit = default_circuit();
        let mut dydt = vec![0.0; N_SPECIES];

        // HrpR alone: no T7 production
        let mut y = vec![0.0; N_SPECIES];
        y[circuit.indices.hrp_r] = 1970.0;
        circuit.derivatives(&y, &mut dydt);
        assert_eq!(dydt[circuit.indices.t7], 0.0);

        // HrpS alone: no T7 production
        let mut y = vec![0.0; N_SPECIES];
        y[circuit.indices.hrp_s] = 1.3e4;
        circuit.derivatives(&y, &mut dydt);
        assert_eq!(dydt[circuit.indices.t7], 0.0);

        // Both regulators: the gate opens
        let mut y = vec![0.0; N_SPECIES];
        y[circuit.indices.hrp_r] = 1970.0;
        y[circuit.indices.hrp_s] = 1.3e4;
        circuit.derivatives(&y, &mut dydt);
        assert!(
            dydt[circuit.indices.t7] > 1.0,
            "AND gate should open with both regulators present, got T7' = {}",
            dydt[circuit.indices.t7]
        );
    }

    #[test]
    fn test_autocatalytic_t7_term() {
        // With both regulators absent, T7' = (k_T7 - Sigma_T7) * T7
        let circuit = default_circuit();
        let mut y = vec![0.0; N_SPECIES];
        y[circuit.indices.t7] = 50.0;

        let mut dydt = vec![0.0; N_SPECIES];
        circuit.derivatives(&y, &mut dydt);

        let expected = (circuit.params.t7.k_T7() - circuit.params.t7.Sigma_T7) * 50.0;
        assert!((dydt[circuit.indices.t7] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_derivatives_pure() {
        let circuit = default_circuit();
        let mut y = vec![0.0; N_SPECIES];
        y[circuit.indices.ahl] = 0.07;
        y[circuit.indices.hrp_r] = 812.0;
        y[circuit.indices.hrp_s] = 4100.0;
        y[circuit.indices.t7] = 3.5;
        y[circuit.indices.cl] = 90.0;
        y[circuit.indices.gfp] = 61000.0;

        let mut first = vec![0.0; N_SPECIES];
        let mut second = vec![0.0; N_SPECIES];
        circuit.derivatives(&y, &mut first);
        circuit.derivatives(&y, &mut second);
        assert_eq!(first, second);
    }
}

//! Parameter structures for the gene-circuit model.
//!
//! Constants are grouped by biological sub-process: input signal decay,
//! the HrpR and HrpS regulator stages, the T7 amplifier, the CI repressor
//! and the GFP reporter. All values are fixed at startup and immutable for
//! the run; the structure is passed by reference into the derivative
//! function and the solver, never held as a global.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level parameters container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Input signal parameters (AHL and arabinose doses and decay)
    pub signal: SignalParameters,
    /// HrpR regulator expression parameters
    pub hrp_r: HrpRParameters,
    /// HrpS regulator expression parameters
    pub hrp_s: HrpSParameters,
    /// T7 polymerase amplifier parameters
    pub t7: T7Parameters,
    /// CI repressor parameters
    pub cl: ClParameters,
    /// GFP reporter parameters
    pub gfp: GfpParameters,
    /// Time grid and run-length settings
    pub simulation: SimulationParameters,
}

impl Parameters {
    /// Load parameters from `data/parameters/circuit.json`, or use defaults
    /// if the file doesn't exist or fails to parse.
    pub fn load_or_default() -> Self {
        Self::load_or_default_from("data/parameters/circuit.json")
    }

    /// Load parameters from a specific JSON file, falling back to defaults
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded circuit parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse circuit parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Circuit parameters file not found, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            signal: SignalParameters::default(),
            hrp_r: HrpRParameters::default(),
            hrp_s: HrpSParameters::default(),
            t7: T7Parameters::default(),
            cl: ClParameters::default(),
            gfp: GfpParameters::default(),
            simulation: SimulationParameters::default(),
        }
    }
}

/// Input signal parameters
///
/// AHL and arabinose are the two inducer inputs. Both are dosed once at
/// t = 0 and decay exponentially; nothing in the circuit produces them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalParameters {
    /// AHL degradation rate (1/s)
    pub k1: f64,

    /// Arabinose degradation rate (1/s)
    pub k2: f64,

    /// Initial AHL dose at t = 0
    pub init_AHL: f64,

    /// Initial arabinose dose at t = 0
    ///
    /// 0 by default: the AND gate stays closed unless arabinose is supplied.
    pub init_Arab: f64,
}

impl Default for SignalParameters {
    fn default() -> Self {
        Self {
            k1: 0.005,
            k2: 0.004,
            init_AHL: 0.1,
            init_Arab: 0.0,
        }
    }
}

/// HrpR regulator expression parameters
///
/// HrpR is expressed from an AHL-activated promoter with Hill kinetics
/// and degrades linearly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrpRParameters {
    /// Maximum expression rate (1/s)
    pub k_R: f64,

    /// AHL half-activation constant
    pub K_R: f64,

    /// Basal (leakage) expression, as a fraction of k_R
    ///
    /// 0 in the tight variant; 0.03 in the leaky variant.
    pub Alpha_R: f64,

    /// Hill coefficient for AHL activation
    pub n_R: f64,

    /// HrpR degradation rate (1/s)
    ///
    /// k_R / 1970, so the fully induced steady state is 1970.
    pub Sigma_R: f64,
}

impl Default for HrpRParameters {
    fn default() -> Self {
        Self {
            k_R: 10.0,
            K_R: 3.4e-6,
            Alpha_R: 0.0,
            n_R: 2.0,
            Sigma_R: 10.0 / 1970.0,
        }
    }
}

/// HrpS regulator expression parameters
///
/// Symmetric to HrpR, driven by arabinose instead of AHL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrpSParameters {
    /// Maximum expression rate (1/s)
    pub k_S: f64,

    /// Arabinose half-activation constant
    pub K_S: f64,

    /// Basal (leakage) expression, as a fraction of k_S
    ///
    /// 0 in the tight variant; 0.001 in the leaky variant.
    pub Alpha_S: f64,

    /// Hill coefficient for arabinose activation
    pub n_S: f64,

    /// HrpS degradation rate (1/s)
    ///
    /// k_S / 1.3e4, so the fully induced steady state is 13000.
    pub Sigma_S: f64,
}

impl Default for HrpSParameters {
    fn default() -> Self {
        Self {
            k_S: 10.0,
            K_S: 0.513,
            Alpha_S: 0.0,
            n_S: 1.0,
            Sigma_S: 10.0 / 1.3e4,
        }
    }
}

/// T7 polymerase amplifier parameters
///
/// T7 is produced from the hrpL promoter only when HrpR and HrpS are both
/// present (AND gate: product of two Hill activation terms), and amplifies
/// itself through a positive-feedback loop whose effective rate `k_T7` is
/// derived from the transcription/translation sub-model below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct T7Parameters {
    /// Maximum hrpL promoter output rate (1/s)
    pub k_L: f64,

    /// Hill coefficient for HrpR at the hrpL promoter
    pub n_RL: f64,

    /// Hill coefficient for HrpS at the hrpL promoter
    pub n_SL: f64,

    /// HrpR half-activation constant at the hrpL promoter
    pub K_RL: f64,

    /// HrpS half-activation constant at the hrpL promoter
    pub K_SL: f64,

    /// T7 degradation rate (1/s)
    pub Sigma_T7: f64,

    /// Transcription initiation rate (1/s)
    pub k_ini: f64,

    /// T7-promoter binding rate (1/s)
    pub k_f: f64,

    /// T7-promoter unbinding rate (1/s)
    pub k_b: f64,

    /// Ribosome binding site strength (arbitrary units)
    pub RBS: f64,

    /// Translation rate per unit RBS strength (1/s)
    pub k_PR: f64,

    /// Plasmid copy number
    pub CopyN: f64,
}

impl T7Parameters {
    /// Effective autocatalytic amplification rate (1/s)
    ///
    /// k_T7 = k_ini * k_f * CopyN * k_PR / k_b  (= 0.013 at defaults)
    pub fn k_T7(&self) -> f64 {
        self.k_ini * self.k_f * self.CopyN * self.k_PR / self.k_b
    }
}

impl Default for T7Parameters {
    fn default() -> Self {
        let RBS = 4000.0;
        Self {
            k_L: 10.0,
            n_RL: 2.4,
            n_SL: 1.8,
            K_RL: 206.0,
            K_SL: 3135.0,
            Sigma_T7: 0.001 / 60.0,
            k_ini: 0.0015 / 60.0,
            k_f: 0.00013 / 60.0 * 1e6,
            k_b: 0.0003 / 60.0,
            RBS,
            // Translation rate scaled by RBS strength
            k_PR: (RBS / 1e5) * 0.018 / 60.0,
            CopyN: 100.0,
        }
    }
}

/// CI repressor parameters
///
/// CI is transcribed by T7 polymerase (rate shared with the T7 feedback
/// loop) and degrades linearly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClParameters {
    /// CI degradation rate (1/s), equal to Sigma_T7 in the base model
    pub Sigma_Cl: f64,
}

impl Default for ClParameters {
    fn default() -> Self {
        Self {
            Sigma_Cl: 0.001 / 60.0,
        }
    }
}

/// GFP reporter parameters
///
/// GFP is expressed from a CI-repressed promoter (inverse Hill term) and
/// degrades linearly, so full repression drives the reporter down from its
/// unrepressed steady state k_C / Sigma_G.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GfpParameters {
    /// Maximum expression rate (1/s)
    pub k_C: f64,

    /// Basal (leakage) expression, as a fraction of k_C
    ///
    /// 0 in the tight variant; 0.05 in the leaky variant.
    pub Alpha_C: f64,

    /// Hill coefficient for CI repression
    pub n_C: f64,

    /// CI half-repression constant
    pub K_C: f64,

    /// GFP degradation rate (1/s)
    ///
    /// k_C / 7.5e4, so the unrepressed steady state is 75000.
    pub Sigma_G: f64,
}

impl GfpParameters {
    /// Unrepressed GFP steady state, k_C / Sigma_G * (Alpha_C + 1)
    ///
    /// Used as the initial condition: the reporter starts fully on.
    pub fn unrepressed_steady_state(&self) -> f64 {
        self.k_C / self.Sigma_G * (self.Alpha_C + 1.0)
    }
}

impl Default for GfpParameters {
    fn default() -> Self {
        Self {
            k_C: 1000.0,
            Alpha_C: 0.0,
            n_C: 7.6,
            K_C: 111.0,
            Sigma_G: 1000.0 / 7.5e4,
        }
    }
}

/// Time grid and run-length settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Simulation end time (s)
    pub end_time_sec: f64,

    /// Number of evenly spaced output samples, including t = 0
    pub n_samples: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            end_time_sec: 3000.0,
            n_samples: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_signal_params() {
        let params = SignalParameters::default();
        assert!((params.k1 - 0.005).abs() < 1e-12);
        assert!((params.init_AHL - 0.1).abs() < 1e-12);
        assert_eq!(params.init_Arab, 0.0);
    }

    #[test]
    fn test_derived_k_t7() {
        // k_T7 = k_ini * k_f * CopyN * k_PR / k_b = 0.013 at defaults
        let params = T7Parameters::default();
        assert!(
            (params.k_T7() - 0.013).abs() < 1e-12,
            "k_T7 should derive to 0.013, got {}",
            params.k_T7()
        );
    }

    #[test]
    fn test_unrepressed_gfp_steady_state() {
        let params = GfpParameters::default();
        let ss = params.unrepressed_steady_state();
        assert!(
            (ss - 75000.0).abs() < 1e-6,
            "Unrepressed GFP steady state should be 75000, got {}",
            ss
        );
    }

    #[test]
    fn test_degradation_rates_match_steady_states() {
        let hrp_r = HrpRParameters::default();
        assert!((hrp_r.k_R / hrp_r.Sigma_R - 1970.0).abs() < 1e-6);

        let hrp_s = HrpSParameters::default();
        assert!((hrp_s.k_S / hrp_s.Sigma_S - 1.3e4).abs() < 1e-6);
    }

    #[test]
    fn test_serialization() {
        let params = Parameters::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let parsed: Parameters = serde_json::from_str(&json).unwrap();
        assert!((parsed.t7.k_T7() - params.t7.k_T7()).abs() < 1e-15);
        assert!((parsed.gfp.n_C - params.gfp.n_C).abs() < 1e-15);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let params = Parameters::load_or_default_from("/nonexistent/circuit.json");
        assert!((params.signal.k1 - 0.005).abs() < 1e-12);
    }
}

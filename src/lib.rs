//! Gene Circuit Sim - synthetic-biology gene-circuit ODE simulation
//!
//! Simulates an AHL/arabinose-inducible gene circuit: the HrpR and HrpS
//! regulators form an AND gate driving a self-amplifying T7 polymerase
//! stage, which produces the CI repressor, which in turn shuts down GFP
//! expression. Seven coupled ODEs are integrated with an adaptive
//! Dormand-Prince solver and rendered as a dual-axis time-series chart.

// Allow non-snake-case for model-symbol field names (k_R, K_RL, Sigma_G, ...).
// This follows the project convention of naming parameters after the
// symbols used in the rate equations.
#![allow(non_snake_case)]

pub mod circuit;
pub mod config;
pub mod export;
pub mod render;
pub mod solver;

pub use circuit::{GeneCircuit, SpeciesIndices, N_SPECIES, SPECIES_NAMES};
pub use config::Parameters;
pub use render::RenderConfig;
pub use solver::{linspace, AdaptiveRk45, SolverConfig, SolverError, Trajectory};

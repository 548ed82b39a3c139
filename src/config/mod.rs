//! Configuration module for loading circuit and simulation parameters.
//!
//! All rate constants are named after the symbols in the rate equations.

mod parameters;

pub use parameters::{
    ClParameters, GfpParameters, HrpRParameters, HrpSParameters, Parameters,
    SignalParameters, SimulationParameters, T7Parameters,
};

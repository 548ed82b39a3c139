//! Export of simulated trajectories to machine-readable formats.

mod csv_export;

pub use csv_export::{write_trajectory_csv, write_trajectory_csv_timestamped, TimeSeriesRecord};

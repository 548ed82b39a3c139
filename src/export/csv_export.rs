//! CSV time-series export for simulated trajectories.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::circuit::SpeciesIndices;
use crate::solver::Trajectory;

/// One trajectory sample for CSV export
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesRecord {
    /// Simulation time (seconds)
    pub time_sec: f64,
    /// AHL concentration
    pub AHL: f64,
    /// Arabinose concentration
    pub Arab: f64,
    /// HrpR concentration
    pub HrpR: f64,
    /// HrpS concentration
    pub HrpS: f64,
    /// T7 polymerase concentration
    pub T7: f64,
    /// CI repressor concentration
    pub Cl: f64,
    /// GFP expression level
    pub GFP: f64,
}

impl TimeSeriesRecord {
    fn from_sample(t: f64, y: &[f64], indices: &SpeciesIndices) -> Self {
        Self {
            time_sec: t,
            AHL: y[indices.ahl],
            Arab: y[indices.arab],
            HrpR: y[indices.hrp_r],
            HrpS: y[indices.hrp_s],
            T7: y[indices.t7],
            Cl: y[indices.cl],
            GFP: y[indices.gfp],
        }
    }
}

/// Write the full trajectory to a CSV file at the given path
pub fn write_trajectory_csv(
    trajectory: &Trajectory,
    indices: &SpeciesIndices,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for (i, &t) in trajectory.times().iter().enumerate() {
        let record = TimeSeriesRecord::from_sample(t, trajectory.state(i), indices);
        writer.serialize(&record)?;
    }
    writer.flush()?;

    log::info!(
        "CSV export written: {} ({} samples)",
        path.display(),
        trajectory.len()
    );
    Ok(())
}

/// Write the trajectory to `exports/trajectory_<timestamp>.csv`
///
/// Creates the exports directory if it doesn't exist and returns the path
/// of the written file.
pub fn write_trajectory_csv_timestamped(
    trajectory: &Trajectory,
    indices: &SpeciesIndices,
) -> Result<PathBuf> {
    let dir = PathBuf::from("exports");
    std::fs::create_dir_all(&dir)?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("trajectory_{}.csv", timestamp));
    write_trajectory_csv(trajectory, indices, &path)?;
    Ok(path)
}

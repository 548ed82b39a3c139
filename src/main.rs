//! Gene Circuit Sim - Entry point
//!
//! Simulates the AHL/arabinose-inducible HrpR/HrpS AND-gate circuit and
//! renders the response as a dual-axis chart.
//!
//! CLI Usage:
//!   cargo run --release                        # Default run, chart to circuit.png
//!   cargo run --release -- --arab 10.0         # Induce the AND gate
//!   cargo run --release -- -e 600 -n 200 --csv # Shorter run with CSV export

use std::path::PathBuf;

use anyhow::Result;
use gene_circuit_sim::{
    circuit::GeneCircuit,
    config::Parameters,
    export::write_trajectory_csv_timestamped,
    render::{render_chart, RenderConfig},
    solver::{linspace, AdaptiveRk45, SolverConfig},
};

/// Command-line options
struct Options {
    end_time_sec: Option<f64>,
    n_samples: Option<usize>,
    arab_dose: Option<f64>,
    params_path: Option<PathBuf>,
    out_path: PathBuf,
    export_csv: bool,
}

/// Parse CLI arguments
fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = Options {
        end_time_sec: None,
        n_samples: None,
        arab_dose: None,
        params_path: None,
        out_path: PathBuf::from("circuit.png"),
        export_csv: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-e" | "--end-time" => {
                i += 1;
                if i < args.len() {
                    opts.end_time_sec = args[i].parse().ok();
                }
            }
            "-n" | "--samples" => {
                i += 1;
                if i < args.len() {
                    opts.n_samples = args[i].parse().ok();
                }
            }
            "--arab" => {
                i += 1;
                if i < args.len() {
                    opts.arab_dose = args[i].parse().ok();
                }
            }
            "--params" => {
                i += 1;
                if i < args.len() {
                    opts.params_path = Some(PathBuf::from(&args[i]));
                }
            }
            "-o" | "--out" => {
                i += 1;
                if i < args.len() {
                    opts.out_path = PathBuf::from(&args[i]);
                }
            }
            "--csv" => opts.export_csv = true,
            "--help" | "-h" => {
                println!("Gene Circuit Sim");
                println!();
                println!("Usage: gene-circuit-sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -e, --end-time T   Simulation end time in seconds (default: 3000)");
                println!("  -n, --samples N    Number of output samples (default: 1000)");
                println!("      --arab DOSE    Arabinose dose at t=0 (default: 0, gate stays closed)");
                println!("      --params FILE  Circuit parameters JSON file");
                println!("  -o, --out FILE     Output chart path (default: circuit.png)");
                println!("      --csv          Also export the trajectory as CSV");
                println!("  -h, --help         Show this help");
                std::process::exit(0);
            }
            other => {
                log::warn!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    opts
}

fn main() -> Result<()> {
    env_logger::init();

    let opts = parse_args();

    // Load parameters, then apply CLI overrides
    let mut params = match &opts.params_path {
        Some(path) => Parameters::load_or_default_from(path),
        None => Parameters::load_or_default(),
    };
    if let Some(end_time) = opts.end_time_sec {
        params.simulation.end_time_sec = end_time;
    }
    if let Some(n) = opts.n_samples {
        params.simulation.n_samples = n;
    }
    if let Some(dose) = opts.arab_dose {
        params.signal.init_Arab = dose;
    }

    log::info!(
        "Simulating {} s, {} samples (AHL dose {}, Arab dose {})",
        params.simulation.end_time_sec,
        params.simulation.n_samples,
        params.signal.init_AHL,
        params.signal.init_Arab
    );

    let times = linspace(
        0.0,
        params.simulation.end_time_sec,
        params.simulation.n_samples,
    );
    let circuit = GeneCircuit::new(params);
    let y0 = circuit.initial_state();

    let mut solver = AdaptiveRk45::new(y0.len(), SolverConfig::default());
    let trajectory = solver.solve_series(|y, dydt| circuit.derivatives(y, dydt), &y0, &times)?;

    let last = trajectory.state(trajectory.len() - 1);
    log::info!(
        "Integration done in {} steps: HrpR {:.1}, HrpS {:.1}, T7 {:.3}, GFP {:.0}",
        solver.step_count,
        last[circuit.indices.hrp_r],
        last[circuit.indices.hrp_s],
        last[circuit.indices.t7],
        last[circuit.indices.gfp]
    );

    render_chart(
        &trajectory,
        &circuit.indices,
        &RenderConfig::default(),
        &opts.out_path,
    )?;

    if opts.export_csv {
        let csv_path = write_trajectory_csv_timestamped(&trajectory, &circuit.indices)?;
        log::info!("Trajectory CSV: {}", csv_path.display());
    }

    Ok(())
}

//! Dual-axis time-series chart of a simulated trajectory.
//!
//! Reproduces the model's standard figure: the six circuit species share
//! the left concentration axis, while GFP gets its own right axis because
//! its expression level sits two orders of magnitude above everything
//! else. Output is a PNG via the plotters bitmap backend.

use std::path::Path;

use anyhow::Result;
use plotters::prelude::*;

use crate::circuit::{SpeciesIndices, SPECIES_NAMES};
use crate::solver::Trajectory;

/// Chart layout and axis settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Left axis upper bound (concentrations)
    pub primary_y_max: f64,
    /// Right axis upper bound (GFP expression level)
    pub secondary_y_max: f64,
    /// Chart caption
    pub caption: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 1000,
            primary_y_max: 2100.0,
            secondary_y_max: 90000.0,
            caption: "Gene circuit response".to_string(),
        }
    }
}

// Series colors roughly matching the model's reference figure
const AHL_COLOR: RGBColor = RGBColor(188, 189, 34);
const ARAB_COLOR: RGBColor = RGBColor(31, 119, 180);
const HRP_R_COLOR: RGBColor = RGBColor(255, 127, 14);
const HRP_S_COLOR: RGBColor = RGBColor(227, 119, 194);
const T7_COLOR: RGBColor = BLUE;
const CL_COLOR: RGBColor = RGBColor(127, 127, 127);
const GFP_COLOR: RGBColor = RGBColor(0, 128, 0);

/// Render the trajectory to a PNG file
///
/// Left axis: AHL, Arab, HrpR, HrpS, T7, Cl over [0, primary_y_max].
/// Right axis: GFP alone over [0, secondary_y_max]. Both axes span
/// [0, end_time] in x.
pub fn render_chart(
    trajectory: &Trajectory,
    indices: &SpeciesIndices,
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    let end_time = trajectory.end_time();

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.caption, ("sans-serif", 32))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .right_y_label_area_size(90)
        .build_cartesian_2d(0.0..end_time, 0.0..config.primary_y_max)?
        .set_secondary_coord(0.0..end_time, 0.0..config.secondary_y_max);

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Concentration")
        .x_labels(10)
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("GFP expression level")
        .draw()?;

    // Heavy strokes for the inducer inputs, lighter translucent strokes
    // for the internal species, matching the reference figure
    let primary: [(usize, RGBAColor, u32); 6] = [
        (indices.ahl, AHL_COLOR.mix(1.0), 5),
        (indices.arab, ARAB_COLOR.mix(1.0), 5),
        (indices.hrp_r, HRP_R_COLOR.mix(0.4), 3),
        (indices.hrp_s, HRP_S_COLOR.mix(0.4), 3),
        (indices.t7, T7_COLOR.mix(0.4), 3),
        (indices.cl, CL_COLOR.mix(0.4), 3),
    ];

    for (species, color, width) in primary {
        chart
            .draw_series(LineSeries::new(
                trajectory.series(species),
                color.stroke_width(width),
            ))?
            .label(SPECIES_NAMES[species])
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width))
            });
    }

    chart
        .draw_secondary_series(LineSeries::new(
            trajectory.series(indices.gfp),
            GFP_COLOR.stroke_width(5),
        ))?
        .label(SPECIES_NAMES[indices.gfp])
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GFP_COLOR.stroke_width(5)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    log::info!("Chart written to {}", path.display());
    Ok(())
}

//! SVG charts rendered with Plotters.
//!
//! One chart per series plus a combined chart, all on the same
//! "% of base year" scale.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::dashboard::Dashboard;
use crate::domain::SeriesId;
use crate::error::AppError;

// Navy, blue, light blue, red: assigned by column position.
const PALETTE: [RGBColor; 4] = [
    RGBColor(0, 0, 128),
    RGBColor(0, 0, 255),
    RGBColor(135, 190, 230),
    RGBColor(220, 20, 20),
];

const SIZE: (u32, u32) = (1000, 600);

/// A render-only description of one chart.
struct ChartSpec<'a> {
    title: String,
    y_desc: String,
    lines: Vec<(&'a str, Vec<(i32, f64)>)>,
}

/// Write `<id>_pct_<year>.svg` per series and `combined_pct_<year>.svg`.
pub fn write_dashboard_svgs(out_dir: &Path, dashboard: &Dashboard, base_year: i32) -> Result<Vec<PathBuf>, AppError> {
    let y_desc = format!("Percentage of {base_year} Value");
    let mut written = Vec::new();

    for entry in &dashboard.entries {
        let spec = ChartSpec {
            title: format!("{} Purchasing Power (% of {base_year})", entry.id.display_name()),
            y_desc: y_desc.clone(),
            lines: vec![(
                entry.id.display_name(),
                entry.rebased.points.iter().map(|p| (p.year, p.pct_of_baseline)).collect(),
            )],
        };
        let path = out_dir.join(format!("{}_pct_{base_year}.svg", entry.id.key()));
        render(&path, &spec)?;
        written.push(path);
    }

    let spec = ChartSpec {
        title: format!("Combined Purchasing Power (% of {base_year})"),
        y_desc,
        lines: dashboard
            .combined
            .columns
            .iter()
            .map(|id: &SeriesId| (id.display_name(), dashboard.combined.column(*id)))
            .collect(),
    };
    let path = out_dir.join(format!("combined_pct_{base_year}.svg"));
    render(&path, &spec)?;
    written.push(path);

    tracing::info!(dir = %out_dir.display(), charts = written.len(), "charts rendered");
    Ok(written)
}

fn render(path: &Path, spec: &ChartSpec<'_>) -> Result<(), AppError> {
    draw(path, spec)
        .map_err(|e| AppError::new(4, format!("Failed to render chart '{}': {e}", path.display())))
}

fn draw(path: &Path, spec: &ChartSpec<'_>) -> Result<(), Box<dyn Error>> {
    let (x0, x1) = x_bounds(spec).unwrap_or((0, 1));
    let (y0, y1) = y_bounds(spec).unwrap_or((0.0, 200.0));

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(spec.y_desc.as_str())
        .x_label_formatter(&|v| v.to_string())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .draw()?;

    for (idx, (label, points)) in spec.lines.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    if spec.lines.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn x_bounds(spec: &ChartSpec<'_>) -> Option<(i32, i32)> {
    let years = spec.lines.iter().flat_map(|(_, pts)| pts.iter().map(|(y, _)| *y));
    let (min, max) = years.fold(None, |acc: Option<(i32, i32)>, y| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    })?;
    Some(if max > min { (min, max) } else { (min, min + 1) })
}

fn y_bounds(spec: &ChartSpec<'_>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(_, v) in spec.lines.iter().flat_map(|(_, pts)| pts.iter()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    let pad = ((max - min) * 0.05).max(1.0);
    Some((min - pad, max + pad))
}

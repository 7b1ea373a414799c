//! Persist dashboard tables to CSV and JSON.
//!
//! The CSVs are meant to be easy to consume in spreadsheets or downstream
//! scripts; `dashboard.json` is the portable form reloaded by `ppd show`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::dashboard::{Dashboard, DashboardEntry};
use crate::error::AppError;

/// Write every table of `dashboard` into `out_dir` and return the files written.
pub fn export_dashboard(out_dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output directory '{}': {e}", out_dir.display()),
        )
    })?;

    let mut written = Vec::new();
    for entry in &dashboard.entries {
        if entry.segments > 1 {
            let path = out_dir.join(format!("merged_{}.csv", entry.id.key()));
            write_merged_csv(&path, entry)?;
            written.push(path);
        }

        let path = out_dir.join(format!("summary_{}.csv", entry.id.key()));
        write_summary_csv(&path, entry)?;
        written.push(path);

        let path = out_dir.join(format!("rebased_{}.csv", entry.id.key()));
        write_rebased_csv(&path, entry)?;
        written.push(path);
    }

    let path = out_dir.join("combined.csv");
    write_combined_csv(&path, dashboard)?;
    written.push(path);

    let path = out_dir.join("dashboard.json");
    write_dashboard_json(&path, dashboard)?;
    written.push(path);

    tracing::info!(dir = %out_dir.display(), files = written.len(), "tables exported");
    Ok(written)
}

/// Column name for the affordability value, e.g. `gallons_per_10k`.
pub fn affordability_column(entry: &DashboardEntry) -> String {
    format!("{}_per_{}", entry.id.unit_label(), amount_label(entry.spec.unit_amount))
}

fn amount_label(amount: f64) -> String {
    if amount >= 1000.0 && amount % 1000.0 == 0.0 {
        format!("{}k", amount / 1000.0)
    } else {
        format!("{amount}")
    }
}

/// Merged raw series (only written for multi-segment series).
pub fn write_merged_csv(path: &Path, entry: &DashboardEntry) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    write_row(&mut writer, ["date".to_string(), "value".to_string()])?;
    for p in entry.raw.points() {
        write_row(&mut writer, [p.date.to_string(), p.value.to_string()])?;
    }
    finish(writer)
}

/// `date, price, <unit>_per_<amount>` per raw observation.
pub fn write_summary_csv(path: &Path, entry: &DashboardEntry) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    write_row(
        &mut writer,
        ["date".to_string(), "price".to_string(), affordability_column(entry)],
    )?;
    for p in &entry.affordability.points {
        write_row(
            &mut writer,
            [p.date.to_string(), p.price.to_string(), format!("{:.10}", p.value)],
        )?;
    }
    finish(writer)
}

/// `year, date, value, pct_of_baseline` per annual point.
pub fn write_rebased_csv(path: &Path, entry: &DashboardEntry) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    write_row(
        &mut writer,
        [
            "year".to_string(),
            "date".to_string(),
            "value".to_string(),
            "pct_of_baseline".to_string(),
        ],
    )?;
    for p in &entry.rebased.points {
        write_row(
            &mut writer,
            [
                p.year.to_string(),
                p.date.to_string(),
                format!("{:.10}", p.value),
                format!("{:.4}", p.pct_of_baseline),
            ],
        )?;
    }
    finish(writer)
}

/// `year, <label>...`; absent cells are left empty.
pub fn write_combined_csv(path: &Path, dashboard: &Dashboard) -> Result<(), AppError> {
    let mut writer = csv_writer(path)?;
    let header: Vec<String> = std::iter::once("year".to_string())
        .chain(dashboard.combined.columns.iter().map(|id| id.display_name().to_string()))
        .collect();
    write_row(&mut writer, header)?;

    for row in &dashboard.combined.rows {
        let record: Vec<String> = std::iter::once(row.year.to_string())
            .chain(
                row.values
                    .iter()
                    .map(|v| v.map(|v| format!("{v:.4}")).unwrap_or_default()),
            )
            .collect();
        write_row(&mut writer, record)?;
    }
    finish(writer)
}

pub fn write_dashboard_json(path: &Path, dashboard: &Dashboard) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create dashboard JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, dashboard)
        .map_err(|e| AppError::new(2, format!("Failed to write dashboard JSON: {e}")))?;
    Ok(())
}

pub fn read_dashboard_json(path: &Path) -> Result<Dashboard, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open dashboard JSON '{}': {e}", path.display())))?;
    let dashboard: Dashboard =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid dashboard JSON: {e}")))?;
    Ok(dashboard)
}

fn csv_writer(path: &Path) -> Result<csv::Writer<File>, AppError> {
    csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))
}

fn write_row<I, T>(writer: &mut csv::Writer<File>, record: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    writer
        .write_record(record)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))
}

fn finish(mut writer: csv::Writer<File>) -> Result<(), AppError> {
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

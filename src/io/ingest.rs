//! CSV ingest for raw price series.
//!
//! This module turns a heterogeneous source CSV (FRED exports, EIA gasoline
//! tables, The Economist's Big Mac files) into a clean `(date, value)` series.
//!
//! Design goals:
//! - **Minimal schema**: only the date and value columns (plus an optional
//!   entity filter column) must exist; missing columns fail the file (exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no transform logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{Series, SeriesId, TimePoint};
use crate::error::AppError;

/// Where and how to read one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub id: SeriesId,
    pub path: PathBuf,
    pub date_column: String,
    pub value_column: String,
    /// Explicit chrono format for the date column; `None` tries the built-in list.
    pub date_format: Option<String>,
    /// Keep only rows where `column == value` (case-insensitive).
    pub filter: Option<(String, String)>,
}

impl SourceFile {
    pub fn new(id: SeriesId, path: impl Into<PathBuf>, date_column: &str, value_column: &str) -> Self {
        Self {
            id,
            path: path.into(),
            date_column: date_column.to_string(),
            value_column: value_column.to_string(),
            date_format: None,
            filter: None,
        }
    }

    pub fn with_date_format(mut self, fmt: &str) -> Self {
        self.date_format = Some(fmt.to_string());
        self
    }

    pub fn with_filter(mut self, column: &str, value: &str) -> Self {
        self.filter = Some((column.to_string(), value.to_string()));
        self
    }
}

/// The file layout of the public data downloads, relative to `data_dir`.
///
/// Order matters: it is the default processing order, and for the Big Mac
/// series the historical file comes before the current one so current values
/// win on shared dates.
pub fn default_sources(data_dir: &Path) -> Vec<SourceFile> {
    vec![
        SourceFile::new(SeriesId::Cpi, data_dir.join("CPIAUCSL.csv"), "observation_date", "CPIAUCSL"),
        SourceFile::new(SeriesId::MedianHome, data_dir.join("MSPUS.csv"), "observation_date", "MSPUS"),
        SourceFile::new(
            SeriesId::Gasoline,
            data_dir.join("Gas-Prices-Per-Gallon-All-Grades.csv"),
            "Date",
            "U.S. All Grades All Formulations Retail Gasoline Prices (Dollars per Gallon)",
        )
        .with_date_format("%b-%Y"),
        SourceFile::new(
            SeriesId::Bigmac,
            data_dir.join("big-mac-historical-source-data.csv"),
            "date",
            "local_price",
        )
        .with_filter("iso_a3", "USA"),
        SourceFile::new(SeriesId::Bigmac, data_dir.join("big-mac-source-data-v2.csv"), "date", "local_price")
            .with_filter("iso_a3", "USA"),
    ]
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the series plus bookkeeping about skipped rows.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub id: SeriesId,
    pub path: PathBuf,
    pub series: Series,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    /// Rows excluded by the entity filter.
    pub rows_filtered: usize,
    /// Rows with an empty or `.` value (FRED's missing marker).
    pub rows_missing: usize,
}

/// Load one source file.
pub fn load_series(source: &SourceFile) -> Result<LoadedSeries, AppError> {
    let file = File::open(&source.path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open CSV '{}': {e}", source.path.display()),
        )
    })?;
    read_series(file, source)
}

/// Parse a series from any CSV reader (used by `load_series` and tests).
pub fn read_series<R: std::io::Read>(reader: R, source: &SourceFile) -> Result<LoadedSeries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    let date_idx = require_column(&header_map, &source.date_column, &source.path)?;
    let value_idx = require_column(&header_map, &source.value_column, &source.path)?;
    let filter = match &source.filter {
        Some((column, wanted)) => Some((require_column(&header_map, column, &source.path)?, wanted.as_str())),
        None => None,
    };

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_filtered = 0usize;
    let mut rows_missing = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if let Some((col, wanted)) = filter {
            let matches = record
                .get(col)
                .map(|v| v.trim().eq_ignore_ascii_case(wanted))
                .unwrap_or(false);
            if !matches {
                rows_filtered += 1;
                continue;
            }
        }

        let raw_value = record.get(value_idx).map(str::trim).unwrap_or("");
        if raw_value.is_empty() || raw_value == "." {
            rows_missing += 1;
            continue;
        }

        match parse_row(&record, date_idx, raw_value, source.date_format.as_deref()) {
            Ok(point) => points.push(point),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let series = Series::from_points(points);
    tracing::debug!(
        series = %source.id,
        path = %source.path.display(),
        rows_read,
        rows_filtered,
        rows_missing,
        row_errors = row_errors.len(),
        points = series.len(),
        "csv ingested"
    );

    Ok(LoadedSeries {
        id: source.id,
        path: source.path.clone(),
        series,
        row_errors,
        rows_read,
        rows_filtered,
        rows_missing,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn require_column(header_map: &HashMap<String, usize>, name: &str, path: &Path) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| {
            AppError::new(
                2,
                format!("Missing required column `{name}` in '{}'", path.display()),
            )
        })
}

fn parse_row(
    record: &StringRecord,
    date_idx: usize,
    raw_value: &str,
    date_format: Option<&str>,
) -> Result<TimePoint, String> {
    let raw_date = record
        .get(date_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "Missing date value.".to_string())?;

    let date = match date_format {
        Some(fmt) => parse_date_with(raw_date, fmt)?,
        None => parse_date(raw_date)?,
    };

    let value = raw_value
        .parse::<f64>()
        .map_err(|_| format!("Invalid value '{raw_value}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite value '{raw_value}'."));
    }

    Ok(TimePoint::new(date, value))
}

/// Parse with one explicit format, accepting month-only formats (day = 1).
fn parse_date_with(s: &str, fmt: &str) -> Result<NaiveDate, String> {
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Ok(d);
    }
    // chrono refuses to build a date without a day; supply one.
    if let Ok(d) = NaiveDate::parse_from_str(&format!("01-{s}"), &format!("%d-{fmt}")) {
        return Ok(d);
    }
    Err(format!("Invalid date '{s}'. Expected format `{fmt}`."))
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the norm, but the Big Mac files carry timestamps and some
    // exports use slashes. We accept a small set of common formats to reduce
    // friction while keeping parsing deterministic.
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    // Timezone-aware stamps are reduced to their local calendar date.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(d) = parse_date_with(s, "%b-%Y") {
        return Ok(d);
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, DD/MM/YYYY, YYYY/MM/DD, YYYY-MM-DD HH:MM:SS, RFC 3339, Mon-YYYY."
    ))
}

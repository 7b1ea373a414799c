//! Command-line parsing for the purchasing power dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_BASE_YEAR, ResamplePolicy, SeriesId};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ppd", version, about = "Purchasing Power Dashboard (CPI, homes, gasoline, Big Mac)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the source CSVs, build the dashboard, print it, and export tables/charts.
    Build(BuildArgs),
    /// Print a previously exported `dashboard.json`.
    Show(ShowArgs),
}

/// Options for building a dashboard.
#[derive(Debug, Parser, Clone)]
pub struct BuildArgs {
    /// Directory holding the source CSV files.
    #[arg(long, env = "PPD_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for exported tables and charts (created if missing).
    #[arg(long, env = "PPD_OUT_DIR", default_value = "outputs")]
    pub out_dir: PathBuf,

    /// Base year: the rebasing cutoff is January 1 of this year.
    #[arg(long, default_value_t = DEFAULT_BASE_YEAR)]
    pub base_year: i32,

    /// Explicit cutoff date (YYYY-MM-DD); overrides `--base-year`.
    #[arg(long, value_parser = parse_cutoff)]
    pub cutoff: Option<NaiveDate>,

    /// Restrict to these series, processed in the given order (repeatable).
    #[arg(long = "series", value_enum)]
    pub series: Vec<SeriesId>,

    /// Override a unit amount, e.g. `gasoline=100` (repeatable).
    #[arg(long = "unit-amount", value_name = "ID=AMOUNT", value_parser = parse_unit_amount)]
    pub unit_amounts: Vec<(SeriesId, f64)>,

    /// Override a resampling policy, e.g. `bigmac=last` (repeatable).
    #[arg(long = "policy", value_name = "ID=mean|last", value_parser = parse_policy)]
    pub policies: Vec<(SeriesId, ResamplePolicy)>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Skip writing CSV/JSON tables.
    #[arg(long)]
    pub no_export: bool,

    /// Also render SVG charts into the output directory.
    #[arg(long)]
    pub svg: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for showing a saved dashboard.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Dashboard JSON file produced by `ppd build`.
    #[arg(long, value_name = "JSON", default_value = "outputs/dashboard.json")]
    pub dashboard: PathBuf,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

fn parse_cutoff(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

fn split_override(s: &str) -> Result<(SeriesId, &str), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{s}'"))?;
    let id = SeriesId::from_key(key).ok_or_else(|| format!("unknown series '{key}'"))?;
    Ok((id, value.trim()))
}

fn parse_unit_amount(s: &str) -> Result<(SeriesId, f64), String> {
    let (id, value) = split_override(s)?;
    let amount = value
        .parse::<f64>()
        .map_err(|_| format!("invalid amount '{value}'"))?;
    if !(amount.is_finite() && amount > 0.0) {
        return Err(format!("unit amount must be positive, got {amount}"));
    }
    Ok((id, amount))
}

fn parse_policy(s: &str) -> Result<(SeriesId, ResamplePolicy), String> {
    let (id, value) = split_override(s)?;
    let policy = match value.to_ascii_lowercase().as_str() {
        "mean" => ResamplePolicy::Mean,
        "last" => ResamplePolicy::Last,
        other => return Err(format!("unknown policy '{other}' (expected mean or last)")),
    };
    Ok((id, policy))
}

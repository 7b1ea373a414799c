use std::fs;
use std::path::Path;

use purchasing_power::app::pipeline::{run_dashboard, run_dashboard_with_sources};
use purchasing_power::domain::{DashboardConfig, SeriesId};
use purchasing_power::io::export::{export_dashboard, read_dashboard_json};
use purchasing_power::io::ingest::SourceFile;
use purchasing_power::plot::write_dashboard_svgs;
use serde_json::Value;
use tempfile::TempDir;

const GAS_COLUMN: &str = "U.S. All Grades All Formulations Retail Gasoline Prices (Dollars per Gallon)";

fn write_cpi(dir: &Path) {
    fs::write(
        dir.join("CPIAUCSL.csv"),
        "observation_date,CPIAUCSL\n1994-12-01,149.0\n1995-01-01,150.0\n1995-07-01,152.0\n1996-01-01,155.0\n",
    )
    .unwrap();
}

fn write_gasoline(dir: &Path) {
    fs::write(
        dir.join("Gas-Prices-Per-Gallon-All-Grades.csv"),
        format!("Date,{GAS_COLUMN}\nJan-1995,1.25\nJun-1995,1.00\nJan-1996,1.20\n"),
    )
    .unwrap();
}

fn write_median_home(dir: &Path) {
    fs::write(
        dir.join("MSPUS.csv"),
        "observation_date,MSPUS\n1995-01-01,130000\n1995-10-01,133900\n1996-10-01,140000\n",
    )
    .unwrap();
}

fn write_bigmac(dir: &Path) {
    fs::write(
        dir.join("big-mac-historical-source-data.csv"),
        "name,iso_a3,local_price,date\n\
         United States,USA,2.32,1995-04-01\n\
         Canada,CAN,2.85,1995-04-01\n\
         United States,USA,2.36,1996-04-01\n",
    )
    .unwrap();
    fs::write(
        dir.join("big-mac-source-data-v2.csv"),
        "name,iso_a3,local_price,date\n\
         United States,USA,2.40,1996-04-01\n\
         United States,USA,2.50,1997-04-01\n",
    )
    .unwrap();
}

fn write_all(dir: &Path) {
    write_cpi(dir);
    write_median_home(dir);
    write_gasoline(dir);
    write_bigmac(dir);
}

#[test]
fn full_dashboard_from_default_layout() {
    let data = TempDir::new().unwrap();
    write_all(data.path());

    let run = run_dashboard(data.path(), &DashboardConfig::default()).unwrap();
    let dashboard = &run.dashboard;

    assert!(run.missing.is_empty());
    assert_eq!(
        dashboard.combined.columns,
        vec![SeriesId::Cpi, SeriesId::MedianHome, SeriesId::Gasoline, SeriesId::Bigmac]
    );

    let bigmac = dashboard.entry(SeriesId::Bigmac).unwrap();
    assert_eq!(bigmac.segments, 2);
    let prices: Vec<f64> = bigmac.raw.points().iter().map(|p| p.value).collect();
    assert_eq!(prices, vec![2.32, 2.40, 2.50]);

    let gas = dashboard.entry(SeriesId::Gasoline).unwrap();
    assert!((gas.annual.value_for(1995).unwrap() - 9000.0).abs() < 1e-9);
    let expected_1996 = (10_000.0 / 1.20) / 9000.0 * 100.0;
    assert!((gas.rebased.pct_for(1996).unwrap() - expected_1996).abs() < 1e-9);

    // The December 1994 CPI point is outside the window.
    let cpi = dashboard.entry(SeriesId::Cpi).unwrap();
    assert_eq!(cpi.annual.years().collect::<Vec<_>>(), vec![1995, 1996]);
    assert_eq!(cpi.affordability.len(), 4);

    let home = dashboard.entry(SeriesId::MedianHome).unwrap();
    assert_eq!(home.rebased.baseline_date.to_string(), "1995-10-01");

    let last = dashboard.combined.rows.last().unwrap();
    assert_eq!(last.year, 1997);
    assert_eq!(last.values[..3], [None, None, None]);
    assert!(last.values[3].is_some());
}

#[test]
fn only_cpi_and_gasoline_present() {
    let data = TempDir::new().unwrap();
    write_cpi(data.path());
    write_gasoline(data.path());

    let run = run_dashboard(data.path(), &DashboardConfig::default()).unwrap();

    assert_eq!(run.dashboard.len(), 2);
    assert_eq!(run.dashboard.combined.columns.len(), 2);
    assert!(run.dashboard.combined.rows.iter().all(|r| r.values.len() == 2));
    assert_eq!(run.missing.len(), 3);
}

#[test]
fn configured_order_drives_column_order() {
    let data = TempDir::new().unwrap();
    write_all(data.path());

    let mut config = DashboardConfig::default();
    config.series = vec![SeriesId::Gasoline, SeriesId::Cpi, SeriesId::MedianHome];

    let run = run_dashboard(data.path(), &config).unwrap();
    assert_eq!(
        run.dashboard.combined.columns,
        vec![SeriesId::Gasoline, SeriesId::Cpi, SeriesId::MedianHome]
    );
}

#[test]
fn no_data_at_all_is_exit_code_3() {
    let data = TempDir::new().unwrap();
    let err = run_dashboard(data.path(), &DashboardConfig::default()).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn missing_value_column_fails_the_run() {
    let data = TempDir::new().unwrap();
    let path = data.path().join("cpi.csv");
    fs::write(&path, "observation_date,VALUE\n2000-01-01,170.0\n").unwrap();

    let sources = vec![SourceFile::new(SeriesId::Cpi, &path, "observation_date", "CPIAUCSL")];
    let err = run_dashboard_with_sources(&sources, &DashboardConfig::default()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn exports_tables_and_json() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_all(data.path());

    let run = run_dashboard(data.path(), &DashboardConfig::default()).unwrap();
    let files = export_dashboard(out.path(), &run.dashboard).unwrap();

    for name in [
        "merged_bigmac.csv",
        "summary_gasoline.csv",
        "rebased_median_home.csv",
        "combined.csv",
        "dashboard.json",
    ] {
        assert!(files.contains(&out.path().join(name)), "missing {name}");
    }
    assert!(!out.path().join("merged_cpi.csv").exists());

    let summary = fs::read_to_string(out.path().join("summary_gasoline.csv")).unwrap();
    let mut lines = summary.lines();
    assert_eq!(lines.next(), Some("date,price,gallons_per_10k"));
    assert_eq!(lines.next(), Some("1995-01-01,1.25,8000.0000000000"));

    let combined = fs::read_to_string(out.path().join("combined.csv")).unwrap();
    let lines: Vec<&str> = combined.lines().collect();
    assert_eq!(lines[0], "year,Inverted CPI,Median Home,Gasoline,Big Mac");
    assert_eq!(lines[1], "1995,100.0000,100.0000,100.0000,100.0000");
    assert!(lines[3].starts_with("1997,,,,"));

    let v: Value = serde_json::from_slice(&fs::read(out.path().join("dashboard.json")).unwrap()).unwrap();
    assert_eq!(v["cutoff"], "1995-01-01");
    assert_eq!(v["combined"]["columns"][0], "cpi");
    assert_eq!(v["entries"][1]["spec"]["policy"], "last");

    let reloaded = read_dashboard_json(&out.path().join("dashboard.json")).unwrap();
    assert_eq!(reloaded.combined.columns, run.dashboard.combined.columns);
    assert_eq!(reloaded.combined.rows.len(), run.dashboard.combined.rows.len());
}

#[test]
fn renders_svg_charts() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_cpi(data.path());
    write_gasoline(data.path());

    let run = run_dashboard(data.path(), &DashboardConfig::default()).unwrap();
    let files = write_dashboard_svgs(out.path(), &run.dashboard, 1995).unwrap();

    assert_eq!(files.len(), 3);
    let combined = fs::read_to_string(out.path().join("combined_pct_1995.svg")).unwrap();
    assert!(combined.contains("<svg"));
    assert!(out.path().join("gasoline_pct_1995.svg").exists());
}

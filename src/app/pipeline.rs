//! Shared "dashboard pipeline" logic used by the CLI and integration tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> source set -> build dashboard
//!
//! Front-ends can then focus on presentation (printing vs files).

use std::path::{Path, PathBuf};

use crate::dashboard::{Dashboard, SourceSet, TracingReporter, build_dashboard};
use crate::domain::{DashboardConfig, SeriesId};
use crate::error::AppError;
use crate::io::ingest::{LoadedSeries, SourceFile, default_sources, load_series};

/// All computed outputs of a single `ppd build` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub loaded: Vec<LoadedSeries>,
    /// Source files that did not exist (their series may be absent).
    pub missing: Vec<PathBuf>,
    pub dashboard: Dashboard,
}

/// Execute the full pipeline against the default file layout under `data_dir`.
pub fn run_dashboard(data_dir: &Path, config: &DashboardConfig) -> Result<RunOutput, AppError> {
    run_dashboard_with_sources(&default_sources(data_dir), config)
}

/// Execute the pipeline with an explicit list of source files.
pub fn run_dashboard_with_sources(sources: &[SourceFile], config: &DashboardConfig) -> Result<RunOutput, AppError> {
    let (source_set, loaded, missing) = load_sources(sources, config)?;

    let mut reporter = TracingReporter;
    let dashboard = build_dashboard(source_set, config, &mut reporter)?;

    Ok(RunOutput {
        loaded,
        missing,
        dashboard,
    })
}

/// Load every enabled source file into a `SourceSet`.
///
/// Files are visited in the configured series order (or declaration order when
/// no subset is configured); a missing file is logged and skipped.
pub fn load_sources(
    sources: &[SourceFile],
    config: &DashboardConfig,
) -> Result<(SourceSet, Vec<LoadedSeries>, Vec<PathBuf>), AppError> {
    let order: Vec<SeriesId> = if config.series.is_empty() {
        let mut ids = Vec::new();
        for s in sources {
            if !ids.contains(&s.id) {
                ids.push(s.id);
            }
        }
        ids
    } else {
        config.series.clone()
    };

    let mut set = SourceSet::new();
    let mut loaded = Vec::new();
    let mut missing = Vec::new();

    for id in order {
        for source in sources.iter().filter(|s| s.id == id) {
            if !source.path.exists() {
                tracing::warn!(series = %id, path = %source.path.display(), "source file not found");
                missing.push(source.path.clone());
                continue;
            }

            let series = load_series(source)?;
            for err in &series.row_errors {
                tracing::warn!(
                    series = %id,
                    path = %source.path.display(),
                    line = err.line,
                    "{}",
                    err.message
                );
            }
            tracing::info!(
                series = %id,
                path = %source.path.display(),
                points = series.series.len(),
                "source loaded"
            );

            set.push(id, series.series.clone());
            loaded.push(series);
        }
    }

    Ok((set, loaded, missing))
}

//! Per-series pipeline orchestration.
//!
//! For every configured series present in the input, in input order:
//! merge segments -> affordability -> cutoff filter -> annual resample -> rebase.
//!
//! A failing series is reported and left out; the run only fails when nothing
//! survives.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dashboard::{CombinedTable, Reporter, SourceSet};
use crate::domain::{AffordabilitySeries, AnnualSeries, DashboardConfig, RebasedSeries, Series, SeriesId, SeriesSpec};
use crate::error::PipelineError;
use crate::series::{merge_segments, rebase, resample_annual, to_affordability};

/// Everything computed for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub id: SeriesId,
    pub spec: SeriesSpec,
    /// Number of source segments merged into `raw`.
    pub segments: usize,
    /// Merged raw prices, before any transform.
    pub raw: Series,
    pub affordability: AffordabilitySeries,
    pub annual: AnnualSeries,
    pub rebased: RebasedSeries,
}

/// A series that was present in the input but could not be built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSeries {
    pub id: SeriesId,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub cutoff: NaiveDate,
    /// Built series, in processing order.
    pub entries: Vec<DashboardEntry>,
    pub combined: CombinedTable,
    pub skipped: Vec<SkippedSeries>,
}

impl Dashboard {
    pub fn entry(&self, id: SeriesId) -> Option<&DashboardEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the dashboard from `sources`.
///
/// Series not enabled in `config` are ignored; series absent from `sources`
/// are simply not part of the result.
pub fn build_dashboard(
    sources: SourceSet,
    config: &DashboardConfig,
    reporter: &mut dyn Reporter,
) -> Result<Dashboard, PipelineError> {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for (id, segments) in sources.into_entries() {
        if !config.is_enabled(id) {
            continue;
        }
        match build_series(id, segments, config.specs.get(id), config.cutoff, reporter) {
            Ok(entry) => {
                reporter.series_built(id, entry.raw.len(), entry.annual.points.len());
                entries.push(entry);
            }
            Err(err) => {
                reporter.series_skipped(&err);
                skipped.push(SkippedSeries {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    if entries.is_empty() {
        return Err(PipelineError::NoSeriesAvailable);
    }

    let combined = CombinedTable::join(entries.iter().map(|e| (e.id, &e.rebased)));

    Ok(Dashboard {
        cutoff: config.cutoff,
        entries,
        combined,
        skipped,
    })
}

/// Run the full pipeline for one series.
pub fn build_series(
    id: SeriesId,
    segments: Vec<Series>,
    spec: SeriesSpec,
    cutoff: NaiveDate,
    reporter: &mut dyn Reporter,
) -> Result<DashboardEntry, PipelineError> {
    let segment_count = segments.len();
    let raw = merge_segments(id, segments)?;

    let transformed = to_affordability(id, &raw, spec.unit_amount);
    for err in &transformed.rejected {
        reporter.point_dropped(err);
    }

    let windowed = transformed.series.to_series().since(cutoff);
    let annual = resample_annual(&windowed, spec.policy);
    let rebased = rebase(id, &annual, cutoff)?;

    Ok(DashboardEntry {
        id,
        spec,
        segments: segment_count,
        raw,
        affordability: transformed.series,
        annual,
        rebased,
    })
}

//! Progress reporting for the dashboard builder.
//!
//! The builder never logs directly; it tells a `Reporter` what happened.
//! The CLI uses `TracingReporter`; tests can record events instead.

use crate::domain::SeriesId;
use crate::error::PipelineError;

pub trait Reporter {
    /// A series was built and added to the dashboard.
    fn series_built(&mut self, id: SeriesId, raw_points: usize, annual_points: usize);

    /// A single point was dropped during the affordability transform.
    fn point_dropped(&mut self, err: &PipelineError);

    /// A series was left out of the dashboard.
    fn series_skipped(&mut self, err: &PipelineError);
}

/// Forwards pipeline progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn series_built(&mut self, id: SeriesId, raw_points: usize, annual_points: usize) {
        tracing::info!(series = %id, raw_points, annual_points, "series built");
    }

    fn point_dropped(&mut self, err: &PipelineError) {
        tracing::debug!(error = %err, "point dropped");
    }

    fn series_skipped(&mut self, err: &PipelineError) {
        tracing::warn!(error = %err, "series skipped");
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub built: Vec<SeriesId>,
    pub dropped: Vec<PipelineError>,
    pub skipped: Vec<PipelineError>,
}

impl Reporter for RecordingReporter {
    fn series_built(&mut self, id: SeriesId, _raw_points: usize, _annual_points: usize) {
        self.built.push(id);
    }

    fn point_dropped(&mut self, err: &PipelineError) {
        self.dropped.push(err.clone());
    }

    fn series_skipped(&mut self, err: &PipelineError) {
        self.skipped.push(err.clone());
    }
}

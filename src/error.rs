use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::SeriesId;

/// Failures raised by the series pipeline.
///
/// All of these are deterministic functions of the input data; nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// No source produced any observation for this series.
    #[error("{series}: no data available from any source")]
    EmptyResult { series: SeriesId },

    /// The cutoff date falls after every annual observation.
    #[error("{series}: no observation on or after cutoff {cutoff}")]
    NoBaseline { series: SeriesId, cutoff: NaiveDate },

    /// The baseline value is exactly zero, so nothing can be expressed relative to it.
    #[error("{series}: baseline value at {date} is zero")]
    DegenerateBaseline { series: SeriesId, date: NaiveDate },

    /// A price of zero (or a non-finite price) cannot be inverted; the point is dropped.
    #[error("{series}: dropped point at {date} with price {price}")]
    InvalidPoint {
        series: SeriesId,
        date: NaiveDate,
        price: f64,
    },

    /// Every configured series failed or was absent.
    #[error("no series could be built for the dashboard")]
    NoSeriesAvailable,
}

impl PipelineError {
    pub fn series(&self) -> Option<SeriesId> {
        match self {
            PipelineError::EmptyResult { series }
            | PipelineError::NoBaseline { series, .. }
            | PipelineError::DegenerateBaseline { series, .. }
            | PipelineError::InvalidPoint { series, .. } => Some(*series),
            PipelineError::NoSeriesAvailable => None,
        }
    }
}

/// Application-level error: a message plus the process exit code.
///
/// Exit codes: 2 = input/IO problems, 3 = no usable series, 4 = render/export failures.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let exit_code = match err {
            PipelineError::NoSeriesAvailable => 3,
            _ => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

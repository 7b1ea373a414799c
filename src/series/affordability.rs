//! Price → affordability inversion.

use crate::domain::{AffordabilityPoint, AffordabilitySeries, Series, SeriesId};
use crate::error::PipelineError;

/// Output of the affordability transform: the surviving points plus the ones
/// that were dropped as gaps.
#[derive(Debug, Clone)]
pub struct AffordabilityOutput {
    pub series: AffordabilitySeries,
    /// One `PipelineError::InvalidPoint` per dropped point.
    pub rejected: Vec<PipelineError>,
}

/// Map every price `p` to `unit_amount / p`.
///
/// Points whose price is zero or non-finite cannot be inverted; they are dropped
/// and reported in `rejected` instead of failing the series.
pub fn to_affordability(series: SeriesId, raw: &Series, unit_amount: f64) -> AffordabilityOutput {
    let mut points = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for p in raw.points() {
        let value = unit_amount / p.value;
        if p.value == 0.0 || !p.value.is_finite() || !value.is_finite() {
            rejected.push(PipelineError::InvalidPoint {
                series,
                date: p.date,
                price: p.value,
            });
            continue;
        }
        points.push(AffordabilityPoint {
            date: p.date,
            price: p.value,
            value,
        });
    }

    AffordabilityOutput {
        series: AffordabilitySeries { unit_amount, points },
        rejected,
    }
}

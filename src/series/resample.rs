//! Annual resampling.
//!
//! Sources arrive monthly, quarterly, or at irregular intervals. Everything is
//! reduced to at most one point per calendar year so that series can be joined
//! on `year`. Years without observations produce no point.
//!
//! Representative dates:
//! - `Mean`: December 31 of the year (a year-end marker).
//! - `Last`: the literal date of the year's last observation.

use chrono::{Datelike, NaiveDate};

use crate::domain::{AnnualPoint, AnnualSeries, ResamplePolicy, Series, TimePoint};

/// Reduce `series` to one point per calendar year using `policy`.
pub fn resample_annual(series: &Series, policy: ResamplePolicy) -> AnnualSeries {
    let mut points = Vec::new();

    // Points are date-sorted, so each year is one contiguous run.
    let mut run: Vec<TimePoint> = Vec::new();
    for p in series.points() {
        if let Some(first) = run.first() {
            if first.date.year() != p.date.year() {
                points.extend(aggregate(&run, policy));
                run.clear();
            }
        }
        run.push(*p);
    }
    points.extend(aggregate(&run, policy));

    AnnualSeries { policy, points }
}

fn aggregate(run: &[TimePoint], policy: ResamplePolicy) -> Option<AnnualPoint> {
    let last = run.last()?;
    let year = last.date.year();
    match policy {
        ResamplePolicy::Mean => {
            let sum: f64 = run.iter().map(|p| p.value).sum();
            Some(AnnualPoint {
                year,
                date: year_end(year),
                value: sum / run.len() as f64,
            })
        }
        ResamplePolicy::Last => Some(AnnualPoint {
            year,
            date: last.date,
            value: last.value,
        }),
    }
}

fn year_end(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX)
}

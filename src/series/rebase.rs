//! Rebasing: express an annual series as a percentage of a baseline point.

use chrono::NaiveDate;

use crate::domain::{AnnualSeries, RebasedPoint, RebasedSeries, SeriesId};
use crate::error::PipelineError;

/// Rebase `annual` so that its first point dated on/after `cutoff` reads 100.
///
/// The baseline is searched over the whole series, and every point (including
/// any before the cutoff) gets a `pct_of_baseline`.
pub fn rebase(series: SeriesId, annual: &AnnualSeries, cutoff: NaiveDate) -> Result<RebasedSeries, PipelineError> {
    let baseline = annual
        .points
        .iter()
        .find(|p| p.date >= cutoff)
        .ok_or(PipelineError::NoBaseline { series, cutoff })?;

    if baseline.value == 0.0 {
        return Err(PipelineError::DegenerateBaseline {
            series,
            date: baseline.date,
        });
    }

    // `value / baseline` first: the baseline point divides to exactly 1.0 and
    // therefore lands on exactly 100.0.
    let points = annual
        .points
        .iter()
        .map(|p| RebasedPoint {
            year: p.year,
            date: p.date,
            value: p.value,
            pct_of_baseline: p.value / baseline.value * 100.0,
        })
        .collect();

    Ok(RebasedSeries {
        baseline_date: baseline.date,
        baseline_value: baseline.value,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnnualPoint, ResamplePolicy, Series, TimePoint};
    use crate::series::resample_annual;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn annual(values: &[(i32, f64)]) -> AnnualSeries {
        AnnualSeries {
            policy: ResamplePolicy::Mean,
            points: values
                .iter()
                .map(|&(year, value)| AnnualPoint {
                    year,
                    date: d(year, 12, 31),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn cpi_resampled_then_rebased() {
        let raw = Series::from_points([
            TimePoint::new(d(2020, 1, 1), 260.0),
            TimePoint::new(d(2020, 6, 1), 262.0),
            TimePoint::new(d(2021, 1, 1), 270.0),
        ]);
        let cutoff = d(2020, 1, 1);
        let yearly = resample_annual(&raw.since(cutoff), ResamplePolicy::Mean);
        let rebased = rebase(SeriesId::Cpi, &yearly, cutoff).unwrap();

        assert_eq!(rebased.baseline_value, 261.0);
        assert_eq!(rebased.points[0].pct_of_baseline, 100.0);
        assert!((rebased.points[1].pct_of_baseline - 270.0 / 261.0 * 100.0).abs() < 1e-9);
        assert!((rebased.points[1].pct_of_baseline - 103.45).abs() < 0.01);
    }

    #[test]
    fn points_before_cutoff_are_still_rebased() {
        let rebased = rebase(SeriesId::Gasoline, &annual(&[(1994, 50.0), (1995, 100.0), (1996, 125.0)]), d(1995, 1, 1))
            .unwrap();
        assert_eq!(rebased.baseline_date, d(1995, 12, 31));
        let pcts: Vec<f64> = rebased.points.iter().map(|p| p.pct_of_baseline).collect();
        assert_eq!(pcts, vec![50.0, 100.0, 125.0]);
    }

    #[test]
    fn cutoff_after_all_data_has_no_baseline() {
        let cutoff = d(2030, 1, 1);
        let err = rebase(SeriesId::Cpi, &annual(&[(2020, 1.0)]), cutoff).unwrap_err();
        assert_eq!(err, PipelineError::NoBaseline { series: SeriesId::Cpi, cutoff });
    }

    #[test]
    fn zero_baseline_is_degenerate() {
        let err = rebase(SeriesId::Bigmac, &annual(&[(2020, 0.0), (2021, 3.0)]), d(2020, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            PipelineError::DegenerateBaseline {
                series: SeriesId::Bigmac,
                date: d(2020, 12, 31),
            }
        );
    }

    proptest! {
        #[test]
        fn baseline_point_is_exactly_100(values in proptest::collection::vec(1e-6f64..1e9, 1..30), skip in 0usize..30) {
            let points: Vec<(i32, f64)> = values.iter().enumerate().map(|(i, &v)| (1990 + i as i32, v)).collect();
            let skip = skip % points.len();
            let cutoff = d(1990 + skip as i32, 1, 1);
            let rebased = rebase(SeriesId::Cpi, &annual(&points), cutoff).unwrap();
            let base = rebased.points.iter().find(|p| p.date == rebased.baseline_date).unwrap();
            prop_assert_eq!(base.pct_of_baseline, 100.0);
        }

        #[test]
        fn rebasing_is_scale_invariant(values in proptest::collection::vec(1e-3f64..1e6, 1..30), c in 1e-3f64..1e3) {
            let points: Vec<(i32, f64)> = values.iter().enumerate().map(|(i, &v)| (2000 + i as i32, v)).collect();
            let scaled: Vec<(i32, f64)> = points.iter().map(|&(y, v)| (y, v * c)).collect();
            let cutoff = d(2000, 1, 1);
            let a = rebase(SeriesId::Gasoline, &annual(&points), cutoff).unwrap();
            let b = rebase(SeriesId::Gasoline, &annual(&scaled), cutoff).unwrap();
            for (pa, pb) in a.points.iter().zip(&b.points) {
                prop_assert!((pa.pct_of_baseline - pb.pct_of_baseline).abs() <= 1e-9 * pa.pct_of_baseline.abs().max(1.0));
            }
        }
    }
}

//! Merge overlapping segments of the same logical series.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Series, SeriesId, TimePoint};
use crate::error::PipelineError;

/// Fold `segments` left-to-right into one date-keyed series.
///
/// A date present in several segments takes the value from the segment listed
/// last. Empty segments contribute nothing. Fails only if every segment is empty.
pub fn merge_segments<I>(series: SeriesId, segments: I) -> Result<Series, PipelineError>
where
    I: IntoIterator<Item = Series>,
{
    let merged = segments
        .into_iter()
        .fold(BTreeMap::<NaiveDate, f64>::new(), |mut acc, segment| {
            for p in segment.into_points() {
                acc.insert(p.date, p.value);
            }
            acc
        });

    if merged.is_empty() {
        return Err(PipelineError::EmptyResult { series });
    }

    Ok(Series::from_points(
        merged.into_iter().map(|(date, value)| TimePoint::new(date, value)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(points: &[(NaiveDate, f64)]) -> Series {
        Series::from_points(points.iter().map(|&(date, value)| TimePoint::new(date, value)))
    }

    #[test]
    fn later_segment_wins_on_shared_dates() {
        let historical = series(&[(d(2000, 4, 1), 2.24), (d(2001, 4, 1), 2.54)]);
        let current = series(&[(d(2001, 4, 1), 2.55), (d(2002, 4, 1), 2.49)]);

        let merged = merge_segments(SeriesId::Bigmac, [historical, current]).unwrap();
        let values: Vec<f64> = merged.points().iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.24, 2.55, 2.49]);
    }

    #[test]
    fn empty_segment_is_identity() {
        let a = series(&[(d(2010, 1, 1), 4.0), (d(2011, 1, 1), 4.2)]);
        let merged = merge_segments(SeriesId::Bigmac, [Series::default(), a.clone()]).unwrap();
        assert_eq!(merged, a);
    }

    #[test]
    fn all_empty_is_empty_result() {
        let err = merge_segments(SeriesId::Bigmac, [Series::default(), Series::default()]).unwrap_err();
        assert_eq!(err, PipelineError::EmptyResult { series: SeriesId::Bigmac });

        let err = merge_segments(SeriesId::Cpi, Vec::new()).unwrap_err();
        assert_eq!(err, PipelineError::EmptyResult { series: SeriesId::Cpi });
    }

    fn disjoint_pair() -> impl Strategy<Value = (Series, Series)> {
        proptest::collection::btree_map(0i64..5_000, 0.5f64..100.0, 1..40).prop_map(|map| {
            let base = d(1990, 1, 1);
            let mut a = Vec::new();
            let mut b = Vec::new();
            for (i, (offset, value)) in map.into_iter().enumerate() {
                let p = TimePoint::new(base + chrono::Duration::days(offset), value);
                if i % 2 == 0 { a.push(p) } else { b.push(p) }
            }
            (Series::from_points(a), Series::from_points(b))
        })
    }

    proptest! {
        #[test]
        fn merge_is_commutative_on_disjoint_dates((a, b) in disjoint_pair()) {
            let ab = merge_segments(SeriesId::Bigmac, [a.clone(), b.clone()]).unwrap();
            let ba = merge_segments(SeriesId::Bigmac, [b, a]).unwrap();
            prop_assert_eq!(ab, ba);
        }

        #[test]
        fn merge_is_idempotent((a, b) in disjoint_pair()) {
            let once = merge_segments(SeriesId::Bigmac, [a.clone(), b]).unwrap();
            let twice = merge_segments(SeriesId::Bigmac, [once.clone(), once.clone()]).unwrap();
            prop_assert_eq!(&twice, &once);
            let dates: Vec<NaiveDate> = once.points().iter().map(|p| p.date).collect();
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

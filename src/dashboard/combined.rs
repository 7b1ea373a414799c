//! The combined year table: an outer join of rebased series on `year`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{RebasedSeries, SeriesId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub year: i32,
    /// One cell per column; `None` where the series has no point for the year.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedTable {
    /// Column order is the order the series were joined in.
    pub columns: Vec<SeriesId>,
    /// Rows sorted by ascending year.
    pub rows: Vec<CombinedRow>,
}

impl CombinedTable {
    /// Outer-join `series` on year, one `pct_of_baseline` column per series.
    pub fn join<'a, I>(series: I) -> Self
    where
        I: IntoIterator<Item = (SeriesId, &'a RebasedSeries)>,
    {
        let mut columns = Vec::new();
        let mut by_year: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();

        for (col, (id, rebased)) in series.into_iter().enumerate() {
            columns.push(id);
            for p in &rebased.points {
                let row = by_year.entry(p.year).or_default();
                row.resize(col + 1, None);
                row[col] = Some(p.pct_of_baseline);
            }
        }

        let width = columns.len();
        let rows = by_year
            .into_iter()
            .map(|(year, mut values)| {
                values.resize(width, None);
                CombinedRow { year, values }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn column_index(&self, id: SeriesId) -> Option<usize> {
        self.columns.iter().position(|c| *c == id)
    }

    /// `(year, pct)` pairs for one column, skipping absent cells.
    pub fn column(&self, id: SeriesId) -> Vec<(i32, f64)> {
        let Some(idx) = self.column_index(id) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|r| r.values.get(idx).copied().flatten().map(|v| (r.year, v)))
            .collect()
    }

    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((self.rows.first()?.year, self.rows.last()?.year))
    }
}

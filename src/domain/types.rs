//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while the dashboard is built
//! - exported to JSON/CSV
//! - reloaded later for terminal display (`ppd show`)

use std::fmt;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The fixed set of series the dashboard knows how to build.
///
/// Declaration order is the default processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SeriesId {
    Cpi,
    MedianHome,
    Gasoline,
    Bigmac,
}

impl SeriesId {
    pub const ALL: [SeriesId; 4] = [
        SeriesId::Cpi,
        SeriesId::MedianHome,
        SeriesId::Gasoline,
        SeriesId::Bigmac,
    ];

    /// Stable machine name, used in file names and CLI overrides.
    pub fn key(self) -> &'static str {
        match self {
            SeriesId::Cpi => "cpi",
            SeriesId::MedianHome => "median_home",
            SeriesId::Gasoline => "gasoline",
            SeriesId::Bigmac => "bigmac",
        }
    }

    /// Human-readable label for charts and the combined table header.
    pub fn display_name(self) -> &'static str {
        match self {
            SeriesId::Cpi => "Inverted CPI",
            SeriesId::MedianHome => "Median Home",
            SeriesId::Gasoline => "Gasoline",
            SeriesId::Bigmac => "Big Mac",
        }
    }

    /// What one unit of affordability buys.
    pub fn unit_label(self) -> &'static str {
        match self {
            SeriesId::Cpi => "basket",
            SeriesId::MedianHome => "homes",
            SeriesId::Gasoline => "gallons",
            SeriesId::Bigmac => "burgers",
        }
    }

    pub fn native_frequency(self) -> Frequency {
        match self {
            SeriesId::Cpi => Frequency::Monthly,
            SeriesId::MedianHome => Frequency::Quarterly,
            SeriesId::Gasoline => Frequency::Monthly,
            SeriesId::Bigmac => Frequency::Irregular,
        }
    }

    /// Default `{policy, unit_amount}` record for this series.
    ///
    /// CPI is an index, so it is simply inverted (`1 / cpi`); the other goods are
    /// expressed as units purchasable with 10,000 of currency.
    pub fn default_spec(self) -> SeriesSpec {
        match self {
            SeriesId::Cpi => SeriesSpec {
                policy: ResamplePolicy::Mean,
                unit_amount: 1.0,
            },
            SeriesId::MedianHome => SeriesSpec {
                policy: ResamplePolicy::Last,
                unit_amount: 10_000.0,
            },
            SeriesId::Gasoline | SeriesId::Bigmac => SeriesSpec {
                policy: ResamplePolicy::Mean,
                unit_amount: 10_000.0,
            },
        }
    }

    pub fn from_key(key: &str) -> Option<SeriesId> {
        let key = key.trim().to_ascii_lowercase().replace('-', "_");
        SeriesId::ALL.into_iter().find(|id| id.key() == key)
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Native sampling frequency of a source series (informational).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
    Quarterly,
    Irregular,
}

/// How sub-annual observations collapse into one point per calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResamplePolicy {
    /// Arithmetic mean of the year's points, labeled with December 31.
    Mean,
    /// The year's chronologically last point, labeled with its own date.
    Last,
}

/// Per-series pipeline parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub policy: ResamplePolicy,
    /// Currency sum divided by the raw price to get affordability.
    pub unit_amount: f64,
}

/// Lookup table of `SeriesSpec` keyed by `SeriesId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecTable {
    entries: Vec<(SeriesId, SeriesSpec)>,
}

impl Default for SpecTable {
    fn default() -> Self {
        Self {
            entries: SeriesId::ALL.into_iter().map(|id| (id, id.default_spec())).collect(),
        }
    }
}

impl SpecTable {
    pub fn get(&self, id: SeriesId) -> SeriesSpec {
        self.entries
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, spec)| *spec)
            .unwrap_or_else(|| id.default_spec())
    }

    pub fn set_unit_amount(&mut self, id: SeriesId, unit_amount: f64) {
        self.entry_mut(id).unit_amount = unit_amount;
    }

    pub fn set_policy(&mut self, id: SeriesId, policy: ResamplePolicy) {
        self.entry_mut(id).policy = policy;
    }

    fn entry_mut(&mut self, id: SeriesId) -> &mut SeriesSpec {
        let idx = match self.entries.iter().position(|(k, _)| *k == id) {
            Some(idx) => idx,
            None => {
                self.entries.push((id, id.default_spec()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }
}

/// A single dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl TimePoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Date-sorted observations, unique by date, all values finite.
///
/// The only constructor (`from_points`) enforces the invariant, so every stage
/// can rely on it without re-checking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<TimePoint>,
}

impl Series {
    /// Build a series from arbitrary points.
    ///
    /// Sorts by date, keeps the last occurrence of a duplicated date, and drops
    /// non-finite values.
    pub fn from_points(points: impl IntoIterator<Item = TimePoint>) -> Self {
        let mut points: Vec<TimePoint> = points.into_iter().filter(|p| p.value.is_finite()).collect();
        // Stable sort keeps input order among equal dates; we then keep the last one.
        points.sort_by_key(|p| p.date);
        let mut out: Vec<TimePoint> = Vec::with_capacity(points.len());
        for p in points {
            match out.last_mut() {
                Some(prev) if prev.date == p.date => *prev = p,
                _ => out.push(p),
            }
        }
        Self { points: out }
    }

    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<TimePoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Keep only points dated on or after `cutoff`.
    pub fn since(self, cutoff: NaiveDate) -> Series {
        Series {
            points: self.points.into_iter().filter(|p| p.date >= cutoff).collect(),
        }
    }
}

/// One row of an affordability table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityPoint {
    pub date: NaiveDate,
    /// Raw price as loaded.
    pub price: f64,
    /// Units purchasable per `unit_amount` (`unit_amount / price`).
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilitySeries {
    pub unit_amount: f64,
    pub points: Vec<AffordabilityPoint>,
}

impl AffordabilitySeries {
    /// The affordability column as a plain series.
    pub fn to_series(&self) -> Series {
        Series::from_points(self.points.iter().map(|p| TimePoint::new(p.date, p.value)))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One point per calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualPoint {
    pub year: i32,
    /// Representative date (policy-dependent, see `ResamplePolicy`).
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    pub policy: ResamplePolicy,
    pub points: Vec<AnnualPoint>,
}

impl AnnualSeries {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|p| p.year)
    }

    pub fn value_for(&self, year: i32) -> Option<f64> {
        self.points.iter().find(|p| p.year == year).map(|p| p.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebasedPoint {
    pub year: i32,
    pub date: NaiveDate,
    pub value: f64,
    pub pct_of_baseline: f64,
}

/// An annual series expressed as a percentage of its baseline point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebasedSeries {
    pub baseline_date: NaiveDate,
    pub baseline_value: f64,
    pub points: Vec<RebasedPoint>,
}

impl RebasedSeries {
    pub fn pct_for(&self, year: i32) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.year == year)
            .map(|p| p.pct_of_baseline)
    }

    pub fn latest(&self) -> Option<&RebasedPoint> {
        self.points.last()
    }
}

/// A full run's configuration as understood by the dashboard builder.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Series to build, in processing order. Empty means "all known series".
    pub series: Vec<SeriesId>,
    pub specs: SpecTable,
    /// Earliest date considered for the rebasing baseline.
    pub cutoff: NaiveDate,
}

pub const DEFAULT_BASE_YEAR: i32 = 1995;

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_base_year(DEFAULT_BASE_YEAR)
    }
}

impl DashboardConfig {
    /// Configuration with the cutoff at January 1 of `year`.
    pub fn for_base_year(year: i32) -> Self {
        Self {
            series: Vec::new(),
            specs: SpecTable::default(),
            cutoff: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }

    pub fn base_year(&self) -> i32 {
        self.cutoff.year()
    }

    pub fn is_enabled(&self, id: SeriesId) -> bool {
        self.series.is_empty() || self.series.contains(&id)
    }
}

//! Report types produced by the aggregators.

use serde::Serialize;

/// A value together with the number of trips it occurred in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Ranked<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ranked<U> {
        Ranked {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// A statistic that some cities cannot provide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Availability<T> {
    Available(T),
    NotAvailable,
}

impl<T> Availability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available(_))
    }
}

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeReport {
    /// Calendar month number, 1 = January.
    pub popular_month: Ranked<u32>,
    pub popular_month_name: &'static str,
    pub popular_day: Ranked<&'static str>,
    /// Hour of day, 0-23.
    pub popular_hour: Ranked<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most used start station, end station and start/end combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub popular_start: Ranked<String>,
    pub popular_end: Ranked<String>,
    pub popular_trip: Ranked<StationPair>,
}

/// A number of seconds split into days, hours, minutes and seconds.
///
/// `seconds` keeps the fractional remainder at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: f64,
    pub total_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationReport {
    pub trips: usize,
    pub total: Breakdown,
    /// `None` when there were no trips to average.
    pub mean: Option<Breakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: Ranked<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    pub user_types: Vec<Ranked<String>>,
    pub genders: Availability<Vec<Ranked<String>>>,
    pub birth_years: Availability<BirthYearStats>,
}

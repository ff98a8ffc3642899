//! Report rendering for the terminal and JSON serialization.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::{
    Availability, Breakdown, DurationReport, Ranked, StationReport, TimeReport, UserReport,
};
use crate::analyzers::{station_stats, time_stats, trip_duration_stats, user_stats};
use crate::city::City;
use crate::error::{BikeshareError, Result};
use crate::filter::{Filter, day_name};
use crate::trip::{Trip, TripTable};

const RULE_WIDTH: usize = 40;

/// Every report for one city and filter, as emitted by `report --json`.
///
/// Time and station statistics are `None` when no trips matched.
#[derive(Debug, Serialize)]
pub struct CityReport {
    pub city: City,
    pub month: &'static str,
    pub day: &'static str,
    pub trips: usize,
    pub time: Option<TimeReport>,
    pub stations: Option<StationReport>,
    pub durations: DurationReport,
    pub users: UserReport,
}

impl CityReport {
    pub fn build(city: City, filter: &Filter, table: &TripTable) -> Result<Self> {
        Ok(CityReport {
            city,
            month: filter.month_label(),
            day: filter.day_label(),
            trips: table.len(),
            time: allow_empty(time_stats(table))?,
            stations: allow_empty(station_stats(table))?,
            durations: trip_duration_stats(table),
            users: user_stats(table)?,
        })
    }
}

fn allow_empty<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(report) => Ok(Some(report)),
        Err(BikeshareError::EmptyDataset) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Serializes a [`CityReport`] as pretty-printed JSON.
pub fn to_json(report: &CityReport) -> Result<String> {
    debug!("{:#?}", report);
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

fn footer(elapsed: Duration) -> String {
    format!("\nThis took {} seconds.\n{}\n", elapsed.as_secs_f64(), rule())
}

fn trips(count: usize) -> String {
    if count == 1 {
        "1 trip".to_string()
    } else {
        format!("{count} trips")
    }
}

pub fn render_time(report: &TimeReport, elapsed: Duration) -> String {
    let mut out = String::from("\nCalculating The Most Frequent Times of Travel...\n\n");
    out.push_str(&format!(
        "The most popular month to travel is: {} ({})\n",
        report.popular_month_name,
        trips(report.popular_month.count)
    ));
    out.push_str(&format!(
        "The most popular day of the week for travel is: {} ({})\n",
        report.popular_day.value,
        trips(report.popular_day.count)
    ));
    out.push_str(&format!(
        "The most popular hour for travel is: {} ({})\n",
        report.popular_hour.value,
        trips(report.popular_hour.count)
    ));
    out.push_str(&footer(elapsed));
    out
}

pub fn render_stations(report: &StationReport, elapsed: Duration) -> String {
    let mut out = String::from("\nCalculating The Most Popular Stations and Trip...\n\n");
    out.push_str("The most popular...\n");
    out.push_str(&format!(
        "Start station is: {} ({}).\n",
        report.popular_start.value,
        trips(report.popular_start.count)
    ));
    out.push_str(&format!(
        "End station is: {} ({}).\n",
        report.popular_end.value,
        trips(report.popular_end.count)
    ));
    out.push_str(&format!(
        "\nThe most frequently used trip ({})\nStarts at: {}\nEnds at: {}.\n",
        trips(report.popular_trip.count),
        report.popular_trip.value.start,
        report.popular_trip.value.end
    ));
    out.push_str(&footer(elapsed));
    out
}

/// `"1 days, 2 hours, 2 minutes, and 0.00 seconds"`; days are dropped when
/// `with_days` is false and the breakdown has none.
fn describe(b: &Breakdown, with_days: bool) -> String {
    let clock = format!(
        "{} hours, {} minutes, and {:.2} seconds",
        b.hours, b.minutes, b.seconds
    );
    if with_days || b.days > 0 {
        format!("{} days, {clock}", b.days)
    } else {
        clock
    }
}

pub fn render_durations(report: &DurationReport, elapsed: Duration) -> String {
    let mut out = String::from("\nCalculating Trip Duration...\n\n");
    out.push_str(&format!(
        "The sum of all trip durations is: {} (Total {} seconds).\n",
        describe(&report.total, true),
        report.total.total_seconds
    ));
    match &report.mean {
        Some(mean) => out.push_str(&format!(
            "The average trip duration per user is: {} (Total {:.2} seconds).\n",
            describe(mean, false),
            mean.total_seconds
        )),
        None => out.push_str("The average trip duration per user is: N/A\n"),
    }
    out.push_str(&footer(elapsed));
    out
}

fn render_counts(counts: &[Ranked<String>]) -> String {
    let width = counts.iter().map(|r| r.value.len()).max().unwrap_or(0);
    counts
        .iter()
        .map(|r| format!("{:<width$}  {}\n", r.value, r.count, width = width))
        .collect()
}

pub fn render_users(report: &UserReport, elapsed: Duration) -> String {
    let mut out = String::from("\nCalculating User Stats...\n\n");

    out.push_str("User Type Count:\n");
    out.push_str(&render_counts(&report.user_types));

    out.push_str("\nGender Count:\n");
    match &report.genders {
        Availability::Available(genders) => out.push_str(&render_counts(genders)),
        Availability::NotAvailable => {
            out.push_str("Gender information not available for this city.\n")
        }
    }

    out.push_str("\nYear of Birth Stats:\n");
    match &report.birth_years {
        Availability::Available(years) => {
            out.push_str(&format!("Earliest Birth Year: {}\n", years.earliest));
            out.push_str(&format!("Most Recent Birth Year: {}\n", years.most_recent));
            out.push_str(&format!(
                "Most Common Birth Year: {}\n",
                years.most_common.value
            ));
        }
        Availability::NotAvailable => {
            out.push_str("No year of birth stats available for this city.\n")
        }
    }

    out.push_str(&footer(elapsed));
    out
}

/// One preview line for a raw trip.
pub fn render_trip(trip: &Trip) -> String {
    let mut line = format!(
        "#{:<7} {} ({:<9}) {:>9.1}s  {} -> {}",
        trip.row,
        trip.start_time.format("%Y-%m-%d %H:%M:%S"),
        day_name(trip.day_of_week),
        trip.duration_secs,
        trip.start_station,
        trip.end_station
    );
    if let Some(user_type) = &trip.user_type {
        line.push_str(&format!("  {user_type}"));
    }
    if let Some(gender) = &trip.gender {
        line.push_str(&format!("  {gender}"));
    }
    if let Some(year) = trip.birth_year {
        line.push_str(&format!("  b.{year}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::fixtures::{table, trip};

    #[test]
    fn test_render_durations_scenario() {
        let report = DurationReport {
            trips: 3,
            total: Breakdown::from_seconds(93720.0),
            mean: Some(Breakdown::from_seconds(31240.0)),
        };
        let text = render_durations(&report, Duration::from_millis(3));

        assert!(text.contains("1 days, 2 hours, 2 minutes, and 0.00 seconds (Total 93720 seconds)"));
        assert!(text.contains("is: 8 hours, 40 minutes, and 40.00 seconds (Total 31240.00 seconds)"));
        assert!(text.contains("This took"));
    }

    #[test]
    fn test_render_durations_mean_of_a_day_or_more() {
        let report = DurationReport {
            trips: 2,
            total: Breakdown::from_seconds(180000.0),
            mean: Some(Breakdown::from_seconds(90000.0)),
        };
        let text = render_durations(&report, Duration::ZERO);

        assert!(text.contains(
            "per user is: 1 days, 1 hours, 0 minutes, and 0.00 seconds (Total 90000.00 seconds)"
        ));
        assert!(text.contains("is: 2 days, 2 hours, 0 minutes, and 0.00 seconds (Total 180000 seconds)"));
    }

    #[test]
    fn test_render_durations_without_mean() {
        let report = trip_duration_stats(&table(vec![]));
        let text = render_durations(&report, Duration::ZERO);
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_render_users_not_available() {
        let report = UserReport {
            user_types: vec![Ranked {
                value: "Subscriber".to_string(),
                count: 2,
            }],
            genders: Availability::NotAvailable,
            birth_years: Availability::NotAvailable,
        };
        let text = render_users(&report, Duration::ZERO);

        assert!(text.contains("Subscriber  2"));
        assert!(text.contains("Gender information not available for this city."));
        assert!(text.contains("No year of birth stats available for this city."));
    }

    #[test]
    fn test_render_trip_prints_full_station_names() {
        let mut t = trip(42, 2017, 1, 2, 8);
        t.start_station = "Lake Shore Dr & North Blvd (a long station name that is not cut)".into();
        let line = render_trip(&t);

        assert!(line.starts_with("#42"));
        assert!(line.contains("Monday"));
        assert!(line.contains("(a long station name that is not cut)"));
        assert!(!line.contains("b."));

        t.birth_year = Some(1992);
        assert!(render_trip(&t).ends_with("  b.1992"));
    }

    #[test]
    fn test_city_report_on_empty_table() {
        let report = CityReport::build(City::Chicago, &Filter::default(), &table(vec![])).unwrap();
        assert!(report.time.is_none());
        assert!(report.stations.is_none());

        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["city"], "chicago");
        assert_eq!(value["trips"], 0);
        assert!(value["time"].is_null());
        assert!(value["durations"]["mean"].is_null());
    }
}

//! CSV loader for city trip data.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};
use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::city::City;
use crate::error::{BikeshareError, Result};
use crate::filter::Filter;
use crate::trip::{Columns, Trip, TripTable};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One record as it appears in a city file. Washington has no demographics.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

/// Loads a city's trips and keeps the rows accepted by `filter`.
///
/// # Errors
///
/// Fails when the city file is missing or unreadable, when any start
/// timestamp cannot be parsed, or when a numeric cell is malformed or out
/// of range.
#[tracing::instrument(skip(data_dir))]
pub fn load(data_dir: &Path, city: City, filter: &Filter) -> Result<TripTable> {
    let table = load_city(data_dir, city)?;
    let filtered = table.filter(filter);
    info!(
        rows = filtered.len(),
        month = filter.month_label(),
        day = filter.day_label(),
        "Filters applied"
    );
    Ok(filtered)
}

/// Loads every trip for `city` without filtering.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripTable> {
    let reader = open_source(data_dir, city)?;
    let table = read_trips(reader)?;
    info!(%city, rows = table.len(), "Trip data loaded");
    Ok(table)
}

/// Opens `<stem>.csv`, falling back to a gzip-compressed `<stem>.csv.gz`.
fn open_source(data_dir: &Path, city: City) -> Result<Box<dyn Read>> {
    let plain = data_dir.join(format!("{}.csv", city.file_stem()));
    if plain.exists() {
        debug!(path = %plain.display(), "Reading CSV source");
        return Ok(Box::new(File::open(&plain)?));
    }

    let compressed: PathBuf = data_dir.join(format!("{}.csv.gz", city.file_stem()));
    if compressed.exists() {
        debug!(path = %compressed.display(), "Reading gzip CSV source");
        return Ok(Box::new(GzDecoder::new(File::open(&compressed)?)));
    }

    Err(BikeshareError::DataSourceMissing { path: plain })
}

/// Parses trip records from any CSV reader and derives month and weekday.
///
/// # Errors
///
/// Returns [`BikeshareError::MalformedData`] for the first record whose
/// timestamp cannot be parsed, [`BikeshareError::InvalidValue`] for a
/// negative or non-finite duration or a fractional birth year, and
/// [`BikeshareError::Csv`] for structural problems or non-numeric cells.
pub fn read_trips<R: Read>(reader: R) -> Result<TripTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?;
    let columns = Columns {
        gender: headers.iter().any(|h| h == "Gender"),
        birth_year: headers.iter().any(|h| h == "Birth Year"),
    };
    debug!(?columns, "Detected optional columns");

    let mut trips = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let raw: RawTrip = result?;
        trips.push(into_trip(row, raw)?);
    }

    Ok(TripTable::new(columns, trips))
}

fn into_trip(row: usize, raw: RawTrip) -> Result<Trip> {
    let start_time = parse_timestamp(&raw.start_time).ok_or_else(|| {
        BikeshareError::MalformedData {
            row,
            value: raw.start_time.clone(),
        }
    })?;

    let end_time = match raw.end_time.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(parse_timestamp(value).ok_or_else(|| {
            BikeshareError::MalformedData {
                row,
                value: value.to_string(),
            }
        })?),
    };

    if !raw.trip_duration.is_finite() || raw.trip_duration < 0.0 {
        return Err(BikeshareError::InvalidValue {
            row,
            column: "Trip Duration",
            value: raw.trip_duration.to_string(),
        });
    }

    let birth_year = match raw.birth_year {
        None => None,
        Some(year) if year.is_finite() && year.fract() == 0.0 => Some(year as i64),
        Some(year) => {
            return Err(BikeshareError::InvalidValue {
                row,
                column: "Birth Year",
                value: year.to_string(),
            });
        }
    };

    Ok(Trip {
        row,
        start_time,
        end_time,
        start_station: raw.start_station,
        end_station: raw.end_station,
        duration_secs: raw.trip_duration,
        user_type: non_blank(raw.user_type),
        gender: non_blank(raw.gender),
        birth_year,
        month: start_time.month(),
        day_of_week: start_time.weekday(),
    })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

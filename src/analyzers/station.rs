use crate::analyzers::types::{StationPair, StationReport};
use crate::analyzers::utility::mode;
use crate::error::{BikeshareError, Result};
use crate::trip::TripTable;

/// Finds the most used start station, end station and start/end pair.
///
/// Ties resolve to the lexicographically lowest name.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when the table has no trips.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn station_stats(table: &TripTable) -> Result<StationReport> {
    let trips = table.trips();

    let start = mode(trips.iter().map(|t| t.start_station.as_str()))
        .ok_or(BikeshareError::EmptyDataset)?;
    let end = mode(trips.iter().map(|t| t.end_station.as_str()))
        .ok_or(BikeshareError::EmptyDataset)?;
    let pair = mode(
        trips
            .iter()
            .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
    )
    .ok_or(BikeshareError::EmptyDataset)?;

    Ok(StationReport {
        popular_start: start.map(str::to_string),
        popular_end: end.map(str::to_string),
        popular_trip: pair.map(|(start, end)| StationPair {
            start: start.to_string(),
            end: end.to_string(),
        }),
    })
}

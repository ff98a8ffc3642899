use chrono::Timelike;

use crate::analyzers::types::TimeReport;
use crate::analyzers::utility::mode;
use crate::error::{BikeshareError, Result};
use crate::filter::{WEEKDAYS, day_name, month_name};
use crate::trip::TripTable;

/// Finds the most common month, weekday and start hour among `table`'s trips.
///
/// Ties resolve to the lowest month number, the earliest weekday (Monday
/// first) and the lowest hour.
///
/// # Errors
///
/// Returns [`BikeshareError::EmptyDataset`] when the table has no trips.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn time_stats(table: &TripTable) -> Result<TimeReport> {
    let trips = table.trips();

    let month = mode(trips.iter().map(|t| t.month)).ok_or(BikeshareError::EmptyDataset)?;
    let day = mode(trips.iter().map(|t| t.day_of_week.num_days_from_monday()))
        .ok_or(BikeshareError::EmptyDataset)?;
    let hour = mode(trips.iter().map(|t| t.start_time.hour())).ok_or(BikeshareError::EmptyDataset)?;

    Ok(TimeReport {
        popular_month_name: month_name(month.value),
        popular_month: month,
        popular_day: day.map(|d| day_name(WEEKDAYS[d as usize])),
        popular_hour: hour,
    })
}

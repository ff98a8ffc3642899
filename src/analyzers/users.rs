use tracing::debug;

use crate::analyzers::types::{Availability, BirthYearStats, UserReport};
use crate::analyzers::utility::{mode, value_counts};
use crate::error::{BikeshareError, Result};
use crate::trip::TripTable;

/// Counts user types and, where the city records them, genders and birth years.
///
/// A city without a demographic column reports that statistic as
/// [`Availability::NotAvailable`]. Any other failure propagates.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn user_stats(table: &TripTable) -> Result<UserReport> {
    let user_types = value_counts(table.trips().iter().filter_map(|t| t.user_type.as_deref()))
        .into_iter()
        .map(|r| r.map(str::to_string))
        .collect();

    let genders = match table.genders() {
        Ok(values) => Availability::Available(
            value_counts(values)
                .into_iter()
                .map(|r| r.map(str::to_string))
                .collect(),
        ),
        Err(BikeshareError::MissingColumn(column)) => {
            debug!(column, "Gender statistics not available");
            Availability::NotAvailable
        }
        Err(e) => return Err(e),
    };

    let birth_years = match table.birth_years() {
        Ok(values) => birth_year_stats(values),
        Err(BikeshareError::MissingColumn(column)) => {
            debug!(column, "Birth year statistics not available");
            Availability::NotAvailable
        }
        Err(e) => return Err(e),
    };

    Ok(UserReport {
        user_types,
        genders,
        birth_years,
    })
}

fn birth_year_stats(values: impl Iterator<Item = i64>) -> Availability<BirthYearStats> {
    let years: Vec<i64> = values.collect();

    let (Some(earliest), Some(most_recent), Some(most_common)) = (
        years.iter().min().copied(),
        years.iter().max().copied(),
        mode(years.iter().copied()),
    ) else {
        return Availability::NotAvailable;
    };

    Availability::Available(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}

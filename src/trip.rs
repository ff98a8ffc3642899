//! In-memory trip rows and the table they live in.

use chrono::{NaiveDateTime, Weekday};

use crate::error::{BikeshareError, Result};
use crate::filter::Filter;

/// A single bicycle rental.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    /// Zero-based position of the record in its source file.
    pub row: usize,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub start_station: String,
    pub end_station: String,
    pub duration_secs: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i64>,

    // derived from start_time at load
    pub month: u32,
    pub day_of_week: Weekday,
}

/// Optional demographic columns carried by a city's source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    pub gender: bool,
    pub birth_year: bool,
}

/// Ordered trips for one city, plus the schema they were read with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripTable {
    columns: Columns,
    trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(columns: Columns, trips: Vec<Trip>) -> Self {
        Self { columns, trips }
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Returns a new table holding the rows accepted by `filter`, in order.
    ///
    /// The receiver is left untouched.
    pub fn filter(&self, filter: &Filter) -> TripTable {
        TripTable {
            columns: self.columns,
            trips: self
                .trips
                .iter()
                .filter(|t| filter.matches(t))
                .cloned()
                .collect(),
        }
    }

    /// Non-blank gender values.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::MissingColumn`] when the source had no `Gender` column.
    pub fn genders(&self) -> Result<impl Iterator<Item = &str> + '_> {
        if !self.columns.gender {
            return Err(BikeshareError::MissingColumn("Gender"));
        }
        Ok(self.trips.iter().filter_map(|t| t.gender.as_deref()))
    }

    /// Non-blank birth years.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::MissingColumn`] when the source had no `Birth Year` column.
    pub fn birth_years(&self) -> Result<impl Iterator<Item = i64> + '_> {
        if !self.columns.birth_year {
            return Err(BikeshareError::MissingColumn("Birth Year"));
        }
        Ok(self.trips.iter().filter_map(|t| t.birth_year))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    /// Builds a trip starting at the given date and hour with default station names.
    pub fn trip(row: usize, y: i32, m: u32, d: u32, hour: u32) -> Trip {
        let start_time = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Trip {
            row,
            start_time,
            end_time: None,
            start_station: "Clark St & Lake St".to_string(),
            end_station: "State St & Harrison St".to_string(),
            duration_secs: 600.0,
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
        }
    }

    pub fn table(trips: Vec<Trip>) -> TripTable {
        TripTable::new(
            Columns {
                gender: true,
                birth_year: true,
            },
            trips,
        )
    }
}

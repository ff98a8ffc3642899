//! Month and weekday selectors applied to a loaded trip table.

use chrono::{Month, Weekday};

use crate::error::{BikeshareError, Result};
use crate::trip::Trip;

/// Months covered by the source data, in calendar order.
pub const MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Weekdays, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Either no filtering, or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filter {
    /// Calendar month number, 1 = January.
    pub month: Selector<u32>,
    pub day: Selector<Weekday>,
}

impl Filter {
    /// Builds a filter from user-facing names such as `"march"` and `"all"`.
    pub fn parse(month: &str, day: &str) -> Result<Self> {
        Ok(Self {
            month: parse_month(month)?,
            day: parse_day(day)?,
        })
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.matches(&trip.month) && self.day.matches(&trip.day_of_week)
    }

    pub fn month_label(&self) -> &'static str {
        match self.month {
            Selector::All => "All",
            Selector::Only(m) => month_name(m),
        }
    }

    pub fn day_label(&self) -> &'static str {
        match self.day {
            Selector::All => "All",
            Selector::Only(d) => day_name(d),
        }
    }
}

/// Parses `all` or a month name from january to june, case-insensitive.
pub fn parse_month(input: &str) -> Result<Selector<u32>> {
    let name = input.trim().to_lowercase();
    if name == "all" {
        return Ok(Selector::All);
    }
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| Selector::Only(i as u32 + 1))
        .ok_or_else(|| BikeshareError::InvalidMonth(input.trim().to_string()))
}

/// Parses `all` or a full weekday name, case-insensitive.
pub fn parse_day(input: &str) -> Result<Selector<Weekday>> {
    let name = input.trim().to_lowercase();
    if name == "all" {
        return Ok(Selector::All);
    }
    WEEKDAYS
        .iter()
        .find(|d| day_name(**d).eq_ignore_ascii_case(&name))
        .map(|d| Selector::Only(*d))
        .ok_or_else(|| BikeshareError::InvalidDay(input.trim().to_string()))
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

//! Interactive question-and-answer session over any line-based input.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::analyzers::{station_stats, time_stats, trip_duration_stats, user_stats};
use crate::city::City;
use crate::error::{BikeshareError, Result};
use crate::filter::{Filter, parse_day, parse_month};
use crate::loader::load;
use crate::output::{self, render_trip};
use crate::trip::{Trip, TripTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Cursor over a table for the "show me some data" loop.
#[derive(Debug, Default)]
pub struct Preview {
    offset: usize,
}

impl Preview {
    pub const PAGE: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the next page of rows and advances the cursor.
    /// An empty slice means the table is exhausted.
    pub fn next_page<'a>(&mut self, table: &'a TripTable) -> &'a [Trip] {
        let trips = table.trips();
        let start = self.offset.min(trips.len());
        let end = (start + Self::PAGE).min(trips.len());
        self.offset = end;
        &trips[start..end]
    }
}

pub struct Session<R, W> {
    input: R,
    output: W,
    data_dir: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            data_dir: data_dir.into(),
        }
    }

    /// Runs until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some((city, filter)) = self.get_filters()? else {
                return Ok(());
            };

            match load(&self.data_dir, city, &filter) {
                Ok(table) => {
                    if self.explore(&table)? == Flow::Quit {
                        return Ok(());
                    }
                }
                Err(e) => {
                    error!(%city, error = %e, "Failed to load trip data");
                    writeln!(self.output, "\nCould not load data for {}: {e}", city.title())?;
                }
            }

            let Some(answer) = self.prompt("\nWould you like to restart? Enter yes or no.\n")? else {
                return Ok(());
            };
            if !is_yes(&answer) {
                info!("Session finished");
                return Ok(());
            }
        }
    }

    fn get_filters(&mut self) -> Result<Option<(City, Filter)>> {
        writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

        let Some(city) = self.ask(
            "\nChoose from chicago, new york city or washington: ",
            "Sorry that's not from the list.\nPlease try again.",
            |s| s.parse::<City>(),
        )?
        else {
            return Ok(None);
        };

        let Some(month) = self.ask(
            "\nEnter a month OR all for no filtering. Available months: january - june: ",
            "Sorry that's not a month from the list. No abbreviations allowed.\nPlease try again.",
            parse_month,
        )?
        else {
            return Ok(None);
        };

        let Some(day) = self.ask(
            "\nEnter a weekday OR all for no filtering: ",
            "This is not a valid weekday name.\nPlease try again.",
            parse_day,
        )?
        else {
            return Ok(None);
        };

        let filter = Filter { month, day };
        writeln!(
            self.output,
            "\nYou have chosen to look at:\nCity: {}\nMonth: {}\nWeekday: {}\n{}",
            city.title(),
            filter.month_label(),
            filter.day_label(),
            output::rule()
        )?;
        Ok(Some((city, filter)))
    }

    fn explore(&mut self, table: &TripTable) -> Result<Flow> {
        if self.preview(table)? == Flow::Quit {
            return Ok(Flow::Quit);
        }

        let gates: [(&str, &str, Report); 4] = [
            (
                "\nAre you interested in the most popular times of travel? Please enter yes or no: ",
                "Skipping time stats.",
                time_report,
            ),
            (
                "\nWould you like to find out the most popular stations? Please enter yes or no: ",
                "Skipping stations stats.",
                station_report,
            ),
            (
                "\nTrip duration stats are available, are you interested? Please enter yes or no: ",
                "Skipping trip duration stats.",
                duration_report,
            ),
            (
                "\nFind out more about the bikeshare users by selecting yes. If you would like to skip, type no: ",
                "Skipping user stats.",
                user_report,
            ),
        ];

        for (question, skip, report) in gates {
            let Some(answer) = self.prompt(question)? else {
                return Ok(Flow::Quit);
            };
            if !is_yes(&answer) {
                writeln!(self.output, "{skip}")?;
                continue;
            }
            match report(table) {
                Ok((text, elapsed)) => {
                    info!(elapsed_ms = elapsed.as_millis() as u64, "Report shown");
                    write!(self.output, "{text}")?;
                }
                Err(BikeshareError::EmptyDataset) => {
                    writeln!(self.output, "No trips match the selected filters.")?;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Flow::Continue)
    }

    fn preview(&mut self, table: &TripTable) -> Result<Flow> {
        let mut cursor = Preview::new();
        loop {
            let Some(answer) =
                self.prompt("\nWould you like to see some of the data? Please type yes or no: ")?
            else {
                return Ok(Flow::Quit);
            };
            if !is_yes(&answer) {
                return Ok(Flow::Continue);
            }

            let first = cursor.offset() == 0;
            let page = cursor.next_page(table);
            if page.is_empty() {
                writeln!(self.output, "There are no more rows to show.")?;
                return Ok(Flow::Continue);
            }

            let heading = if first { "first" } else { "next" };
            writeln!(self.output, "Here is the {heading} {} lines of data:\n", page.len())?;
            for trip in page {
                writeln!(self.output, "{}", render_trip(trip))?;
            }
        }
    }

    /// Re-asks `question` until `parse` accepts the answer.
    fn ask<T>(
        &mut self,
        question: &str,
        retry: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.prompt(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{retry}")?,
            }
        }
    }

    /// Prints `question` and reads one line. `None` means input has ended.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn time_report(table: &TripTable) -> Result<(String, Duration)> {
    timed(table, time_stats, output::render_time)
}

fn station_report(table: &TripTable) -> Result<(String, Duration)> {
    timed(table, station_stats, output::render_stations)
}

fn duration_report(table: &TripTable) -> Result<(String, Duration)> {
    timed(table, |t| Ok(trip_duration_stats(t)), output::render_durations)
}

fn user_report(table: &TripTable) -> Result<(String, Duration)> {
    timed(table, user_stats, output::render_users)
}

/// The report gate function type: computes one report and renders it,
/// returning the text and compute time.
type Report = fn(&TripTable) -> Result<(String, Duration)>;

fn timed<T>(
    table: &TripTable,
    compute: impl FnOnce(&TripTable) -> Result<T>,
    render: impl FnOnce(&T, Duration) -> String,
) -> Result<(String, Duration)> {
    let started = Instant::now();
    let report = compute(table)?;
    let elapsed = started.elapsed();
    Ok((render(&report, elapsed), elapsed))
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

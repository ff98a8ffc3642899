use crate::analyzers::types::{Breakdown, DurationReport};
use crate::analyzers::utility::mean;
use crate::trip::TripTable;

const SECS_PER_DAY: f64 = 86_400.0;
const SECS_PER_HOUR: f64 = 3_600.0;
const SECS_PER_MINUTE: f64 = 60.0;

impl Breakdown {
    pub fn from_seconds(total_seconds: f64) -> Self {
        let days = (total_seconds / SECS_PER_DAY).floor();
        let hours = ((total_seconds - days * SECS_PER_DAY) / SECS_PER_HOUR).floor();
        let minutes =
            ((total_seconds - days * SECS_PER_DAY - hours * SECS_PER_HOUR) / SECS_PER_MINUTE).floor();
        let seconds = total_seconds
            - days * SECS_PER_DAY
            - hours * SECS_PER_HOUR
            - minutes * SECS_PER_MINUTE;

        Breakdown {
            days: days as u64,
            hours: hours as u64,
            minutes: minutes as u64,
            seconds,
            total_seconds,
        }
    }
}

/// Sums and averages trip durations.
///
/// An empty table has a total of zero and no mean.
#[tracing::instrument(skip_all, fields(rows = table.len()))]
pub fn trip_duration_stats(table: &TripTable) -> DurationReport {
    let durations: Vec<f64> = table.trips().iter().map(|t| t.duration_secs).collect();
    let total: f64 = durations.iter().sum();

    DurationReport {
        trips: durations.len(),
        total: Breakdown::from_seconds(total),
        mean: (!durations.is_empty()).then(|| Breakdown::from_seconds(mean(&durations))),
    }
}

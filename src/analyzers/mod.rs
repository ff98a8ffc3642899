//! Trip statistics.
//!
//! Each aggregator takes a read-only [`TripTable`](crate::trip::TripTable)
//! and returns its own report. None depends on another's output.

pub mod duration;
pub mod station;
pub mod time;
pub mod types;
pub mod users;
pub mod utility;

pub use duration::trip_duration_stats;
pub use station::station_stats;
pub use time::time_stats;
pub use users::user_stats;

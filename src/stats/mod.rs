//! Descriptive statistics over a filtered [`crate::types::TripTable`].
//!
//! Each category is computed by its own function and either succeeds fully or fails as a unit:
//!
//! - [`time_stats()`]: popular month, weekday and start hour
//! - [`station_stats()`]: popular start station, end station and start/end trip
//! - [`duration_stats()`]: total and mean trip duration (see [`format_duration()`])
//! - [`user_stats()`]: user-type and gender counts, birth-year extremes
//!
//! [`StatsReport::compute`] runs all four.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

use serde::Serialize;

use crate::error::BikeshareResult;
use crate::types::{FilterSpec, TripTable};

pub use duration::{duration_stats, format_duration, DurationStats};
pub use station::{station_stats, trip_key, StationStats};
pub use time::{time_stats, TimeStats};
pub use user::{user_stats, BirthYearStats, UserStats};

/// Every statistic category for one analysis run. Read-only once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub filter: FilterSpec,
    pub rows: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl StatsReport {
    /// Compute all categories; the first failing category fails the report.
    pub fn compute(filter: FilterSpec, table: &TripTable) -> BikeshareResult<Self> {
        Ok(Self {
            filter,
            rows: table.row_count(),
            time: time_stats(table)?,
            stations: station_stats(table)?,
            durations: duration_stats(table)?,
            users: user_stats(table)?,
        })
    }
}

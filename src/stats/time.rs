//! Most frequent times of travel.

use serde::Serialize;

use crate::error::{BikeshareError, BikeshareResult};
use crate::processing::mode;
use crate::types::TripTable;

/// Popular month, weekday and start hour over a (filtered) table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    /// Capitalized month name ("February").
    pub most_common_month: String,
    /// Capitalized weekday name ("Monday").
    pub most_common_weekday: String,
    /// Hour of day, 0-23.
    pub most_common_start_hour: u32,
}

/// Mode of the derived month, derived weekday and start hour.
///
/// Ties resolve to the smallest month/hour number and the alphabetically first weekday name.
pub fn time_stats(table: &TripTable) -> BikeshareResult<TimeStats> {
    const STATISTIC: &str = "time of travel";
    let empty = || BikeshareError::EmptyTable {
        statistic: STATISTIC,
    };

    let rows = table.rows();
    let month = mode(rows.iter().map(|r| r.month())).ok_or_else(empty)?;
    let weekday = mode(rows.iter().map(|r| r.weekday_name())).ok_or_else(empty)?;
    let hour = mode(rows.iter().map(|r| r.start_hour())).ok_or_else(empty)?;

    Ok(TimeStats {
        most_common_month: month_name(month),
        most_common_weekday: weekday.to_string(),
        most_common_start_hour: hour,
    })
}

fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}

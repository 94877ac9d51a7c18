//! Total and mean trip duration.

use serde::Serialize;

use crate::error::{BikeshareError, BikeshareResult};
use crate::processing::{mean, sum};
use crate::types::TripTable;

const MICROS_PER_SECOND: i64 = 1_000_000;
const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Total and mean trip duration, in seconds.
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
}

impl DurationStats {
    /// [`Self::total_seconds`] through [`format_duration`].
    pub fn total_display(&self) -> String {
        format_duration(self.total_seconds)
    }

    /// [`Self::mean_seconds`] through [`format_duration`].
    pub fn mean_display(&self) -> String {
        format_duration(self.mean_seconds)
    }
}

/// Sum and arithmetic mean of `trip_duration_seconds`.
///
/// An empty table fails as a whole with [`BikeshareError::EmptyTable`], even though its total
/// would be defined as zero.
pub fn duration_stats(table: &TripTable) -> BikeshareResult<DurationStats> {
    let durations = || table.rows().iter().map(|r| r.trip_duration_seconds);
    let mean_seconds = mean(durations()).ok_or(BikeshareError::EmptyTable {
        statistic: "trip duration",
    })?;
    Ok(DurationStats {
        total_seconds: sum(durations()),
        mean_seconds,
    })
}

/// Render seconds as `[D day[s], ]H:MM:SS[.ffffff]`.
///
/// The value is rounded to whole microseconds, ties to even; the fractional part is printed
/// only when it is non-zero. `3661.0` renders as `1:01:01`, `0.0` as `0:00:00`, `90061.5` as
/// `1 day, 1:01:01.500000`. Negative or non-finite input renders as zero.
pub fn format_duration(seconds: f64) -> String {
    let micros = if seconds.is_finite() && seconds > 0.0 {
        (seconds * MICROS_PER_SECOND as f64).round_ties_even() as i64
    } else {
        0
    };

    let whole = micros / MICROS_PER_SECOND;
    let frac = micros % MICROS_PER_SECOND;
    let days = whole / SECONDS_PER_DAY;
    let rem = whole % SECONDS_PER_DAY;
    let (h, m, s) = (rem / 3600, rem % 3600 / 60, rem % 60);

    let mut out = String::new();
    if days > 0 {
        let plural = if days == 1 { "" } else { "s" };
        out.push_str(&format!("{days} day{plural}, "));
    }
    out.push_str(&format!("{h}:{m:02}:{s:02}"));
    if frac > 0 {
        out.push_str(&format!(".{frac:06}"));
    }
    out
}

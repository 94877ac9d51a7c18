//! Plain-text and JSON rendering of selections, statistics and raw rows.

use std::io::{self, Write};
use std::time::Duration;

use crate::error::{BikeshareError, BikeshareResult};
use crate::stats::{DurationStats, StationStats, StatsReport, TimeStats, UserStats};
use crate::types::{headers, FilterSpec, OptionalColumn, TripRecord, TripTable};

const RULE: &str = "----------------------------------------";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Echo the chosen city, month and day.
pub fn write_selection<W: Write>(out: &mut W, spec: &FilterSpec) -> io::Result<()> {
    writeln!(out, "\nYour selection:")?;
    writeln!(out, "==================")?;
    writeln!(out, "City: {}", spec.city.title())?;
    writeln!(out, "Month: {}", spec.month)?;
    writeln!(out, "Day of the week: {}", spec.day)?;
    writeln!(out, "==================")
}

/// Write one statistic category: heading, body (or the error), elapsed time and a rule.
pub fn write_category<W, T, F>(
    out: &mut W,
    heading: &str,
    result: &BikeshareResult<T>,
    elapsed: Duration,
    body: F,
) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W, &T) -> io::Result<()>,
{
    writeln!(out, "\n{heading}\n")?;
    match result {
        Ok(value) => body(out, value)?,
        Err(e) => write_error(out, e)?,
    }
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{RULE}")
}

/// Report a failed category or load. An empty selection gets a friendlier line.
pub fn write_error<W: Write>(out: &mut W, e: &BikeshareError) -> io::Result<()> {
    match e {
        BikeshareError::EmptyTable { .. } => {
            writeln!(out, "No trips match this selection ({e}).")
        }
        other => writeln!(out, "Error: {other}"),
    }
}

/// Body of the "most frequent times" category.
pub fn write_time_stats<W: Write>(out: &mut W, s: &TimeStats) -> io::Result<()> {
    writeln!(out, "Most common month: {}", s.most_common_month)?;
    writeln!(out, "Most common day of week: {}", s.most_common_weekday)?;
    writeln!(out, "Most common start hour: {}", s.most_common_start_hour)
}

/// Body of the "popular stations" category.
pub fn write_station_stats<W: Write>(out: &mut W, s: &StationStats) -> io::Result<()> {
    writeln!(out, "Most popular start station: {}", s.most_common_start)?;
    writeln!(out, "Most popular end station: {}", s.most_common_end)?;
    writeln!(out, "Most popular Trip: {}", s.most_common_trip)
}

/// Body of the trip-duration category, in `H:MM:SS` form.
pub fn write_duration_stats<W: Write>(out: &mut W, s: &DurationStats) -> io::Result<()> {
    writeln!(out, "Total travel time: {}", s.total_display())?;
    writeln!(out, "Mean travel time: {}", s.mean_display())
}

/// Body of the user category. Sub-reports whose column the city lacks are skipped.
pub fn write_user_stats<W: Write>(out: &mut W, s: &UserStats) -> io::Result<()> {
    if let Some(counts) = &s.by_user_type {
        write_counts(out, "Users by Type:", headers::USER_TYPE, counts.iter())?;
    }
    if let Some(counts) = &s.by_gender {
        write_counts(out, "Users by Gender:", headers::GENDER, counts.iter())?;
    }
    if let Some(years) = &s.birth_year {
        writeln!(out, "Years of birth")?;
        writeln!(out, "==================")?;
        writeln!(out, "     Oldest: {}", years.oldest)?;
        writeln!(out, "   Youngest: {}", years.youngest)?;
        writeln!(out, "Most common: {}", years.most_common)?;
        writeln!(out, "==================")?;
    }
    if s.by_user_type.is_none() && s.by_gender.is_none() && s.birth_year.is_none() {
        writeln!(out, "No user data available for this city.")?;
    }
    Ok(())
}

fn write_counts<'a, W: Write>(
    out: &mut W,
    title: &str,
    column: &str,
    counts: impl Iterator<Item = (&'a String, &'a usize)>,
) -> io::Result<()> {
    let counts: Vec<_> = counts.collect();
    let width = counts
        .iter()
        .map(|(k, _)| k.len())
        .chain([column.len()])
        .max()
        .unwrap_or(0);
    writeln!(out, "{title}")?;
    writeln!(out, "==================")?;
    writeln!(out, "{column:<width$}  Count")?;
    for (key, n) in counts {
        writeln!(out, "{key:<width$}  {n}")?;
    }
    writeln!(out, "==================")
}

/// Write the whole report as pretty-printed JSON.
pub fn write_report_json<W: Write>(out: &mut W, report: &StatsReport) -> BikeshareResult<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// Write `rows` as CSV, with a header listing only the columns `table`'s source carried.
pub fn write_raw_rows<W: Write>(
    out: &mut W,
    table: &TripTable,
    rows: &[TripRecord],
) -> BikeshareResult<()> {
    let optional: Vec<OptionalColumn> = table.optional_columns().collect();
    let mut header = vec![headers::START_TIME];
    if optional.contains(&OptionalColumn::EndTime) {
        header.push(headers::END_TIME);
    }
    header.extend([
        headers::TRIP_DURATION,
        headers::START_STATION,
        headers::END_STATION,
    ]);
    header.extend(
        optional
            .iter()
            .filter(|c| **c != OptionalColumn::EndTime)
            .map(|c| c.header()),
    );

    let mut wtr = csv::Writer::from_writer(&mut *out);
    wtr.write_record(&header)?;
    for row in rows {
        let mut record = vec![row.start_time.format(TIMESTAMP_FORMAT).to_string()];
        if optional.contains(&OptionalColumn::EndTime) {
            record.push(
                row.end_time
                    .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default(),
            );
        }
        record.push(row.trip_duration_seconds.to_string());
        record.push(row.start_station.clone());
        record.push(row.end_station.clone());
        for col in optional.iter().filter(|c| **c != OptionalColumn::EndTime) {
            record.push(match col {
                OptionalColumn::UserType => row.user_type.clone().unwrap_or_default(),
                OptionalColumn::Gender => row.gender.clone().unwrap_or_default(),
                OptionalColumn::BirthYear => row
                    .birth_year
                    .map(|y| (y.trunc() as i64).to_string())
                    .unwrap_or_default(),
                OptionalColumn::EndTime => String::new(),
            });
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

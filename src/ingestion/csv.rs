//! CSV trip ingestion.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{BikeshareError, BikeshareResult};
use crate::types::{headers, OptionalColumn, TripRecord, TripTable};

/// Timestamp layouts accepted for `Start Time` / `End Time`.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Ingest a trip CSV file into an in-memory [`TripTable`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every column in [`headers::REQUIRED`] (order can differ, extra columns
///   such as a leading unnamed index are ignored).
/// - `End Time`, `User Type`, `Gender` and `Birth Year` are optional columns; an empty cell in a
///   present optional column is a missing value.
pub fn ingest_trips_from_path(path: impl AsRef<Path>) -> BikeshareResult<TripTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_trips_from_reader(&mut rdr)
}

/// Ingest trips from an existing CSV reader.
pub fn ingest_trips_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> BikeshareResult<TripTable> {
    let header_row = rdr.headers()?.clone();
    let find = |name: &str| header_row.iter().position(|h| h.trim() == name);

    let mut required = [0usize; 4];
    for (slot, name) in required.iter_mut().zip(headers::REQUIRED) {
        *slot = find(name).ok_or_else(|| BikeshareError::SchemaMismatch {
            message: format!(
                "missing required column '{name}'. headers={:?}",
                header_row.iter().collect::<Vec<_>>()
            ),
        })?;
    }
    let [start_idx, duration_idx, start_station_idx, end_station_idx] = required;

    let end_time_idx = find(headers::END_TIME);
    let user_type_idx = find(headers::USER_TYPE);
    let gender_idx = find(headers::GENDER);
    let birth_year_idx = find(headers::BIRTH_YEAR);

    let columns: Vec<OptionalColumn> = [
        (OptionalColumn::EndTime, end_time_idx),
        (OptionalColumn::UserType, user_type_idx),
        (OptionalColumn::Gender, gender_idx),
        (OptionalColumn::BirthYear, birth_year_idx),
    ]
    .into_iter()
    .filter_map(|(col, idx)| idx.map(|_| col))
    .collect();

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
        let optional = |idx: Option<usize>| idx.map(cell).filter(|s| !s.is_empty());

        let start_time = parse_timestamp(user_row, headers::START_TIME, cell(start_idx))?;
        let duration = parse_duration(user_row, cell(duration_idx))?;

        let mut trip = TripRecord::new(
            start_time,
            duration,
            cell(start_station_idx),
            cell(end_station_idx),
        );
        if let Some(raw) = optional(end_time_idx) {
            trip = trip.with_end_time(parse_timestamp(user_row, headers::END_TIME, raw)?);
        }
        if let Some(raw) = optional(user_type_idx) {
            trip = trip.with_user_type(raw);
        }
        if let Some(raw) = optional(gender_idx) {
            trip = trip.with_gender(raw);
        }
        if let Some(raw) = optional(birth_year_idx) {
            trip = trip.with_birth_year(parse_birth_year(user_row, raw)?);
        }
        rows.push(trip);
    }

    Ok(TripTable::new(columns, rows))
}

/// Parse a start/end timestamp cell.
pub fn parse_timestamp(row: usize, column: &str, raw: &str) -> BikeshareResult<NaiveDateTime> {
    let trimmed = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| BikeshareError::ParseError {
            row,
            column: column.to_owned(),
            raw: raw.to_owned(),
            message: "expected timestamp like 2017-01-01 09:07:57".to_string(),
        })
}

fn parse_duration(row: usize, raw: &str) -> BikeshareResult<f64> {
    let parse_err = |message: String| BikeshareError::ParseError {
        row,
        column: headers::TRIP_DURATION.to_owned(),
        raw: raw.to_owned(),
        message,
    };
    let secs = raw.parse::<f64>().map_err(|e| parse_err(e.to_string()))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(parse_err("duration must be a non-negative number".to_string()));
    }
    Ok(secs)
}

fn parse_birth_year(row: usize, raw: &str) -> BikeshareResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|y| y.is_finite())
        .ok_or_else(|| BikeshareError::ParseError {
            row,
            column: headers::BIRTH_YEAR.to_owned(),
            raw: raw.to_owned(),
            message: "expected a year".to_string(),
        })
}

//! Most popular stations and trip.

use serde::Serialize;

use crate::error::{BikeshareError, BikeshareResult};
use crate::processing::mode;
use crate::types::{TripRecord, TripTable};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Most frequent start station, end station and start/end pair.
pub struct StationStats {
    pub most_common_start: String,
    pub most_common_end: String,
    /// Most frequent start/end pair, formatted by [`trip_key`].
    pub most_common_trip: String,
}

/// Composite start/end key for one row: `"[ {start} ] -->> [ {end} ]"`.
pub fn trip_key(row: &TripRecord) -> String {
    format!("[ {} ] -->> [ {} ]", row.start_station, row.end_station)
}

/// Mode of start station, end station, and the per-row start/end pair.
pub fn station_stats(table: &TripTable) -> BikeshareResult<StationStats> {
    let empty = || BikeshareError::EmptyTable {
        statistic: "station popularity",
    };

    let rows = table.rows();
    let start = mode(rows.iter().map(|r| r.start_station.as_str())).ok_or_else(empty)?;
    let end = mode(rows.iter().map(|r| r.end_station.as_str())).ok_or_else(empty)?;
    let trip = mode(rows.iter().map(trip_key)).ok_or_else(empty)?;

    Ok(StationStats {
        most_common_start: start.to_string(),
        most_common_end: end.to_string(),
        most_common_trip: trip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip(start: &str, end: &str) -> TripRecord {
        let at = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        TripRecord::new(at, 60.0, start, end)
    }

    #[test]
    fn most_common_trip_is_per_row_pair() {
        let t = TripTable::from_rows(vec![trip("A", "B"), trip("A", "B"), trip("C", "D")]);
        let s = station_stats(&t).unwrap();
        assert_eq!(s.most_common_start, "A");
        assert_eq!(s.most_common_end, "B");
        assert_eq!(s.most_common_trip, "[ A ] -->> [ B ]");
    }

    #[test]
    fn trip_is_not_a_join_of_separate_modes() {
        // Start mode is A and end mode is Y, but A -> Y never happens.
        let t = TripTable::from_rows(vec![
            trip("A", "X"),
            trip("A", "Z"),
            trip("A", "W"),
            trip("B", "Y"),
            trip("C", "Y"),
            trip("D", "Y"),
            trip("F", "G"),
            trip("F", "G"),
        ]);
        let s = station_stats(&t).unwrap();
        assert_eq!(s.most_common_start, "A");
        assert_eq!(s.most_common_end, "Y");
        assert_eq!(s.most_common_trip, "[ F ] -->> [ G ]");
    }

    #[test]
    fn empty_table_fails() {
        assert!(matches!(
            station_stats(&TripTable::default()),
            Err(BikeshareError::EmptyTable { .. })
        ));
    }
}

//! Month/weekday filtering for [`crate::types::TripTable`].

use crate::types::{DayFilter, FilterSpec, MonthFilter, TripRecord, TripTable};

/// Returns a new [`TripTable`] containing only rows matching `spec`'s month and day.
///
/// `All` on a dimension applies no restriction. Matching rows keep their relative order and the
/// source column set is carried over unchanged. `spec.city` is not consulted here.
pub fn apply_filter(table: &TripTable, spec: &FilterSpec) -> TripTable {
    if spec.month == MonthFilter::All && spec.day == DayFilter::All {
        return table.clone();
    }
    table.filter_rows(|row| matches(row, spec))
}

/// Whether a single row passes `spec`'s month and day restrictions.
pub fn matches(row: &TripRecord, spec: &FilterSpec) -> bool {
    let month_ok = match spec.month {
        MonthFilter::All => true,
        MonthFilter::Only(m) => row.month() == m.number(),
    };
    let day_ok = match spec.day {
        DayFilter::All => true,
        DayFilter::Only(d) => row.weekday() == d,
    };
    month_ok && day_ok
}

#[cfg(test)]
mod tests {
    use super::apply_filter;
    use crate::types::{
        City, DayFilter, FilterSpec, Month, MonthFilter, OptionalColumn, TripRecord, TripTable,
    };
    use chrono::{NaiveDate, Weekday};

    fn trip(month: u32, day: u32, station: &str) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, month, day)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        TripRecord::new(start, 100.0, station, "Z")
    }

    // 2017-01-02 Mon, 2017-02-06 Mon, 2017-02-07 Tue, 2017-03-06 Mon
    fn sample_table() -> TripTable {
        TripTable::new(
            [OptionalColumn::UserType],
            vec![
                trip(1, 2, "jan-mon"),
                trip(2, 6, "feb-mon"),
                trip(2, 7, "feb-tue"),
                trip(3, 6, "mar-mon"),
            ],
        )
    }

    fn spec(month: MonthFilter, day: DayFilter) -> FilterSpec {
        FilterSpec::new(City::Chicago, month, day)
    }

    fn stations(t: &TripTable) -> Vec<&str> {
        t.rows().iter().map(|r| r.start_station.as_str()).collect()
    }

    #[test]
    fn all_all_returns_every_row_in_order() {
        let t = sample_table();
        let out = apply_filter(&t, &spec(MonthFilter::All, DayFilter::All));
        assert_eq!(out, t);
    }

    #[test]
    fn month_filter_keeps_only_that_month() {
        let t = sample_table();
        let out = apply_filter(&t, &spec(MonthFilter::Only(Month::February), DayFilter::All));
        assert_eq!(stations(&out), vec!["feb-mon", "feb-tue"]);
        assert!(out.has(OptionalColumn::UserType));
    }

    #[test]
    fn day_filter_keeps_only_that_weekday() {
        let t = sample_table();
        let out = apply_filter(&t, &spec(MonthFilter::All, DayFilter::Only(Weekday::Mon)));
        assert_eq!(stations(&out), vec!["jan-mon", "feb-mon", "mar-mon"]);
    }

    #[test]
    fn month_and_day_combine() {
        let t = sample_table();
        let out = apply_filter(
            &t,
            &spec(MonthFilter::Only(Month::February), DayFilter::Only(Weekday::Tue)),
        );
        assert_eq!(stations(&out), vec!["feb-tue"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = sample_table();
        let s = spec(MonthFilter::Only(Month::February), DayFilter::Only(Weekday::Mon));
        let once = apply_filter(&t, &s);
        let twice = apply_filter(&once, &s);
        assert_eq!(once, twice);
        assert_eq!(once, apply_filter(&t, &s));
    }

    #[test]
    fn filter_can_return_empty_table() {
        let t = sample_table();
        let out = apply_filter(&t, &spec(MonthFilter::Only(Month::June), DayFilter::All));
        assert!(out.is_empty());
        assert!(out.has(OptionalColumn::UserType));
    }
}

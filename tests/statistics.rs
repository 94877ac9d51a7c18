use std::path::PathBuf;

use bikeshare_stats::ingestion::{load, LoadOptions};
use bikeshare_stats::stats::{
    duration_stats, format_duration, station_stats, time_stats, user_stats, StatsReport,
};
use bikeshare_stats::types::FilterSpec;
use bikeshare_stats::BikeshareError;

fn fixtures() -> LoadOptions {
    LoadOptions {
        data_dir: PathBuf::from("tests/fixtures"),
        ..Default::default()
    }
}

#[test]
fn chicago_time_stats() {
    let t = load("chicago", "all", "all", &fixtures()).unwrap();
    let s = time_stats(&t).unwrap();
    assert_eq!(s.most_common_month, "February");
    assert_eq!(s.most_common_weekday, "Monday");
    assert_eq!(s.most_common_start_hour, 8);
}

#[test]
fn chicago_station_stats() {
    let t = load("chicago", "all", "all", &fixtures()).unwrap();
    let s = station_stats(&t).unwrap();
    assert_eq!(s.most_common_start, "Clark St & Elm St");
    assert_eq!(s.most_common_end, "Canal St & Adams St");
    assert_eq!(s.most_common_trip, "[ Clark St & Elm St ] -->> [ Canal St & Adams St ]");
}

#[test]
fn chicago_duration_stats() {
    let t = load("chicago", "all", "all", &fixtures()).unwrap();
    let s = duration_stats(&t).unwrap();
    assert_eq!(s.total_seconds, 4101.0);
    assert_eq!(s.mean_seconds, 512.625);
    assert_eq!(format_duration(s.total_seconds), "1:08:21");
    assert_eq!(format_duration(s.mean_seconds), "0:08:32.625000");
}

#[test]
fn chicago_user_stats() {
    let t = load("chicago", "all", "all", &fixtures()).unwrap();
    let s = user_stats(&t).unwrap();
    let types = s.by_user_type.unwrap();
    assert_eq!(types.get("Subscriber"), Some(&6));
    assert_eq!(types.get("Customer"), Some(&2));
    let genders = s.by_gender.unwrap();
    assert_eq!(genders.get("Male"), Some(&4));
    assert_eq!(genders.get("Female"), Some(&2));
    assert_eq!(genders.len(), 2);
    let years = s.birth_year.unwrap();
    assert_eq!((years.oldest, years.youngest, years.most_common), (1962, 1999, 1990));
}

#[test]
fn filtered_stats_follow_the_filter() {
    let t = load("chicago", "february", "monday", &fixtures()).unwrap();
    let s = duration_stats(&t).unwrap();
    assert_eq!(s.total_seconds, 1860.0);
    assert_eq!(s.mean_seconds, 620.0);
    assert_eq!(time_stats(&t).unwrap().most_common_month, "February");
}

#[test]
fn empty_selection_fails_each_category() {
    let t = load("chicago", "june", "monday", &fixtures()).unwrap();
    assert!(t.is_empty());
    assert!(matches!(time_stats(&t), Err(BikeshareError::EmptyTable { .. })));
    assert!(matches!(station_stats(&t), Err(BikeshareError::EmptyTable { .. })));
    assert!(matches!(duration_stats(&t), Err(BikeshareError::EmptyTable { .. })));
    assert!(matches!(user_stats(&t), Err(BikeshareError::EmptyTable { .. })));
}

#[test]
fn washington_user_stats_omit_gender_and_birth_year() {
    let t = load("washington", "all", "all", &fixtures()).unwrap();
    let s = user_stats(&t).unwrap();
    assert_eq!(s.by_user_type.as_ref().and_then(|m| m.get("Subscriber")), Some(&3));
    assert!(s.by_gender.is_none());
    assert!(s.birth_year.is_none());

    let json = serde_json::to_value(&s).unwrap();
    assert!(json.get("by_user_type").is_some());
    assert!(json.get("by_gender").is_none());
    assert!(json.get("birth_year").is_none());
}

#[test]
fn washington_empty_selection_still_reports_user_counts() {
    let t = load("washington", "january", "all", &fixtures()).unwrap();
    assert!(t.is_empty());
    let s = user_stats(&t).unwrap();
    assert_eq!(s.by_user_type.map(|m| m.len()), Some(0));
}

#[test]
fn nyc_missing_cells_are_not_counted() {
    let t = load("new york city", "all", "all", &fixtures()).unwrap();
    let s = user_stats(&t).unwrap();
    let genders = s.by_gender.unwrap();
    assert_eq!(genders.values().sum::<usize>(), 4);
    let years = s.birth_year.unwrap();
    assert_eq!(years.oldest, 1981);
    assert_eq!(years.youngest, 1998);
}

#[test]
fn chicago_tuesday_has_no_birth_years() {
    // Only row 3 (a Customer with no gender or birth year) falls on a Tuesday.
    let t = load("chicago", "all", "tuesday", &fixtures()).unwrap();
    assert_eq!(t.row_count(), 1);
    assert!(t.has_column("Birth Year"));
    assert!(matches!(
        user_stats(&t),
        Err(BikeshareError::EmptyTable {
            statistic: "birth year"
        })
    ));
}

#[test]
fn full_report_serializes_with_filter() {
    let spec = FilterSpec::parse("washington", "june", "all").unwrap();
    let t = bikeshare_stats::ingestion::load_filtered(&spec, &fixtures()).unwrap();
    let report = StatsReport::compute(spec, &t).unwrap();
    assert_eq!(report.rows, 2);
    assert_eq!(report.time.most_common_weekday, "Wednesday");
    assert_eq!(
        report.stations.most_common_trip,
        "[ 14th & Belmont St NW ] -->> [ 15th & K St NW ]"
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["filter"]["city"], "washington");
    assert_eq!(json["filter"]["month"], "june");
    assert_eq!(json["filter"]["day"], "all");
    assert!(json["users"].get("by_gender").is_none());
}

use bikeshare_stats::processing::apply_filter;
use bikeshare_stats::stats::{duration_stats, station_stats, time_stats, user_stats};
use bikeshare_stats::types::{
    City, DayFilter, FilterSpec, Month, MonthFilter, OptionalColumn, TripRecord, TripTable,
};
use chrono::{NaiveDate, TimeDelta, Weekday};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const STATIONS: [&str; 6] = [
    "Clark St & Elm St",
    "Canal St & Adams St",
    "Streeter Dr & Grand Ave",
    "Lake Shore Dr & Monroe St",
    "Wells St & Concord Ln",
    "Wood St & Hubbard St",
];

fn synthetic_table(rows: usize) -> TripTable {
    let base = NaiveDate::from_ymd_opt(2017, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid base timestamp");
    let records = (0..rows)
        .map(|i| {
            let start = base + TimeDelta::minutes((i as i64 * 37) % (181 * 24 * 60));
            TripRecord::new(
                start,
                60.0 + (i % 1800) as f64,
                STATIONS[i % STATIONS.len()],
                STATIONS[(i * 7 + 3) % STATIONS.len()],
            )
            .with_user_type(if i % 5 == 0 { "Customer" } else { "Subscriber" })
            .with_gender(if i % 3 == 0 { "Female" } else { "Male" })
            .with_birth_year(1950.0 + (i % 50) as f64)
        })
        .collect();
    TripTable::new(
        [
            OptionalColumn::UserType,
            OptionalColumn::Gender,
            OptionalColumn::BirthYear,
        ],
        records,
    )
}

fn bench_pipeline(c: &mut Criterion) {
    let table = synthetic_table(100_000);
    let spec = FilterSpec::new(
        City::Chicago,
        MonthFilter::Only(Month::March),
        DayFilter::Only(Weekday::Fri),
    );

    c.bench_function("filter_month_day_100k", |b| {
        b.iter(|| apply_filter(black_box(&table), black_box(&spec)))
    });
    c.bench_function("time_stats_100k", |b| b.iter(|| time_stats(black_box(&table))));
    c.bench_function("station_stats_100k", |b| {
        b.iter(|| station_stats(black_box(&table)))
    });
    c.bench_function("duration_stats_100k", |b| {
        b.iter(|| duration_stats(black_box(&table)))
    });
    c.bench_function("user_stats_100k", |b| b.iter(|| user_stats(black_box(&table))));
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);

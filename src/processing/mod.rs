//! In-memory transformations over a loaded [`crate::types::TripTable`].
//!
//! - [`apply_filter()`]: month/weekday filtering
//! - [`mode()`], [`value_counts()`], [`sum()`], [`mean()`], [`min_max()`]: the reductions every
//!   statistic is built from
//!
//! ## Example: filter → reduce
//!
//! ```rust
//! use bikeshare_stats::processing::{apply_filter, mode};
//! use bikeshare_stats::types::{
//!     City, DayFilter, FilterSpec, Month, MonthFilter, TripRecord, TripTable,
//! };
//! use chrono::NaiveDate;
//!
//! let at = |m, d, h| NaiveDate::from_ymd_opt(2017, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
//! let table = TripTable::from_rows(vec![
//!     TripRecord::new(at(1, 2, 8), 60.0, "A", "B"),
//!     TripRecord::new(at(2, 6, 9), 90.0, "A", "C"),
//!     TripRecord::new(at(2, 7, 9), 30.0, "D", "C"),
//! ]);
//!
//! let spec = FilterSpec::new(City::Chicago, MonthFilter::Only(Month::February), DayFilter::All);
//! let february = apply_filter(&table, &spec);
//! assert_eq!(february.row_count(), 2);
//!
//! let busiest_hour = mode(february.rows().iter().map(|r| r.start_hour()));
//! assert_eq!(busiest_hour, Some(9));
//! ```

pub mod filter;
pub mod reduce;

pub use filter::apply_filter;
pub use reduce::{mean, min_max, mode, sum, value_counts};

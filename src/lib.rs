//! `bikeshare-stats` loads US bikeshare trip records from city-specific CSV files, filters them by
//! month and/or weekday, and computes descriptive statistics over what remains.
//!
//! The primary entrypoints are [`ingestion::load`] / [`ingestion::load_filtered`], which read a
//! city's file into an in-memory [`types::TripTable`], and the [`stats`] functions that aggregate
//! it.
//!
//! ## Data files
//!
//! One CSV per city, looked up under [`ingestion::LoadOptions::data_dir`]:
//!
//! - `chicago.csv`
//! - `new_york_city.csv`
//! - `washington.csv`
//!
//! Required columns are `Start Time`, `Trip Duration`, `Start Station` and `End Station`.
//! `End Time`, `User Type`, `Gender` and `Birth Year` are optional; whether a city carries them
//! is visible through [`types::TripTable::has_column`].
//!
//! ## Quick example
//!
//! ```no_run
//! use bikeshare_stats::ingestion::{load, LoadOptions};
//! use bikeshare_stats::stats::{format_duration, duration_stats, station_stats, time_stats};
//!
//! # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
//! let opts = LoadOptions {
//!     data_dir: "data".into(),
//!     ..Default::default()
//! };
//! let table = load("chicago", "march", "friday", &opts)?;
//!
//! let times = time_stats(&table)?;
//! let stations = station_stats(&table)?;
//! let durations = duration_stats(&table)?;
//! println!("busiest hour: {}", times.most_common_start_hour);
//! println!("favourite trip: {}", stations.most_common_trip);
//! println!("total riding: {}", format_duration(durations.total_seconds));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: city file loading, CSV parsing and load observers
//! - [`types`]: trip records, the trip table and filter selections
//! - [`processing`]: month/day filtering and the reductions statistics are built from
//! - [`stats`]: time, station, duration and user statistics
//! - [`pagination`]: raw-row paging
//! - [`config`]: TOML configuration
//! - [`session`] / [`render`]: the interactive terminal layer
//! - [`error`]: error types

pub mod config;
pub mod error;
pub mod ingestion;
pub mod pagination;
pub mod processing;
pub mod render;
pub mod session;
pub mod stats;
pub mod types;

pub use error::{BikeshareError, BikeshareResult};

//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load`] / [`load_filtered`] (from [`loader`]) which:
//!
//! - resolves the city's CSV under a data directory
//! - parses it into an in-memory [`crate::types::TripTable`] and applies the month/day filter
//! - reports success/failure/alerts to every configured [`LoadObserver`]
//!
//! The CSV parser itself is available under [`csv`].

pub mod csv;
pub mod loader;
pub mod observability;

pub use loader::{load, load_filtered, LoadOptions};
pub use observability::{
    FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
};

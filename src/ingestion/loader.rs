//! City loading entrypoint.
//!
//! Most callers should use [`load`] (raw strings from a prompt or command line) or
//! [`load_filtered`] (an already-validated [`FilterSpec`]). Both read the city's CSV from
//! [`LoadOptions::data_dir`], derive month/weekday, apply the filter, and report the outcome to
//! an optional [`LoadObserver`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{BikeshareError, BikeshareResult};
use crate::processing::apply_filter;
use crate::types::{City, FilterSpec, TripTable};

use super::csv::ingest_trips_from_reader;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling where city files live and who hears about load outcomes.
///
/// Use [`Default`] for files in the working directory with no observers.
#[derive(Clone)]
pub struct LoadOptions {
    /// Directory containing `chicago.csv`, `new_york_city.csv` and `washington.csv`.
    pub data_dir: PathBuf,
    /// Observers notified of every load outcome, in order.
    pub observers: Vec<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("data_dir", &self.data_dir)
            .field("observers", &self.observers.len())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            observers: Vec::new(),
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Path of `city`'s source file under [`Self::data_dir`].
    pub fn city_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}

/// Load and filter trips from raw selection strings.
///
/// `month` is `"all"` or a name from January-June; `day` is `"all"` or a weekday name. Both are
/// matched case-insensitively. Values outside those sets fail with
/// [`BikeshareError::InvalidFilter`] before any file is touched.
///
/// ```no_run
/// use bikeshare_stats::ingestion::{load, LoadOptions};
///
/// # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
/// let table = load("chicago", "february", "all", &LoadOptions::default())?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load(
    city: &str,
    month: &str,
    day: &str,
    options: &LoadOptions,
) -> BikeshareResult<TripTable> {
    let spec = FilterSpec::parse(city, month, day)?;
    load_filtered(&spec, options)
}

/// Load `spec.city` and keep only rows matching `spec`'s month and day.
///
/// Each configured observer receives:
///
/// - `on_success` on success, with rows read and rows kept
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
pub fn load_filtered(spec: &FilterSpec, options: &LoadOptions) -> BikeshareResult<TripTable> {
    let path = options.city_path(spec.city);
    let ctx = LoadContext {
        spec: *spec,
        path: path.clone(),
    };

    let result = read_city(spec.city, &path).map(|all| {
        let rows_read = all.row_count();
        let kept = apply_filter(&all, spec);
        (rows_read, kept)
    });

    match result {
        Ok((rows_read, kept)) => {
            log::debug!(
                "loaded {} with month={} day={}: {rows_read} rows read, {} kept",
                spec.city,
                spec.month,
                spec.day,
                kept.row_count()
            );
            let stats = LoadStats {
                rows_read,
                rows_kept: kept.row_count(),
            };
            for obs in &options.observers {
                obs.on_success(&ctx, stats);
            }
            Ok(kept)
        }
        Err(e) => {
            let sev = LoadSeverity::for_error(&e);
            let alert = sev >= options.alert_at_or_above;
            for obs in &options.observers {
                obs.on_failure(&ctx, sev, &e);
                if alert {
                    obs.on_alert(&ctx, sev, &e);
                }
            }
            Err(e)
        }
    }
}

/// Read every row of `city`'s file.
///
/// The file is read into memory up front so that any I/O failure (missing file, a directory in
/// its place, a failing disk) surfaces as [`BikeshareError::DataUnavailable`]; what remains can
/// only fail on content.
fn read_city(city: City, path: &Path) -> BikeshareResult<TripTable> {
    let bytes = std::fs::read(path).map_err(|source| BikeshareError::DataUnavailable {
        city,
        path: path.to_path_buf(),
        source,
    })?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    ingest_trips_from_reader(&mut rdr)
}

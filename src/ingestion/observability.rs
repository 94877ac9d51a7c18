//! Load outcome reporting: observers, severities and the two built-in sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use serde::Deserialize;

use crate::error::BikeshareError;
use crate::types::{City, FilterSpec};

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed).
    Error,
    /// Critical error (source data missing or unreadable).
    Critical,
}

impl LoadSeverity {
    /// Severity of a load failure: missing or unreadable data is critical, bad content is an
    /// error.
    pub fn for_error(e: &BikeshareError) -> Self {
        match e {
            BikeshareError::DataUnavailable { .. } | BikeshareError::Io(_) => Self::Critical,
            _ => Self::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The filter being applied.
    pub spec: FilterSpec,
    /// Resolved source file.
    pub path: PathBuf,
}

impl LoadContext {
    /// City whose file was loaded.
    pub fn city(&self) -> City {
        self.spec.city
    }
}

/// Row counts reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows read from the source file.
    pub rows_read: usize,
    /// Rows remaining after the month/day filter.
    pub rows_kept: usize,
}

/// Receives load outcomes. Every callback defaults to doing nothing.
///
/// A failure always reaches [`on_failure`](Self::on_failure); when its severity meets
/// [`LoadOptions::alert_at_or_above`](super::LoadOptions::alert_at_or_above) it additionally
/// reaches [`on_alert`](Self::on_alert).
pub trait LoadObserver: Send + Sync {
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &BikeshareError) {}

    fn on_alert(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &BikeshareError) {}
}

/// Forwards load events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            "[load][ok] city={} path={} rows_read={} rows_kept={}",
            ctx.city(),
            ctx.path.display(),
            stats.rows_read,
            stats.rows_kept
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        log::warn!(
            "[load][{:?}] city={} path={} err={}",
            severity,
            ctx.city(),
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        log::error!(
            "[ALERT][load][{:?}] city={} path={} err={}",
            severity,
            ctx.city(),
            ctx.path.display(),
            error
        );
    }
}

/// Appends one timestamped line per load event to a log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileObserver {
    /// Open (creating if needed) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Log file being appended to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append_line(&self, line: &str) {
        let Ok(mut file) = self.file.lock() else {
            return;
        };
        if let Err(e) = writeln!(file, "{} {line}", timestamp()) {
            log::warn!("cannot append to {}: {e}", self.path.display());
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "ok city={} path={} rows_read={} rows_kept={}",
            ctx.city(),
            ctx.path.display(),
            stats.rows_read,
            stats.rows_kept
        ));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.append_line(&format!(
            "fail severity={:?} city={} path={} err={}",
            severity,
            ctx.city(),
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.append_line(&format!(
            "ALERT severity={:?} city={} path={} err={}",
            severity,
            ctx.city(),
            ctx.path.display(),
            error
        ));
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

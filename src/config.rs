//! TOML configuration.
//!
//! ```toml
//! data_dir = "/srv/bikeshare"
//! page_size = 5
//! log_file = "bikeshare.log"
//! alert_at_or_above = "critical"
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{BikeshareError, BikeshareResult};
use crate::ingestion::{FileObserver, LoadObserver, LoadOptions, LoadSeverity, LogObserver};
use crate::pagination::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Runtime settings, read from TOML and overridable from the command line.
pub struct Config {
    /// Directory holding the city CSV files.
    pub data_dir: PathBuf,
    /// Raw rows shown per page.
    pub page_size: usize,
    /// If set, load events are also appended to this file.
    pub log_file: Option<PathBuf>,
    /// Failures at or above this severity are raised as alerts.
    pub alert_at_or_above: LoadSeverity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
            log_file: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> BikeshareResult<Self> {
        let cfg: Config = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate the TOML file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> BikeshareResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject values the rest of the crate cannot work with (currently a zero `page_size`).
    pub fn validate(&self) -> BikeshareResult<()> {
        if self.page_size == 0 {
            return Err(BikeshareError::InvalidConfig {
                message: "page_size must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Load options wired to a [`LogObserver`], plus a [`FileObserver`] when `log_file` is set.
    ///
    /// Fails if `log_file` cannot be opened for appending.
    pub fn load_options(&self) -> BikeshareResult<LoadOptions> {
        let mut observers: Vec<Arc<dyn LoadObserver>> = vec![Arc::new(LogObserver)];
        if let Some(path) = &self.log_file {
            observers.push(Arc::new(FileObserver::open(path)?));
        }
        Ok(LoadOptions {
            data_dir: self.data_dir.clone(),
            observers,
            alert_at_or_above: self.alert_at_or_above,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn parses_every_key() {
        let cfg = Config::from_toml_str(
            r#"
data_dir = "data"
page_size = 10
log_file = "load.log"
alert_at_or_above = "error"
"#,
        )
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.page_size, 10);
        assert_eq!(cfg.log_file, Some(PathBuf::from("load.log")));
        assert_eq!(cfg.alert_at_or_above, LoadSeverity::Error);
    }

    #[test]
    fn load_options_adds_file_observer_only_when_configured() {
        let cfg = Config {
            data_dir: PathBuf::from("data"),
            ..Config::default()
        };
        let opts = cfg.load_options().unwrap();
        assert_eq!(opts.data_dir, PathBuf::from("data"));
        assert_eq!(opts.observers.len(), 1);

        let log_file = std::env::temp_dir().join("bikeshare-config-load-options.log");
        let cfg = Config {
            log_file: Some(log_file.clone()),
            ..cfg
        };
        assert_eq!(cfg.load_options().unwrap().observers.len(), 2);
        assert!(log_file.exists());
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let cfg = Config {
            log_file: Some(PathBuf::from("definitely/not/here/load.log")),
            ..Config::default()
        };
        assert!(matches!(cfg.load_options(), Err(BikeshareError::Io(_))));
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = Config::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Config::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(matches!(err, BikeshareError::ConfigParse(_)));
    }
}

//! Report configuration
//!
//! Defaults match the station layout: archive in `dati/`, rendered reports in
//! `reports/`, schedule state in `lastAct.json` next to the binary.
//!
//! ```rust
//! use airlog_report::ReportConfig;
//!
//! let config = ReportConfig::new("/srv/station/dati")
//!     .reports_dir("/srv/station/reports")
//!     .report_hour(22);
//! assert_eq!(config.snapshot_file, std::path::PathBuf::from("/srv/station/dati/last.json"));
//! ```

use std::env;
use std::path::PathBuf;

use crate::{ReportError, ReportResult};

/// Environment variable overriding [`ReportConfig::data_dir`]
pub const ENV_DATA_DIR: &str = "AIRLOG_DATA_DIR";
/// Environment variable overriding [`ReportConfig::reports_dir`]
pub const ENV_REPORTS_DIR: &str = "AIRLOG_REPORTS_DIR";
/// Environment variable overriding [`ReportConfig::state_file`]
pub const ENV_STATE_FILE: &str = "AIRLOG_STATE_FILE";
/// Environment variable overriding [`ReportConfig::report_hour`]
pub const ENV_REPORT_HOUR: &str = "AIRLOG_REPORT_HOUR";

/// Character limit of a single published post
pub const DEFAULT_MAX_POST_CHARS: usize = 280;

/// Hour of day at which periodic reports become due
pub const DEFAULT_REPORT_HOUR: u32 = 23;

/// Paths and limits used by the report runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Archive root (`YYYY/MM/DD` tree)
    pub data_dir: PathBuf,
    /// Where rendered reports are written
    pub reports_dir: PathBuf,
    /// Persisted schedule state
    pub state_file: PathBuf,
    /// Latest raw reading per quantity (JSON)
    pub snapshot_file: PathBuf,
    /// Pre-written hardware status text
    pub hardware_report_file: PathBuf,
    /// Post length limit, in characters
    pub max_post_chars: usize,
    /// Hour of day periodic reports run at
    pub report_hour: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new("dati")
    }
}

impl ReportConfig {
    /// Configuration for an archive at `data_dir`; snapshot and hardware
    /// report files are looked up inside it
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            snapshot_file: data_dir.join("last.json"),
            hardware_report_file: data_dir.join("report.txt"),
            data_dir,
            reports_dir: PathBuf::from("reports"),
            state_file: PathBuf::from("lastAct.json"),
            max_post_chars: DEFAULT_MAX_POST_CHARS,
            report_hour: DEFAULT_REPORT_HOUR,
        }
    }

    /// Defaults overlaid with `AIRLOG_*` environment variables
    pub fn from_env() -> ReportResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> ReportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_DATA_DIR) {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        };
        if let Some(dir) = lookup(ENV_REPORTS_DIR) {
            config.reports_dir = dir.into();
        }
        if let Some(file) = lookup(ENV_STATE_FILE) {
            config.state_file = file.into();
        }
        if let Some(hour) = lookup(ENV_REPORT_HOUR) {
            let hour = hour
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|h| *h < 24)
                .ok_or_else(|| ReportError::Config(format!("{ENV_REPORT_HOUR} must be 0-23, got {hour:?}")))?;
            config.report_hour = hour;
        }
        Ok(config)
    }

    pub fn reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }

    pub fn state_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.state_file = file.into();
        self
    }

    pub fn snapshot_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.snapshot_file = file.into();
        self
    }

    pub fn hardware_report_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.hardware_report_file = file.into();
        self
    }

    pub fn max_post_chars(mut self, chars: usize) -> Self {
        self.max_post_chars = chars;
        self
    }

    pub fn report_hour(mut self, hour: u32) -> Self {
        self.report_hour = hour;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ReportConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("dati"));
        assert_eq!(config.snapshot_file, PathBuf::from("dati/last.json"));
        assert_eq!(config.hardware_report_file, PathBuf::from("dati/report.txt"));
        assert_eq!(config.reports_dir, PathBuf::from("reports"));
        assert_eq!(config.state_file, PathBuf::from("lastAct.json"));
        assert_eq!(config.max_post_chars, 280);
        assert_eq!(config.report_hour, 23);
    }

    #[test]
    fn environment_overrides() {
        let config = ReportConfig::from_lookup(lookup(&[
            (ENV_DATA_DIR, "/srv/dati"),
            (ENV_REPORTS_DIR, "/srv/out"),
            (ENV_STATE_FILE, "/srv/state.json"),
            (ENV_REPORT_HOUR, "21"),
        ]))
        .unwrap();
        assert_eq!(config.snapshot_file, PathBuf::from("/srv/dati/last.json"));
        assert_eq!(config.reports_dir, PathBuf::from("/srv/out"));
        assert_eq!(config.state_file, PathBuf::from("/srv/state.json"));
        assert_eq!(config.report_hour, 21);
    }

    #[test]
    fn bad_hour_is_rejected() {
        for bad in ["24", "late", "-1"] {
            let err = ReportConfig::from_lookup(lookup(&[(ENV_REPORT_HOUR, bad)])).unwrap_err();
            assert!(matches!(err, ReportError::Config(_)), "{bad}");
        }
    }
}

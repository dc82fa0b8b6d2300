//! ordersync Configuration
//!
//! TOML-based configuration loading with sensible defaults, plus credential
//! resolution from environment variables.
//!
//! # Parsing
//!
//! ```
//! use ordersync_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[log]\nlevel = \"debug\"").unwrap();
//! assert!(config.reports.is_empty());
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [shopware]
//! base_url = "https://shop.example.com"
//!
//! [reports.daily]
//! kind = "daily_revenue"
//! statuses = ["paid", "in_progress", "refunded_partially", "refunded"]
//! spreadsheet = "https://docs.google.com/spreadsheets/d/<id>/edit"
//! sheet = "[Data] Shopware Orders NEW"
//! ```
//!
//! Secrets never live in the file: see [`Credentials`].

mod credentials;
mod error;
mod global;
mod google;
mod logging;
mod reports;
mod shopware;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use credentials::Credentials;
pub use error::{ConfigError, Result};
pub use global::GlobalConfig;
pub use google::GoogleConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use reports::{DEFAULT_SINCE, ReportConfig, ReportsConfig};
pub use shopware::{DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, ShopwareConfig};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Global settings (user agent, scheduler interval)
    pub global: GlobalConfig,

    /// Logging configuration
    pub log: LogConfig,

    /// Shop API connection
    pub shopware: ShopwareConfig,

    /// Sheets destination
    pub google: GoogleConfig,

    /// Named report definitions
    pub reports: ReportsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Look up a report by name
    pub fn report(&self, name: &str) -> Result<&ReportConfig> {
        self.reports
            .get(name)
            .ok_or_else(|| ConfigError::unknown_report(name))
    }

    /// Names of enabled reports, erroring if there are none
    pub fn enabled_reports(&self) -> Result<Vec<&str>> {
        let names: Vec<&str> = self.reports.enabled().map(|(n, _)| n.as_str()).collect();
        if names.is_empty() {
            return Err(ConfigError::NoReports);
        }
        Ok(names)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordersync_protocol::{DedupMode, ReportKind};
    use std::io::Write;

    const FULL: &str = r#"
[global]
check_interval_secs = 30

[log]
level = "debug"
format = "json"

[shopware]
base_url = "https://shop.example.com"
page_size = 250

[google]
service_account_env = "SA_JSON"

[reports.daily]
kind = "daily_revenue"
statuses = ["paid", "in_progress", "refunded_partially", "refunded"]
spreadsheet = "https://docs.google.com/spreadsheets/d/abc/edit"
sheet = "[Data] Shopware Orders NEW"
schedule = "0 0 6 * * *"

[reports.monthly]
kind = "monthly_status"
spreadsheet = "abc"
sheet = "Monthly"

[reports.paused]
enabled = false
"#;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert!(config.reports.is_empty());
        assert_eq!(config.shopware.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_full_config_parse() {
        let config = Config::from_str(FULL).unwrap();

        assert_eq!(config.global.check_interval_secs, 30);
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.shopware.page_size, 250);
        assert_eq!(config.google.service_account_env, "SA_JSON");
        assert_eq!(config.reports.len(), 3);

        let daily = config.report("daily").unwrap();
        assert_eq!(daily.kind, ReportKind::DailyRevenue);
        assert_eq!(daily.dedup_mode(), DedupMode::ById);
        assert_eq!(daily.statuses.len(), 4);

        let monthly = config.report("monthly").unwrap();
        assert_eq!(monthly.kind, ReportKind::MonthlyStatus);
    }

    #[test]
    fn test_enabled_reports() {
        let config = Config::from_str(FULL).unwrap();
        assert_eq!(config.enabled_reports().unwrap(), vec!["daily", "monthly"]);
    }

    #[test]
    fn test_no_enabled_reports() {
        let config = Config::from_str("").unwrap();
        assert!(matches!(config.enabled_reports(), Err(ConfigError::NoReports)));
    }

    #[test]
    fn test_unknown_report() {
        let config = Config::from_str(FULL).unwrap();
        assert!(matches!(
            config.report("weekly"),
            Err(ConfigError::UnknownReport { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.reports.len(), 3);
    }

    #[test]
    fn test_from_missing_file() {
        let result = Config::from_file("/definitely/not/here/ordersync.toml");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}

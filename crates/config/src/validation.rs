//! Configuration validation
//!
//! Checks config consistency:
//! - Shopware base URL is present and http(s)
//! - Page size and timeouts are non-zero
//! - Enabled reports name a spreadsheet and sheet
//! - Report `since` bounds parse as RFC 3339
//! - Status filters contain no empty names

use crate::Config;
use crate::error::{ConfigError, Result};
use crate::reports::ReportConfig;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_shopware(config)?;
    for (name, report) in config.reports.enabled() {
        validate_report(name, report)?;
    }
    Ok(())
}

fn validate_shopware(config: &Config) -> Result<()> {
    let shopware = &config.shopware;

    // An empty file is a valid (if useless) config; only check the URL
    // once something needs it.
    if !config.reports.is_empty() && shopware.base_url.is_empty() {
        return Err(ConfigError::missing_field("shopware", "shopware", "base_url"));
    }

    if !shopware.base_url.is_empty()
        && !(shopware.base_url.starts_with("http://") || shopware.base_url.starts_with("https://"))
    {
        return Err(ConfigError::invalid_value(
            "shopware",
            "shopware",
            "base_url",
            "must start with http:// or https://",
        ));
    }

    if shopware.page_size == 0 {
        return Err(ConfigError::invalid_value(
            "shopware",
            "shopware",
            "page_size",
            "must be greater than 0",
        ));
    }

    if shopware.timeout_secs == 0 {
        return Err(ConfigError::invalid_value(
            "shopware",
            "shopware",
            "timeout_secs",
            "must be greater than 0",
        ));
    }

    if shopware.max_pages == Some(0) {
        return Err(ConfigError::invalid_value(
            "shopware",
            "shopware",
            "max_pages",
            "must be greater than 0 (omit for no limit)",
        ));
    }

    Ok(())
}

fn validate_report(name: &str, report: &ReportConfig) -> Result<()> {
    if report.spreadsheet.trim().is_empty() {
        return Err(ConfigError::missing_field("report", name, "spreadsheet"));
    }
    if report.sheet.trim().is_empty() {
        return Err(ConfigError::missing_field("report", name, "sheet"));
    }

    chrono::DateTime::parse_from_rfc3339(&report.since)
        .map_err(|e| ConfigError::invalid_value("report", name, "since", e.to_string()))?;

    if report.statuses.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::invalid_value(
            "report",
            name,
            "statuses",
            "status names must not be empty",
        ));
    }

    Ok(())
}

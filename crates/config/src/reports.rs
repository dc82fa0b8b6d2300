//! Report configuration types
//!
//! Each `[reports.<name>]` section describes one order pull, its grouping
//! variant, and the sheet it is written to.
//!
//! # Example
//!
//! ```toml
//! [reports.daily]
//! kind = "daily_revenue"
//! since = "2022-01-01T00:00:00.000Z"
//! statuses = ["paid", "in_progress", "refunded_partially", "refunded"]
//! spreadsheet = "https://docs.google.com/spreadsheets/d/<id>/edit"
//! sheet = "[Data] Shopware Orders NEW"
//! schedule = "0 0 6 * * *"
//!
//! [reports.monthly]
//! kind = "monthly_status"
//! spreadsheet = "<id>"
//! sheet = "Monthly Status"
//! ```

use ordersync_protocol::{DedupMode, ReportKind};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Default lower bound for order timestamps
pub const DEFAULT_SINCE: &str = "2022-01-01T00:00:00.000Z";

/// Container for all report configurations, keyed by name
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportsConfig {
    #[serde(flatten)]
    reports: BTreeMap<String, ReportConfig>,
}

impl ReportsConfig {
    pub fn get(&self, name: &str) -> Option<&ReportConfig> {
        self.reports.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.reports.contains_key(name)
    }

    /// Iterate over all reports in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ReportConfig)> {
        self.reports.iter()
    }

    /// Iterate over enabled reports in name order
    pub fn enabled(&self) -> impl Iterator<Item = (&String, &ReportConfig)> {
        self.reports.iter().filter(|(_, r)| r.enabled)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.reports.keys()
    }

    /// Insert or replace a report (for programmatic configs)
    pub fn insert(&mut self, name: impl Into<String>, report: ReportConfig) {
        self.reports.insert(name.into(), report);
    }
}

/// One report definition
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Grouping variant
    /// Default: daily_revenue
    pub kind: ReportKind,

    /// Default: true
    pub enabled: bool,

    /// 6-field cron expression (with seconds) for `serve`
    /// If not set, the report only runs via `run`
    pub schedule: Option<String>,

    /// Only orders at or after this RFC 3339 timestamp
    pub since: String,

    /// Transaction statuses to include
    /// Empty = no status filter, one = equality, several = OR
    pub statuses: Vec<String>,

    /// Id deduplication (default depends on `kind`)
    pub dedup: Option<DedupMode>,

    /// Expand transactions.stateMachineState in results
    /// Default: true
    pub associations: bool,

    /// Spreadsheet URL or id
    pub spreadsheet: String,

    /// Worksheet (tab) title
    pub sheet: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            kind: ReportKind::default(),
            enabled: true,
            schedule: None,
            since: DEFAULT_SINCE.into(),
            statuses: Vec::new(),
            dedup: None,
            associations: true,
            spreadsheet: String::new(),
            sheet: String::new(),
        }
    }
}

impl ReportConfig {
    /// Effective dedup mode: explicit setting, else the kind's default
    pub fn dedup_mode(&self) -> DedupMode {
        self.dedup.unwrap_or_else(|| self.kind.default_dedup())
    }

    pub fn has_schedule(&self) -> bool {
        self.schedule.is_some()
    }
}

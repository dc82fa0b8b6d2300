//! Global configuration settings
//!
//! Settings shared by every report run.

use serde::Deserialize;

/// Global configuration that applies to all reports
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// User agent sent with every outbound request
    /// Default: "ordersync/<version>"
    pub user_agent: String,

    /// How often the scheduler checks for due reports (seconds)
    /// Default: 60
    pub check_interval_secs: u64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("ordersync/", env!("CARGO_PKG_VERSION")).into(),
            check_interval_secs: 60,
        }
    }
}

//! Google Sheets destination settings

use serde::Deserialize;

/// Google API configuration
///
/// # Example
///
/// ```toml
/// [google]
/// service_account_env = "GOOGLE_SERVICE_ACCOUNT_JSON"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Environment variable holding the service-account key JSON
    /// Default: GOOGLE_SERVICE_ACCOUNT_JSON
    pub service_account_env: String,

    /// Sheets API base URL
    /// Default: https://sheets.googleapis.com
    pub sheets_api_url: String,

    /// Request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            service_account_env: "GOOGLE_SERVICE_ACCOUNT_JSON".into(),
            sheets_api_url: "https://sheets.googleapis.com".into(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: GoogleConfig = toml::from_str("").unwrap();
        assert_eq!(config.service_account_env, "GOOGLE_SERVICE_ACCOUNT_JSON");
        assert_eq!(config.sheets_api_url, "https://sheets.googleapis.com");
        assert_eq!(config.timeout_secs, 30);
    }
}

//! Shopware Admin API settings
//!
//! Credentials are never stored in the config file; only the names of the
//! environment variables that hold them.

use serde::Deserialize;

/// Default page size for order search requests
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shopware connection configuration
///
/// # Example
///
/// ```toml
/// [shopware]
/// base_url = "https://shop.example.com"
/// page_size = 500
/// timeout_secs = 30
/// max_pages = 2000        # optional ceiling, default: unbounded
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShopwareConfig {
    /// Shop base URL, without the /api suffix (required)
    pub base_url: String,

    /// Default: /api/oauth/token
    pub token_path: String,

    /// Default: /api/search/order
    pub search_path: String,

    /// Default: SHOPWARE_CLIENT_ID
    pub client_id_env: String,

    /// Default: SHOPWARE_CLIENT_SECRET
    pub client_secret_env: String,

    /// Orders requested per page
    /// Default: 500
    pub page_size: u32,

    /// Stop paging after this many pages (None = until an empty page)
    pub max_pages: Option<u32>,

    /// Per-request timeout in seconds
    /// Default: 30
    pub timeout_secs: u64,
}

impl Default for ShopwareConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_path: "/api/oauth/token".into(),
            search_path: "/api/search/order".into(),
            client_id_env: "SHOPWARE_CLIENT_ID".into(),
            client_secret_env: "SHOPWARE_CLIENT_SECRET".into(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ShopwareConfig {
    /// Full URL of the OAuth token endpoint
    pub fn token_url(&self) -> String {
        join_url(&self.base_url, &self.token_path)
    }

    /// Full URL of the order search endpoint
    pub fn search_url(&self) -> String {
        join_url(&self.base_url, &self.search_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

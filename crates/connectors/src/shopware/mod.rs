//! Shopware connector for pulling orders
//!
//! Exchanges integration credentials for a bearer token, then answers order
//! search pages for [`OrderPages`](crate::OrderPages).

use crate::error::ConnectorError;
use crate::query::OrderQuery;
use crate::traits::{OrderPage, OrderSource};
use ordersync_config::{Config, Credentials};
use ordersync_protocol::OrderRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shopware client settings resolved from config and credentials
#[derive(Debug, Clone)]
pub struct ShopwareClientConfig {
    /// Full OAuth token endpoint URL
    pub token_url: String,
    /// Full order search endpoint URL
    pub search_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ShopwareClientConfig {
    /// Settings for a shop at `base_url` with the default endpoint paths
    pub fn for_base_url(
        base_url: &str,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token_url: format!("{}/api/oauth/token", base),
            search_url: format!("{}/api/search/order", base),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            timeout_secs: ordersync_config::DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("ordersync/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Shopware Admin API client
pub struct Shopware {
    token_url: String,
    search_url: String,
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
}

impl Shopware {
    /// Create a new Shopware client
    ///
    /// # Errors
    ///
    /// Returns error if credentials are empty or HTTP client creation fails
    pub fn new(config: ShopwareClientConfig) -> Result<Self, ConnectorError> {
        if config.client_id.trim().is_empty() || config.client_secret.trim().is_empty() {
            return Err(ConnectorError::ConfigError(
                "Shopware client id and secret must not be empty".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConnectorError::Init(format!("Shopware HTTP client: {}", e)))?;

        Ok(Self {
            token_url: config.token_url,
            search_url: config.search_url,
            client_id: config.client_id,
            client_secret: config.client_secret,
            client,
        })
    }

    /// Create a Shopware client from loaded config and resolved credentials
    ///
    /// # Errors
    ///
    /// Returns error if credentials are empty or HTTP client creation fails
    pub fn from_config(config: &Config, credentials: &Credentials) -> Result<Self, ConnectorError> {
        Self::new(ShopwareClientConfig {
            token_url: config.shopware.token_url(),
            search_url: config.shopware.search_url(),
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            timeout_secs: config.shopware.timeout_secs,
            user_agent: config.global.user_agent.clone(),
        })
    }

    /// Obtain a bearer token using the client-credentials grant
    ///
    /// # Errors
    ///
    /// `AuthFailed` on a non-2xx response or a response without `access_token`;
    /// `Http` on transport failure.
    pub async fn access_token(&self) -> Result<AccessToken, ConnectorError> {
        let request = TokenRequest {
            grant_type: "client_credentials",
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        };

        debug!(url = %self.token_url, "requesting access token");
        let response = self
            .client
            .post(&self.token_url)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ConnectorError::AuthFailed {
                status: status.as_u16(),
                body,
            });
        }

        let token = serde_json::from_str::<TokenResponse>(&body)
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ConnectorError::AuthFailed {
                status: status.as_u16(),
                body,
            })?;

        info!(connector = "shopware", "obtained access token");
        Ok(AccessToken(token))
    }

    /// Order search bound to a token
    pub fn orders(&self, token: AccessToken) -> OrderSearch<'_> {
        OrderSearch {
            shopware: self,
            token,
        }
    }
}

/// Bearer token for the Admin API
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Authenticated order search
pub struct OrderSearch<'a> {
    shopware: &'a Shopware,
    token: AccessToken,
}

impl OrderSource for OrderSearch<'_> {
    fn name(&self) -> &'static str {
        "shopware"
    }

    async fn fetch_page(
        &self,
        query: &OrderQuery,
        page: u32,
    ) -> Result<OrderPage, ConnectorError> {
        let response = self
            .shopware
            .client
            .post(&self.shopware.search_url)
            .bearer_auth(self.token.as_str())
            .json(&query.payload(page))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::Status {
                endpoint: "order search",
                status: status.as_u16(),
                body,
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(parse_records(body.data, page))
    }
}

/// Decode records one at a time; a malformed record is dropped, not the page
fn parse_records(data: Option<Vec<Value>>, page: u32) -> OrderPage {
    let data = data.unwrap_or_default();
    let received = data.len();
    let mut records = Vec::with_capacity(received);
    for value in data {
        match serde_json::from_value::<OrderRecord>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!(page, error = %e, "skipping malformed order record"),
        }
    }
    OrderPage { records, received }
}

// --- Wire Types ---

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
}

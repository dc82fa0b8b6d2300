//! Service-account authentication
//!
//! Signs an RS256 JWT assertion with the account's private key and trades
//! it for a bearer token at the account's `token_uri`.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::SinkError;

/// OAuth scope for reading and writing spreadsheets
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Grant type for the JWT bearer flow
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Used when the key JSON has no `token_uri`
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Assertion lifetime in seconds
const ASSERTION_TTL_SECS: i64 = 3600;

/// Fields of a service-account key file we use
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("client_email", &self.client_email)
            .field("private_key", &"***")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

impl ServiceAccount {
    /// Parse a service-account key JSON blob
    ///
    /// # Errors
    ///
    /// `Auth` if the JSON is not a key file or lacks `client_email`/`private_key`.
    pub fn from_json(json: &str) -> Result<Self, SinkError> {
        let account: Self = serde_json::from_str(json)
            .map_err(|e| SinkError::auth(format!("invalid service account JSON: {}", e)))?;

        if account.client_email.trim().is_empty() {
            return Err(SinkError::auth("service account JSON has empty client_email"));
        }
        if account.private_key.trim().is_empty() {
            return Err(SinkError::auth("service account JSON has empty private_key"));
        }
        Ok(account)
    }

    /// Signed JWT assertion issued at `iat` (unix seconds)
    pub fn assertion(&self, iat: i64) -> Result<String, SinkError> {
        let claims = Claims {
            iss: self.client_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_TTL_SECS,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| SinkError::auth(format!("invalid service account private key: {}", e)))?;

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SinkError::auth(format!("failed to sign assertion: {}", e)))
    }

    /// Exchange a fresh assertion for an access token
    ///
    /// # Errors
    ///
    /// `Auth` on a non-2xx response or a response without `access_token`.
    pub async fn fetch_token(&self, client: &reqwest::Client) -> Result<String, SinkError> {
        let assertion = self.assertion(Utc::now().timestamp())?;
        let body = format!(
            "grant_type={}&assertion={}",
            urlencoding::encode(JWT_BEARER_GRANT),
            urlencoding::encode(&assertion)
        );

        let response = client
            .post(&self.token_uri)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SinkError::auth(format!(
                "token endpoint returned HTTP {}: {}",
                status.as_u16(),
                text
            )));
        }

        let token = serde_json::from_str::<TokenResponse>(&text)
            .ok()
            .and_then(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                SinkError::auth(format!("token response without access_token: {}", text))
            })?;

        info!(account = %self.client_email, "obtained Google access token");
        Ok(token)
    }
}

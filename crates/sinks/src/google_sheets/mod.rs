//! Google Sheets sink
//!
//! Replaces the contents of one worksheet with a report table through the
//! Sheets v4 REST API.
//!
//! # Call sequence
//!
//! ```text
//! connect: POST token_uri -> GET spreadsheets/{id}?fields=sheets.properties
//! clear:   POST values/{'tab'}:clear
//! write:   POST {id}:batchUpdate (resize grid, number-format count column)
//!          PUT  values/{'tab'}!A1?valueInputOption=USER_ENTERED
//! ```

mod auth;

use std::time::Duration;

use ordersync_config::{Config, ReportConfig};
use ordersync_protocol::Table;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::common::{SinkError, TabularSink};

pub use auth::{DEFAULT_TOKEN_URI, JWT_BEARER_GRANT, SHEETS_SCOPE, ServiceAccount};

/// Where and how to reach one worksheet
#[derive(Debug, Clone)]
pub struct SheetsSettings {
    /// Sheets API base URL, without /v4
    pub api_url: String,
    /// Spreadsheet URL or bare id
    pub spreadsheet: String,
    /// Worksheet (tab) title
    pub sheet: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl SheetsSettings {
    /// Settings for a report's destination
    pub fn for_report(config: &Config, report: &ReportConfig) -> Self {
        Self {
            api_url: config.google.sheets_api_url.clone(),
            spreadsheet: report.spreadsheet.clone(),
            sheet: report.sheet.clone(),
            timeout_secs: config.google.timeout_secs,
            user_agent: config.global.user_agent.clone(),
        }
    }
}

/// Extract the spreadsheet id from a share URL or accept a bare id
///
/// # Errors
///
/// `InvalidDestination` if the value is empty or the URL has no `/d/<id>` part.
pub fn spreadsheet_id(destination: &str) -> Result<String, SinkError> {
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(SinkError::InvalidDestination("empty spreadsheet".into()));
    }

    if !destination.contains('/') {
        return Ok(destination.to_string());
    }

    let id = destination
        .split_once("/spreadsheets/d/")
        .map(|(_, rest)| rest)
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            SinkError::InvalidDestination(format!("no spreadsheet id in {:?}", destination))
        })?;

    Ok(id.to_string())
}

/// A1 range covering a whole tab, with the title quoted
fn tab_range(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// Sheets sink bound to one worksheet
pub struct GoogleSheetsSink {
    client: reqwest::Client,
    api_url: String,
    spreadsheet_id: String,
    sheet: String,
    sheet_id: i64,
    token: String,
}

impl std::fmt::Debug for GoogleSheetsSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsSink")
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet", &self.sheet)
            .field("sheet_id", &self.sheet_id)
            .finish_non_exhaustive()
    }
}

impl GoogleSheetsSink {
    /// Authenticate as the service account and resolve the worksheet
    ///
    /// # Errors
    ///
    /// `Auth` if the token exchange fails, `SheetNotFound` if the tab is missing.
    pub async fn connect(
        settings: SheetsSettings,
        account: &ServiceAccount,
    ) -> Result<Self, SinkError> {
        let client = build_client(&settings)?;
        let token = account.fetch_token(&client).await?;
        Self::open(client, settings, token).await
    }

    /// Resolve the worksheet using an existing bearer token
    pub async fn with_bearer(
        settings: SheetsSettings,
        token: impl Into<String>,
    ) -> Result<Self, SinkError> {
        let client = build_client(&settings)?;
        Self::open(client, settings, token.into()).await
    }

    async fn open(
        client: reqwest::Client,
        settings: SheetsSettings,
        token: String,
    ) -> Result<Self, SinkError> {
        let spreadsheet_id = spreadsheet_id(&settings.spreadsheet)?;
        let mut sink = Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            sheet: settings.sheet,
            sheet_id: 0,
            token,
        };
        sink.sheet_id = sink.lookup_sheet_id().await?;
        info!(
            spreadsheet = %sink.spreadsheet_id,
            sheet = %sink.sheet,
            sheet_id = sink.sheet_id,
            "opened worksheet"
        );
        Ok(sink)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Numeric id of the worksheet
    pub fn sheet_id(&self) -> i64 {
        self.sheet_id
    }

    fn spreadsheet_url(&self) -> String {
        format!("{}/v4/spreadsheets/{}", self.api_url, self.spreadsheet_id)
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/values/{}", self.spreadsheet_url(), urlencoding::encode(range))
    }

    async fn lookup_sheet_id(&self) -> Result<i64, SinkError> {
        let response = self
            .client
            .get(format!("{}?fields=sheets.properties", self.spreadsheet_url()))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let metadata: SpreadsheetMetadata = check(response, "spreadsheet lookup")
            .await?
            .json()
            .await?;

        metadata
            .sheets
            .into_iter()
            .map(|s| s.properties)
            .find(|p| p.title == self.sheet)
            .map(|p| p.sheet_id)
            .ok_or_else(|| SinkError::SheetNotFound {
                spreadsheet: self.spreadsheet_id.clone(),
                sheet: self.sheet.clone(),
            })
    }

    /// Resize the grid and number-format the numeric columns below the header
    fn format_requests(&self, table: &Table) -> Value {
        let mut requests = vec![json!({
            "updateSheetProperties": {
                "properties": {
                    "sheetId": self.sheet_id,
                    "gridProperties": {
                        "rowCount": table.len() + 1,
                        "columnCount": table.width().max(1),
                    }
                },
                "fields": "gridProperties.rowCount,gridProperties.columnCount"
            }
        })];

        for &column in table.numeric_columns() {
            requests.push(json!({
                "repeatCell": {
                    "range": {
                        "sheetId": self.sheet_id,
                        "startRowIndex": 1,
                        "startColumnIndex": column,
                        "endColumnIndex": column + 1,
                    },
                    "cell": {"userEnteredFormat": {"numberFormat": {"type": "NUMBER"}}},
                    "fields": "userEnteredFormat.numberFormat"
                }
            }));
        }

        json!({ "requests": requests })
    }
}

impl TabularSink for GoogleSheetsSink {
    fn name(&self) -> &str {
        "google_sheets"
    }

    async fn clear(&self) -> Result<(), SinkError> {
        let url = format!("{}:clear", self.values_url(&tab_range(&self.sheet)));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()
            .await?;
        check(response, "values clear").await?;

        debug!(sheet = %self.sheet, "cleared worksheet");
        Ok(())
    }

    async fn write(&self, table: &Table) -> Result<(), SinkError> {
        let response = self
            .client
            .post(format!("{}:batchUpdate", self.spreadsheet_url()))
            .bearer_auth(&self.token)
            .json(&self.format_requests(table))
            .send()
            .await?;
        check(response, "batch update").await?;

        let range = format!("{}!A1", tab_range(&self.sheet));
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": table.to_json_rows(),
        });
        let response = self
            .client
            .put(format!("{}?valueInputOption=USER_ENTERED", self.values_url(&range)))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        check(response, "values update").await?;

        info!(
            spreadsheet = %self.spreadsheet_id,
            sheet = %self.sheet,
            rows = table.len(),
            "wrote report to worksheet"
        );
        Ok(())
    }
}

fn build_client(settings: &SheetsSettings) -> Result<reqwest::Client, SinkError> {
    reqwest::Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .map_err(|e| SinkError::init(format!("Sheets HTTP client: {}", e)))
}

/// Turn a non-2xx response into an `Api` error carrying the body
async fn check(
    response: reqwest::Response,
    operation: &'static str,
) -> Result<reqwest::Response, SinkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SinkError::Api {
        operation,
        status: status.as_u16(),
        body,
    })
}

// --- Wire Types ---

#[derive(Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    title: String,
}

//! Common types shared by all sinks
//!
//! The [`TabularSink`] trait and the error type every sink returns.

use ordersync_protocol::Table;
use thiserror::Error;

/// Destination for a finished report table
///
/// A run always calls [`clear`](TabularSink::clear) first, then
/// [`write`](TabularSink::write) once.
pub trait TabularSink: Send + Sync {
    /// Sink name for logging
    fn name(&self) -> &str;

    /// Remove any previous contents of the destination
    fn clear(&self) -> impl std::future::Future<Output = Result<(), SinkError>> + Send;

    /// Write headers and rows, applying numeric formatting
    fn write(
        &self,
        table: &Table,
    ) -> impl std::future::Future<Output = Result<(), SinkError>> + Send;
}

/// Common sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Sink initialization failed (e.g., HTTP client creation)
    #[error("failed to initialize sink: {0}")]
    Init(String),

    /// HTTP transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Service-account credentials rejected or unusable
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Non-2xx response from the destination API
    #[error("{operation} failed with HTTP {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Worksheet title not present in the spreadsheet
    #[error("worksheet {sheet:?} not found in spreadsheet {spreadsheet}")]
    SheetNotFound { spreadsheet: String, sheet: String },

    /// Spreadsheet URL or id could not be understood
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    /// Create an initialization error
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;

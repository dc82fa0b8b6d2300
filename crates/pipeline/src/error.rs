//! Pipeline error types
//!
//! Wraps the per-stage errors; everything here is fatal for one report run.

use ordersync_config::ConfigError;
use ordersync_connectors::ConnectorError;
use ordersync_sinks::SinkError;
use thiserror::Error;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration or credential problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Shop authentication or client setup failed
    #[error(transparent)]
    Connector(#[from] ConnectorError),

    /// Destination failed
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Cron expression could not be parsed
    #[error("invalid schedule for report {report:?}: {message}")]
    InvalidSchedule { report: String, message: String },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

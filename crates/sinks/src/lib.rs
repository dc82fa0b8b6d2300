//! ordersync - Sinks
//!
//! Destinations for finished report tables.
//!
//! # Architecture
//!
//! Each sink implements [`TabularSink`]. A report run calls `clear()` and
//! then `write()` exactly once with the full table.
//!
//! ```text
//! [ReportJob] --Table--> [TabularSink::clear] --> [TabularSink::write] --> [Destination]
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Purpose |
//! |------|---------|
//! | `google_sheets` | Replace a worksheet's contents via the Sheets v4 API |
//! | `stdout` | Aligned text or JSON for dry runs |
//!
//! # Example
//!
//! ```ignore
//! use ordersync_sinks::{GoogleSheetsSink, ServiceAccount, SheetsSettings, TabularSink};
//!
//! let account = ServiceAccount::from_json(&credentials.service_account_json)?;
//! let settings = SheetsSettings::for_report(&config, report);
//! let sink = GoogleSheetsSink::connect(settings, &account).await?;
//!
//! sink.clear().await?;
//! sink.write(&table).await?;
//! ```

// =============================================================================
// Sink implementations (each in its own submodule)
// =============================================================================

/// Google Sheets sink - worksheet replacement through the REST API
pub mod google_sheets;

/// Stdout sink - human-readable output
pub mod stdout;

/// Common types shared by all sinks (trait, errors)
mod common;

// =============================================================================
// Public re-exports
// =============================================================================

pub use common::{SinkError, TabularSink};

pub use google_sheets::{GoogleSheetsSink, ServiceAccount, SheetsSettings, spreadsheet_id};
pub use stdout::{OutputFormat, StdoutConfig, StdoutSink};

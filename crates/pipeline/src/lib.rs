//! ordersync Pipeline - Report jobs and scheduling
//!
//! Connects the stages of a report run:
//!
//! ```text
//! Shopware token -> OrderPages -> Aggregator -> tabulate -> TabularSink
//! ```
//!
//! # Design
//!
//! - **Sequential**: one HTTP request at a time, pages in order
//! - **Partial over nothing**: a failed page ends paging; what was fetched is still written
//! - **No data, no write**: an empty grouping table leaves the sink untouched
//! - **One report at a time**: the scheduler never overlaps runs
//!
//! # Example
//!
//! ```ignore
//! use ordersync_pipeline::run_report;
//!
//! let summary = run_report(&config, &credentials, "daily").await?;
//! println!("{} rows written", summary.rows);
//! ```

mod error;
mod job;
mod scheduler;

pub use error::{PipelineError, Result};
pub use job::{ReportJob, ReportOutput, RunSummary, run_report};
pub use scheduler::{LiveRunner, ReportRunner, ReportScheduler, ScheduledReport};

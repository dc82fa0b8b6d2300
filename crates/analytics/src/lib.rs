//! ordersync Analytics
//!
//! Turns a stream of order records into report tables.
//!
//! # Overview
//!
//! - **Aggregation**: fold records into groups keyed by day or by
//!   (month, payment status), with optional dedup by order id
//! - **Tabulation**: sorted rows with a fixed column schema per report kind
//! - **Timestamps**: lenient ISO-8601 parsing, day taken in the record's own offset
//!
//! # Usage
//!
//! ```
//! use ordersync_analytics::{Aggregator, tabulate};
//! use ordersync_protocol::{OrderRecord, ReportKind};
//!
//! let mut aggregator = Aggregator::for_kind(ReportKind::DailyOrders);
//! aggregator.fold(&OrderRecord {
//!     id: "o1".into(),
//!     order_date_time: Some("2023-05-01T10:00:00Z".into()),
//!     ..Default::default()
//! });
//!
//! let table = tabulate(&aggregator.finish());
//! assert_eq!(table.len(), 1);
//! ```

pub mod aggregate;
pub mod error;
pub mod tabulate;
pub mod timestamp;

#[cfg(test)]
mod aggregate_test;

// Re-exports for convenience
pub use aggregate::{
    Accumulator, AggregateStats, Aggregator, FoldOutcome, GroupKey, GroupingTable,
};
pub use error::{AnalyticsError, Result};
pub use tabulate::{round2, tabulate};
pub use timestamp::{month_label, parse_order_date};

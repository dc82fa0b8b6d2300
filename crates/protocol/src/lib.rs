//! ordersync Protocol - Shared types for the report pipeline
//!
//! This crate provides the types that flow between pipeline stages:
//! - `OrderRecord` - One order as returned by the shop's search API
//! - `ReportKind` - Which grouping and column schema a report uses
//! - `DedupMode` - Whether repeated order ids are skipped
//! - `Table` / `Cell` - Tabulated output handed to a sink
//!
//! Records are deserialized leniently: missing or null fields fall back to
//! defaults so a single odd record never fails a whole page.

mod kind;
mod record;
mod table;

pub use kind::{DedupMode, ReportKind};
pub use record::{OrderRecord, OrderTransaction, StateMachineState};
pub use table::{Cell, Table};

/// Status names whose revenue is subtracted instead of added
pub const REFUND_STATUSES: &[&str] = &["refunded", "refunded_partially"];

/// Check whether a technical status name counts as a refund
#[inline]
pub fn is_refund_status(status: &str) -> bool {
    REFUND_STATUSES.contains(&status)
}

#[cfg(test)]
mod record_test;

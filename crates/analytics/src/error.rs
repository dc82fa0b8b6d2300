//! Analytics error types

use thiserror::Error;

/// Why a single record was left out of a grouping table
///
/// Never fatal: the aggregator logs it and moves on to the next record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Record has no `orderDateTime`
    #[error("order {id:?} has no orderDateTime")]
    MissingTimestamp { id: String },

    /// `orderDateTime` is not a recognizable ISO-8601 timestamp
    #[error("order {id:?} has unparseable orderDateTime {value:?}")]
    InvalidTimestamp { id: String, value: String },
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;

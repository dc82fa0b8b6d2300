//! Streaming aggregation of order records
//!
//! An [`Aggregator`] folds records one at a time into a [`GroupingTable`]
//! keyed by day or by (month, status). Records it cannot place are counted
//! and logged, never fatal.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use ordersync_protocol::{DedupMode, OrderRecord, ReportKind, is_refund_status};
use tracing::{debug, warn};

use crate::error::{AnalyticsError, Result};
use crate::timestamp::{month_label, parse_order_date};

/// Grouping key derived from a record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// Calendar day, in the timestamp's own offset
    Day(NaiveDate),
    /// `YYYY-MM` month and payment status
    MonthStatus { month: String, status: String },
}

/// Running totals for one group
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub orders: u64,
    pub revenue_net: f64,
    pub revenue_total: f64,
}

/// What happened to one folded record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldOutcome {
    Counted,
    /// Id already aggregated in this run
    Duplicate,
    /// Record could not be placed in a group
    Skipped(AnalyticsError),
}

/// Tally of fold outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub counted: u64,
    pub duplicates: u64,
    pub skipped: u64,
}

impl AggregateStats {
    /// Records seen in total
    pub fn seen(&self) -> u64 {
        self.counted + self.duplicates + self.skipped
    }
}

/// Ordered map of group key to totals, built by one aggregator run
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingTable {
    kind: ReportKind,
    groups: BTreeMap<GroupKey, Accumulator>,
}

impl GroupingTable {
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn get(&self, key: &GroupKey) -> Option<&Accumulator> {
        self.groups.get(key)
    }

    /// Groups in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Accumulator)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sum of order counts across all groups
    pub fn total_orders(&self) -> u64 {
        self.groups.values().map(|acc| acc.orders).sum()
    }
}

/// Folds order records into a grouping table
///
/// In `none` dedup mode every record is counted as delivered, so folding
/// the same record twice counts it twice.
#[derive(Debug)]
pub struct Aggregator {
    kind: ReportKind,
    dedup: DedupMode,
    seen: HashSet<String>,
    groups: BTreeMap<GroupKey, Accumulator>,
    stats: AggregateStats,
}

impl Aggregator {
    pub fn new(kind: ReportKind, dedup: DedupMode) -> Self {
        Self {
            kind,
            dedup,
            seen: HashSet::new(),
            groups: BTreeMap::new(),
            stats: AggregateStats::default(),
        }
    }

    /// Aggregator with the kind's default dedup mode
    pub fn for_kind(kind: ReportKind) -> Self {
        Self::new(kind, kind.default_dedup())
    }

    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn dedup(&self) -> DedupMode {
        self.dedup
    }

    /// Fold a single record
    pub fn fold(&mut self, record: &OrderRecord) -> FoldOutcome {
        // Ids are claimed before the timestamp is looked at, so a later
        // copy of an unparseable record is still a duplicate.
        if self.dedup == DedupMode::ById
            && !record.id.is_empty()
            && !self.seen.insert(record.id.clone())
        {
            debug!(order_id = %record.id, "skipping duplicate order");
            self.stats.duplicates += 1;
            return FoldOutcome::Duplicate;
        }

        let key = match self.key_for(record) {
            Ok(key) => key,
            Err(e) => {
                warn!(order_id = %record.id, error = %e, "skipping order");
                self.stats.skipped += 1;
                return FoldOutcome::Skipped(e);
            }
        };

        let acc = self.groups.entry(key).or_default();
        acc.orders += 1;
        if self.kind.tracks_revenue() {
            let sign = match record.payment_status() {
                Some(status) if is_refund_status(status) => -1.0,
                _ => 1.0,
            };
            acc.revenue_net += sign * record.amount_net;
            acc.revenue_total += sign * record.amount_total;
        }

        self.stats.counted += 1;
        FoldOutcome::Counted
    }

    /// Fold every record of a page
    pub fn fold_all<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a OrderRecord>,
    {
        for record in records {
            self.fold(record);
        }
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// Consume the aggregator, yielding its grouping table
    pub fn finish(self) -> GroupingTable {
        GroupingTable {
            kind: self.kind,
            groups: self.groups,
        }
    }

    fn key_for(&self, record: &OrderRecord) -> Result<GroupKey> {
        let raw = record
            .order_date_time
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AnalyticsError::MissingTimestamp {
                id: record.id.clone(),
            })?;

        let date = parse_order_date(raw).ok_or_else(|| AnalyticsError::InvalidTimestamp {
            id: record.id.clone(),
            value: raw.to_string(),
        })?;

        Ok(match self.kind {
            ReportKind::MonthlyStatus => GroupKey::MonthStatus {
                month: month_label(date),
                status: record
                    .payment_status_or(self.kind.default_status())
                    .to_string(),
            },
            _ => GroupKey::Day(date),
        })
    }
}

//! Tests for order aggregation

use chrono::NaiveDate;
use ordersync_protocol::{
    DedupMode, OrderRecord, OrderTransaction, ReportKind, StateMachineState,
};

use crate::aggregate::{Aggregator, FoldOutcome, GroupKey};
use crate::error::AnalyticsError;

fn order(id: &str, date: Option<&str>, net: f64, total: f64, status: Option<&str>) -> OrderRecord {
    OrderRecord {
        id: id.into(),
        order_date_time: date.map(String::from),
        amount_net: net,
        amount_total: total,
        transactions: status
            .map(|s| {
                vec![OrderTransaction {
                    state_machine_state: Some(StateMachineState {
                        technical_name: Some(s.into()),
                    }),
                }]
            })
            .unwrap_or_default(),
    }
}

fn day(y: i32, m: u32, d: u32) -> GroupKey {
    GroupKey::Day(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn month(month: &str, status: &str) -> GroupKey {
    GroupKey::MonthStatus {
        month: month.into(),
        status: status.into(),
    }
}

// =============================================================================
// Daily revenue
// =============================================================================

#[test]
fn test_daily_revenue_refund_subtracts() {
    let mut agg = Aggregator::new(ReportKind::DailyRevenue, DedupMode::ById);
    agg.fold_all(&[
        order("a", Some("2023-05-01T09:00:00Z"), 100.0, 120.0, Some("paid")),
        order("b", Some("2023-05-01T10:00:00Z"), 100.0, 120.0, Some("paid")),
        order("c", Some("2023-05-01T11:00:00Z"), 50.0, 60.0, Some("refunded")),
    ]);

    let groups = agg.finish();
    assert_eq!(groups.len(), 1);
    let acc = groups.get(&day(2023, 5, 1)).unwrap();
    assert_eq!(acc.orders, 3);
    assert_eq!(acc.revenue_net, 150.0);
    assert_eq!(acc.revenue_total, 180.0);
}

#[test]
fn test_partial_refund_subtracts() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyRevenue);
    agg.fold(&order("a", Some("2023-05-01"), 40.0, 50.0, Some("paid")));
    agg.fold(&order("b", Some("2023-05-01"), 10.0, 12.0, Some("refunded_partially")));

    let groups = agg.finish();
    let acc = groups.get(&day(2023, 5, 1)).unwrap();
    assert_eq!(acc.revenue_net, 30.0);
    assert_eq!(acc.revenue_total, 38.0);
}

#[test]
fn test_missing_status_counts_as_positive() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyRevenue);
    agg.fold(&order("a", Some("2023-05-01"), 10.0, 12.0, None));

    let groups = agg.finish();
    assert_eq!(groups.get(&day(2023, 5, 1)).unwrap().revenue_net, 10.0);
}

#[test]
fn test_groups_by_day_in_own_offset() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyOrders);
    agg.fold(&order("a", Some("2023-05-01T23:30:00-02:00"), 0.0, 0.0, None));
    agg.fold(&order("b", Some("2023-05-02T00:30:00+02:00"), 0.0, 0.0, None));

    let groups = agg.finish();
    assert_eq!(groups.get(&day(2023, 5, 1)).unwrap().orders, 1);
    assert_eq!(groups.get(&day(2023, 5, 2)).unwrap().orders, 1);
}

#[test]
fn test_daily_orders_ignore_revenue() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyOrders);
    agg.fold(&order("a", Some("2023-05-01"), 99.0, 99.0, Some("paid")));

    let groups = agg.finish();
    let acc = groups.get(&day(2023, 5, 1)).unwrap();
    assert_eq!(acc.orders, 1);
    assert_eq!(acc.revenue_net, 0.0);
    assert_eq!(acc.revenue_total, 0.0);
}

// =============================================================================
// Skipped records
// =============================================================================

#[test]
fn test_unparseable_date_excluded() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyRevenue);
    let outcome = agg.fold(&order("a", Some("not-a-date"), 10.0, 10.0, Some("paid")));
    assert_eq!(
        outcome,
        FoldOutcome::Skipped(AnalyticsError::InvalidTimestamp {
            id: "a".into(),
            value: "not-a-date".into(),
        })
    );
    agg.fold(&order("b", Some("2023-05-01"), 10.0, 10.0, Some("paid")));

    assert_eq!(agg.stats().skipped, 1);
    assert_eq!(agg.stats().counted, 1);

    let groups = agg.finish();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.total_orders(), 1);
}

#[test]
fn test_missing_date_excluded() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyOrders);
    assert!(matches!(
        agg.fold(&order("a", None, 0.0, 0.0, None)),
        FoldOutcome::Skipped(AnalyticsError::MissingTimestamp { .. })
    ));
    assert!(matches!(
        agg.fold(&order("b", Some("  "), 0.0, 0.0, None)),
        FoldOutcome::Skipped(AnalyticsError::MissingTimestamp { .. })
    ));
    assert!(agg.finish().is_empty());
}

// =============================================================================
// Dedup
// =============================================================================

#[test]
fn test_dedup_by_id() {
    let mut agg = Aggregator::new(ReportKind::DailyRevenue, DedupMode::ById);
    let record = order("a", Some("2023-05-01"), 10.0, 12.0, Some("paid"));

    assert_eq!(agg.fold(&record), FoldOutcome::Counted);
    assert_eq!(agg.fold(&record), FoldOutcome::Duplicate);
    assert_eq!(agg.stats().duplicates, 1);

    let groups = agg.finish();
    let acc = groups.get(&day(2023, 5, 1)).unwrap();
    assert_eq!(acc.orders, 1);
    assert_eq!(acc.revenue_net, 10.0);
}

#[test]
fn test_dedup_none_double_counts() {
    let mut agg = Aggregator::new(ReportKind::DailyRevenue, DedupMode::None);
    let record = order("a", Some("2023-05-01"), 10.0, 12.0, Some("paid"));
    agg.fold(&record);
    agg.fold(&record);

    let groups = agg.finish();
    let acc = groups.get(&day(2023, 5, 1)).unwrap();
    assert_eq!(acc.orders, 2);
    assert_eq!(acc.revenue_net, 20.0);
}

#[test]
fn test_dedup_ignores_empty_ids() {
    let mut agg = Aggregator::new(ReportKind::DailyOrders, DedupMode::ById);
    agg.fold(&order("", Some("2023-05-01"), 0.0, 0.0, None));
    agg.fold(&order("", Some("2023-05-01"), 0.0, 0.0, None));

    assert_eq!(agg.finish().total_orders(), 2);
}

#[test]
fn test_dedup_claims_id_before_parsing() {
    let mut agg = Aggregator::new(ReportKind::DailyOrders, DedupMode::ById);
    agg.fold(&order("a", Some("garbage"), 0.0, 0.0, None));
    let outcome = agg.fold(&order("a", Some("2023-05-01"), 0.0, 0.0, None));

    assert_eq!(outcome, FoldOutcome::Duplicate);
    assert!(agg.finish().is_empty());
}

#[test]
fn test_default_dedup_per_kind() {
    assert_eq!(Aggregator::for_kind(ReportKind::DailyRevenue).dedup(), DedupMode::ById);
    assert_eq!(Aggregator::for_kind(ReportKind::MonthlyStatus).dedup(), DedupMode::None);
}

// =============================================================================
// Monthly status
// =============================================================================

#[test]
fn test_monthly_status_groups() {
    let mut agg = Aggregator::for_kind(ReportKind::MonthlyStatus);
    agg.fold_all(&[
        order("a", Some("2023-05-01T10:00:00Z"), 0.0, 0.0, Some("paid")),
        order("b", Some("2023-05-20T10:00:00Z"), 0.0, 0.0, Some("paid")),
        order("c", Some("2023-05-21T10:00:00Z"), 0.0, 0.0, Some("open")),
        order("d", Some("2023-06-01T10:00:00Z"), 0.0, 0.0, None),
    ]);

    let groups = agg.finish();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups.get(&month("2023-05", "paid")).unwrap().orders, 2);
    assert_eq!(groups.get(&month("2023-05", "open")).unwrap().orders, 1);
    assert_eq!(groups.get(&month("2023-06", "no_transaction")).unwrap().orders, 1);
}

#[test]
fn test_monthly_keys_sorted() {
    let mut agg = Aggregator::for_kind(ReportKind::MonthlyStatus);
    agg.fold(&order("a", Some("2023-06-01"), 0.0, 0.0, Some("paid")));
    agg.fold(&order("b", Some("2023-05-01"), 0.0, 0.0, Some("refunded")));
    agg.fold(&order("c", Some("2023-05-01"), 0.0, 0.0, Some("paid")));

    let keys: Vec<GroupKey> = agg.finish().iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(
        keys,
        vec![
            month("2023-05", "paid"),
            month("2023-05", "refunded"),
            month("2023-06", "paid"),
        ]
    );
}

#[test]
fn test_stats_seen() {
    let mut agg = Aggregator::for_kind(ReportKind::DailyRevenue);
    agg.fold(&order("a", Some("2023-05-01"), 0.0, 0.0, None));
    agg.fold(&order("a", Some("2023-05-01"), 0.0, 0.0, None));
    agg.fold(&order("b", None, 0.0, 0.0, None));
    assert_eq!(agg.stats().seen(), 3);
}

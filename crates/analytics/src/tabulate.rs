//! Grouping table to report table
//!
//! Rows come out in ascending key order with the kind's fixed column
//! schema. Monetary values are rounded to 2 decimals; the order-count
//! column is marked numeric for the sink.

use ordersync_protocol::{Cell, ReportKind, Table};

use crate::aggregate::{Accumulator, GroupKey, GroupingTable};

/// Build the output table for a grouping table
pub fn tabulate(groups: &GroupingTable) -> Table {
    let kind = groups.kind();
    let mut table =
        Table::new(kind.headers().iter().copied()).with_numeric_column(kind.count_column());

    for (key, acc) in groups.iter() {
        table.push_row(row(kind, key, acc));
    }

    table
}

fn row(kind: ReportKind, key: &GroupKey, acc: &Accumulator) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(kind.headers().len());
    match key {
        GroupKey::Day(date) => cells.push(Cell::Date(*date)),
        GroupKey::MonthStatus { month, status } => {
            cells.push(Cell::Text(month.clone()));
            cells.push(Cell::Text(status.clone()));
        }
    }

    cells.push(Cell::Integer(acc.orders));
    match kind {
        ReportKind::DailyRevenue => {
            cells.push(Cell::Decimal(round2(acc.revenue_net)));
            cells.push(Cell::Decimal(round2(acc.revenue_total)));
        }
        ReportKind::DailyNetRevenue => cells.push(Cell::Decimal(round2(acc.revenue_net))),
        ReportKind::DailyOrders | ReportKind::MonthlyStatus => {}
    }
    cells
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0
    (value * 100.0).round() / 100.0 + 0.0
}

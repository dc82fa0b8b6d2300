//! Report variants and deduplication modes

use serde::Deserialize;

/// Report variant: decides the grouping key and the output columns
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Per day: order count, net and gross revenue (default)
    #[default]
    DailyRevenue,
    /// Per day: order count and net revenue
    DailyNetRevenue,
    /// Per day: order count only
    DailyOrders,
    /// Per (year-month, payment status): order count
    MonthlyStatus,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        Self::DailyRevenue,
        Self::DailyNetRevenue,
        Self::DailyOrders,
        Self::MonthlyStatus,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyRevenue => "daily_revenue",
            Self::DailyNetRevenue => "daily_net_revenue",
            Self::DailyOrders => "daily_orders",
            Self::MonthlyStatus => "monthly_status",
        }
    }

    /// Whether the report groups by calendar day
    pub const fn is_daily(self) -> bool {
        !matches!(self, Self::MonthlyStatus)
    }

    /// Whether revenue amounts are accumulated
    pub const fn tracks_revenue(self) -> bool {
        matches!(self, Self::DailyRevenue | Self::DailyNetRevenue)
    }

    /// Status used when an order has no transaction status
    pub const fn default_status(self) -> &'static str {
        match self {
            Self::MonthlyStatus => "no_transaction",
            _ => "unknown",
        }
    }

    /// Deduplication mode used when a report doesn't set one
    pub const fn default_dedup(self) -> DedupMode {
        match self {
            Self::DailyRevenue => DedupMode::ById,
            _ => DedupMode::None,
        }
    }

    /// Column headers in output order
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::DailyRevenue => &[
                "Date",
                "Number of Orders",
                "Revenue (Net)",
                "Revenue (Total)",
            ],
            Self::DailyNetRevenue => &["Date", "Number of Orders", "Revenue (Net)"],
            Self::DailyOrders => &["Date", "Number of Orders"],
            Self::MonthlyStatus => &["Year-Month", "Payment Status", "Order Count"],
        }
    }

    /// Index of the order-count column
    pub const fn count_column(self) -> usize {
        match self {
            Self::MonthlyStatus => 2,
            _ => 1,
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown report kind: {}", s))
    }
}

/// How repeated order ids within one run are treated
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DedupMode {
    /// Skip any record whose id was already aggregated
    ById,
    /// Aggregate every record as delivered
    None,
}

impl DedupMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ById => "by_id",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for DedupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Order search query and its JSON payload
//!
//! Builds the `{filter, limit, page, associations}` body the search endpoint
//! expects. Status filters target the first-class transaction state field.

use serde::Serialize;
use serde_json::{Value, json};

/// Field holding a transaction's technical status name
pub const STATUS_FIELD: &str = "transactions.stateMachineState.technicalName";

/// Field holding the order timestamp
pub const ORDER_DATE_FIELD: &str = "orderDateTime";

/// Default number of orders per page
pub const DEFAULT_LIMIT: u32 = 500;

/// Which transaction statuses an order must have
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    Any,
    /// Status equals one value
    Equals(String),
    /// Status equals any of several values
    AnyOf(Vec<String>),
}

impl StatusFilter {
    /// Build from a list: empty = Any, one = Equals, more = AnyOf
    pub fn from_statuses(statuses: Vec<String>) -> Self {
        match statuses.len() {
            0 => Self::Any,
            1 => Self::Equals(statuses.into_iter().next().unwrap_or_default()),
            _ => Self::AnyOf(statuses),
        }
    }

    fn to_filter(&self) -> Option<Filter<'_>> {
        match self {
            Self::Any => None,
            Self::Equals(status) => Some(Filter::equals(STATUS_FIELD, status)),
            Self::AnyOf(statuses) => Some(Filter::Multi {
                operator: "OR",
                queries: statuses
                    .iter()
                    .map(|s| Filter::equals(STATUS_FIELD, s))
                    .collect(),
            }),
        }
    }
}

/// A complete order search
#[derive(Debug, Clone)]
pub struct OrderQuery {
    /// Lower bound for `orderDateTime` (inclusive)
    pub since: String,
    pub status: StatusFilter,
    /// Orders per page
    pub limit: u32,
    /// Expand `transactions.stateMachineState`
    pub associations: bool,
}

impl OrderQuery {
    /// Query for orders since `since`, all statuses, default page size
    pub fn new(since: impl Into<String>) -> Self {
        Self {
            since: since.into(),
            status: StatusFilter::Any,
            limit: DEFAULT_LIMIT,
            associations: true,
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn with_associations(mut self, associations: bool) -> Self {
        self.associations = associations;
        self
    }

    /// Request body for one page
    pub fn payload(&self, page: u32) -> Value {
        let mut filter = Vec::with_capacity(2);
        if let Some(status) = self.status.to_filter() {
            filter.push(status);
        }
        filter.push(Filter::Range {
            field: ORDER_DATE_FIELD,
            parameters: RangeParameters { gte: &self.since },
        });

        let mut body = json!({
            "filter": filter,
            "limit": self.limit,
            "page": page,
        });

        if self.associations {
            body["associations"] = json!({
                "transactions": {
                    "associations": {
                        "stateMachineState": {}
                    }
                }
            });
        }

        body
    }
}

// --- Wire Types ---

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Filter<'a> {
    Equals {
        field: &'static str,
        value: &'a str,
    },
    Multi {
        operator: &'static str,
        queries: Vec<Filter<'a>>,
    },
    Range {
        field: &'static str,
        parameters: RangeParameters<'a>,
    },
}

impl<'a> Filter<'a> {
    fn equals(field: &'static str, value: &'a str) -> Self {
        Self::Equals { field, value }
    }
}

#[derive(Debug, Serialize)]
struct RangeParameters<'a> {
    gte: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_from_statuses() {
        assert_eq!(StatusFilter::from_statuses(vec![]), StatusFilter::Any);
        assert_eq!(
            StatusFilter::from_statuses(vec!["paid".into()]),
            StatusFilter::Equals("paid".into())
        );
        assert_eq!(
            StatusFilter::from_statuses(vec!["paid".into(), "refunded".into()]),
            StatusFilter::AnyOf(vec!["paid".into(), "refunded".into()])
        );
    }

    #[test]
    fn test_payload_multi_status() {
        let query = OrderQuery::new("2022-01-01T00:00:00.000Z").with_status(
            StatusFilter::AnyOf(vec![
                "paid".into(),
                "in_progress".into(),
                "refunded_partially".into(),
                "refunded".into(),
            ]),
        );

        let payload = query.payload(3);
        let expected = json!({
            "filter": [
                {
                    "type": "multi",
                    "operator": "OR",
                    "queries": [
                        {"type": "equals", "field": STATUS_FIELD, "value": "paid"},
                        {"type": "equals", "field": STATUS_FIELD, "value": "in_progress"},
                        {"type": "equals", "field": STATUS_FIELD, "value": "refunded_partially"},
                        {"type": "equals", "field": STATUS_FIELD, "value": "refunded"}
                    ]
                },
                {
                    "type": "range",
                    "field": "orderDateTime",
                    "parameters": {"gte": "2022-01-01T00:00:00.000Z"}
                }
            ],
            "limit": 500,
            "page": 3,
            "associations": {
                "transactions": {"associations": {"stateMachineState": {}}}
            }
        });
        assert_eq!(payload, expected);
    }

    #[test]
    fn test_payload_equals_status() {
        let query = OrderQuery::new("2023-01-01T00:00:00Z")
            .with_status(StatusFilter::Equals("paid".into()));
        let payload = query.payload(1);

        assert_eq!(
            payload["filter"][0],
            json!({"type": "equals", "field": STATUS_FIELD, "value": "paid"})
        );
        assert_eq!(payload["filter"][1]["type"], "range");
    }

    #[test]
    fn test_payload_without_status_or_associations() {
        let query = OrderQuery::new("2023-01-01T00:00:00Z")
            .with_associations(false)
            .with_limit(100);
        let payload = query.payload(1);

        let filters = payload["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0]["field"], ORDER_DATE_FIELD);
        assert_eq!(payload["limit"], 100);
        assert!(payload.get("associations").is_none());
    }

    #[test]
    fn test_limit_floor() {
        let query = OrderQuery::new("2023-01-01T00:00:00Z").with_limit(0);
        assert_eq!(query.limit, 1);
    }
}

//! Order records as returned by the order search endpoint
//!
//! Field names follow the API's camelCase JSON. Unknown fields are ignored.

use serde::{Deserialize, Deserializer};

/// A single order entity from one search page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Order id (empty if the API omitted it)
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,

    /// ISO-8601 order timestamp, possibly with an offset
    #[serde(default)]
    pub order_date_time: Option<String>,

    /// Net amount (0.0 when missing)
    #[serde(default, deserialize_with = "amount")]
    pub amount_net: f64,

    /// Gross amount (0.0 when missing)
    #[serde(default, deserialize_with = "amount")]
    pub amount_total: f64,

    /// Payment transactions, only populated when the association is requested
    #[serde(default, deserialize_with = "null_as_default")]
    pub transactions: Vec<OrderTransaction>,
}

/// A payment transaction attached to an order
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTransaction {
    #[serde(default)]
    pub state_machine_state: Option<StateMachineState>,
}

/// State of a transaction's state machine
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMachineState {
    #[serde(default)]
    pub technical_name: Option<String>,
}

impl OrderRecord {
    /// Technical status name of the first transaction, if any
    pub fn payment_status(&self) -> Option<&str> {
        self.transactions
            .first()
            .and_then(|t| t.state_machine_state.as_ref())
            .and_then(|s| s.technical_name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Payment status, or `fallback` when no transaction carries one
    pub fn payment_status_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.payment_status().unwrap_or(fallback)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept numbers, numeric strings, or null
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Amount::Number(n)) => Ok(n),
        Some(Amount::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid amount: {:?}", s))),
    }
}

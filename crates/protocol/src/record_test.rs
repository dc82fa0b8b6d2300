//! Tests for order record deserialization

use crate::record::OrderRecord;

#[test]
fn test_full_record() {
    let json = r#"{
        "id": "0190a1",
        "orderDateTime": "2022-03-01T10:15:00.000+00:00",
        "amountNet": 100.0,
        "amountTotal": 119.0,
        "orderNumber": "10001",
        "transactions": [
            {"stateMachineState": {"technicalName": "paid", "name": "Paid"}}
        ]
    }"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.id, "0190a1");
    assert_eq!(
        record.order_date_time.as_deref(),
        Some("2022-03-01T10:15:00.000+00:00")
    );
    assert_eq!(record.amount_net, 100.0);
    assert_eq!(record.amount_total, 119.0);
    assert_eq!(record.payment_status(), Some("paid"));
}

#[test]
fn test_missing_fields_default() {
    let record: OrderRecord = serde_json::from_str("{}").unwrap();

    assert_eq!(record.id, "");
    assert!(record.order_date_time.is_none());
    assert_eq!(record.amount_net, 0.0);
    assert_eq!(record.amount_total, 0.0);
    assert!(record.transactions.is_empty());
    assert_eq!(record.payment_status(), None);
}

#[test]
fn test_null_fields_default() {
    let json = r#"{"id": null, "amountNet": null, "amountTotal": null, "transactions": null}"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.id, "");
    assert_eq!(record.amount_net, 0.0);
    assert!(record.transactions.is_empty());
}

#[test]
fn test_integer_amounts() {
    let json = r#"{"id": "a", "amountNet": 50, "amountTotal": 60}"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.amount_net, 50.0);
    assert_eq!(record.amount_total, 60.0);
}

#[test]
fn test_string_amounts() {
    let json = r#"{"id": "a", "amountNet": "12.50", "amountTotal": " 14.88 "}"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.amount_net, 12.5);
    assert_eq!(record.amount_total, 14.88);
}

#[test]
fn test_non_numeric_amount_rejected() {
    let json = r#"{"id": "a", "amountNet": "lots"}"#;
    let result: Result<OrderRecord, _> = serde_json::from_str(json);
    assert!(result.is_err());
}

#[test]
fn test_status_uses_first_transaction() {
    let json = r#"{
        "id": "a",
        "transactions": [
            {"stateMachineState": {"technicalName": "refunded"}},
            {"stateMachineState": {"technicalName": "paid"}}
        ]
    }"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.payment_status(), Some("refunded"));
}

#[test]
fn test_status_missing_state_falls_back() {
    let json = r#"{"id": "a", "transactions": [{"stateMachineState": null}]}"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();

    assert_eq!(record.payment_status(), None);
    assert_eq!(record.payment_status_or("unknown"), "unknown");
}

#[test]
fn test_status_empty_name_falls_back() {
    let json = r#"{"id": "a", "transactions": [{"stateMachineState": {"technicalName": ""}}]}"#;
    let record: OrderRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.payment_status_or("no_transaction"), "no_transaction");
}

// Shared payload fixtures for unit tests.
//
// The core never interprets payload attributes, so these only need to be
// recognisable JSON objects.

use crate::core::ports::Document;
use serde_json::json;

fn as_document(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("fixture payloads are JSON objects"),
    }
}

/// Canonical event payload used across the tests.
pub fn make_invoice_paid_payload() -> Document {
    as_document(json!({
        "kind": "InvoicePaid",
        "amount": 1250,
        "currency": "EUR",
    }))
}

/// Canonical compiled view payload used across the tests.
pub fn make_balance_view_payload() -> Document {
    as_document(json!({
        "total": 4250,
        "currency": "EUR",
    }))
}

/// Payload carrying its own sequence marker, for asserting which write won.
pub fn make_numbered_payload(n: u64) -> Document {
    as_document(json!({ "n": n }))
}

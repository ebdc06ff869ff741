// Stored shape of one event.
//
// Purpose
// - Pin the persisted layout: partition key `namespace`, sort key `id`,
//   payload attributes merged at the top level.
//
// Responsibilities
// - Build the stored document explicitly so the envelope attributes always
//   win over same-named payload attributes.
// - Decode documents coming back from the store.
//
// Versioning and evolution
// - The layout is shared with existing tables and must not change shape.
//   Payload evolution happens inside the payload attributes, which this core
//   never interprets.

use crate::core::ports::{Document, StoreError};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct EventRecord {
    pub namespace: String,
    pub id: u64,
    #[serde(flatten)]
    pub payload: Document,
}

impl EventRecord {
    pub fn new(namespace: impl Into<String>, id: u64, payload: Document) -> Self {
        Self {
            namespace: namespace.into(),
            id,
            payload,
        }
    }

    /// The document written to the store. Envelope attributes are inserted
    /// last, so a payload attribute named `namespace` or `id` is overwritten.
    pub fn to_document(&self) -> Document {
        let mut document = self.payload.clone();
        document.insert("namespace".into(), Value::String(self.namespace.clone()));
        document.insert("id".into(), Value::Number(self.id.into()));
        document
    }

    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(document))
            .map_err(|err| StoreError::BadRecord(format!("event record: {err}")))
    }
}

// Stored shape of one compiled view.
//
// Purpose
// - Pin the persisted layout: partition key `namespace`, sort key `viewName`,
//   the id of the last event the projection incorporated as `eventId`, and
//   payload attributes merged at the top level.
//
// Responsibilities
// - Build the stored document explicitly so the envelope attributes always
//   win over same-named payload attributes.
// - Decode documents coming back from the store.
//
// Versioning and evolution
// - The camelCase attribute names are shared with existing tables and must
//   not change shape.

use crate::core::ports::{Document, StoreError};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct CompiledView {
    pub namespace: String,
    #[serde(rename = "viewName")]
    pub view_name: String,
    #[serde(rename = "eventId")]
    pub event_id: u64,
    #[serde(flatten)]
    pub payload: Document,
}

impl CompiledView {
    pub fn new(
        namespace: impl Into<String>,
        view_name: impl Into<String>,
        event_id: u64,
        payload: Document,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            view_name: view_name.into(),
            event_id,
            payload,
        }
    }

    /// The document written to the store. Envelope attributes are inserted
    /// last, so same-named payload attributes are overwritten.
    pub fn to_document(&self) -> Document {
        let mut document = self.payload.clone();
        document.insert("namespace".into(), Value::String(self.namespace.clone()));
        document.insert("viewName".into(), Value::String(self.view_name.clone()));
        document.insert("eventId".into(), Value::Number(self.event_id.into()));
        document
    }

    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        serde_json::from_value(Value::Object(document))
            .map_err(|err| StoreError::BadRecord(format!("compiled view record: {err}")))
    }
}

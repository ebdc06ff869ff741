// Ports define what the storage core needs from the transactional store,
// without implementing it.
//
// Purpose
// - Describe the atomic conditional operations this core builds on as a trait.
//
// Responsibilities
// - Keep the stream, registry and view cache independent of any concrete
//   store by coding against this trait.
// - Report condition failures as structured values, never as message text to
//   be parsed by the caller.
//
// Boundaries
// - No concrete input or output here. Adapters implement this trait in the
//   adapters layer.
//
// Testing guidance
// - Use the in-memory adapter for tests and local development.

use async_trait::async_trait;
use thiserror::Error;

/// A stored record: key attributes and payload attributes merged in one
/// top-level JSON object.
pub type Document = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("throttled: {0}")]
    Throttled(String),

    #[error("bad record: {0}")]
    BadRecord(String),
}

/// Outcome of a conditional event insert. The store names the sub-condition
/// that failed; callers never infer it from error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventInsert {
    /// Both conditions held and the record is durably stored.
    Applied,
    /// A record already exists at the target id.
    SlotTaken,
    /// No record exists at the required predecessor id.
    PredecessorAbsent,
}

/// Outcome of a conditional view overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPut {
    /// The slot was vacant or strictly older; the record is stored.
    Applied,
    /// The stored record is at least as new; nothing was written.
    Superseded,
}

#[async_trait]
pub trait TransactionalStore: Send + Sync {
    /// Atomically insert `record` at (`partition`, `id`).
    ///
    /// The slot must be vacant and, when `predecessor` is given, a record
    /// must exist at (`partition`, `predecessor`). Both checks and the write
    /// form a single atomic decision: either every condition holds and the
    /// record is durably stored, or no effect occurs.
    async fn insert_event(
        &self,
        partition: &str,
        id: u64,
        predecessor: Option<u64>,
        record: Document,
    ) -> Result<EventInsert, StoreError>;

    /// Point read of the event at (`partition`, `id`).
    async fn get_event(&self, partition: &str, id: u64) -> Result<Option<Document>, StoreError>;

    /// The highest-id event in the partition, if any. A descending lookup
    /// bounded to one result.
    async fn last_event(&self, partition: &str) -> Result<Option<Document>, StoreError>;

    /// Ascending scan of events with `id >= start` and, when given,
    /// `id < end`.
    async fn events_from(
        &self,
        partition: &str,
        start: u64,
        end: Option<u64>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Overwrite (`partition`, `view_name`) only when the slot is vacant or
    /// the stored version is strictly below `event_id`. One atomic decision;
    /// a superseded write has no effect.
    async fn put_view(
        &self,
        partition: &str,
        view_name: &str,
        event_id: u64,
        record: Document,
    ) -> Result<ViewPut, StoreError>;

    /// Point read of the view at (`partition`, `view_name`).
    async fn get_view(
        &self,
        partition: &str,
        view_name: &str,
    ) -> Result<Option<Document>, StoreError>;
}

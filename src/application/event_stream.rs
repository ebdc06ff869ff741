// EventStream enforces total, gap-free, duplicate-free ordering of events
// within one namespace, and provides ordered read access.
//
// Purpose
// - Compare-and-append: an event lands at id n only when slot n is vacant and
//   slot n-1 is occupied (id 0 needs no predecessor). The store evaluates
//   both conditions and the write as one atomic decision.
//
// Responsibilities
// - Surface the two conflict kinds as distinct values: a duplicate means the
//   id was already assigned and must not be reused; a missing predecessor
//   means the id was computed from stale information and must be recomputed
//   from the current tail.
// - Keep conflicts in the success channel. Err is reserved for transport
//   failures, which propagate unchanged.
//
// Boundaries
// - No retry in the baseline operations. append_next_with_retry is the one
//   explicit hardening layer, bounded by its policy and without backoff.

use crate::core::event::EventRecord;
use crate::core::namespace::Namespace;
use crate::core::ports::{Document, EventInsert, StoreError, TransactionalStore};
use std::sync::Arc;
use thiserror::Error;

/// The two expected append races, disjoint so callers can branch on which
/// sub-condition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppendConflict {
    #[error("an event with id {id} already exists in this namespace")]
    DuplicateEvent { id: u64 },

    #[error("id {id} is not immediately after the current tail")]
    PredecessorMissing { id: u64 },
}

/// Result of one compare-and-append attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended { id: u64 },
    Conflict(AppendConflict),
}

/// Bound for append_next_with_retry. `max_attempts` counts total attempts;
/// zero is treated as one.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

pub struct EventStream<S: TransactionalStore> {
    namespace: Namespace,
    partition: String,
    store: Arc<S>,
}

impl<S: TransactionalStore> EventStream<S> {
    pub fn new(namespace: Namespace, store: Arc<S>) -> Self {
        let partition = namespace.partition_key();
        Self {
            namespace,
            partition,
            store,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Append `payload` at an explicit sequence id.
    pub async fn append_at(
        &self,
        id: u64,
        payload: Document,
    ) -> Result<AppendOutcome, StoreError> {
        let record = EventRecord::new(self.partition.clone(), id, payload);
        let inserted = self
            .store
            .insert_event(&self.partition, id, id.checked_sub(1), record.to_document())
            .await?;
        let outcome = match inserted {
            EventInsert::Applied => AppendOutcome::Appended { id },
            EventInsert::SlotTaken => {
                tracing::debug!(namespace = %self.namespace, id, "append lost: id already assigned");
                AppendOutcome::Conflict(AppendConflict::DuplicateEvent { id })
            }
            EventInsert::PredecessorAbsent => {
                tracing::debug!(namespace = %self.namespace, id, "append lost: predecessor missing");
                AppendOutcome::Conflict(AppendConflict::PredecessorMissing { id })
            }
        };
        Ok(outcome)
    }

    /// Read the tail, compute the next id, and attempt one compare-and-append.
    ///
    /// Two racing callers may compute the same candidate; at most one wins
    /// and the other sees DuplicateEvent. No internal retry.
    pub async fn append_next(&self, payload: Document) -> Result<AppendOutcome, StoreError> {
        let candidate = self.next_id().await?;
        self.append_at(candidate, payload).await
    }

    /// append_next with a bounded recompute loop on DuplicateEvent.
    ///
    /// A duplicate means another writer took the candidate id, so the tail is
    /// re-read and the append retried until the policy is exhausted; the last
    /// conflict is then returned. PredecessorMissing and transport failures
    /// are never retried.
    pub async fn append_next_with_retry(
        &self,
        payload: Document,
        policy: RetryPolicy,
    ) -> Result<AppendOutcome, StoreError> {
        let attempts = policy.max_attempts.max(1);
        let mut outcome = self.append_next(payload.clone()).await?;
        for attempt in 1..attempts {
            let AppendOutcome::Conflict(AppendConflict::DuplicateEvent { id }) = outcome else {
                break;
            };
            tracing::debug!(
                namespace = %self.namespace,
                id,
                attempt,
                "lost append race, recomputing the next id"
            );
            outcome = self.append_next(payload.clone()).await?;
        }
        Ok(outcome)
    }

    /// The id the next append would target: tail + 1, or 0 when the stream
    /// is empty.
    pub async fn next_id(&self) -> Result<u64, StoreError> {
        let tail = self.store.last_event(&self.partition).await?;
        match tail {
            Some(document) => {
                let record = EventRecord::from_document(document)?;
                Ok(record.id + 1)
            }
            None => Ok(0),
        }
    }

    /// Point lookup. Absence is not an error.
    pub async fn get_event(&self, id: u64) -> Result<Option<EventRecord>, StoreError> {
        self.store
            .get_event(&self.partition, id)
            .await?
            .map(EventRecord::from_document)
            .transpose()
    }

    /// Ascending, ordered events with `id >= start` and, when given,
    /// `id < end`. Readers replaying a live stream re-issue the call with a
    /// higher start to pick up events appended in the meantime.
    pub async fn slice(
        &self,
        start: u64,
        end: Option<u64>,
    ) -> Result<Vec<EventRecord>, StoreError> {
        self.store
            .events_from(&self.partition, start, end)
            .await?
            .into_iter()
            .map(EventRecord::from_document)
            .collect()
    }
}

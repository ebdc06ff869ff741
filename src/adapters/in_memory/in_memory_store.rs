// In memory implementation of the TransactionalStore port.
//
// Purpose
// - Support stream, registry and view cache tests and local development
//   without a remote store.
//
// Responsibilities
// - Hold every partition behind one lock so each conditional operation is a
//   single atomic decision, like the remote store's transactional writes.
// - Keep events in an ordered map per partition so range scans and tail
//   lookups follow id order.

use crate::core::ports::{Document, EventInsert, StoreError, TransactionalStore, ViewPut};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

struct StoredView {
    event_id: u64,
    record: Document,
}

#[derive(Default)]
struct Partition {
    events: BTreeMap<u64, Document>,
    views: HashMap<String, StoredView>,
}

#[derive(Default)]
pub struct InMemoryStore {
    partitions: RwLock<HashMap<String, Partition>>,
    is_offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Backend("transactional store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TransactionalStore for InMemoryStore {
    async fn insert_event(
        &self,
        partition: &str,
        id: u64,
        predecessor: Option<u64>,
        record: Document,
    ) -> Result<EventInsert, StoreError> {
        self.check_online()?;
        let mut partitions = self.partitions.write().await;
        let partition = partitions.entry(partition.to_string()).or_default();
        if partition.events.contains_key(&id) {
            return Ok(EventInsert::SlotTaken);
        }
        if let Some(required) = predecessor {
            if !partition.events.contains_key(&required) {
                return Ok(EventInsert::PredecessorAbsent);
            }
        }
        partition.events.insert(id, record);
        Ok(EventInsert::Applied)
    }

    async fn get_event(&self, partition: &str, id: u64) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(partition)
            .and_then(|p| p.events.get(&id).cloned()))
    }

    async fn last_event(&self, partition: &str) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(partition)
            .and_then(|p| p.events.last_key_value())
            .map(|(_, record)| record.clone()))
    }

    async fn events_from(
        &self,
        partition: &str,
        start: u64,
        end: Option<u64>,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_online()?;
        let partitions = self.partitions.read().await;
        let Some(partition) = partitions.get(partition) else {
            return Ok(Vec::new());
        };
        let records = match end {
            Some(end) => partition.events.range(start..end).map(|(_, r)| r.clone()).collect(),
            None => partition.events.range(start..).map(|(_, r)| r.clone()).collect(),
        };
        Ok(records)
    }

    async fn put_view(
        &self,
        partition: &str,
        view_name: &str,
        event_id: u64,
        record: Document,
    ) -> Result<ViewPut, StoreError> {
        self.check_online()?;
        let mut partitions = self.partitions.write().await;
        let partition = partitions.entry(partition.to_string()).or_default();
        if let Some(stored) = partition.views.get(view_name) {
            if stored.event_id >= event_id {
                return Ok(ViewPut::Superseded);
            }
        }
        partition
            .views
            .insert(view_name.to_string(), StoredView { event_id, record });
        Ok(ViewPut::Applied)
    }

    async fn get_view(
        &self,
        partition: &str,
        view_name: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.check_online()?;
        let partitions = self.partitions.read().await;
        Ok(partitions
            .get(partition)
            .and_then(|p| p.views.get(view_name))
            .map(|stored| stored.record.clone()))
    }
}

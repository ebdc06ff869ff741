// StreamRegistry hands out stable EventStream handles without re-establishing
// store connectivity per call.
//
// Purpose
// - One live handle per (stream_set, stream_name) identity for the life of
//   the owning process.
//
// Responsibilities
// - Serve concurrent lookups and insertions; equivalent-identity races
//   converge on a single map entry.
// - No eviction. Suitable for short-lived compute invocations; a long-running
//   process with unbounded identity cardinality needs a bounded cache
//   instead.
//
// Boundaries
// - An explicit instance owned by the composition root and passed by
//   reference. There is no process-global registry.

use crate::application::event_stream::EventStream;
use crate::core::namespace::Namespace;
use crate::core::ports::TransactionalStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct StreamRegistry<S: TransactionalStore> {
    store: Arc<S>,
    streams: RwLock<HashMap<Namespace, Arc<EventStream<S>>>>,
}

impl<S: TransactionalStore> StreamRegistry<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            streams: RwLock::new(HashMap::new()),
        }
    }

    /// Return the handle for this identity, constructing and registering it
    /// on first request.
    ///
    /// Racing callers may briefly construct separate handles, but only one is
    /// registered and all of them observe the same namespace.
    pub async fn get_or_create(
        &self,
        stream_set: &str,
        stream_name: &str,
    ) -> Arc<EventStream<S>> {
        let namespace = Namespace::new(stream_set, stream_name);
        if let Some(stream) = self.streams.read().await.get(&namespace) {
            return stream.clone();
        }
        let mut streams = self.streams.write().await;
        streams
            .entry(namespace.clone())
            .or_insert_with(|| Arc::new(EventStream::new(namespace, self.store.clone())))
            .clone()
    }
}

// ViewCache stores the most recent compiled view per (namespace, view name)
// while tolerating concurrent, possibly out-of-order, re-compilations.
//
// Purpose
// - Monotonic overwrite protection: a stored view's eventId never decreases.
//
// Responsibilities
// - Treat a stale write as a silent no-op, not an error, so redundant or
//   delayed re-projections stay idempotent for the caller.
//
// Boundaries
// - Independent of EventStream; shares nothing but the store port and the
//   namespace identity.

use crate::core::namespace::Namespace;
use crate::core::ports::{Document, StoreError, TransactionalStore, ViewPut};
use crate::core::view::CompiledView;
use std::sync::Arc;

pub struct ViewCache<S: TransactionalStore> {
    store: Arc<S>,
}

impl<S: TransactionalStore> ViewCache<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Point lookup. Absence is not an error.
    pub async fn get(
        &self,
        namespace: &Namespace,
        view_name: &str,
    ) -> Result<Option<CompiledView>, StoreError> {
        self.store
            .get_view(&namespace.partition_key(), view_name)
            .await?
            .map(CompiledView::from_document)
            .transpose()
    }

    /// Store `payload` as the view compiled up to `event_id`.
    ///
    /// The write lands only when no view is stored yet or the stored view's
    /// eventId is strictly smaller. A superseded write returns Ok without
    /// modifying stored state.
    pub async fn put(
        &self,
        namespace: &Namespace,
        view_name: &str,
        event_id: u64,
        payload: Document,
    ) -> Result<(), StoreError> {
        let partition = namespace.partition_key();
        let view = CompiledView::new(partition.clone(), view_name, event_id, payload);
        let put = self
            .store
            .put_view(&partition, view_name, event_id, view.to_document())
            .await?;
        if put == ViewPut::Superseded {
            tracing::debug!(
                namespace = %namespace,
                view_name,
                event_id,
                "view write superseded by a newer projection"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod view_cache_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_store::InMemoryStore;
    use crate::test_support::fixtures::payloads::{make_balance_view_payload, make_numbered_payload};
    use rstest::{fixture, rstest};

    #[fixture]
    fn cache() -> ViewCache<InMemoryStore> {
        ViewCache::new(Arc::new(InMemoryStore::new()))
    }

    #[fixture]
    fn namespace() -> Namespace {
        Namespace::new("billing", "account-42")
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_none_for_an_absent_view(
        cache: ViewCache<InMemoryStore>,
        namespace: Namespace,
    ) {
        assert!(cache.get(&namespace, "balance").await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_store_and_return_a_view(
        cache: ViewCache<InMemoryStore>,
        namespace: Namespace,
    ) {
        cache
            .put(&namespace, "balance", 7, make_balance_view_payload())
            .await
            .unwrap();
        let view = cache.get(&namespace, "balance").await.unwrap().unwrap();
        assert_eq!(view.view_name, "balance");
        assert_eq!(view.event_id, 7);
        assert_eq!(view.payload["total"], 4250);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_ignore_a_write_behind_the_stored_view(
        cache: ViewCache<InMemoryStore>,
        namespace: Namespace,
    ) {
        cache
            .put(&namespace, "balance", 10, make_numbered_payload(10))
            .await
            .unwrap();
        cache
            .put(&namespace, "balance", 5, make_numbered_payload(5))
            .await
            .unwrap();
        let view = cache.get(&namespace, "balance").await.unwrap().unwrap();
        assert_eq!(view.event_id, 10);
        assert_eq!(view.payload["n"], 10);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_ignore_a_write_at_the_stored_event_id(
        cache: ViewCache<InMemoryStore>,
        namespace: Namespace,
    ) {
        cache
            .put(&namespace, "balance", 10, make_numbered_payload(10))
            .await
            .unwrap();
        cache
            .put(&namespace, "balance", 10, make_numbered_payload(99))
            .await
            .unwrap();
        let view = cache.get(&namespace, "balance").await.unwrap().unwrap();
        assert_eq!(view.payload["n"], 10);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_accept_a_strictly_newer_write(
        cache: ViewCache<InMemoryStore>,
        namespace: Namespace,
    ) {
        cache
            .put(&namespace, "balance", 10, make_numbered_payload(10))
            .await
            .unwrap();
        cache
            .put(&namespace, "balance", 11, make_numbered_payload(11))
            .await
            .unwrap();
        let view = cache.get(&namespace, "balance").await.unwrap().unwrap();
        assert_eq!(view.event_id, 11);
        assert_eq!(view.payload["n"], 11);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_view_names_apart(
        cache: ViewCache<InMemoryStore>,
        namespace: Namespace,
    ) {
        cache
            .put(&namespace, "balance", 7, make_balance_view_payload())
            .await
            .unwrap();
        assert!(cache.get(&namespace, "history").await.unwrap().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_propagate_a_transport_failure(namespace: Namespace) {
        let mut store = InMemoryStore::new();
        store.toggle_offline();
        let cache = ViewCache::new(Arc::new(store));
        let result = cache.get(&namespace, "balance").await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }
}

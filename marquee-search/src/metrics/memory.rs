//! In-process metric store for development mode and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{NewSearchMetric, SearchMetric, SearchMetricStore};
use crate::errors::MetricStoreError;

/// Metric store kept in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryMetricStore {
    documents: RwLock<Vec<SearchMetric>>,
    next_id: AtomicU64,
}

impl InMemoryMetricStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored document, in insertion order.
    pub fn documents(&self) -> Vec<SearchMetric> {
        self.documents.read().clone()
    }
}

#[async_trait]
impl SearchMetricStore for InMemoryMetricStore {
    async fn find_by_term(&self, term: &str) -> Result<Vec<SearchMetric>, MetricStoreError> {
        Ok(self
            .documents
            .read()
            .iter()
            .filter(|doc| doc.search_term == term)
            .cloned()
            .collect())
    }

    async fn create(&self, metric: NewSearchMetric) -> Result<SearchMetric, MetricStoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let document = SearchMetric {
            id: format!("mem-{id}"),
            search_term: metric.search_term,
            count: metric.count,
            poster_url: metric.poster_url,
            movie_id: metric.movie_id,
        };

        self.documents.write().push(document.clone());
        Ok(document)
    }

    async fn update_count(&self, id: &str, count: u64) -> Result<SearchMetric, MetricStoreError> {
        let mut documents = self.documents.write();
        let document = documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| MetricStoreError::DocumentNotFound { id: id.to_string() })?;

        document.count = count;
        Ok(document.clone())
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, MetricStoreError> {
        let mut documents = self.documents();
        // Stable sort: equal counts keep insertion order.
        documents.sort_by(|a, b| b.count.cmp(&a.count));
        documents.truncate(limit);
        Ok(documents)
    }
}

//! Search metric documents and the stores that hold them.
//!
//! One document per search term, carrying a hit count and the poster and
//! identifier of the top result from the first time the term was seen.

mod appwrite;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use appwrite::AppwriteMetricStore;
pub use memory::InMemoryMetricStore;

use crate::errors::MetricStoreError;

/// A stored search metric document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetric {
    /// Store-assigned document identifier
    #[serde(rename = "$id")]
    pub id: String,
    /// The search term, used as a natural key
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Number of times the term has been searched
    pub count: u64,
    /// Poster of the top result when first recorded
    pub poster_url: String,
    /// Catalog identifier of the top result when first recorded
    pub movie_id: u64,
}

/// Fields for a document that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSearchMetric {
    /// The search term
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    /// Initial count
    pub count: u64,
    /// Poster of the top result
    pub poster_url: String,
    /// Catalog identifier of the top result
    pub movie_id: u64,
}

/// Document store operations used for search metrics.
///
/// Lookup and write are separate calls; implementations do not make the
/// pair atomic.
#[async_trait]
pub trait SearchMetricStore: Send + Sync + std::fmt::Debug {
    /// Finds documents whose search term equals `term` exactly.
    ///
    /// # Errors
    /// - `MetricStoreError` - Store unreachable or rejected the query
    async fn find_by_term(&self, term: &str) -> Result<Vec<SearchMetric>, MetricStoreError>;

    /// Stores a new document and returns it with its identifier.
    ///
    /// # Errors
    /// - `MetricStoreError` - Store unreachable or rejected the write
    async fn create(&self, metric: NewSearchMetric) -> Result<SearchMetric, MetricStoreError>;

    /// Sets the count of an existing document.
    ///
    /// # Errors
    /// - `MetricStoreError::DocumentNotFound` - No document with that identifier
    /// - `MetricStoreError` - Store unreachable or rejected the write
    async fn update_count(&self, id: &str, count: u64) -> Result<SearchMetric, MetricStoreError>;

    /// Lists up to `limit` documents ordered by descending count.
    ///
    /// # Errors
    /// - `MetricStoreError` - Store unreachable or rejected the query
    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, MetricStoreError>;
}

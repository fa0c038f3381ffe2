//! Test doubles for the catalog and the metric store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::catalog::{CatalogEndpoint, MovieCatalog};
use crate::errors::{CatalogError, MetricStoreError};
use crate::metrics::{InMemoryMetricStore, NewSearchMetric, SearchMetric, SearchMetricStore};
use crate::types::Movie;

/// Builds a movie with only the fields the search flow reads.
pub fn movie(id: u64, title: &str, poster_path: Option<&str>) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: poster_path.map(str::to_string),
        release_date: None,
        vote_average: None,
        original_language: None,
    }
}

/// Catalog returning scripted responses and recording every request.
///
/// Queries without a script answer with an empty listing.
#[derive(Debug, Default)]
pub struct ScriptedCatalog {
    responses: Mutex<HashMap<CatalogEndpoint, (Duration, Result<Vec<Movie>, CatalogError>)>>,
    requests: Mutex<Vec<CatalogEndpoint>>,
}

impl ScriptedCatalog {
    /// Creates a catalog with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response for `query`.
    pub fn respond(self, query: &str, response: Result<Vec<Movie>, CatalogError>) -> Self {
        self.respond_after(query, Duration::ZERO, response)
    }

    /// Scripts the response for `query`, delivered after `delay`.
    pub fn respond_after(
        self,
        query: &str,
        delay: Duration,
        response: Result<Vec<Movie>, CatalogError>,
    ) -> Self {
        self.responses
            .lock()
            .insert(CatalogEndpoint::for_query(query), (delay, response));
        self
    }

    /// Every endpoint requested so far, in order.
    pub fn requests(&self) -> Vec<CatalogEndpoint> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl MovieCatalog for ScriptedCatalog {
    async fn fetch_movies(&self, endpoint: &CatalogEndpoint) -> Result<Vec<Movie>, CatalogError> {
        self.requests.lock().push(endpoint.clone());
        let scripted = self.responses.lock().get(endpoint).cloned();

        match scripted {
            Some((delay, response)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Metric store whose every call fails.
#[derive(Debug, Default)]
pub struct FailingMetricStore;

fn unavailable() -> MetricStoreError {
    MetricStoreError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl SearchMetricStore for FailingMetricStore {
    async fn find_by_term(&self, _term: &str) -> Result<Vec<SearchMetric>, MetricStoreError> {
        Err(unavailable())
    }

    async fn create(&self, _metric: NewSearchMetric) -> Result<SearchMetric, MetricStoreError> {
        Err(unavailable())
    }

    async fn update_count(&self, _id: &str, _count: u64) -> Result<SearchMetric, MetricStoreError> {
        Err(unavailable())
    }

    async fn top_by_count(&self, _limit: usize) -> Result<Vec<SearchMetric>, MetricStoreError> {
        Err(unavailable())
    }
}

/// In-memory store whose lookups for one term never complete.
#[derive(Debug)]
pub struct StallingMetricStore {
    stalled_term: String,
    inner: InMemoryMetricStore,
}

impl StallingMetricStore {
    /// Creates a store that hangs on every lookup of `stalled_term`.
    pub fn new(stalled_term: &str) -> Self {
        Self {
            stalled_term: stalled_term.to_string(),
            inner: InMemoryMetricStore::new(),
        }
    }

    /// Documents written so far.
    pub fn documents(&self) -> Vec<SearchMetric> {
        self.inner.documents()
    }
}

#[async_trait]
impl SearchMetricStore for StallingMetricStore {
    async fn find_by_term(&self, term: &str) -> Result<Vec<SearchMetric>, MetricStoreError> {
        if term == self.stalled_term {
            std::future::pending::<()>().await;
        }
        self.inner.find_by_term(term).await
    }

    async fn create(&self, metric: NewSearchMetric) -> Result<SearchMetric, MetricStoreError> {
        self.inner.create(metric).await
    }

    async fn update_count(&self, id: &str, count: u64) -> Result<SearchMetric, MetricStoreError> {
        self.inner.update_count(id, count).await
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, MetricStoreError> {
        self.inner.top_by_count(limit).await
    }
}

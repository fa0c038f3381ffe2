//! Movie fetch and persist orchestration.
//!
//! One call of [`MovieDiscoveryService::run_query`] is one fetch cycle:
//! pick the endpoint, fetch, normalize the result, and for a non-empty
//! query with at least one result, count the search.

use std::sync::Arc;

use marquee_core::MarqueeConfig;

use crate::catalog::{CatalogEndpoint, MovieCatalog};
use crate::metrics::SearchMetricStore;
use crate::recorder::SearchMetricRecorder;
use crate::trending::{TrendingEntry, TrendingLoader};
use crate::types::Movie;

/// Result of one fetch cycle, as the UI consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Movies to display, possibly none.
    Success(Vec<Movie>),
    /// Human-readable message to display instead of movies.
    Failed(String),
}

/// Shared entry point for catalog search, metric recording and trending.
///
/// Cheap to clone; clones share the catalog, store and recorder lock.
#[derive(Debug, Clone)]
pub struct MovieDiscoveryService {
    catalog: Arc<dyn MovieCatalog>,
    recorder: Arc<SearchMetricRecorder>,
    trending: TrendingLoader,
    image_base_url: String,
}

impl MovieDiscoveryService {
    /// Wires a catalog and a metric store using the configured image base and trending limit.
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        store: Arc<dyn SearchMetricStore>,
        config: &MarqueeConfig,
    ) -> Self {
        let image_base_url = config.catalog.image_base_url.clone();
        Self {
            catalog,
            recorder: Arc::new(SearchMetricRecorder::new(
                Arc::clone(&store),
                image_base_url.clone(),
            )),
            trending: TrendingLoader::new(store, config.discovery.trending_limit),
            image_base_url,
        }
    }

    /// Base URL poster fragments resolve against.
    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }

    /// Runs one fetch cycle for a settled query.
    ///
    /// Errors are folded into [`FetchOutcome::Failed`]; metric recording
    /// only happens after a successful fetch and never changes the outcome.
    pub async fn run_query(&self, query: &str) -> FetchOutcome {
        let endpoint = CatalogEndpoint::for_query(query);

        let movies = match self.catalog.fetch_movies(&endpoint).await {
            Ok(movies) => movies,
            Err(e) => {
                tracing::error!(query = %query, error = %e, "Error fetching movies");
                return FetchOutcome::Failed(e.to_string());
            }
        };

        tracing::info!(query = %query, results = movies.len(), "Fetched movies");

        if !query.is_empty() {
            if let Some(top_result) = movies.first() {
                self.recorder.record(query, top_result).await;
            }
        }

        FetchOutcome::Success(movies)
    }

    /// Loads the trending leaderboard; `None` if the store failed.
    pub async fn load_trending(&self) -> Option<Vec<TrendingEntry>> {
        self.trending.load().await
    }
}

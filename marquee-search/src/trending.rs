//! Most-searched terms leaderboard.

use std::sync::Arc;

use serde::Serialize;

use crate::metrics::{SearchMetric, SearchMetricStore};

/// One ranked entry of the trending list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingEntry {
    /// 1-based position, in the order the store returned
    pub rank: usize,
    /// The search term
    pub search_term: String,
    /// Times the term was searched
    pub count: u64,
    /// Poster recorded with the term
    pub poster_url: String,
    /// Catalog identifier recorded with the term
    pub movie_id: u64,
}

impl TrendingEntry {
    fn ranked(rank: usize, metric: SearchMetric) -> Self {
        Self {
            rank,
            search_term: metric.search_term,
            count: metric.count,
            poster_url: metric.poster_url,
            movie_id: metric.movie_id,
        }
    }
}

/// Loads the top search terms by count.
#[derive(Debug, Clone)]
pub struct TrendingLoader {
    store: Arc<dyn SearchMetricStore>,
    limit: usize,
}

impl TrendingLoader {
    /// Creates a loader returning at most `limit` entries.
    pub fn new(store: Arc<dyn SearchMetricStore>, limit: usize) -> Self {
        Self { store, limit }
    }

    /// Fetches the leaderboard.
    ///
    /// Returns `None` when the store call fails; the failure is logged.
    pub async fn load(&self) -> Option<Vec<TrendingEntry>> {
        match self.store.top_by_count(self.limit).await {
            Ok(metrics) => Some(
                metrics
                    .into_iter()
                    .take(self.limit)
                    .enumerate()
                    .map(|(index, metric)| TrendingEntry::ranked(index + 1, metric))
                    .collect(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to load trending searches");
                None
            }
        }
    }
}

//! Records how often each search term is used.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::MetricStoreError;
use crate::metrics::{NewSearchMetric, SearchMetricStore};
use crate::types::{Movie, poster_url};

/// Result of one recording attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First search of this term; a document was created with count 1.
    Created {
        /// Identifier of the new document
        id: String,
    },
    /// Existing document's count was incremented.
    Incremented {
        /// Count after the increment
        count: u64,
    },
    /// The store failed; the error was logged and dropped.
    Failed,
}

/// Upserts the per-term counter document.
///
/// Failures never propagate: they are logged and reported as
/// [`RecordOutcome::Failed`].
#[derive(Debug)]
pub struct SearchMetricRecorder {
    store: Arc<dyn SearchMetricStore>,
    image_base_url: String,
    // Serializes lookup + write per term within this process. Entries are
    // removed once no caller holds or waits on them.
    term_locks: parking_lot::Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SearchMetricRecorder {
    /// Creates a recorder writing to `store`, building poster URLs from `image_base_url`.
    pub fn new(store: Arc<dyn SearchMetricStore>, image_base_url: impl Into<String>) -> Self {
        Self {
            store,
            image_base_url: image_base_url.into(),
            term_locks: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Counts one search of `term` whose top result was `top_result`.
    ///
    /// Calls for the same term run one at a time; calls for different
    /// terms never wait on each other.
    pub async fn record(&self, term: &str, top_result: &Movie) -> RecordOutcome {
        let lock = self.term_lock(term);

        let outcome = {
            let _guard = lock.lock().await;
            match self.upsert(term, top_result).await {
                Ok(outcome) => {
                    tracing::debug!(search_term = %term, ?outcome, "Recorded search metric");
                    outcome
                }
                Err(e) => {
                    tracing::error!(search_term = %term, error = %e, "Failed to record search metric");
                    RecordOutcome::Failed
                }
            }
        };

        self.release_term_lock(term, lock);
        outcome
    }

    fn term_lock(&self, term: &str) -> Arc<Mutex<()>> {
        Arc::clone(self.term_locks.lock().entry(term.to_string()).or_default())
    }

    fn release_term_lock(&self, term: &str, lock: Arc<Mutex<()>>) {
        let mut locks = self.term_locks.lock();
        // One reference in the map, one here: nobody else is waiting.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(term);
        }
    }

    #[cfg(test)]
    fn tracked_terms(&self) -> usize {
        self.term_locks.lock().len()
    }

    async fn upsert(&self, term: &str, top_result: &Movie) -> Result<RecordOutcome, MetricStoreError> {
        let existing = self.store.find_by_term(term).await?;

        if let Some(document) = existing.into_iter().next() {
            let updated = self
                .store
                .update_count(&document.id, document.count + 1)
                .await?;
            return Ok(RecordOutcome::Incremented {
                count: updated.count,
            });
        }

        let poster_path = top_result.poster_path.as_deref().unwrap_or_default();
        let created = self
            .store
            .create(NewSearchMetric {
                search_term: term.to_string(),
                count: 1,
                poster_url: poster_url(&self.image_base_url, poster_path),
                movie_id: top_result.id,
            })
            .await?;

        Ok(RecordOutcome::Created { id: created.id })
    }
}

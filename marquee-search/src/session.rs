//! UI state machine for one discovery view.
//!
//! | From            | Event            | To        |
//! |-----------------|------------------|-----------|
//! | any             | settled query    | Loading   |
//! | Loading         | fetch succeeded  | Success   |
//! | Loading         | fetch failed     | Failed    |
//!
//! Each trigger gets a generation number. A response that comes back
//! after a newer trigger has started is dropped without touching state.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;

use crate::service::{FetchOutcome, MovieDiscoveryService};
use crate::trending::TrendingEntry;
use crate::types::Movie;

/// Fetch lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FetchState {
    /// No fetch has run yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch produced a movie list
    Success,
    /// Last fetch produced an error message
    Failed,
}

/// Everything a view renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryView {
    /// Fetch lifecycle state
    pub state: FetchState,
    /// Query of the most recent trigger
    pub settled_query: String,
    /// Movies from the last successful fetch
    pub movies: Vec<Movie>,
    /// Message from the last failed fetch
    pub error: Option<String>,
    /// Trending leaderboard loaded at mount
    pub trending: Vec<TrendingEntry>,
}

impl DiscoveryView {
    /// True while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }
}

/// Drives one view's state from settled queries.
#[derive(Debug)]
pub struct DiscoverySession {
    service: MovieDiscoveryService,
    view: RwLock<DiscoveryView>,
    generation: AtomicU64,
}

impl DiscoverySession {
    /// Creates an idle session.
    pub fn new(service: MovieDiscoveryService) -> Self {
        Self {
            service,
            view: RwLock::new(DiscoveryView::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current view state.
    pub fn snapshot(&self) -> DiscoveryView {
        self.view.read().clone()
    }

    /// Initial mount: load trending once, then fetch for the empty query.
    pub async fn mount(&self) -> DiscoveryView {
        self.load_trending().await;
        self.on_settled("").await;
        self.snapshot()
    }

    /// Replaces the trending list; a failed load leaves it unchanged.
    pub async fn load_trending(&self) {
        if let Some(entries) = self.service.load_trending().await {
            self.view.write().trending = entries;
        }
    }

    /// Runs a fetch cycle for a newly settled query.
    ///
    /// Returns the resulting view, or `None` if a newer query superseded
    /// this one before it finished.
    pub async fn on_settled(&self, query: &str) -> Option<DiscoveryView> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut view = self.view.write();
            view.state = FetchState::Loading;
            view.error = None;
            view.settled_query = query.to_string();
        }

        let outcome = self.service.run_query(query).await;

        let mut view = self.view.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(query = %query, generation, "Dropping superseded response");
            return None;
        }

        match outcome {
            FetchOutcome::Success(movies) => {
                view.movies = movies;
                view.state = FetchState::Success;
            }
            FetchOutcome::Failed(message) => {
                view.movies.clear();
                view.error = Some(message);
                view.state = FetchState::Failed;
            }
        }

        Some(view.clone())
    }
}

//! Marquee Search - movie discovery and search metrics

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Fetches movies from the catalog API, records how often each term is
//! searched in a document store, and exposes the most-searched terms as a
//! trending list. [`DiscoverySession`] ties these together into the UI
//! state machine.

pub mod catalog;
pub mod errors;
pub mod metrics;
pub mod recorder;
pub mod service;
pub mod session;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
pub mod trending;
pub mod types;

// Re-export main types
pub use catalog::{CatalogEndpoint, MovieCatalog, TmdbCatalog};
pub use errors::{CatalogError, MetricStoreError};
pub use metrics::{
    AppwriteMetricStore, InMemoryMetricStore, NewSearchMetric, SearchMetric, SearchMetricStore,
};
pub use recorder::{RecordOutcome, SearchMetricRecorder};
pub use service::{FetchOutcome, MovieDiscoveryService};
pub use session::{DiscoverySession, DiscoveryView, FetchState};
pub use trending::{TrendingEntry, TrendingLoader};
pub use types::{Movie, poster_url};

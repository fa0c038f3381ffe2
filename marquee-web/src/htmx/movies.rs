//! Movie search and trending partials

use axum::extract::{Query, State};
use axum::response::Html;
use marquee_search::FetchOutcome;
use serde::Deserialize;

use crate::components::{error_message, movie_grid, trending_section};
use crate::server::AppState;

/// Query string of the search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Settled search text; absent or empty means browse popular movies
    #[serde(default)]
    pub query: String,
}

/// Runs one fetch cycle and renders the movie grid or the error message.
pub async fn movie_results(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    match state.service.run_query(&params.query).await {
        FetchOutcome::Success(movies) => {
            Html(movie_grid(&movies, state.service.image_base_url()))
        }
        FetchOutcome::Failed(message) => Html(error_message(&message)),
    }
}

/// Renders the trending strip, or nothing if it is empty or failed to load.
pub async fn trending_list(State(state): State<AppState>) -> Html<String> {
    let entries = state.service.load_trending().await.unwrap_or_default();
    Html(trending_section(&entries))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use marquee_search::testing::{FailingMetricStore, ScriptedCatalog, movie};
    use marquee_search::{CatalogEndpoint, CatalogError, InMemoryMetricStore};

    use crate::server::test_support::{get_text, test_state};

    #[tokio::test]
    async fn test_search_renders_results_and_records_metric() {
        let catalog = Arc::new(
            ScriptedCatalog::new().respond("batman", Ok(vec![movie(1, "Batman", Some("/a.jpg"))])),
        );
        let store = Arc::new(InMemoryMetricStore::new());

        let (status, body) = get_text(
            test_state(catalog.clone(), store.clone()),
            "/htmx/movies?query=batman",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches("<li").count(), 1);
        assert!(body.contains(">Batman</p>"));
        assert_eq!(catalog.requests(), vec![CatalogEndpoint::for_query("batman")]);
        assert_eq!(store.documents()[0].search_term, "batman");
    }

    #[tokio::test]
    async fn test_missing_query_browses_popular() {
        let catalog = Arc::new(ScriptedCatalog::new());

        get_text(
            test_state(catalog.clone(), Arc::new(InMemoryMetricStore::new())),
            "/htmx/movies",
        )
        .await;

        assert_eq!(catalog.requests(), vec![CatalogEndpoint::Discover]);
    }

    #[tokio::test]
    async fn test_failure_renders_error_and_no_movies() {
        let catalog = Arc::new(
            ScriptedCatalog::new().respond("", Err(CatalogError::Http { status: 500 })),
        );
        let store = Arc::new(InMemoryMetricStore::new());

        let (status, body) =
            get_text(test_state(catalog, store.clone()), "/htmx/movies?query=").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("HTTP error! status: 500"));
        assert!(body.contains("text-red-500"));
        assert!(!body.contains("<li"));
        assert!(store.documents().is_empty());
    }

    #[tokio::test]
    async fn test_trending_failure_renders_nothing() {
        let (status, body) = get_text(
            test_state(Arc::new(ScriptedCatalog::new()), Arc::new(FailingMetricStore)),
            "/htmx/trending",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "");
    }
}

//! Discovery page - hero, search box, trending strip, movie grid

use axum::extract::{Query, State};
use axum::response::Html;

use crate::components::layout::hero_header;
use crate::components::{render_page, search_input, spinner, trending_section};
use crate::htmx::SearchParams;
use crate::server::AppState;

/// Renders the discovery page.
///
/// Trending is loaded here, once per page mount. The movie grid loads
/// itself through `/htmx/movies` as soon as the page is in the browser.
pub async fn home_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let trending = state.service.load_trending().await.unwrap_or_default();
    let quiet_period = state.config.discovery.debounce_quiet_period;

    let results_url = format!(
        "/htmx/movies?query={}",
        urlencoding::encode(&params.query)
    );

    let content = format!(
        r##"{header}
        {trending}
        <section class="all-movies">
            <h2 class="text-2xl font-bold mb-6">All Movies</h2>
            {spinner}
            <div id="movie-results" hx-get="{results_url}" hx-trigger="load" hx-indicator="#movie-spinner"></div>
        </section>"##,
        header = hero_header(&search_input(&params.query, quiet_period)),
        trending = trending_section(&trending),
        spinner = spinner("movie-spinner"),
    );

    render_page("Discover", &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use marquee_search::testing::{FailingMetricStore, ScriptedCatalog};
    use marquee_search::{InMemoryMetricStore, NewSearchMetric, SearchMetricStore};

    use crate::server::test_support::{get_text, test_state};

    #[tokio::test]
    async fn test_page_includes_search_and_deferred_results() {
        let catalog = Arc::new(ScriptedCatalog::new());

        let (status, body) = get_text(
            test_state(catalog.clone(), Arc::new(InMemoryMetricStore::new())),
            "/",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Without the Hassle"));
        assert!(body.contains(r#"name="query""#));
        assert!(body.contains(r#"hx-get="/htmx/movies?query=""#));
        assert!(body.contains("All Movies"));
        assert!(!body.contains(r#"id="trending""#));
        // The grid is fetched by the browser, not during page render.
        assert!(catalog.requests().is_empty());
    }

    #[tokio::test]
    async fn test_page_renders_trending_at_mount() {
        let store = Arc::new(InMemoryMetricStore::new());
        store
            .create(NewSearchMetric {
                search_term: "batman".to_string(),
                count: 2,
                poster_url: "https://image.tmdb.org/t/p/w500/a.jpg".to_string(),
                movie_id: 1,
            })
            .await
            .unwrap();

        let (_, body) = get_text(test_state(Arc::new(ScriptedCatalog::new()), store), "/").await;

        assert!(body.contains(r#"id="trending""#));
        assert!(body.contains(r#"data-rank="1""#));
    }

    #[tokio::test]
    async fn test_page_survives_trending_failure() {
        let (status, body) = get_text(
            test_state(Arc::new(ScriptedCatalog::new()), Arc::new(FailingMetricStore)),
            "/?query=the%20thing",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"value="the thing""#));
        assert!(body.contains(r#"hx-get="/htmx/movies?query=the%20thing""#));
    }
}

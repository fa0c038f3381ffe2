//! HTMX + Tailwind web server for Marquee
//!
//! Serves the discovery page, its HTMX partials and a small JSON API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use marquee_core::MarqueeConfig;
use marquee_search::MovieDiscoveryService;
use tower_http::cors::CorsLayer;

use crate::handlers::{api_movies, api_trending};
use crate::htmx::{movie_results, trending_list};
use crate::pages::home_page;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Catalog search, metric recording and trending
    pub service: MovieDiscoveryService,
    /// Startup configuration
    pub config: Arc<MarqueeConfig>,
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        // HTMX partial update endpoints
        .route("/htmx/movies", get(movie_results))
        .route("/htmx/trending", get(trending_list))
        // JSON API endpoints (for external clients)
        .route("/api/movies", get(api_movies))
        .route("/api/trending", get(api_trending))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the configured address and serves until the process stops.
///
/// # Errors
///
/// - `std::io::Error` - The address could not be bound or serving failed
pub async fn run_server(config: MarqueeConfig, service: MovieDiscoveryService) -> std::io::Result<()> {
    let address = format!("{}:{}", config.web.host, config.web.port);
    let state = AppState {
        service,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Marquee running on http://{address}");
    println!("Marquee running on http://{address}");

    axum::serve(listener, build_router(state)).await
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use marquee_core::MarqueeConfig;
    use marquee_search::{MovieDiscoveryService, MovieCatalog, SearchMetricStore};
    use tower::ServiceExt;

    use super::{AppState, build_router};

    pub(crate) fn test_state(
        catalog: Arc<dyn MovieCatalog>,
        store: Arc<dyn SearchMetricStore>,
    ) -> AppState {
        let config = MarqueeConfig::default();
        AppState {
            service: MovieDiscoveryService::new(catalog, store, &config),
            config: Arc::new(config),
        }
    }

    pub(crate) async fn get_text(state: AppState, uri: &str) -> (StatusCode, String) {
        let response = build_router(state)
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

//! API handlers for movie search and trending

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use marquee_search::{FetchOutcome, Movie, TrendingEntry};
use serde::Serialize;
use serde_json::json;

use crate::htmx::SearchParams;
use crate::server::AppState;

/// Movie as exposed by the JSON API, with the poster URL resolved.
#[derive(Serialize)]
pub struct MovieSummary {
    /// Catalog identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Full poster URL, if the movie has a poster
    pub poster_url: Option<String>,
    /// Four-digit release year
    pub release_year: Option<String>,
    /// Average user rating out of 10
    pub vote_average: Option<f64>,
}

impl MovieSummary {
    fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie.poster_url(image_base_url),
            release_year: movie.release_year().map(str::to_string),
            vote_average: movie.vote_average,
        }
    }
}

/// Runs one fetch cycle and returns the movies as JSON; 502 with the message on failure.
pub async fn api_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    match state.service.run_query(&params.query).await {
        FetchOutcome::Success(movies) => {
            let image_base_url = state.service.image_base_url();
            let results: Vec<MovieSummary> = movies
                .iter()
                .map(|movie| MovieSummary::from_movie(movie, image_base_url))
                .collect();

            Ok(Json(json!({
                "query": params.query,
                "results": results,
                "total": results.len()
            })))
        }
        FetchOutcome::Failed(message) => Err((
            StatusCode::BAD_GATEWAY,
            Json(json!({ "query": params.query, "error": message })),
        )),
    }
}

/// Returns the trending leaderboard; empty when the store is unavailable.
pub async fn api_trending(State(state): State<AppState>) -> Json<Vec<TrendingEntry>> {
    Json(state.service.load_trending().await.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use marquee_search::testing::{ScriptedCatalog, movie};
    use marquee_search::{CatalogError, InMemoryMetricStore, NewSearchMetric, SearchMetricStore};
    use serde_json::Value;

    use crate::server::test_support::{get_text, test_state};

    #[tokio::test]
    async fn test_movies_json_includes_poster_urls() {
        let catalog = Arc::new(
            ScriptedCatalog::new().respond("batman", Ok(vec![movie(1, "Batman", Some("/a.jpg"))])),
        );

        let (status, body) = get_text(
            test_state(catalog, Arc::new(InMemoryMetricStore::new())),
            "/api/movies?query=batman",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["results"][0]["title"], "Batman");
        assert_eq!(
            json["results"][0]["poster_url"],
            "https://image.tmdb.org/t/p/w500/a.jpg"
        );
    }

    #[tokio::test]
    async fn test_movies_json_failure_is_bad_gateway() {
        let catalog = Arc::new(ScriptedCatalog::new().respond(
            "zzz",
            Err(CatalogError::Network {
                reason: "connection refused".to_string(),
            }),
        ));

        let (status, body) = get_text(
            test_state(catalog, Arc::new(InMemoryMetricStore::new())),
            "/api/movies?query=zzz",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "Network error: connection refused");
    }

    #[tokio::test]
    async fn test_trending_json_is_ranked() {
        let store = Arc::new(InMemoryMetricStore::new());
        for (term, count) in [("heat", 2), ("dune", 8)] {
            store
                .create(NewSearchMetric {
                    search_term: term.to_string(),
                    count,
                    poster_url: format!("https://image.tmdb.org/t/p/w500/{term}.jpg"),
                    movie_id: count,
                })
                .await
                .unwrap();
        }

        let (_, body) = get_text(
            test_state(Arc::new(ScriptedCatalog::new()), store),
            "/api/trending",
        )
        .await;

        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json[0]["rank"], 1);
        assert_eq!(json[0]["search_term"], "dune");
        assert_eq!(json[1]["search_term"], "heat");
    }
}

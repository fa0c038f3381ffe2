//! Movie catalog API client.
//!
//! Two endpoints are used: a popularity-sorted discover listing when the
//! query is empty, and text search otherwise. An empty query is never sent
//! to the search endpoint.

use std::time::Duration;

use async_trait::async_trait;
use marquee_core::config::CatalogConfig;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::CatalogError;
use crate::types::Movie;

const FALLBACK_FAILURE_MESSAGE: &str = "Failed to fetch movies";

/// Catalog endpoint chosen for a settled query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogEndpoint {
    /// Browse listing sorted by descending popularity
    Discover,
    /// Text search
    Search {
        /// Raw query text, encoded when the URL is built
        query: String,
    },
}

impl CatalogEndpoint {
    /// Picks the endpoint for a query: empty means discover, anything else searches.
    pub fn for_query(query: &str) -> Self {
        if query.is_empty() {
            CatalogEndpoint::Discover
        } else {
            CatalogEndpoint::Search {
                query: query.to_string(),
            }
        }
    }

    /// Path and query string relative to the API base URL.
    pub fn path_and_query(&self) -> String {
        match self {
            CatalogEndpoint::Discover => "/discover/movie?sort_by=popularity.desc".to_string(),
            CatalogEndpoint::Search { query } => {
                format!("/search/movie?query={}", urlencoding::encode(query))
            }
        }
    }

    /// Absolute URL against `api_base_url`.
    pub fn url(&self, api_base_url: &str) -> String {
        format!(
            "{}{}",
            api_base_url.trim_end_matches('/'),
            self.path_and_query()
        )
    }
}

/// Source of movie listings.
#[async_trait]
pub trait MovieCatalog: Send + Sync + std::fmt::Debug {
    /// Fetches one page of movies from `endpoint`.
    ///
    /// # Errors
    /// - `CatalogError::Http` - Non-2xx status
    /// - `CatalogError::Network` - Transport failure
    /// - `CatalogError::Parse` - Body was not a catalog listing
    /// - `CatalogError::Api` - Payload carried a failure flag
    async fn fetch_movies(&self, endpoint: &CatalogEndpoint) -> Result<Vec<Movie>, CatalogError>;
}

/// Listing payload shared by both endpoints.
#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    results: Option<Vec<Movie>>,
    #[serde(rename = "Response", default)]
    response: Option<Value>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    status_message: Option<String>,
}

impl CatalogResponse {
    fn is_failure(&self) -> bool {
        let response_flag = match &self.response {
            Some(Value::Bool(flag)) => !flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("false"),
            _ => false,
        };
        response_flag || self.success == Some(false)
    }

    fn into_movies(self) -> Result<Vec<Movie>, CatalogError> {
        if self.is_failure() {
            let message = self
                .error
                .or(self.status_message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string());
            return Err(CatalogError::Api { message });
        }

        Ok(self.results.unwrap_or_default())
    }
}

/// TMDB-compatible catalog client using bearer token authentication.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: reqwest::Client,
    api_base_url: String,
    bearer_token: String,
}

impl TmdbCatalog {
    /// Creates a catalog client from configuration.
    ///
    /// An empty bearer token is accepted; the catalog rejects the requests.
    ///
    /// # Errors
    /// - `CatalogError::Network` - HTTP client could not be built
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Self::with_timeout(config, config.request_timeout)
    }

    fn with_timeout(config: &CatalogConfig, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Network {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn fetch_movies(&self, endpoint: &CatalogEndpoint) -> Result<Vec<Movie>, CatalogError> {
        let url = endpoint.url(&self.api_base_url);
        tracing::debug!(%url, "Fetching movies from catalog");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.bearer_token)
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
            });
        }

        let body: CatalogResponse = response.json().await.map_err(|e| CatalogError::Parse {
            reason: format!("JSON parsing failed: {e}"),
        })?;

        body.into_movies()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Json};
    use axum::routing::get;
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/3")
    }

    fn catalog_at(base: String) -> TmdbCatalog {
        TmdbCatalog::new(&CatalogConfig {
            api_base_url: base,
            bearer_token: "secret-token".to_string(),
            ..CatalogConfig::default()
        })
        .unwrap()
    }

    fn decode(body: serde_json::Value) -> Result<Vec<Movie>, CatalogError> {
        serde_json::from_value::<CatalogResponse>(body)
            .unwrap()
            .into_movies()
    }

    #[test]
    fn test_empty_query_selects_discover() {
        assert_eq!(CatalogEndpoint::for_query(""), CatalogEndpoint::Discover);
        assert_eq!(
            CatalogEndpoint::Discover.url("https://api.themoviedb.org/3/"),
            "https://api.themoviedb.org/3/discover/movie?sort_by=popularity.desc"
        );
    }

    #[test]
    fn test_search_query_is_url_encoded() {
        let endpoint = CatalogEndpoint::for_query("fast & furious 7");
        assert_eq!(
            endpoint.path_and_query(),
            "/search/movie?query=fast%20%26%20furious%207"
        );
    }

    #[test]
    fn test_whitespace_query_still_searches() {
        assert_eq!(
            CatalogEndpoint::for_query(" "),
            CatalogEndpoint::Search {
                query: " ".to_string()
            }
        );
    }

    proptest! {
        #[test]
        fn test_non_empty_query_always_searches(query in ".{1,40}") {
            let url = CatalogEndpoint::for_query(&query).url("https://api.example/3");
            let expected = format!("https://api.example/3/search/movie?query={}", urlencoding::encode(&query));
            prop_assert_eq!(url, expected);
        }

        #[test]
        fn test_encoded_query_round_trips(query in "\\PC{1,40}") {
            let path = CatalogEndpoint::for_query(&query).path_and_query();
            let encoded = path.trim_start_matches("/search/movie?query=");
            prop_assert!(!encoded.contains(' ') && !encoded.contains('&'));
            prop_assert_eq!(urlencoding::decode(encoded).unwrap(), query);
        }
    }

    #[test]
    fn test_missing_results_is_empty_listing() {
        assert_eq!(decode(json!({"page": 1})).unwrap(), Vec::new());
    }

    #[test]
    fn test_response_false_uses_embedded_message() {
        let result = decode(json!({"Response": false, "Error": "Movie not found!"}));
        assert_eq!(
            result,
            Err(CatalogError::Api {
                message: "Movie not found!".to_string()
            })
        );
    }

    #[test]
    fn test_response_false_without_message_uses_fallback() {
        let result = decode(json!({"Response": "False", "results": []}));
        assert_eq!(
            result,
            Err(CatalogError::Api {
                message: "Failed to fetch movies".to_string()
            })
        );
    }

    #[test]
    fn test_success_false_uses_status_message() {
        let result = decode(json!({"success": false, "status_message": "Invalid API key"}));
        assert_eq!(result.unwrap_err().to_string(), "Invalid API key");
    }

    #[test]
    fn test_response_true_is_not_failure() {
        let movies = decode(json!({
            "Response": true,
            "results": [{"id": 1, "title": "Batman", "poster_path": "/a.jpg"}]
        }))
        .unwrap();
        assert_eq!(movies.len(), 1);
    }

    #[tokio::test]
    async fn test_discover_request_shape() {
        let router = Router::new().route(
            "/3/discover/movie",
            get(
                |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    assert_eq!(params.get("sort_by").map(String::as_str), Some("popularity.desc"));
                    assert_eq!(headers["authorization"], "Bearer secret-token");
                    assert_eq!(headers["accept"], "application/json");
                    Json(json!({
                        "results": [
                            {"id": 10, "title": "Popular One", "poster_path": "/p1.jpg"},
                            {"id": 11, "title": "Popular Two", "poster_path": null}
                        ]
                    }))
                },
            ),
        );
        let catalog = catalog_at(serve(router).await);

        let movies = catalog.fetch_movies(&CatalogEndpoint::Discover).await.unwrap();

        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Popular One", "Popular Two"]);
    }

    #[tokio::test]
    async fn test_search_query_reaches_server_decoded() {
        let router = Router::new().route(
            "/3/search/movie",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let query = params.get("query").cloned().unwrap_or_default();
                Json(json!({"results": [{"id": 1, "title": query}]}))
            }),
        );
        let catalog = catalog_at(serve(router).await);

        let movies = catalog
            .fetch_movies(&CatalogEndpoint::for_query("amélie & co"))
            .await
            .unwrap();

        assert_eq!(movies[0].title, "amélie & co");
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_error() {
        let router = Router::new().route(
            "/3/discover/movie",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
        );
        let catalog = catalog_at(serve(router).await);

        let result = catalog.fetch_movies(&CatalogEndpoint::Discover).await;

        assert_eq!(result, Err(CatalogError::Http { status: 500 }));
        assert_eq!(result.unwrap_err().to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_invalid_body_is_parse_error() {
        let router = Router::new().route("/3/discover/movie", get(|| async { "<html>" }));
        let catalog = catalog_at(serve(router).await);

        let result = catalog.fetch_movies(&CatalogEndpoint::Discover).await;
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_catalog_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let catalog = TmdbCatalog::with_timeout(
            &CatalogConfig {
                api_base_url: format!("http://{addr}/3"),
                ..CatalogConfig::default()
            },
            Duration::from_secs(2),
        )
        .unwrap();

        let result = catalog.fetch_movies(&CatalogEndpoint::Discover).await;
        assert!(matches!(result, Err(CatalogError::Network { .. })));
    }
}

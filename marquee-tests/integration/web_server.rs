use std::sync::Arc;

use marquee_search::{AppwriteMetricStore, MovieDiscoveryService, TmdbCatalog};
use marquee_web::{AppState, build_router};
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::fake_services::{CatalogReply, FakeCatalog, FakeDocumentStore, config_for};

struct TestApp {
    base_url: String,
    catalog: FakeCatalog,
    store: FakeDocumentStore,
    client: reqwest::Client,
}

impl TestApp {
    async fn start() -> Self {
        let catalog = FakeCatalog::start().await;
        let store = FakeDocumentStore::start().await;
        let config = config_for(&catalog, &store);

        let service = MovieDiscoveryService::new(
            Arc::new(TmdbCatalog::new(&config.catalog).unwrap()),
            Arc::new(AppwriteMetricStore::new(&config.store).unwrap()),
            &config,
        );
        let router = build_router(AppState {
            service,
            config: Arc::new(config),
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            catalog,
            store,
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, path: &str) -> (StatusCode, String) {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.text().await.unwrap())
    }
}

fn one_movie(id: u64, title: &str, poster: &str) -> CatalogReply {
    CatalogReply::Json(json!({
        "page": 1,
        "results": [{"id": id, "title": title, "poster_path": poster, "release_date": "1979-05-25"}]
    }))
}

#[tokio::test]
async fn test_home_page_shows_search_box_and_trending() {
    let app = TestApp::start().await;
    app.store.seed("alien", 4);

    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Search through thousands of movies"));
    assert!(body.contains("delay:500ms"));
    assert!(body.contains(r#"id="trending""#));
    assert!(body.contains("alien"));
    assert!(app.catalog.requests().is_empty());
}

#[tokio::test]
async fn test_search_partial_renders_and_persists() {
    let app = TestApp::start().await;
    app.catalog.reply("alien", one_movie(348, "Alien", "/alien.jpg"));

    let (status, body) = app.get("/htmx/movies?query=alien").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(">Alien</p>"));
    assert!(body.contains("https://image.tmdb.org/t/p/w500/alien.jpg"));

    app.get("/htmx/movies?query=alien").await;
    let documents = app.store.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["count"], 2);

    let (_, trending) = app.get("/htmx/trending").await;
    assert!(trending.contains(r#"data-rank="1""#));
}

#[tokio::test]
async fn test_catalog_outage_renders_message() {
    let app = TestApp::start().await;
    app.catalog.reply("", CatalogReply::Status(503));

    let (status, body) = app.get("/htmx/movies").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("HTTP error! status: 503"));
    assert!(!body.contains("<li"));
}

#[tokio::test]
async fn test_json_api_round_trip() {
    let app = TestApp::start().await;
    app.catalog.reply("heat", one_movie(949, "Heat", "/heat.jpg"));

    let (status, body) = app.get("/api/movies?query=heat").await;
    assert_eq!(status, StatusCode::OK);
    let movies: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(movies["query"], "heat");
    assert_eq!(movies["results"][0]["release_year"], "1979");

    let (_, body) = app.get("/api/trending").await;
    let trending: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(trending[0]["search_term"], "heat");
    assert_eq!(trending[0]["count"], 1);
    assert_eq!(trending[0]["movie_id"], 949);
}

#[tokio::test]
async fn test_json_api_reports_catalog_failure() {
    let app = TestApp::start().await;
    app.catalog.reply("ronin", CatalogReply::Status(500));

    let (status, body) = app.get("/api/movies?query=ronin").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "HTTP error! status: 500");
}

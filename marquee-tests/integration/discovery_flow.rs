use std::sync::Arc;

use marquee_search::{
    AppwriteMetricStore, DiscoverySession, FetchOutcome, FetchState, MovieDiscoveryService,
    TmdbCatalog,
};
use serde_json::json;

use crate::fake_services::{CatalogReply, FakeCatalog, FakeDocumentStore, config_for};

fn service_against(catalog: &FakeCatalog, store: &FakeDocumentStore) -> MovieDiscoveryService {
    let config = config_for(catalog, store);
    MovieDiscoveryService::new(
        Arc::new(TmdbCatalog::new(&config.catalog).unwrap()),
        Arc::new(AppwriteMetricStore::new(&config.store).unwrap()),
        &config,
    )
}

fn listing(titles: &[(u64, &str, &str)]) -> CatalogReply {
    let results: Vec<_> = titles
        .iter()
        .map(|(id, title, poster)| {
            json!({
                "id": id,
                "title": title,
                "poster_path": poster,
                "release_date": "1989-06-23",
                "vote_average": 7.2,
                "original_language": "en"
            })
        })
        .collect();
    CatalogReply::Json(json!({"page": 1, "results": results}))
}

#[tokio::test]
async fn test_search_shows_results_and_counts_term() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    catalog.reply(
        "batman",
        listing(&[(268, "Batman", "/a.jpg"), (414, "Batman Forever", "/b.jpg")]),
    );
    let session = DiscoverySession::new(service_against(&catalog, &store));

    let view = session.on_settled("batman").await.unwrap();

    assert_eq!(view.state, FetchState::Success);
    assert_eq!(view.movies.len(), 2);
    assert_eq!(view.movies[0].title, "Batman");
    assert!(view.error.is_none());
    assert_eq!(catalog.requests(), vec!["/3/search/movie?query=batman"]);

    let documents = store.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["searchTerm"], "batman");
    assert_eq!(documents[0]["count"], 1);
    assert_eq!(documents[0]["movie_id"], 268);
    assert_eq!(
        documents[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/a.jpg"
    );
}

#[tokio::test]
async fn test_empty_query_browses_popular_without_counting() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    catalog.reply("", listing(&[(1, "Popular One", "/p.jpg")]));
    let session = DiscoverySession::new(service_against(&catalog, &store));

    let view = session.on_settled("").await.unwrap();

    assert_eq!(view.state, FetchState::Success);
    assert_eq!(view.movies.len(), 1);
    assert_eq!(
        catalog.requests(),
        vec!["/3/discover/movie?sort_by=popularity.desc"]
    );
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn test_server_error_becomes_message() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    catalog.reply("", CatalogReply::Status(500));
    let session = DiscoverySession::new(service_against(&catalog, &store));

    let view = session.on_settled("").await.unwrap();

    assert_eq!(view.state, FetchState::Failed);
    assert_eq!(view.error.as_deref(), Some("HTTP error! status: 500"));
    assert!(view.movies.is_empty());
    assert!(!view.is_loading());
}

#[tokio::test]
async fn test_no_match_shows_empty_list_and_records_nothing() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    let service = service_against(&catalog, &store);

    let outcome = service.run_query("zzz_no_match").await;

    assert_eq!(outcome, FetchOutcome::Success(Vec::new()));
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn test_failure_flag_uses_payload_message() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    catalog.reply(
        "heat",
        CatalogReply::Json(json!({"Response": "False", "Error": "Too many results."})),
    );
    catalog.reply(
        "ronin",
        CatalogReply::Json(json!({"Response": false})),
    );
    let service = service_against(&catalog, &store);

    assert_eq!(
        service.run_query("heat").await,
        FetchOutcome::Failed("Too many results.".to_string())
    );
    assert_eq!(
        service.run_query("ronin").await,
        FetchOutcome::Failed("Failed to fetch movies".to_string())
    );
    assert!(store.documents().is_empty());
}

#[tokio::test]
async fn test_store_outage_does_not_hide_results() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    catalog.reply("alien", listing(&[(348, "Alien", "/alien.jpg")]));
    store.set_failing(true);
    let session = DiscoverySession::new(service_against(&catalog, &store));

    let view = session.mount().await;
    assert!(view.trending.is_empty());

    let view = session.on_settled("alien").await.unwrap();
    assert_eq!(view.state, FetchState::Success);
    assert_eq!(view.movies[0].title, "Alien");
}

#[tokio::test]
async fn test_mount_loads_top_five_trending() {
    let catalog = FakeCatalog::start().await;
    let store = FakeDocumentStore::start().await;
    for (term, count) in [
        ("heat", 3),
        ("dune", 9),
        ("alien", 1),
        ("ronin", 7),
        ("up", 5),
        ("jaws", 2),
        ("se7en", 4),
    ] {
        store.seed(term, count);
    }
    let session = DiscoverySession::new(service_against(&catalog, &store));

    let view = session.mount().await;

    let terms: Vec<_> = view
        .trending
        .iter()
        .map(|entry| entry.search_term.as_str())
        .collect();
    assert_eq!(terms, vec!["dune", "ronin", "up", "se7en", "heat"]);
    let ranks: Vec<_> = view.trending.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    assert_eq!(view.settled_query, "");
}

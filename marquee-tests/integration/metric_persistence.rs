use std::sync::Arc;

use marquee_search::testing::movie;
use marquee_search::{
    AppwriteMetricStore, RecordOutcome, SearchMetricRecorder, SearchMetricStore, TrendingLoader,
};

use crate::fake_services::{FakeCatalog, FakeDocumentStore, config_for};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

async fn appwrite_store() -> (FakeDocumentStore, Arc<AppwriteMetricStore>) {
    let catalog = FakeCatalog::start().await;
    let fake = FakeDocumentStore::start().await;
    let config = config_for(&catalog, &fake);
    let store = Arc::new(AppwriteMetricStore::new(&config.store).unwrap());
    (fake, store)
}

#[tokio::test]
async fn test_repeat_search_increments_single_document() {
    let (fake, store) = appwrite_store().await;
    let recorder = SearchMetricRecorder::new(store, IMAGE_BASE);
    let top = movie(268, "Batman", Some("/a.jpg"));

    let first = recorder.record("batman", &top).await;
    let second = recorder.record("batman", &top).await;

    assert!(matches!(first, RecordOutcome::Created { .. }));
    assert_eq!(second, RecordOutcome::Incremented { count: 2 });
    let documents = fake.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["count"], 2);
}

#[tokio::test]
async fn test_new_term_keeps_first_poster() {
    let (fake, store) = appwrite_store().await;
    let recorder = SearchMetricRecorder::new(store, IMAGE_BASE);

    recorder.record("alien", &movie(348, "Alien", Some("/alien.jpg"))).await;
    // A later top result does not replace the stored poster.
    recorder.record("alien", &movie(679, "Aliens", Some("/aliens.jpg"))).await;

    let documents = fake.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["searchTerm"], "alien");
    assert_eq!(documents[0]["movie_id"], 348);
    assert_eq!(
        documents[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/alien.jpg"
    );
}

#[tokio::test]
async fn test_terms_match_exactly() {
    let (fake, store) = appwrite_store().await;
    let recorder = SearchMetricRecorder::new(store, IMAGE_BASE);
    let top = movie(1, "Batman", None);

    recorder.record("batman", &top).await;
    recorder.record("Batman", &top).await;
    recorder.record("batman ", &top).await;

    assert_eq!(fake.documents().len(), 3);
}

#[tokio::test]
async fn test_missing_poster_stores_bare_base() {
    let (fake, store) = appwrite_store().await;
    let recorder = SearchMetricRecorder::new(store, IMAGE_BASE);

    recorder.record("obscure", &movie(7, "Obscure", None)).await;

    assert_eq!(
        fake.documents()[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/"
    );
}

#[tokio::test]
async fn test_concurrent_records_share_one_document() {
    let (fake, store) = appwrite_store().await;
    let recorder = Arc::new(SearchMetricRecorder::new(store, IMAGE_BASE));
    let top = movie(438631, "Dune", Some("/dune.jpg"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let recorder = Arc::clone(&recorder);
            let top = top.clone();
            tokio::spawn(async move { recorder.record("dune", &top).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let documents = fake.documents();
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["count"], 4);
}

#[tokio::test]
async fn test_store_failure_is_reported_not_raised() {
    let (fake, store) = appwrite_store().await;
    fake.set_failing(true);
    let recorder = SearchMetricRecorder::new(store.clone(), IMAGE_BASE);

    let outcome = recorder.record("heat", &movie(949, "Heat", Some("/heat.jpg"))).await;

    assert_eq!(outcome, RecordOutcome::Failed);
    assert!(store.find_by_term("heat").await.is_err());
}

#[tokio::test]
async fn test_trending_reads_store_order() {
    let (fake, store) = appwrite_store().await;
    for (term, count) in [("heat", 2), ("dune", 8), ("up", 5)] {
        fake.seed(term, count);
    }

    let entries = TrendingLoader::new(store, 2).load().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].search_term, "dune");
    assert_eq!(entries[0].count, 8);
    assert_eq!(entries[1].rank, 2);
    assert_eq!(entries[1].search_term, "up");
    assert_eq!(entries[1].poster_url, "https://image.tmdb.org/t/p/w500/up.jpg");
}

#[tokio::test]
async fn test_trending_failure_is_none() {
    let (fake, store) = appwrite_store().await;
    fake.set_failing(true);

    assert!(TrendingLoader::new(store, 5).load().await.is_none());
}

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{MarqueeConfig, SearchInput, SettledQueries, spawn_debouncer};
use marquee_search::testing::{ScriptedCatalog, movie};
use marquee_search::{
    CatalogEndpoint, DiscoverySession, FetchState, InMemoryMetricStore, MovieDiscoveryService,
};
use tokio::time::sleep;

const QUIET: Duration = Duration::from_millis(500);
const KEYSTROKE: Duration = Duration::from_millis(120);

struct Typing {
    input: SearchInput,
    settled: SettledQueries,
}

impl Typing {
    fn start() -> Self {
        let (debouncer, settled) = spawn_debouncer(QUIET, "");
        let input = SearchInput::new("", move |raw| {
            debouncer.update(raw).unwrap();
        });
        Self { input, settled }
    }

    async fn type_text(&mut self, text: &str) {
        for end in 1..=text.len() {
            self.input.set_value(&text[..end]);
            sleep(KEYSTROKE).await;
        }
    }

    fn clear(&mut self) {
        self.input.set_value("");
    }
}

fn session_with(
    catalog: ScriptedCatalog,
) -> (Arc<DiscoverySession>, Arc<ScriptedCatalog>, Arc<InMemoryMetricStore>) {
    let catalog = Arc::new(catalog);
    let store = Arc::new(InMemoryMetricStore::new());
    let service = MovieDiscoveryService::new(
        catalog.clone(),
        store.clone(),
        &MarqueeConfig::default(),
    );
    (Arc::new(DiscoverySession::new(service)), catalog, store)
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_fetches_once() {
    let (session, catalog, store) = session_with(
        ScriptedCatalog::new().respond("batman", Ok(vec![movie(268, "Batman", Some("/a.jpg"))])),
    );
    let mut typing = Typing::start();

    typing.type_text("batman").await;
    let query = typing.settled.next().await.unwrap();
    let view = session.on_settled(&query).await.unwrap();

    assert_eq!(query, "batman");
    assert_eq!(view.state, FetchState::Success);
    assert_eq!(catalog.requests(), vec![CatalogEndpoint::for_query("batman")]);
    assert_eq!(store.documents().len(), 1);

    sleep(QUIET * 4).await;
    assert!(typing.settled.try_next().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_input_returns_to_popular() {
    let (session, catalog, _store) = session_with(ScriptedCatalog::new());
    let mut typing = Typing::start();

    typing.type_text("dune").await;
    let query = typing.settled.next().await.unwrap();
    session.on_settled(&query).await;

    typing.clear();
    let query = typing.settled.next().await.unwrap();
    session.on_settled(&query).await;

    assert_eq!(query, "");
    assert_eq!(
        catalog.requests(),
        vec![CatalogEndpoint::for_query("dune"), CatalogEndpoint::Discover]
    );
}

#[tokio::test(start_paused = true)]
async fn test_retyping_settled_value_does_not_refetch() {
    let (session, catalog, _store) = session_with(ScriptedCatalog::new());
    let mut typing = Typing::start();

    typing.type_text("up").await;
    let query = typing.settled.next().await.unwrap();
    session.on_settled(&query).await;

    typing.input.set_value("u");
    sleep(KEYSTROKE).await;
    typing.input.set_value("up");
    sleep(QUIET * 2).await;

    assert!(typing.settled.try_next().is_none());
    assert_eq!(catalog.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_is_superseded() {
    let (session, _catalog, store) = session_with(
        ScriptedCatalog::new()
            .respond_after(
                "heat",
                Duration::from_secs(3),
                Ok(vec![movie(949, "Heat", Some("/heat.jpg"))]),
            )
            .respond("ronin", Ok(vec![movie(8195, "Ronin", Some("/ronin.jpg"))])),
    );
    let mut typing = Typing::start();

    typing.type_text("heat").await;
    let slow_query = typing.settled.next().await.unwrap();
    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.on_settled(&slow_query).await })
    };

    typing.clear();
    typing.type_text("ronin").await;
    let query = typing.settled.next().await.unwrap();
    let view = session.on_settled(&query).await.unwrap();
    assert_eq!(view.movies[0].title, "Ronin");

    assert!(slow.await.unwrap().is_none());
    let view = session.snapshot();
    assert_eq!(view.settled_query, "ronin");
    assert_eq!(view.movies[0].title, "Ronin");
    assert_eq!(view.state, FetchState::Success);
    // The superseded search still counts.
    assert_eq!(store.documents().len(), 2);
}

//! Local stand-ins for the catalog API and the document store.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch};
use marquee_core::MarqueeConfig;
use parking_lot::Mutex;
use serde_json::{Value, json};

pub const BEARER_TOKEN: &str = "integration-token";

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Canned catalog reply.
#[derive(Debug, Clone)]
pub enum CatalogReply {
    Json(Value),
    Status(u16),
}

#[derive(Debug, Default)]
struct CatalogState {
    // Keyed by decoded query; "" is the discover listing.
    replies: HashMap<String, CatalogReply>,
    requests: Vec<String>,
}

/// Fake movie catalog serving `/3/discover/movie` and `/3/search/movie`.
#[derive(Debug, Clone)]
pub struct FakeCatalog {
    state: Arc<Mutex<CatalogState>>,
    pub base_url: String,
}

impl FakeCatalog {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(CatalogState::default()));
        let router = Router::new()
            .route("/3/discover/movie", get(catalog_reply))
            .route("/3/search/movie", get(catalog_reply))
            .with_state(state.clone());

        let base_url = format!("{}/3", serve(router).await);
        Self { state, base_url }
    }

    pub fn reply(&self, query: &str, reply: CatalogReply) {
        self.state.lock().replies.insert(query.to_string(), reply);
    }

    /// Path and query of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }
}

async fn catalog_reply(
    State(state): State<Arc<Mutex<CatalogState>>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(format!("Bearer {BEARER_TOKEN}").as_str());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "status_message": "Invalid API key"})),
        )
            .into_response();
    }

    let path_and_query = uri.path_and_query().map(|pq| pq.to_string()).unwrap_or_default();
    let query = if uri.path().ends_with("/search/movie") {
        url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
            .find(|(key, _)| key == "query")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default()
    } else {
        String::new()
    };

    let mut state = state.lock();
    state.requests.push(path_and_query);
    match state.replies.get(&query).cloned() {
        Some(CatalogReply::Json(body)) => Json(body).into_response(),
        Some(CatalogReply::Status(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        None => Json(json!({"page": 1, "results": []})).into_response(),
    }
}

#[derive(Debug, Default)]
struct StoreState {
    documents: Vec<Value>,
    next_id: u64,
    failing: bool,
}

type SharedStore = Arc<Mutex<StoreState>>;

const DOCUMENTS_PATH: &str = "/v1/databases/movies/collections/metrics/documents";

/// Fake Appwrite collection honouring `equal`, `orderDesc` and `limit` queries.
#[derive(Debug, Clone)]
pub struct FakeDocumentStore {
    state: SharedStore,
    pub endpoint: String,
}

impl FakeDocumentStore {
    pub async fn start() -> Self {
        let state = SharedStore::default();
        let router = Router::new()
            .route(DOCUMENTS_PATH, get(list_documents).post(create_document))
            .route(&format!("{DOCUMENTS_PATH}/{{id}}"), patch(update_document))
            .with_state(state.clone());

        let endpoint = format!("{}/v1", serve(router).await);
        Self { state, endpoint }
    }

    pub fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    pub fn seed(&self, term: &str, count: u64) {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = format!("seed-{}", state.next_id);
        state.documents.push(json!({
            "$id": id,
            "searchTerm": term,
            "count": count,
            "poster_url": format!("https://image.tmdb.org/t/p/w500/{term}.jpg"),
            "movie_id": count
        }));
    }

    pub fn documents(&self) -> Vec<Value> {
        self.state.lock().documents.clone()
    }
}

fn unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"message": "service unavailable"})),
    )
        .into_response()
}

async fn list_documents(State(state): State<SharedStore>, RawQuery(raw): RawQuery) -> Response {
    let state = state.lock();
    if state.failing {
        return unavailable();
    }

    let raw = raw.unwrap_or_default();
    let queries: Vec<Value> = url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == "queries[]")
        .filter_map(|(_, value)| serde_json::from_str(&value).ok())
        .collect();

    let mut documents = state.documents.clone();
    for query in &queries {
        match query["method"].as_str() {
            Some("equal") => {
                let attribute = query["attribute"].as_str().unwrap_or_default();
                let values = query["values"].as_array().cloned().unwrap_or_default();
                documents.retain(|doc| values.contains(&doc[attribute]));
            }
            Some("orderDesc") => {
                let attribute = query["attribute"].as_str().unwrap_or_default().to_string();
                documents.sort_by(|a, b| {
                    b[&attribute]
                        .as_u64()
                        .unwrap_or_default()
                        .cmp(&a[&attribute].as_u64().unwrap_or_default())
                });
            }
            Some("limit") => {
                let limit = query["values"][0].as_u64().unwrap_or(25) as usize;
                documents.truncate(limit);
            }
            _ => {}
        }
    }

    Json(json!({"total": documents.len(), "documents": documents})).into_response()
}

async fn create_document(State(state): State<SharedStore>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock();
    if state.failing {
        return unavailable();
    }

    state.next_id += 1;
    let id = match body["documentId"].as_str() {
        Some("unique()") | None => format!("doc-{}", state.next_id),
        Some(id) => id.to_string(),
    };

    let mut document = body["data"].clone();
    document["$id"] = json!(id);
    state.documents.push(document.clone());
    (StatusCode::CREATED, Json(document)).into_response()
}

async fn update_document(
    State(state): State<SharedStore>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock();
    if state.failing {
        return unavailable();
    }

    let Some(document) = state.documents.iter_mut().find(|doc| doc["$id"] == id.as_str()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Some(fields) = body["data"].as_object() {
        for (key, value) in fields {
            document[key] = value.clone();
        }
    }
    Json(document.clone()).into_response()
}

/// Configuration pointing every client at the fakes.
pub fn config_for(catalog: &FakeCatalog, store: &FakeDocumentStore) -> MarqueeConfig {
    let mut config = MarqueeConfig::default();
    config.catalog.api_base_url = catalog.base_url.clone();
    config.catalog.bearer_token = BEARER_TOKEN.to_string();
    config.store.endpoint = store.endpoint.clone();
    config.store.project_id = "marquee".to_string();
    config.store.database_id = "movies".to_string();
    config.store.collection_id = "metrics".to_string();
    config
}

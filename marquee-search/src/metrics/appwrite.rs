//! Appwrite database REST client for search metrics.

use async_trait::async_trait;
use marquee_core::config::StoreConfig;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{NewSearchMetric, SearchMetric, SearchMetricStore};
use crate::errors::MetricStoreError;

/// Placeholder that asks Appwrite to generate a document identifier.
const UNIQUE_ID: &str = "unique()";

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<SearchMetric>,
}

/// Metric store backed by an Appwrite collection.
#[derive(Debug, Clone)]
pub struct AppwriteMetricStore {
    client: reqwest::Client,
    documents_url: String,
    project_id: String,
    api_key: String,
}

impl AppwriteMetricStore {
    /// Creates a store client for the configured database and collection.
    ///
    /// Every request is bounded by `config.request_timeout`.
    ///
    /// # Errors
    /// - `MetricStoreError::Request` - HTTP client could not be built
    pub fn new(config: &StoreConfig) -> Result<Self, MetricStoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MetricStoreError::Request {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&config.database_id),
            urlencoding::encode(&config.collection_id),
        );

        Ok(Self {
            client,
            documents_url,
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("X-Appwrite-Project", &self.project_id);

        if self.api_key.is_empty() {
            builder
        } else {
            builder.header("X-Appwrite-Key", &self.api_key)
        }
    }

    async fn list_documents(&self, queries: &[String]) -> Result<Vec<SearchMetric>, MetricStoreError> {
        let params: Vec<(&str, &str)> = queries.iter().map(|q| ("queries[]", q.as_str())).collect();

        let response = self
            .request(Method::GET, &self.documents_url)
            .query(&params)
            .send()
            .await
            .map_err(request_error)?;

        let list: DocumentList = read_json(response).await?;
        Ok(list.documents)
    }
}

fn request_error(error: reqwest::Error) -> MetricStoreError {
    MetricStoreError::Request {
        reason: error.to_string(),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, MetricStoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MetricStoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response.json().await.map_err(|e| MetricStoreError::Parse {
        reason: e.to_string(),
    })
}

fn equal_query(attribute: &str, value: &str) -> String {
    json!({"method": "equal", "attribute": attribute, "values": [value]}).to_string()
}

fn order_desc_query(attribute: &str) -> String {
    json!({"method": "orderDesc", "attribute": attribute}).to_string()
}

fn limit_query(limit: usize) -> String {
    json!({"method": "limit", "values": [limit]}).to_string()
}

#[async_trait]
impl SearchMetricStore for AppwriteMetricStore {
    async fn find_by_term(&self, term: &str) -> Result<Vec<SearchMetric>, MetricStoreError> {
        self.list_documents(&[equal_query("searchTerm", term)]).await
    }

    async fn create(&self, metric: NewSearchMetric) -> Result<SearchMetric, MetricStoreError> {
        let response = self
            .request(Method::POST, &self.documents_url)
            .json(&json!({"documentId": UNIQUE_ID, "data": metric}))
            .send()
            .await
            .map_err(request_error)?;

        read_json(response).await
    }

    async fn update_count(&self, id: &str, count: u64) -> Result<SearchMetric, MetricStoreError> {
        let url = format!("{}/{}", self.documents_url, urlencoding::encode(id));
        let response = self
            .request(Method::PATCH, &url)
            .json(&json!({"data": {"count": count}}))
            .send()
            .await
            .map_err(request_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(MetricStoreError::DocumentNotFound { id: id.to_string() });
        }
        read_json(response).await
    }

    async fn top_by_count(&self, limit: usize) -> Result<Vec<SearchMetric>, MetricStoreError> {
        self.list_documents(&[order_desc_query("count"), limit_query(limit)])
            .await
    }
}

//! Centralized configuration for Marquee.
//!
//! Built once at startup and handed to each component, so nothing below
//! the entry points reads the process environment.

use std::time::Duration;

use url::Url;

use crate::{MarqueeError, Result};

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub catalog: CatalogConfig,
    pub store: StoreConfig,
    pub discovery: DiscoveryConfig,
    pub web: WebConfig,
}

/// Movie catalog API settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API
    pub api_base_url: String,
    /// Base URL poster path fragments are appended to
    pub image_base_url: String,
    /// Bearer token sent with every catalog request
    pub bearer_token: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            bearer_token: String::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Document store settings for search metrics.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// REST endpoint of the document store
    pub endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub collection_id: String,
    /// HTTP request timeout; bounds how long one metric write can hang
    pub request_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            api_key: String::new(),
            database_id: String::new(),
            collection_id: String::new(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Search flow tuning.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Quiet period before raw input settles into a query
    pub debounce_quiet_period: Duration,
    /// Number of most-searched terms shown as trending
    pub trending_limit: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            debounce_quiet_period: Duration::from_millis(500),
            trending_limit: 5,
        }
    }
}

/// Web UI bind settings.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl MarqueeConfig {
    /// Builds configuration from process environment variables.
    ///
    /// # Errors
    /// - `MarqueeError::Configuration` - A variable is present but malformed
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults. Empty values count as unset.
    ///
    /// # Errors
    /// - `MarqueeError::Configuration` - A value is present but malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(token) = read("TMDB_API_KEY") {
            config.catalog.bearer_token = token;
        }
        if let Some(base) = read("TMDB_API_BASE_URL") {
            config.catalog.api_base_url = parse_base_url("TMDB_API_BASE_URL", &base)?;
        }
        if let Some(base) = read("TMDB_IMAGE_BASE_URL") {
            config.catalog.image_base_url = parse_base_url("TMDB_IMAGE_BASE_URL", &base)?;
        }

        if let Some(endpoint) = read("APPWRITE_ENDPOINT") {
            config.store.endpoint = parse_base_url("APPWRITE_ENDPOINT", &endpoint)?;
        }
        if let Some(project_id) = read("APPWRITE_PROJECT_ID") {
            config.store.project_id = project_id;
        }
        if let Some(api_key) = read("APPWRITE_API_KEY") {
            config.store.api_key = api_key;
        }
        if let Some(database_id) = read("APPWRITE_DATABASE_ID") {
            config.store.database_id = database_id;
        }
        if let Some(collection_id) = read("APPWRITE_COLLECTION_ID") {
            config.store.collection_id = collection_id;
        }

        if let Some(millis) = read("MARQUEE_DEBOUNCE_MS") {
            let millis = parse_number("MARQUEE_DEBOUNCE_MS", &millis)?;
            config.discovery.debounce_quiet_period = Duration::from_millis(millis);
        }
        if let Some(limit) = read("MARQUEE_TRENDING_LIMIT") {
            config.discovery.trending_limit = parse_number("MARQUEE_TRENDING_LIMIT", &limit)? as usize;
        }

        Ok(config)
    }

    /// Lists credentials and identifiers that are still unset.
    ///
    /// Missing settings do not stop startup; requests that depend on them
    /// fail at call time instead.
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.catalog.bearer_token.is_empty() {
            missing.push("TMDB_API_KEY");
        }
        if self.store.project_id.is_empty() {
            missing.push("APPWRITE_PROJECT_ID");
        }
        if self.store.database_id.is_empty() {
            missing.push("APPWRITE_DATABASE_ID");
        }
        if self.store.collection_id.is_empty() {
            missing.push("APPWRITE_COLLECTION_ID");
        }
        missing
    }
}

fn parse_base_url(key: &str, value: &str) -> Result<String> {
    Url::parse(value).map_err(|e| MarqueeError::Configuration {
        reason: format!("{key} is not a valid URL: {e}"),
    })?;

    Ok(value.trim_end_matches('/').to_string())
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| MarqueeError::Configuration {
        reason: format!("{key} must be a non-negative integer, got '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_hosted_services() {
        let config = MarqueeConfig::default();

        assert_eq!(config.catalog.api_base_url, "https://api.themoviedb.org/3");
        assert_eq!(
            config.catalog.image_base_url,
            "https://image.tmdb.org/t/p/w500"
        );
        assert_eq!(
            config.discovery.debounce_quiet_period,
            Duration::from_millis(500)
        );
        assert_eq!(config.discovery.trending_limit, 5);
        assert_eq!(config.store.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[
            ("TMDB_API_KEY", "token-123"),
            ("TMDB_API_BASE_URL", "http://127.0.0.1:9000/3/"),
            ("APPWRITE_DATABASE_ID", "movies-db"),
            ("APPWRITE_COLLECTION_ID", "metrics"),
            ("APPWRITE_PROJECT_ID", "marquee"),
            ("MARQUEE_DEBOUNCE_MS", "250"),
            ("MARQUEE_TRENDING_LIMIT", "3"),
        ]))
        .unwrap();

        assert_eq!(config.catalog.bearer_token, "token-123");
        assert_eq!(config.catalog.api_base_url, "http://127.0.0.1:9000/3");
        assert_eq!(config.store.database_id, "movies-db");
        assert_eq!(config.store.collection_id, "metrics");
        assert_eq!(
            config.discovery.debounce_quiet_period,
            Duration::from_millis(250)
        );
        assert_eq!(config.discovery.trending_limit, 3);
        assert!(config.missing_settings().is_empty());
    }

    #[test]
    fn test_missing_credentials_are_reported_not_rejected() {
        let config = MarqueeConfig::from_lookup(|_| None).unwrap();

        assert_eq!(
            config.missing_settings(),
            vec![
                "TMDB_API_KEY",
                "APPWRITE_PROJECT_ID",
                "APPWRITE_DATABASE_ID",
                "APPWRITE_COLLECTION_ID"
            ]
        );
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = MarqueeConfig::from_lookup(lookup_from(&[("TMDB_API_KEY", "   ")])).unwrap();
        assert!(config.catalog.bearer_token.is_empty());
    }

    #[test]
    fn test_malformed_debounce_is_rejected() {
        let result = MarqueeConfig::from_lookup(lookup_from(&[("MARQUEE_DEBOUNCE_MS", "soon")]));

        assert!(matches!(
            result,
            Err(MarqueeError::Configuration { reason }) if reason.contains("MARQUEE_DEBOUNCE_MS")
        ));
    }

    #[test]
    fn test_malformed_endpoint_is_rejected() {
        let result =
            MarqueeConfig::from_lookup(lookup_from(&[("APPWRITE_ENDPOINT", "not a url")]));
        assert!(result.is_err());
    }
}

//! Movie records as returned by the catalog API.

use serde::{Deserialize, Serialize};

/// A movie entry from a catalog listing.
///
/// Replaced wholesale on each successful fetch; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Catalog identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Poster path fragment, e.g. `/abc.jpg`
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Release date as `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average user rating out of 10
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// ISO 639-1 language code
    #[serde(default)]
    pub original_language: Option<String>,
}

impl Movie {
    /// Full poster URL, if the movie has a poster.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| poster_url(image_base_url, path))
    }

    /// Four-digit release year, if known.
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }
}

/// Joins an image base URL and a poster path fragment with a single slash.
///
/// Catalog paths start with `/`, so `w500/` + `/a.jpg` becomes `w500/a.jpg`
/// rather than `w500//a.jpg`. An empty path yields the base followed by `/`.
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!(
        "{}/{}",
        image_base_url.trim_end_matches('/'),
        poster_path.trim_start_matches('/')
    )
}

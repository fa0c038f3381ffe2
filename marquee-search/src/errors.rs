//! Error types for catalog and document store access.

use thiserror::Error;

/// Errors that can occur while fetching movies from the catalog API.
///
/// The `Display` text is what the UI shows the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The catalog answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Http {
        /// HTTP status code returned by the catalog
        status: u16,
    },

    /// The request never produced a response.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// A 2xx payload flagged itself as failed.
    #[error("{message}")]
    Api {
        /// Message embedded in the payload, or a generic fallback
        message: String,
    },
}

/// Errors from the search metric document store.
///
/// These never reach the user; callers log them and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricStoreError {
    /// Request could not be sent or the connection failed.
    #[error("Document store request failed: {reason}")]
    Request {
        /// The reason for the failure
        reason: String,
    },

    /// The store answered with a non-2xx status.
    #[error("Document store returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// The store response could not be decoded.
    #[error("Document store response could not be parsed: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// Update targeted a document that does not exist.
    #[error("Document {id} not found")]
    DocumentNotFound {
        /// Identifier of the missing document
        id: String,
    },
}

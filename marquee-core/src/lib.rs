//! Marquee Core - configuration, tracing and search input plumbing
//!
//! This crate provides the pieces every Marquee frontend shares: the
//! startup configuration, tracing setup, the controlled search input model
//! and the debounced query controller that turns keystrokes into settled
//! queries.

pub mod config;
pub mod debounce;
pub mod input;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::MarqueeConfig;
pub use debounce::{DebouncerHandle, SettledQueries, spawn_debouncer};
pub use input::SearchInput;

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Search input closed")]
    InputClosed,
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Configuration { reason } => format!("Invalid configuration: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
            MarqueeError::InputClosed => "Search input is no longer accepting changes".to_string(),
        }
    }

    /// Checks if this error is due to user-supplied settings.
    pub fn is_user_error(&self) -> bool {
        matches!(self, MarqueeError::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_user_error() {
        let error = MarqueeError::Configuration {
            reason: "MARQUEE_DEBOUNCE_MS must be a number".to_string(),
        };

        assert!(error.is_user_error());
        assert_eq!(
            error.user_message(),
            "Invalid configuration: MARQUEE_DEBOUNCE_MS must be a number"
        );
    }

    #[test]
    fn test_input_closed_is_not_user_error() {
        assert!(!MarqueeError::InputClosed.is_user_error());
    }
}

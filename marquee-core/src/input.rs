//! Controlled search input model.

use std::fmt;

/// Text field bound to a caller-owned value.
///
/// Holds the current raw text and forwards every change to the setter it
/// was built with. No trimming, validation or debouncing happens here.
pub struct SearchInput {
    value: String,
    on_change: Box<dyn FnMut(&str) + Send>,
}

impl SearchInput {
    /// Placeholder text shown while the field is empty.
    pub const PLACEHOLDER: &'static str = "Search through thousands of movies";

    /// Creates an input bound to `value` that reports changes to `on_change`.
    pub fn new<F>(value: impl Into<String>, on_change: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        Self {
            value: value.into(),
            on_change: Box::new(on_change),
        }
    }

    /// Current raw text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Applies a change event and notifies the setter.
    pub fn set_value(&mut self, raw: impl Into<String>) {
        self.value = raw.into();
        (self.on_change)(&self.value);
    }
}

impl fmt::Debug for SearchInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchInput")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

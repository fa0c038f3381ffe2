//! Search input component

use std::time::Duration;

use marquee_core::SearchInput;

use super::escape_html;

/// Renders the search field bound to `value`.
///
/// Every keystroke is a change event; htmx holds the request back until
/// typing has paused for `quiet_period`, and `hx-sync` drops a request
/// that is still in flight when a newer one starts.
pub fn search_input(value: &str, quiet_period: Duration) -> String {
    let delay_ms = quiet_period.as_millis();
    let value = escape_html(value);
    let placeholder = SearchInput::PLACEHOLDER;

    format!(
        r##"<div class="relative">
            <span class="absolute inset-y-0 left-4 flex items-center text-marquee-400" aria-hidden="true">&#128269;</span>
            <input type="search" name="query" value="{value}" placeholder="{placeholder}"
                   autocomplete="off"
                   class="w-full pl-12 pr-4 py-3 bg-gray-800/60 border border-gray-700 rounded-lg text-white placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-marquee-500"
                   hx-get="/htmx/movies"
                   hx-trigger="input changed delay:{delay_ms}ms"
                   hx-target="#movie-results"
                   hx-sync="this:replace"
                   hx-indicator="#movie-spinner" />
        </div>"##
    )
}

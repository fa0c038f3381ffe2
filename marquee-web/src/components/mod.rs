//! Reusable HTML components for HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments used in full pages or
//! as HTMX partial updates.

pub mod layout;
pub mod movie;
pub mod search;
pub mod trending;

// Re-export main component functions
pub use layout::render_page;
pub use movie::{error_message, movie_card, movie_grid, spinner};
pub use search::search_input;
pub use trending::trending_section;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! HTMX partial update handlers
//!
//! Server-rendered HTML fragments swapped into the discovery page.

pub mod movies;

// Re-export main HTMX handlers
pub use movies::{SearchParams, movie_results, trending_list};

//! JSON API handlers

pub mod api;

pub use api::{api_movies, api_trending};

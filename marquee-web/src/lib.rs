//! Marquee Web - browser UI for movie discovery

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server-rendered HTMX + Tailwind pages. The search box asks the server
//! for a fresh movie grid once typing pauses; trending searches are loaded
//! once per page mount. JSON endpoints expose the same data to other clients.

pub mod components;
pub mod handlers;
pub mod htmx;
pub mod pages;
pub mod server;

// Re-export main types
pub use server::{AppState, build_router, run_server};

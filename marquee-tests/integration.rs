//! Integration tests for Marquee
//!
//! Run the real catalog and document store clients against local fake
//! services, and drive the web UI over HTTP.

#[path = "integration/fake_services.rs"]
mod fake_services;

#[path = "integration/discovery_flow.rs"]
mod discovery_flow;
#[path = "integration/metric_persistence.rs"]
mod metric_persistence;
#[path = "integration/typing_flow.rs"]
mod typing_flow;
#[path = "integration/web_server.rs"]
mod web_server;

//! HTTP front for the bookshelf store.
//!
//! Maps HTTP requests onto [`BookStore`](bookshelf_core::store::BookStore) operations and
//! their results onto `{status, message, data}` JSON responses. Uses axum for routing.
//! Also holds the server's configuration loading and log setup.

pub mod config;
pub mod error;
pub mod messages;
pub mod response;
pub mod routes;
pub mod telemetry;

pub use routes::{router, serve};

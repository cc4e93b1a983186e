//! Bookshelf HTTP server.
//!
//! Loads configuration, installs logging, and serves an in-memory book store until Ctrl-C.

use tracing::info;

use bookshelf_core::{backend::BookBackendBuilder, store::BookStore};
use bookshelf_http::{config::AppConfig, error::AppResult, serve, telemetry};
use bookshelf_memory::InMemoryBackend;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::load()?;

    telemetry::install(&config.tracing)?;

    info!(
        "Starting {} v{}",
        config.distribution.name,
        config.distribution.version.as_deref().unwrap_or("unknown"),
    );

    let backend = InMemoryBackend::builder().build().await?;
    let store = BookStore::builder(backend)
        .with_options(config.store.options())
        .build();

    serve(store, config.server.address).await
}

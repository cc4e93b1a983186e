//! Main bookshelf crate providing an in-memory book catalogue.
//!
//! This crate is the primary entry point for users of bookshelf. It re-exports the
//! core types from `bookshelf-core`, the in-memory backend, and (with the `http`
//! feature, on by default) the HTTP transport.
//!
//! # Features
//!
//! - **Validated records** - Payloads are checked before anything is stored
//! - **Ordered collection** - Listing returns books in insertion order
//! - **Listing filters** - Case-insensitive name match plus `reading`/`finished` flags
//! - **Injectable services** - Swap the clock and id generator for deterministic tests
//!
//! # Quick Start
//!
//! ```ignore
//! use bookshelf::{prelude::*, memory::InMemoryBackend};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = BookStore::new(InMemoryBackend::builder().build().await.unwrap());
//!
//!     let id = store
//!         .add(BookInput::named("Dune").pages(412, 412).publisher("Chilton"))
//!         .await
//!         .unwrap();
//!
//!     let book = store.get(&id).await.unwrap();
//!     assert!(book.finished);
//!
//!     let finished = store
//!         .list(ListFilter::new().finished(true))
//!         .await
//!         .unwrap();
//!     println!("Finished books: {:?}", finished);
//! }
//! ```
//!
//! # Serving over HTTP
//!
//! ```ignore
//! use bookshelf::{prelude::*, memory::InMemoryBackend};
//!
//! let store = BookStore::new(InMemoryBackend::new());
//! bookshelf::http::serve(store, "127.0.0.1:9000".parse()?).await?;
//! ```

pub mod prelude;

pub use bookshelf_core::{backend, book, clock, error, id, outcome, query, store};

/// In-memory storage backend implementations.
pub mod memory {
    pub use bookshelf_memory::{InMemoryBackend, InMemoryBackendBuilder};
}

/// HTTP transport.
///
/// This module is only available when the `http` feature is enabled.
#[cfg(feature = "http")]
pub mod http {
    pub use bookshelf_http::{config::AppConfig, error::AppError, router, serve};
}

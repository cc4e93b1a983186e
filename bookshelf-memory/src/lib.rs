//! In-memory book storage backend for bookshelf.
//!
//! This crate provides a thread-safe, in-memory implementation of the `BookBackend` trait.
//! It uses an async-aware read-write lock for concurrent access. Nothing survives the
//! process; the collection starts empty every time.
//!
//! # Features
//!
//! - **Thread-safe access** - Concurrent reads, exclusive writes
//! - **Insertion order** - Listing returns books in the order they were added
//! - **Filter support** - Evaluates listing filters through the `QueryVisitor` trait
//!
//! # Quick Start
//!
//! ```ignore
//! use bookshelf::{prelude::*, memory::InMemoryBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = InMemoryBackend::builder().build().await?;
//!     let store = BookStore::new(backend);
//!
//!     let id = store.add(BookInput::named("Dune").pages(412, 0)).await?;
//!     println!("{:?}", store.get(&id).await?);
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookshelf_memory;

pub mod evaluator;
pub mod store;

pub use store::{InMemoryBackend, InMemoryBackendBuilder};

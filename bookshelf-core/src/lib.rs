//! Core types for an in-memory book catalogue.
//!
//! This crate is the core of the bookshelf project and provides:
//!
//! - **Book records** ([`book`]) - The stored record, its summary view and the validated payloads
//! - **Book store** ([`store`]) - The create/list/get/update/delete operations and their rules
//! - **Storage backend abstraction** ([`backend`]) - The trait a collection implementation provides
//! - **Listing filters** ([`query`]) - Filter expressions and query-string coercion
//! - **Injected services** ([`clock`], [`id`]) - Time and identifier sources
//! - **Error handling** ([`error`], [`outcome`]) - Error types and their outcome classes
//!
//! # Example
//!
//! ```ignore
//! use bookshelf::{prelude::*, memory::InMemoryBackend};
//!
//! let store = BookStore::new(InMemoryBackend::new());
//! let id = store
//!     .add(BookInput::named("Dune").pages(412, 100).publisher("Chilton"))
//!     .await?;
//!
//! let books = store.list(ListFilter::new().name("dune")).await?;
//! assert_eq!(books[0].id, id);
//! ```

#[allow(unused_extern_crates)]
extern crate self as bookshelf_core;

pub mod backend;
pub mod book;
pub mod clock;
pub mod error;
pub mod id;
pub mod outcome;
pub mod query;
pub mod store;

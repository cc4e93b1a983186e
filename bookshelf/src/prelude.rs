//! Convenient re-exports of commonly used types from bookshelf.
//!
//! ```ignore
//! use bookshelf::prelude::*;
//! ```

pub use bookshelf_core::{
    backend::{BookBackend, BookBackendBuilder},
    book::{Book, BookInput, BookSummary},
    clock::{Clock, FixedClock, SystemClock},
    error::{BookStoreError, BookStoreResult, ValidationError},
    id::{IdGenerator, SequentialIds, UuidGenerator},
    outcome::OutcomeKind,
    query::{BookQuery, Expr, Filter, ListFilter, ListParams},
    store::{BookStore, BookStoreBuilder, StoreOptions},
};

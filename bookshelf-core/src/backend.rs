//! Storage backend abstraction for the book store.
//!
//! [`BookStore`](crate::store::BookStore) holds all of the validation and derived-field
//! rules; a [`BookBackend`] only keeps the records. It must keep them in insertion order
//! and make every call appear atomic to concurrent callers.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    book::{Book, BookChanges},
    error::BookStoreResult,
    query::BookQuery,
};

/// Abstract interface for book storage backends.
///
/// # Thread Safety
///
/// All implementations must be thread-safe and support concurrent access from multiple
/// async tasks. A write (insert, update, delete) must never be observed half-applied by
/// a concurrent read.
///
/// # Error Handling
///
/// Methods that target a single id return
/// [`BookStoreError::NotFound`](crate::error::BookStoreError::NotFound) when that id is
/// absent, except [`get_book`](BookBackend::get_book) which returns `Ok(None)`.
#[async_trait]
pub trait BookBackend: Send + Sync + Debug {
    /// Appends a book at the end of the collection.
    ///
    /// Returns [`BookStoreError::DuplicateId`](crate::error::BookStoreError::DuplicateId)
    /// if a book with the same id is already stored; the collection is left unchanged.
    async fn insert_book(&self, book: Book) -> BookStoreResult<()>;

    /// Applies `changes` to the book with the given id in place.
    async fn update_book(&self, id: &str, changes: BookChanges) -> BookStoreResult<()>;

    /// Removes the book with the given id, keeping the order of the rest.
    async fn delete_book(&self, id: &str) -> BookStoreResult<()>;

    /// Returns a copy of the book with the given id, if any.
    async fn get_book(&self, id: &str) -> BookStoreResult<Option<Book>>;

    /// Returns whether a book with the given id is stored.
    async fn contains_book(&self, id: &str) -> BookStoreResult<bool>;

    /// Returns copies of the books matching `query`, in insertion order.
    async fn query_books(&self, query: BookQuery) -> BookStoreResult<Vec<Book>>;

    /// Returns the number of stored books.
    async fn count_books(&self) -> BookStoreResult<usize>;
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait BookBackendBuilder {
    type Backend: BookBackend;

    async fn build(self) -> BookStoreResult<Self::Backend>;
}

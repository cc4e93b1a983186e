//! In-memory storage implementation for the book store.
//!
//! Books are kept in a `Vec` in insertion order behind a single async-aware read-write
//! lock. Writes hold the lock for the whole mutation; reads clone what they return.

use std::sync::Arc;

use async_trait::async_trait;
use mea::rwlock::RwLock;

use bookshelf_core::{
    backend::{BookBackend, BookBackendBuilder},
    book::{Book, BookChanges},
    error::{BookStoreError, BookStoreResult},
    query::BookQuery,
};

use crate::evaluator::BookEvaluator;

/// Thread-safe in-memory book storage backend.
///
/// # Thread Safety
///
/// `InMemoryBackend` is cloneable and uses an `Arc`-wrapped internal state, allowing
/// it to be safely shared across async tasks. Multiple clones of the same instance
/// share the same underlying books.
///
/// # Performance
///
/// Every lookup is a linear scan. That is the whole indexing story.
///
/// # Example
///
/// ```ignore
/// use bookshelf_memory::InMemoryBackend;
/// use bookshelf_core::backend::BookBackend;
///
/// let backend = InMemoryBackend::new();
/// backend.insert_book(book).await?;
/// assert_eq!(backend.count_books().await?, 1);
/// ```
#[derive(Default, Clone, Debug)]
pub struct InMemoryBackend {
    books: Arc<RwLock<Vec<Book>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            books: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn builder() -> InMemoryBackendBuilder {
        InMemoryBackendBuilder::default()
    }
}

fn position(books: &[Book], id: &str) -> Option<usize> {
    books.iter().position(|book| book.id == id)
}

#[async_trait]
impl BookBackend for InMemoryBackend {
    async fn insert_book(&self, book: Book) -> BookStoreResult<()> {
        let mut books = self.books.write().await;

        if position(&books, &book.id).is_some() {
            return Err(BookStoreError::DuplicateId(book.id));
        }

        books.push(book);

        Ok(())
    }

    async fn update_book(&self, id: &str, changes: BookChanges) -> BookStoreResult<()> {
        let mut books = self.books.write().await;

        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                book.apply(changes);
                Ok(())
            }
            None => Err(BookStoreError::NotFound(id.to_string())),
        }
    }

    async fn delete_book(&self, id: &str) -> BookStoreResult<()> {
        let mut books = self.books.write().await;

        match position(&books, id) {
            Some(index) => {
                // `remove` shifts the tail, so the remaining order is preserved
                books.remove(index);
                Ok(())
            }
            None => Err(BookStoreError::NotFound(id.to_string())),
        }
    }

    async fn get_book(&self, id: &str) -> BookStoreResult<Option<Book>> {
        let books = self.books.read().await;

        Ok(books.iter().find(|book| book.id == id).cloned())
    }

    async fn contains_book(&self, id: &str) -> BookStoreResult<bool> {
        Ok(position(&self.books.read().await, id).is_some())
    }

    async fn query_books(&self, query: BookQuery) -> BookStoreResult<Vec<Book>> {
        let books = self.books.read().await;

        match &query.filter {
            Some(filter) => BookEvaluator::filter_books(books.iter(), filter),
            None => Ok(books.clone()),
        }
    }

    async fn count_books(&self) -> BookStoreResult<usize> {
        Ok(self.books.read().await.len())
    }
}

/// Builder for constructing [`InMemoryBackend`] instances.
#[derive(Default)]
pub struct InMemoryBackendBuilder;

#[async_trait]
impl BookBackendBuilder for InMemoryBackendBuilder {
    type Backend = InMemoryBackend;

    /// Builds and returns a new, empty [`InMemoryBackend`]. This always succeeds.
    async fn build(self) -> BookStoreResult<Self::Backend> {
        Ok(InMemoryBackend::new())
    }
}

//! The book store: validation, derived fields and the five catalogue operations.
//!
//! [`BookStore`] wraps a [`BookBackend`] together with the two services it depends on, an
//! [`IdGenerator`] and a [`Clock`]. It returns structured results; mapping them onto a
//! transport (status codes, message text) is the caller's job.
//!
//! # Example
//!
//! ```ignore
//! use bookshelf::{prelude::*, memory::InMemoryBackend};
//!
//! let store = BookStore::new(InMemoryBackend::new());
//! let id = store.add(BookInput::named("Dune").pages(412, 412)).await?;
//! assert!(store.get(&id).await?.finished);
//! ```

use std::sync::Arc;

use tracing::{debug, error};

use crate::{
    backend::BookBackend,
    book::{Book, BookChanges, BookInput, BookSummary},
    clock::{Clock, SystemClock},
    error::{BookStoreError, BookStoreResult},
    id::{IdGenerator, UuidGenerator},
    query::ListFilter,
};

/// Behaviour switches for a [`BookStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Recompute `finished` on update. Off by default: an update leaves `finished` at the
    /// value it got when the book was created.
    pub refresh_finished_on_update: bool,
}

/// A catalogue of books over a storage backend.
///
/// Cloning is cheap when the backend is; clones share the same collection.
#[derive(Debug, Clone)]
pub struct BookStore<B: BookBackend> {
    backend: B,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    options: StoreOptions,
}

impl<B: BookBackend> BookStore<B> {
    /// Creates a store with random UUID ids, the system clock and default options.
    pub fn new(backend: B) -> Self {
        Self::builder(backend).build()
    }

    pub fn builder(backend: B) -> BookStoreBuilder<B> {
        BookStoreBuilder::new(backend)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Validates `input`, stores a new book and returns its id.
    ///
    /// # Errors
    ///
    /// - [`BookStoreError::Validation`] if the payload is rejected; nothing is stored.
    /// - [`BookStoreError::DuplicateId`] if the id generator repeated itself.
    /// - [`BookStoreError::InsertFailed`] if the book cannot be found right after insert.
    pub async fn add(&self, input: BookInput) -> BookStoreResult<String> {
        let details = input.validate().inspect_err(|err| {
            debug!(error = %err, "rejected new book");
        })?;

        let id = self.ids.next_id();
        let book = Book::new(id.clone(), details, self.clock.timestamp());

        self.backend.insert_book(book).await?;

        if !self.backend.contains_book(&id).await? {
            error!(book_id = %id, "book missing right after insert");
            return Err(BookStoreError::InsertFailed(id));
        }

        debug!(book_id = %id, "added book");
        Ok(id)
    }

    /// Lists the summary view of every book matching `filter`, in insertion order.
    pub async fn list(&self, filter: ListFilter) -> BookStoreResult<Vec<BookSummary>> {
        let books = self.backend.query_books(filter.into_query()).await?;

        Ok(books.iter().map(Book::summary).collect())
    }

    /// Returns a copy of the book with the given id.
    ///
    /// # Errors
    ///
    /// [`BookStoreError::NotFound`] if no book has that id.
    pub async fn get(&self, id: &str) -> BookStoreResult<Book> {
        self.backend
            .get_book(id)
            .await?
            .ok_or_else(|| BookStoreError::NotFound(id.to_string()))
    }

    /// Replaces the client-controlled fields of the book with the given id.
    ///
    /// The payload is validated before the book is looked up, so an invalid payload for an
    /// unknown id reports the validation error.
    ///
    /// # Errors
    ///
    /// - [`BookStoreError::Validation`] if the payload is rejected.
    /// - [`BookStoreError::NotFound`] if no book has that id.
    pub async fn update(&self, id: &str, input: BookInput) -> BookStoreResult<()> {
        let details = input.validate().inspect_err(|err| {
            debug!(book_id = %id, error = %err, "rejected book update");
        })?;

        let changes = BookChanges {
            details,
            updated_at: self.clock.timestamp(),
            refresh_finished: self.options.refresh_finished_on_update,
        };

        self.backend.update_book(id, changes).await?;

        debug!(book_id = %id, "updated book");
        Ok(())
    }

    /// Removes the book with the given id.
    ///
    /// # Errors
    ///
    /// [`BookStoreError::NotFound`] if no book has that id.
    pub async fn delete(&self, id: &str) -> BookStoreResult<()> {
        self.backend.delete_book(id).await?;

        debug!(book_id = %id, "deleted book");
        Ok(())
    }

    /// Returns the number of stored books.
    pub async fn count(&self) -> BookStoreResult<usize> {
        self.backend.count_books().await
    }
}

/// Builder for [`BookStore`] instances with non-default services or options.
///
/// ```ignore
/// let store = BookStore::builder(InMemoryBackend::new())
///     .with_id_generator(SequentialIds::default())
///     .with_clock(FixedClock::default())
///     .build();
/// ```
#[derive(Debug)]
pub struct BookStoreBuilder<B: BookBackend> {
    backend: B,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    options: StoreOptions,
}

impl<B: BookBackend> BookStoreBuilder<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
            options: StoreOptions::default(),
        }
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// Uses a shared clock, so the caller can keep a handle and move it.
    pub fn with_shared_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        self.with_shared_clock(Arc::new(clock))
    }

    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> BookStore<B> {
        BookStore {
            backend: self.backend,
            ids: self.ids,
            clock: self.clock,
            options: self.options,
        }
    }
}

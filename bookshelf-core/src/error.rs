//! Error types and result types for book store operations.
//!
//! Use [`BookStoreResult<T>`] as the return type for fallible operations. Every error
//! knows which [`OutcomeKind`] it belongs to and which HTTP-style status code a
//! transport should report for it; the message text is left to the transport.

use serde_json::Number;
use thiserror::Error;

use crate::outcome::OutcomeKind;

/// A client-supplied book payload that violates a precondition.
///
/// Validation always runs before any mutation, so a payload rejected with one of
/// these variants never changes the collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload carried no `name` field (or an explicit `null`).
    #[error("name is required")]
    MissingName,
    /// The payload carried no `pageCount` field.
    #[error("pageCount is required")]
    MissingPageCount,
    /// The payload carried no `readPage` field.
    #[error("readPage is required")]
    MissingReadPage,
    /// `readPage` is larger than `pageCount`.
    #[error("readPage ({read_page}) must not be greater than pageCount ({page_count})")]
    ReadPageExceedsPageCount {
        /// The offending `readPage` value.
        read_page: Number,
        /// The `pageCount` it was compared against.
        page_count: Number,
    },
}

/// Represents all possible errors that can occur when interacting with a book store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookStoreError {
    /// The payload was rejected before touching the collection.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// No book with the given ID exists.
    #[error("Book not found: {0}")]
    NotFound(String),
    /// A book with the given ID is already stored.
    #[error("Book {0} already exists")]
    DuplicateId(String),
    /// The book was appended but could not be read back afterwards.
    #[error("Book {0} was not present after insert")]
    InsertFailed(String),
}

/// A specialized `Result` type for book store operations.
pub type BookStoreResult<T> = Result<T, BookStoreError>;

impl BookStoreError {
    /// Whether the client (`Fail`) or the server (`Error`) caused this error.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            BookStoreError::Validation(_) | BookStoreError::NotFound(_) => OutcomeKind::Fail,
            BookStoreError::DuplicateId(_) | BookStoreError::InsertFailed(_) => {
                OutcomeKind::Error
            }
        }
    }

    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            BookStoreError::Validation(_) => 400,
            BookStoreError::NotFound(_) => 404,
            BookStoreError::DuplicateId(_) | BookStoreError::InsertFailed(_) => 500,
        }
    }

    /// Returns the validation error if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            BookStoreError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

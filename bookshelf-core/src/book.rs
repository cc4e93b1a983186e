//! Book records and the payloads that create or replace them.
//!
//! A [`Book`] is only ever built from a [`BookDetails`], which in turn is only obtainable by
//! validating a client [`BookInput`]. This keeps the `readPage <= pageCount` invariant and
//! the required-field rules in one place for both create and update.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::ValidationError;

/// A stored book record.
///
/// Serialized with camelCase field names, matching the wire format of the HTTP layer.
///
/// # Example
///
/// ```ignore
/// let book = store.get(&id).await?;
/// assert!(book.finished);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, generated by the store.
    pub id: String,
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Number,
    pub read_page: Number,
    /// Derived: `read_page == page_count` when the book was created.
    pub finished: bool,
    /// Whatever the client sent. Only a JSON boolean matches a `reading` filter.
    pub reading: Option<Value>,
    /// ISO-8601 creation timestamp, never changed afterwards.
    pub inserted_at: String,
    /// ISO-8601 timestamp of the last successful write.
    pub updated_at: String,
}

impl Book {
    /// Builds a new record from validated details.
    ///
    /// Both timestamps are set to `timestamp` and `finished` is derived from the counts.
    pub fn new(id: String, details: BookDetails, timestamp: String) -> Self {
        let finished = details.is_finished();

        Self {
            id,
            name: details.name,
            year: details.year,
            author: details.author,
            summary: details.summary,
            publisher: details.publisher,
            page_count: details.page_count,
            read_page: details.read_page,
            finished,
            reading: details.reading,
            inserted_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }

    /// Replaces every client-controlled field and refreshes `updated_at`.
    ///
    /// `id` and `inserted_at` are left untouched. `finished` is only recomputed when
    /// `changes.refresh_finished` is set.
    pub fn apply(&mut self, changes: BookChanges) {
        let BookChanges {
            details,
            updated_at,
            refresh_finished,
        } = changes;

        if refresh_finished {
            self.finished = details.is_finished();
        }

        self.name = details.name;
        self.year = details.year;
        self.author = details.author;
        self.summary = details.summary;
        self.publisher = details.publisher;
        self.page_count = details.page_count;
        self.read_page = details.read_page;
        self.reading = details.reading;
        self.updated_at = updated_at;
    }

    /// Projects this record to the listing view.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// The reduced `{id, name, publisher}` view returned by listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        book.summary()
    }
}

/// A create or update payload exactly as the client sent it.
///
/// Every field is optional here; [`BookInput::validate`] decides which ones are required.
/// A JSON `null` and a missing key are indistinguishable once deserialized.
///
/// The page counters take any JSON number, including negative and fractional ones, and
/// are compared numerically. `reading` takes any JSON value and is kept as sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: Option<Number>,
    pub read_page: Option<Number>,
    pub reading: Option<Value>,
}

impl BookInput {
    /// Starts a payload with the given name; handy for tests and programmatic callers.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets both page counters.
    pub fn pages(mut self, page_count: u32, read_page: u32) -> Self {
        self.page_count = Some(page_count.into());
        self.read_page = Some(read_page.into());
        self
    }

    pub fn publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn reading(mut self, reading: bool) -> Self {
        self.reading = Some(Value::Bool(reading));
        self
    }

    /// Checks the required fields and the page invariant.
    ///
    /// The checks run in a fixed order: name, page counters, then `readPage <= pageCount`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] the payload trips.
    pub fn validate(self) -> Result<BookDetails, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingName)?;
        let page_count = self.page_count.ok_or(ValidationError::MissingPageCount)?;
        let read_page = self.read_page.ok_or(ValidationError::MissingReadPage)?;

        if numeric(&read_page) > numeric(&page_count) {
            return Err(ValidationError::ReadPageExceedsPageCount {
                read_page,
                page_count,
            });
        }

        Ok(BookDetails {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count,
            read_page,
            reading: self.reading,
        })
    }
}

/// The client-controlled fields of a book after validation.
///
/// Constructed only by [`BookInput::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    name: String,
    year: Option<i32>,
    author: Option<String>,
    summary: Option<String>,
    publisher: Option<String>,
    page_count: Number,
    read_page: Number,
    reading: Option<Value>,
}

impl BookDetails {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` when every page has been read. `10` and `10.0` count as equal.
    pub fn is_finished(&self) -> bool {
        numeric(&self.read_page) == numeric(&self.page_count)
    }
}

// A number with no f64 form compares like NaN.
fn numeric(number: &Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}

/// A full replacement of a stored book's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub details: BookDetails,
    pub updated_at: String,
    pub refresh_finished: bool,
}

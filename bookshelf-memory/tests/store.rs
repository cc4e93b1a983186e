//! BookStore behaviour over the in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use bookshelf_core::{
    backend::BookBackend,
    book::{Book, BookChanges, BookInput},
    clock::{Clock, FixedClock},
    error::{BookStoreError, BookStoreResult, ValidationError},
    id::SequentialIds,
    query::{BookQuery, ListFilter, ListParams},
    store::{BookStore, StoreOptions},
};
use bookshelf_memory::InMemoryBackend;
use chrono::{DateTime, Duration};
use serde_json::Number;

struct Fixture {
    store: BookStore<InMemoryBackend>,
    clock: Arc<FixedClock>,
}

fn fixture_with(options: StoreOptions) -> Fixture {
    let start = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
    let clock = Arc::new(FixedClock::new(start));
    let store = BookStore::builder(InMemoryBackend::new())
        .with_id_generator(SequentialIds::default())
        .with_shared_clock(clock.clone())
        .with_options(options)
        .build();

    Fixture { store, clock }
}

fn fixture() -> Fixture {
    fixture_with(StoreOptions::default())
}

#[tokio::test]
async fn add_derives_finished_and_timestamps() {
    let Fixture { store, clock } = fixture();

    let id = store
        .add(BookInput::named("A").pages(100, 100))
        .await
        .unwrap();
    let book = store.get(&id).await.unwrap();

    assert_eq!(id, "book-1");
    assert!(book.finished);
    assert_eq!(book.inserted_at, clock.timestamp());
    assert_eq!(book.updated_at, book.inserted_at);
    assert_eq!(book.year, None);
    assert_eq!(book.author, None);
    assert_eq!(book.reading, None);

    let id = store.add(BookInput::named("B").pages(100, 3)).await.unwrap();
    assert!(!store.get(&id).await.unwrap().finished);
}

#[tokio::test]
async fn rejected_adds_leave_collection_unchanged() {
    let Fixture { store, .. } = fixture();
    store.add(BookInput::named("A").pages(10, 1)).await.unwrap();

    let err = store
        .add(BookInput::named("B").pages(100, 150))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookStoreError::Validation(ValidationError::ReadPageExceedsPageCount { .. })
    ));

    let err = store
        .add(BookInput::default().pages(10, 5))
        .await
        .unwrap_err();
    assert_eq!(err, BookStoreError::Validation(ValidationError::MissingName));

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn get_is_idempotent_and_returns_copies() {
    let Fixture { store, .. } = fixture();
    let id = store.add(BookInput::named("A").pages(10, 1)).await.unwrap();

    let mut first = store.get(&id).await.unwrap();
    let second = store.get(&id).await.unwrap();
    assert_eq!(first, second);

    first.name = "mutated".into();
    assert_eq!(store.get(&id).await.unwrap().name, "A");
}

#[tokio::test]
async fn get_unknown_id_is_not_found() {
    let Fixture { store, .. } = fixture();

    assert_eq!(
        store.get("nope").await.unwrap_err(),
        BookStoreError::NotFound("nope".into())
    );
}

#[tokio::test]
async fn list_without_filters_projects_everything_in_order() {
    let Fixture { store, .. } = fixture();
    for name in ["C", "A", "B"] {
        store
            .add(BookInput::named(name).pages(10, 1).publisher("Pub"))
            .await
            .unwrap();
    }

    let books = store.list(ListFilter::new()).await.unwrap();
    let names: Vec<_> = books.iter().map(|b| b.name.as_str()).collect();

    assert_eq!(names, ["C", "A", "B"]);
    assert_eq!(books[0].id, "book-1");
    assert_eq!(books[0].publisher.as_deref(), Some("Pub"));
}

#[tokio::test]
async fn list_filters_by_name_case_insensitively() {
    let Fixture { store, .. } = fixture();
    store.add(BookInput::named("Dune").pages(10, 1)).await.unwrap();
    store.add(BookInput::named("dune").pages(10, 1)).await.unwrap();
    store
        .add(BookInput::named("Dune Messiah").pages(10, 1))
        .await
        .unwrap();

    let books = store.list(ListFilter::new().name("DUNE")).await.unwrap();
    let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();

    assert_eq!(ids, ["book-1", "book-2"]);
}

#[tokio::test]
async fn list_filters_by_flags_from_query_strings() {
    let Fixture { store, .. } = fixture();
    store
        .add(BookInput::named("reading, done").pages(10, 10).reading(true))
        .await
        .unwrap();
    store
        .add(BookInput::named("reading").pages(10, 1).reading(true))
        .await
        .unwrap();
    store
        .add(BookInput::named("shelved").pages(10, 1).reading(false))
        .await
        .unwrap();
    store
        .add(BookInput::named("unknown").pages(10, 1))
        .await
        .unwrap();

    let list = |reading: Option<&str>, finished: Option<&str>| {
        let store = store.clone();
        let params = ListParams {
            name: None,
            reading: reading.map(str::to_string),
            finished: finished.map(str::to_string),
        };
        async move {
            store
                .list(params.into())
                .await
                .unwrap()
                .into_iter()
                .map(|b| b.name)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(list(Some("1"), None).await, ["reading, done", "reading"]);
    assert_eq!(list(Some("0"), None).await, ["shelved"]);
    assert_eq!(list(None, Some("1")).await, ["reading, done"]);
    assert_eq!(
        list(None, Some("0")).await,
        ["reading", "shelved", "unknown"]
    );
    assert_eq!(list(Some("1"), Some("0")).await, ["reading"]);
    // empty values are present and read as zero
    assert_eq!(list(Some(""), None).await, ["shelved"]);
}

#[tokio::test]
async fn update_replaces_fields_and_refreshes_updated_at() {
    let Fixture { store, clock } = fixture();
    let id = store
        .add(BookInput::named("A").pages(100, 10).publisher("Old"))
        .await
        .unwrap();
    let before = store.get(&id).await.unwrap();

    clock.advance(Duration::seconds(5));
    store
        .update(&id, BookInput::named("A2").pages(200, 200))
        .await
        .unwrap();
    let after = store.get(&id).await.unwrap();

    assert_eq!(after.name, "A2");
    assert_eq!(after.page_count, Number::from(200));
    assert_eq!(after.read_page, Number::from(200));
    assert_eq!(after.publisher, None);
    assert_eq!(after.inserted_at, before.inserted_at);
    assert_ne!(after.updated_at, before.updated_at);
    assert_eq!(after.updated_at, clock.timestamp());
    // finished keeps the value it got at creation
    assert!(!after.finished);
}

#[tokio::test]
async fn update_can_refresh_finished_when_configured() {
    let Fixture { store, .. } = fixture_with(StoreOptions {
        refresh_finished_on_update: true,
    });
    let id = store.add(BookInput::named("A").pages(100, 10)).await.unwrap();

    store
        .update(&id, BookInput::named("A").pages(100, 100))
        .await
        .unwrap();

    assert!(store.get(&id).await.unwrap().finished);
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let Fixture { store, .. } = fixture();
    let id = store.add(BookInput::named("A").pages(100, 10)).await.unwrap();
    let before = store.get(&id).await.unwrap();

    let err = store
        .update("missing", BookInput::default().pages(1, 1))
        .await
        .unwrap_err();
    assert_eq!(err, BookStoreError::Validation(ValidationError::MissingName));

    let err = store
        .update(&id, BookInput::named("A").pages(1, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, BookStoreError::Validation(_)));
    assert_eq!(store.get(&id).await.unwrap(), before);

    let err = store
        .update("missing", BookInput::named("A").pages(1, 1))
        .await
        .unwrap_err();
    assert_eq!(err, BookStoreError::NotFound("missing".into()));
}

#[tokio::test]
async fn delete_removes_exactly_one_and_keeps_order() {
    let Fixture { store, .. } = fixture();
    for name in ["A", "B", "C"] {
        store.add(BookInput::named(name).pages(1, 1)).await.unwrap();
    }

    store.delete("book-2").await.unwrap();

    let names: Vec<_> = store
        .list(ListFilter::new())
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert_eq!(names, ["A", "C"]);
    assert_eq!(
        store.get("book-2").await.unwrap_err(),
        BookStoreError::NotFound("book-2".into())
    );
    assert_eq!(
        store.delete("book-2").await.unwrap_err(),
        BookStoreError::NotFound("book-2".into())
    );
}

#[tokio::test]
async fn concurrent_adds_get_distinct_ids() {
    let Fixture { store, .. } = fixture();

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .add(BookInput::named(format!("book {i}")).pages(10, 1))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 32);
    assert_eq!(store.count().await.unwrap(), 32);
}

/// Accepts every insert and keeps nothing.
#[derive(Debug, Clone, Default)]
struct DroppingBackend;

#[async_trait]
impl BookBackend for DroppingBackend {
    async fn insert_book(&self, _book: Book) -> BookStoreResult<()> {
        Ok(())
    }

    async fn update_book(&self, id: &str, _changes: BookChanges) -> BookStoreResult<()> {
        Err(BookStoreError::NotFound(id.to_string()))
    }

    async fn delete_book(&self, id: &str) -> BookStoreResult<()> {
        Err(BookStoreError::NotFound(id.to_string()))
    }

    async fn get_book(&self, _id: &str) -> BookStoreResult<Option<Book>> {
        Ok(None)
    }

    async fn contains_book(&self, _id: &str) -> BookStoreResult<bool> {
        Ok(false)
    }

    async fn query_books(&self, _query: BookQuery) -> BookStoreResult<Vec<Book>> {
        Ok(Vec::new())
    }

    async fn count_books(&self) -> BookStoreResult<usize> {
        Ok(0)
    }
}

#[tokio::test]
async fn add_reports_insert_failed_when_book_is_not_stored() {
    let store = BookStore::builder(DroppingBackend)
        .with_id_generator(SequentialIds::default())
        .build();

    let err = store
        .add(BookInput::named("A").pages(10, 1))
        .await
        .unwrap_err();

    assert_eq!(err, BookStoreError::InsertFailed("book-1".into()));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn add_stores_reading_as_sent() {
    let Fixture { store, .. } = fixture();
    let mut input = BookInput::named("A").pages(10, 1);
    input.reading = Some(serde_json::json!(1));

    let id = store.add(input).await.unwrap();
    assert_eq!(store.get(&id).await.unwrap().reading, Some(serde_json::json!(1)));

    // a non-boolean `reading` matches neither flag
    for flag in ["1", "0"] {
        let params = ListParams {
            reading: Some(flag.into()),
            ..ListParams::default()
        };
        assert!(store.list(params.into()).await.unwrap().is_empty());
    }
}

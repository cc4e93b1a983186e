//! HTTP transport for the book store.
//!
//! ## Routes
//!
//! - `POST /books` - add a book. Body = JSON payload.
//! - `GET /books` - list books, optionally filtered by `?name=&reading=&finished=`.
//! - `GET /books/:book_id` - read one book.
//! - `PUT /books/:book_id` - replace one book. Body = JSON payload.
//! - `DELETE /books/:book_id` - delete one book.
//! - `GET /health` - health check returning `{ "ok": true, "books": <count> }`.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::{prelude::*, memory::InMemoryBackend};
//!
//! let store = BookStore::new(InMemoryBackend::new());
//!
//! // Get the router to compose with other axum routes
//! let app = bookshelf_http::router(store.clone());
//!
//! // Or serve directly
//! bookshelf_http::serve(store, "127.0.0.1:9000".parse()?).await?;
//! ```

use std::net::SocketAddr;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tracing::info;

use bookshelf_core::{
    backend::BookBackend,
    book::BookInput,
    query::ListParams,
    store::BookStore,
};

use crate::{error::AppResult, messages::Operation, response::ApiResponse};

/// Build an axum `Router` that serves the given store.
pub fn router<B: BookBackend + Clone + 'static>(store: BookStore<B>) -> Router {
    Router::new()
        .route("/health", get(health::<B>))
        .route("/books", get(list_books::<B>).post(add_book::<B>))
        .route(
            "/books/:book_id",
            get(get_book::<B>)
                .put(update_book::<B>)
                .delete(delete_book::<B>),
        )
        .with_state(store)
}

/// Serve the store over HTTP at `addr` until Ctrl-C.
pub async fn serve<B: BookBackend + Clone + 'static>(
    store: BookStore<B>,
    addr: SocketAddr,
) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP server started at {}", listener.local_addr()?);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

/// `GET /health`
async fn health<B: BookBackend + Clone + 'static>(
    State(store): State<BookStore<B>>,
) -> Response {
    match store.count().await {
        Ok(books) => Json(json!({ "ok": true, "books": books })).into_response(),
        Err(err) => ApiResponse::from_error(Operation::List, &err).into_response(),
    }
}

/// `POST /books`
async fn add_book<B: BookBackend + Clone + 'static>(
    State(store): State<BookStore<B>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> ApiResponse {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiResponse::malformed(Operation::Add, &rejection.body_text()),
    };

    match store.add(input).await {
        Ok(book_id) => ApiResponse::success(Operation::Add, StatusCode::CREATED)
            .with_data(json!({ "bookId": book_id })),
        Err(err) => ApiResponse::from_error(Operation::Add, &err),
    }
}

/// `GET /books`
async fn list_books<B: BookBackend + Clone + 'static>(
    State(store): State<BookStore<B>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResponse {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return ApiResponse::malformed(Operation::List, &rejection.body_text()),
    };

    match store.list(params.into()).await {
        Ok(books) => ApiResponse::success(Operation::List, StatusCode::OK)
            .with_data(json!({ "books": books })),
        Err(err) => ApiResponse::from_error(Operation::List, &err),
    }
}

/// `GET /books/:book_id`
async fn get_book<B: BookBackend + Clone + 'static>(
    State(store): State<BookStore<B>>,
    Path(book_id): Path<String>,
) -> ApiResponse {
    match store.get(&book_id).await {
        Ok(book) => {
            ApiResponse::success(Operation::Get, StatusCode::OK).with_data(json!({ "book": book }))
        }
        Err(err) => ApiResponse::from_error(Operation::Get, &err),
    }
}

/// `PUT /books/:book_id`
async fn update_book<B: BookBackend + Clone + 'static>(
    State(store): State<BookStore<B>>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> ApiResponse {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return ApiResponse::malformed(Operation::Update, &rejection.body_text());
        }
    };

    match store.update(&book_id, input).await {
        Ok(()) => ApiResponse::success(Operation::Update, StatusCode::OK),
        Err(err) => ApiResponse::from_error(Operation::Update, &err),
    }
}

/// `DELETE /books/:book_id`
async fn delete_book<B: BookBackend + Clone + 'static>(
    State(store): State<BookStore<B>>,
    Path(book_id): Path<String>,
) -> ApiResponse {
    match store.delete(&book_id).await {
        Ok(()) => ApiResponse::success(Operation::Delete, StatusCode::OK),
        Err(err) => ApiResponse::from_error(Operation::Delete, &err),
    }
}

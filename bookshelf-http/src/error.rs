use bookshelf_core::error::BookStoreError;
use thiserror::Error;

/// Application error types.
///
/// Represents everything that can stop the server from starting or running.
/// Per-request failures never surface here; they become responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// Binding or serving the listener failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The log subscriber could not be installed.
    #[error("tracing error: {0}")]
    Tracing(String),

    /// The storage backend could not be built.
    #[error("store error: {0}")]
    Store(#[from] BookStoreError),
}

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

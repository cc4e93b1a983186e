//! Human-readable response messages, per operation.
//!
//! The wording is the service's public contract and is kept in Indonesian.

use bookshelf_core::error::{BookStoreError, ValidationError};

/// The five catalogue operations, as seen by the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    List,
    Get,
    Update,
    Delete,
}

impl Operation {
    /// The message carried by a successful response, if the operation has one.
    ///
    /// Listing and reading return data instead of a message.
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Operation::Add => Some("Buku berhasil ditambahkan"),
            Operation::Update => Some("Buku berhasil diperbarui"),
            Operation::Delete => Some("Buku berhasil dihapus"),
            Operation::List | Operation::Get => None,
        }
    }

    /// The message for a request whose body or query string could not be parsed.
    pub fn malformed_request_message(self) -> &'static str {
        match self {
            Operation::Add => "Gagal menambahkan buku. Payload tidak valid",
            Operation::Update => "Gagal memperbarui buku. Payload tidak valid",
            Operation::List => "Gagal menampilkan buku. Query tidak valid",
            Operation::Get | Operation::Delete => "Permintaan tidak valid",
        }
    }

    /// The message for a failed operation.
    pub fn failure_message(self, err: &BookStoreError) -> &'static str {
        match (self, err) {
            (Operation::Add, BookStoreError::Validation(err)) => match err {
                ValidationError::MissingName => "Gagal menambahkan buku. Mohon isi nama buku",
                ValidationError::MissingPageCount => {
                    "Gagal menambahkan buku. Mohon isi pageCount buku"
                }
                ValidationError::MissingReadPage => {
                    "Gagal menambahkan buku. Mohon isi readPage buku"
                }
                ValidationError::ReadPageExceedsPageCount { .. } => {
                    "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
                }
            },
            (Operation::Add, _) => "Buku gagal ditambahkan",

            (Operation::Update, BookStoreError::Validation(err)) => match err {
                ValidationError::MissingName => "Gagal memperbarui buku. Mohon isi nama buku",
                ValidationError::MissingPageCount => {
                    "Gagal memperbarui buku. Mohon isi pageCount buku"
                }
                ValidationError::MissingReadPage => {
                    "Gagal memperbarui buku. Mohon isi readPage buku"
                }
                ValidationError::ReadPageExceedsPageCount { .. } => {
                    "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
                }
            },
            (Operation::Update, BookStoreError::NotFound(_)) => {
                "Gagal memperbarui buku. Id tidak ditemukan"
            }
            (Operation::Update, _) => "Buku gagal diperbarui",

            (Operation::Get, BookStoreError::NotFound(_)) => "Buku tidak ditemukan",
            (Operation::Get | Operation::List, _) => "Buku gagal ditampilkan",

            (Operation::Delete, BookStoreError::NotFound(_)) => {
                "Buku gagal dihapus. Id tidak ditemukan"
            }
            (Operation::Delete, _) => "Buku gagal dihapus",
        }
    }
}

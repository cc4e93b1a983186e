//! Identifier generation injected into the store.

use std::{
    fmt::Debug,
    sync::atomic::{AtomicU64, Ordering},
};

use uuid::Uuid;

/// Produces fresh book identifiers.
///
/// Implementations must be safe to call from several tasks at once. Uniqueness is
/// still enforced by the backend, which rejects an id it already holds.
pub trait IdGenerator: Send + Sync + Debug {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs in their 32-character simple form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// `prefix-1`, `prefix-2`, ... in call order.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("book")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

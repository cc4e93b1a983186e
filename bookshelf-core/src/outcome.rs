//! Outcome kinds reported to callers of the store.

use serde::Serialize;

/// The three outcome classes every response falls into.
///
/// Serialized in lowercase, which is the `status` field of a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// The operation completed.
    Success,
    /// The client sent something the store refused.
    Fail,
    /// The store itself misbehaved.
    Error,
}

//! The `{status, message, data}` envelope every route answers with.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use bookshelf_core::{error::BookStoreError, outcome::OutcomeKind};

use crate::messages::Operation;

/// A response body plus the status code it is sent with.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    #[serde(skip)]
    code: StatusCode,
    pub status: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    /// A success response for `operation`, with its success message if it has one.
    pub fn success(operation: Operation, code: StatusCode) -> Self {
        Self {
            code,
            status: OutcomeKind::Success,
            message: operation.success_message(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Maps a store error onto its status code, outcome kind and message.
    pub fn from_error(operation: Operation, err: &BookStoreError) -> Self {
        let code =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match err.kind() {
            OutcomeKind::Error => error!(?operation, error = %err, "request failed"),
            _ => warn!(?operation, error = %err, "request rejected"),
        }

        Self {
            code,
            status: err.kind(),
            message: Some(operation.failure_message(err)),
            data: None,
        }
    }

    /// A `fail` response for a body or query string that could not be parsed.
    pub fn malformed(operation: Operation, reason: &str) -> Self {
        warn!(?operation, reason, "malformed request");

        Self {
            code: StatusCode::BAD_REQUEST,
            status: OutcomeKind::Fail,
            message: Some(operation.malformed_request_message()),
            data: None,
        }
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error as ThisError;
use tracing::error;

use tatami_db::QueryError;
use tatami_ledger::LedgerError;

/// ApiError type, mapped onto response statuses.
#[derive(ThisError, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Storage(anyhow::Error),
}

/// Response envelope for write operations.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Json<Envelope> {
        Json(Envelope {
            success: true,
            message: message.into(),
        })
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        // A failed key lookup is the client's problem, not ours
        if let Some(QueryError::NotFound) = err.downcast_ref::<QueryError>() {
            return ApiError::NotFound;
        }
        ApiError::Storage(err)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(message) => ApiError::Validation(message),
            LedgerError::Storage(err) => ApiError::from(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            // Storage details go to the log, clients get a fixed message
            ApiError::Storage(err) => {
                error!("storage error: {:#}", err);
                "internal storage error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(Envelope {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}

/// Reject a missing field with a validation error.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("{} is required", field)))
}

/// Like `required`, but also rejects blank strings.
pub fn required_text(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::validation(format!("{} is required", field))),
    }
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use catalog_products::CatalogError;

/// Failure class visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorStatus {
    NotFound,
    BadRequest,
    InternalError,
}

impl ErrorStatus {
    pub fn http_status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned by every operation: `{message, status}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    pub status: ErrorStatus,
}

impl From<&CatalogError> for ErrorPayload {
    fn from(err: &CatalogError) -> Self {
        let status = match err {
            CatalogError::Validation(_) => ErrorStatus::BadRequest,
            CatalogError::NotFound(_) => ErrorStatus::NotFound,
            CatalogError::Store(_) => ErrorStatus::InternalError,
        };
        Self {
            message: err.to_string(),
            status,
        }
    }
}

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    if let CatalogError::Store(store_err) = &err {
        tracing::error!(error = %store_err, "catalog store failure");
    }
    payload_response(ErrorPayload::from(&err))
}

pub fn json_error(status: ErrorStatus, message: impl Into<String>) -> axum::response::Response {
    payload_response(ErrorPayload {
        message: message.into(),
        status,
    })
}

fn payload_response(payload: ErrorPayload) -> axum::response::Response {
    (payload.status.http_status(), Json(payload)).into_response()
}

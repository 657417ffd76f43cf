//! Maps domain `AppError` to HTTP responses.
//!
//! Every error body carries an `error` message. Structured details on the
//! domain error (field errors, next available date) are merged into the
//! same object.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use luxedrive_core::error::{AppError, ErrorKind};

/// Message returned instead of internal error details.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Shorthand for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status for an error kind.
///
/// Overlapping bookings are reported as 400, not 409.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation | ErrorKind::Unavailable => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::ReferenceExhausted
        | ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::ExternalService => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let AppError {
            kind,
            message,
            details,
            source,
        } = self.0;
        let status = status_for(kind);

        let message = if status.is_server_error() {
            tracing::error!(
                kind = %kind,
                error = %message,
                source = ?source,
                "Request failed"
            );
            if kind == ErrorKind::ReferenceExhausted {
                message
            } else {
                INTERNAL_MESSAGE.to_string()
            }
        } else {
            message
        };

        let mut body = Map::new();
        body.insert("error".to_string(), Value::String(message));
        if let Some(Value::Object(extra)) = details {
            for (key, value) in extra {
                body.entry(key).or_insert(value);
            }
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

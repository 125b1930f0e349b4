//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::BytesRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use boarding_core::ErrorKind;
use serde_json::json;
use thiserror::Error;

/// An error returned by a procedure.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request could not be turned into procedure input.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// The request body could not be read, e.g. it exceeds the body limit.
  #[error("unreadable request body: {0}")]
  Body(#[from] BytesRejection),

  #[error(transparent)]
  Catalog(#[from] boarding_core::Error),
}

impl ApiError {
  /// HTTP status and wire error code.
  pub fn status(&self) -> (StatusCode, &'static str) {
    let kind = match self {
      ApiError::BadRequest(_) => ErrorKind::Validation,
      ApiError::Body(r) if r.status() == StatusCode::PAYLOAD_TOO_LARGE => {
        return (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE");
      }
      ApiError::Body(r) => return (r.status(), "BAD_REQUEST"),
      ApiError::Catalog(e) => e.kind(),
    };
    match kind {
      ErrorKind::Validation => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
      ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
      ErrorKind::PermissionDenied => (StatusCode::FORBIDDEN, "FORBIDDEN"),
      ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
      ErrorKind::Internal => {
        (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
      }
    }
  }
}

/// Lift a backend error into the core taxonomy.
pub(crate) fn store_error<E: Into<boarding_core::Error>>(e: E) -> ApiError {
  ApiError::Catalog(e.into())
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, code) = self.status();
    let message = self.to_string();
    if status.is_server_error() {
      tracing::error!(code, error = %message, "procedure failed");
    } else {
      tracing::warn!(code, error = %message, "procedure rejected");
    }
    (
      status,
      Json(json!({ "error": { "code": code, "message": message } })),
    )
      .into_response()
  }
}

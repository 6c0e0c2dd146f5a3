//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A path id segment that is not an integer.
  #[error("invalid id")]
  InvalidId,
  /// A required query parameter is missing; carries the payload text.
  #[error("{0}")]
  MissingParam(&'static str),
  #[error(transparent)]
  Core(#[from] dossier_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::InvalidId => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid ID" })))
          .into_response()
      }
      Error::MissingParam(msg) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
      }
      // Recoverable domain errors keep the HTTP 200 status; the dashboard
      // branches on the `status` field, not on status codes.
      Error::Core(e) if e.is_recoverable() => {
        Json(json!({ "status": "error", "message": e.to_string() }))
          .into_response()
      }
      Error::Core(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}

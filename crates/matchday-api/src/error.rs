//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The match has no result yet.
  #[error("precondition failed: {0}")]
  PreconditionFailed(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<matchday_core::Error> for ApiError {
  fn from(e: matchday_core::Error) -> Self {
    use matchday_core::Error as E;
    match e {
      E::TournamentNotFound(_) | E::MatchNotFound(_) | E::TeamNotFound(_) => {
        ApiError::NotFound(e.to_string())
      }
      E::MatchIncomplete(_) => ApiError::PreconditionFailed(e.to_string()),
      E::MatchAlreadyFinished(_) => ApiError::Conflict(e.to_string()),
      E::NotAMatchTeam { .. } | E::SameTeam(_) | E::TeamNotParticipant { .. } => {
        ApiError::BadRequest(e.to_string())
      }
      E::Store(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::PreconditionFailed(m) => (StatusCode::PRECONDITION_FAILED, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store error");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

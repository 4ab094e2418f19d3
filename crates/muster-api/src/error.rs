//! HTTP rendering for the core error taxonomy.
//!
//! Every core error is recoverable at the call site; the mapping here is the
//! only place the taxonomy is translated into transport terms.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use muster_core::Error;
use serde_json::json;

/// An error returned by an API handler; wraps the core taxonomy.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
  fn from(err: Error) -> Self { Self(err) }
}

impl ApiError {
  fn status_code(&self) -> StatusCode {
    match self.0 {
      Error::NotRegistered(_) => StatusCode::NOT_FOUND,
      Error::AlreadyRegistered(_)
      | Error::DateConflict(_)
      | Error::DuplicateDuty { .. } => StatusCode::CONFLICT,
      Error::InvalidDate(_)
      | Error::PastDate(_)
      | Error::EndBeforeStart { .. }
      | Error::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn kind(&self) -> &'static str {
    match self.0 {
      Error::NotRegistered(_) => "not_registered",
      Error::AlreadyRegistered(_) => "already_registered",
      Error::InvalidDate(_) => "invalid_date",
      Error::PastDate(_) => "past_date",
      Error::EndBeforeStart { .. } => "end_before_start",
      Error::InsufficientBalance { .. } => "insufficient_balance",
      Error::DateConflict(_) => "date_conflict",
      Error::DuplicateDuty { .. } => "duplicate_duty",
      Error::Storage(_) => "storage",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status_code();
    let mut body = json!({
      "kind":  self.kind(),
      "error": self.0.to_string(),
    });

    // Carry the conflicting record for display.
    if let Error::DateConflict(conflict) = &self.0 {
      body["conflict"] = json!(conflict);
    }

    (status, Json(body)).into_response()
  }
}

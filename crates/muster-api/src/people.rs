//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | The parade state, sorted by rank then name |
//! | `POST` | `/people` | Register; body: `{"id":1,"rank":"PTE","name":"...","off_balance":1.5,"leave_balance":10}` |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use muster_core::{
  person::NewPerson,
  store::{ParadeEntry, ParadeStore},
};

use crate::error::ApiError;

/// `GET /people` — every person with their current availability.
pub async fn list<S: ParadeStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ParadeEntry>>, ApiError> {
  let entries = store.list_all().await?;
  Ok(Json(entries))
}

/// `POST /people` — register a person with their initial balances.
pub async fn create<S: ParadeStore>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPerson>,
) -> Result<impl IntoResponse, ApiError> {
  let person = store.register(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

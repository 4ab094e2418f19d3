//! Handlers for the per-person status machine.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people/:id/status` | Current status; defaults to PRESENT |
//! | `POST` | `/people/:id/present` | Unconditional return to PRESENT |
//! | `POST` | `/people/:id/off` | Body: `{"date":"2026-09-04","off_type":"FULL"}` |
//! | `POST` | `/people/:id/leave` | Body: `{"start":"...","end":"..."}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use chrono::NaiveDate;
use muster_core::{
  person::PersonId,
  status::{OffType, StatusRecord},
  store::{LeaveReceipt, OffReceipt, ParadeStore},
};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /people/:id/status`
pub async fn get_one<S: ParadeStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<StatusRecord>, ApiError> {
  let status = store.get_status(id).await?;
  Ok(Json(status))
}

/// `POST /people/:id/present`
pub async fn present<S: ParadeStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<StatusRecord>, ApiError> {
  let status = store.mark_present(id).await?;
  Ok(Json(status))
}

#[derive(Debug, Deserialize)]
pub struct OffBody {
  pub date:     NaiveDate,
  pub off_type: OffType,
}

/// `POST /people/:id/off`
pub async fn off<S: ParadeStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
  Json(body): Json<OffBody>,
) -> Result<Json<OffReceipt>, ApiError> {
  let receipt = store.mark_off(id, body.date, body.off_type).await?;
  Ok(Json(receipt))
}

#[derive(Debug, Deserialize)]
pub struct LeaveBody {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

/// `POST /people/:id/leave`
pub async fn leave<S: ParadeStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
  Json(body): Json<LeaveBody>,
) -> Result<Json<LeaveReceipt>, ApiError> {
  let receipt = store.mark_leave(id, body.start, body.end).await?;
  Ok(Json(receipt))
}

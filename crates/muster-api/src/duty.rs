//! Handler for reporting duty occurrences.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use muster_core::{
  person::PersonId,
  record::DayType,
  store::ParadeStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DutyBody {
  pub day_type:  DayType,
  pub duty_date: NaiveDate,
}

/// `POST /people/:id/duty` — body:
/// `{"day_type":"SATURDAY","duty_date":"2026-09-05"}`
pub async fn create<S: ParadeStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
  Json(body): Json<DutyBody>,
) -> Result<impl IntoResponse, ApiError> {
  let receipt = store.record_duty(id, body.day_type, body.duty_date).await?;
  Ok((StatusCode::CREATED, Json(receipt)))
}

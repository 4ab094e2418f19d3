//! Administrative handlers: manual rollback trigger and full reset.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use muster_core::store::{ParadeStore, RollbackReport};

use crate::error::ApiError;

/// `POST /rollback` — run the daily sweep now. Safe to call repeatedly; the
/// report is the caller's acknowledgment.
pub async fn rollback<S: ParadeStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<RollbackReport>, ApiError> {
  let report = store.run_daily_rollback().await?;
  tracing::info!(
    swept_on = %report.swept_on,
    reverted = report.total_reverted(),
    "manual rollback triggered"
  );
  Ok(Json(report))
}

/// `POST /reset` — clear the entire ledger.
pub async fn reset<S: ParadeStore>(
  State(store): State<Arc<S>>,
) -> Result<impl IntoResponse, ApiError> {
  store.full_reset().await?;
  tracing::warn!("ledger fully reset");
  Ok(StatusCode::NO_CONTENT)
}

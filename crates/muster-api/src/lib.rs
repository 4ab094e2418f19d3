//! JSON REST API for the Muster parade-state ledger.
//!
//! Exposes an axum [`Router`] backed by any
//! [`muster_core::store::ParadeStore`]. The adapter holds no decision logic:
//! it deserialises requests, calls the core operations, and renders the
//! structured errors of the core taxonomy as HTTP responses.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", muster_api::api_router(store.clone()))
//! ```

pub mod admin;
pub mod duty;
pub mod error;
pub mod people;
pub mod schedule;
pub mod status;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use muster_core::{
  person::PersonId, policy::DutyCreditPolicy, store::ParadeStore,
};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
///
/// The admin list and duty-credit table are loaded once here and passed
/// explicitly into the scheduler and store constructors — never referenced as
/// ambient globals.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  pub store_path:   PathBuf,
  /// Identities acknowledged after each daily rollback sweep.
  #[serde(default)]
  pub admin_ids:    Vec<PersonId>,
  /// Off-credit earned per duty day type; defaults to the standard table.
  #[serde(default)]
  pub duty_credits: DutyCreditPolicy,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ParadeStore + 'static,
{
  Router::new()
    // Roster
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    // Status machine
    .route("/people/{id}/status", get(status::get_one::<S>))
    .route("/people/{id}/present", post(status::present::<S>))
    .route("/people/{id}/off", post(status::off::<S>))
    .route("/people/{id}/leave", post(status::leave::<S>))
    // Duty accrual
    .route("/people/{id}/duty", post(duty::create::<S>))
    // Administration
    .route("/rollback", post(admin::rollback::<S>))
    .route("/reset", post(admin::reset::<S>))
    .with_state(store)
}

//! The midnight scheduler — the external collaborator that triggers the
//! daily rollback.
//!
//! The core only owns the idempotent effect; wall-clock scheduling lives
//! here. The sweep compares against today at run time, so a missed midnight
//! (process down, clock jump) is corrected by the next run.

use std::{sync::Arc, time::Duration};

use chrono::{Days, Local};
use muster_core::{person::PersonId, store::ParadeStore};

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Time remaining until the next local midnight.
fn until_next_midnight() -> Option<Duration> {
  let now = Local::now();
  let midnight = now
    .date_naive()
    .checked_add_days(Days::new(1))?
    .and_hms_opt(0, 0, 0)?
    .and_local_timezone(Local)
    .earliest()?;
  (midnight - now).to_std().ok()
}

/// Run the daily rollback at every local midnight, forever. After each
/// sweep, a completion acknowledgment is emitted for every administrator
/// identity.
pub async fn midnight_rollback_loop<S: ParadeStore>(
  store: Arc<S>,
  admin_ids: Vec<PersonId>,
) {
  loop {
    let delay = until_next_midnight().unwrap_or(ONE_DAY);
    tokio::time::sleep(delay).await;

    match store.run_daily_rollback().await {
      Ok(report) => {
        tracing::info!(
          swept_on = %report.swept_on,
          reverted_off = report.reverted_off,
          reverted_leave = report.reverted_leave,
          "daily rollback complete"
        );
        for admin in &admin_ids {
          tracing::info!(admin = %admin, "rollback acknowledgment");
        }
      }
      Err(e) => tracing::error!(error = %e, "daily rollback failed"),
    }
  }
}

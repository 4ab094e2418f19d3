//! The `ParadeStore` trait and its success payloads.
//!
//! The trait is implemented by storage backends (e.g. `muster-store-sqlite`).
//! Adapters depend on this abstraction, not on any concrete backend. Every
//! compound operation (check-then-debit, check-then-write) must be atomic per
//! person: a backend may use a per-person lock or a serialisable-transaction
//! guarantee, but no two concurrent operations for the same person may
//! interleave their read-check-write sequence.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  person::{HalfDays, NewPerson, Person, PersonId},
  record::{DayType, DutyRecord, LeaveRecord},
  status::{Availability, OffType, StatusRecord},
};

// ─── Success payloads ────────────────────────────────────────────────────────

/// Result of a successful `mark_off`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffReceipt {
  pub status:    StatusRecord,
  /// The off-balance remaining after the debit.
  pub remaining: HalfDays,
}

/// Result of a successful `mark_leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveReceipt {
  pub record:           LeaveRecord,
  pub status:           StatusRecord,
  /// Weekdays (Mon–Fri) inside the span; the amount debited.
  pub weekdays_charged: u32,
  /// The leave balance remaining after the debit.
  pub remaining:        u32,
}

/// Result of a successful `record_duty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyReceipt {
  pub record:      DutyRecord,
  pub new_balance: HalfDays,
}

/// One line of the parade state: a person and their current availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParadeEntry {
  pub person:       Person,
  #[serde(flatten)]
  pub availability: Availability,
}

/// Outcome of one daily rollback sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollbackReport {
  /// The calendar date the sweep compared against.
  pub swept_on:       NaiveDate,
  /// OFF statuses returned to PRESENT.
  pub reverted_off:   u64,
  /// Expired LEAVE statuses returned to PRESENT.
  pub reverted_leave: u64,
}

impl RollbackReport {
  pub fn total_reverted(&self) -> u64 { self.reverted_off + self.reverted_leave }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a parade-state ledger backend.
///
/// Balances are never mutated directly: `mark_off` / `mark_leave` debit after
/// checking sufficiency, `record_duty` credits, and nothing else touches
/// them. On any error the store is left exactly as it was before the call.
pub trait ParadeStore: Send + Sync {
  /// Create a person with their initial balances and a PRESENT status.
  /// Fails with `AlreadyRegistered` if the id is taken.
  fn register(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person>> + Send + '_;

  /// Unconditionally return to PRESENT, clearing any absence dates.
  /// No balance effect. Always succeeds for a registered person.
  fn mark_present(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<StatusRecord>> + Send + '_;

  /// Mark a single-day OFF. Checks, in order: the date is not in the past,
  /// the credit cost does not exceed the off-balance, and the day does not
  /// conflict with an existing OFF or LEAVE booking.
  fn mark_off(
    &self,
    id: PersonId,
    date: NaiveDate,
    off_type: OffType,
  ) -> impl Future<Output = Result<OffReceipt>> + Send + '_;

  /// Book a LEAVE span. Checks: neither date in the past, `end >= start`, no
  /// conflict, and the weekday count does not exceed the leave balance.
  /// Appends a [`LeaveRecord`] and overwrites the status.
  fn mark_leave(
    &self,
    id: PersonId,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<LeaveReceipt>> + Send + '_;

  /// Report a duty occurrence and credit the off-balance per the configured
  /// policy. The date must fall on the claimed weekday within the lookahead
  /// window; a duplicate `(person, date)` fails with `DuplicateDuty`.
  fn record_duty(
    &self,
    id: PersonId,
    day_type: DayType,
    duty_date: NaiveDate,
  ) -> impl Future<Output = Result<DutyReceipt>> + Send + '_;

  /// The person's current status; defaults to PRESENT when no status row
  /// exists. Fails with `NotRegistered` for an unknown id.
  fn get_status(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<StatusRecord>> + Send + '_;

  /// The parade state: every person with their current availability, sorted
  /// by rank order then name.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<ParadeEntry>>> + Send + '_;

  /// The daily sweep: every OFF status returns to PRESENT, every LEAVE whose
  /// end date is strictly before today returns to PRESENT. Balances are not
  /// touched (they were debited at booking time). Idempotent — a second run
  /// on the same day finds nothing left to change.
  fn run_daily_rollback(
    &self,
  ) -> impl Future<Output = Result<RollbackReport>> + Send + '_;

  /// Administrative: clear the entire ledger (all four tables).
  fn full_reset(&self) -> impl Future<Output = Result<()>> + Send + '_;
}

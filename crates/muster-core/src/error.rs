//! Error types for `muster-core`.
//!
//! Every failure an operation can report is a variant here; adapters render
//! these into user-facing messages. The core itself never logs or formats.
//! No operation partially applies its effect — on any error the store is left
//! exactly as it was before the call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{conflict::Conflict, person::PersonId};

/// Which entitlement a debit was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceField {
  Off,
  Leave,
}

impl std::fmt::Display for BalanceField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Off => write!(f, "off"),
      Self::Leave => write!(f, "leave"),
    }
  }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
  #[error("person {0} is not registered")]
  NotRegistered(PersonId),

  #[error("person {0} is already registered")]
  AlreadyRegistered(PersonId),

  #[error("invalid date: {0}")]
  InvalidDate(String),

  #[error("date {0} is in the past")]
  PastDate(NaiveDate),

  #[error("range end {end} precedes start {start}")]
  EndBeforeStart { start: NaiveDate, end: NaiveDate },

  /// A debit would drive the balance negative. Amounts are in days.
  #[error(
    "insufficient {field} balance: requested {requested}, available {available}"
  )]
  InsufficientBalance {
    field:     BalanceField,
    requested: f64,
    available: f64,
  },

  /// The proposed range overlaps an existing OFF or LEAVE booking.
  /// Carries the conflicting record for display.
  #[error("date conflict: {0}")]
  DateConflict(Conflict),

  #[error("duty already recorded for person {person} on {date}")]
  DuplicateDuty { person: PersonId, date: NaiveDate },

  /// A storage-layer fault (I/O, corrupt row). Not part of the domain
  /// taxonomy; surfaced so adapters can map it to an internal error.
  #[error("storage error: {0}")]
  Storage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

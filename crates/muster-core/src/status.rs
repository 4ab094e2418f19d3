//! Availability states and the current-status record.
//!
//! Each person has exactly one live [`StatusRecord`] with overwrite
//! semantics: every status-changing operation and the daily rollback replace
//! it wholesale. History lives in the append-only tables instead
//! ([`crate::record`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::person::{HalfDays, PersonId};

// ─── OffType ─────────────────────────────────────────────────────────────────

/// Which part of the day an OFF mark covers. The credit cost is fixed per
/// variant and deliberately not date-weighted (unlike duty accrual).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OffType {
  Am,
  Pm,
  Full,
}

impl OffType {
  /// The off-balance debit for marking this kind of OFF.
  pub fn credit(self) -> HalfDays {
    match self {
      OffType::Am | OffType::Pm => HalfDays::from_halves(1),
      OffType::Full => HalfDays::from_halves(2),
    }
  }

  pub fn code(self) -> &'static str {
    match self {
      OffType::Am => "AM",
      OffType::Pm => "PM",
      OffType::Full => "FULL",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "AM" => Some(OffType::Am),
      "PM" => Some(OffType::Pm),
      "FULL" => Some(OffType::Full),
      _ => None,
    }
  }
}

impl std::fmt::Display for OffType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.code())
  }
}

// ─── Availability ────────────────────────────────────────────────────────────

/// The per-person state machine. `Present` is both the initial state and the
/// rest state reached after any absence expires. An OFF mark is always a
/// single day; a LEAVE span carries an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "UPPERCASE")]
pub enum Availability {
  Present,
  Off { date: NaiveDate, off_type: OffType },
  Leave { start: NaiveDate, end: NaiveDate },
}

impl Availability {
  /// The state code stored in the database.
  pub fn state_code(&self) -> &'static str {
    match self {
      Availability::Present => "PRESENT",
      Availability::Off { .. } => "OFF",
      Availability::Leave { .. } => "LEAVE",
    }
  }

  pub fn is_present(&self) -> bool { matches!(self, Availability::Present) }

  /// The inclusive date range this state occupies, if any.
  pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
    match *self {
      Availability::Present => None,
      Availability::Off { date, .. } => Some((date, date)),
      Availability::Leave { start, end } => Some((start, end)),
    }
  }
}

// ─── StatusRecord ────────────────────────────────────────────────────────────

/// The single live status row for a person. `updated_at` is set on every
/// write, including the daily rollback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
  pub person_id:    PersonId,
  #[serde(flatten)]
  pub availability: Availability,
  pub updated_at:   DateTime<Utc>,
}

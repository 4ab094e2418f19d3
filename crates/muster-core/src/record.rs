//! Append-only history records: leave bookings and duty occurrences.
//!
//! Once written these are never edited; they are read back for conflict
//! detection, duplicate-duty checks, and balance history.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::person::{HalfDays, PersonId};

// ─── DayType ─────────────────────────────────────────────────────────────────

/// The kinds of day a duty occurrence may be reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayType {
  Friday,
  Saturday,
  Sunday,
}

impl DayType {
  pub fn weekday(self) -> Weekday {
    match self {
      DayType::Friday => Weekday::Fri,
      DayType::Saturday => Weekday::Sat,
      DayType::Sunday => Weekday::Sun,
    }
  }

  pub fn code(self) -> &'static str {
    match self {
      DayType::Friday => "FRIDAY",
      DayType::Saturday => "SATURDAY",
      DayType::Sunday => "SUNDAY",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    match code {
      "FRIDAY" => Some(DayType::Friday),
      "SATURDAY" => Some(DayType::Saturday),
      "SUNDAY" => Some(DayType::Sunday),
      _ => None,
    }
  }
}

impl std::fmt::Display for DayType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.code())
  }
}

// ─── LeaveRecord ─────────────────────────────────────────────────────────────

/// A committed leave booking. The id is a monotonic surrogate key assigned by
/// the store; scan order for conflict detection is ascending by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
  pub id:         i64,
  pub person_id:  PersonId,
  pub start_date: NaiveDate,
  pub end_date:   NaiveDate,
  pub created_at: DateTime<Utc>,
}

// ─── DutyRecord ──────────────────────────────────────────────────────────────

/// A reported duty occurrence and the off-credit it earned. At most one
/// record exists per `(person_id, duty_date)` pair; duplicates are rejected,
/// not merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyRecord {
  pub id:         i64,
  pub person_id:  PersonId,
  pub duty_date:  NaiveDate,
  pub day_type:   DayType,
  pub credited:   HalfDays,
  pub created_at: DateTime<Utc>,
}

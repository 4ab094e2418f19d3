//! Person — the roster entry that owns the two entitlement balances.
//!
//! A person is created exactly once at registration and never deleted except
//! by an administrative full reset. Balances are mutated only through the
//! accounting rules in [`crate::balance`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── PersonId ────────────────────────────────────────────────────────────────

/// Opaque external identity (the chat platform's stable integer id).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl std::fmt::Display for PersonId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<i64> for PersonId {
  fn from(raw: i64) -> Self { Self(raw) }
}

// ─── Rank ────────────────────────────────────────────────────────────────────

/// The fixed, ordered enumeration of rank codes. Declaration order is the
/// parade-state sort order (most junior first).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
pub enum Rank {
  #[serde(rename = "REC")]
  Rec,
  #[serde(rename = "PTE")]
  Pte,
  #[serde(rename = "LCP")]
  Lcp,
  #[serde(rename = "CPL")]
  Cpl,
  #[serde(rename = "CFC")]
  Cfc,
  #[serde(rename = "3SG")]
  Sg3,
  #[serde(rename = "2SG")]
  Sg2,
  #[serde(rename = "1SG")]
  Sg1,
  #[serde(rename = "SSG")]
  Ssg,
  #[serde(rename = "MSG")]
  Msg,
  #[serde(rename = "3WO")]
  Wo3,
  #[serde(rename = "2WO")]
  Wo2,
  #[serde(rename = "1WO")]
  Wo1,
  #[serde(rename = "MWO")]
  Mwo,
  #[serde(rename = "SWO")]
  Swo,
  #[serde(rename = "2LT")]
  Lt2,
  #[serde(rename = "LTA")]
  Lta,
  #[serde(rename = "CPT")]
  Cpt,
  #[serde(rename = "MAJ")]
  Maj,
  #[serde(rename = "LTC")]
  Ltc,
  #[serde(rename = "SLTC")]
  Sltc,
  #[serde(rename = "COL")]
  Col,
}

impl Rank {
  /// All ranks in ascending order of seniority.
  pub const ALL: [Rank; 22] = [
    Rank::Rec,
    Rank::Pte,
    Rank::Lcp,
    Rank::Cpl,
    Rank::Cfc,
    Rank::Sg3,
    Rank::Sg2,
    Rank::Sg1,
    Rank::Ssg,
    Rank::Msg,
    Rank::Wo3,
    Rank::Wo2,
    Rank::Wo1,
    Rank::Mwo,
    Rank::Swo,
    Rank::Lt2,
    Rank::Lta,
    Rank::Cpt,
    Rank::Maj,
    Rank::Ltc,
    Rank::Sltc,
    Rank::Col,
  ];

  /// The code string stored in the database and shown on the parade state.
  pub fn code(self) -> &'static str {
    match self {
      Rank::Rec => "REC",
      Rank::Pte => "PTE",
      Rank::Lcp => "LCP",
      Rank::Cpl => "CPL",
      Rank::Cfc => "CFC",
      Rank::Sg3 => "3SG",
      Rank::Sg2 => "2SG",
      Rank::Sg1 => "1SG",
      Rank::Ssg => "SSG",
      Rank::Msg => "MSG",
      Rank::Wo3 => "3WO",
      Rank::Wo2 => "2WO",
      Rank::Wo1 => "1WO",
      Rank::Mwo => "MWO",
      Rank::Swo => "SWO",
      Rank::Lt2 => "2LT",
      Rank::Lta => "LTA",
      Rank::Cpt => "CPT",
      Rank::Maj => "MAJ",
      Rank::Ltc => "LTC",
      Rank::Sltc => "SLTC",
      Rank::Col => "COL",
    }
  }

  pub fn from_code(code: &str) -> Option<Self> {
    Self::ALL.iter().copied().find(|r| r.code() == code)
  }
}

impl std::fmt::Display for Rank {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.code())
  }
}

// ─── HalfDays ────────────────────────────────────────────────────────────────

/// An off-balance amount, counted exactly in half-day units.
///
/// Stored and computed as an integer number of halves so that 0.5-step
/// arithmetic is exact; serialised to JSON as a number of days (`1.5`).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct HalfDays(u32);

impl HalfDays {
  pub const ZERO: HalfDays = HalfDays(0);

  pub const fn from_halves(halves: u32) -> Self { Self(halves) }

  pub const fn halves(self) -> u32 { self.0 }

  /// Parse a day count such as `1.5`. Returns `None` unless the value is a
  /// non-negative multiple of 0.5.
  pub fn from_days(days: f64) -> Option<Self> {
    if !days.is_finite() || days < 0.0 {
      return None;
    }
    let halves = days * 2.0;
    if halves.fract() != 0.0 || halves > u32::MAX as f64 {
      return None;
    }
    Some(Self(halves as u32))
  }

  pub fn as_days(self) -> f64 { f64::from(self.0) / 2.0 }

  pub fn checked_sub(self, rhs: Self) -> Option<Self> {
    self.0.checked_sub(rhs.0).map(Self)
  }

  pub fn saturating_add(self, rhs: Self) -> Self {
    Self(self.0.saturating_add(rhs.0))
  }
}

impl std::fmt::Display for HalfDays {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if self.0 % 2 == 0 {
      write!(f, "{}", self.0 / 2)
    } else {
      write!(f, "{}.5", self.0 / 2)
    }
  }
}

impl Serialize for HalfDays {
  fn serialize<S: serde::Serializer>(
    &self,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.as_days())
  }
}

impl<'de> Deserialize<'de> for HalfDays {
  fn deserialize<D: serde::Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    let days = f64::deserialize(deserializer)?;
    HalfDays::from_days(days).ok_or_else(|| {
      serde::de::Error::custom(format!(
        "balance must be a non-negative multiple of 0.5, got {days}"
      ))
    })
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A roster entry. `registered_at` is set once at creation and never mutated;
/// the balances are mutated only by the balance accounting rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
  pub id:            PersonId,
  pub rank:          Rank,
  /// Free text, upper-cased at registration.
  pub name:          String,
  /// Remaining off-credits, in half-day units.
  pub off_balance:   HalfDays,
  /// Remaining leave entitlement, in whole weekdays. Never negative.
  pub leave_balance: u32,
  pub registered_at: DateTime<Utc>,
}

/// Input to [`crate::store::ParadeStore::register`].
/// `registered_at` is always set by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
  pub id:            PersonId,
  pub rank:          Rank,
  pub name:          String,
  #[serde(default)]
  pub off_balance:   HalfDays,
  #[serde(default)]
  pub leave_balance: u32,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rank_codes_roundtrip() {
    for rank in Rank::ALL {
      assert_eq!(Rank::from_code(rank.code()), Some(rank));
    }
    assert_eq!(Rank::from_code("GEN"), None);
  }

  #[test]
  fn rank_ordering_follows_declaration() {
    assert!(Rank::Rec < Rank::Pte);
    assert!(Rank::Ssg < Rank::Lt2);
    assert!(Rank::Sltc < Rank::Col);
  }

  #[test]
  fn half_days_from_days() {
    assert_eq!(HalfDays::from_days(0.0), Some(HalfDays::from_halves(0)));
    assert_eq!(HalfDays::from_days(1.5), Some(HalfDays::from_halves(3)));
    assert_eq!(HalfDays::from_days(-0.5), None);
    assert_eq!(HalfDays::from_days(0.3), None);
    assert_eq!(HalfDays::from_days(f64::NAN), None);
  }

  #[test]
  fn half_days_display() {
    assert_eq!(HalfDays::from_halves(0).to_string(), "0");
    assert_eq!(HalfDays::from_halves(3).to_string(), "1.5");
    assert_eq!(HalfDays::from_halves(4).to_string(), "2");
  }
}

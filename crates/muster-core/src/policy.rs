//! Credit policy for duty accrual.
//!
//! The per-day-type amounts are carried from the source system as fixed
//! constants with no stated derivation, so they are modelled as data with
//! defaults rather than hard-coded law. The policy is loaded once at process
//! start and passed explicitly into the store constructor — never referenced
//! as an ambient global.

use serde::{Deserialize, Serialize};

use crate::{person::HalfDays, record::DayType};

/// Off-balance credit earned per reported duty, by day type. Weekend duty is
/// compensated more heavily than Friday duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutyCreditPolicy {
  pub friday:   HalfDays,
  pub saturday: HalfDays,
  pub sunday:   HalfDays,
}

impl Default for DutyCreditPolicy {
  fn default() -> Self {
    Self {
      friday:   HalfDays::from_halves(1), // 0.5 days
      saturday: HalfDays::from_halves(3), // 1.5 days
      sunday:   HalfDays::from_halves(2), // 1.0 day
    }
  }
}

impl DutyCreditPolicy {
  pub fn credit(&self, day_type: DayType) -> HalfDays {
    match day_type {
      DayType::Friday => self.friday,
      DayType::Saturday => self.saturday,
      DayType::Sunday => self.sunday,
    }
  }
}

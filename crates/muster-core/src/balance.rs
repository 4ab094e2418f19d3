//! Balance accounting rules: check-then-debit for both entitlements,
//! unconditional credit. These are pure; the store applies the returned
//! values inside the operation's transaction so the read-check-write
//! sequence cannot interleave.

use crate::{
  error::{BalanceField, Error, Result},
  person::HalfDays,
};

/// Debit the off-balance. Fails with `InsufficientBalance` before any
/// mutation would happen.
pub fn debit_off(available: HalfDays, amount: HalfDays) -> Result<HalfDays> {
  available
    .checked_sub(amount)
    .ok_or(Error::InsufficientBalance {
      field:     BalanceField::Off,
      requested: amount.as_days(),
      available: available.as_days(),
    })
}

/// Credit the off-balance. Always succeeds.
pub fn credit_off(available: HalfDays, amount: HalfDays) -> HalfDays {
  available.saturating_add(amount)
}

/// Debit the leave balance by a weekday count. Fails with
/// `InsufficientBalance` rather than going negative.
pub fn debit_leave(available: u32, weekdays: u32) -> Result<u32> {
  available
    .checked_sub(weekdays)
    .ok_or(Error::InsufficientBalance {
      field:     BalanceField::Leave,
      requested: f64::from(weekdays),
      available: f64::from(available),
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn debit_off_within_balance() {
    let remaining =
      debit_off(HalfDays::from_halves(3), HalfDays::from_halves(2)).unwrap();
    assert_eq!(remaining, HalfDays::from_halves(1));
  }

  #[test]
  fn debit_off_to_exactly_zero() {
    let remaining =
      debit_off(HalfDays::from_halves(2), HalfDays::from_halves(2)).unwrap();
    assert_eq!(remaining, HalfDays::ZERO);
  }

  #[test]
  fn debit_off_overdraw_fails() {
    let err = debit_off(HalfDays::from_halves(1), HalfDays::from_halves(2))
      .unwrap_err();
    assert!(matches!(
      err,
      Error::InsufficientBalance { field: BalanceField::Off, .. }
    ));
  }

  #[test]
  fn debit_leave_overdraw_fails() {
    assert_eq!(debit_leave(5, 5).unwrap(), 0);
    let err = debit_leave(5, 6).unwrap_err();
    assert!(matches!(
      err,
      Error::InsufficientBalance { field: BalanceField::Leave, .. }
    ));
  }

  #[test]
  fn credit_off_accumulates() {
    let balance = credit_off(HalfDays::ZERO, HalfDays::from_halves(3));
    assert_eq!(balance, HalfDays::from_halves(3));
  }
}

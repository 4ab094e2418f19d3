//! Pure date utilities: weekday classification, inclusive range arithmetic,
//! and duty-date validation. No state, no clock — "today" is always an
//! argument.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::{
  error::{Error, Result},
  record::DayType,
};

/// How far ahead a duty date may be reported. Restricts data entry to
/// plausible, near-term dates and prevents backdating.
pub const DUTY_LOOKAHEAD_DAYS: u64 = 14;

/// Closed-interval overlap: a shared boundary day counts as an overlap.
pub fn overlaps(
  a_start: NaiveDate,
  a_end: NaiveDate,
  b_start: NaiveDate,
  b_end: NaiveDate,
) -> bool {
  a_start <= b_end && a_end >= b_start
}

/// Monday through Friday. Leave entitlement is consumed only for these;
/// weekend days inside a leave span are free.
pub fn is_weekday(date: NaiveDate) -> bool {
  !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count the weekdays in `[start, end]` inclusive. Zero when `end < start`.
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> u32 {
  start
    .iter_days()
    .take_while(|d| *d <= end)
    .filter(|d| is_weekday(*d))
    .count() as u32
}

/// Validate a proposed absence range: neither date in the past, end not
/// before start.
pub fn validate_range(
  start: NaiveDate,
  end: NaiveDate,
  today: NaiveDate,
) -> Result<()> {
  if start < today {
    return Err(Error::PastDate(start));
  }
  if end < start {
    return Err(Error::EndBeforeStart { start, end });
  }
  Ok(())
}

/// Validate a proposed duty date: not in the past, within the lookahead
/// window, and falling on the weekday the day type claims.
pub fn validate_duty_date(
  duty_date: NaiveDate,
  day_type: DayType,
  today: NaiveDate,
) -> Result<()> {
  if duty_date < today {
    return Err(Error::PastDate(duty_date));
  }
  let horizon = today
    .checked_add_days(Days::new(DUTY_LOOKAHEAD_DAYS))
    .unwrap_or(NaiveDate::MAX);
  if duty_date > horizon {
    return Err(Error::InvalidDate(format!(
      "{duty_date} is more than {DUTY_LOOKAHEAD_DAYS} days ahead"
    )));
  }
  if duty_date.weekday() != day_type.weekday() {
    return Err(Error::InvalidDate(format!(
      "{duty_date} is not a {day_type}"
    )));
  }
  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn day(week: u32, weekday: Weekday) -> NaiveDate {
    NaiveDate::from_isoywd_opt(2026, week, weekday).unwrap()
  }

  #[test]
  fn overlap_is_inclusive_on_boundaries() {
    let mon = day(10, Weekday::Mon);
    let wed = day(10, Weekday::Wed);
    let fri = day(10, Weekday::Fri);

    assert!(overlaps(mon, wed, wed, fri)); // shared boundary day
    assert!(overlaps(mon, fri, wed, wed)); // contained single day
    assert!(!overlaps(mon, wed, day(10, Weekday::Thu), fri));
  }

  #[test]
  fn weekday_count_mon_to_fri_is_five() {
    let count = weekdays_between(day(12, Weekday::Mon), day(12, Weekday::Fri));
    assert_eq!(count, 5);
  }

  #[test]
  fn weekday_count_mon_to_next_mon_is_six() {
    // Eight calendar days, but the weekend inside the span is free.
    let count = weekdays_between(day(12, Weekday::Mon), day(13, Weekday::Mon));
    assert_eq!(count, 6);
  }

  #[test]
  fn weekday_count_weekend_only_is_zero() {
    let count = weekdays_between(day(12, Weekday::Sat), day(12, Weekday::Sun));
    assert_eq!(count, 0);
  }

  #[test]
  fn weekday_count_empty_range_is_zero() {
    let count = weekdays_between(day(12, Weekday::Fri), day(12, Weekday::Mon));
    assert_eq!(count, 0);
  }

  #[test]
  fn range_rejects_past_start() {
    let today = day(12, Weekday::Wed);
    let err =
      validate_range(day(12, Weekday::Mon), day(12, Weekday::Fri), today)
        .unwrap_err();
    assert!(matches!(err, Error::PastDate(_)));
  }

  #[test]
  fn range_rejects_end_before_start() {
    let today = day(12, Weekday::Mon);
    let err =
      validate_range(day(12, Weekday::Fri), day(12, Weekday::Mon), today)
        .unwrap_err();
    assert!(matches!(err, Error::EndBeforeStart { .. }));
  }

  #[test]
  fn duty_date_must_match_day_type() {
    let today = day(12, Weekday::Mon);
    let sat = day(12, Weekday::Sat);

    assert!(validate_duty_date(sat, DayType::Saturday, today).is_ok());
    let err = validate_duty_date(sat, DayType::Friday, today).unwrap_err();
    assert!(matches!(err, Error::InvalidDate(_)));
  }

  #[test]
  fn duty_date_rejects_backdating_and_far_future() {
    let today = day(12, Weekday::Mon);

    let last_fri = day(11, Weekday::Fri);
    let err = validate_duty_date(last_fri, DayType::Friday, today).unwrap_err();
    assert!(matches!(err, Error::PastDate(_)));

    let far_fri = day(16, Weekday::Fri); // > 14 days ahead
    let err = validate_duty_date(far_fri, DayType::Friday, today).unwrap_err();
    assert!(matches!(err, Error::InvalidDate(_)));
  }
}

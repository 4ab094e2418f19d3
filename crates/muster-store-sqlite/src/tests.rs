//! Integration tests for `SqliteStore` against an in-memory database.
//!
//! All booking dates are derived from today's date so the past-date guards
//! see them as upcoming.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};
use muster_core::{
  Error,
  person::{HalfDays, NewPerson, PersonId, Rank},
  policy::DutyCreditPolicy,
  record::DayType,
  status::{Availability, OffType},
  store::ParadeStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory(DutyCreditPolicy::default())
    .await
    .expect("in-memory store")
}

fn today() -> NaiveDate { Local::now().date_naive() }

fn days_ahead(n: u64) -> NaiveDate {
  today().checked_add_days(Days::new(n)).unwrap()
}

/// The first `weekday` strictly after today.
fn next(weekday: Weekday) -> NaiveDate {
  let mut date = days_ahead(1);
  while date.weekday() != weekday {
    date = date.succ_opt().unwrap();
  }
  date
}

fn recruit(id: i64) -> NewPerson {
  NewPerson {
    id:            PersonId(id),
    rank:          Rank::Pte,
    name:          "alice tan".into(),
    off_balance:   HalfDays::from_halves(4), // 2.0 days
    leave_balance: 10,
  }
}

async fn off_balance_of(s: &SqliteStore, id: PersonId) -> HalfDays {
  let entries = s.list_all().await.unwrap();
  entries
    .iter()
    .find(|e| e.person.id == id)
    .expect("person listed")
    .person
    .off_balance
}

async fn leave_balance_of(s: &SqliteStore, id: PersonId) -> u32 {
  let entries = s.list_all().await.unwrap();
  entries
    .iter()
    .find(|e| e.person.id == id)
    .expect("person listed")
    .person
    .leave_balance
}

// ─── Registration ────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_sets_present_and_uppercases_name() {
  let s = store().await;

  let person = s.register(recruit(1)).await.unwrap();
  assert_eq!(person.name, "ALICE TAN");
  assert_eq!(person.off_balance, HalfDays::from_halves(4));

  let status = s.get_status(person.id).await.unwrap();
  assert_eq!(status.availability, Availability::Present);
}

#[tokio::test]
async fn register_duplicate_id_errors() {
  let s = store().await;
  s.register(recruit(1)).await.unwrap();

  let err = s.register(recruit(1)).await.unwrap_err();
  assert!(matches!(err, Error::AlreadyRegistered(PersonId(1))));
}

#[tokio::test]
async fn operations_on_unknown_person_error() {
  let s = store().await;
  let ghost = PersonId(404);

  let err = s.get_status(ghost).await.unwrap_err();
  assert!(matches!(err, Error::NotRegistered(PersonId(404))));

  let err = s.mark_present(ghost).await.unwrap_err();
  assert!(matches!(err, Error::NotRegistered(_)));

  let err = s
    .mark_off(ghost, days_ahead(1), OffType::Am)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotRegistered(_)));
}

// ─── Marking OFF ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_off_debits_and_reflects_in_status() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  let date = days_ahead(2);

  let receipt = s.mark_off(id, date, OffType::Full).await.unwrap();
  assert_eq!(receipt.remaining, HalfDays::from_halves(2));

  let status = s.get_status(id).await.unwrap();
  assert_eq!(
    status.availability,
    Availability::Off { date, off_type: OffType::Full }
  );
}

#[tokio::test]
async fn mark_off_same_day_conflicts_and_leaves_balance_unchanged() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  let date = days_ahead(2);

  s.mark_off(id, date, OffType::Am).await.unwrap();
  let before = off_balance_of(&s, id).await;

  let err = s.mark_off(id, date, OffType::Pm).await.unwrap_err();
  assert!(matches!(err, Error::DateConflict(_)));
  assert_eq!(off_balance_of(&s, id).await, before);
}

#[tokio::test]
async fn mark_off_insufficient_balance() {
  let s = store().await;
  let mut input = recruit(1);
  input.off_balance = HalfDays::from_halves(2); // exactly 1.0 day
  let id = s.register(input).await.unwrap().id;

  let receipt = s
    .mark_off(id, days_ahead(1), OffType::Full)
    .await
    .unwrap();
  assert_eq!(receipt.remaining, HalfDays::ZERO);

  let err = s
    .mark_off(id, days_ahead(3), OffType::Am)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InsufficientBalance { .. }));
  assert_eq!(off_balance_of(&s, id).await, HalfDays::ZERO);
}

#[tokio::test]
async fn mark_off_rejects_past_date() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  let yesterday = today().pred_opt().unwrap();

  let err = s.mark_off(id, yesterday, OffType::Am).await.unwrap_err();
  assert!(matches!(err, Error::PastDate(_)));
}

// ─── Booking LEAVE ───────────────────────────────────────────────────────────

#[tokio::test]
async fn leave_monday_to_next_monday_debits_six_weekdays() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  let start = next(Weekday::Mon);
  let end = start.checked_add_days(Days::new(7)).unwrap(); // the next Monday

  let receipt = s.mark_leave(id, start, end).await.unwrap();
  assert_eq!(receipt.weekdays_charged, 6); // never 8
  assert_eq!(receipt.remaining, 4);

  let status = s.get_status(id).await.unwrap();
  assert_eq!(status.availability, Availability::Leave { start, end });
}

#[tokio::test]
async fn leave_exhausts_balance_then_rejects_one_more_weekday() {
  let s = store().await;
  let mut input = recruit(1);
  input.leave_balance = 5;
  let id = s.register(input).await.unwrap().id;

  let start = next(Weekday::Mon);
  let end = start.checked_add_days(Days::new(4)).unwrap(); // Mon..Fri
  let receipt = s.mark_leave(id, start, end).await.unwrap();
  assert_eq!(receipt.weekdays_charged, 5);
  assert_eq!(receipt.remaining, 0);

  let lone_monday = start.checked_add_days(Days::new(7)).unwrap();
  let err = s.mark_leave(id, lone_monday, lone_monday).await.unwrap_err();
  assert!(matches!(err, Error::InsufficientBalance { .. }));
  assert_eq!(leave_balance_of(&s, id).await, 0);
}

#[tokio::test]
async fn leave_shared_boundary_day_conflicts() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  let mon = next(Weekday::Mon);
  let wed = mon.checked_add_days(Days::new(2)).unwrap();
  let fri = mon.checked_add_days(Days::new(4)).unwrap();

  s.mark_leave(id, mon, wed).await.unwrap();
  let before = leave_balance_of(&s, id).await;

  let err = s.mark_leave(id, wed, fri).await.unwrap_err();
  assert!(matches!(err, Error::DateConflict(_)));
  assert_eq!(leave_balance_of(&s, id).await, before);
}

#[tokio::test]
async fn leave_over_existing_off_day_conflicts() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  let fri = next(Weekday::Fri);
  s.mark_off(id, fri, OffType::Full).await.unwrap();

  // A leave span starting on the OFF day overlaps it.
  let err = s
    .mark_leave(id, fri, fri.checked_add_days(Days::new(3)).unwrap())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::DateConflict(_)));
}

#[tokio::test]
async fn leave_rejects_end_before_start() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  let err = s
    .mark_leave(id, days_ahead(5), days_ahead(3))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::EndBeforeStart { .. }));
}

#[tokio::test]
async fn leave_rejects_past_start() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  let yesterday = today().pred_opt().unwrap();

  let err = s.mark_leave(id, yesterday, days_ahead(3)).await.unwrap_err();
  assert!(matches!(err, Error::PastDate(_)));
}

// ─── Marking PRESENT ─────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_present_clears_absence_without_refund() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  s.mark_off(id, days_ahead(1), OffType::Full).await.unwrap();
  let status = s.mark_present(id).await.unwrap();
  assert_eq!(status.availability, Availability::Present);

  // No balance effect: the OFF debit stands.
  assert_eq!(off_balance_of(&s, id).await, HalfDays::from_halves(2));
}

// ─── Duty accrual ────────────────────────────────────────────────────────────

#[tokio::test]
async fn duty_credits_once_and_rejects_duplicate() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  let sat = next(Weekday::Sat);

  let receipt = s.record_duty(id, DayType::Saturday, sat).await.unwrap();
  assert_eq!(receipt.new_balance, HalfDays::from_halves(4 + 3));
  assert_eq!(receipt.record.credited, HalfDays::from_halves(3));

  let err = s.record_duty(id, DayType::Saturday, sat).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateDuty { .. }));

  // Exactly one credit applied.
  assert_eq!(off_balance_of(&s, id).await, HalfDays::from_halves(7));
}

#[tokio::test]
async fn duty_credit_table_by_day_type() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  let fri = s
    .record_duty(id, DayType::Friday, next(Weekday::Fri))
    .await
    .unwrap();
  assert_eq!(fri.record.credited.as_days(), 0.5);

  let sun = s
    .record_duty(id, DayType::Sunday, next(Weekday::Sun))
    .await
    .unwrap();
  assert_eq!(sun.record.credited.as_days(), 1.0);
}

#[tokio::test]
async fn duty_rejects_mismatched_weekday() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  let err = s
    .record_duty(id, DayType::Friday, next(Weekday::Sat))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidDate(_)));
  assert_eq!(off_balance_of(&s, id).await, HalfDays::from_halves(4));
}

// ─── Parade state ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_all_sorts_by_rank_then_name() {
  let s = store().await;

  let mut colonel = recruit(1);
  colonel.rank = Rank::Col;
  colonel.name = "tan".into();
  let mut private = recruit(2);
  private.rank = Rank::Rec;
  private.name = "lim".into();
  let mut sergeant = recruit(3);
  sergeant.rank = Rank::Ssg;
  sergeant.name = "ong".into();

  s.register(colonel).await.unwrap();
  s.register(private).await.unwrap();
  s.register(sergeant).await.unwrap();

  let entries = s.list_all().await.unwrap();
  let ranks: Vec<Rank> = entries.iter().map(|e| e.person.rank).collect();
  assert_eq!(ranks, vec![Rank::Rec, Rank::Ssg, Rank::Col]);
  assert!(entries.iter().all(|e| e.availability.is_present()));
}

// ─── Daily rollback ──────────────────────────────────────────────────────────

#[tokio::test]
async fn rollback_reverts_off_and_is_idempotent() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  s.mark_off(id, today(), OffType::Am).await.unwrap();

  let report = s.run_daily_rollback().await.unwrap();
  assert_eq!(report.reverted_off, 1);
  assert_eq!(
    s.get_status(id).await.unwrap().availability,
    Availability::Present
  );

  // Second run on the same day finds nothing left to change.
  let again = s.run_daily_rollback().await.unwrap();
  assert_eq!(again.total_reverted(), 0);
}

#[tokio::test]
async fn rollback_keeps_leave_spanning_through_today() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  s.mark_leave(id, today(), days_ahead(3)).await.unwrap();

  let report = s.run_daily_rollback().await.unwrap();
  assert_eq!(report.reverted_leave, 0);
  assert!(matches!(
    s.get_status(id).await.unwrap().availability,
    Availability::Leave { .. }
  ));
}

#[tokio::test]
async fn rollback_reverts_expired_leave() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;

  // Backdate a LEAVE status directly to simulate a span that ended before
  // today; the public API refuses to book one in the past.
  let start = today().checked_sub_days(Days::new(5)).unwrap();
  let end = today().pred_opt().unwrap();
  s.conn
    .call(move |conn| {
      conn.execute(
        "UPDATE status
         SET state = 'LEAVE', start_date = ?1, end_date = ?2
         WHERE person_id = ?3",
        rusqlite::params![
          start.format("%Y-%m-%d").to_string(),
          end.format("%Y-%m-%d").to_string(),
          id.0,
        ],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let report = s.run_daily_rollback().await.unwrap();
  assert_eq!(report.reverted_leave, 1);
  assert_eq!(
    s.get_status(id).await.unwrap().availability,
    Availability::Present
  );

  // Balances were debited at booking time; the sweep leaves them alone.
  assert_eq!(off_balance_of(&s, id).await, HalfDays::from_halves(4));
  assert_eq!(leave_balance_of(&s, id).await, 10);
}

// ─── Full reset ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_reset_clears_the_ledger() {
  let s = store().await;
  let id = s.register(recruit(1)).await.unwrap().id;
  s.mark_leave(id, next(Weekday::Mon), next(Weekday::Mon))
    .await
    .unwrap();
  s.record_duty(id, DayType::Sunday, next(Weekday::Sun))
    .await
    .unwrap();

  s.full_reset().await.unwrap();

  assert!(s.list_all().await.unwrap().is_empty());
  let err = s.get_status(id).await.unwrap_err();
  assert!(matches!(err, Error::NotRegistered(_)));

  // The id can be registered again from scratch.
  s.register(recruit(1)).await.unwrap();
}

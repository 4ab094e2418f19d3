//! [`SqliteStore`] — the SQLite implementation of [`ParadeStore`].

use std::path::Path;

use chrono::{Local, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension as _, params};

use muster_core::{
  Error, Result, balance, calendar,
  conflict::{self, Conflict, ConflictSource},
  person::{HalfDays, NewPerson, Person, PersonId},
  policy::DutyCreditPolicy,
  record::{DayType, DutyRecord, LeaveRecord},
  status::{Availability, OffType, StatusRecord},
  store::{
    DutyReceipt, LeaveReceipt, OffReceipt, ParadeEntry, ParadeStore,
    RollbackReport,
  },
};

use crate::{
  encode::{RawPerson, RawStatus, encode_availability, encode_date, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A parade-state ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run on one dedicated database thread, so compound operations are fully
/// serialised; each additionally runs inside one SQLite transaction so a
/// failed precondition leaves no partial effect.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  policy:          DutyCreditPolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(
    path: impl AsRef<Path>,
    policy: DutyCreditPolicy,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|e| Error::Storage(e.to_string()))?;
    let store = Self { conn, policy };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory(policy: DutyCreditPolicy) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory()
      .await
      .map_err(|e| Error::Storage(e.to_string()))?;
    let store = Self { conn, policy };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.execute_batch(SCHEMA).map_err(db)?;
        Ok(())
      })
      .await
  }

  /// Run `f` on the database thread. Domain errors pass through; driver
  /// errors fold into [`Error::Storage`].
  async fn call<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    self
      .conn
      .call(move |conn| Ok(f(conn)))
      .await
      .map_err(|e| Error::Storage(e.to_string()))?
  }
}

fn db(e: rusqlite::Error) -> Error { Error::Storage(e.to_string()) }

/// The current local calendar date. The rollback and all past-date checks
/// compare against this at call time.
fn today() -> NaiveDate { Local::now().date_naive() }

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn fetch_person(conn: &Connection, id: PersonId) -> Result<Option<Person>> {
  let raw = conn
    .query_row(
      "SELECT person_id, rank, name, off_balance, leave_balance, registered_at
       FROM people WHERE person_id = ?1",
      params![id.0],
      |row| {
        Ok(RawPerson {
          person_id:     row.get(0)?,
          rank:          row.get(1)?,
          name:          row.get(2)?,
          off_balance:   row.get(3)?,
          leave_balance: row.get(4)?,
          registered_at: row.get(5)?,
        })
      },
    )
    .optional()
    .map_err(db)?;
  raw.map(RawPerson::into_person).transpose()
}

fn require_person(conn: &Connection, id: PersonId) -> Result<Person> {
  fetch_person(conn, id)?.ok_or(Error::NotRegistered(id))
}

fn fetch_status(
  conn: &Connection,
  id: PersonId,
) -> Result<Option<StatusRecord>> {
  let raw = conn
    .query_row(
      "SELECT person_id, state, start_date, end_date, off_type, updated_at
       FROM status WHERE person_id = ?1",
      params![id.0],
      |row| {
        Ok(RawStatus {
          person_id:  row.get(0)?,
          state:      row.get(1)?,
          start_date: row.get(2)?,
          end_date:   row.get(3)?,
          off_type:   row.get(4)?,
          updated_at: row.get(5)?,
        })
      },
    )
    .optional()
    .map_err(db)?;
  raw.map(RawStatus::into_status).transpose()
}

/// Overwrite the person's live status row.
fn write_status(
  conn: &Connection,
  id: PersonId,
  availability: Availability,
) -> Result<StatusRecord> {
  let updated_at = Utc::now();
  let (state, start, end, off_type) = encode_availability(&availability);
  conn
    .execute(
      "INSERT OR REPLACE INTO status
         (person_id, state, start_date, end_date, off_type, updated_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      params![id.0, state, start, end, off_type, encode_dt(updated_at)],
    )
    .map_err(db)?;
  Ok(StatusRecord { person_id: id, availability, updated_at })
}

fn set_off_balance(
  conn: &Connection,
  id: PersonId,
  balance: HalfDays,
) -> Result<()> {
  conn
    .execute(
      "UPDATE people SET off_balance = ?2 WHERE person_id = ?1",
      params![id.0, balance.halves() as i64],
    )
    .map_err(db)?;
  Ok(())
}

fn set_leave_balance(
  conn: &Connection,
  id: PersonId,
  balance: u32,
) -> Result<()> {
  conn
    .execute(
      "UPDATE people SET leave_balance = ?2 WHERE person_id = ?1",
      params![id.0, i64::from(balance)],
    )
    .map_err(db)?;
  Ok(())
}

/// Existing bookings the conflict checker scans: all leave records in
/// ascending id order, then the current OFF mark (if any). The order is
/// deterministic for a fixed store state.
fn conflict_candidates(
  conn: &Connection,
  id: PersonId,
) -> Result<Vec<Conflict>> {
  let mut stmt = conn
    .prepare(
      "SELECT leave_id, start_date, end_date FROM leaves
       WHERE person_id = ?1 ORDER BY leave_id ASC",
    )
    .map_err(db)?;
  let rows: Vec<(i64, String, String)> = stmt
    .query_map(params![id.0], |row| {
      Ok((row.get(0)?, row.get(1)?, row.get(2)?))
    })
    .map_err(db)?
    .collect::<rusqlite::Result<_>>()
    .map_err(db)?;

  let mut candidates = Vec::with_capacity(rows.len() + 1);
  for (leave_id, start, end) in rows {
    candidates.push(Conflict {
      source: ConflictSource::Leave { leave_id },
      start:  crate::encode::decode_date(&start)?,
      end:    crate::encode::decode_date(&end)?,
    });
  }

  if let Some(status) = fetch_status(conn, id)?
    && let Availability::Off { date, off_type } = status.availability
  {
    candidates.push(Conflict {
      source: ConflictSource::Off { off_type },
      start:  date,
      end:    date,
    });
  }

  Ok(candidates)
}

// ─── ParadeStore impl ────────────────────────────────────────────────────────

impl ParadeStore for SqliteStore {
  async fn register(&self, input: NewPerson) -> Result<Person> {
    self
      .call(move |conn| {
        let tx = conn.transaction().map_err(db)?;

        if fetch_person(&tx, input.id)?.is_some() {
          return Err(Error::AlreadyRegistered(input.id));
        }

        let person = Person {
          id:            input.id,
          rank:          input.rank,
          name:          input.name.to_uppercase(),
          off_balance:   input.off_balance,
          leave_balance: input.leave_balance,
          registered_at: Utc::now(),
        };

        tx.execute(
          "INSERT INTO people
             (person_id, rank, name, off_balance, leave_balance, registered_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params![
            person.id.0,
            person.rank.code(),
            person.name,
            person.off_balance.halves() as i64,
            i64::from(person.leave_balance),
            encode_dt(person.registered_at),
          ],
        )
        .map_err(db)?;

        write_status(&tx, person.id, Availability::Present)?;

        tx.commit().map_err(db)?;
        Ok(person)
      })
      .await
  }

  async fn mark_present(&self, id: PersonId) -> Result<StatusRecord> {
    self
      .call(move |conn| {
        let tx = conn.transaction().map_err(db)?;
        require_person(&tx, id)?;
        let status = write_status(&tx, id, Availability::Present)?;
        tx.commit().map_err(db)?;
        Ok(status)
      })
      .await
  }

  async fn mark_off(
    &self,
    id: PersonId,
    date: NaiveDate,
    off_type: OffType,
  ) -> Result<OffReceipt> {
    let today = today();
    if date < today {
      return Err(Error::PastDate(date));
    }
    let amount = off_type.credit();

    self
      .call(move |conn| {
        let tx = conn.transaction().map_err(db)?;

        let person = require_person(&tx, id)?;
        let remaining = balance::debit_off(person.off_balance, amount)?;

        let candidates = conflict_candidates(&tx, id)?;
        if let Some(hit) = conflict::first_overlap(date, date, &candidates) {
          return Err(Error::DateConflict(hit));
        }

        set_off_balance(&tx, id, remaining)?;
        let status =
          write_status(&tx, id, Availability::Off { date, off_type })?;

        tx.commit().map_err(db)?;
        Ok(OffReceipt { status, remaining })
      })
      .await
  }

  async fn mark_leave(
    &self,
    id: PersonId,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<LeaveReceipt> {
    calendar::validate_range(start, end, today())?;

    self
      .call(move |conn| {
        let tx = conn.transaction().map_err(db)?;

        let person = require_person(&tx, id)?;

        let candidates = conflict_candidates(&tx, id)?;
        if let Some(hit) = conflict::first_overlap(start, end, &candidates) {
          return Err(Error::DateConflict(hit));
        }

        let weekdays = calendar::weekdays_between(start, end);
        let remaining = balance::debit_leave(person.leave_balance, weekdays)?;

        set_leave_balance(&tx, id, remaining)?;

        let created_at = Utc::now();
        tx.execute(
          "INSERT INTO leaves (person_id, start_date, end_date, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          params![
            id.0,
            encode_date(start),
            encode_date(end),
            encode_dt(created_at),
          ],
        )
        .map_err(db)?;
        let record = LeaveRecord {
          id: tx.last_insert_rowid(),
          person_id: id,
          start_date: start,
          end_date: end,
          created_at,
        };

        let status = write_status(&tx, id, Availability::Leave { start, end })?;

        tx.commit().map_err(db)?;
        Ok(LeaveReceipt {
          record,
          status,
          weekdays_charged: weekdays,
          remaining,
        })
      })
      .await
  }

  async fn record_duty(
    &self,
    id: PersonId,
    day_type: DayType,
    duty_date: NaiveDate,
  ) -> Result<DutyReceipt> {
    calendar::validate_duty_date(duty_date, day_type, today())?;
    let amount = self.policy.credit(day_type);

    self
      .call(move |conn| {
        let tx = conn.transaction().map_err(db)?;

        let person = require_person(&tx, id)?;

        let duplicate: Option<i64> = tx
          .query_row(
            "SELECT duty_id FROM duties WHERE person_id = ?1 AND duty_date = ?2",
            params![id.0, encode_date(duty_date)],
            |row| row.get(0),
          )
          .optional()
          .map_err(db)?;
        if duplicate.is_some() {
          return Err(Error::DuplicateDuty { person: id, date: duty_date });
        }

        let new_balance = balance::credit_off(person.off_balance, amount);
        set_off_balance(&tx, id, new_balance)?;

        let created_at = Utc::now();
        tx.execute(
          "INSERT INTO duties
             (person_id, duty_date, day_type, credited, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          params![
            id.0,
            encode_date(duty_date),
            day_type.code(),
            amount.halves() as i64,
            encode_dt(created_at),
          ],
        )
        .map_err(db)?;
        let record = DutyRecord {
          id: tx.last_insert_rowid(),
          person_id: id,
          duty_date,
          day_type,
          credited: amount,
          created_at,
        };

        tx.commit().map_err(db)?;
        Ok(DutyReceipt { record, new_balance })
      })
      .await
  }

  async fn get_status(&self, id: PersonId) -> Result<StatusRecord> {
    self
      .call(move |conn| {
        let person = require_person(conn, id)?;
        match fetch_status(conn, id)? {
          Some(status) => Ok(status),
          // Registration always writes a status row, but a missing one still
          // reads as the default PRESENT.
          None => Ok(StatusRecord {
            person_id:    id,
            availability: Availability::Present,
            updated_at:   person.registered_at,
          }),
        }
      })
      .await
  }

  async fn list_all(&self) -> Result<Vec<ParadeEntry>> {
    self
      .call(|conn| {
        let mut stmt = conn
          .prepare(
            "SELECT p.person_id, p.rank, p.name, p.off_balance,
                    p.leave_balance, p.registered_at,
                    s.state, s.start_date, s.end_date, s.off_type
             FROM people p
             LEFT JOIN status s ON s.person_id = p.person_id",
          )
          .map_err(db)?;

        type Row = (RawPerson, Option<String>, Option<String>, Option<String>, Option<String>);
        let rows: Vec<Row> = stmt
          .query_map([], |row| {
            Ok((
              RawPerson {
                person_id:     row.get(0)?,
                rank:          row.get(1)?,
                name:          row.get(2)?,
                off_balance:   row.get(3)?,
                leave_balance: row.get(4)?,
                registered_at: row.get(5)?,
              },
              row.get(6)?,
              row.get(7)?,
              row.get(8)?,
              row.get(9)?,
            ))
          })
          .map_err(db)?
          .collect::<rusqlite::Result<_>>()
          .map_err(db)?;

        let mut entries = Vec::with_capacity(rows.len());
        for (raw, state, start, end, off_type) in rows {
          let person = raw.into_person()?;
          let availability = match state {
            Some(code) => crate::encode::decode_availability(
              &code,
              start.as_deref(),
              end.as_deref(),
              off_type.as_deref(),
            )?,
            None => Availability::Present,
          };
          entries.push(ParadeEntry { person, availability });
        }

        entries.sort_by(|a, b| {
          (a.person.rank, &a.person.name, a.person.id)
            .cmp(&(b.person.rank, &b.person.name, b.person.id))
        });
        Ok(entries)
      })
      .await
  }

  async fn run_daily_rollback(&self) -> Result<RollbackReport> {
    let swept_on = today();

    self
      .call(move |conn| {
        let tx = conn.transaction().map_err(db)?;
        let now = encode_dt(Utc::now());

        // An OFF mark is always single-day and expires at the next midnight.
        let reverted_off = tx
          .execute(
            "UPDATE status
             SET state = 'PRESENT', start_date = NULL, end_date = NULL,
                 off_type = NULL, updated_at = ?1
             WHERE state = 'OFF'",
            params![now],
          )
          .map_err(db)? as u64;

        // A LEAVE spanning through today remains LEAVE.
        let reverted_leave = tx
          .execute(
            "UPDATE status
             SET state = 'PRESENT', start_date = NULL, end_date = NULL,
                 off_type = NULL, updated_at = ?1
             WHERE state = 'LEAVE' AND end_date < ?2",
            params![now, encode_date(swept_on)],
          )
          .map_err(db)? as u64;

        tx.commit().map_err(db)?;
        Ok(RollbackReport { swept_on, reverted_off, reverted_leave })
      })
      .await
  }

  async fn full_reset(&self) -> Result<()> {
    self
      .call(|conn| {
        let tx = conn.transaction().map_err(db)?;
        tx.execute("DELETE FROM duties", []).map_err(db)?;
        tx.execute("DELETE FROM leaves", []).map_err(db)?;
        tx.execute("DELETE FROM status", []).map_err(db)?;
        tx.execute("DELETE FROM people", []).map_err(db)?;
        tx.commit().map_err(db)?;
        Ok(())
      })
      .await
  }
}

//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; dates are `YYYY-MM-DD`; enums are their
//! stable code strings. A row that fails to decode is a corrupt store and
//! surfaces as [`Error::Storage`].

use chrono::{DateTime, NaiveDate, Utc};
use muster_core::{
  Error, Result,
  person::{HalfDays, Person, PersonId, Rank},
  status::{Availability, OffType, StatusRecord},
};

// ─── Timestamps and dates ────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Storage(format!("bad timestamp {s:?}: {e}")))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Storage(format!("bad date {s:?}: {e}")))
}

// ─── Enum codes ──────────────────────────────────────────────────────────────

pub fn decode_rank(s: &str) -> Result<Rank> {
  Rank::from_code(s)
    .ok_or_else(|| Error::Storage(format!("unknown rank code: {s:?}")))
}

pub fn decode_off_type(s: &str) -> Result<OffType> {
  OffType::from_code(s)
    .ok_or_else(|| Error::Storage(format!("unknown off type: {s:?}")))
}

fn decode_halves(raw: i64) -> Result<HalfDays> {
  u32::try_from(raw)
    .map(HalfDays::from_halves)
    .map_err(|_| Error::Storage(format!("negative balance in store: {raw}")))
}

/// Split an [`Availability`] into the four status columns.
pub fn encode_availability(
  a: &Availability,
) -> (&'static str, Option<String>, Option<String>, Option<&'static str>) {
  match *a {
    Availability::Present => (a.state_code(), None, None, None),
    Availability::Off { date, off_type } => (
      a.state_code(),
      Some(encode_date(date)),
      Some(encode_date(date)),
      Some(off_type.code()),
    ),
    Availability::Leave { start, end } => (
      a.state_code(),
      Some(encode_date(start)),
      Some(encode_date(end)),
      None,
    ),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `people` row.
pub struct RawPerson {
  pub person_id:     i64,
  pub rank:          String,
  pub name:          String,
  pub off_balance:   i64,
  pub leave_balance: i64,
  pub registered_at: String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:            PersonId(self.person_id),
      rank:          decode_rank(&self.rank)?,
      name:          self.name,
      off_balance:   decode_halves(self.off_balance)?,
      leave_balance: u32::try_from(self.leave_balance).map_err(|_| {
        Error::Storage(format!(
          "negative leave balance in store: {}",
          self.leave_balance
        ))
      })?,
      registered_at: decode_dt(&self.registered_at)?,
    })
  }
}

/// Raw strings read directly from a `status` row.
pub struct RawStatus {
  pub person_id:  i64,
  pub state:      String,
  pub start_date: Option<String>,
  pub end_date:   Option<String>,
  pub off_type:   Option<String>,
  pub updated_at: String,
}

impl RawStatus {
  pub fn into_status(self) -> Result<StatusRecord> {
    let availability = decode_availability(
      &self.state,
      self.start_date.as_deref(),
      self.end_date.as_deref(),
      self.off_type.as_deref(),
    )?;
    Ok(StatusRecord {
      person_id: PersonId(self.person_id),
      availability,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub fn decode_availability(
  state: &str,
  start: Option<&str>,
  end: Option<&str>,
  off_type: Option<&str>,
) -> Result<Availability> {
  match state {
    "PRESENT" => Ok(Availability::Present),
    "OFF" => {
      let date = start
        .ok_or_else(|| Error::Storage("OFF status missing date".into()))?;
      let off_type = off_type
        .ok_or_else(|| Error::Storage("OFF status missing off_type".into()))?;
      Ok(Availability::Off {
        date:     decode_date(date)?,
        off_type: decode_off_type(off_type)?,
      })
    }
    "LEAVE" => {
      let start = start
        .ok_or_else(|| Error::Storage("LEAVE status missing start".into()))?;
      let end = end
        .ok_or_else(|| Error::Storage("LEAVE status missing end".into()))?;
      Ok(Availability::Leave {
        start: decode_date(start)?,
        end:   decode_date(end)?,
      })
    }
    other => Err(Error::Storage(format!("unknown state code: {other:?}"))),
  }
}

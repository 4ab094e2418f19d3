//! Date-range conflict detection.
//!
//! Given a proposed range and the person's existing bookings (all leave
//! records plus the current OFF status), report the first overlap. The scan
//! order is supplied by the caller and must be deterministic for a fixed
//! store state — the SQLite backend feeds leave records in ascending id
//! order, then the current OFF mark.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{calendar, status::OffType};

/// What kind of existing booking a proposed range collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum ConflictSource {
  Off { off_type: OffType },
  Leave { leave_id: i64 },
}

/// A conflicting booking, carried inside
/// [`Error::DateConflict`](crate::Error::DateConflict) for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
  pub source: ConflictSource,
  pub start:  NaiveDate,
  pub end:    NaiveDate,
}

impl std::fmt::Display for Conflict {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.source {
      ConflictSource::Off { off_type } => {
        write!(f, "existing {} OFF on {}", off_type, self.start)
      }
      ConflictSource::Leave { .. } => {
        write!(f, "existing LEAVE from {} to {}", self.start, self.end)
      }
    }
  }
}

/// Return the first candidate whose closed interval overlaps
/// `[new_start, new_end]`. Inclusive boundaries: a shared day conflicts.
/// No side effects.
pub fn first_overlap(
  new_start: NaiveDate,
  new_end: NaiveDate,
  candidates: &[Conflict],
) -> Option<Conflict> {
  candidates
    .iter()
    .copied()
    .find(|c| calendar::overlaps(new_start, new_end, c.start, c.end))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

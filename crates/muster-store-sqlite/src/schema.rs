//! SQL schema for the Muster SQLite store.
//!
//! Executed once at connection startup. Dates are stored as `YYYY-MM-DD`
//! text so lexicographic comparison matches chronological order (the daily
//! rollback relies on this for its bulk predicate update). Timestamps are
//! RFC 3339 UTC. Off-balances and duty credits are INTEGER half-day units.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS people (
    person_id     INTEGER PRIMARY KEY,
    rank          TEXT    NOT NULL,   -- rank code, e.g. '3SG'
    name          TEXT    NOT NULL,   -- upper-cased at registration
    off_balance   INTEGER NOT NULL DEFAULT 0 CHECK (off_balance >= 0),
    leave_balance INTEGER NOT NULL DEFAULT 0 CHECK (leave_balance >= 0),
    registered_at TEXT    NOT NULL    -- set once, never mutated
);

-- One live row per person; overwritten by every status change and by the
-- daily rollback. History lives in the leaves/duties tables.
CREATE TABLE IF NOT EXISTS status (
    person_id  INTEGER PRIMARY KEY REFERENCES people(person_id),
    state      TEXT    NOT NULL,      -- 'PRESENT' | 'OFF' | 'LEAVE'
    start_date TEXT,
    end_date   TEXT,
    off_type   TEXT,                  -- 'AM' | 'PM' | 'FULL', OFF only
    updated_at TEXT    NOT NULL,
    CHECK (start_date IS NULL OR end_date IS NULL OR start_date <= end_date)
);

-- Leave bookings are strictly append-only.
CREATE TABLE IF NOT EXISTS leaves (
    leave_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id  INTEGER NOT NULL REFERENCES people(person_id),
    start_date TEXT    NOT NULL,
    end_date   TEXT    NOT NULL,
    created_at TEXT    NOT NULL,
    CHECK (start_date <= end_date)
);

-- Duty occurrences are strictly append-only; duplicate submissions for the
-- same person and date are rejected, not merged.
CREATE TABLE IF NOT EXISTS duties (
    duty_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id  INTEGER NOT NULL REFERENCES people(person_id),
    duty_date  TEXT    NOT NULL,
    day_type   TEXT    NOT NULL,      -- 'FRIDAY' | 'SATURDAY' | 'SUNDAY'
    credited   INTEGER NOT NULL,      -- half-day units
    created_at TEXT    NOT NULL,
    UNIQUE (person_id, duty_date)
);

CREATE INDEX IF NOT EXISTS leaves_person_idx ON leaves(person_id);
CREATE INDEX IF NOT EXISTS duties_person_idx ON duties(person_id);
CREATE INDEX IF NOT EXISTS status_state_idx  ON status(state);

PRAGMA user_version = 1;
";

//! SQLite backend for the Muster parade-state ledger.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Every compound operation executes as a
//! single SQLite transaction inside one `call` closure; since the connection
//! is single-threaded, operations are fully serialised and the per-person
//! read-check-write sequences required by the core can never interleave.

mod encode;
mod schema;
mod store;

pub use store::SqliteStore;

#[cfg(test)]
mod tests;

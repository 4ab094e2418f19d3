//! Core types and trait definitions for the Muster parade-state ledger.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.
//!
//! The decision logic lives here as pure functions ([`calendar`], [`balance`],
//! [`conflict`]) so it can be unit-tested without a store. Storage backends
//! implement [`store::ParadeStore`] and compose these functions inside a
//! single transaction per operation.

pub mod balance;
pub mod calendar;
pub mod conflict;
pub mod error;
pub mod person;
pub mod policy;
pub mod record;
pub mod status;
pub mod store;

pub use error::{Error, Result};

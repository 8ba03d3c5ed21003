//! Record model shared by formatters, geocoding and persistence.
//!
//! # Responsibility
//! - Define the canonical addressable record value bag.
//! - Define the `Addressable` capability any record type can implement.
//!
//! # Invariants
//! - Every persisted record is identified by a stable `RecordId`.
//! - Missing fields are `None`; empty strings are treated as absent.

pub mod addressable;
pub mod record;

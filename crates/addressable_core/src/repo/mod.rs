//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define record data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `AddressableRecord::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod record_repo;

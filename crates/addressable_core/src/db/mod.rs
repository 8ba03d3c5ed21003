//! SQLite adapter for addressable records.
//!
//! SQLite has no point type, so record positions live in a `TEXT` column
//! as point literals and distance filtering goes through the scalar
//! functions in [`functions`]. States and countries are lookup tables
//! referenced by id from `records`.
//!
//! # Invariants
//! - Connections returned by [`open_db`] / [`open_db_in_memory`] have the
//!   spatial functions registered and the schema at [`migrations::latest_version`].
//! - Schema version is tracked via `PRAGMA user_version`; a database written
//!   by a newer build is refused rather than downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod functions;
pub mod migrations;
mod open;

pub use functions::register_spatial_functions;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening, bootstrapping or migrating the record store.
#[derive(Debug)]
pub enum DbError {
    /// Error reported by SQLite, including spatial function registration.
    Sqlite(rusqlite::Error),
    /// The record store was migrated by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "record store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

//! Spatial storage port.
//!
//! # Responsibility
//! - Translate between `"lat,lon"` strings and storage point literals.
//! - Build distance predicates for spatial columns.
//!
//! # Invariants
//! - Column names are validated before being placed in SQL text.
//! - Point values and distances are always bound as parameters.

use crate::geo::coordinates::Coordinates;
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod wkt;

pub use wkt::{get_location_attribute, set_location_attribute, WktPointStore};

pub type SpatialResult<T> = Result<T, SpatialError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SpatialError {
    /// Input is not a `"lat,lon"` pair of numbers.
    InvalidPoint(String),
    /// Column reference is not a plain (optionally qualified) identifier.
    InvalidColumn(String),
    /// Distance is negative or not finite.
    InvalidDistance(f64),
}

impl Display for SpatialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPoint(value) => write!(f, "invalid point `{value}`; expected `lat,lon`"),
            Self::InvalidColumn(value) => write!(f, "invalid spatial column `{value}`"),
            Self::InvalidDistance(value) => write!(f, "invalid distance {value}"),
        }
    }
}

impl Error for SpatialError {}

/// Storage-side encoding of a point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageValue(String);

impl StorageValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for StorageValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// SQL fragment plus its positional bind values.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialPredicate {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Point encoding and distance filtering for a storage backend.
pub trait SpatialStore {
    fn encode_point(&self, point: Coordinates) -> StorageValue;
    fn decode_point(&self, value: &StorageValue) -> Option<Coordinates>;

    /// Encodes a `"lat,lon"` attribute for storage.
    ///
    /// # Errors
    /// - Returns `SpatialError::InvalidPoint` for anything but two numeric
    ///   comma-separated parts.
    fn encode_location(&self, value: &str) -> SpatialResult<StorageValue> {
        Coordinates::parse(value)
            .map(|point| self.encode_point(point))
            .ok_or_else(|| SpatialError::InvalidPoint(value.to_string()))
    }

    /// Decodes a stored point back into its `"lat,lon"` attribute form.
    fn decode_location(&self, value: &StorageValue) -> Option<String> {
        self.decode_point(value).map(|point| point.to_string())
    }

    /// Predicate matching rows whose `column` lies strictly closer than
    /// `distance` to `point`, in the backend's native distance unit.
    fn within_distance(
        &self,
        column: &str,
        point: Coordinates,
        distance: f64,
    ) -> SpatialResult<SpatialPredicate>;
}

//! Addressable record domain model.
//!
//! # Responsibility
//! - Define the canonical record carrying address, contact and position fields.
//! - Provide validation used by persistence write paths.
//!
//! # Invariants
//! - `uuid` is stable and never nil.
//! - `lat` stays within `[-90, 90]` and `lon` within `[-180, 180]` when set.
//! - `location` is the serialized `"lat,lon"` form, never a storage literal.

use crate::geo::coordinates::Coordinates;
use crate::model::addressable::Addressable;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for persisted records.
pub type RecordId = Uuid;

/// Reference to a named lookup row (state/region or country).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Validation failures for record write paths.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    NilUuid,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "record uuid must not be nil"),
            Self::LatitudeOutOfRange(value) => {
                write!(f, "latitude {value} is outside [-90, 90]")
            }
            Self::LongitudeOutOfRange(value) => {
                write!(f, "longitude {value} is outside [-180, 180]")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Canonical record with contact and location fields.
///
/// All descriptive fields are optional; formatters skip whatever is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressableRecord {
    pub uuid: RecordId,
    pub address: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<NamedRef>,
    pub country: Option<NamedRef>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub toll_free: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub name: Option<String>,
    /// Degrees, north positive.
    pub lat: Option<f64>,
    /// Degrees, east positive.
    pub lon: Option<f64>,
    /// `"lat,lon"`; takes precedence over `lat`/`lon` when present.
    pub location: Option<String>,
}

impl AddressableRecord {
    /// Creates an empty record with a generated stable ID.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty record with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: RecordId) -> Self {
        Self {
            uuid,
            address: None,
            address2: None,
            city: None,
            postcode: None,
            state: None,
            country: None,
            phone: None,
            fax: None,
            toll_free: None,
            firstname: None,
            lastname: None,
            name: None,
            lat: None,
            lon: None,
            location: None,
        }
    }

    /// Checks invariants required before persistence.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.uuid.is_nil() {
            return Err(RecordValidationError::NilUuid);
        }
        validate_coordinates(self.lat, self.lon)?;
        // Malformed text is rejected by the spatial encoder on write.
        if let Some(point) = self.location.as_deref().and_then(Coordinates::parse) {
            validate_coordinates(Some(point.lat), Some(point.lon))?;
        }
        Ok(())
    }
}

fn validate_coordinates(lat: Option<f64>, lon: Option<f64>) -> Result<(), RecordValidationError> {
    if let Some(lat) = lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(RecordValidationError::LatitudeOutOfRange(lat));
        }
    }
    if let Some(lon) = lon {
        if !(-180.0..=180.0).contains(&lon) {
            return Err(RecordValidationError::LongitudeOutOfRange(lon));
        }
    }
    Ok(())
}

impl Default for AddressableRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl Addressable for AddressableRecord {
    fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    fn address2(&self) -> Option<&str> {
        self.address2.as_deref()
    }

    fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    fn state_name(&self) -> Option<&str> {
        self.state.as_ref().map(|state| state.name.as_str())
    }

    fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    fn country_name(&self) -> Option<&str> {
        self.country.as_ref().map(|country| country.name.as_str())
    }

    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    fn fax(&self) -> Option<&str> {
        self.fax.as_deref()
    }

    fn toll_free(&self) -> Option<&str> {
        self.toll_free.as_deref()
    }

    fn firstname(&self) -> Option<&str> {
        self.firstname.as_deref()
    }

    fn lastname(&self) -> Option<&str> {
        self.lastname.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn lat(&self) -> Option<f64> {
        self.lat
    }

    fn lon(&self) -> Option<f64> {
        self.lon
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

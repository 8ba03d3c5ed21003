//! Record use-case service.
//!
//! # Responsibility
//! - Refresh stored positions from the geocoding provider.
//! - Answer distance questions about persisted records.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Provider failures surface as `ServiceError::Geocode`, never as `false`.

use crate::geo::coordinates::Coordinates;
use crate::geo::geocode::{GeocodeError, Geocoder};
use crate::model::addressable::Addressable;
use crate::model::record::{AddressableRecord, RecordId};
use crate::repo::record_repo::{RecordRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Geocoding provider failed.
    Geocode(GeocodeError),
    /// Target record does not exist.
    RecordNotFound(RecordId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Geocode(err) => write!(f, "{err}"),
            Self::RecordNotFound(id) => write!(f, "record not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geocode(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::RecordNotFound(_) => None,
        }
    }
}

impl From<GeocodeError> for ServiceError {
    fn from(value: GeocodeError) -> Self {
        Self::Geocode(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::RecordNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service over a record repository and a geocoding provider.
pub struct RecordService<R: RecordRepository, G: Geocoder> {
    repo: R,
    geocoder: G,
}

impl<R: RecordRepository, G: Geocoder> RecordService<R, G> {
    pub fn new(repo: R, geocoder: G) -> Self {
        Self { repo, geocoder }
    }

    /// Geocodes the record's own address and persists the result.
    ///
    /// # Contract
    /// - On success sets `lat`, `lon` and `location` (`"lat, lon"`), updates
    ///   the stored row and returns `true`.
    /// - Returns `false` and leaves the record untouched when the address is
    ///   blank or the provider returns no coordinates.
    /// - On error the record is left untouched.
    ///
    /// # Errors
    /// - `ServiceError::Geocode` when the provider fails.
    /// - `ServiceError::RecordNotFound` when the record was never persisted.
    pub fn update_geocode(&self, record: &mut AddressableRecord) -> ServiceResult<bool> {
        let Some(coordinates) = record.fetch_coordinates(&self.geocoder, None)? else {
            info!(
                "event=geocode_update module=service status=skipped record_id={}",
                record.uuid
            );
            return Ok(false);
        };

        let mut updated = record.clone();
        updated.lat = Some(coordinates.lat);
        updated.lon = Some(coordinates.lon);
        updated.location = Some(format!("{}, {}", coordinates.lat, coordinates.lon));
        self.repo.update_record(&updated)?;
        *record = updated;

        info!(
            "event=geocode_update module=service status=ok record_id={}",
            record.uuid
        );
        Ok(true)
    }

    /// Distance from a stored record to `(lat, lon)`.
    ///
    /// Returns `Ok(None)` when the record has no usable position.
    pub fn distance_to(
        &self,
        id: RecordId,
        lat: f64,
        lon: f64,
        unit: &str,
    ) -> ServiceResult<Option<f64>> {
        let record = self
            .repo
            .get_record(id)?
            .ok_or(ServiceError::RecordNotFound(id))?;
        Ok(record.distance(lat, lon, unit))
    }

    /// Records stored within `distance` (storage units) of `point`, nearest first.
    pub fn records_near(
        &self,
        point: Coordinates,
        distance: f64,
    ) -> ServiceResult<Vec<AddressableRecord>> {
        Ok(self.repo.list_within_distance(point, distance)?)
    }
}

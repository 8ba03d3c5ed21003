//! Contact and location behavior for addressable records.
//!
//! Address/phone/name formatting, geocoding through an injected provider,
//! great-circle distances, and a SQLite adapter for spatial storage.

pub mod db;
pub mod format;
pub mod geo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod spatial;

pub use format::address::{format_address, DEFAULT_LINE_SEPARATOR};
pub use format::number::{format_toll_free_number, format_us_number};
pub use geo::coordinates::Coordinates;
pub use geo::distance::{great_circle_distance, DistanceUnit};
pub use geo::geocode::{
    lookup_coordinates, lookup_coordinates_lenient, lookup_geocode, lookup_geocode_lenient,
    Geocode, GeocodeError, GeocodeResult, Geocoder, GeocoderError,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::addressable::Addressable;
pub use model::record::{AddressableRecord, NamedRef, RecordId, RecordValidationError};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::record_service::{RecordService, ServiceError, ServiceResult};
pub use spatial::{
    get_location_attribute, set_location_attribute, SpatialError, SpatialPredicate,
    SpatialResult, SpatialStore, StorageValue, WktPointStore,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

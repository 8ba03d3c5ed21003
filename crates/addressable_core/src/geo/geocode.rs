//! Geocoding collaborator contract and lookup helpers.
//!
//! # Responsibility
//! - Define the `Geocoder` port implemented by provider adapters.
//! - Skip provider calls for blank addresses.
//! - Surface provider failures as typed errors, with opt-in fail-open helpers.
//!
//! # Invariants
//! - Blank addresses return `Ok(None)` without touching the provider.
//! - Addresses are logged by length only.

use crate::geo::coordinates::Coordinates;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type GeocodeResult<T> = Result<T, GeocodeError>;

/// Provider-side failure reported by a [`Geocoder`] implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderError {
    message: String,
}

impl GeocoderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for GeocoderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for GeocoderError {}

/// Lookup-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocodeError {
    /// The geocoding provider failed for a non-blank address.
    Provider(GeocoderError),
}

impl Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(err) => write!(f, "geocoding provider failed: {err}"),
        }
    }
}

impl Error for GeocodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
        }
    }
}

impl From<GeocoderError> for GeocodeError {
    fn from(value: GeocoderError) -> Self {
        Self::Provider(value)
    }
}

/// Geocode payload returned by a provider.
///
/// Only `latitude`/`longitude` are required for coordinate projection; other
/// fields are passed through for callers that want them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geocode {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub formatted_address: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    /// Provider-specific fields not modelled above.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Geocode {
    /// Geocode carrying only a position.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude?, self.longitude?)
    }
}

/// Converts free-text addresses into geocodes.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Geocode, GeocoderError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, address: &str) -> Result<Geocode, GeocoderError> {
        (**self).geocode(address)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, address: &str) -> Result<Geocode, GeocoderError> {
        (**self).geocode(address)
    }
}

/// Geocodes `address`.
///
/// Returns `Ok(None)` for blank input without calling the provider.
///
/// # Errors
/// - Returns `GeocodeError::Provider` when the provider fails.
pub fn lookup_geocode(geocoder: &dyn Geocoder, address: &str) -> GeocodeResult<Option<Geocode>> {
    if address.trim().is_empty() {
        return Ok(None);
    }

    let started_at = Instant::now();
    match geocoder.geocode(address) {
        Ok(geocode) => {
            info!(
                "event=geocode_lookup module=geo status=ok address_len={} has_coordinates={} duration_ms={}",
                address.len(),
                geocode.coordinates().is_some(),
                started_at.elapsed().as_millis()
            );
            Ok(Some(geocode))
        }
        Err(err) => {
            warn!(
                "event=geocode_lookup module=geo status=error address_len={} duration_ms={} error={}",
                address.len(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}

/// Resolves `(lat, lon)` for `address`.
///
/// Returns `Ok(None)` for blank input or when either coordinate is missing.
pub fn lookup_coordinates(
    geocoder: &dyn Geocoder,
    address: &str,
) -> GeocodeResult<Option<Coordinates>> {
    Ok(lookup_geocode(geocoder, address)?.and_then(|geocode| geocode.coordinates()))
}

/// Fail-open variant of [`lookup_geocode`]: provider errors become `None`.
pub fn lookup_geocode_lenient(geocoder: &dyn Geocoder, address: &str) -> Option<Geocode> {
    lookup_geocode(geocoder, address).unwrap_or_else(|err| {
        warn!("event=geocode_fail_open module=geo status=degraded error={err}");
        None
    })
}

/// Fail-open variant of [`lookup_coordinates`].
pub fn lookup_coordinates_lenient(geocoder: &dyn Geocoder, address: &str) -> Option<Coordinates> {
    lookup_geocode_lenient(geocoder, address).and_then(|geocode| geocode.coordinates())
}

//! `Addressable` capability for record types.
//!
//! # Responsibility
//! - Expose raw contact/location fields through accessors.
//! - Provide formatting, geocoding and distance behavior on top of them.
//!
//! # Invariants
//! - Accessors default to `None`, so implementors only supply what they store.
//! - Provided methods never panic on missing or malformed fields.

use crate::format::address::{format_address, DEFAULT_LINE_SEPARATOR};
use crate::format::name::{compose_name, NameFallback, NameOrder};
use crate::format::non_empty;
use crate::format::number::{format_toll_free_number, format_us_number};
use crate::geo::coordinates::Coordinates;
use crate::geo::distance::{great_circle_distance, DistanceUnit};
use crate::geo::geocode::{lookup_coordinates, lookup_geocode, Geocode, GeocodeResult, Geocoder};

/// Separator used when deriving a geocoding query from the record address.
const GEOCODE_LINE_SEPARATOR: &str = ", ";

/// Contact and location behavior for any record that can supply the fields.
pub trait Addressable {
    fn address(&self) -> Option<&str> {
        None
    }

    fn address2(&self) -> Option<&str> {
        None
    }

    fn city(&self) -> Option<&str> {
        None
    }

    fn state_name(&self) -> Option<&str> {
        None
    }

    fn postcode(&self) -> Option<&str> {
        None
    }

    fn country_name(&self) -> Option<&str> {
        None
    }

    fn phone(&self) -> Option<&str> {
        None
    }

    fn fax(&self) -> Option<&str> {
        None
    }

    fn toll_free(&self) -> Option<&str> {
        None
    }

    fn firstname(&self) -> Option<&str> {
        None
    }

    fn lastname(&self) -> Option<&str> {
        None
    }

    fn name(&self) -> Option<&str> {
        None
    }

    fn lat(&self) -> Option<f64> {
        None
    }

    fn lon(&self) -> Option<f64> {
        None
    }

    /// Serialized `"lat,lon"` point.
    fn location(&self) -> Option<&str> {
        None
    }

    /// Multi-line postal address joined with `line_separator`.
    ///
    /// A bare `","` separator is widened to `", "`.
    fn formatted_address(&self, line_separator: &str) -> String {
        format_address(self, line_separator)
    }

    /// Postal address using newline separators.
    fn formatted_address_lines(&self) -> String {
        format_address(self, DEFAULT_LINE_SEPARATOR)
    }

    /// Phone as `(AAA) BBB-CCCC`, or the raw value when not 10 digits.
    fn formatted_phone(&self) -> String {
        format_us_number(self.phone().unwrap_or_default())
    }

    /// Fax as `(AAA) BBB-CCCC`, or the raw value when not 10 digits.
    fn formatted_fax(&self) -> String {
        format_us_number(self.fax().unwrap_or_default())
    }

    /// Toll-free as `1-AAA-BBB-CCCC`, or the raw value when not 10 digits.
    fn formatted_toll_free(&self) -> String {
        format_toll_free_number(self.toll_free().unwrap_or_default())
    }

    /// `"First Last"`.
    ///
    /// When only `name` is set this yields the (empty) last-name field, so
    /// callers get `None`. See [`Addressable::fullname_or_name`].
    fn fullname(&self) -> Option<String> {
        compose_name(self, NameOrder::FirstLast, NameFallback::LastNameField)
    }

    /// `"Last, First"`, with the same `name`-only behavior as `fullname`.
    fn reversename(&self) -> Option<String> {
        compose_name(self, NameOrder::LastFirst, NameFallback::LastNameField)
    }

    /// Like [`Addressable::fullname`] but falls back to `name`.
    fn fullname_or_name(&self) -> Option<String> {
        compose_name(self, NameOrder::FirstLast, NameFallback::Name)
    }

    /// Like [`Addressable::reversename`] but falls back to `name`.
    fn reversename_or_name(&self) -> Option<String> {
        compose_name(self, NameOrder::LastFirst, NameFallback::Name)
    }

    /// Geocodes `address`, or this record's own address when `address` is
    /// absent or blank.
    fn fetch_geocode(
        &self,
        geocoder: &dyn Geocoder,
        address: Option<&str>,
    ) -> GeocodeResult<Option<Geocode>> {
        match address.filter(|value| !value.trim().is_empty()) {
            Some(address) => lookup_geocode(geocoder, address),
            None => lookup_geocode(
                geocoder,
                &self.formatted_address(GEOCODE_LINE_SEPARATOR),
            ),
        }
    }

    /// Resolves `(lat, lon)` for `address` or this record's own address.
    fn fetch_coordinates(
        &self,
        geocoder: &dyn Geocoder,
        address: Option<&str>,
    ) -> GeocodeResult<Option<Coordinates>> {
        match address.filter(|value| !value.trim().is_empty()) {
            Some(address) => lookup_coordinates(geocoder, address),
            None => lookup_coordinates(
                geocoder,
                &self.formatted_address(GEOCODE_LINE_SEPARATOR),
            ),
        }
    }

    /// Stored position: a parsed `location` if present, else `lat`/`lon`.
    ///
    /// A present but malformed `location` yields `None`. Zero coordinates are
    /// treated as unset.
    fn position(&self) -> Option<Coordinates> {
        if let Some(location) = non_empty(self.location()) {
            return Coordinates::parse(location);
        }
        match (self.lat(), self.lon()) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Coordinates::new(lat, lon),
            _ => None,
        }
    }

    /// Great-circle distance from this record to `(lat2, lon2)`.
    ///
    /// `unit` is matched case-insensitively: `K` kilometres, `N` nautical
    /// miles, anything else statute miles.
    fn distance(&self, lat2: f64, lon2: f64, unit: &str) -> Option<f64> {
        let from = self.position()?;
        let to = Coordinates::new(lat2, lon2)?;
        Some(great_circle_distance(from, to, DistanceUnit::from_code(unit)))
    }
}

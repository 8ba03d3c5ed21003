//! WKT `POINT(lat lon)` implementation of the spatial port.
//!
//! Distances are planar, in degrees, as computed by the `st_distance` SQL
//! function registered in `db::functions`.

use crate::geo::coordinates::Coordinates;
use crate::spatial::{SpatialError, SpatialPredicate, SpatialResult, SpatialStore, StorageValue};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;

const POINT_PREFIX: &str = "POINT(";
const POINT_SUFFIX: &str = ")";

static COMPONENT_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ ,]+").expect("valid point separator regex"));
static COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").expect("valid column regex")
});

/// Encodes a `"lat,lon"` string as a `POINT(lat lon)` literal.
///
/// The textual components are kept as written, so decoding reproduces them.
///
/// # Errors
/// - Returns `SpatialError::InvalidPoint` unless `value` holds exactly two
///   numeric comma-separated parts.
pub fn set_location_attribute(value: &str) -> SpatialResult<StorageValue> {
    let invalid = || SpatialError::InvalidPoint(value.to_string());
    Coordinates::parse(value).ok_or_else(invalid)?;
    let (lat, lon) = value.split_once(',').ok_or_else(invalid)?;
    Ok(StorageValue::new(format!(
        "{POINT_PREFIX}{} {}{POINT_SUFFIX}",
        lat.trim(),
        lon.trim()
    )))
}

/// Decodes a `POINT(lat lon)` literal into `"lat,lon"`.
///
/// Anything that is not a point literal decodes to an empty string.
pub fn get_location_attribute(value: &str) -> String {
    let Some(body) = value
        .trim()
        .strip_prefix(POINT_PREFIX)
        .and_then(|rest| rest.strip_suffix(POINT_SUFFIX))
    else {
        return String::new();
    };
    COMPONENT_SEPARATOR_RE
        .replacen(body.trim(), 1, ",")
        .into_owned()
}

/// Parses a `POINT(lat lon)` literal.
pub fn parse_point_literal(value: &str) -> Option<Coordinates> {
    Coordinates::parse(&get_location_attribute(value))
}

/// Spatial port backed by WKT text columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct WktPointStore;

impl SpatialStore for WktPointStore {
    fn encode_point(&self, point: Coordinates) -> StorageValue {
        StorageValue::new(format!(
            "{POINT_PREFIX}{} {}{POINT_SUFFIX}",
            point.lat, point.lon
        ))
    }

    fn decode_point(&self, value: &StorageValue) -> Option<Coordinates> {
        parse_point_literal(value.as_str())
    }

    fn encode_location(&self, value: &str) -> SpatialResult<StorageValue> {
        set_location_attribute(value)
    }

    fn decode_location(&self, value: &StorageValue) -> Option<String> {
        let decoded = get_location_attribute(value.as_str());
        Coordinates::parse(&decoded).map(|_| decoded)
    }

    fn within_distance(
        &self,
        column: &str,
        point: Coordinates,
        distance: f64,
    ) -> SpatialResult<SpatialPredicate> {
        if !COLUMN_RE.is_match(column) {
            return Err(SpatialError::InvalidColumn(column.to_string()));
        }
        if !distance.is_finite() || distance < 0.0 {
            return Err(SpatialError::InvalidDistance(distance));
        }
        Ok(SpatialPredicate {
            sql: format!("st_distance({column}, ?) < ?"),
            params: vec![
                Value::Text(self.encode_point(point).into_inner()),
                Value::Real(distance),
            ],
        })
    }
}

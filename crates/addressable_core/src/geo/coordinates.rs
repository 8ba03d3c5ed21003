//! `(lat, lon)` value type.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Builds a position, rejecting non-finite components.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }

    /// Parses `"lat,lon"`.
    ///
    /// Requires exactly two comma-separated numeric parts; surrounding
    /// whitespace on each part is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',');
        let lat = parts.next()?.trim().parse::<f64>().ok()?;
        let lon = parts.next()?.trim().parse::<f64>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(lat, lon)
    }
}

impl Display for Coordinates {
    /// Renders the `"lat,lon"` form accepted by [`Coordinates::parse`].
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}
